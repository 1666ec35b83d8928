use chrono::{DateTime, Utc};

use super::task::{Task, TaskPatch, MAX_ELAPSED_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
}

impl TimerState {
    pub fn of(task: &Task) -> Self {
        if task.is_paused { Self::Paused } else { Self::Running }
    }
}

/// Whole seconds between `start` and `now`, rounded half-up on milliseconds.
///
/// A missing start counts as zero and a start in the future clamps to zero.
pub fn elapsed_seconds(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let Some(start) = start else { return 0 };
    let millis = (now - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    ((millis + 500) / 1000).min(MAX_ELAPSED_SECONDS)
}

/// Decides the transition requested by `requested` against the stored task and
/// returns the patch to persist.
pub fn apply_update(existing: &Task, requested: TaskPatch, now: DateTime<Utc>) -> TaskPatch {
    if requested.is_paused != Some(true) {
        return requested;
    }
    TaskPatch {
        is_paused: Some(true),
        elapsed_time: Some(elapsed_seconds(existing.start_date, now)),
        ..requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ProjectId, UserId};
    use crate::domain::task::CreateTask;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn task(is_paused: bool, start: Option<DateTime<Utc>>, elapsed: Option<i64>) -> Task {
        let mut t = Task::new(UserId::new(), CreateTask {
            name: Some("write report".into()),
            description: None,
            is_paused: Some(is_paused),
            estimated_time: None,
            project_id: ProjectId::new(),
        }, t0());
        t.start_date = start;
        t.elapsed_time = elapsed;
        t
    }

    fn pause() -> TaskPatch {
        TaskPatch { is_paused: Some(true), ..Default::default() }
    }

    #[test]
    fn pausing_a_running_task_records_seconds_since_start() {
        let running = task(false, Some(t0()), None);
        assert_eq!(TimerState::of(&running), TimerState::Running);
        let out = apply_update(&running, pause(), t0() + Duration::seconds(125));
        assert_eq!(out.is_paused, Some(true));
        assert_eq!(out.elapsed_time, Some(125));
    }

    #[test]
    fn ancient_start_is_capped() {
        let ancient = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(elapsed_seconds(Some(ancient), t0()), MAX_ELAPSED_SECONDS);
    }

    #[test]
    fn rounds_half_up_on_milliseconds() {
        assert_eq!(elapsed_seconds(Some(t0()), t0() + Duration::milliseconds(1499)), 1);
        assert_eq!(elapsed_seconds(Some(t0()), t0() + Duration::milliseconds(1500)), 2);
        assert_eq!(elapsed_seconds(Some(t0()), t0() + Duration::milliseconds(400)), 0);
    }

    #[test]
    fn start_in_the_future_clamps_to_zero() {
        let skewed = task(false, Some(t0() + Duration::seconds(30)), None);
        assert_eq!(apply_update(&skewed, pause(), t0()).elapsed_time, Some(0));
    }

    #[test]
    fn never_started_task_pauses_with_zero_elapsed() {
        let fresh = task(false, None, None);
        let out = apply_update(&fresh, pause(), t0() + Duration::hours(3));
        assert_eq!(out.elapsed_time, Some(0));
        assert_eq!(out.is_paused, Some(true));
    }

    #[test]
    fn pausing_a_paused_task_recomputes_and_overwrites() {
        let paused = task(true, Some(t0()), Some(9_999));
        assert_eq!(TimerState::of(&paused), TimerState::Paused);
        let out = apply_update(&paused, pause(), t0() + Duration::seconds(60));
        assert_eq!(out.is_paused, Some(true));
        assert_eq!(out.elapsed_time, Some(60));
    }

    #[test]
    fn second_pause_replaces_first_segment() {
        let mut t = task(false, Some(t0()), None);
        apply_update(&t, pause(), t0() + Duration::seconds(100)).apply_to(&mut t);
        assert_eq!(t.elapsed_time, Some(100));

        let resume_at = t0() + Duration::seconds(200);
        let resume = TaskPatch { is_paused: Some(false), start_date: Some(resume_at), ..Default::default() };
        apply_update(&t, resume, resume_at).apply_to(&mut t);
        assert_eq!(TimerState::of(&t), TimerState::Running);
        assert_eq!(t.elapsed_time, Some(100));

        apply_update(&t, pause(), resume_at + Duration::seconds(30)).apply_to(&mut t);
        assert_eq!(t.elapsed_time, Some(30));
    }

    #[test]
    fn resuming_passes_fields_through_verbatim() {
        let paused = task(true, Some(t0()), Some(40));
        let requested = TaskPatch {
            is_paused: Some(false),
            elapsed_time: Some(7),
            start_date: Some(t0() + Duration::minutes(5)),
            name: Some("renamed".into()),
            description: None,
        };
        let out = apply_update(&paused, requested.clone(), t0() + Duration::hours(1));
        assert_eq!(out, requested);
    }

    #[test]
    fn pause_keeps_name_description_and_start_from_request() {
        let running = task(false, Some(t0()), None);
        let new_start = t0() + Duration::seconds(10);
        let requested = TaskPatch {
            is_paused: Some(true),
            elapsed_time: Some(1_000_000),
            start_date: Some(new_start),
            name: Some("n".into()),
            description: Some("d".into()),
        };
        let out = apply_update(&running, requested, t0() + Duration::seconds(20));
        assert_eq!(out.elapsed_time, Some(20));
        assert_eq!(out.start_date, Some(new_start));
        assert_eq!(out.name.as_deref(), Some("n"));
        assert_eq!(out.description.as_deref(), Some("d"));
    }
}
