use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::{ServiceError, ServiceResult};
use crate::domain::ids::{TaskId, UserId};
use crate::domain::repository::TaskRepository;
use crate::domain::summary::{ElapsedTimeSummary, TaskGroupField};
use crate::domain::task::{CreateTask, Task, TaskPatch};
use crate::domain::timer::{self, TimerState};

#[async_trait]
pub trait TaskService: Send + Sync + 'static {
    async fn create(&self, owner: UserId, input: CreateTask, now: DateTime<Utc>) -> ServiceResult<Task>;
    async fn list(&self, owner: UserId) -> ServiceResult<Vec<Task>>;
    async fn get(&self, id: &str, owner: UserId) -> ServiceResult<Task>;
    /// Runs the timer transition for `patch` and persists the result.
    async fn update_task(&self, id: &str, owner: UserId, patch: TaskPatch, now: DateTime<Utc>) -> ServiceResult<Task>;
    async fn delete(&self, id: &str, owner: UserId) -> ServiceResult<Task>;
    /// `None` scans every task in the store.
    async fn summarize_elapsed_time_by_project(&self, owner: Option<UserId>) -> ServiceResult<Vec<ElapsedTimeSummary>>;
    async fn summarize_elapsed_time_by_user(&self, owner: Option<UserId>) -> ServiceResult<Vec<ElapsedTimeSummary>>;
}

#[derive(Clone)]
pub struct TaskServiceImpl<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TaskRepository> TaskService for TaskServiceImpl<R> {
    async fn create(&self, owner: UserId, input: CreateTask, now: DateTime<Utc>) -> ServiceResult<Task> {
        let task = self.repo.create(Task::new(owner, input, now)).await?;
        tracing::info!(task = %task.id, project = %task.project_id, paused = task.is_paused, "task created");
        Ok(task)
    }

    async fn list(&self, owner: UserId) -> ServiceResult<Vec<Task>> { Ok(self.repo.list(owner).await?) }

    async fn get(&self, id: &str, owner: UserId) -> ServiceResult<Task> {
        let id = TaskId::parse(id)?;
        self.repo.find_one(id, owner).await?.ok_or(ServiceError::NotFound)
    }

    async fn update_task(&self, id: &str, owner: UserId, patch: TaskPatch, now: DateTime<Utc>) -> ServiceResult<Task> {
        let id = TaskId::parse(id)?;
        // Read and write are separate round-trips; a concurrent update in between is lost.
        let existing = self.repo.find_one(id, owner).await?.ok_or(ServiceError::NotFound)?;
        let from = TimerState::of(&existing);
        let finalized = timer::apply_update(&existing, patch, now);
        tracing::debug!(task = %id, ?from, paused = ?finalized.is_paused, elapsed = ?finalized.elapsed_time, "applying task update");
        self.repo.find_one_and_update(id, owner, finalized).await?.ok_or(ServiceError::NotFound)
    }

    async fn delete(&self, id: &str, owner: UserId) -> ServiceResult<Task> {
        let id = TaskId::parse(id)?;
        let removed = self.repo.delete(id, owner).await?.ok_or(ServiceError::NotFound)?;
        tracing::info!(task = %removed.id, "task deleted");
        Ok(removed)
    }

    async fn summarize_elapsed_time_by_project(&self, owner: Option<UserId>) -> ServiceResult<Vec<ElapsedTimeSummary>> {
        Ok(self.repo.aggregate_sum_by_group(TaskGroupField::Project, owner).await?)
    }

    async fn summarize_elapsed_time_by_user(&self, owner: Option<UserId>) -> ServiceResult<Vec<ElapsedTimeSummary>> {
        Ok(self.repo.aggregate_sum_by_group(TaskGroupField::Creator, owner).await?)
    }
}
