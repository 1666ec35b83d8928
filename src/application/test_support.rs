use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ids::{ProjectId, TaskId, TodoId, UserId};
use crate::domain::project::{Project, ProjectPatch};
use crate::domain::repository::{ProjectRepository, TaskRepository, TodoRepository, UserRepository};
use crate::domain::summary::{ElapsedTimeSummary, TaskGroupField};
use crate::domain::task::{Task, TaskPatch};
use crate::domain::todo::{Todo, UpdateTodo};
use crate::domain::user::User;

/// In-memory stand-in for the document store. `round_trips` counts every call.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tasks: Arc<Mutex<HashMap<TaskId, Task>>>,
    projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    todos: Arc<Mutex<HashMap<TodoId, Todo>>>,
    users: Arc<Mutex<HashMap<UserId, User>>>,
    tokens: Arc<Mutex<HashMap<String, UserId>>>,
    round_trips: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn round_trips(&self) -> usize { self.round_trips.load(Ordering::SeqCst) }

    fn hit(&self) { self.round_trips.fetch_add(1, Ordering::SeqCst); }

    /// Seeds a task as-is, bypassing creation defaults.
    pub fn insert_task(&self, task: Task) { self.tasks.lock().unwrap().insert(task.id, task); }

    pub fn stored_task(&self, id: TaskId) -> Option<Task> { self.tasks.lock().unwrap().get(&id).cloned() }

    /// Makes every later task write fail as a lost connection would.
    pub fn fail_writes(&self) { self.fail_writes.store(true, Ordering::SeqCst); }
}

/// Sums `elapsedTime` per group, saturating at `i64::MAX`; a task that was never paused adds nothing.
pub fn sum_elapsed_by<'a>(tasks: impl IntoIterator<Item = &'a Task>, group: TaskGroupField) -> Vec<ElapsedTimeSummary> {
    let mut totals: HashMap<Uuid, i64> = HashMap::new();
    for task in tasks {
        let key = match group {
            TaskGroupField::Project => task.project_id.0,
            TaskGroupField::Creator => task.creator_id.0,
        };
        let total = totals.entry(key).or_insert(0);
        *total = total.saturating_add(task.elapsed_time.unwrap_or(0));
    }
    totals
        .into_iter()
        .map(|(id, total_time_elapsed)| ElapsedTimeSummary { id, total_time_elapsed })
        .collect()
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create(&self, task: Task) -> Result<Task> {
        self.hit();
        self.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(task)
    }
    async fn find_one(&self, id: TaskId, owner: UserId) -> Result<Option<Task>> {
        self.hit();
        Ok(self.tasks.lock().unwrap().get(&id).filter(|t| t.creator_id == owner).cloned())
    }
    async fn list(&self, owner: UserId) -> Result<Vec<Task>> {
        self.hit();
        Ok(self.tasks.lock().unwrap().values().filter(|t| t.creator_id == owner).cloned().collect())
    }
    async fn find_one_and_update(&self, id: TaskId, owner: UserId, patch: TaskPatch) -> Result<Option<Task>> {
        self.hit();
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("connection reset while updating task {id}");
        }
        let mut map = self.tasks.lock().unwrap();
        let Some(task) = map.get_mut(&id).filter(|t| t.creator_id == owner) else { return Ok(None) };
        patch.apply_to(task);
        Ok(Some(task.clone()))
    }
    async fn delete(&self, id: TaskId, owner: UserId) -> Result<Option<Task>> {
        self.hit();
        let mut map = self.tasks.lock().unwrap();
        if map.get(&id).is_some_and(|t| t.creator_id == owner) { Ok(map.remove(&id)) } else { Ok(None) }
    }
    async fn aggregate_sum_by_group(&self, group: TaskGroupField, owner: Option<UserId>) -> Result<Vec<ElapsedTimeSummary>> {
        self.hit();
        let map = self.tasks.lock().unwrap();
        let scoped = map.values().filter(|t| owner.is_none_or(|o| t.creator_id == o));
        Ok(sum_elapsed_by(scoped, group))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn create(&self, project: Project) -> Result<Project> {
        self.hit();
        self.projects.lock().unwrap().insert(project.id, project.clone());
        Ok(project)
    }
    async fn find_one(&self, id: ProjectId, owner: UserId) -> Result<Option<Project>> {
        self.hit();
        Ok(self.projects.lock().unwrap().get(&id).filter(|p| p.creator_id == owner).cloned())
    }
    async fn list(&self, owner: UserId) -> Result<Vec<Project>> {
        self.hit();
        Ok(self.projects.lock().unwrap().values().filter(|p| p.creator_id == owner).cloned().collect())
    }
    async fn find_one_and_update(&self, id: ProjectId, owner: UserId, patch: ProjectPatch) -> Result<Option<Project>> {
        self.hit();
        let mut map = self.projects.lock().unwrap();
        let Some(project) = map.get_mut(&id).filter(|p| p.creator_id == owner) else { return Ok(None) };
        patch.apply_to(project);
        Ok(Some(project.clone()))
    }
    async fn delete(&self, id: ProjectId, owner: UserId) -> Result<Option<Project>> {
        self.hit();
        let mut map = self.projects.lock().unwrap();
        if map.get(&id).is_some_and(|p| p.creator_id == owner) { Ok(map.remove(&id)) } else { Ok(None) }
    }
}

#[async_trait]
impl TodoRepository for InMemoryStore {
    async fn create(&self, todo: Todo) -> Result<Todo> {
        self.hit();
        self.todos.lock().unwrap().insert(todo.id, todo.clone());
        Ok(todo)
    }
    async fn find_one(&self, id: TodoId, owner: UserId) -> Result<Option<Todo>> {
        self.hit();
        Ok(self.todos.lock().unwrap().get(&id).filter(|t| t.creator_id == owner).cloned())
    }
    async fn list(&self, owner: UserId) -> Result<Vec<Todo>> {
        self.hit();
        Ok(self.todos.lock().unwrap().values().filter(|t| t.creator_id == owner).cloned().collect())
    }
    async fn find_one_and_update(&self, id: TodoId, owner: UserId, update: UpdateTodo) -> Result<Option<Todo>> {
        self.hit();
        let mut map = self.todos.lock().unwrap();
        let Some(todo) = map.get_mut(&id).filter(|t| t.creator_id == owner) else { return Ok(None) };
        update.apply_to(todo);
        Ok(Some(todo.clone()))
    }
    async fn delete(&self, id: TodoId, owner: UserId) -> Result<Option<Todo>> {
        self.hit();
        let mut map = self.todos.lock().unwrap();
        if map.get(&id).is_some_and(|t| t.creator_id == owner) { Ok(map.remove(&id)) } else { Ok(None) }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<Option<User>> {
        self.hit();
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Ok(None);
        }
        users.insert(user.id, user.clone());
        Ok(Some(user))
    }
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.hit();
        Ok(self.users.lock().unwrap().values().find(|u| u.email == email).cloned())
    }
    async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        self.hit();
        let Some(id) = self.tokens.lock().unwrap().get(token).copied() else { return Ok(None) };
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
    async fn add_token(&self, user: UserId, token: &str) -> Result<()> {
        self.hit();
        self.tokens.lock().unwrap().insert(token.to_string(), user);
        Ok(())
    }
    async fn remove_token(&self, token: &str) -> Result<bool> {
        self.hit();
        Ok(self.tokens.lock().unwrap().remove(token).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::CreateTask;
    use chrono::Utc;

    fn task(owner: UserId, project: ProjectId, elapsed: Option<i64>) -> Task {
        let mut t = Task::new(owner, CreateTask {
            name: None, description: None, is_paused: None, estimated_time: None, project_id: project,
        }, Utc::now());
        t.elapsed_time = elapsed;
        t
    }

    fn sorted(mut v: Vec<ElapsedTimeSummary>) -> Vec<ElapsedTimeSummary> {
        v.sort_by_key(|s| s.id);
        v
    }

    #[test]
    fn groups_by_project_regardless_of_order() {
        let (u, p1, p2) = (UserId::new(), ProjectId::new(), ProjectId::new());
        let forward = vec![task(u, p1, Some(10)), task(u, p1, Some(20)), task(u, p2, Some(5))];
        let mut backward = forward.clone();
        backward.reverse();

        let expected = sorted(vec![
            ElapsedTimeSummary { id: p1.0, total_time_elapsed: 30 },
            ElapsedTimeSummary { id: p2.0, total_time_elapsed: 5 },
        ]);
        assert_eq!(sorted(sum_elapsed_by(&forward, TaskGroupField::Project)), expected);
        assert_eq!(sorted(sum_elapsed_by(&backward, TaskGroupField::Project)), expected);
    }

    #[test]
    fn null_elapsed_counts_as_zero_but_group_still_appears() {
        let (u1, u2, p) = (UserId::new(), UserId::new(), ProjectId::new());
        let tasks = vec![task(u1, p, Some(40)), task(u2, p, None)];

        assert_eq!(sum_elapsed_by(&tasks, TaskGroupField::Project), vec![ElapsedTimeSummary { id: p.0, total_time_elapsed: 40 }]);
        let by_user = sorted(sum_elapsed_by(&tasks, TaskGroupField::Creator));
        assert_eq!(by_user, sorted(vec![
            ElapsedTimeSummary { id: u1.0, total_time_elapsed: 40 },
            ElapsedTimeSummary { id: u2.0, total_time_elapsed: 0 },
        ]));
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let (u, p) = (UserId::new(), ProjectId::new());
        let tasks = vec![task(u, p, Some(i64::MAX)), task(u, p, Some(i64::MAX))];
        assert_eq!(sum_elapsed_by(&tasks, TaskGroupField::Creator), vec![ElapsedTimeSummary { id: u.0, total_time_elapsed: i64::MAX }]);
    }

    #[test]
    fn empty_collection_yields_no_groups() {
        assert!(sum_elapsed_by(&Vec::<Task>::new(), TaskGroupField::Creator).is_empty());
    }
}
