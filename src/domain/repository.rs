use async_trait::async_trait;

use super::ids::{ProjectId, TaskId, TodoId, UserId};
use super::project::{Project, ProjectPatch};
use super::summary::{ElapsedTimeSummary, TaskGroupField};
use super::task::{Task, TaskPatch};
use super::todo::{Todo, UpdateTodo};
use super::user::User;

// Every lookup below is keyed by (id, owner); a row owned by someone else is
// indistinguishable from a missing one.

#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn create(&self, task: Task) -> anyhow::Result<Task>;
    async fn find_one(&self, id: TaskId, owner: UserId) -> anyhow::Result<Option<Task>>;
    async fn list(&self, owner: UserId) -> anyhow::Result<Vec<Task>>;
    /// Applies `patch` atomically and returns the updated record.
    async fn find_one_and_update(&self, id: TaskId, owner: UserId, patch: TaskPatch) -> anyhow::Result<Option<Task>>;
    async fn delete(&self, id: TaskId, owner: UserId) -> anyhow::Result<Option<Task>>;
    /// Sums `elapsedTime` per `group`, over every task or only `owner`'s.
    async fn aggregate_sum_by_group(&self, group: TaskGroupField, owner: Option<UserId>) -> anyhow::Result<Vec<ElapsedTimeSummary>>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn create(&self, project: Project) -> anyhow::Result<Project>;
    async fn find_one(&self, id: ProjectId, owner: UserId) -> anyhow::Result<Option<Project>>;
    async fn list(&self, owner: UserId) -> anyhow::Result<Vec<Project>>;
    async fn find_one_and_update(&self, id: ProjectId, owner: UserId, patch: ProjectPatch) -> anyhow::Result<Option<Project>>;
    async fn delete(&self, id: ProjectId, owner: UserId) -> anyhow::Result<Option<Project>>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, todo: Todo) -> anyhow::Result<Todo>;
    async fn find_one(&self, id: TodoId, owner: UserId) -> anyhow::Result<Option<Todo>>;
    async fn list(&self, owner: UserId) -> anyhow::Result<Vec<Todo>>;
    async fn find_one_and_update(&self, id: TodoId, owner: UserId, update: UpdateTodo) -> anyhow::Result<Option<Todo>>;
    async fn delete(&self, id: TodoId, owner: UserId) -> anyhow::Result<Option<Todo>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Returns `None` when the email is already taken.
    async fn create(&self, user: User) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<User>>;
    async fn add_token(&self, user: UserId, token: &str) -> anyhow::Result<()>;
    async fn remove_token(&self, token: &str) -> anyhow::Result<bool>;
}
