use crate::domain::ids::{TodoId, UserId};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, UpdateTodo};
use async_trait::async_trait;

use super::error::{ServiceError, ServiceResult};

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, owner: UserId, input: CreateTodo) -> ServiceResult<Todo>;
    async fn list(&self, owner: UserId) -> ServiceResult<Vec<Todo>>;
    async fn get(&self, id: &str, owner: UserId) -> ServiceResult<Todo>;
    async fn update(&self, id: &str, owner: UserId, input: UpdateTodo) -> ServiceResult<Todo>;
    async fn delete(&self, id: &str, owner: UserId) -> ServiceResult<Todo>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, owner: UserId, input: CreateTodo) -> ServiceResult<Todo> { Ok(self.repo.create(Todo::new(owner, input)).await?) }
    async fn list(&self, owner: UserId) -> ServiceResult<Vec<Todo>> { Ok(self.repo.list(owner).await?) }
    async fn get(&self, id: &str, owner: UserId) -> ServiceResult<Todo> {
        let id = TodoId::parse(id)?;
        self.repo.find_one(id, owner).await?.ok_or(ServiceError::NotFound)
    }
    async fn update(&self, id: &str, owner: UserId, input: UpdateTodo) -> ServiceResult<Todo> {
        let id = TodoId::parse(id)?;
        self.repo.find_one_and_update(id, owner, input).await?.ok_or(ServiceError::NotFound)
    }
    async fn delete(&self, id: &str, owner: UserId) -> ServiceResult<Todo> {
        let id = TodoId::parse(id)?;
        self.repo.delete(id, owner).await?.ok_or(ServiceError::NotFound)
    }
}
