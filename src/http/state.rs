use std::sync::Arc;

use crate::application::{
    auth_service::{AuthService, AuthServiceImpl},
    project_service::{ProjectService, ProjectServiceImpl},
    task_service::{TaskService, TaskServiceImpl},
    todo_service::{TodoService, TodoServiceImpl},
};
use crate::config::SummaryScope;
use crate::domain::repository::{ProjectRepository, TaskRepository, TodoRepository, UserRepository};

/// Everything a handler may reach, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn TaskService>,
    pub projects: Arc<dyn ProjectService>,
    pub todos: Arc<dyn TodoService>,
    pub auth: Arc<dyn AuthService>,
    pub summary_scope: SummaryScope,
}

impl AppState {
    pub fn from_store<S>(store: S, summary_scope: SummaryScope) -> Self
    where
        S: TaskRepository + ProjectRepository + TodoRepository + UserRepository + Clone,
    {
        Self {
            tasks: Arc::new(TaskServiceImpl::new(store.clone())),
            projects: Arc::new(ProjectServiceImpl::new(store.clone())),
            todos: Arc::new(TodoServiceImpl::new(store.clone())),
            auth: Arc::new(AuthServiceImpl::new(store)),
            summary_scope,
        }
    }
}
