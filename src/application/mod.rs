pub mod auth_service;
pub mod error;
pub mod project_service;
pub mod task_service;
pub mod todo_service;

#[cfg(test)]
pub(crate) mod test_support;
