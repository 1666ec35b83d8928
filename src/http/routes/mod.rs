pub mod projects;
pub mod tasks;
pub mod todos;
pub mod users;
