pub mod sqlite_repo;
mod sqlite_projects;
mod sqlite_tasks;
mod sqlite_todos;
mod sqlite_users;
