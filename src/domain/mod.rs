pub mod ids;
pub mod patch;
pub mod project;
pub mod repository;
pub mod summary;
pub mod task;
pub mod timer;
pub mod todo;
pub mod user;
