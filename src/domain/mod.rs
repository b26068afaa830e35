pub mod member;
pub mod project;
pub mod requirement;
pub mod task;
pub mod types;
pub mod user;
