pub mod task;
pub mod user;

pub use task::{Task, TaskCount};
pub use user::{NewUser, User};
