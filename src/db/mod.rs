pub mod tasks;
pub mod users;

pub use tasks::TaskStore;
pub use users::UserDirectory;
