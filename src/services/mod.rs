pub mod identity;
pub mod tasks;

pub use identity::IdentityService;
pub use tasks::TaskService;
