#![doc = "The `taskdeck` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic for a multi-user task-tracking"]
#![doc = "API: identity management (signup, login, refresh-token rotation), the"]
#![doc = "request authenticator, ownership-scoped task CRUD, the persistence layer,"]
#![doc = "routing configuration, and error handling. It is used by the main binary"]
#![doc = "(`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export key types for easier use of the library crate.
pub use crate::error::AppError;
pub use crate::services::{IdentityService, TaskService};
