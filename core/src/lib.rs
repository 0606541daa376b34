//! Todo list domain core.
//!
//! # Overview
//! `TodoItemService` adds items, marks them done and lists them, delegating
//! storage to any `TodoRepository`. Items are addressed by position in the
//! full stored sequence rather than by a stable id.
//!
//! # Design
//! - The service holds only its injected repository; all state lives there.
//! - Caller mistakes are `TodoError::InvalidArgument`; a position past the end
//!   is `Ok(None)`, not an error.
//! - Two repositories ship with the crate: `InMemoryTodoRepository` and the
//!   JSON-backed `FileTodoRepository`. `StoreConfig` picks one from the
//!   environment.
//! - The crate logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod error;
pub mod file;
pub mod repository;
pub mod service;
pub mod types;

pub use config::{StoreBackend, StoreConfig, STORE_PATH_ENV};
pub use error::{RepositoryError, TodoError};
pub use file::FileTodoRepository;
pub use repository::{InMemoryTodoRepository, TodoRepository};
pub use service::TodoItemService;
pub use types::{IndexedTodoItem, TodoItem, TodoParameter};
