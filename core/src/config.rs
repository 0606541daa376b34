//! Repository selection from the environment.
//!
//! `TODO_STORE_PATH` set to a non-empty path selects the JSON file store;
//! unset or empty keeps everything in memory.

use std::path::PathBuf;

use tracing::info;

use crate::file::FileTodoRepository;
use crate::repository::{InMemoryTodoRepository, TodoRepository};

pub const STORE_PATH_ENV: &str = "TODO_STORE_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_store_path(std::env::var(STORE_PATH_ENV).ok())
    }

    fn from_store_path(value: Option<String>) -> Self {
        let backend = match value {
            Some(path) if !path.is_empty() => StoreBackend::File(PathBuf::from(path)),
            _ => StoreBackend::Memory,
        };
        Self { backend }
    }

    /// Build the configured repository.
    pub fn open(&self) -> Box<dyn TodoRepository> {
        match &self.backend {
            StoreBackend::Memory => {
                info!("using in-memory todo store");
                Box::new(InMemoryTodoRepository::new())
            }
            StoreBackend::File(path) => {
                info!(path = %path.display(), "using file todo store");
                Box::new(FileTodoRepository::new(path))
            }
        }
    }
}
