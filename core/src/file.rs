//! JSON file repository.
//!
//! The whole sequence lives in one pretty-printed JSON array. Each `save`
//! reloads the file, applies the upsert, writes a sibling `.tmp` file and
//! renames it over the store. A missing file reads as an empty list.
//!
//! Hand-written or older files may lack ids. Loading gives every id-less
//! entry the next free id in file order, so reloading an unchanged file
//! always yields the same ids. A file that repeats an id is rejected.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::RepositoryError;
use crate::repository::{next_id, upsert, TodoRepository};
use crate::types::TodoItem;

#[derive(Debug, Clone)]
pub struct FileTodoRepository {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl FileTodoRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(RwLock::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        let items: Vec<TodoItem> =
            serde_json::from_str(&raw).map_err(|source| RepositoryError::Serialization {
                path: self.path.clone(),
                source,
            })?;
        let items = self.assign_missing_ids(items)?;
        debug!(path = %self.path.display(), count = items.len(), "loaded todo store");
        Ok(items)
    }

    fn assign_missing_ids(&self, items: Vec<TodoItem>) -> Result<Vec<TodoItem>, RepositoryError> {
        let mut seen = HashSet::new();
        for id in items.iter().filter_map(TodoItem::id) {
            if !seen.insert(id) {
                return Err(RepositoryError::DuplicateId {
                    path: self.path.clone(),
                    id,
                });
            }
        }

        let mut next = next_id(&items).ok();
        items
            .into_iter()
            .map(|item| {
                if item.id().is_some() {
                    return Ok(item);
                }
                let id = next.ok_or(RepositoryError::IdsExhausted)?;
                next = id.checked_add(1);
                Ok(item.with_id(id))
            })
            .collect()
    }

    fn persist(&self, items: &[TodoItem]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(items).map_err(|source| RepositoryError::Serialization {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, body).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }
        debug!(path = %self.path.display(), count = items.len(), "persisted todo store");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TodoRepository for FileTodoRepository {
    fn save(&self, item: TodoItem) -> Result<TodoItem, RepositoryError> {
        let _guard = self.lock.write().map_err(|_| RepositoryError::Poisoned)?;
        let mut items = self.load()?;
        let saved = upsert(&mut items, item)?;
        self.persist(&items)?;
        Ok(saved)
    }

    fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        let _guard = self.lock.read().map_err(|_| RepositoryError::Poisoned)?;
        self.load()
    }
}
