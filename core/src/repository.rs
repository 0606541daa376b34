//! Storage boundary for todo items.
//!
//! # Design
//! `TodoRepository` is the only seam between the service and storage. It
//! needs two capabilities: upsert one item and return every item in insertion
//! order. `InMemoryTodoRepository` shares its `Vec` behind `Arc<RwLock<_>>`,
//! so clones observe the same store.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::RepositoryError;
use crate::types::TodoItem;

/// Persistence capability consumed by `TodoItemService`.
pub trait TodoRepository: Send + Sync {
    /// Insert `item` when it has no id yet, otherwise replace the stored item
    /// with the same id. Returns the persisted copy.
    fn save(&self, item: TodoItem) -> Result<TodoItem, RepositoryError>;

    /// Every stored item, oldest first.
    fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError>;
}

impl<R: TodoRepository + ?Sized> TodoRepository for Box<R> {
    fn save(&self, item: TodoItem) -> Result<TodoItem, RepositoryError> {
        (**self).save(item)
    }

    fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        (**self).find_all()
    }
}

impl<R: TodoRepository + ?Sized> TodoRepository for Arc<R> {
    fn save(&self, item: TodoItem) -> Result<TodoItem, RepositoryError> {
        (**self).save(item)
    }

    fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        (**self).find_all()
    }
}

/// One past the largest id in `items`, or 1 for a store without ids.
pub(crate) fn next_id(items: &[TodoItem]) -> Result<u64, RepositoryError> {
    items
        .iter()
        .filter_map(TodoItem::id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(RepositoryError::IdsExhausted)
}

/// Apply an upsert to an ordered item list, issuing the next id on insert.
pub(crate) fn upsert(items: &mut Vec<TodoItem>, item: TodoItem) -> Result<TodoItem, RepositoryError> {
    match item.id() {
        None => {
            let item = item.with_id(next_id(items)?);
            items.push(item.clone());
            Ok(item)
        }
        Some(id) => {
            let slot = items
                .iter_mut()
                .find(|stored| stored.id() == Some(id))
                .ok_or(RepositoryError::UnknownItem(id))?;
            *slot = item.clone();
            Ok(item)
        }
    }
}

/// Process-local repository backed by a shared vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    items: Arc<RwLock<Vec<TodoItem>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with `items` in order, assigning fresh ids.
    pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let items = items
            .into_iter()
            .zip(1..)
            .map(|(item, id)| item.with_id(id))
            .collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn save(&self, item: TodoItem) -> Result<TodoItem, RepositoryError> {
        let mut items = self.items.write().map_err(|_| RepositoryError::Poisoned)?;
        let saved = upsert(&mut items, item)?;
        debug!(id = saved.id(), count = items.len(), "saved todo item in memory");
        Ok(saved)
    }

    fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        let items = self.items.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(items.clone())
    }
}
