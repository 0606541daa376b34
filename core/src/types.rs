//! Domain types for the todo list.
//!
//! # Design
//! An item's external identity is its position in the full stored sequence,
//! recomputed on every listing. `TodoItem::id` is only a storage key handed
//! out by the repository so `save` can tell an insert from an update; it never
//! appears in `IndexedTodoItem`.

use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// A single todo entry. Content is fixed at creation; `done` only moves from
/// `false` to `true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    content: String,
    #[serde(default)]
    done: bool,
}

impl TodoItem {
    /// Create a pending item that has not been saved yet.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            done: false,
        }
    }

    /// Storage key assigned by the repository, `None` until first saved.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Return a copy of this item carrying the given storage key.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }
}

/// Input for creating a todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoParameter {
    content: String,
}

impl TodoParameter {
    /// Rejects empty content. Whitespace-only content is accepted as-is.
    pub fn new(content: impl Into<String>) -> Result<Self, TodoError> {
        let content = content.into();
        if content.is_empty() {
            return Err(TodoError::InvalidArgument(
                "todo content must not be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// A listed item paired with its zero-based position in the full stored
/// sequence, even when the listing is filtered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexedTodoItem {
    pub index: usize,
    pub content: String,
    pub done: bool,
}

impl IndexedTodoItem {
    pub fn new(index: usize, item: &TodoItem) -> Self {
        Self {
            index,
            content: item.content().to_string(),
            done: item.is_done(),
        }
    }
}
