//! Add, mark-done and list operations over an injected repository.
//!
//! # Design
//! `TodoItemService` holds only its repository and carries no other state
//! between calls. Positions handed to `mark_todo_item_done` are 1-based into
//! the full stored sequence; indices returned by `list` are 0-based into that
//! same sequence, so a filtered listing still points at the right item.
//! Nothing here locks: two callers racing on `find_all` then `save` see
//! whatever the repository gives them.

use tracing::{debug, info, warn};

use crate::error::TodoError;
use crate::repository::TodoRepository;
use crate::types::{IndexedTodoItem, TodoItem, TodoParameter};

/// Todo list operations backed by a `TodoRepository`.
#[derive(Debug, Clone)]
pub struct TodoItemService<R> {
    repository: R,
}

impl<R: TodoRepository> TodoItemService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Store a new pending item and return the repository's copy of it.
    ///
    /// `None` stands for a missing parameter and is rejected.
    pub fn add_todo_item(&self, parameter: Option<TodoParameter>) -> Result<TodoItem, TodoError> {
        let Some(parameter) = parameter else {
            warn!("rejected absent todo parameter");
            return Err(TodoError::InvalidArgument(
                "todo parameter must be present".to_string(),
            ));
        };

        let saved = self.repository.save(TodoItem::new(parameter.into_content()))?;
        info!(content = saved.content(), "added todo item");
        Ok(saved)
    }

    /// Mark the item at 1-based `position` done.
    ///
    /// Returns `Ok(None)` without saving when `position` is past the end.
    pub fn mark_todo_item_done(&self, position: i64) -> Result<Option<TodoItem>, TodoError> {
        if position <= 0 {
            warn!(position, "rejected non-positive todo position");
            return Err(TodoError::InvalidArgument(format!(
                "todo position must be positive, got {position}"
            )));
        }

        let items = self.repository.find_all()?;
        let found = usize::try_from(position - 1)
            .ok()
            .and_then(|index| items.into_iter().nth(index));
        let Some(mut item) = found else {
            debug!(position, "todo position out of range");
            return Ok(None);
        };

        item.mark_done();
        let saved = self.repository.save(item)?;
        info!(position, content = saved.content(), "marked todo item done");
        Ok(Some(saved))
    }

    /// List stored items with their full-sequence index, dropping done items
    /// unless `include_done` is set.
    pub fn list(&self, include_done: bool) -> Result<Vec<IndexedTodoItem>, TodoError> {
        let items = self.repository.find_all()?;
        let listed: Vec<IndexedTodoItem> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| include_done || !item.is_done())
            .map(|(index, item)| IndexedTodoItem::new(index, item))
            .collect();
        debug!(include_done, stored = items.len(), listed = listed.len(), "listed todo items");
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::RepositoryError;

    /// Returns a fixed `find_all` result and echoes every saved item back,
    /// recording it.
    #[derive(Default)]
    struct RecordingRepository {
        stored: Vec<TodoItem>,
        saved: Mutex<Vec<TodoItem>>,
        find_all_calls: Mutex<usize>,
    }

    impl RecordingRepository {
        fn holding(stored: Vec<TodoItem>) -> Self {
            Self {
                stored,
                ..Self::default()
            }
        }

        fn saved(&self) -> Vec<TodoItem> {
            self.saved.lock().unwrap().clone()
        }

        fn find_all_calls(&self) -> usize {
            *self.find_all_calls.lock().unwrap()
        }
    }

    impl TodoRepository for RecordingRepository {
        fn save(&self, item: TodoItem) -> Result<TodoItem, RepositoryError> {
            self.saved.lock().unwrap().push(item.clone());
            Ok(item)
        }

        fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
            *self.find_all_calls.lock().unwrap() += 1;
            Ok(self.stored.clone())
        }
    }

    struct FailingRepository;

    impl TodoRepository for FailingRepository {
        fn save(&self, _item: TodoItem) -> Result<TodoItem, RepositoryError> {
            Err(RepositoryError::Poisoned)
        }

        fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
            Err(RepositoryError::Poisoned)
        }
    }

    fn done(content: &str) -> TodoItem {
        let mut item = TodoItem::new(content);
        item.mark_done();
        item
    }

    fn service(stored: Vec<TodoItem>) -> TodoItemService<RecordingRepository> {
        TodoItemService::new(RecordingRepository::holding(stored))
    }

    #[test_log::test]
    fn add_todo_item_returns_saved_item() {
        let service = service(Vec::new());
        let item = service
            .add_todo_item(Some(TodoParameter::new("foo").unwrap()))
            .unwrap();

        assert_eq!(item.content(), "foo");
        assert!(!item.is_done());
        assert_eq!(service.repository().saved(), vec![TodoItem::new("foo")]);
    }

    #[test_log::test]
    fn add_todo_item_rejects_absent_parameter() {
        let service = service(Vec::new());
        let err = service.add_todo_item(None).unwrap_err();
        assert!(matches!(err, TodoError::InvalidArgument(_)));
        assert!(service.repository().saved().is_empty());
    }

    #[test_log::test]
    fn mark_todo_item_done_marks_and_saves_once() {
        let service = service(vec![TodoItem::new("foo")]);
        let item = service.mark_todo_item_done(1).unwrap().unwrap();

        assert!(item.is_done());
        assert_eq!(item.content(), "foo");
        let saved = service.repository().saved();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].is_done());
    }

    #[test_log::test]
    fn mark_todo_item_done_targets_position_minus_one() {
        let service = service(vec![TodoItem::new("foo"), TodoItem::new("bar"), TodoItem::new("baz")]);
        let item = service.mark_todo_item_done(2).unwrap().unwrap();
        assert_eq!(item.content(), "bar");
        assert_eq!(service.repository().saved()[0].content(), "bar");
    }

    #[test_log::test]
    fn mark_todo_item_done_rejects_non_positive_position() {
        let service = service(vec![TodoItem::new("foo")]);
        for position in [-1, 0, i64::MIN] {
            let err = service.mark_todo_item_done(position).unwrap_err();
            assert!(matches!(err, TodoError::InvalidArgument(_)), "position {position}");
        }
        assert_eq!(service.repository().find_all_calls(), 0);
        assert!(service.repository().saved().is_empty());
    }

    #[test_log::test]
    fn mark_todo_item_done_out_of_range_is_absent() {
        let service = service(vec![TodoItem::new("foo")]);
        assert!(service.mark_todo_item_done(2).unwrap().is_none());
        assert!(service.mark_todo_item_done(i64::MAX).unwrap().is_none());
        assert!(service.repository().saved().is_empty());
    }

    #[test_log::test]
    fn mark_todo_item_done_on_done_item_saves_again() {
        let service = service(vec![done("foo")]);
        let item = service.mark_todo_item_done(1).unwrap().unwrap();
        assert!(item.is_done());
        assert_eq!(service.repository().saved().len(), 1);
    }

    #[test_log::test]
    fn list_all() {
        let items = service(vec![TodoItem::new("foo")]).list(true).unwrap();
        assert_eq!(
            items,
            vec![IndexedTodoItem {
                index: 0,
                content: "foo".to_string(),
                done: false,
            }]
        );
    }

    #[test_log::test]
    fn list_empty_store() {
        let service = service(Vec::new());
        assert!(service.list(true).unwrap().is_empty());
        assert!(service.list(false).unwrap().is_empty());
    }

    #[test_log::test]
    fn list_without_done_keeps_full_sequence_index() {
        let items = service(vec![done("foo"), TodoItem::new("bar")]).list(false).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].index, 1);
        assert_eq!(items[0].content, "bar");
    }

    #[test_log::test]
    fn list_without_done_when_all_done() {
        let service = service(vec![done("foo"), done("bar")]);
        assert!(service.list(false).unwrap().is_empty());

        let all = service.list(true).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|item| item.done));
        assert_eq!(all.iter().map(|item| item.index).collect::<Vec<_>>(), [0, 1]);
    }

    #[test_log::test]
    fn list_does_not_save() {
        let service = service(vec![TodoItem::new("foo"), done("bar")]);
        service.list(true).unwrap();
        service.list(false).unwrap();
        assert!(service.repository().saved().is_empty());
    }

    #[test_log::test]
    fn repository_failures_propagate() {
        let service = TodoItemService::new(FailingRepository);
        let err = service.list(true).unwrap_err();
        assert!(matches!(err, TodoError::Repository(RepositoryError::Poisoned)));

        let err = service
            .add_todo_item(Some(TodoParameter::new("foo").unwrap()))
            .unwrap_err();
        assert!(matches!(err, TodoError::Repository(RepositoryError::Poisoned)));

        let err = service.mark_todo_item_done(1).unwrap_err();
        assert!(matches!(err, TodoError::Repository(_)));
    }
}
