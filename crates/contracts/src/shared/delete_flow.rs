//! Удаление записи из CRUD-экрана: подтверждение, один вызов delete,
//! затем инвалидация списка. Отмена не порождает ни одного вызова.

use std::future::Future;

/// Что сделать после ответа на диалог подтверждения
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteStep {
    Cancelled,
    /// Вызвать `entities.<Name>.delete(id)`
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: String,
    pub label: String,
}

impl DeleteRequest {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Текст для `window.confirm`
    pub fn confirm_message(&self) -> String {
        if self.label.trim().is_empty() {
            "Are you sure you want to delete this item?".to_string()
        } else {
            format!("Are you sure you want to delete \"{}\"?", self.label)
        }
    }

    pub fn decide(self, confirmed: bool) -> DeleteStep {
        if confirmed {
            DeleteStep::Delete { id: self.id }
        } else {
            DeleteStep::Cancelled
        }
    }

    /// Полный сценарий после ответа на подтверждение.
    ///
    /// `delete` вызывается ровно один раз и только при `confirmed`;
    /// `invalidate` вызывается после любого ответа сервера, в том числе
    /// ошибочного, чтобы список не показывал уже удалённую запись.
    pub async fn run<F, Fut, I>(self, confirmed: bool, delete: F, invalidate: I) -> DeleteOutcome
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<(), String>>,
        I: FnOnce(),
    {
        let DeleteStep::Delete { id } = self.decide(confirmed) else {
            return DeleteOutcome::Cancelled;
        };
        let result = delete(id).await;
        invalidate();
        match result {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => DeleteOutcome::Failed(e),
        }
    }
}

/// Итог `DeleteRequest::run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    /// Текст ошибки сервера как есть; для показа см. `friendly_error`
    Failed(String),
}

/// Сообщение об ошибке сервера в человекочитаемом виде
pub fn friendly_error(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("already exists") {
        "A record with the same key already exists.".to_string()
    } else if lower.contains("not found") {
        "This record no longer exists. Refresh the list and try again.".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Серверная коллекция и экран, перечитывающий её при инвалидации
    struct Screen {
        server: RefCell<Vec<String>>,
        shown: RefCell<Vec<String>>,
        delete_calls: Cell<usize>,
    }

    impl Screen {
        fn new(ids: &[&str]) -> Self {
            let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
            Self {
                server: RefCell::new(ids.clone()),
                shown: RefCell::new(ids),
                delete_calls: Cell::new(0),
            }
        }

        async fn delete(&self, id: String) -> Result<(), String> {
            self.delete_calls.set(self.delete_calls.get() + 1);
            let mut server = self.server.borrow_mut();
            let before = server.len();
            server.retain(|r| *r != id);
            if server.len() == before {
                return Err(format!("Record {} not found", id));
            }
            Ok(())
        }

        fn refresh(&self) {
            *self.shown.borrow_mut() = self.server.borrow().clone();
        }

        async fn run(&self, request: DeleteRequest, confirmed: bool) -> DeleteOutcome {
            request
                .run(confirmed, |id| self.delete(id), || self.refresh())
                .await
        }
    }

    #[tokio::test]
    async fn test_confirmed_delete_issues_one_call() {
        let s = Screen::new(&["a", "b"]);
        let outcome = s.run(DeleteRequest::new("a", "A"), true).await;
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(s.delete_calls.get(), 1);
        assert_eq!(*s.shown.borrow(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_cancelled_delete_issues_no_calls() {
        let s = Screen::new(&["a", "b"]);
        let outcome = s.run(DeleteRequest::new("a", "A"), false).await;
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(s.delete_calls.get(), 0);
        assert_eq!(s.shown.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_still_refreshes_list() {
        let s = Screen::new(&["a", "b"]);
        // запись уже удалена в другой вкладке
        s.server.borrow_mut().retain(|r| r != "a");
        let outcome = s.run(DeleteRequest::new("a", "A"), true).await;
        assert!(matches!(outcome, DeleteOutcome::Failed(ref e) if e.contains("not found")));
        assert_eq!(s.delete_calls.get(), 1);
        assert_eq!(*s.shown.borrow(), vec!["b".to_string()]);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DeleteRequest::new("a", "Miami").confirm_message(),
            "Are you sure you want to delete \"Miami\"?"
        );
        assert!(friendly_error("Country already exists").contains("already exists"));
        let missing = friendly_error("City not found");
        assert!(missing.starts_with("This record no longer exists"));
        // сообщение не утверждает, что список уже обновлён
        assert!(!missing.contains("has been refreshed"));
        assert_eq!(friendly_error("boom"), "boom");
    }
}
