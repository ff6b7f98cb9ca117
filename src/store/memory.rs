use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};

use crate::error::TaskpadError;
use crate::models::Task;

use super::TaskStore;

/// In-memory [`TaskStore`] for tests and offline use. Holds tasks for any
/// number of users and can be told to fail its next call, which lets callers
/// exercise the keep-prior-state path of a failed fetch.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RefCell<Vec<Task>>,
    fail_next: Cell<bool>,
    next_id: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Self::default()
        }
    }

    /// Make the next store call return a `StoreError`.
    pub fn fail_next_call(&self) {
        self.fail_next.set(true);
    }

    fn check_failure(&self) -> Result<(), TaskpadError> {
        if self.fail_next.take() {
            return Err(TaskpadError::store("simulated backend failure"));
        }
        Ok(())
    }
}

impl TaskStore for MemoryStore {
    fn fetch_tasks(&self, uid: &str) -> Result<Vec<Task>, TaskpadError> {
        self.check_failure()?;
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|t| t.uid == uid)
            .cloned()
            .collect())
    }

    fn fetch_completed_tasks(&self, uid: &str) -> Result<Vec<Task>, TaskpadError> {
        self.check_failure()?;
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|t| t.uid == uid && t.is_done)
            .cloned()
            .collect())
    }

    fn create_task(&self, uid: &str, text: &str) -> Result<Task, TaskpadError> {
        self.check_failure()?;
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let task = Task::new(format!("mem-{n}"), uid, text, Utc::now());
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    fn mark_done(
        &self,
        uid: &str,
        task_id: &str,
        done_at: DateTime<Utc>,
    ) -> Result<(), TaskpadError> {
        self.check_failure()?;
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.uid == uid && t.task_id == task_id)
            .ok_or_else(|| TaskpadError::task_not_found(task_id))?;
        task.is_done = true;
        task.done_at = Some(done_at);
        Ok(())
    }
}
