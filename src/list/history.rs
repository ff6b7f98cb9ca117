use crate::error::TaskpadError;
use crate::export::csv;
use crate::models::Task;
use crate::store::TaskStore;

/// Read-only view-model for the completed-task screen. Sourced from the
/// store's completed-only query, not by filtering the active list.
#[derive(Debug, Default)]
pub struct TaskHistory {
    tasks: Vec<Task>,
}

impl TaskHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn load(&mut self, store: &dyn TaskStore, uid: &str) -> Result<usize, TaskpadError> {
        let tasks = store.fetch_completed_tasks(uid)?;
        self.tasks = tasks;
        Ok(self.tasks.len())
    }

    /// History-schema CSV over the completed set.
    pub fn export_csv(&self) -> String {
        csv::history_csv(&self.tasks)
    }
}
