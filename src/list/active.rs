use chrono::Utc;

use crate::error::TaskpadError;
use crate::export::csv;
use crate::models::Task;
use crate::store::TaskStore;

/// Ticket handed out by [`TaskList::begin_fetch`]. Applying a stale ticket
/// is a no-op, so a slow fetch that completes after a newer one can never
/// overwrite fresher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// View-model for the main task screen.
///
/// `tasks` is the authoritative list, in fetch order. `filtered` is the
/// derived view the screen renders; it is always recomputed from the
/// authoritative list, never refined from a previous filtered result, and is
/// always a subset of it.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    filtered: Vec<Task>,
    fetch_seq: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authoritative list, in fetch order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Currently rendered view.
    pub fn filtered(&self) -> &[Task] {
        &self.filtered
    }

    /// Start a fetch, superseding any fetch still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_seq += 1;
        FetchTicket {
            seq: self.fetch_seq,
        }
    }

    /// Install a fetch result. Returns false (leaving state untouched) when
    /// the ticket has been superseded by a newer `begin_fetch`.
    ///
    /// A successful install resets the view to the unfiltered list.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, tasks: Vec<Task>) -> bool {
        if ticket.seq != self.fetch_seq {
            return false;
        }
        self.filtered = tasks.clone();
        self.tasks = tasks;
        true
    }

    /// Fetch the full task set for `uid` and replace the list. On store
    /// failure the prior state is left unchanged and the error is returned
    /// for the caller to surface.
    pub fn load(&mut self, store: &dyn TaskStore, uid: &str) -> Result<usize, TaskpadError> {
        let ticket = self.begin_fetch();
        let tasks = store.fetch_tasks(uid)?;
        self.apply_fetch(ticket, tasks);
        Ok(self.tasks.len())
    }

    /// Recompute the view from the authoritative list. `None` or an empty
    /// query resets to the full list; otherwise a case-insensitive substring
    /// match on the task text, preserving authoritative order. Pure and
    /// idempotent.
    pub fn apply_filter(&mut self, query: Option<&str>) {
        match query {
            Some(q) if !q.is_empty() => {
                let needle = q.to_lowercase();
                self.filtered = self
                    .tasks
                    .iter()
                    .filter(|t| t.text.to_lowercase().contains(&needle))
                    .cloned()
                    .collect();
            }
            _ => self.filtered = self.tasks.clone(),
        }
    }

    /// Mark the task at `index` within the filtered view as done.
    ///
    /// The index is only the caller's locator; the mutation is keyed by
    /// `task_id`, so a view refresh between render and tap cannot complete
    /// the wrong task. The entry leaves the filtered view but stays in the
    /// authoritative list. Out-of-range indices are a typed error with no
    /// mutation.
    ///
    /// The mutation is local and optimistic; persisting it is the caller's
    /// separate [`TaskStore::mark_done`] call, using the returned task.
    pub fn mark_complete(&mut self, index: usize) -> Result<Task, TaskpadError> {
        if index >= self.filtered.len() {
            return Err(TaskpadError::index_out_of_range(index, self.filtered.len()));
        }
        let task_id = self.filtered[index].task_id.clone();

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.task_id == task_id)
            .ok_or_else(|| TaskpadError::task_not_found(&task_id))?;
        task.is_done = true;
        task.done_at = Some(Utc::now());
        let completed = task.clone();

        if let Some(pos) = self.filtered.iter().position(|t| t.task_id == task_id) {
            self.filtered.remove(pos);
        }
        Ok(completed)
    }

    /// Active-list CSV over the FULL authoritative set, current filter
    /// notwithstanding.
    pub fn export_csv(&self) -> String {
        csv::active_list_csv(&self.tasks)
    }
}
