//! Kanban-style partitioning of tasks
//!
//! The board has four columns. Three are computed from the tasks' state; the fourth
//! displays the separate to-do list untouched. All functions here are pure and
//! synchronous: they borrow their inputs, keep the input order, and can be called
//! from any thread without synchronisation.

use chrono::NaiveDate;

use crate::task::Task;
use crate::todo::TodoEntry;

/// The three computed task columns. Together they hold every input task exactly once,
/// each column in the input's relative order.
#[derive(Clone, Debug)]
pub struct Buckets<'t> {
    /// Done, or at 100% progress
    pub ready: Vec<&'t Task>,
    /// Not done, strictly between 0 and 100%
    pub in_progress: Vec<&'t Task>,
    /// Not done, no progress reported yet
    pub review: Vec<&'t Task>,
}

impl Buckets<'_> {
    pub fn total(&self) -> usize {
        self.ready.len() + self.in_progress.len() + self.review.len()
    }
}

/// Partition tasks into the three computed columns.
///
/// A task marked done lands in `ready` whatever its progress history says: the done
/// flag wins over a stale zero-progress history.
pub fn classify(tasks: &[Task]) -> Buckets<'_> {
    let mut buckets = Buckets {
        ready: Vec::new(),
        in_progress: Vec::new(),
        review: Vec::new(),
    };

    for task in tasks {
        let progress = task.current_progress();
        if task.done() || progress == 100 {
            buckets.ready.push(task);
        } else if progress > 0 {
            buckets.in_progress.push(task);
        } else {
            buckets.review.push(task);
        }
    }

    buckets
}

/// A full board: the three computed columns plus the to-do passthrough column
#[derive(Clone, Debug)]
pub struct Board<'t> {
    pub tasks: Buckets<'t>,
    pub todo: &'t [TodoEntry],
}

impl<'t> Board<'t> {
    pub fn build(tasks: &'t [Task], todos: &'t [TodoEntry]) -> Self {
        Self {
            tasks: classify(tasks),
            todo: todos,
        }
    }
}

/// Every task due on this calendar day, in their original order.
/// Tasks without a due date never match any day.
pub fn tasks_on_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| {
            task.due_date()
                .map(|due| due.date_naive() == date)
                .unwrap_or(false)
        })
        .collect()
}
