//! Completion statistics over the full task collection.

use super::task::Task;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// Percentage of completed tasks, `0.0` for an empty collection.
    pub completion_rate: f64,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let completion_rate = if total > 0 { completed as f64 / total as f64 * 100.0 } else { 0.0 };

        Self {
            total,
            active: total - completed,
            completed,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::{Priority, TaskId};
    use chrono::Utc;

    fn task(id: &str, completed: bool) -> Task {
        let now = Utc::now();
        Task {
            id: TaskId::new(id),
            title: format!("Task {}", id),
            description: String::new(),
            completed,
            priority: Priority::Medium,
            tags: vec![],
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_collection_has_zero_rate() {
        let stats = TaskStats::from_tasks(&[]);
        assert_eq!(stats, TaskStats::default());
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn one_of_four_completed_is_twenty_five_percent() {
        let tasks = vec![task("1", true), task("2", false), task("3", false), task("4", false)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.completion_rate, 25.0);
    }
}
