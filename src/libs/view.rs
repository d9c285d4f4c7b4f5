use super::stats::TaskStats;
use super::task::Task;
use chrono::{DateTime, Utc};
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints the task list. Overdue due dates are marked with `!` when
    /// `mark_overdue` is set.
    pub fn tasks(tasks: &[Task], now: DateTime<Utc>, mark_overdue: bool) {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "PRIORITY", "TAGS", "DUE", "STATUS"]);
        for task in tasks {
            table.add_row(row![task.id, task.title, task.priority, task.tags.join(", "), Self::due(task, now, mark_overdue), Self::status(task)]);
        }
        table.printstd();
    }

    pub fn tags(tags: &[String]) {
        let mut table = Table::new();

        table.add_row(row!["TAG"]);
        for tag in tags {
            table.add_row(row![tag]);
        }
        table.printstd();
    }

    pub fn stats(stats: &TaskStats) {
        let mut table = Table::new();

        table.add_row(row!["TOTAL", "ACTIVE", "COMPLETED", "COMPLETION"]);
        table.add_row(row![stats.total, stats.active, stats.completed, format!("{:.1}%", stats.completion_rate)]);
        table.printstd();
    }

    fn due(task: &Task, now: DateTime<Utc>, mark_overdue: bool) -> String {
        match task.due_date {
            Some(due) if mark_overdue && task.is_overdue(now) => format!("{} !", due.format("%Y-%m-%d")),
            Some(due) => due.format("%Y-%m-%d").to_string(),
            None => "-".to_string(),
        }
    }

    fn status(task: &Task) -> &'static str {
        if task.completed {
            "done"
        } else {
            "active"
        }
    }
}
