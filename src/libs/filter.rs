//! Filter engine for the task list.
//!
//! Narrows a task collection down to the tasks matching a set of criteria.
//! Every dimension is optional and all active dimensions must pass:
//!
//! - **Status**: all, active (not completed) or completed
//! - **Priority**: all or one exact level
//! - **Tags**: any-of match against the task's tags
//! - **Search**: case-insensitive substring over title, description and tags
//! - **Date range**: inclusive day bounds on the due date
//!
//! Filtering is pure: the input is never modified and the relative order of
//! the surviving tasks is preserved.

use super::task::{Priority, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Completion-state dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status '{}' (expected all, active or completed)", other)),
        }
    }
}

/// Priority dimension: everything, or one exact level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

/// Inclusive day bounds on the due date. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub tags: Vec<String>,
    pub search_query: String,
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// True when every dimension is at its default and filtering is the identity.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_status(task)
            && self.matches_priority(task)
            && self.matches_tags(task)
            && self.matches_search(task)
            && self.matches_date_range(task)
    }

    fn matches_status(&self, task: &Task) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }

    fn matches_priority(&self, task: &Task) -> bool {
        match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        }
    }

    fn matches_tags(&self, task: &Task) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| task.has_tag(tag))
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search_query.is_empty() {
            return true;
        }

        let query = self.search_query.to_lowercase();
        task.title.to_lowercase().contains(&query)
            || task.description.to_lowercase().contains(&query)
            || task.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }

    fn matches_date_range(&self, task: &Task) -> bool {
        if self.date_range.is_unbounded() {
            return true;
        }

        // An undated task never satisfies a bounded range
        let Some(due) = task.due_date else {
            return false;
        };

        let day = due.date_naive();
        if let Some(start) = self.date_range.start {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.date_range.end {
            if day > end {
                return false;
            }
        }
        true
    }
}

/// Returns the tasks matching `criteria`, in input order.
pub fn filter_tasks(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    tasks.iter().filter(|task| criteria.matches(task)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::TaskId;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: TaskId::new(id),
            title: title.to_string(),
            description: String::new(),
            completed: false,
            priority: Priority::Medium,
            tags: vec![],
            due_date: None,
            created_at: at(2024, 1, 1, 0),
            updated_at: at(2024, 1, 1, 0),
        }
    }

    fn sample() -> Vec<Task> {
        let mut report = task("1", "Write report");
        report.description = "Quarterly numbers".to_string();
        report.priority = Priority::High;
        report.tags = vec!["work".to_string()];
        report.due_date = Some(at(2024, 1, 1, 9));

        let mut milk = task("2", "Buy milk");
        milk.priority = Priority::Low;
        milk.tags = vec!["errand".to_string(), "Home".to_string()];
        milk.completed = true;

        let mut taxes = task("3", "File taxes");
        taxes.due_date = Some(at(2024, 12, 31, 23));

        vec![report, milk, taxes]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn default_criteria_is_identity() {
        let tasks = sample();
        assert!(FilterCriteria::default().is_default());
        assert_eq!(filter_tasks(&tasks, &FilterCriteria::default()), tasks);
    }

    #[test]
    fn filtering_is_idempotent() {
        let tasks = sample();
        let criteria = FilterCriteria {
            status: StatusFilter::Active,
            search_query: "e".to_string(),
            ..Default::default()
        };
        let once = filter_tasks(&tasks, &criteria);
        assert_eq!(filter_tasks(&once, &criteria), once);
    }

    #[test]
    fn status_filter_splits_active_and_completed() {
        let tasks = sample();
        let active = FilterCriteria {
            status: StatusFilter::Active,
            ..Default::default()
        };
        let completed = FilterCriteria {
            status: StatusFilter::Completed,
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &active)), vec!["1", "3"]);
        assert_eq!(ids(&filter_tasks(&tasks, &completed)), vec!["2"]);
    }

    #[test]
    fn priority_filter_requires_exact_match() {
        let criteria = FilterCriteria {
            priority: PriorityFilter::Only(Priority::Low),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&sample(), &criteria)), vec!["2"]);
    }

    #[test]
    fn tag_filter_is_any_of_and_combines_with_other_dimensions() {
        let tasks = sample();
        let any_of = FilterCriteria {
            tags: vec!["work".to_string(), "errand".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &any_of)), vec!["1", "2"]);

        let with_status = FilterCriteria {
            status: StatusFilter::Active,
            ..any_of
        };
        assert_eq!(ids(&filter_tasks(&tasks, &with_status)), vec!["1"]);
    }

    #[test]
    fn search_matches_title_description_and_tags_case_insensitively() {
        let tasks = sample();
        let search = |q: &str| {
            let criteria = FilterCriteria {
                search_query: q.to_string(),
                ..Default::default()
            };
            filter_tasks(&tasks, &criteria).into_iter().map(|t| t.id.as_str().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(search("REPORT"), vec!["1"]);
        assert_eq!(search("quarterly"), vec!["1"]);
        assert_eq!(search("home"), vec!["2"]);
        assert!(search("nothing like this").is_empty());
    }

    #[test]
    fn date_range_keeps_only_tasks_due_inside_inclusive_days() {
        let tasks = sample();
        let criteria = FilterCriteria {
            date_range: DateRange::new(NaiveDate::from_ymd_opt(2024, 6, 1), NaiveDate::from_ymd_opt(2024, 12, 31)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &criteria)), vec!["3"]);
    }

    #[test]
    fn one_sided_date_range_excludes_undated_tasks() {
        let tasks = sample();
        let until = FilterCriteria {
            date_range: DateRange::new(None, NaiveDate::from_ymd_opt(2024, 1, 1)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &until)), vec!["1"]);

        let from = FilterCriteria {
            date_range: DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 2), None),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &from)), vec!["3"]);
    }

    #[test]
    fn inverted_date_range_yields_nothing() {
        let criteria = FilterCriteria {
            date_range: DateRange::new(NaiveDate::from_ymd_opt(2024, 12, 31), NaiveDate::from_ymd_opt(2024, 1, 1)),
            ..Default::default()
        };
        assert!(filter_tasks(&sample(), &criteria).is_empty());
    }
}
