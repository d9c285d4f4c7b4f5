//! Sort engine for the task list.
//!
//! Orders tasks by a single key and direction. Sorting is stable and never
//! breaks ties with a secondary key, so tasks with equal keys keep their
//! input order.
//!
//! ## Keys
//!
//! - **Title**: CLDR collation (accents and case are secondary to the base
//!   letters, lower case before upper case on ties)
//! - **CreatedAt**: creation timestamp
//! - **DueDate**: due timestamp, undated tasks always placed last
//! - **Priority**: priority rank

use super::task::Task;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    DueDate,
    Priority,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortCriteria {
    pub by: SortBy,
    pub order: SortOrder,
}

impl SortCriteria {
    pub fn new(by: SortBy, order: SortOrder) -> Self {
        Self { by, order }
    }

    /// Compares two tasks under these criteria.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self.by {
            SortBy::Title => self.order.apply(compare_titles(&a.title, &b.title)),
            SortBy::CreatedAt => self.order.apply(a.created_at.cmp(&b.created_at)),
            SortBy::Priority => self.order.apply(a.priority.rank().cmp(&b.priority.rank())),
            // Undated tasks sit after dated ones in both directions
            SortBy::DueDate => match (a.due_date, b.due_date) {
                (Some(a_due), Some(b_due)) => self.order.apply(a_due.cmp(&b_due)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortBy::CreatedAt => "created",
            SortBy::DueDate => "due",
            SortBy::Priority => "priority",
            SortBy::Title => "title",
        };
        f.write_str(name)
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" | "created_at" | "createdat" => Ok(SortBy::CreatedAt),
            "due" | "due_date" | "duedate" => Ok(SortBy::DueDate),
            "priority" => Ok(SortBy::Priority),
            "title" => Ok(SortBy::Title),
            other => Err(format!("unknown sort key '{}' (expected created, due, priority or title)", other)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

thread_local! {
    static TITLE_COLLATOR: Option<Collator> = Collator::try_new(&locale!("pt").into(), CollatorOptions::new()).ok();
}

/// Locale-aware title comparison.
///
/// Titles are collated with CLDR rules, so accented letters sort next to
/// their base letter and lower case comes before upper case on ties. Titles
/// the collator considers equal fall back to the case profile and then to
/// code-point order, so the result is `Equal` only for identical strings.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TITLE_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| case_profile(a).cmp(case_profile(b)))
        .then_with(|| a.cmp(b))
}

fn case_profile(text: &str) -> impl Iterator<Item = bool> + '_ {
    text.chars().map(char::is_uppercase)
}

/// Returns a new, stably ordered copy of `tasks`.
pub fn sort_tasks(tasks: &[Task], criteria: &SortCriteria) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| criteria.compare(a, b));
    sorted
}
