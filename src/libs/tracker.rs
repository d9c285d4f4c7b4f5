//! Task orchestrator.
//!
//! [`TaskTracker`] owns the session's authoritative task collection, the tag
//! index and the filter/sort state. Every mutation goes through the store
//! adapter first and is applied locally only after the store acknowledged it,
//! so the local copy never holds a state the store has not confirmed.
//!
//! ## Features
//!
//! - **Refresh**: Tasks and tags are fetched concurrently and committed together
//! - **Mutations**: Add, edit, remove and toggle with store-first semantics
//! - **Tag Index**: Re-fetched after tag-affecting mutations; failures keep the old index
//! - **View State**: Filter and sort criteria are local and never touch the store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::api::TaskService;
//! use taskdeck::db::tasks::LocalStore;
//! use taskdeck::libs::filter::StatusFilter;
//! use taskdeck::libs::task::TaskDraft;
//! use taskdeck::libs::tracker::TaskTracker;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut tracker = TaskTracker::new(TaskService::new(LocalStore::open_in_memory()?));
//! tracker.refresh().await?;
//! tracker.add(TaskDraft::new("Buy milk").with_tags(["errand"])).await?;
//! tracker.set_status_filter(StatusFilter::Active);
//! for task in tracker.visible_tasks() {
//!     println!("{}", task.title);
//! }
//! # Ok(())
//! # }
//! ```

use super::filter::{filter_tasks, DateRange, FilterCriteria, PriorityFilter, StatusFilter};
use super::sort::{sort_tasks, SortCriteria};
use super::stats::TaskStats;
use super::task::{Task, TaskDraft, TaskId, TaskPatch, ValidationError};
use crate::api::{TaskService, TaskStore};
use crate::libs::messages::Message;
use crate::msg_warning;
use thiserror::Error;

/// Why an orchestrator operation did not take effect.
///
/// Store details were already logged by the adapter; this only names the
/// operation that failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("store operation '{0}' failed")]
    StoreFailed(&'static str),
    #[error("patch contains no changes")]
    EmptyPatch,
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Session state over one task store.
#[derive(Debug)]
pub struct TaskTracker<S> {
    service: TaskService<S>,
    tasks: Vec<Task>,
    tags: Vec<String>,
    filters: FilterCriteria,
    sort: SortCriteria,
    loading: bool,
}

impl<S: TaskStore> TaskTracker<S> {
    /// Creates an empty tracker with default filter and sort criteria.
    ///
    /// Nothing is loaded until [`TaskTracker::refresh`] is called.
    pub fn new(service: TaskService<S>) -> Self {
        Self {
            service,
            tasks: Vec::new(),
            tags: Vec::new(),
            filters: FilterCriteria::default(),
            sort: SortCriteria::default(),
            loading: false,
        }
    }

    /// Starts with `sort` instead of the default criteria.
    pub fn with_sort(mut self, sort: SortCriteria) -> Self {
        self.sort = sort;
        self
    }

    pub fn service(&self) -> &TaskService<S> {
        &self.service
    }

    /// Reloads tasks and the tag index from the store.
    ///
    /// Both requests run concurrently. The local state is replaced only when
    /// both succeed; otherwise the previous tasks and tags are kept.
    pub async fn refresh(&mut self) -> TrackerResult<()> {
        self.loading = true;
        let (tasks, tags) = tokio::join!(self.service.list(), self.service.list_distinct_tags());
        self.loading = false;

        match (tasks, tags) {
            (Some(tasks), Some(tags)) => {
                tracing::debug!(tasks = tasks.len(), tags = tags.len(), "refreshed tracker state");
                self.tasks = tasks;
                self.tags = tags;
                Ok(())
            }
            _ => {
                msg_warning!(Message::RefreshFailed);
                Err(TrackerError::StoreFailed("refresh"))
            }
        }
    }

    /// Re-fetches the tag index. A failure keeps the previous index.
    pub async fn refresh_tags(&mut self) -> bool {
        match self.service.list_distinct_tags().await {
            Some(tags) => {
                self.tags = tags;
                true
            }
            None => false,
        }
    }

    /// Validates and stores a new task, then prepends it to the collection.
    pub async fn add(&mut self, draft: TaskDraft) -> TrackerResult<Task> {
        let draft = draft.validate()?;
        let task = self.service.create(&draft).await.ok_or(TrackerError::StoreFailed("create"))?;

        self.tasks.insert(0, task.clone());
        self.refresh_tags().await;
        Ok(task)
    }

    /// Applies `patch` to one task and replaces the local record in place.
    pub async fn edit(&mut self, id: &TaskId, patch: TaskPatch) -> TrackerResult<Task> {
        let patch = patch.validate()?;
        if patch.is_empty() {
            return Err(TrackerError::EmptyPatch);
        }

        let task = self.service.update(id, &patch).await.ok_or(TrackerError::StoreFailed("update"))?;

        self.replace(task.clone());
        self.refresh_tags().await;
        Ok(task)
    }

    /// Deletes one task from the store and from the collection.
    pub async fn remove(&mut self, id: &TaskId) -> TrackerResult<()> {
        if !self.service.delete(id).await {
            return Err(TrackerError::StoreFailed("delete"));
        }

        self.tasks.retain(|task| &task.id != id);
        self.refresh_tags().await;
        Ok(())
    }

    /// Flips completion of one task. Tags cannot change, so the index is left alone.
    pub async fn toggle(&mut self, id: &TaskId) -> TrackerResult<Task> {
        let task = self.service.toggle(id).await.ok_or(TrackerError::StoreFailed("toggle"))?;

        self.replace(task.clone());
        Ok(task)
    }

    fn replace(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|current| current.id == task.id) {
            Some(current) => *current = task,
            // Created elsewhere since the last refresh.
            None => self.tasks.insert(0, task),
        }
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.filters.search_query = query.to_string();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filters.status = status;
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filters.priority = priority;
    }

    pub fn set_tags_filter(&mut self, tags: Vec<String>) {
        self.filters.tags = tags;
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filters.date_range = range;
    }

    /// Replaces all filter criteria at once.
    pub fn update_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
    }

    pub fn update_sort(&mut self, sort: SortCriteria) {
        self.sort = sort;
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterCriteria::default();
    }

    /// The collection after filtering and sorting, computed on each call.
    pub fn visible_tasks(&self) -> Vec<Task> {
        sort_tasks(&filter_tasks(&self.tasks, &self.filters), &self.sort)
    }

    pub fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn available_tags(&self) -> &[String] {
        &self.tags
    }

    /// Statistics over the whole collection, ignoring filters.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn sort(&self) -> &SortCriteria {
        &self.sort
    }

    /// True only while [`TaskTracker::refresh`] awaits the store.
    ///
    /// `refresh` holds `&mut self` for its whole duration, so any caller
    /// holding the tracker between calls always observes `false`.
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
