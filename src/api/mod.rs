//! Store access layer for tasks.
//!
//! Provides the boundary between the in-memory task model and the store that
//! owns the data. The layer is split in two:
//!
//! - **`TaskStore`**: row-level operations against a concrete store, returning
//!   `Result<_, StoreError>`. Implemented by the PostgREST client
//!   ([`postgrest::PostgrestStore`]) and the SQLite file store
//!   ([`crate::db::tasks::LocalStore`]).
//! - **`TaskService`**: the adapter the rest of the application talks to. It
//!   maps rows to [`Task`] values and turns every store failure into `None` /
//!   `false` plus a logged diagnostic, so no error escapes past it.
//!
//! ## Features
//!
//! - **Row Mapping**: Absent description, tags and due date become safe defaults
//! - **Partial Updates**: Only fields present in a [`TaskPatch`] are submitted
//! - **Tag Aggregation**: Distinct, sorted tags across all rows
//! - **Backend Selection**: [`Backend`] dispatches to the configured store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::api::TaskService;
//! use taskdeck::db::tasks::LocalStore;
//! use taskdeck::libs::task::TaskDraft;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let service = TaskService::new(LocalStore::open_in_memory()?);
//! let created = service.create(&TaskDraft::new("Buy milk")).await;
//! let tags = service.list_distinct_tags().await.unwrap_or_default();
//! # Ok(())
//! # }
//! ```

use crate::db::tasks::LocalStore;
use crate::libs::config::{StoreBackend, StoreConfig};
use crate::libs::messages::Message;
use crate::libs::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
use crate::msg_error;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

pub mod postgrest;

pub use postgrest::PostgrestStore;

/// Failure of a single store call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store responded with {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("malformed store data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// A `tasks` row as the store returns it.
///
/// Nullable columns stay optional here; [`Task::from`] applies the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            completed: row.completed,
            priority: row.priority,
            tags: row.tags.unwrap_or_default(),
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskRow {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<&TaskDraft> for NewTaskRow {
    fn from(draft: &TaskDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: false,
            priority: draft.priority,
            tags: draft.tags.clone(),
            due_date: draft.due_date,
        }
    }
}

/// Projection used by tag aggregation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsRow {
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Row-level operations a task store must provide.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// All rows ordered by `created_at` descending.
    async fn select_all(&self) -> Result<Vec<TaskRow>, StoreError>;

    /// Inserts one row and returns it as stored.
    async fn insert(&self, row: &NewTaskRow) -> Result<TaskRow, StoreError>;

    /// Applies the present fields of `patch` and returns the updated row.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRow, StoreError>;

    /// Deletes one row; `NotFound` when nothing matched.
    async fn delete(&self, id: &TaskId) -> Result<(), StoreError>;

    /// Current completion flag of one row.
    async fn select_completed(&self, id: &TaskId) -> Result<bool, StoreError>;

    /// The tags column of every row.
    async fn select_tags(&self) -> Result<Vec<TagsRow>, StoreError>;
}

/// Stateless adapter between the task model and a [`TaskStore`].
///
/// Every failure is logged and reported as `None` / `false`.
#[derive(Debug)]
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetches every task, newest first. `None` on failure.
    pub async fn list(&self) -> Option<Vec<Task>> {
        match self.store.select_all().await {
            Ok(rows) => {
                tracing::debug!(count = rows.len(), "loaded tasks");
                Some(rows.into_iter().map(Task::from).collect())
            }
            Err(e) => {
                msg_error!(Message::StoreListFailed(e.to_string()));
                None
            }
        }
    }

    /// Creates a task from a validated draft. New tasks always start incomplete.
    pub async fn create(&self, draft: &TaskDraft) -> Option<Task> {
        match self.store.insert(&NewTaskRow::from(draft)).await {
            Ok(row) => {
                tracing::debug!(id = %row.id, "created task");
                Some(row.into())
            }
            Err(e) => {
                msg_error!(Message::StoreCreateFailed(e.to_string()));
                None
            }
        }
    }

    pub async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Option<Task> {
        match self.store.update(id, patch).await {
            Ok(row) => {
                tracing::debug!(id = %row.id, "updated task");
                Some(row.into())
            }
            Err(e) => {
                msg_error!(Message::StoreUpdateFailed(id.to_string(), e.to_string()));
                None
            }
        }
    }

    pub async fn delete(&self, id: &TaskId) -> bool {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::debug!(id = %id, "deleted task");
                true
            }
            Err(e) => {
                msg_error!(Message::StoreDeleteFailed(id.to_string(), e.to_string()));
                false
            }
        }
    }

    /// Flips the completion flag of a task.
    ///
    /// This is a read followed by a separate write. Two toggles racing on the
    /// same id can both read the same state, and one of the flips is lost.
    pub async fn toggle(&self, id: &TaskId) -> Option<Task> {
        let completed = match self.store.select_completed(id).await {
            Ok(completed) => completed,
            Err(e) => {
                msg_error!(Message::StoreToggleFailed(id.to_string(), e.to_string()));
                return None;
            }
        };

        self.update(id, &TaskPatch::completed(!completed)).await
    }

    /// Distinct tags across all tasks, sorted lexicographically. `None` on failure.
    pub async fn list_distinct_tags(&self) -> Option<Vec<String>> {
        match self.store.select_tags().await {
            Ok(rows) => {
                let tags: BTreeSet<String> = rows.into_iter().flat_map(|row| row.tags.unwrap_or_default()).collect();
                Some(tags.into_iter().collect())
            }
            Err(e) => {
                msg_error!(Message::StoreTagsFailed(e.to_string()));
                None
            }
        }
    }
}

/// The store selected by configuration.
#[derive(Debug)]
pub enum Backend {
    Remote(PostgrestStore),
    Local(LocalStore),
}

impl Backend {
    /// Opens the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is selected without remote
    /// settings, the HTTP client cannot be built, or the SQLite file cannot
    /// be opened.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        match config.backend {
            StoreBackend::Remote => {
                let remote = config.remote.as_ref().ok_or_else(|| crate::msg_error_anyhow!(Message::RemoteStoreNotConfigured))?;
                Ok(Backend::Remote(PostgrestStore::new(remote)?))
            }
            StoreBackend::Local => {
                let local = config.local.clone().unwrap_or_default();
                Ok(Backend::Local(LocalStore::open(&local.db_path()?)?))
            }
        }
    }
}

impl TaskStore for Backend {
    async fn select_all(&self) -> Result<Vec<TaskRow>, StoreError> {
        match self {
            Backend::Remote(store) => store.select_all().await,
            Backend::Local(store) => store.select_all().await,
        }
    }

    async fn insert(&self, row: &NewTaskRow) -> Result<TaskRow, StoreError> {
        match self {
            Backend::Remote(store) => store.insert(row).await,
            Backend::Local(store) => store.insert(row).await,
        }
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRow, StoreError> {
        match self {
            Backend::Remote(store) => store.update(id, patch).await,
            Backend::Local(store) => store.update(id, patch).await,
        }
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        match self {
            Backend::Remote(store) => store.delete(id).await,
            Backend::Local(store) => store.delete(id).await,
        }
    }

    async fn select_completed(&self, id: &TaskId) -> Result<bool, StoreError> {
        match self {
            Backend::Remote(store) => store.select_completed(id).await,
            Backend::Local(store) => store.select_completed(id).await,
        }
    }

    async fn select_tags(&self) -> Result<Vec<TagsRow>, StoreError> {
        match self {
            Backend::Remote(store) => store.select_tags().await,
            Backend::Local(store) => store.select_tags().await,
        }
    }
}
