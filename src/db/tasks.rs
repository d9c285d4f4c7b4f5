//! SQLite implementation of the task store.
//!
//! Mirrors the remote `tasks` table in a local file so the tracker can run
//! without a server. The store assigns ids (uuid v4) and timestamps itself,
//! exactly like the remote side does, and keeps `updated_at` strictly
//! increasing per row even when two writes land within the same clock tick.

use super::db::Db;
use crate::api::{NewTaskRow, StoreError, TagsRow, TaskRow, TaskStore};
use crate::libs::task::{Priority, TaskId, TaskPatch};
use chrono::{DateTime, Duration, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "SELECT id, title, description, completed, priority, tags, due_date, created_at, updated_at FROM tasks";
const ORDER_NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";
const INSERT_TASK: &str = "INSERT INTO tasks (id, title, description, completed, priority, tags, due_date, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, completed = ?4, priority = ?5, tags = ?6, due_date = ?7, updated_at = ?8
    WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const SELECT_COMPLETED: &str = "SELECT completed FROM tasks WHERE id = ?1";
const SELECT_TAGS: &str = "SELECT tags FROM tasks";

/// Local task store backed by a SQLite file (or memory).
pub struct LocalStore {
    conn: Connection,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").field("path", &self.conn.path()).finish()
    }
}

impl LocalStore {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        tracing::debug!(path = %path.display(), "opening local task store");
        Ok(Self { conn: Db::open(path)?.conn })
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Ok(Self {
            conn: Db::open_in_memory()?.conn,
        })
    }

    fn select_by_id(&self, id: &TaskId) -> rusqlite::Result<Option<TaskRow>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id.as_str()], read_row)
            .optional()
    }
}

/// Next `updated_at` for a row last written at `previous`.
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + Duration::microseconds(1))
}

fn encode_tags(tags: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(tags)?)
}

fn read_row(row: &Row) -> rusqlite::Result<TaskRow> {
    let id: String = row.get(0)?;
    let priority: String = row.get(4)?;
    let priority = priority
        .parse::<Priority>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into()))?;
    let tags: Option<String> = row.get(5)?;
    let tags = match tags {
        Some(json) => Some(serde_json::from_str::<Vec<String>>(&json).map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?),
        None => None,
    };

    Ok(TaskRow {
        id: TaskId::new(id),
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        priority,
        tags,
        due_date: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl TaskStore for LocalStore {
    async fn select_all(&self) -> Result<Vec<TaskRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_COLUMNS, ORDER_NEWEST_FIRST))?;
        let row_iter = stmt.query_map([], read_row)?;

        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row?);
        }
        Ok(rows)
    }

    async fn insert(&self, row: &NewTaskRow) -> Result<TaskRow, StoreError> {
        let id = TaskId::new(Uuid::new_v4().to_string());
        let now = Utc::now();
        self.conn.execute(
            INSERT_TASK,
            params![
                id.as_str(),
                row.title,
                row.description,
                row.completed,
                row.priority.as_str(),
                encode_tags(&row.tags)?,
                row.due_date,
                now,
                now
            ],
        )?;

        self.select_by_id(&id)?.ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRow, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(mut current) = self.select_by_id(id)? else {
            return Err(StoreError::NotFound(id.clone()));
        };

        if let Some(title) = &patch.title {
            current.title = title.clone();
        }
        if let Some(description) = &patch.description {
            current.description = Some(description.clone());
        }
        if let Some(completed) = patch.completed {
            current.completed = completed;
        }
        if let Some(priority) = patch.priority {
            current.priority = priority;
        }
        if let Some(tags) = &patch.tags {
            current.tags = Some(tags.clone());
        }
        if let Some(due_date) = patch.due_date {
            current.due_date = due_date;
        }
        current.updated_at = next_timestamp(current.updated_at, Utc::now());

        let tags = current.tags.as_deref().map(encode_tags).transpose()?;
        tx.execute(
            UPDATE_TASK,
            params![
                id.as_str(),
                current.title,
                current.description,
                current.completed,
                current.priority.as_str(),
                tags,
                current.due_date,
                current.updated_at
            ],
        )?;
        tx.commit()?;

        Ok(current)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let affected = self.conn.execute(DELETE_TASK, params![id.as_str()])?;
        if affected == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn select_completed(&self, id: &TaskId) -> Result<bool, StoreError> {
        self.conn
            .query_row(SELECT_COMPLETED, params![id.as_str()], |row| row.get(0))
            .optional()?
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn select_tags(&self) -> Result<Vec<TagsRow>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_TAGS)?;
        let tag_iter = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;

        let mut rows = Vec::new();
        for tags in tag_iter {
            let tags = match tags? {
                Some(json) => Some(serde_json::from_str(&json)?),
                None => None,
            };
            rows.push(TagsRow { tags });
        }
        Ok(rows)
    }
}
