//! PostgREST client for the remote `tasks` table.
//!
//! Talks to a PostgREST endpoint (for example a Supabase project) exposing a
//! `tasks` table. All writes ask for the affected rows back so that the
//! caller always sees the store's own view of a record, including the
//! server-maintained `updated_at`.
//!
//! ## Endpoints
//!
//! | Operation        | Request                                              |
//! |------------------|------------------------------------------------------|
//! | select all       | `GET /rest/v1/tasks?select=*&order=created_at.desc`  |
//! | insert           | `POST /rest/v1/tasks` (one-element array)            |
//! | update           | `PATCH /rest/v1/tasks?id=eq.<id>`                    |
//! | delete           | `DELETE /rest/v1/tasks?id=eq.<id>`                   |
//! | completion flag  | `GET /rest/v1/tasks?select=completed&id=eq.<id>`     |
//! | tags             | `GET /rest/v1/tasks?select=tags`                     |
//!
//! ## Authentication
//!
//! The configured API key is sent both as the `apikey` header and as a bearer
//! token, which is what Supabase expects for anonymous and service keys.

use super::{NewTaskRow, StoreError, TagsRow, TaskRow, TaskStore};
use crate::libs::config::RemoteConfig;
use crate::libs::data_storage::{APP_METADATA_NAME, APP_METADATA_VERSION};
use crate::libs::task::{TaskId, TaskPatch};
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const TASKS_PATH: &str = "rest/v1/tasks";
const PREFER_REPRESENTATION: &str = "return=representation";

#[derive(Debug, Deserialize)]
struct CompletedRow {
    completed: bool,
}

/// HTTP client for a PostgREST `tasks` table.
///
/// Holds only the connection pool and endpoint settings; no task state.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
}

impl PostgrestStore {
    /// Builds a client with authentication headers and the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&config.api_key)?);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", config.api_key))?);
        headers.insert(USER_AGENT, HeaderValue::from_str(&format!("{}/{}", APP_METADATA_NAME, APP_METADATA_VERSION))?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: tasks_url(&config.api_url),
        })
    }

    fn id_filter(id: &TaskId) -> String {
        format!("eq.{}", id)
    }

    /// Sends a request and decodes the JSON body, turning non-2xx into `StoreError::Status`.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, StoreError> {
        let response = Self::check(request.send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, %body, "store request rejected");
        Err(StoreError::Status { status, body })
    }

    fn first_or_not_found<T>(rows: Vec<T>, id: &TaskId) -> Result<T, StoreError> {
        rows.into_iter().next().ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

/// Joins the configured base URL with the table path.
pub fn tasks_url(api_url: &str) -> String {
    format!("{}/{}", api_url.trim_end_matches('/'), TASKS_PATH)
}

impl TaskStore for PostgrestStore {
    async fn select_all(&self) -> Result<Vec<TaskRow>, StoreError> {
        tracing::debug!(url = %self.base_url, "select all tasks");
        let request = self.client.get(&self.base_url).query(&[("select", "*"), ("order", "created_at.desc")]);
        Self::send(request).await
    }

    async fn insert(&self, row: &NewTaskRow) -> Result<TaskRow, StoreError> {
        let request = self.client.post(&self.base_url).header("Prefer", PREFER_REPRESENTATION).json(&[row]);
        let rows: Vec<TaskRow> = Self::send(request).await?;
        rows.into_iter().next().ok_or_else(|| StoreError::Status {
            status: reqwest::StatusCode::NO_CONTENT,
            body: "insert returned no row".to_string(),
        })
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRow, StoreError> {
        let request = self
            .client
            .patch(&self.base_url)
            .query(&[("id", Self::id_filter(id))])
            .header("Prefer", PREFER_REPRESENTATION)
            .json(patch);
        let rows: Vec<TaskRow> = Self::send(request).await?;
        Self::first_or_not_found(rows, id)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(&self.base_url)
            .query(&[("id", Self::id_filter(id))])
            .header("Prefer", PREFER_REPRESENTATION);
        let rows: Vec<TaskRow> = Self::send(request).await?;
        Self::first_or_not_found(rows, id).map(|_| ())
    }

    async fn select_completed(&self, id: &TaskId) -> Result<bool, StoreError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[("select", "completed".to_string()), ("id", Self::id_filter(id))]);
        let rows: Vec<CompletedRow> = Self::send(request).await?;
        Self::first_or_not_found(rows, id).map(|row| row.completed)
    }

    async fn select_tags(&self) -> Result<Vec<TagsRow>, StoreError> {
        let request = self.client.get(&self.base_url).query(&[("select", "tags")]);
        Self::send(request).await
    }
}
