//! Display implementation for taskdeck messages.
//!
//! All user-facing text lives here, in one match over [`Message`]. Callers
//! never format text themselves; they pick a variant and hand it to one of
//! the message macros.
//!
//! ```rust
//! use taskdeck::libs::messages::Message;
//!
//! let message = Message::TaskCreated("Buy milk".to_string());
//! assert_eq!(message.to_string(), "Task 'Buy milk' created");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskCompleted(title) => format!("Task '{}' marked as completed", title),
            Message::TaskReopened(title) => format!("Task '{}' marked as active", title),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TaskCreateFailed(title) => format!("Failed to create task '{}'", title),
            Message::TaskUpdateFailed(id) => format!("Failed to update task {}", id),
            Message::TaskDeleteFailed(id) => format!("Failed to delete task {}", id),
            Message::TaskToggleFailed(id) => format!("Failed to toggle task {}", id),
            Message::TasksNotFound => "No tasks yet. Add one with `taskdeck add <title>`.".to_string(),
            Message::TasksNoMatch(total) => format!("No tasks match the current filters ({} in total).", total),
            Message::TasksShown(shown, total) => format!("Showing {} of {} task(s)", shown, total),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::NoChangesDetected => "No changes given, nothing to update.".to_string(),
            Message::ValidationFailed(reason) => format!("Invalid task: {}", reason),
            Message::InvalidDate(input) => format!("Invalid date '{}', expected YYYY-MM-DD", input),

            // === TAG MESSAGES ===
            Message::TagsHeader => "Tags in use:".to_string(),
            Message::NoTagsFound => "No tags in use.".to_string(),

            // === STATS MESSAGES ===
            Message::StatsHeader => "Task statistics".to_string(),

            // === STORE MESSAGES ===
            Message::StoreListFailed(error) => format!("Error loading tasks from store: {}", error),
            Message::StoreCreateFailed(error) => format!("Error creating task in store: {}", error),
            Message::StoreUpdateFailed(id, error) => format!("Error updating task {} in store: {}", id, error),
            Message::StoreDeleteFailed(id, error) => format!("Error deleting task {} from store: {}", id, error),
            Message::StoreToggleFailed(id, error) => format!("Error toggling task {} in store: {}", id, error),
            Message::StoreTagsFailed(error) => format!("Error loading tags from store: {}", error),
            Message::RefreshFailed => "Failed to load tasks; showing nothing new.".to_string(),
            Message::RemoteStoreNotConfigured => "Remote store selected but not configured. Run `taskdeck init`.".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleRemote => "Remote store (PostgREST / Supabase)".to_string(),
            Message::ConfigModuleLocal => "Local store (SQLite file)".to_string(),
            Message::BackendRemote => "Remote".to_string(),
            Message::BackendLocal => "Local".to_string(),
            Message::PromptSelectBackend => "Where should tasks be stored?".to_string(),
            Message::PromptApiUrl => "Enter the project URL".to_string(),
            Message::PromptApiKey => "Enter the API key".to_string(),
            Message::PromptTimeout => "Request timeout in seconds".to_string(),
            Message::PromptDbFile => "Database file".to_string(),

            // === GENERIC MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
