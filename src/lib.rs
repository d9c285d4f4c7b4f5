//! # Taskdeck - Personal Task Tracker
//!
//! A command-line task tracker whose tasks live in a PostgREST-style remote
//! store or a local SQLite file.
//!
//! ## Features
//!
//! - **Task Management**: Create, edit, complete and delete tasks
//! - **Metadata**: Priorities, tags and due dates
//! - **Views**: Filter by status, priority, tags, text and due-date range; sort by any key
//! - **Statistics**: Completion counts and rate
//! - **Stores**: Remote PostgREST / Supabase table or local SQLite file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
