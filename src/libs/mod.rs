//! Core library modules for the taskdeck application.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Task Model**: Task records, drafts, patches and validation
//! - **View Engines**: Filtering, sorting and completion statistics
//! - **Orchestration**: Session state over a task store
//! - **User Interface**: Console table rendering
//!
//! ## Usage
//!
//! ```rust
//! use taskdeck::libs::filter::{filter_tasks, FilterCriteria};
//! use taskdeck::libs::sort::{sort_tasks, SortCriteria};
//! use taskdeck::libs::stats::TaskStats;
//!
//! let tasks = Vec::new();
//! let visible = sort_tasks(&filter_tasks(&tasks, &FilterCriteria::default()), &SortCriteria::default());
//! assert!(visible.is_empty());
//! assert_eq!(TaskStats::from_tasks(&tasks).completion_rate, 0.0);
//! ```

pub mod config;
pub mod data_storage;
pub mod filter;
pub mod messages;
pub mod sort;
pub mod stats;
pub mod task;
pub mod tracker;
pub mod view;
