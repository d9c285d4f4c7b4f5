//! Local database layer for taskdeck.
//!
//! Provides an offline task store built on SQLite. It implements the same
//! store contract as the remote PostgREST backend, so the tracker can switch
//! between them through configuration alone.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::db::tasks::LocalStore;
//!
//! let store = LocalStore::open(std::path::Path::new("taskdeck.db"))?;
//! # Ok::<(), rusqlite::Error>(())
//! ```
//!
//! ## Schema
//!
//! A single `tasks` table mirrors the remote columns. Tags are stored as a
//! JSON array in a text column; timestamps are UTC.

/// Connection setup and schema.
pub mod db;

/// SQLite-backed `TaskStore` implementation.
pub mod tasks;
