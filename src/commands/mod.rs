//! Command-line front end.
//!
//! Each subcommand lives in its own module exposing an `Args` struct and an
//! async `cmd` function. Commands that touch tasks build a [`TaskTracker`]
//! over the configured store with [`open_tracker`].

pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod stats;
pub mod tags;
pub mod toggle;

use crate::api::{Backend, TaskService};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::tracker::TaskTracker;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List tasks with optional filters and sorting")]
    List(list::ListArgs),
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "Edit a task", arg_required_else_help = true)]
    Edit(edit::EditArgs),
    #[command(about = "Delete a task", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "Mark a task completed or active again", arg_required_else_help = true)]
    Toggle(toggle::ToggleArgs),
    #[command(about = "Show tags in use")]
    Tags,
    #[command(about = "Show completion statistics")]
    Stats,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::List(args) => list::cmd(args).await,
            Commands::Add(args) => add::cmd(args).await,
            Commands::Edit(args) => edit::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::Toggle(args) => toggle::cmd(args).await,
            Commands::Tags => tags::cmd().await,
            Commands::Stats => stats::cmd().await,
        }
    }
}

/// Opens the configured store and loads the current tasks and tags.
pub async fn open_tracker() -> Result<TaskTracker<Backend>> {
    let config = Config::load()?;
    let backend = Backend::open(&config.store)?;
    let mut tracker = TaskTracker::new(TaskService::new(backend)).with_sort(config.display.default_sort);
    tracker.refresh().await?;
    Ok(tracker)
}

/// Parses a `YYYY-MM-DD` argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(input.to_string())))
}

/// Parses a `YYYY-MM-DD` due date as midnight UTC.
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>> {
    Ok(parse_date(input)?.and_time(NaiveTime::MIN).and_utc())
}

/// Splits comma-separated tag arguments, so `-t a,b -t c` yields three tags.
pub fn split_tags(raw: &[String]) -> Vec<String> {
    raw.iter().flat_map(|value| value.split(',')).map(|tag| tag.trim().to_string()).filter(|tag| !tag.is_empty()).collect()
}
