use super::{open_tracker, parse_due_date, split_tags};
use crate::{
    libs::{
        messages::Message,
        task::{Priority, TaskDraft},
        tracker::TrackerError,
    },
    msg_bail_anyhow, msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    title: String,
    /// Longer description
    #[arg(short, long, default_value = "")]
    description: String,
    /// Priority: low, medium or high
    #[arg(short, long, default_value = "medium")]
    priority: Priority,
    /// Tags (repeatable, comma-separated)
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<String>,
}

impl AddArgs {
    fn draft(&self) -> Result<TaskDraft> {
        let due_date = self.due.as_deref().map(parse_due_date).transpose()?;

        Ok(TaskDraft::new(&self.title)
            .with_description(&self.description)
            .with_priority(self.priority)
            .with_tags(split_tags(&self.tags))
            .with_due_date(due_date))
    }
}

pub async fn cmd(args: AddArgs) -> Result<()> {
    let draft = args.draft()?;
    let mut tracker = open_tracker().await?;

    match tracker.add(draft).await {
        Ok(task) => {
            msg_success!(Message::TaskCreated(task.title));
            Ok(())
        }
        Err(TrackerError::Validation(e)) => msg_bail_anyhow!(Message::ValidationFailed(e.to_string())),
        Err(e) => {
            msg_error!(Message::TaskCreateFailed(args.title));
            Err(e.into())
        }
    }
}
