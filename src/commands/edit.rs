use super::{open_tracker, parse_due_date, split_tags};
use crate::{
    libs::{
        messages::Message,
        task::{Priority, TaskId, TaskPatch},
        tracker::TrackerError,
    },
    msg_bail_anyhow, msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task ID
    id: String,
    /// New title
    #[arg(long)]
    title: Option<String>,
    /// New description
    #[arg(short, long)]
    description: Option<String>,
    /// New priority: low, medium or high
    #[arg(short, long)]
    priority: Option<Priority>,
    /// Replace tags (repeatable, comma-separated)
    #[arg(short, long = "tag", conflicts_with = "clear_tags")]
    tags: Vec<String>,
    /// Remove all tags
    #[arg(long)]
    clear_tags: bool,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    clear_due: bool,
}

impl EditArgs {
    fn patch(&self) -> Result<TaskPatch> {
        let tags = if self.clear_tags {
            Some(Vec::new())
        } else if self.tags.is_empty() {
            None
        } else {
            Some(split_tags(&self.tags))
        };

        let due_date = if self.clear_due {
            Some(None)
        } else {
            self.due.as_deref().map(parse_due_date).transpose()?.map(Some)
        };

        Ok(TaskPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: None,
            priority: self.priority,
            tags,
            due_date,
        })
    }
}

pub async fn cmd(args: EditArgs) -> Result<()> {
    let patch = args.patch()?;
    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let mut tracker = open_tracker().await?;
    match tracker.edit(&TaskId::new(args.id.as_str()), patch).await {
        Ok(task) => {
            msg_success!(Message::TaskUpdated(task.title));
            Ok(())
        }
        Err(TrackerError::Validation(e)) => msg_bail_anyhow!(Message::ValidationFailed(e.to_string())),
        Err(TrackerError::EmptyPatch) => {
            msg_info!(Message::NoChangesDetected);
            Ok(())
        }
        Err(e) => {
            msg_error!(Message::TaskUpdateFailed(args.id));
            Err(e.into())
        }
    }
}
