use super::open_tracker;
use crate::{
    libs::{messages::Message, task::TaskId},
    msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Task ID
    id: String,
}

pub async fn cmd(args: ToggleArgs) -> Result<()> {
    let mut tracker = open_tracker().await?;

    match tracker.toggle(&TaskId::new(args.id.as_str())).await {
        Ok(task) if task.completed => msg_success!(Message::TaskCompleted(task.title)),
        Ok(task) => msg_success!(Message::TaskReopened(task.title)),
        Err(e) => {
            msg_error!(Message::TaskToggleFailed(args.id));
            return Err(e.into());
        }
    }
    Ok(())
}
