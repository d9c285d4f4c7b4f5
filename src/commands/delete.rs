use super::open_tracker;
use crate::{
    api::TaskStore,
    libs::{messages::Message, task::TaskId, tracker::TaskTracker},
    msg_error, msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task ID
    id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs) -> Result<()> {
    let mut tracker = open_tracker().await?;
    delete(&mut tracker, &args, confirm).await
}

fn confirm(title: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteTask(title.to_string()).to_string())
        .default(false)
        .interact()?)
}

/// Deletes one task after confirmation. An unknown id is an error.
async fn delete<S, F>(tracker: &mut TaskTracker<S>, args: &DeleteArgs, confirm: F) -> Result<()>
where
    S: TaskStore,
    F: FnOnce(&str) -> Result<bool>,
{
    let id = TaskId::new(args.id.as_str());

    let title = tracker
        .all_tasks()
        .iter()
        .find(|task| task.id == id)
        .map(|task| task.title.clone())
        .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFoundWithId(args.id.clone())))?;

    if !args.yes && !confirm(&title)? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if let Err(e) = tracker.remove(&id).await {
        msg_error!(Message::TaskDeleteFailed(args.id.clone()));
        return Err(e.into());
    }

    msg_success!(Message::TaskDeleted(args.id.clone()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TaskService;
    use crate::db::tasks::LocalStore;
    use crate::libs::task::TaskDraft;

    fn args(id: &str, yes: bool) -> DeleteArgs {
        DeleteArgs { id: id.to_string(), yes }
    }

    async fn tracker_with_task() -> (TaskTracker<LocalStore>, String) {
        let mut tracker = TaskTracker::new(TaskService::new(LocalStore::open_in_memory().unwrap()));
        let task = tracker.add(TaskDraft::new("Water plants")).await.unwrap();
        (tracker, task.id.to_string())
    }

    #[tokio::test]
    async fn unknown_id_is_an_error() {
        let (mut tracker, _) = tracker_with_task().await;

        let result = delete(&mut tracker, &args("missing", true), |_| Ok(true)).await;

        assert!(result.unwrap_err().to_string().contains("missing"));
        assert_eq!(tracker.all_tasks().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_task() {
        let (mut tracker, id) = tracker_with_task().await;

        delete(&mut tracker, &args(&id, false), |title| Ok(title == "Water plants")).await.unwrap();

        assert!(tracker.all_tasks().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_keeps_task() {
        let (mut tracker, id) = tracker_with_task().await;

        delete(&mut tracker, &args(&id, false), |_| Ok(false)).await.unwrap();

        assert_eq!(tracker.all_tasks().len(), 1);
    }
}
