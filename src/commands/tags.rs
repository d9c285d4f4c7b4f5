use super::open_tracker;
use crate::{
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let tracker = open_tracker().await?;
    let tags = tracker.available_tags();

    if tags.is_empty() {
        msg_info!(Message::NoTagsFound);
        return Ok(());
    }

    msg_print!(Message::TagsHeader, true);
    View::tags(tags);
    Ok(())
}
