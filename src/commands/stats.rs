use super::open_tracker;
use crate::{
    libs::{messages::Message, view::View},
    msg_print,
};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let tracker = open_tracker().await?;

    msg_print!(Message::StatsHeader, true);
    View::stats(&tracker.stats());
    Ok(())
}
