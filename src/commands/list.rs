use super::{open_tracker, parse_date, split_tags};
use crate::{
    libs::{
        filter::{DateRange, FilterCriteria, PriorityFilter, StatusFilter},
        messages::Message,
        sort::{SortBy, SortCriteria, SortOrder},
        task::Priority,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Completion state: all, active or completed
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    /// Only tasks with this priority: low, medium or high
    #[arg(short, long)]
    priority: Option<Priority>,
    /// Only tasks carrying any of these tags (repeatable, comma-separated)
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// Case-insensitive text matched against title, description and tags
    #[arg(short, long)]
    search: Option<String>,
    /// First due day to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Last due day to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Sort key: created, due, priority or title
    #[arg(short, long)]
    by: Option<SortBy>,
    /// Sort direction: asc or desc
    #[arg(short, long)]
    order: Option<SortOrder>,
    /// Do not mark overdue due dates with `!`
    #[arg(long)]
    no_overdue_mark: bool,
}

impl ListArgs {
    fn filters(&self) -> Result<FilterCriteria> {
        let start = self.from.as_deref().map(parse_date).transpose()?;
        let end = self.to.as_deref().map(parse_date).transpose()?;

        Ok(FilterCriteria {
            status: self.status,
            priority: self.priority.map_or(PriorityFilter::All, PriorityFilter::Only),
            tags: split_tags(&self.tags),
            search_query: self.search.clone().unwrap_or_default(),
            date_range: DateRange::new(start, end),
        })
    }

    fn mark_overdue(&self) -> bool {
        !self.no_overdue_mark
    }

    /// Flags override the configured default sort key by key.
    fn sort(&self, default: &SortCriteria) -> SortCriteria {
        SortCriteria::new(self.by.unwrap_or(default.by), self.order.unwrap_or(default.order))
    }
}

pub async fn cmd(args: ListArgs) -> Result<()> {
    let filters = args.filters()?;
    let mut tracker = open_tracker().await?;

    let sort = args.sort(tracker.sort());
    tracker.update_filters(filters);
    tracker.update_sort(sort);

    let total = tracker.all_tasks().len();
    if total == 0 {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    let visible = tracker.visible_tasks();
    if visible.is_empty() {
        msg_info!(Message::TasksNoMatch(total));
        return Ok(());
    }

    View::tasks(&visible, Utc::now(), args.mark_overdue());
    msg_print!(Message::TasksShown(visible.len(), total));
    Ok(())
}
