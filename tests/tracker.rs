#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::cell::Cell;
    use std::rc::Rc;
    use taskdeck::api::{NewTaskRow, StoreError, TagsRow, TaskRow, TaskService, TaskStore};
    use taskdeck::db::tasks::LocalStore;
    use taskdeck::libs::filter::{DateRange, FilterCriteria, StatusFilter};
    use taskdeck::libs::sort::{SortBy, SortCriteria, SortOrder};
    use taskdeck::libs::task::{Priority, TaskDraft, TaskId, TaskPatch, ValidationError};
    use taskdeck::libs::tracker::{TaskTracker, TrackerError};

    /// Local store whose calls can be switched to fail, counting every call.
    struct SwitchableStore {
        inner: LocalStore,
        fail_all: Rc<Cell<bool>>,
        fail_tags: Rc<Cell<bool>>,
        calls: Rc<Cell<usize>>,
        tag_calls: Rc<Cell<usize>>,
    }

    #[derive(Clone)]
    struct Switches {
        fail_all: Rc<Cell<bool>>,
        fail_tags: Rc<Cell<bool>>,
        calls: Rc<Cell<usize>>,
        tag_calls: Rc<Cell<usize>>,
    }

    impl SwitchableStore {
        fn new() -> (Self, Switches) {
            let switches = Switches {
                fail_all: Rc::new(Cell::new(false)),
                fail_tags: Rc::new(Cell::new(false)),
                calls: Rc::new(Cell::new(0)),
                tag_calls: Rc::new(Cell::new(0)),
            };
            let store = Self {
                inner: LocalStore::open_in_memory().unwrap(),
                fail_all: switches.fail_all.clone(),
                fail_tags: switches.fail_tags.clone(),
                calls: switches.calls.clone(),
                tag_calls: switches.tag_calls.clone(),
            };
            (store, switches)
        }

        fn check(&self) -> Result<(), StoreError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_all.get() {
                return Err(StoreError::NotFound(TaskId::new("unavailable")));
            }
            Ok(())
        }
    }

    impl TaskStore for SwitchableStore {
        async fn select_all(&self) -> Result<Vec<TaskRow>, StoreError> {
            self.check()?;
            self.inner.select_all().await
        }

        async fn insert(&self, row: &NewTaskRow) -> Result<TaskRow, StoreError> {
            self.check()?;
            self.inner.insert(row).await
        }

        async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRow, StoreError> {
            self.check()?;
            self.inner.update(id, patch).await
        }

        async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
            self.check()?;
            self.inner.delete(id).await
        }

        async fn select_completed(&self, id: &TaskId) -> Result<bool, StoreError> {
            self.check()?;
            self.inner.select_completed(id).await
        }

        async fn select_tags(&self) -> Result<Vec<TagsRow>, StoreError> {
            self.check()?;
            self.tag_calls.set(self.tag_calls.get() + 1);
            if self.fail_tags.get() {
                return Err(StoreError::NotFound(TaskId::new("tags")));
            }
            self.inner.select_tags().await
        }
    }

    fn local_tracker() -> TaskTracker<LocalStore> {
        TaskTracker::new(TaskService::new(LocalStore::open_in_memory().unwrap()))
    }

    fn switchable_tracker() -> (TaskTracker<SwitchableStore>, Switches) {
        let (store, switches) = SwitchableStore::new();
        (TaskTracker::new(TaskService::new(store)), switches)
    }

    #[tokio::test]
    async fn test_create_then_list_contains_draft_fields() {
        let mut tracker = local_tracker();
        let due = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let draft = TaskDraft::new("Plan trip")
            .with_description("Book flights")
            .with_priority(Priority::High)
            .with_tags(["travel", "family"])
            .with_due_date(Some(due));

        let created = tracker.add(draft).await.unwrap();
        let listed = tracker.service().list().await.unwrap();

        assert_eq!(listed.len(), 1);
        let task = &listed[0];
        assert_eq!(task.id, created.id);
        assert_eq!(task.title, "Plan trip");
        assert_eq!(task.description, "Book flights");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["travel", "family"]);
        assert_eq!(task.due_date, Some(due));
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn test_toggle_marks_completed_and_bumps_updated_at() {
        let mut tracker = local_tracker();
        let created = tracker
            .add(TaskDraft::new("Buy milk").with_priority(Priority::Low).with_tags(["errand"]))
            .await
            .unwrap();

        let toggled = tracker.toggle(&created.id).await.unwrap();

        assert!(toggled.completed);
        assert!(toggled.updated_at > created.updated_at);
        assert_eq!(toggled.tags, vec!["errand"]);
        assert_eq!(tracker.all_tasks()[0], toggled);
        assert_eq!(tracker.stats().completed, 1);

        let reopened = tracker.toggle(&created.id).await.unwrap();
        assert!(!reopened.completed);
        assert!(reopened.updated_at > toggled.updated_at);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails_and_keeps_collection() {
        let mut tracker = local_tracker();
        tracker.add(TaskDraft::new("Water plants")).await.unwrap();
        let before = tracker.all_tasks().to_vec();

        let result = tracker.remove(&TaskId::new("does-not-exist")).await;

        assert_eq!(result, Err(TrackerError::StoreFailed("delete")));
        assert_eq!(tracker.all_tasks(), before.as_slice());
    }

    #[tokio::test]
    async fn test_remove_drops_task_and_its_tags() {
        let mut tracker = local_tracker();
        let keep = tracker.add(TaskDraft::new("Keep").with_tags(["home"])).await.unwrap();
        let gone = tracker.add(TaskDraft::new("Gone").with_tags(["work"])).await.unwrap();
        assert_eq!(tracker.available_tags(), ["home", "work"]);

        tracker.remove(&gone.id).await.unwrap();

        assert_eq!(tracker.all_tasks().len(), 1);
        assert_eq!(tracker.all_tasks()[0].id, keep.id);
        assert_eq!(tracker.available_tags(), ["home"]);
    }

    #[tokio::test]
    async fn test_add_prepends_and_refreshes_tags() {
        let mut tracker = local_tracker();
        tracker.add(TaskDraft::new("First").with_tags(["b"])).await.unwrap();
        tracker.add(TaskDraft::new("Second").with_tags(["a", "b"])).await.unwrap();

        let titles: Vec<&str> = tracker.all_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
        assert_eq!(tracker.available_tags(), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_validation_rejects_before_any_store_call() {
        let (mut tracker, switches) = switchable_tracker();

        let added = tracker.add(TaskDraft::new("   ")).await;
        let edited = tracker
            .edit(
                &TaskId::new("1"),
                TaskPatch {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(added, Err(TrackerError::Validation(ValidationError::EmptyTitle)));
        assert_eq!(edited, Err(TrackerError::Validation(ValidationError::EmptyTitle)));
        assert_eq!(switches.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_edit_replaces_in_place_and_clears_due_date() {
        let mut tracker = local_tracker();
        let due = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let older = tracker.add(TaskDraft::new("Older")).await.unwrap();
        let task = tracker.add(TaskDraft::new("  Draft  ").with_due_date(Some(due))).await.unwrap();
        assert_eq!(task.title, "Draft");

        let patch = TaskPatch {
            title: Some("Final".to_string()),
            tags: Some(vec!["done".to_string(), "done".to_string()]),
            due_date: Some(None),
            ..Default::default()
        };
        let edited = tracker.edit(&task.id, patch).await.unwrap();

        assert_eq!(edited.title, "Final");
        assert_eq!(edited.tags, vec!["done"]);
        assert_eq!(edited.due_date, None);
        assert_eq!(tracker.all_tasks()[0], edited);
        assert_eq!(tracker.all_tasks()[1].id, older.id);
        assert_eq!(tracker.available_tags(), ["done"]);
    }

    #[tokio::test]
    async fn test_edit_with_empty_patch_is_rejected() {
        let (mut tracker, switches) = switchable_tracker();

        let result = tracker.edit(&TaskId::new("1"), TaskPatch::default()).await;

        assert_eq!(result, Err(TrackerError::EmptyPatch));
        assert_eq!(switches.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_state() {
        let (mut tracker, switches) = switchable_tracker();
        tracker.add(TaskDraft::new("Pay rent").with_tags(["home"])).await.unwrap();
        tracker.refresh().await.unwrap();
        let tasks = tracker.all_tasks().to_vec();

        switches.fail_all.set(true);
        let result = tracker.refresh().await;

        assert_eq!(result, Err(TrackerError::StoreFailed("refresh")));
        assert_eq!(tracker.all_tasks(), tasks.as_slice());
        assert_eq!(tracker.available_tags(), ["home"]);
        assert!(!tracker.is_loading());
    }

    #[tokio::test]
    async fn test_refresh_commits_nothing_when_only_tags_fail() {
        let (mut tracker, switches) = switchable_tracker();
        tracker.add(TaskDraft::new("Stale")).await.unwrap();
        tracker.service().create(&TaskDraft::new("Fresh")).await.unwrap();

        switches.fail_tags.set(true);
        assert!(tracker.refresh().await.is_err());
        assert_eq!(tracker.all_tasks().len(), 1);

        switches.fail_tags.set(false);
        tracker.refresh().await.unwrap();
        assert_eq!(tracker.all_tasks().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_collection_unchanged() {
        let (mut tracker, switches) = switchable_tracker();
        tracker.add(TaskDraft::new("Existing")).await.unwrap();

        switches.fail_all.set(true);
        let result = tracker.add(TaskDraft::new("New")).await;

        assert_eq!(result, Err(TrackerError::StoreFailed("create")));
        assert_eq!(tracker.all_tasks().len(), 1);
    }

    #[tokio::test]
    async fn test_tag_refresh_failure_keeps_index_and_mutation() {
        let (mut tracker, switches) = switchable_tracker();
        tracker.add(TaskDraft::new("Old").with_tags(["home"])).await.unwrap();

        switches.fail_tags.set(true);
        let added = tracker.add(TaskDraft::new("New").with_tags(["work"])).await;

        assert!(added.is_ok());
        assert_eq!(tracker.all_tasks().len(), 2);
        assert_eq!(tracker.available_tags(), ["home"]);
    }

    #[tokio::test]
    async fn test_toggle_does_not_refetch_tags() {
        let (mut tracker, switches) = switchable_tracker();
        let task = tracker.add(TaskDraft::new("Stretch").with_tags(["health"])).await.unwrap();
        let tag_calls = switches.tag_calls.get();

        tracker.toggle(&task.id).await.unwrap();

        assert_eq!(switches.tag_calls.get(), tag_calls);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_fails() {
        let mut tracker = local_tracker();

        let result = tracker.toggle(&TaskId::new("missing")).await;

        assert_eq!(result, Err(TrackerError::StoreFailed("toggle")));
        assert!(tracker.all_tasks().is_empty());
    }

    #[tokio::test]
    async fn test_visible_tasks_apply_filters_and_sort() {
        let mut tracker = local_tracker();
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        tracker.add(TaskDraft::new("banana").with_due_date(Some(early))).await.unwrap();
        tracker.add(TaskDraft::new("Apple").with_due_date(Some(late))).await.unwrap();
        let cherry = tracker.add(TaskDraft::new("Cherry")).await.unwrap();
        tracker.toggle(&cherry.id).await.unwrap();

        tracker.update_sort(SortCriteria::new(SortBy::Title, SortOrder::Asc));
        let titles: Vec<String> = tracker.visible_tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Apple", "banana", "Cherry"]);

        tracker.set_status_filter(StatusFilter::Active);
        tracker.set_date_range(DateRange::new(NaiveDate::from_ymd_opt(2024, 6, 1), NaiveDate::from_ymd_opt(2024, 12, 31)));
        let titles: Vec<String> = tracker.visible_tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Apple"]);

        // Stats ignore the active filters.
        assert_eq!(tracker.stats().total, 3);

        tracker.reset_filters();
        assert_eq!(tracker.filters(), &FilterCriteria::default());
        assert_eq!(tracker.visible_tasks().len(), 3);
    }

    #[tokio::test]
    async fn test_filter_setters_do_not_touch_the_store() {
        let (mut tracker, switches) = switchable_tracker();

        tracker.set_search_query("milk");
        tracker.set_tags_filter(vec!["errand".to_string()]);
        tracker.update_sort(SortCriteria::new(SortBy::Priority, SortOrder::Desc));
        let _ = tracker.visible_tasks();

        assert_eq!(switches.calls.get(), 0);
        assert_eq!(tracker.filters().search_query, "milk");
        assert_eq!(tracker.sort().by, SortBy::Priority);
    }
}
