//! Property-based tests: registry totality and store eviction invariants.

use proptest::prelude::*;

use remotectl_tasks::{Category, TaskConfig, TaskStatus};
use remotectl_tasks::store::TaskStore;

proptest! {
    /// `for_operation` is total: any string resolves to one of the five
    /// categories, and resolves the same way every time.
    #[test]
    fn category_lookup_is_total_and_deterministic(name in ".*") {
        let category = Category::for_operation(&name);
        prop_assert!(Category::ALL.contains(&category));
        prop_assert_eq!(category, Category::for_operation(&name));
    }

    /// Registry names are all capitalized ASCII, so lowercase-only names
    /// are never mapped and must default to `Query`.
    #[test]
    fn unmapped_names_default_to_query(name in "[a-z0-9_]{0,24}") {
        prop_assert_eq!(Category::for_operation(&name), Category::Query);
    }

    /// Every category's limit is positive.
    #[test]
    fn limits_are_positive(category in prop::sample::select(Category::ALL.to_vec())) {
        prop_assert!(category.limit() > 0);
    }

    /// However many tasks run to completion, the store never holds more
    /// terminal records than the configured cap, and the survivors are the
    /// newest ones.
    #[test]
    fn terminal_history_never_exceeds_the_cap(
        max_history in 1usize..20,
        completions in 0usize..60,
    ) {
        let config = TaskConfig::default().with_max_history(max_history);
        let store = TaskStore::new(&config);

        for i in 0..completions {
            let record = store.create(&format!("Op{i}"));
            prop_assert!(store.cancel(&record.id).is_ok());
        }

        let terminal = store.list(Some(TaskStatus::Cancelled)).len();
        prop_assert!(terminal <= max_history);
    }

    /// Non-terminal records survive arbitrary history pressure.
    #[test]
    fn pending_records_survive_eviction(
        max_history in 1usize..10,
        pending in 1usize..10,
        completions in 0usize..40,
    ) {
        let config = TaskConfig::default().with_max_history(max_history);
        let store = TaskStore::new(&config);

        let mut pending_ids = Vec::new();
        for _ in 0..pending {
            pending_ids.push(store.create("Wait").id);
        }
        for i in 0..completions {
            let record = store.create(&format!("Op{i}"));
            prop_assert!(store.cancel(&record.id).is_ok());
        }

        for id in &pending_ids {
            let record = store.get(id);
            prop_assert!(record.is_some());
            prop_assert_eq!(record.unwrap().status, TaskStatus::Pending);
        }
    }
}
