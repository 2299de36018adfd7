use crate::fixtures::{custom, env_map, preset};
use mcpgen::entry::Entry;
use mcpgen::selection::{
    delete_custom, merge_entries, reconcile, set_env_value, toggle, Selection, SelectionStore,
};
use proptest::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Entries drawn from a small id pool so that reconciles overlap.
    fn entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
        proptest::sample::subsequence((0..8).map(|i| format!("mcp-{i}")).collect::<Vec<_>>(), 0..8)
            .prop_map(|ids| ids.iter().map(|id| preset(id, &[("KEY", "")])).collect())
    }

    /// Prior selections with arbitrary state over the same id pool.
    fn selections_strategy() -> impl Strategy<Value = Vec<Selection>> {
        proptest::collection::vec((0..8usize, any::<bool>(), proptest::option::of("[a-z]{0,4}")), 0..8)
            .prop_map(|items| {
                items
                    .into_iter()
                    .map(|(i, selected, value)| Selection {
                        entry: preset(&format!("mcp-{i}"), &[]),
                        selected,
                        env_values: value
                            .map(|v| env_map(&[("KEY", v.as_str())]))
                            .unwrap_or_default(),
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn reconcile_is_idempotent(entries in entries_strategy(), previous in selections_strategy()) {
            let once = reconcile(&entries, &previous);
            let twice = reconcile(&entries, &once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn reconcile_has_one_selection_per_entry(entries in entries_strategy(), previous in selections_strategy()) {
            let selections = reconcile(&entries, &previous);
            let entry_ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
            let selection_ids: Vec<&str> = selections.iter().map(Selection::id).collect();
            prop_assert_eq!(entry_ids, selection_ids);
        }
    }

    #[test]
    fn test_reconcile_preserves_edits() {
        let entries = vec![preset("x", &[("K", "")]), preset("y", &[])];
        let previous = vec![Selection {
            entry: preset("x", &[("K", "")]),
            selected: true,
            env_values: env_map(&[("K", "v")]),
        }];

        let selections = reconcile(&entries, &previous);
        let x = selections.iter().find(|s| s.id() == "x").unwrap();
        assert!(x.selected);
        assert_eq!(x.env_values, env_map(&[("K", "v")]));

        let y = selections.iter().find(|s| s.id() == "y").unwrap();
        assert!(!y.selected);
        assert!(y.env_values.is_empty());
    }

    #[test]
    fn test_reconcile_drops_vanished_entries() {
        let previous = toggle(&reconcile(&[custom("gone"), preset("kept", &[])], &[]), "gone");
        let selections = reconcile(&[preset("kept", &[])], &previous);

        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].id(), "kept");
    }

    #[test]
    fn test_deletion_removes_exactly_one() {
        let entries = vec![custom("a"), custom("b"), preset("c", &[])];
        let selections = toggle(&reconcile(&entries, &[]), "b");

        let (entries, selections) = delete_custom(&entries, &selections, "b");

        assert_eq!(entries.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(selections.iter().all(|s| s.id() != "b"));
        assert_eq!(selections.len(), 2);
    }

    #[test]
    fn test_mutators_leave_other_selections_untouched() {
        let selections = reconcile(&[preset("a", &[]), preset("b", &[])], &[]);

        let toggled = toggle(&selections, "b");
        assert_eq!(toggled[0], selections[0]);

        let edited = set_env_value(&selections, "a", "TOKEN", "t");
        assert_eq!(edited[1], selections[1]);
        assert!(!edited[0].selected);
        assert_eq!(edited[0].env_values, env_map(&[("TOKEN", "t")]));
    }

    #[test]
    fn test_merge_entries_keeps_presets_before_customs() {
        let merged = merge_entries(&[preset("p1", &[]), preset("p2", &[])], &[custom("c1")]).unwrap();
        assert_eq!(merged.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["p1", "p2", "c1"]);
    }

    #[test]
    fn test_store_survives_catalog_reload() {
        let mut store = SelectionStore::new(vec![custom("mine")]).unwrap();
        store.refresh(vec![preset("github", &[("TOKEN", "")])]).unwrap();
        store.toggle("github");
        store.set_env_value("github", "TOKEN", "secret");

        // Catalog reloaded with an extra preset in front
        store.refresh(vec![preset("fetch", &[]), preset("github", &[("TOKEN", "")])]).unwrap();

        let ids: Vec<&str> = store.selections().iter().map(Selection::id).collect();
        assert_eq!(ids, vec!["fetch", "github", "mine"]);
        let github = store.get("github").unwrap();
        assert!(github.selected);
        assert_eq!(github.env_values["TOKEN"], "secret");
    }

    #[test]
    fn test_store_delete_refuses_preset() {
        let mut store = SelectionStore::new(vec![custom("mine")]).unwrap();
        store.refresh(vec![preset("github", &[])]).unwrap();

        assert!(!store.delete_custom("github"));
        assert!(store.contains("github"));
        assert_eq!(store.customs().len(), 1);
    }
}
