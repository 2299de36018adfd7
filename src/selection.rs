//! Selection state layered over the known entries.
//!
//! Every function here is a pure transition over snapshots: callers hand in the
//! current state and receive the next one. [`SelectionStore`] bundles those
//! transitions for hosts that prefer a single owner of the state.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::entry::{Category, Entry};
use crate::{McpgenError, Result};

/// An entry together with the user's inclusion choice and env overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub entry: Entry,
    pub selected: bool,
    pub env_values: IndexMap<String, String>,
}

impl Selection {
    /// Unselected selection with no overrides.
    #[must_use]
    pub fn new(entry: Entry) -> Self {
        Self { entry, selected: false, env_values: IndexMap::new() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    /// Base `env` overlaid with the overrides.
    ///
    /// Base keys keep their position; keys that only exist as overrides follow
    /// in the order they were set. Empty values are kept.
    #[must_use]
    pub fn merged_env(&self) -> IndexMap<String, String> {
        let mut env = self.entry.env.clone();
        for (key, value) in &self.env_values {
            env.insert(key.clone(), value.clone());
        }
        env
    }
}

/// Rebuild selections for `current` entries, carrying over state by id.
///
/// The result has one selection per entry in `current` order. Ids missing from
/// `current` are dropped together with their state.
#[must_use]
pub fn reconcile(current: &[Entry], previous: &[Selection]) -> Vec<Selection> {
    let mut prior: HashMap<&str, &Selection> = HashMap::with_capacity(previous.len());
    for selection in previous {
        prior.entry(selection.id()).or_insert(selection);
    }

    current
        .iter()
        .map(|entry| {
            prior.get(entry.id.as_str()).map_or_else(
                || Selection::new(entry.clone()),
                |existing| Selection {
                    entry: entry.clone(),
                    selected: existing.selected,
                    env_values: existing.env_values.clone(),
                },
            )
        })
        .collect()
}

/// Flip `selected` on the selection with `id`.
#[must_use]
pub fn toggle(selections: &[Selection], id: &str) -> Vec<Selection> {
    selections
        .iter()
        .map(|selection| {
            if selection.id() == id {
                Selection { selected: !selection.selected, ..selection.clone() }
            } else {
                selection.clone()
            }
        })
        .collect()
}

/// Set override `key` to `value` on the selection with `id`.
#[must_use]
pub fn set_env_value(selections: &[Selection], id: &str, key: &str, value: &str) -> Vec<Selection> {
    selections
        .iter()
        .map(|selection| {
            if selection.id() == id {
                let mut updated = selection.clone();
                updated.env_values.insert(key.to_string(), value.to_string());
                updated
            } else {
                selection.clone()
            }
        })
        .collect()
}

/// Remove the custom entry `id` and its selection.
///
/// Unknown ids and preset entries leave both sequences untouched.
#[must_use]
pub fn delete_custom(
    entries: &[Entry],
    selections: &[Selection],
    id: &str,
) -> (Vec<Entry>, Vec<Selection>) {
    let deletable = entries.iter().any(|entry| entry.id == id && entry.is_custom);
    if !deletable {
        debug!("Refusing to delete '{}': not a custom entry", id);
        return (entries.to_vec(), selections.to_vec());
    }

    (
        entries.iter().filter(|entry| entry.id != id).cloned().collect(),
        selections.iter().filter(|selection| selection.id() != id).cloned().collect(),
    )
}

/// Ordered union of presets followed by customs.
///
/// Presets are marked non-custom and customs custom, whatever their stored flag
/// says.
///
/// # Errors
///
/// Returns [`McpgenError::DuplicateId`] if an id occurs more than once.
pub fn merge_entries(presets: &[Entry], customs: &[Entry]) -> Result<Vec<Entry>> {
    let presets = presets.iter().map(|entry| Entry { is_custom: false, ..entry.clone() });
    let customs = customs.iter().map(|entry| Entry { is_custom: true, ..entry.clone() });

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for entry in presets.chain(customs) {
        if !seen.insert(entry.id.clone()) {
            return Err(McpgenError::DuplicateId(entry.id));
        }
        merged.push(entry);
    }

    Ok(merged)
}

/// Selections whose name or description contains `search` (case-insensitive)
/// and whose category matches, when one is given.
#[must_use]
pub fn filter_selections<'a>(
    selections: &'a [Selection],
    search: &str,
    category: Option<Category>,
) -> Vec<&'a Selection> {
    let needle = search.to_lowercase();
    selections
        .iter()
        .filter(|selection| {
            let entry = &selection.entry;
            let matches_search = entry.name.to_lowercase().contains(&needle)
                || entry.description.to_lowercase().contains(&needle);
            let matches_category = category.map_or(true, |category| entry.category == category);
            matches_search && matches_category
        })
        .collect()
}

#[must_use]
pub fn selected_count(selections: &[Selection]) -> usize {
    selections.iter().filter(|selection| selection.selected).count()
}

/// Owner of the persisted custom entries and the derived selections.
///
/// The store performs no I/O. Hosts persist [`SelectionStore::customs`] after
/// [`SelectionStore::add_custom`] or [`SelectionStore::delete_custom`].
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    presets: Vec<Entry>,
    customs: Vec<Entry>,
    selections: Vec<Selection>,
}

impl SelectionStore {
    /// Store holding `customs` and no presets yet.
    ///
    /// # Errors
    ///
    /// Returns [`McpgenError::DuplicateId`] if two customs share an id.
    pub fn new(customs: Vec<Entry>) -> Result<Self> {
        let mut store = Self::default();
        store.replace(Vec::new(), customs)?;
        Ok(store)
    }

    /// Swap in a freshly loaded preset list, keeping selection state by id.
    ///
    /// # Errors
    ///
    /// Returns [`McpgenError::DuplicateId`] if a preset id collides with
    /// another preset or a custom entry. The store is left unchanged.
    pub fn refresh(&mut self, presets: Vec<Entry>) -> Result<()> {
        let customs = self.customs.clone();
        self.replace(presets, customs)
    }

    /// Append a custom entry.
    ///
    /// # Errors
    ///
    /// Returns [`McpgenError::DuplicateId`] if the id is already known. The
    /// store is left unchanged.
    pub fn add_custom(&mut self, entry: Entry) -> Result<()> {
        let mut customs = self.customs.clone();
        customs.push(Entry { is_custom: true, ..entry });
        self.replace(self.presets.clone(), customs)
    }

    /// Delete a custom entry. Returns `false` for presets and unknown ids.
    pub fn delete_custom(&mut self, id: &str) -> bool {
        let (customs, selections) = delete_custom(&self.customs, &self.selections, id);
        let removed = customs.len() != self.customs.len();
        if removed {
            debug!("Deleted custom entry '{}'", id);
            self.customs = customs;
            self.selections = selections;
        }
        removed
    }

    pub fn toggle(&mut self, id: &str) {
        self.selections = toggle(&self.selections, id);
    }

    /// Force the selection state of `id`, toggling only when it differs.
    pub fn set_selected(&mut self, id: &str, selected: bool) {
        let differs = self.get(id).is_some_and(|selection| selection.selected != selected);
        if differs {
            self.toggle(id);
        }
    }

    pub fn set_env_value(&mut self, id: &str, key: &str, value: &str) {
        self.selections = set_env_value(&self.selections, id, key, value);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Selection> {
        self.selections.iter().find(|selection| selection.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn customs(&self) -> &[Entry] {
        &self.customs
    }

    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    fn replace(&mut self, presets: Vec<Entry>, customs: Vec<Entry>) -> Result<()> {
        let entries = merge_entries(&presets, &customs)?;
        trace!("Reconciling {} entries against {} selections", entries.len(), self.selections.len());

        self.selections = reconcile(&entries, &self.selections);
        self.customs = entries.iter().filter(|entry| entry.is_custom).cloned().collect();
        self.presets = presets;
        Ok(())
    }
}
