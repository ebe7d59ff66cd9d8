//! The tabular value store.
//!
//! One row per observed state key, one column per action category. Rows
//! are created lazily, zero-initialized, the first time a state is looked
//! up for an update or a greedy choice.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::rules::actions::ActionCategory;

/// Value estimates for the four categories in one state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QRow {
    values: [f64; 4],
}

impl QRow {
    /// A row with the given column values, in `ActionCategory::ALL` order.
    #[must_use]
    pub const fn from_values(values: [f64; 4]) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn get(&self, category: ActionCategory) -> f64 {
        self.values[category.index()]
    }

    pub fn set(&mut self, category: ActionCategory, value: f64) {
        self.values[category.index()] = value;
    }

    /// The maximum value across all four categories.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Raw column values in `ActionCategory::ALL` order.
    #[must_use]
    pub fn values(&self) -> [f64; 4] {
        self.values
    }
}

/// State key -> per-category value estimates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QTable {
    rows: FxHashMap<String, QRow>,
}

impl QTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The row for a state, if it has been visited.
    #[must_use]
    pub fn row(&self, state_key: &str) -> Option<&QRow> {
        self.rows.get(state_key)
    }

    /// The row for a state, creating it zero-initialized if absent.
    pub fn row_mut(&mut self, state_key: &str) -> &mut QRow {
        self.rows.entry(state_key.to_owned()).or_default()
    }

    /// `max(row(state))`, or 0 for an unvisited state — the same value a
    /// freshly initialized row would produce.
    #[must_use]
    pub fn max_value(&self, state_key: &str) -> f64 {
        self.rows.get(state_key).map_or(0.0, QRow::max)
    }

    /// Replace or insert a full row.
    pub fn insert(&mut self, state_key: String, row: QRow) {
        self.rows.insert(state_key, row);
    }

    /// Iterate all rows; order is insignificant.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QRow)> {
        self.rows.iter().map(|(key, row)| (key.as_str(), row))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_is_all_zero() {
        let mut table = QTable::new();
        let row = table.row_mut("some-state");
        for category in ActionCategory::ALL {
            assert_eq!(row.get(category), 0.0);
        }
    }

    #[test]
    fn test_row_max() {
        let row = QRow::from_values([0.5, -1.0, 2.5, 0.0]);
        assert_eq!(row.max(), 2.5);
    }

    #[test]
    fn test_max_value_of_unvisited_state_is_zero() {
        let table = QTable::new();
        assert_eq!(table.max_value("never-seen"), 0.0);
    }

    #[test]
    fn test_set_then_get() {
        let mut table = QTable::new();
        table.row_mut("s").set(ActionCategory::Capture, 4.0);
        assert_eq!(table.row("s").unwrap().get(ActionCategory::Capture), 4.0);
        assert_eq!(table.row("s").unwrap().get(ActionCategory::Move), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_row_mut_does_not_duplicate() {
        let mut table = QTable::new();
        table.row_mut("s");
        table.row_mut("s");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_iter_sees_all_rows() {
        let mut table = QTable::new();
        table.insert("a".into(), QRow::from_values([1.0, 0.0, 0.0, 0.0]));
        table.insert("b".into(), QRow::from_values([0.0, 2.0, 0.0, 0.0]));

        let mut keys: Vec<&str> = table.iter().map(|(key, _)| key).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
