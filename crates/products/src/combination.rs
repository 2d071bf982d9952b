//! Cartesian expansion of selected variant axes into concrete variants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use archery_core::{ValueObject, VariantAxisId, VariantValueId};

use crate::axis::{VariantAxis, VariantValue};

/// Reference to a chosen value, by id or by (case-insensitive) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueRef {
    Id(VariantValueId),
    Name(String),
}

/// Values chosen for one axis of one product. Built by the caller per expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedVariantSpec {
    pub axis_id: VariantAxisId,
    pub values: Vec<ValueRef>,
}

impl SelectedVariantSpec {
    pub fn by_ids(axis_id: VariantAxisId, ids: impl IntoIterator<Item = VariantValueId>) -> Self {
        Self {
            axis_id,
            values: ids.into_iter().map(ValueRef::Id).collect(),
        }
    }

    pub fn by_names<S: Into<String>>(axis_id: VariantAxisId, names: impl IntoIterator<Item = S>) -> Self {
        Self {
            axis_id,
            values: names.into_iter().map(|n| ValueRef::Name(n.into())).collect(),
        }
    }

    /// Resolve references against the axis, dropping unknown ones and repeats.
    fn resolve<'a>(&self, axis: &'a VariantAxis) -> Vec<&'a VariantValue> {
        let mut seen = HashSet::new();
        self.values
            .iter()
            .filter_map(|r| match r {
                ValueRef::Id(id) => axis.value(*id),
                ValueRef::Name(name) => axis.value_by_name(name),
            })
            .filter(|v| seen.insert(v.id))
            .collect()
    }
}

/// One (axis, value) assignment inside a combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationEntry {
    pub axis_id: VariantAxisId,
    pub axis_name: String,
    pub value_id: VariantValueId,
    pub value_name: String,
    pub value_code: Option<String>,
    /// Display order of the axis.
    pub order: i32,
    /// Display order of the value within its axis.
    pub value_order: i32,
}

impl CombinationEntry {
    fn new(axis: &VariantAxis, value: &VariantValue) -> Self {
        Self {
            axis_id: axis.id,
            axis_name: axis.name.clone(),
            value_id: value.id,
            value_name: value.name.clone(),
            value_code: value.code.clone(),
            order: axis.display_order,
            value_order: value.display_order,
        }
    }
}

/// Exactly one concrete product variant: one entry per applied axis, in
/// selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCombination {
    entries: Vec<CombinationEntry>,
}

impl ValueObject for VariantCombination {}

impl VariantCombination {
    pub fn entries(&self) -> &[CombinationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by axis display order, value display order breaking ties.
    /// Stable, so equal orders keep selection order.
    pub fn sorted_entries(&self) -> Vec<&CombinationEntry> {
        let mut sorted: Vec<&CombinationEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| (e.order, e.value_order));
        sorted
    }

    pub fn value_for(&self, axis_id: VariantAxisId) -> Option<&CombinationEntry> {
        self.entries.iter().find(|e| e.axis_id == axis_id)
    }

    fn extended(&self, entry: CombinationEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(entry);
        Self { entries }
    }
}

/// Expand the selection into the full cross-product of combinations.
///
/// Axes are taken in the order supplied; the output is nested in that same
/// order (first axis outermost), which keeps index-based code assignment
/// reproducible. A value referenced more than once within an axis counts
/// once, so an axis contributes its number of distinct resolved values to the
/// product. Axes missing from the catalog, axes repeated in the
/// selection, and axes whose references all fail to resolve are skipped. If no
/// axis applies, there is nothing to materialize and the result is empty.
///
/// The result size is the product of the per-axis selection sizes; bounding
/// it is up to the caller.
pub fn expand(selected: &[SelectedVariantSpec], catalog: &[VariantAxis]) -> Vec<VariantCombination> {
    let mut combinations = vec![VariantCombination::default()];
    let mut applied = HashSet::new();
    let mut skipped = 0usize;

    for spec in selected {
        let Some(axis) = catalog.iter().find(|a| a.id == spec.axis_id) else {
            skipped += 1;
            continue;
        };
        if applied.contains(&axis.id) {
            skipped += 1;
            continue;
        }
        let values = spec.resolve(axis);
        if values.is_empty() {
            skipped += 1;
            continue;
        }
        applied.insert(axis.id);

        combinations = combinations
            .iter()
            .flat_map(|prefix| {
                values
                    .iter()
                    .map(move |value| prefix.extended(CombinationEntry::new(axis, value)))
            })
            .collect();
    }

    debug!(
        applied = applied.len(),
        skipped,
        combinations = if applied.is_empty() { 0 } else { combinations.len() },
        "expanded variant selection"
    );

    if applied.is_empty() {
        return Vec::new();
    }
    combinations
}
