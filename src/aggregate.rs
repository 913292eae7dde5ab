//! @ai:module:intent Cross-model aggregation of run results by corpus item
//! @ai:module:layer application
//! @ai:module:public_api ResultAggregator, Aggregation, AggregatedRow
//! @ai:module:stateless true

use crate::record::{Record, RunEntry, RunOutcome};
use std::collections::HashMap;

/// @ai:intent One wide comparison row for a single corpus item
///
/// Cells are parallel to the aggregation's model list; a `None` cell is
/// an explicit blank for a model that skipped (or never attempted) the
/// item, so column structure stays uniform across all rows.
#[derive(Debug, Clone)]
pub struct AggregatedRow {
    pub item_id: String,
    cells: Vec<Option<Record>>,
}

impl AggregatedRow {
    /// @ai:intent Cell for the model at the given column index
    /// @ai:effects pure
    pub fn cell(&self, model_index: usize) -> Option<&Record> {
        self.cells.get(model_index).and_then(|c| c.as_ref())
    }

    /// All cells in model column order, blanks included.
    pub fn cells(&self) -> &[Option<Record>] {
        &self.cells
    }

    /// Records present in this row, in model column order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }
}

/// @ai:intent Aggregated view of one run: model columns × item rows
#[derive(Debug, Clone)]
pub struct Aggregation {
    models: Vec<String>,
    rows: Vec<AggregatedRow>,
}

impl Aggregation {
    /// Model ids in invocation order (column order for every row).
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// @ai:intent Re-order rows by corpus-item id
    /// @ai:effects pure
    pub fn sorted_by_id(mut self) -> Self {
        self.rows.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        self
    }
}

/// @ai:intent Groups run entries into wide per-item comparison rows
///
/// Every item that appears in any record or skip gets exactly one row,
/// and every record lands in exactly one cell: the rows partition the
/// run. An item every model failed on still yields a row — with only
/// blank cells — rather than silently disappearing from the report.
///
/// Row order is first appearance in the run's evaluation sequence;
/// model column order is the order models were invoked, not their names.
pub struct ResultAggregator;

impl ResultAggregator {
    /// @ai:intent Create a new aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Aggregate a run outcome by corpus-item id
    /// @ai:effects pure
    pub fn aggregate(&self, outcome: &RunOutcome) -> Aggregation {
        let mut models: Vec<String> = Vec::new();
        let mut item_order: Vec<String> = Vec::new();
        let mut cells: HashMap<(String, String), Record> = HashMap::new();

        for entry in outcome.entries() {
            let model = entry.model().to_string();
            let item_id = entry.item_id().to_string();

            if !models.contains(&model) {
                models.push(model.clone());
            }
            if !item_order.contains(&item_id) {
                item_order.push(item_id.clone());
            }

            if let RunEntry::Recorded(record) = entry {
                cells.insert((item_id, model), record.clone());
            }
        }

        let rows = item_order
            .into_iter()
            .map(|item_id| {
                let cells = models
                    .iter()
                    .map(|model| cells.get(&(item_id.clone(), model.clone())).cloned())
                    .collect();
                AggregatedRow { item_id, cells }
            })
            .collect();

        Aggregation { models, rows }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}
