//! Order-preserving aggregation of classified publications into a summary.
//! All accumulation is integer cents, so the per-classification subtotals
//! always sum exactly to the total.

use crate::core::classifier::Classifier;
use crate::domain::model::{ClassTally, CostConfidence, CostSummary, PublicationRecord};
use std::collections::BTreeMap;

/// Sole entry point of the core: classifies every record in input order and
/// folds the results. Every input record produces exactly one output item;
/// unknown items stay in the totals (contributing zero) and are also listed
/// separately for review. An empty input is a valid all-zero summary.
pub fn aggregate(classifier: &Classifier<'_>, records: &[PublicationRecord]) -> CostSummary {
    let mut items = Vec::with_capacity(records.len());
    let mut by_classification: BTreeMap<_, ClassTally> = BTreeMap::new();
    let mut unknown_items = Vec::new();
    let mut total_estimated_cents = 0u64;

    for record in records {
        let item = classifier.classify(record);

        let tally = by_classification.entry(item.classification).or_default();
        tally.count += 1;
        tally.subtotal_cents += item.estimated_cost_cents;
        total_estimated_cents += item.estimated_cost_cents;

        if item.confidence == CostConfidence::Unknown {
            unknown_items.push(item.clone());
        }
        items.push(item);
    }

    CostSummary {
        total_estimated_cents,
        by_classification,
        unknown_items,
        items,
    }
}
