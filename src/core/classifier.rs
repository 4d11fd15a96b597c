//! Resolves one publication record to a classified, costed item. Pure: the
//! same record against the same tables always yields the same output.

use crate::core::fees::FeeSchedule;
use crate::core::registry::{MatchTier, PublisherRegistry};
use crate::domain::model::{
    ClassifiedPublication, CostConfidence, PublicationRecord, PublisherClassification,
};

pub struct Classifier<'a> {
    registry: &'a PublisherRegistry,
    fees: &'a FeeSchedule,
}

impl<'a> Classifier<'a> {
    pub fn new(registry: &'a PublisherRegistry, fees: &'a FeeSchedule) -> Self {
        Self { registry, fees }
    }

    /// Tiered resolution: identifier exact match, then normalized-name
    /// fallback, then Unknown. The recorded confidence is the match tier;
    /// the fee stage can only downgrade it to Unknown, never upgrade it.
    pub fn classify(&self, record: &PublicationRecord) -> ClassifiedPublication {
        let matched = self
            .registry
            .lookup(&record.venue_name, record.venue_identifier.as_deref());

        let (classification, fee_model_ref, tier) = match matched {
            Some((entry, tier)) => (
                entry.classification,
                Some(entry.fee_model_ref.as_str()),
                Some(tier),
            ),
            None => (PublisherClassification::Unknown, None, None),
        };

        let (estimated_cents, fee_confidence) =
            self.fees
                .estimate(classification, record.is_open_access, fee_model_ref);

        let confidence = if fee_confidence == CostConfidence::Unknown {
            CostConfidence::Unknown
        } else {
            match tier {
                Some(MatchTier::Identifier) => CostConfidence::Exact,
                Some(MatchTier::NormalizedName) => CostConfidence::Fuzzy,
                None => CostConfidence::Unknown,
            }
        };

        // A source-reported APC beats the table estimate, but only once the
        // publisher is classified; unmatched items keep the zero sentinel.
        let estimated_cost_cents = match (confidence, record.reported_apc_cents) {
            (CostConfidence::Unknown, _) | (_, None) => estimated_cents,
            (_, Some(reported)) => reported,
        };

        ClassifiedPublication {
            record: record.clone(),
            classification,
            estimated_cost_cents,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::RegistrySpec;
    use crate::domain::model::FeeModel;

    fn tables() -> (PublisherRegistry, FeeSchedule) {
        let fees = FeeSchedule::build(
            "USD".to_string(),
            vec![
                FeeModel {
                    model_ref: "standard".to_string(),
                    open_access_fee_cents: 200_000,
                    closed_access_fee_cents: 0,
                },
                FeeModel {
                    model_ref: "society".to_string(),
                    open_access_fee_cents: 80_000,
                    closed_access_fee_cents: 0,
                },
            ],
        )
        .unwrap();

        let registry = PublisherRegistry::build(
            &[
                RegistrySpec {
                    name: "example press".to_string(),
                    aliases: vec![],
                    identifiers: vec![],
                    classification: PublisherClassification::ForProfit,
                    fee_model_ref: "standard".to_string(),
                },
                RegistrySpec {
                    name: "open society journal".to_string(),
                    aliases: vec![],
                    identifiers: vec!["2000-0001".to_string()],
                    classification: PublisherClassification::NonProfit,
                    fee_model_ref: "society".to_string(),
                },
            ],
            &fees,
        )
        .unwrap();

        (registry, fees)
    }

    fn record(venue: &str, identifier: Option<&str>, open_access: bool) -> PublicationRecord {
        PublicationRecord {
            title: None,
            venue_name: venue.to_string(),
            venue_identifier: identifier.map(|s| s.to_string()),
            is_open_access: open_access,
            publication_year: Some(2024),
            reported_apc_cents: None,
        }
    }

    #[test]
    fn test_fuzzy_name_match_example() {
        let (registry, fees) = tables();
        let classifier = Classifier::new(&registry, &fees);

        let item = classifier.classify(&record("Example Press Inc", None, true));

        assert_eq!(item.classification, PublisherClassification::ForProfit);
        assert_eq!(item.estimated_cost_cents, 200_000);
        assert_eq!(item.confidence, CostConfidence::Fuzzy);
    }

    #[test]
    fn test_identifier_tier_beats_name_tier() {
        let (registry, fees) = tables();
        let classifier = Classifier::new(&registry, &fees);

        // Name would resolve ForProfit via "example press", identifier says
        // NonProfit. The identifier is authoritative.
        let item = classifier.classify(&record("Example Press Inc", Some("2000-0001"), true));

        assert_eq!(item.classification, PublisherClassification::NonProfit);
        assert_eq!(item.estimated_cost_cents, 80_000);
        assert_eq!(item.confidence, CostConfidence::Exact);
    }

    #[test]
    fn test_unmatched_record_is_unknown_with_zero_cost() {
        let (registry, fees) = tables();
        let classifier = Classifier::new(&registry, &fees);

        let item = classifier.classify(&record("Obscure Outlet", Some("9999-9999"), true));

        assert_eq!(item.classification, PublisherClassification::Unknown);
        assert_eq!(item.estimated_cost_cents, 0);
        assert_eq!(item.confidence, CostConfidence::Unknown);
    }

    #[test]
    fn test_reported_apc_overrides_table_estimate() {
        let (registry, fees) = tables();
        let classifier = Classifier::new(&registry, &fees);

        let mut rec = record("Example Press Inc", None, true);
        rec.reported_apc_cents = Some(312_550);
        let item = classifier.classify(&rec);

        assert_eq!(item.estimated_cost_cents, 312_550);
        assert_eq!(item.confidence, CostConfidence::Fuzzy);
    }

    #[test]
    fn test_reported_apc_ignored_for_unknown_publisher() {
        let (registry, fees) = tables();
        let classifier = Classifier::new(&registry, &fees);

        let mut rec = record("Obscure Outlet", None, true);
        rec.reported_apc_cents = Some(100_000);
        let item = classifier.classify(&rec);

        // Without a classification the zero sentinel stays so the item is
        // still flagged for review.
        assert_eq!(item.estimated_cost_cents, 0);
        assert_eq!(item.confidence, CostConfidence::Unknown);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let (registry, fees) = tables();
        let classifier = Classifier::new(&registry, &fees);

        let rec = record("Example Press Inc", None, true);
        assert_eq!(classifier.classify(&rec), classifier.classify(&rec));
    }
}
