//! Fee schedule: pure mapping from (classification, open-access status,
//! fee-model reference) to an estimate in integer cents. No floats anywhere
//! in cost arithmetic so aggregated totals stay exact.

use crate::domain::model::{CostConfidence, FeeModel, PublisherClassification};
use crate::utils::error::{Result, TrackerError};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct FeeSchedule {
    models: HashMap<String, FeeModel>,
    currency: String,
}

impl FeeSchedule {
    pub fn build(currency: String, models: Vec<FeeModel>) -> Result<Self> {
        if currency.trim() != "USD" {
            return Err(TrackerError::ConfigError {
                field: "currency".to_string(),
                message: format!("Unsupported base currency: {}", currency),
            });
        }

        let mut table = HashMap::with_capacity(models.len());
        for model in models {
            if model.model_ref.trim().is_empty() {
                return Err(TrackerError::ConfigError {
                    field: "fee_models".to_string(),
                    message: "Fee model reference cannot be empty".to_string(),
                });
            }
            if table.insert(model.model_ref.clone(), model).is_some() {
                return Err(TrackerError::ConfigError {
                    field: "fee_models".to_string(),
                    message: "Duplicate fee model reference".to_string(),
                });
            }
        }

        Ok(Self {
            models: table,
            currency,
        })
    }

    pub fn contains(&self, model_ref: &str) -> bool {
        self.models.contains_key(model_ref)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Deterministic estimate. Unknown classification or an unresolved model
    /// reference yields (0, Unknown); zero cost means "no estimate", never
    /// "verified free".
    pub fn estimate(
        &self,
        classification: PublisherClassification,
        is_open_access: bool,
        fee_model_ref: Option<&str>,
    ) -> (u64, CostConfidence) {
        if classification == PublisherClassification::Unknown {
            return (0, CostConfidence::Unknown);
        }

        match fee_model_ref.and_then(|r| self.models.get(r)) {
            Some(model) => {
                let cents = if is_open_access {
                    model.open_access_fee_cents
                } else {
                    model.closed_access_fee_cents
                };
                (cents, CostConfidence::Exact)
            }
            None => (0, CostConfidence::Unknown),
        }
    }
}
