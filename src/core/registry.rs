//! Publisher Registry: maps venue identifiers and normalized name patterns to
//! a classification and a fee-model reference. Loaded once, immutable after.

use crate::core::fees::FeeSchedule;
use crate::core::normalize::{contains_token_phrase, normalize_venue_name};
use crate::domain::model::{PublisherClassification, RegistryEntry};
use crate::utils::error::{Result, TrackerError};
use std::collections::{HashMap, HashSet};

/// Raw registry input before normalization, one group of names per publisher.
#[derive(Debug, Clone)]
pub struct RegistrySpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub identifiers: Vec<String>,
    pub classification: PublisherClassification,
    pub fee_model_ref: String,
}

/// Which lookup tier produced a match. Identifier matches are authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Identifier,
    NormalizedName,
}

#[derive(Debug, Clone)]
pub struct PublisherRegistry {
    entries: Vec<RegistryEntry>,
    by_identifier: HashMap<String, usize>,
    /// Entry indices ordered most-specific-first (longest normalized key,
    /// ties broken lexicographically) so the name scan is deterministic.
    name_order: Vec<usize>,
}

impl PublisherRegistry {
    pub fn build(specs: &[RegistrySpec], fees: &FeeSchedule) -> Result<Self> {
        let mut entries = Vec::new();
        let mut by_identifier = HashMap::new();
        let mut seen_keys = HashSet::new();

        for spec in specs {
            if !fees.contains(&spec.fee_model_ref) {
                return Err(TrackerError::ConfigError {
                    field: format!("publishers.{}.fee_model", spec.name),
                    message: format!("Unknown fee model reference: {}", spec.fee_model_ref),
                });
            }

            for raw_key in std::iter::once(&spec.name).chain(spec.aliases.iter()) {
                let match_key = normalize_venue_name(raw_key);
                if match_key.is_empty() {
                    return Err(TrackerError::ConfigError {
                        field: format!("publishers.{}", spec.name),
                        message: format!("Match key \"{}\" is empty after normalization", raw_key),
                    });
                }
                if !seen_keys.insert(match_key.clone()) {
                    return Err(TrackerError::ConfigError {
                        field: format!("publishers.{}", spec.name),
                        message: format!("Duplicate match key after normalization: {}", match_key),
                    });
                }
                entries.push(RegistryEntry {
                    match_key,
                    classification: spec.classification,
                    fee_model_ref: spec.fee_model_ref.clone(),
                });
            }

            // Identifiers attach to the publisher's primary entry.
            let primary_index = entries.len() - 1 - spec.aliases.len();
            for identifier in &spec.identifiers {
                let key = identifier.trim().to_lowercase();
                if key.is_empty() {
                    return Err(TrackerError::ConfigError {
                        field: format!("publishers.{}.identifiers", spec.name),
                        message: "Identifier cannot be empty".to_string(),
                    });
                }
                if by_identifier.insert(key.clone(), primary_index).is_some() {
                    return Err(TrackerError::ConfigError {
                        field: format!("publishers.{}.identifiers", spec.name),
                        message: format!("Duplicate venue identifier: {}", key),
                    });
                }
            }
        }

        let mut name_order: Vec<usize> = (0..entries.len()).collect();
        name_order.sort_by(|&a, &b| {
            entries[b]
                .match_key
                .len()
                .cmp(&entries[a].match_key.len())
                .then_with(|| entries[a].match_key.cmp(&entries[b].match_key))
        });

        Ok(Self {
            entries,
            by_identifier,
            name_order,
        })
    }

    /// Identifier exact match first, then first-match-wins scan over the
    /// normalized name patterns. `None` means the caller must treat the
    /// publisher as unknown, never fabricate a classification.
    pub fn lookup(
        &self,
        venue_name: &str,
        venue_identifier: Option<&str>,
    ) -> Option<(&RegistryEntry, MatchTier)> {
        if let Some(identifier) = venue_identifier {
            let key = identifier.trim().to_lowercase();
            if let Some(&index) = self.by_identifier.get(&key) {
                return Some((&self.entries[index], MatchTier::Identifier));
            }
        }

        let normalized = normalize_venue_name(venue_name);
        for &index in &self.name_order {
            if contains_token_phrase(&normalized, &self.entries[index].match_key) {
                return Some((&self.entries[index], MatchTier::NormalizedName));
            }
        }

        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
