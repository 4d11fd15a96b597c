use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One publication as fetched from the metadata source. Read-only input to
/// the classification core; all amounts are integer USD cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    pub title: Option<String>,
    pub venue_name: String,
    /// ISSN-L or similar stable venue key, when the source provides one.
    pub venue_identifier: Option<String>,
    pub is_open_access: bool,
    pub publication_year: Option<i32>,
    /// APC the source reports as actually paid, in cents. Overrides the
    /// table estimate when the publisher could be classified.
    pub reported_apc_cents: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublisherClassification {
    ForProfit,
    NonProfit,
    Unknown,
}

impl fmt::Display for PublisherClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublisherClassification::ForProfit => write!(f, "for-profit"),
            PublisherClassification::NonProfit => write!(f, "non-profit"),
            PublisherClassification::Unknown => write!(f, "unknown"),
        }
    }
}

/// How the classification (and therefore the cost estimate) was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostConfidence {
    /// Venue identifier matched a registry entry.
    Exact,
    /// Normalized venue name matched a registry pattern.
    Fuzzy,
    /// No registry or fee-model match; the zero cost is a sentinel for
    /// "no estimate available", not "verified free".
    Unknown,
}

impl fmt::Display for CostConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostConfidence::Exact => write!(f, "exact"),
            CostConfidence::Fuzzy => write!(f, "fuzzy"),
            CostConfidence::Unknown => write!(f, "unknown"),
        }
    }
}

/// A registry row after normalization. `match_key` is unique across the
/// loaded registry; duplicates are rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub match_key: String,
    pub classification: PublisherClassification,
    pub fee_model_ref: String,
}

/// Fee rule for one publisher group, in the fixed base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeModel {
    pub model_ref: String,
    pub open_access_fee_cents: u64,
    pub closed_access_fee_cents: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPublication {
    pub record: PublicationRecord,
    pub classification: PublisherClassification,
    pub estimated_cost_cents: u64,
    pub confidence: CostConfidence,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTally {
    pub count: u64,
    pub subtotal_cents: u64,
}

/// Aggregation result for one ordered batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_estimated_cents: u64,
    pub by_classification: BTreeMap<PublisherClassification, ClassTally>,
    /// Items with no usable estimate, in original input order. They stay in
    /// the totals (contributing zero) so coverage stays transparent.
    pub unknown_items: Vec<ClassifiedPublication>,
    pub items: Vec<ClassifiedPublication>,
}

impl CostSummary {
    pub fn analyzed_count(&self) -> usize {
        self.items.len()
    }

    pub fn tally(&self, classification: PublisherClassification) -> ClassTally {
        self.by_classification
            .get(&classification)
            .copied()
            .unwrap_or_default()
    }

    pub fn for_profit_count(&self) -> u64 {
        self.tally(PublisherClassification::ForProfit).count
    }

    pub fn for_profit_share(&self) -> f64 {
        if self.items.is_empty() {
            0.0
        } else {
            self.for_profit_count() as f64 / self.items.len() as f64 * 100.0
        }
    }
}

/// Canonical author as resolved by the metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: String,
    pub display_name: String,
    pub affiliation: Option<String>,
    pub works_count: u64,
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorQuery {
    Search(String),
    Orcid(String),
    AuthorId(String),
}

impl fmt::Display for AuthorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorQuery::Search(q) => write!(f, "name search \"{}\"", q),
            AuthorQuery::Orcid(o) => write!(f, "ORCID {}", o),
            AuthorQuery::AuthorId(id) => write!(f, "author ID {}", id),
        }
    }
}

/// Full engine output handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub author: AuthorProfile,
    pub summary: CostSummary,
    pub fetched_count: usize,
    pub skipped_preprints: usize,
    pub generated_at: DateTime<Utc>,
}
