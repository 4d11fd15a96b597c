pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

pub use crate::adapters::{openalex::OpenAlexClient, storage::LocalStorage};
pub use crate::config::{tables::TablesConfig, CliConfig};
pub use crate::core::{aggregate::aggregate, classifier::Classifier, engine::AnalysisEngine};
pub use crate::domain::model::{
    AnalysisReport, AuthorQuery, CostSummary, PublicationRecord, PublisherClassification,
};
pub use crate::utils::error::{Result, TrackerError};
