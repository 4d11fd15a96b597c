//! Orchestration: resolve the author, fetch their publications, run the
//! classification core, and export the report bundle through the storage
//! port. The core stages themselves are pure; only the edges are async.

use crate::config::tables::Tables;
use crate::core::aggregate::aggregate;
use crate::core::classifier::Classifier;
use crate::domain::model::{AnalysisReport, AuthorQuery};
use crate::domain::ports::{AuthorDirectory, PublicationSource, Storage};
use crate::report;
use crate::utils::error::Result;

pub const REPORT_BUNDLE_NAME: &str = "pubcost_report.zip";

pub struct AnalysisEngine<D: AuthorDirectory, P: PublicationSource, S: Storage> {
    directory: D,
    source: P,
    storage: S,
    tables: Tables,
    max_works: usize,
}

impl<D: AuthorDirectory, P: PublicationSource, S: Storage> AnalysisEngine<D, P, S> {
    pub fn new(directory: D, source: P, storage: S, tables: Tables, max_works: usize) -> Self {
        Self {
            directory,
            source,
            storage,
            tables,
            max_works,
        }
    }

    pub async fn run(&self, query: &AuthorQuery) -> Result<AnalysisReport> {
        tracing::info!("Resolving author from {}", query);
        let author = self.directory.resolve(query).await?;
        tracing::info!(
            "Resolved {} ({}, {} works)",
            author.display_name,
            author.id,
            author.works_count
        );

        tracing::info!("Fetching up to {} publications", self.max_works);
        let records = self
            .source
            .fetch_publications(&author.id, self.max_works)
            .await?;
        let fetched_count = records.len();
        tracing::info!("Fetched {} publication records", fetched_count);

        let (articles, preprints): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|r| !self.tables.is_preprint(&r.venue_name));
        if !preprints.is_empty() {
            tracing::debug!("Excluded {} preprint records", preprints.len());
        }

        let classifier = Classifier::new(&self.tables.registry, &self.tables.fees);
        let summary = aggregate(&classifier, &articles);
        tracing::info!(
            "Classified {} records, {} without a cost estimate",
            summary.analyzed_count(),
            summary.unknown_items.len()
        );

        Ok(AnalysisReport {
            author,
            summary,
            fetched_count,
            skipped_preprints: preprints.len(),
            generated_at: chrono::Utc::now(),
        })
    }

    /// Writes the CSV/JSON bundle through the storage port and returns the
    /// storage-relative bundle name.
    pub async fn export(&self, analysis: &AnalysisReport) -> Result<String> {
        let bundle = report::export_bundle(analysis)?;
        tracing::debug!("Writing report bundle ({} bytes)", bundle.len());
        self.storage.write_file(REPORT_BUNDLE_NAME, &bundle).await?;
        Ok(REPORT_BUNDLE_NAME.to_string())
    }
}
