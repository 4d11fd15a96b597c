//! Engine orchestration tests with in-memory collaborators: author
//! resolution, preprint exclusion, aggregation, and the exported bundle.

use async_trait::async_trait;
use pubcost::core::engine::REPORT_BUNDLE_NAME;
use pubcost::domain::model::{AuthorProfile, AuthorQuery, PublicationRecord};
use pubcost::domain::ports::{AuthorDirectory, PublicationSource, Storage};
use pubcost::utils::error::{Result, TrackerError};
use pubcost::{AnalysisEngine, PublisherClassification, TablesConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

struct MockDirectory {
    profile: AuthorProfile,
}

#[async_trait]
impl AuthorDirectory for MockDirectory {
    async fn resolve(&self, _query: &AuthorQuery) -> Result<AuthorProfile> {
        Ok(self.profile.clone())
    }
}

struct MockSource {
    records: Vec<PublicationRecord>,
}

#[async_trait]
impl PublicationSource for MockSource {
    async fn fetch_publications(
        &self,
        _author_id: &str,
        max_works: usize,
    ) -> Result<Vec<PublicationRecord>> {
        Ok(self.records.iter().take(max_works).cloned().collect())
    }
}

#[derive(Clone)]
struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockStorage {
    fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            TrackerError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

fn record(venue: &str, open_access: bool) -> PublicationRecord {
    PublicationRecord {
        title: Some(format!("Paper in {}", venue)),
        venue_name: venue.to_string(),
        venue_identifier: None,
        is_open_access: open_access,
        publication_year: Some(2023),
        reported_apc_cents: None,
    }
}

fn author() -> AuthorProfile {
    AuthorProfile {
        id: "A123".to_string(),
        display_name: "Jane Doe".to_string(),
        affiliation: Some("UCL".to_string()),
        works_count: 4,
        orcid: None,
    }
}

#[tokio::test]
async fn test_run_classifies_and_excludes_preprints() {
    let tables = TablesConfig::builtin().unwrap().build().unwrap();
    let records = vec![
        record("Elsevier BV", true),
        record("bioRxiv", true),
        record("Public Library of Science", true),
        record("Totally Obscure Press", true),
    ];
    let engine = AnalysisEngine::new(
        MockDirectory { profile: author() },
        MockSource { records },
        MockStorage::new(),
        tables,
        100,
    );

    let analysis = engine
        .run(&AuthorQuery::AuthorId("A123".to_string()))
        .await
        .unwrap();

    assert_eq!(analysis.fetched_count, 4);
    assert_eq!(analysis.skipped_preprints, 1);
    assert_eq!(analysis.summary.analyzed_count(), 3);
    assert_eq!(
        analysis
            .summary
            .tally(PublisherClassification::ForProfit)
            .count,
        1
    );
    assert_eq!(
        analysis
            .summary
            .tally(PublisherClassification::NonProfit)
            .count,
        1
    );
    assert_eq!(analysis.summary.unknown_items.len(), 1);
    // Elsevier 3000 USD + PLOS 1700 USD, unknown contributes zero.
    assert_eq!(analysis.summary.total_estimated_cents, 470_000);
}

#[tokio::test]
async fn test_run_respects_max_works() {
    let tables = TablesConfig::builtin().unwrap().build().unwrap();
    let records = vec![
        record("Elsevier BV", true),
        record("Wiley", true),
        record("MDPI", true),
    ];
    let engine = AnalysisEngine::new(
        MockDirectory { profile: author() },
        MockSource { records },
        MockStorage::new(),
        tables,
        2,
    );

    let analysis = engine
        .run(&AuthorQuery::AuthorId("A123".to_string()))
        .await
        .unwrap();
    assert_eq!(analysis.fetched_count, 2);
}

#[tokio::test]
async fn test_export_writes_bundle_through_storage() {
    let tables = TablesConfig::builtin().unwrap().build().unwrap();
    let storage = MockStorage::new();
    let engine = AnalysisEngine::new(
        MockDirectory { profile: author() },
        MockSource {
            records: vec![record("Elsevier BV", true)],
        },
        storage.clone(),
        tables,
        100,
    );

    let analysis = engine
        .run(&AuthorQuery::AuthorId("A123".to_string()))
        .await
        .unwrap();
    let bundle_name = engine.export(&analysis).await.unwrap();
    assert_eq!(bundle_name, REPORT_BUNDLE_NAME);

    let bundle = storage.get_file(REPORT_BUNDLE_NAME).await.unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bundle)).unwrap();

    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["publications.csv", "summary.csv", "summary.json"]);

    let summary_json = {
        let mut file = archive.by_name("summary.json").unwrap();
        let mut content = String::new();
        std::io::Read::read_to_string(&mut file, &mut content).unwrap();
        content
    };
    let parsed: serde_json::Value = serde_json::from_str(&summary_json).unwrap();
    assert_eq!(parsed["author"]["display_name"], "Jane Doe");
    assert_eq!(parsed["summary"]["total_estimated_cents"], 300_000);
}

#[tokio::test]
async fn test_empty_publication_list_still_reports() {
    let tables = TablesConfig::builtin().unwrap().build().unwrap();
    let engine = AnalysisEngine::new(
        MockDirectory { profile: author() },
        MockSource { records: vec![] },
        MockStorage::new(),
        tables,
        100,
    );

    let analysis = engine
        .run(&AuthorQuery::AuthorId("A123".to_string()))
        .await
        .unwrap();
    assert_eq!(analysis.summary.total_estimated_cents, 0);
    assert!(analysis.summary.unknown_items.is_empty());
}
