//! OpenAlex HTTP adapter: author resolution and publication fetch. Maps the
//! OpenAlex work shape onto [`PublicationRecord`], including the publisher
//! fallback chain (work publisher, then host organization, then source
//! display name, then secondary locations).

use crate::domain::model::{AuthorProfile, AuthorQuery, PublicationRecord};
use crate::domain::ports::{AuthorDirectory, PublicationSource};
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.openalex.org";

/// OpenAlex caps per-page at 200.
const MAX_PER_PAGE: usize = 200;

#[derive(Debug, Clone)]
pub struct OpenAlexClient {
    client: Client,
    base_url: String,
    mailto: Option<String>,
}

impl OpenAlexClient {
    pub fn new(mailto: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), mailto)
    }

    pub fn with_base_url(base_url: String, mailto: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            mailto,
        }
    }

    /// Accepts bare IDs, lowercase IDs, and full OpenAlex URLs; always yields
    /// the canonical `A`-prefixed form.
    pub fn clean_author_id(raw: &str) -> String {
        let id = match raw.rsplit_once('/') {
            Some((_, tail)) if raw.contains("openalex.org") => tail,
            _ => raw,
        };
        format!("A{}", id.trim().trim_start_matches(['A', 'a']))
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url).query(query);
        if let Some(mailto) = &self.mailto {
            request = request.query(&[("mailto", mailto.as_str())]);
        }
        Ok(request.send().await?)
    }

    async fn search_authors(&self, query: &str) -> Result<Vec<ApiAuthor>> {
        let response = self
            .get("/authors", &[("search", query), ("per-page", "10")])
            .await?
            .error_for_status()?;
        let body: AuthorsResponse = response.json().await?;
        Ok(body.results)
    }

    async fn author_by_orcid(&self, orcid: &str) -> Result<Option<ApiAuthor>> {
        let filter = format!("orcid:{}", orcid);
        let response = self
            .get("/authors", &[("filter", filter.as_str())])
            .await?
            .error_for_status()?;
        let body: AuthorsResponse = response.json().await?;
        Ok(body.results.into_iter().next())
    }

    async fn author_by_id(&self, author_id: &str) -> Result<Option<ApiAuthor>> {
        let path = format!("/authors/{}", author_id);
        let response = self.get(&path, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let author: ApiAuthor = response.error_for_status()?.json().await?;
        Ok(Some(author))
    }
}

#[async_trait]
impl AuthorDirectory for OpenAlexClient {
    async fn resolve(&self, query: &AuthorQuery) -> Result<AuthorProfile> {
        match query {
            AuthorQuery::Search(name) => {
                let mut candidates = self.search_authors(name).await?;
                match candidates.len() {
                    0 => Err(TrackerError::AuthorNotFound {
                        query: query.to_string(),
                    }),
                    1 => Ok(candidates.remove(0).into_profile()),
                    _ => Err(TrackerError::AmbiguousAuthor {
                        query: name.clone(),
                        candidates: candidates.iter().map(ApiAuthor::describe).collect(),
                    }),
                }
            }
            AuthorQuery::Orcid(orcid) => self
                .author_by_orcid(orcid)
                .await?
                .map(ApiAuthor::into_profile)
                .ok_or_else(|| TrackerError::AuthorNotFound {
                    query: query.to_string(),
                }),
            AuthorQuery::AuthorId(raw_id) => {
                let author_id = Self::clean_author_id(raw_id);
                self.author_by_id(&author_id)
                    .await?
                    .map(ApiAuthor::into_profile)
                    .ok_or_else(|| TrackerError::AuthorNotFound {
                        query: query.to_string(),
                    })
            }
        }
    }
}

#[async_trait]
impl PublicationSource for OpenAlexClient {
    async fn fetch_publications(
        &self,
        author_id: &str,
        max_works: usize,
    ) -> Result<Vec<PublicationRecord>> {
        let filter = format!("author.id:{},type:article", author_id);
        let per_page = max_works.min(MAX_PER_PAGE).to_string();
        let response = self
            .get(
                "/works",
                &[
                    ("filter", filter.as_str()),
                    ("per-page", per_page.as_str()),
                    ("sort", "publication_date:desc"),
                ],
            )
            .await?
            .error_for_status()?;
        let body: WorksResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .take(max_works)
            .map(ApiWork::into_record)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct AuthorsResponse {
    #[serde(default)]
    results: Vec<ApiAuthor>,
}

#[derive(Debug, Deserialize)]
struct ApiAuthor {
    id: String,
    display_name: Option<String>,
    works_count: Option<u64>,
    orcid: Option<String>,
    #[serde(default)]
    last_known_institutions: Vec<ApiInstitution>,
}

#[derive(Debug, Deserialize)]
struct ApiInstitution {
    display_name: Option<String>,
}

impl ApiAuthor {
    fn short_id(&self) -> String {
        self.id.rsplit('/').next().unwrap_or(&self.id).to_string()
    }

    fn affiliation(&self) -> Option<String> {
        self.last_known_institutions
            .first()
            .and_then(|inst| inst.display_name.clone())
    }

    fn describe(&self) -> String {
        format!(
            "{} - {} ({} works, {})",
            self.display_name.as_deref().unwrap_or("Unknown"),
            self.affiliation()
                .unwrap_or_else(|| "Unknown affiliation".to_string()),
            self.works_count.unwrap_or(0),
            self.short_id(),
        )
    }

    fn into_profile(self) -> AuthorProfile {
        AuthorProfile {
            id: self.short_id(),
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            affiliation: self.affiliation(),
            works_count: self.works_count.unwrap_or(0),
            orcid: self.orcid,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    results: Vec<ApiWork>,
}

#[derive(Debug, Deserialize)]
struct ApiWork {
    title: Option<String>,
    publisher: Option<String>,
    publication_year: Option<i32>,
    open_access: Option<ApiOpenAccess>,
    apc_paid: Option<ApiApc>,
    primary_location: Option<ApiLocation>,
    #[serde(default)]
    locations: Vec<ApiLocation>,
}

#[derive(Debug, Deserialize)]
struct ApiOpenAccess {
    is_oa: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ApiApc {
    value_usd: Option<u64>,
    value: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    source: Option<ApiSource>,
}

#[derive(Debug, Deserialize)]
struct ApiSource {
    display_name: Option<String>,
    host_organization_name: Option<String>,
    issn_l: Option<String>,
}

impl ApiWork {
    fn venue_name(&self) -> String {
        if let Some(publisher) = non_empty(self.publisher.as_deref()) {
            return publisher;
        }
        for location in self.primary_location.iter().chain(self.locations.iter()) {
            if let Some(source) = &location.source {
                if let Some(host) = non_empty(source.host_organization_name.as_deref()) {
                    return host;
                }
                if let Some(name) = non_empty(source.display_name.as_deref()) {
                    return name;
                }
            }
        }
        "unknown".to_string()
    }

    fn venue_identifier(&self) -> Option<String> {
        self.primary_location
            .iter()
            .chain(self.locations.iter())
            .filter_map(|loc| loc.source.as_ref())
            .find_map(|source| non_empty(source.issn_l.as_deref()))
    }

    fn into_record(self) -> PublicationRecord {
        PublicationRecord {
            venue_name: self.venue_name(),
            venue_identifier: self.venue_identifier(),
            is_open_access: self
                .open_access
                .as_ref()
                .and_then(|oa| oa.is_oa)
                .unwrap_or(false),
            publication_year: self.publication_year,
            reported_apc_cents: self
                .apc_paid
                .as_ref()
                .and_then(|apc| apc.value_usd.or(apc.value))
                .map(|dollars| dollars * 100),
            title: self.title,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
