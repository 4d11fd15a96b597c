use crate::domain::model::{AuthorProfile, AuthorQuery, PublicationRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Resolves a free-text name, ORCID, or provider-specific ID to a canonical
/// author. Fails with `AuthorNotFound` or `AmbiguousAuthor`.
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    async fn resolve(&self, query: &AuthorQuery) -> Result<AuthorProfile>;
}

/// Fetches the ordered publication list for a canonical author ID.
#[async_trait]
pub trait PublicationSource: Send + Sync {
    async fn fetch_publications(
        &self,
        author_id: &str,
        max_works: usize,
    ) -> Result<Vec<PublicationRecord>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
