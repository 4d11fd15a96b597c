pub mod tables;

use crate::domain::model::AuthorQuery;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "pubcost")]
#[command(about = "Estimate the article-processing costs behind an author's publication record")]
pub struct CliConfig {
    /// Free-text author name search
    #[arg(long, conflicts_with_all = ["orcid", "author_id"])]
    pub search: Option<String>,

    /// ORCID iD, e.g. 0000-0002-1825-0097
    #[arg(long, conflicts_with = "author_id")]
    pub orcid: Option<String>,

    /// OpenAlex author ID, e.g. A5008020290
    #[arg(long)]
    pub author_id: Option<String>,

    /// Path to a TOML registry/fee table; the built-in tables are used when omitted
    #[arg(long)]
    pub tables: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "https://api.openalex.org")]
    pub api_base_url: String,

    /// Contact email forwarded to OpenAlex for their polite pool
    #[arg(long)]
    pub mailto: Option<String>,

    /// Most recent articles to analyze
    #[arg(long, default_value = "100")]
    pub max_works: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn author_query(&self) -> Result<AuthorQuery> {
        if let Some(q) = &self.search {
            Ok(AuthorQuery::Search(q.clone()))
        } else if let Some(o) = &self.orcid {
            Ok(AuthorQuery::Orcid(o.clone()))
        } else if let Some(id) = &self.author_id {
            Ok(AuthorQuery::AuthorId(id.clone()))
        } else {
            Err(TrackerError::ConfigError {
                field: "author".to_string(),
                message: "One of --search, --orcid or --author-id is required".to_string(),
            })
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("max_works", self.max_works, 1)?;
        self.author_query().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_query_selection() {
        let config = CliConfig::parse_from(["pubcost", "--orcid", "0000-0002-1825-0097"]);
        assert_eq!(
            config.author_query().unwrap(),
            AuthorQuery::Orcid("0000-0002-1825-0097".to_string())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_author_query_is_config_error() {
        let config = CliConfig::parse_from(["pubcost"]);
        assert!(config.author_query().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = CliConfig::parse_from([
            "pubcost",
            "--author-id",
            "A123",
            "--api-base-url",
            "not-a-url",
        ]);
        assert!(config.validate().is_err());
    }
}
