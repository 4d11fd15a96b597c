//! TOML-backed registry and fee tables. Loaded once at startup, validated,
//! and turned into the immutable core lookup structures.

use crate::core::fees::FeeSchedule;
use crate::core::normalize::{contains_token_phrase, normalize_venue_name};
use crate::core::registry::{PublisherRegistry, RegistrySpec};
use crate::domain::model::{FeeModel, PublisherClassification};
use crate::utils::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TABLES: &str = include_str!("default_tables.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    pub currency: String,
    #[serde(default)]
    pub preprint_servers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<PublisherConfig>,
    #[serde(default)]
    pub fee_models: HashMap<String, FeeModelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub identifiers: Vec<String>,
    pub classification: PublisherClassification,
    pub fee_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeModelConfig {
    pub open_access_cents: u64,
    #[serde(default)]
    pub closed_access_cents: u64,
}

impl TablesConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigError {
            field: "tables".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// The tables compiled into the binary, derived from a hand-maintained
    /// list of large academic publishers and typical APC levels.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TABLES)
    }

    /// Replaces `${VAR_NAME}` references with environment values; unset
    /// variables are left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Validates and builds the immutable lookup tables. Any duplicate or
    /// dangling reference is fatal here; the process must not serve requests
    /// with an invalid table.
    pub fn build(self) -> Result<Tables> {
        let models = self
            .fee_models
            .into_iter()
            .map(|(model_ref, m)| FeeModel {
                model_ref,
                open_access_fee_cents: m.open_access_cents,
                closed_access_fee_cents: m.closed_access_cents,
            })
            .collect();
        let fees = FeeSchedule::build(self.currency, models)?;

        let specs: Vec<RegistrySpec> = self
            .publishers
            .into_iter()
            .map(|p| RegistrySpec {
                name: p.name,
                aliases: p.aliases,
                identifiers: p.identifiers,
                classification: p.classification,
                fee_model_ref: p.fee_model,
            })
            .collect();
        let registry = PublisherRegistry::build(&specs, &fees)?;

        let mut preprint_servers = Vec::with_capacity(self.preprint_servers.len());
        for raw in &self.preprint_servers {
            let normalized = normalize_venue_name(raw);
            if normalized.is_empty() {
                return Err(TrackerError::ConfigError {
                    field: "preprint_servers".to_string(),
                    message: format!("Entry \"{}\" is empty after normalization", raw),
                });
            }
            preprint_servers.push(normalized);
        }

        Ok(Tables {
            registry,
            fees,
            preprint_servers,
        })
    }
}

/// The loaded, validated lookup state shared (read-only) by all analyses.
#[derive(Debug, Clone)]
pub struct Tables {
    pub registry: PublisherRegistry,
    pub fees: FeeSchedule,
    preprint_servers: Vec<String>,
}

impl Tables {
    /// Preprint servers are excluded from cost analysis before aggregation;
    /// they publish without an APC.
    pub fn is_preprint(&self, venue_name: &str) -> bool {
        let normalized = normalize_venue_name(venue_name);
        self.preprint_servers
            .iter()
            .any(|server| contains_token_phrase(&normalized, server))
    }
}
