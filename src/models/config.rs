//! Configuration model loaded from external sources.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::DEFAULT_SIMILARITY_THRESHOLD;
use crate::domain::profile::ConnectionLevel;
use crate::processing::classifier::MatchMode;
use crate::processing::pipeline::{PipelineConfig, QueryStrategy};
use crate::search::MAX_PAGE_SIZE;
use crate::search::google::{DEFAULT_ENDPOINT, GoogleSearchConfig};

/// File read when `PROFILES_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Clone, Debug, Deserialize)]
/// Settings for one process: provider credentials plus matching defaults.
pub struct AppConfig {
    pub google_api_key: String,
    pub google_cse_id: String,
    pub search_endpoint: String,
    pub request_timeout_secs: u64,
    pub profile_domain: String,
    pub default_location: String,
    pub default_limit: usize,
    pub page_size: usize,
    pub similarity_threshold: f64,
    pub match_mode: MatchMode,
    pub query_strategy: QueryStrategy,
    pub stop_on_empty_first_query: bool,
    pub connection_level: ConnectionLevel,
    pub export_dir: PathBuf,
}

impl AppConfig {
    /// Loads settings from an optional YAML file, then `PROFILES_*`
    /// variables, then the `GOOGLE_API_KEY` / `GOOGLE_CSE_ID` credentials.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("google_api_key", "")?
            .set_default("google_cse_id", "")?
            .set_default("search_endpoint", DEFAULT_ENDPOINT)?
            .set_default("request_timeout_secs", 10)?
            .set_default("profile_domain", "linkedin.com")?
            .set_default("default_location", "Hong Kong")?
            .set_default("default_limit", 10)?
            .set_default("page_size", MAX_PAGE_SIZE as u64)?
            .set_default("similarity_threshold", DEFAULT_SIMILARITY_THRESHOLD)?
            .set_default("match_mode", "strict")?
            .set_default("query_strategy", "broad")?
            .set_default("stop_on_empty_first_query", true)?
            .set_default("connection_level", "2nd")?
            .set_default("export_dir", "exports")?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("PROFILES").try_parsing(true))
            .set_override_option("google_api_key", std::env::var("GOOGLE_API_KEY").ok())?
            .set_override_option("google_cse_id", std::env::var("GOOGLE_CSE_ID").ok())?
            .build()?
            .try_deserialize()
    }

    /// Fails when the provider credentials are missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.google_api_key.trim().is_empty() || self.google_cse_id.trim().is_empty() {
            return Err(ConfigError::Message(
                "missing GOOGLE_API_KEY and/or GOOGLE_CSE_ID".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            profile_domain: self.profile_domain.clone(),
            default_location: self.default_location.clone(),
            default_limit: self.default_limit,
            page_size: self.page_size.min(MAX_PAGE_SIZE),
            similarity_threshold: self.similarity_threshold,
            match_mode: self.match_mode,
            query_strategy: self.query_strategy,
            stop_on_empty_first_query: self.stop_on_empty_first_query,
            connection_level: self.connection_level,
        }
    }

    pub fn google(&self) -> GoogleSearchConfig {
        GoogleSearchConfig {
            api_key: self.google_api_key.clone(),
            cse_id: self.google_cse_id.clone(),
            endpoint: self.search_endpoint.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
