//! Configuration management for pagelift.
//!
//! Settings load from environment variables with sensible defaults:
//!
//! - `GEMINI_API_KEY`: vision model credential - required for analysis
//! - `GITHUB_TOKEN`: repository/hosting credential - required to publish
//! - `PAGELIFT_ENVIRONMENT`: environment label reported by the health
//!   endpoint - default: "development"
//! - `PAGELIFT_REQUEST_TIMEOUT`: collaborator timeout in seconds -
//!   default: "30"
//! - `PAGELIFT_STORE_PATH`: project store file - default: "projects.json"
//! - `PAGELIFT_LOG_LEVEL`: logging level - default: "info"

use crate::analysis::{AnalysisAdapter, GeminiVisionClient};
use crate::publish::{GitHubPagesHost, GitHubRepoHost, LoggingHandler, PublishOrchestrator};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORE_PATH: &str = "projects.json";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingGeminiKey,

    #[error("GITHUB_TOKEN is not set")]
    MissingGithubToken,

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error("Component initialization failed: {0}")]
    InitError(String),
}

/// Main configuration structure for pagelift.
#[derive(Debug, Clone)]
pub struct PageliftConfig {
    pub gemini_api_key: String,
    pub github_token: String,
    /// Environment label surfaced by `/api/health`.
    pub environment: String,
    /// Timeout applied to every outbound collaborator call.
    pub request_timeout_secs: u64,
    pub store_path: PathBuf,
    pub log_level: String,
    /// Endpoint overrides, for tests and proxies.
    pub gemini_endpoint: Option<String>,
    pub github_api_base: Option<String>,
}

impl PageliftConfig {
    /// Loads configuration from environment variables with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let request_timeout_secs = match env::var("PAGELIFT_REQUEST_TIMEOUT") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::ParseError {
                field: "PAGELIFT_REQUEST_TIMEOUT".to_string(),
                error: format!("{}", e),
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            github_token: env::var("GITHUB_TOKEN").unwrap_or_default(),
            environment: env::var("PAGELIFT_ENVIRONMENT")
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
            request_timeout_secs,
            store_path: env::var("PAGELIFT_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH)),
            log_level: env::var("PAGELIFT_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            gemini_endpoint: env::var("PAGELIFT_GEMINI_ENDPOINT").ok(),
            github_api_base: env::var("PAGELIFT_GITHUB_API_BASE").ok(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks that both collaborator credentials are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.is_empty() {
            return Err(ConfigError::MissingGeminiKey);
        }
        if self.github_token.is_empty() {
            return Err(ConfigError::MissingGithubToken);
        }
        Ok(())
    }

    /// Builds the analysis adapter from this configuration.
    pub fn create_adapter(&self) -> Result<AnalysisAdapter, ConfigError> {
        if self.gemini_api_key.is_empty() {
            return Err(ConfigError::MissingGeminiKey);
        }
        let mut client = GeminiVisionClient::new(&self.gemini_api_key, self.request_timeout())
            .map_err(|e| ConfigError::InitError(e.to_string()))?;
        if let Some(endpoint) = &self.gemini_endpoint {
            client = client.with_endpoint(endpoint);
        }
        Ok(AnalysisAdapter::new(Arc::new(client)))
    }

    /// Builds the publish orchestrator from this configuration.
    pub fn create_orchestrator(&self) -> Result<PublishOrchestrator, ConfigError> {
        if self.github_token.is_empty() {
            return Err(ConfigError::MissingGithubToken);
        }
        let mut repo_host = GitHubRepoHost::new(&self.github_token, self.request_timeout())
            .map_err(|e| ConfigError::InitError(e.to_string()))?;
        let mut pages_host = GitHubPagesHost::new(&self.github_token, self.request_timeout())
            .map_err(|e| ConfigError::InitError(e.to_string()))?;
        if let Some(api_base) = &self.github_api_base {
            repo_host = repo_host.with_api_base(api_base);
            pages_host = pages_host.with_api_base(api_base);
        }
        Ok(PublishOrchestrator::new(
            Arc::new(repo_host),
            Arc::new(pages_host),
            Arc::new(LoggingHandler),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PageliftConfig {
        PageliftConfig {
            gemini_api_key: "gkey".to_string(),
            github_token: "ghtoken".to_string(),
            environment: "test".to_string(),
            request_timeout_secs: 5,
            store_path: PathBuf::from("projects.json"),
            log_level: "info".to_string(),
            gemini_endpoint: None,
            github_api_base: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_keys() {
        let mut c = config();
        c.gemini_api_key.clear();
        assert!(matches!(c.validate(), Err(ConfigError::MissingGeminiKey)));

        let mut c = config();
        c.github_token.clear();
        assert!(matches!(c.validate(), Err(ConfigError::MissingGithubToken)));
    }

    #[test]
    fn test_create_components() {
        let c = config();
        assert!(c.create_adapter().is_ok());
        assert!(c.create_orchestrator().is_ok());
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(config().request_timeout(), Duration::from_secs(5));
    }
}
