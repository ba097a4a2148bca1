//! Repository- and static-hosting collaborators.
//!
//! `RepoHost` covers step 2 of the pipeline (create a repository and
//! commit the generated site), `PagesHost` covers step 3 (resolve the
//! public URL). The GitHub implementations talk to the REST API; the
//! deploy itself is delegated to GitHub Pages.

use super::error::PublishError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "pagelift";

/// Creates repositories and pushes site content to them.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Creates a repository named after the slug and returns its URL.
    async fn create_repo(&self, slug: &str) -> Result<String, PublishError>;

    /// Commits the generated site artifact to the repository.
    async fn push_site(&self, slug: &str, html: &str) -> Result<(), PublishError>;

    fn name(&self) -> &str;
}

/// Resolves the publicly reachable URL for pushed content.
#[async_trait]
pub trait PagesHost: Send + Sync {
    /// `Ok(Some(url))` when the host resolved a URL, `Ok(None)` when it
    /// answered but could not produce one (the orchestrator then
    /// synthesizes a deterministic URL from the slug), `Err` on a
    /// genuine fault.
    async fn resolve_url(&self, slug: &str) -> Result<Option<String>, PublishError>;

    fn name(&self) -> &str;
}

pub struct GitHubRepoHost {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl GitHubRepoHost {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, PublishError> {
        let http = build_client(timeout)?;
        Ok(Self {
            http,
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Overrides the API base URL, for tests.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn login(&self) -> Result<String, PublishError> {
        let response = self
            .http
            .get(format!("{}/user", self.api_base))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| PublishError::RepoHost(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PublishError::RepoHost(format!(
                "Failed to authenticate with repository host: {}",
                response.status()
            )));
        }

        let user: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PublishError::RepoHost(e.to_string()))?;
        user["login"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| PublishError::RepoHost("user info has no login".to_string()))
    }
}

#[async_trait]
impl RepoHost for GitHubRepoHost {
    async fn create_repo(&self, slug: &str) -> Result<String, PublishError> {
        debug!(slug, "Creating repository");
        let response = self
            .http
            .post(format!("{}/user/repos", self.api_base))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
            .json(&json!({
                "name": slug,
                "description": "Landing page generated by pagelift",
                "homepage": format!("https://{}.pages.dev", slug),
                "auto_init": true,
            }))
            .send()
            .await
            .map_err(|e| PublishError::RepoHost(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(slug, %status, "Repository creation failed: {}", body);
            return Err(PublishError::RepoHost(format!(
                "Failed to create repository ({}): {}",
                status, body
            )));
        }

        let repo: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PublishError::RepoHost(e.to_string()))?;
        repo["html_url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| PublishError::RepoHost("repository response has no html_url".to_string()))
    }

    async fn push_site(&self, slug: &str, html: &str) -> Result<(), PublishError> {
        let login = self.login().await?;
        debug!(slug, owner = %login, "Pushing site content");

        let response = self
            .http
            .put(format!(
                "{}/repos/{}/{}/contents/index.html",
                self.api_base, login, slug
            ))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
            .json(&json!({
                "message": "Publish landing page",
                "content": BASE64.encode(html),
            }))
            .send()
            .await
            .map_err(|e| PublishError::RepoHost(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::RepoHost(format!(
                "Failed to push files ({}): {}",
                status, body
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "GitHubRepoHost"
    }
}

/// Resolves GitHub Pages URLs of the form
/// `https://{login}.github.io/{slug}/`.
pub struct GitHubPagesHost {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl GitHubPagesHost {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, PublishError> {
        let http = build_client(timeout)?;
        Ok(Self {
            http,
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl PagesHost for GitHubPagesHost {
    async fn resolve_url(&self, slug: &str) -> Result<Option<String>, PublishError> {
        let response = self
            .http
            .get(format!("{}/user", self.api_base))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| PublishError::PagesHost(e.to_string()))?;

        if !response.status().is_success() {
            // The host answered but cannot tell us the URL; the
            // orchestrator falls back to a synthesized one.
            warn!(slug, status = %response.status(), "Could not resolve deployment URL");
            return Ok(None);
        }

        let user: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PublishError::PagesHost(e.to_string()))?;
        Ok(user["login"]
            .as_str()
            .map(|login| format!("https://{}.github.io/{}/", login, slug)))
    }

    fn name(&self) -> &str {
        "GitHubPagesHost"
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, PublishError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| PublishError::RepoHost(format!("failed to build HTTP client: {}", e)))
}
