//! Scriptable hosting collaborators for tests.

use super::error::PublishError;
use super::hosts::{PagesHost, RepoHost};
use async_trait::async_trait;
use std::sync::Mutex;

/// Repository host that records calls and can be told to fail either
/// step with a fixed message.
#[derive(Default)]
pub struct MockRepoHost {
    pub fail_create: Option<String>,
    pub fail_push: Option<String>,
    created: Mutex<Vec<String>>,
    pushed: Mutex<Vec<String>>,
}

impl MockRepoHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(message: impl Into<String>) -> Self {
        Self {
            fail_create: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn failing_push(message: impl Into<String>) -> Self {
        Self {
            fail_push: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn created_repos(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn pushed_repos(&self) -> Vec<String> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoHost for MockRepoHost {
    async fn create_repo(&self, slug: &str) -> Result<String, PublishError> {
        if let Some(message) = &self.fail_create {
            return Err(PublishError::RepoHost(message.clone()));
        }
        self.created.lock().unwrap().push(slug.to_string());
        Ok(format!("https://github.com/mock/{}", slug))
    }

    async fn push_site(&self, slug: &str, _html: &str) -> Result<(), PublishError> {
        if let Some(message) = &self.fail_push {
            return Err(PublishError::RepoHost(message.clone()));
        }
        self.pushed.lock().unwrap().push(slug.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "MockRepoHost"
    }
}

/// Outcomes a [`MockPagesHost`] can replay.
pub enum MockPagesOutcome {
    Resolved(String),
    Unresolved,
    Fault(String),
}

pub struct MockPagesHost {
    outcome: MockPagesOutcome,
    calls: Mutex<Vec<String>>,
}

impl MockPagesHost {
    pub fn resolving(url: impl Into<String>) -> Self {
        Self {
            outcome: MockPagesOutcome::Resolved(url.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            outcome: MockPagesOutcome::Unresolved,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: MockPagesOutcome::Fault(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PagesHost for MockPagesHost {
    async fn resolve_url(&self, slug: &str) -> Result<Option<String>, PublishError> {
        self.calls.lock().unwrap().push(slug.to_string());
        match &self.outcome {
            MockPagesOutcome::Resolved(url) => Ok(Some(url.clone())),
            MockPagesOutcome::Unresolved => Ok(None),
            MockPagesOutcome::Fault(message) => Err(PublishError::PagesHost(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "MockPagesHost"
    }
}
