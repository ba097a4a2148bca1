//! The publish orchestrator.
//!
//! Executes generate → push → deploy strictly in order, updating the
//! [`PublishRun`] status before each step so observers can mirror
//! progress. A failed step halts the run; there is no retry and no
//! rollback of a repository created before the failure (a fresh run
//! starts again from step 1).

use super::error::PublishError;
use super::hosts::{PagesHost, RepoHost};
use super::progress::{PublishEvent, PublishHandler};
use super::slug::repo_slug;
use crate::model::{now_millis, Project, ProjectStatus, PublishContent};
use crate::render::render_landing_page;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Status of a publish run. Observers may assume statuses only ever
/// move forward through the pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Idle,
    Generating,
    Pushing,
    Deploying,
    Completed,
    Failed,
}

/// One execution of the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishRun {
    pub status: PublishStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PublishRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a step is executing; a new run must not start.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            PublishStatus::Generating | PublishStatus::Pushing | PublishStatus::Deploying
        )
    }
}

pub struct PublishOrchestrator {
    repo_host: Arc<dyn RepoHost>,
    pages_host: Arc<dyn PagesHost>,
    handler: Arc<dyn PublishHandler>,
}

impl PublishOrchestrator {
    pub fn new(
        repo_host: Arc<dyn RepoHost>,
        pages_host: Arc<dyn PagesHost>,
        handler: Arc<dyn PublishHandler>,
    ) -> Self {
        Self {
            repo_host,
            pages_host,
            handler,
        }
    }

    /// Runs the pipeline to completion. `prior` carries the project
    /// being edited, whose `id` and `created_at` (and nothing else)
    /// survive into the result; `None` means a brand-new project.
    pub async fn run(
        &self,
        content: &PublishContent,
        prior: Option<&Project>,
        run: &mut PublishRun,
    ) -> Result<Project, PublishError> {
        if run.is_active() {
            return Err(PublishError::RunInProgress);
        }
        *run = PublishRun::new();

        let start = Instant::now();
        let slug = repo_slug(&content.business_name);
        info!(slug, business = %content.business_name, "Starting publish run");
        self.handler
            .on_event(&PublishEvent::RunStarted { slug: slug.clone() });

        // Step 1: generate. Pure; malformed input is a programming
        // error, not a runtime fault.
        let step_start = Instant::now();
        self.step(run, PublishStatus::Generating);
        let html = render_landing_page(content);
        self.handler.on_event(&PublishEvent::StepComplete {
            step: PublishStatus::Generating,
            duration: step_start.elapsed(),
        });
        debug!(bytes = html.len(), "Site artifact generated");

        // Step 2: push. Create the repository, then commit the artifact.
        let step_start = Instant::now();
        self.step(run, PublishStatus::Pushing);
        let repo_url = match self.push(&slug, &html).await {
            Ok(url) => url,
            Err(e) => return Err(self.fail(run, e)),
        };
        self.handler.on_event(&PublishEvent::StepComplete {
            step: PublishStatus::Pushing,
            duration: step_start.elapsed(),
        });

        // Step 3: deploy. An unresolved URL falls back to one
        // synthesized from the slug; a host fault fails the run.
        let step_start = Instant::now();
        self.step(run, PublishStatus::Deploying);
        let published_url = match self.pages_host.resolve_url(&slug).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                let fallback = format!("https://{}.pages.dev", slug);
                debug!(slug, url = %fallback, "Host could not resolve URL, synthesized fallback");
                fallback
            }
            Err(e) => return Err(self.fail(run, e)),
        };
        self.handler.on_event(&PublishEvent::StepComplete {
            step: PublishStatus::Deploying,
            duration: step_start.elapsed(),
        });

        // Step 4: completed. Assemble the final project, preserving
        // identity when editing.
        self.step(run, PublishStatus::Completed);
        let project = Project {
            id: prior
                .map(|p| p.id.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            business_name: content.business_name.clone(),
            image_url: content.image_url.clone(),
            headline: content.headline.clone(),
            story: content.story.clone(),
            phone: content.phone.clone(),
            location: content.location.clone(),
            template_id: content.template_id,
            status: ProjectStatus::Published,
            published_url: Some(published_url.clone()),
            repo_url: Some(repo_url),
            created_at: prior.map(|p| p.created_at).unwrap_or_else(now_millis),
        };

        info!(slug, url = %published_url, "Publish run complete");
        self.handler.on_event(&PublishEvent::RunCompleted {
            url: published_url,
            total_time: start.elapsed(),
        });
        Ok(project)
    }

    async fn push(&self, slug: &str, html: &str) -> Result<String, PublishError> {
        let repo_url = self.repo_host.create_repo(slug).await?;
        self.repo_host.push_site(slug, html).await?;
        Ok(repo_url)
    }

    fn step(&self, run: &mut PublishRun, status: PublishStatus) {
        run.status = status;
        self.handler
            .on_event(&PublishEvent::StepStarted { step: status });
    }

    fn fail(&self, run: &mut PublishRun, error: PublishError) -> PublishError {
        run.status = PublishStatus::Failed;
        run.error = Some(error.to_string());
        self.handler.on_event(&PublishEvent::RunFailed {
            error: error.to_string(),
        });
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplateId;
    use crate::publish::mock::{MockPagesHost, MockRepoHost};
    use crate::publish::progress::NoOpHandler;

    fn content() -> PublishContent {
        PublishContent {
            business_name: "Oase Coffee Lab".to_string(),
            headline: "Slow mornings, bold brews".to_string(),
            story: "Beans roasted in-house.".to_string(),
            phone: "628123456789".to_string(),
            image_url: "https://example.com/photo.jpg".to_string(),
            location: None,
            template_id: TemplateId::Culinary,
        }
    }

    fn orchestrator(
        repo: MockRepoHost,
        pages: MockPagesHost,
    ) -> (PublishOrchestrator, Arc<MockRepoHost>, Arc<MockPagesHost>) {
        let repo = Arc::new(repo);
        let pages = Arc::new(pages);
        let orchestrator = PublishOrchestrator::new(
            repo.clone() as Arc<dyn RepoHost>,
            pages.clone() as Arc<dyn PagesHost>,
            Arc::new(NoOpHandler),
        );
        (orchestrator, repo, pages)
    }

    #[tokio::test]
    async fn test_successful_run_produces_published_project() {
        let (orchestrator, repo, _pages) = orchestrator(
            MockRepoHost::new(),
            MockPagesHost::resolving("https://mock.github.io/oase-coffee-lab/"),
        );
        let mut run = PublishRun::new();

        let project = orchestrator.run(&content(), None, &mut run).await.unwrap();

        assert_eq!(run.status, PublishStatus::Completed);
        assert!(run.error.is_none());
        assert_eq!(project.status, ProjectStatus::Published);
        assert_eq!(
            project.published_url.as_deref(),
            Some("https://mock.github.io/oase-coffee-lab/")
        );
        assert!(project.repo_url.is_some());
        assert!(!project.id.is_empty());
        assert_eq!(repo.created_repos(), vec!["oase-coffee-lab"]);
        assert_eq!(repo.pushed_repos(), vec!["oase-coffee-lab"]);
    }

    #[tokio::test]
    async fn test_push_failure_halts_before_deploy() {
        let (orchestrator, _repo, pages) = orchestrator(
            MockRepoHost::failing_push("Failed to push files"),
            MockPagesHost::resolving("https://unused/"),
        );
        let mut run = PublishRun::new();

        let err = orchestrator
            .run(&content(), None, &mut run)
            .await
            .unwrap_err();

        assert_eq!(run.status, PublishStatus::Failed);
        assert_eq!(run.error.as_deref(), Some("Failed to push files"));
        assert_eq!(err.to_string(), "Failed to push files");
        assert_eq!(pages.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_failure_message_is_verbatim() {
        let (orchestrator, _repo, _pages) = orchestrator(
            MockRepoHost::failing_create("name already exists on this account"),
            MockPagesHost::resolving("https://unused/"),
        );
        let mut run = PublishRun::new();

        let err = orchestrator
            .run(&content(), None, &mut run)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "name already exists on this account");
    }

    #[tokio::test]
    async fn test_unresolved_url_gets_synthesized_fallback() {
        let (orchestrator, _repo, _pages) =
            orchestrator(MockRepoHost::new(), MockPagesHost::unresolved());
        let mut run = PublishRun::new();

        let project = orchestrator.run(&content(), None, &mut run).await.unwrap();
        assert_eq!(
            project.published_url.as_deref(),
            Some("https://oase-coffee-lab.pages.dev")
        );
        assert_eq!(run.status, PublishStatus::Completed);
    }

    #[tokio::test]
    async fn test_deploy_fault_fails_run() {
        let (orchestrator, _repo, _pages) = orchestrator(
            MockRepoHost::new(),
            MockPagesHost::failing("hosting service unavailable"),
        );
        let mut run = PublishRun::new();

        let err = orchestrator
            .run(&content(), None, &mut run)
            .await
            .unwrap_err();
        assert_eq!(run.status, PublishStatus::Failed);
        assert_eq!(err.to_string(), "hosting service unavailable");
    }

    #[tokio::test]
    async fn test_editing_preserves_identity() {
        let (orchestrator, _repo, _pages) = orchestrator(
            MockRepoHost::new(),
            MockPagesHost::resolving("https://mock.github.io/oase-coffee-lab/"),
        );
        let mut run = PublishRun::new();

        let prior = Project {
            id: "original-id".to_string(),
            business_name: "Old Name".to_string(),
            image_url: "old.jpg".to_string(),
            headline: "Old".to_string(),
            story: "Old.".to_string(),
            phone: "1".to_string(),
            location: None,
            template_id: TemplateId::Service,
            status: ProjectStatus::Published,
            published_url: Some("https://old.example".to_string()),
            repo_url: None,
            created_at: 42,
        };

        let project = orchestrator
            .run(&content(), Some(&prior), &mut run)
            .await
            .unwrap();
        assert_eq!(project.id, "original-id");
        assert_eq!(project.created_at, 42);
        // Everything else comes from the edited content.
        assert_eq!(project.business_name, "Oase Coffee Lab");
    }

    #[tokio::test]
    async fn test_active_run_rejects_restart() {
        let (orchestrator, _repo, _pages) = orchestrator(
            MockRepoHost::new(),
            MockPagesHost::resolving("https://unused/"),
        );
        let mut run = PublishRun {
            status: PublishStatus::Pushing,
            error: None,
        };

        let err = orchestrator
            .run(&content(), None, &mut run)
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::RunInProgress));
        // The active run is left untouched.
        assert_eq!(run.status, PublishStatus::Pushing);
    }

    #[tokio::test]
    async fn test_statuses_advance_in_pipeline_order() {
        use crate::publish::progress::PublishEvent;
        use std::sync::Mutex;

        struct RecordingHandler {
            steps: Mutex<Vec<PublishStatus>>,
        }

        impl PublishHandler for RecordingHandler {
            fn on_event(&self, event: &PublishEvent) {
                if let PublishEvent::StepStarted { step } = event {
                    self.steps.lock().unwrap().push(*step);
                }
            }
        }

        let handler = Arc::new(RecordingHandler {
            steps: Mutex::new(Vec::new()),
        });
        let orchestrator = PublishOrchestrator::new(
            Arc::new(MockRepoHost::new()),
            Arc::new(MockPagesHost::unresolved()),
            handler.clone(),
        );
        let mut run = PublishRun::new();
        orchestrator.run(&content(), None, &mut run).await.unwrap();

        assert_eq!(
            *handler.steps.lock().unwrap(),
            vec![
                PublishStatus::Generating,
                PublishStatus::Pushing,
                PublishStatus::Deploying,
                PublishStatus::Completed,
            ]
        );
    }
}
