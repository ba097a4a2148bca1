//! Publish pipeline: generate → push → deploy, executed strictly in
//! order against the repository- and static-hosting collaborators.

pub mod error;
pub mod hosts;
pub mod mock;
pub mod orchestrator;
pub mod progress;
pub mod slug;

pub use error::PublishError;
pub use hosts::{GitHubPagesHost, GitHubRepoHost, PagesHost, RepoHost};
pub use mock::{MockPagesHost, MockRepoHost};
pub use orchestrator::{PublishOrchestrator, PublishRun, PublishStatus};
pub use progress::{LoggingHandler, NoOpHandler, PublishEvent, PublishHandler};
pub use slug::repo_slug;
