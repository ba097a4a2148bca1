//! pagelift - turn a single product photo into a published one-page
//! business website.
//!
//! The library drives a guided creation workflow: a photo is analyzed
//! by a vision/language model, the suggested copy is edited with full
//! undo/redo, and the result is published by a sequential pipeline that
//! generates the site, pushes it to a repository host and resolves its
//! public URL.
//!
//! # Core Concepts
//!
//! - **Wizard session**: one in-progress attempt to create or edit a
//!   project, held by [`wizard::WizardStateMachine`]
//! - **Analysis adapter**: wraps the vision collaborator and degrades
//!   to fixed fallback copy on any fault, so the wizard always has
//!   content to show
//! - **Publish pipeline**: generate → push → deploy, strictly ordered,
//!   fail-fast with no automatic retry
//!
//! # Example Usage
//!
//! ```ignore
//! use pagelift::analysis::AnalysisAdapter;
//! use pagelift::model::Language;
//! use pagelift::wizard::{WizardAction, WizardStateMachine};
//!
//! async fn create_site(
//!     adapter: AnalysisAdapter,
//!     orchestrator: pagelift::publish::PublishOrchestrator,
//!     photo: String,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut wizard = WizardStateMachine::new(adapter, orchestrator, Language::En);
//!     wizard.dispatch(WizardAction::SetPhoto(photo))?;
//!     wizard.analyze().await?;
//!     wizard.dispatch(WizardAction::SetPhone("628123456789".into()))?;
//!     let project = wizard.publish().await?;
//!     println!("Live at {}", project.published_url.unwrap());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`analysis`]: vision clients and the fallback adapter
//! - [`wizard`]: the creation-workflow state machine and edit history
//! - [`publish`]: the publish orchestrator and hosting collaborators
//! - [`server`]: the HTTP API boundary

// Public modules
pub mod analysis;
pub mod cli;
pub mod config;
pub mod history;
pub mod model;
pub mod publish;
pub mod render;
pub mod server;
pub mod store;
pub mod util;
pub mod wizard;

// Re-export key types for convenient access
pub use analysis::{AnalysisAdapter, AnalysisError, GeminiVisionClient, VisionClient, VisionError};
pub use config::{ConfigError, PageliftConfig};
pub use history::HistoryManager;
pub use model::{AnalysisResult, Language, Project, ProjectStatus, PublishContent, TemplateId};
pub use publish::{PublishError, PublishOrchestrator, PublishRun, PublishStatus};
pub use store::{ProjectStore, StoreError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use wizard::{WizardAction, WizardError, WizardStateMachine, WizardStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
