//! The wizard state machine.
//!
//! An explicit state object replacing the original UI-driven flow:
//! synchronous edits go through [`dispatch`](WizardStateMachine::dispatch),
//! while `analyze` and `publish` are the only suspension points. At most
//! one collaborator call is outstanding per session, and a cancelled
//! session discards the eventual result of any call still in flight.

use crate::analysis::{AnalysisAdapter, AnalysisError};
use crate::history::HistoryManager;
use crate::model::{AnalysisResult, Language, Project, PublishContent, TemplateId};
use crate::publish::{PublishError, PublishOrchestrator, PublishRun};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Ordered steps the wizard walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Upload,
    Analyzing,
    Review,
    Publishing,
}

/// Synchronous wizard actions. Edits mutate the working copy in place;
/// commits, template selection, undo and redo go through the history.
#[derive(Debug, Clone)]
pub enum WizardAction {
    SetPhoto(String),
    SetPhone(String),
    SetLocation(String),
    /// Field change: replaces the working copy without touching history.
    EditContent(AnalysisResult),
    /// Field blur/confirm: snapshots the working copy into history.
    CommitEdit,
    /// Template selection commits immediately.
    SelectTemplate(TemplateId),
    Undo,
    Redo,
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("a contact phone number is required to publish")]
    PhoneRequired,

    #[error("action not valid in step {step:?}")]
    InvalidStep { step: WizardStep },

    #[error("another collaborator call is in flight")]
    CallInFlight,

    #[error("the session has been cancelled")]
    SessionCancelled,

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub struct WizardStateMachine {
    adapter: AnalysisAdapter,
    orchestrator: PublishOrchestrator,
    language: Language,

    step: WizardStep,
    photo: Option<String>,
    phone: String,
    location: String,
    working: Option<AnalysisResult>,
    history: HistoryManager,
    run: PublishRun,

    /// Project being edited, if the session was entered via
    /// edit-existing. Its identity survives into the published result.
    prior: Option<Project>,

    in_flight: bool,
    cancelled: bool,
    /// Bumped on cancel so an in-flight call can tell its result is stale.
    epoch: u64,
}

impl WizardStateMachine {
    /// Starts a fresh session at the upload step.
    pub fn new(
        adapter: AnalysisAdapter,
        orchestrator: PublishOrchestrator,
        language: Language,
    ) -> Self {
        Self {
            adapter,
            orchestrator,
            language,
            step: WizardStep::Upload,
            photo: None,
            phone: String::new(),
            location: String::new(),
            working: None,
            history: HistoryManager::new(),
            run: PublishRun::new(),
            prior: None,
            in_flight: false,
            cancelled: false,
            epoch: 0,
        }
    }

    /// Starts a session editing an existing project: jumps straight to
    /// review with the history seeded from the project's fields.
    pub fn for_project(
        adapter: AnalysisAdapter,
        orchestrator: PublishOrchestrator,
        language: Language,
        project: Project,
    ) -> Self {
        let seed = AnalysisResult::from_project(&project);
        let mut machine = Self::new(adapter, orchestrator, language);
        machine.photo = Some(project.image_url.clone());
        machine.phone = project.phone.clone();
        machine.location = project.location.clone().unwrap_or_default();
        machine.history.reset(seed.clone());
        machine.working = Some(seed);
        machine.prior = Some(project);
        machine.step = WizardStep::Review;
        machine
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn working(&self) -> Option<&AnalysisResult> {
        self.working.as_ref()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn run(&self) -> &PublishRun {
        &self.run
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Discards the session. No side effects: nothing persisted, and
    /// the eventual result of any in-flight call is dropped.
    pub fn cancel(&mut self) {
        info!(step = ?self.step, "Wizard session cancelled");
        self.cancelled = true;
        self.epoch += 1;
    }

    /// Applies a synchronous action in the current step.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<(), WizardError> {
        if self.cancelled {
            return Err(WizardError::SessionCancelled);
        }
        match action {
            WizardAction::SetPhoto(photo) => {
                self.require_step(WizardStep::Upload)?;
                self.photo = Some(photo);
            }
            WizardAction::SetPhone(phone) => {
                self.require_editable()?;
                self.phone = phone;
            }
            WizardAction::SetLocation(location) => {
                self.require_editable()?;
                self.location = location;
            }
            WizardAction::EditContent(content) => {
                self.require_step(WizardStep::Review)?;
                self.working = Some(content);
            }
            WizardAction::CommitEdit => {
                self.require_step(WizardStep::Review)?;
                if let Some(working) = &self.working {
                    self.history.append(working.clone());
                }
            }
            WizardAction::SelectTemplate(template) => {
                self.require_step(WizardStep::Review)?;
                if let Some(working) = &mut self.working {
                    working.suggested_template = template;
                    let snapshot = working.clone();
                    self.history.append(snapshot);
                }
            }
            WizardAction::Undo => {
                self.require_step(WizardStep::Review)?;
                if let Some(snapshot) = self.history.undo().cloned() {
                    self.working = Some(snapshot);
                }
            }
            WizardAction::Redo => {
                self.require_step(WizardStep::Review)?;
                if let Some(snapshot) = self.history.redo().cloned() {
                    self.working = Some(snapshot);
                }
            }
        }
        Ok(())
    }

    /// Analyzes the uploaded photo. A silent no-op when no photo has
    /// been set; on an unrecoverable adapter error the session returns
    /// to the upload step with the analysis state discarded.
    pub async fn analyze(&mut self) -> Result<(), WizardError> {
        if self.cancelled {
            return Err(WizardError::SessionCancelled);
        }
        if self.in_flight {
            return Err(WizardError::CallInFlight);
        }
        self.require_step(WizardStep::Upload)?;

        let Some(photo) = self.photo.clone() else {
            debug!("Analyze requested without a photo, ignoring");
            return Ok(());
        };

        self.step = WizardStep::Analyzing;
        self.in_flight = true;
        let epoch = self.epoch;

        let outcome = self.adapter.analyze(&photo, self.language).await;
        self.in_flight = false;

        if self.epoch != epoch {
            debug!("Discarding stale analysis result");
            return Err(WizardError::SessionCancelled);
        }

        match outcome {
            Ok(result) => {
                if self.location.is_empty() {
                    if let Some(suggestion) = &result.location_suggestion {
                        self.location = suggestion.clone();
                    }
                }
                self.history.reset(result.clone());
                self.working = Some(result);
                self.step = WizardStep::Review;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Analysis unrecoverable, returning to upload");
                self.working = None;
                self.history = HistoryManager::new();
                self.step = WizardStep::Upload;
                Err(e.into())
            }
        }
    }

    /// Publishes the edited content. Rejected without a phone number.
    /// On success the session is consumed and the final project is
    /// returned; on a pipeline failure the session returns to review so
    /// the user can retry (a retry starts a brand-new run from step 1).
    pub async fn publish(&mut self) -> Result<Project, WizardError> {
        if self.cancelled {
            return Err(WizardError::SessionCancelled);
        }
        if self.in_flight {
            return Err(WizardError::CallInFlight);
        }
        self.require_step(WizardStep::Review)?;
        if self.phone.is_empty() {
            return Err(WizardError::PhoneRequired);
        }

        let (working, photo) = match (&self.working, &self.photo) {
            (Some(working), Some(photo)) => (working.clone(), photo.clone()),
            _ => return Err(WizardError::InvalidStep { step: self.step }),
        };

        let content = PublishContent {
            business_name: working.business_name_suggestion,
            headline: working.headline,
            story: working.story,
            phone: self.phone.clone(),
            image_url: photo,
            location: (!self.location.is_empty()).then(|| self.location.clone()),
            template_id: working.suggested_template,
        };

        self.step = WizardStep::Publishing;
        self.in_flight = true;
        let epoch = self.epoch;

        let mut run = std::mem::take(&mut self.run);
        let outcome = self
            .orchestrator
            .run(&content, self.prior.as_ref(), &mut run)
            .await;
        self.run = run;
        self.in_flight = false;

        if self.epoch != epoch {
            debug!("Discarding stale publish result");
            return Err(WizardError::SessionCancelled);
        }

        match outcome {
            Ok(project) => {
                info!(id = %project.id, "Wizard session completed");
                Ok(project)
            }
            Err(e) => {
                self.step = WizardStep::Review;
                Err(e.into())
            }
        }
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidStep { step: self.step })
        }
    }

    /// Phone/location are editable while uploading and reviewing.
    fn require_editable(&self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::Upload | WizardStep::Review => Ok(()),
            _ => Err(WizardError::InvalidStep { step: self.step }),
        }
    }
}
