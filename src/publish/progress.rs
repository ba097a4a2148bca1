//! Progress reporting for publish runs.

use super::orchestrator::PublishStatus;
use std::time::Duration;
use tracing::{error, info};

/// Events emitted while a publish run executes.
#[derive(Debug, Clone)]
pub enum PublishEvent {
    /// Run started for the given repository slug
    RunStarted { slug: String },

    /// A pipeline step began
    StepStarted { step: PublishStatus },

    /// A pipeline step finished
    StepComplete { step: PublishStatus, duration: Duration },

    /// Run finished successfully
    RunCompleted { url: String, total_time: Duration },

    /// Run failed
    RunFailed { error: String },
}

/// Trait for observing publish progress.
pub trait PublishHandler: Send + Sync {
    fn on_event(&self, event: &PublishEvent);
}

/// No-op handler that ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl PublishHandler for NoOpHandler {
    fn on_event(&self, _event: &PublishEvent) {
        // Intentionally empty
    }
}

/// Handler that mirrors progress into the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl PublishHandler for LoggingHandler {
    fn on_event(&self, event: &PublishEvent) {
        match event {
            PublishEvent::RunStarted { slug } => {
                info!(slug, "Publish run started");
            }
            PublishEvent::StepStarted { step } => {
                info!(?step, "Step started");
            }
            PublishEvent::StepComplete { step, duration } => {
                info!(?step, ?duration, "Step complete");
            }
            PublishEvent::RunCompleted { url, total_time } => {
                info!(url, ?total_time, "Publish run complete");
            }
            PublishEvent::RunFailed { error } => {
                error!(error, "Publish run failed");
            }
        }
    }
}
