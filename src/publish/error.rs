//! Publish pipeline errors.
//!
//! Collaborator messages are carried verbatim: the `Display` output of
//! a failed run is exactly what the failing host reported, because that
//! is what the API surfaces to the user.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// Repository host fault during create or push. Message verbatim.
    #[error("{0}")]
    RepoHost(String),

    /// Static-hosting fault during URL resolution. Message verbatim.
    #[error("{0}")]
    PagesHost(String),

    /// A run is already active on this session.
    #[error("a publish run is already in progress")]
    RunInProgress,
}
