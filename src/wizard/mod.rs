//! The project-creation wizard.

pub mod machine;

pub use machine::{WizardAction, WizardError, WizardStateMachine, WizardStep};
