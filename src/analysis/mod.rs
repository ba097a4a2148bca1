//! Image analysis: vision-model clients and the graceful-degradation
//! adapter the wizard talks to.

pub mod adapter;
pub mod client;
pub mod error;
pub mod gemini;
pub mod mock;

pub use adapter::{fallback_result, AnalysisAdapter, AnalysisError};
pub use client::{VisionClient, VisionRequest};
pub use error::VisionError;
pub use gemini::GeminiVisionClient;
pub use mock::MockVisionClient;
