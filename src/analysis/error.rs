//! Errors produced by vision-model clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Faults a [`VisionClient`](super::VisionClient) can report.
///
/// Every variant is absorbed by the analysis adapter's fallback policy;
/// these exist so clients and tests can describe faults precisely, not
/// so callers of the adapter ever see them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VisionError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Network-related error
    NetworkError { message: String },

    /// Missing or unparseable model output
    InvalidResponse { message: String },

    /// Configuration error (missing API key, bad endpoint, etc.)
    ConfigurationError { message: String },

    /// Generic error for other cases
    Other { message: String },
}

impl fmt::Display for VisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            VisionError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            VisionError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            VisionError::InvalidResponse { message } => {
                write!(f, "Invalid response from vision model: {}", message)
            }
            VisionError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            VisionError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for VisionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_code() {
        let err = VisionError::ApiError {
            message: "quota exceeded".to_string(),
            status_code: Some(429),
        };
        assert_eq!(err.to_string(), "API error (429): quota exceeded");
    }

    #[test]
    fn test_display_timeout() {
        let err = VisionError::TimeoutError { seconds: 30 };
        assert!(err.to_string().contains("30 seconds"));
    }
}
