//! The adapter the wizard talks to.
//!
//! Any fault from the vision collaborator is absorbed here and replaced
//! with fixed, language-appropriate fallback copy, so the wizard always
//! has usable content to show. Callers cannot tell fallback apart from
//! real analysis, and that is intentional. The only surfaced error is
//! an empty image payload, which is rejected before any network call.

use super::client::{VisionClient, VisionRequest};
use crate::model::{AnalysisResult, Language, TemplateId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("image payload is empty")]
    EmptyImage,
}

/// Fixed fallback content for the requested language.
pub fn fallback_result(language: Language) -> AnalysisResult {
    match language {
        Language::Id => AnalysisResult {
            business_name_suggestion: "Luxe Local".to_string(),
            headline: "Keunggulan dalam Setiap Detail".to_string(),
            story: "Dibuat dengan kualitas tanpa kompromi, produk kami mendefinisikan ulang \
                    standar kemewahan lokal untuk pelanggan yang cerdas."
                .to_string(),
            suggested_template: TemplateId::Service,
            location_suggestion: None,
        },
        Language::En => AnalysisResult {
            business_name_suggestion: "Luxe Local".to_string(),
            headline: "Excellence in Every Detail".to_string(),
            story: "Crafted with uncompromising quality, our products redefine local luxury \
                    standards for the discerning customer."
                .to_string(),
            suggested_template: TemplateId::Service,
            location_suggestion: None,
        },
    }
}

/// Strips a `data:image/...;base64,` prefix if present.
fn strip_data_url_prefix(image: &str) -> &str {
    if image.starts_with("data:image/") {
        if let Some((_, payload)) = image.split_once("base64,") {
            return payload;
        }
    }
    image
}

pub struct AnalysisAdapter {
    client: Arc<dyn VisionClient>,
}

impl AnalysisAdapter {
    pub fn new(client: Arc<dyn VisionClient>) -> Self {
        Self { client }
    }

    /// Analyzes a product photo, degrading to fallback copy on any
    /// collaborator fault.
    pub async fn analyze(
        &self,
        image: &str,
        language: Language,
    ) -> Result<AnalysisResult, AnalysisError> {
        let payload = strip_data_url_prefix(image);
        if payload.is_empty() {
            return Err(AnalysisError::EmptyImage);
        }

        match self
            .client
            .analyze(VisionRequest::new(payload, language))
            .await
        {
            Ok(result) => {
                debug!(client = self.client.name(), "Analysis succeeded");
                Ok(result)
            }
            Err(e) => {
                warn!(
                    client = self.client.name(),
                    error = %e,
                    "Analysis failed, using fallback content"
                );
                Ok(fallback_result(language))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::error::VisionError;
    use crate::analysis::mock::MockVisionClient;

    #[tokio::test]
    async fn test_successful_analysis_passes_through() {
        let mock = Arc::new(MockVisionClient::new());
        mock.add_result(MockVisionClient::sample_result("Fresh roast"));
        let adapter = AnalysisAdapter::new(mock);

        let result = adapter.analyze("aGVsbG8=", Language::En).await.unwrap();
        assert_eq!(result.headline, "Fresh roast");
    }

    #[tokio::test]
    async fn test_fault_returns_fallback_not_error() {
        let mock = Arc::new(MockVisionClient::new());
        mock.add_error(VisionError::NetworkError {
            message: "connection refused".to_string(),
        });
        let adapter = AnalysisAdapter::new(mock);

        let result = adapter.analyze("aGVsbG8=", Language::En).await.unwrap();
        assert_eq!(result.business_name_suggestion, "Luxe Local");
        assert_eq!(result.headline, "Excellence in Every Detail");
    }

    #[tokio::test]
    async fn test_fallback_is_language_appropriate() {
        let mock = Arc::new(MockVisionClient::new());
        mock.add_error(VisionError::InvalidResponse {
            message: "garbage".to_string(),
        });
        let adapter = AnalysisAdapter::new(mock);

        let result = adapter.analyze("aGVsbG8=", Language::Id).await.unwrap();
        assert_eq!(result.headline, "Keunggulan dalam Setiap Detail");
        assert_eq!(result.suggested_template, TemplateId::Service);
    }

    #[tokio::test]
    async fn test_data_url_prefix_is_stripped() {
        let mock = Arc::new(MockVisionClient::new());
        mock.add_result(MockVisionClient::sample_result("ok"));
        let adapter = AnalysisAdapter::new(mock);

        let result = adapter
            .analyze("data:image/png;base64,aGVsbG8=", Language::En)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_empty_image_rejected_without_network_call() {
        let mock = Arc::new(MockVisionClient::new());
        let adapter = AnalysisAdapter::new(mock.clone());

        let result = adapter.analyze("", Language::En).await;
        assert!(matches!(result, Err(AnalysisError::EmptyImage)));

        let result = adapter.analyze("data:image/png;base64,", Language::En).await;
        assert!(matches!(result, Err(AnalysisError::EmptyImage)));
        assert_eq!(mock.call_count(), 0);
    }
}
