use super::error::VisionError;
use crate::model::{AnalysisResult, Language};
use async_trait::async_trait;

/// One structured-output analysis request.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    /// Raw base64 image payload, data-URL prefix already stripped.
    pub image_base64: String,
    /// Language the generated copy should be written in.
    pub language: Language,
}

impl VisionRequest {
    pub fn new(image_base64: impl Into<String>, language: Language) -> Self {
        Self {
            image_base64: image_base64.into(),
            language,
        }
    }
}

/// A vision/text-generation collaborator that turns a product photo
/// into landing-page copy.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn analyze(&self, request: VisionRequest) -> Result<AnalysisResult, VisionError>;

    fn name(&self) -> &str;
}
