//! Scriptable vision client for tests.

use super::client::{VisionClient, VisionRequest};
use super::error::VisionError;
use crate::model::{AnalysisResult, TemplateId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Vision client that replays a queue of canned outcomes.
pub struct MockVisionClient {
    responses: Mutex<VecDeque<Result<AnalysisResult, VisionError>>>,
    calls: AtomicUsize,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn add_result(&self, result: AnalysisResult) {
        self.responses.lock().unwrap().push_back(Ok(result));
    }

    pub fn add_error(&self, error: VisionError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Number of analyze calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Convenience result for tests that just need plausible output.
    pub fn sample_result(headline: impl Into<String>) -> AnalysisResult {
        AnalysisResult {
            business_name_suggestion: "Oase Coffee Lab".to_string(),
            headline: headline.into(),
            story: "Beans roasted in-house, stories poured daily.".to_string(),
            suggested_template: TemplateId::Culinary,
            location_suggestion: None,
        }
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn analyze(&self, _request: VisionRequest) -> Result<AnalysisResult, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(VisionError::Other {
                    message: "MockVisionClient: no more responses in queue".to_string(),
                })
            })
    }

    fn name(&self) -> &str {
        "MockVisionClient"
    }
}
