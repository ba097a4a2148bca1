//! HTTP handlers for the pagelift API boundary.

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::model::{Language, PublishContent, TemplateId};
use crate::publish::PublishRun;
use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub template_id: Option<TemplateId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    pub url: String,
    pub repo_url: String,
}

/// `GET /api/health` - liveness only.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "environment": state.environment,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// `POST /api/analyze-image` - proxies the vision analysis. Collaborator
/// faults never surface here; the adapter degrades to fallback copy.
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeImageRequest>,
) -> ApiResult<Json<crate::model::AnalysisResult>> {
    let image = request
        .image
        .filter(|image| !image.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing image data".to_string()))?;
    let language = request.language.unwrap_or_default();

    let result = state
        .adapter
        .analyze(&image, language)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(result))
}

/// `POST /api/publish` - runs the full pipeline and reports the deployed
/// URLs. A failed step's message is passed through verbatim.
pub async fn publish(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> ApiResult<Json<PublishResponse>> {
    let (business_name, headline, story) = match (
        non_empty(request.business_name),
        non_empty(request.headline),
        non_empty(request.story),
    ) {
        (Some(b), Some(h), Some(s)) => (b, h, s),
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };

    let content = PublishContent {
        business_name,
        headline,
        story,
        phone: request.phone.unwrap_or_default(),
        image_url: request.image_url.unwrap_or_default(),
        location: request.location.filter(|l| !l.is_empty()),
        template_id: request.template_id.unwrap_or(TemplateId::Service),
    };

    info!(business = %content.business_name, "Publish requested");
    let mut run = PublishRun::new();
    let project = state
        .orchestrator
        .run(&content, None, &mut run)
        .await
        .map_err(|e| {
            error!(error = %e, "Publish pipeline failed");
            ApiError::Pipeline(e.to_string())
        })?;

    // A completed pipeline always resolves both URLs.
    let url = project
        .published_url
        .ok_or_else(|| ApiError::Internal("published project has no URL".to_string()))?;
    let repo_url = project
        .repo_url
        .ok_or_else(|| ApiError::Internal("published project has no repository URL".to_string()))?;

    Ok(Json(PublishResponse {
        success: true,
        url,
        repo_url,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
