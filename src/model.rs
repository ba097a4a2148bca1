//! Core domain types shared across the wizard, the publish pipeline and
//! the HTTP boundary.
//!
//! Wire names are camelCase to match the JSON contracts consumed by the
//! frontend and produced by the original backend.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Fixed set of landing-page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Culinary,
    Fashion,
    Service,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Culinary => "culinary",
            TemplateId::Fashion => "fashion",
            TemplateId::Service => "service",
        }
    }
}

/// Lifecycle state of a persisted project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Publishing,
    Published,
}

/// Content language for analysis and fallback copy.
///
/// Passed explicitly wherever it matters; never read from ambient
/// global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Id,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Id => "id",
        }
    }
}

/// A persisted one-page business site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque stable identifier; immutable once created.
    pub id: String,
    pub business_name: String,
    /// Base64 data URL or hosted URL of the product photo.
    pub image_url: String,
    pub headline: String,
    pub story: String,
    /// Contact number, digits only.
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub template_id: TemplateId,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Unix epoch milliseconds; preserved across edits.
    pub created_at: i64,
}

/// Editable payload produced by image analysis (or seeded from an
/// existing project). Has no identity of its own; snapshots of it are
/// what the undo/redo history stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub business_name_suggestion: String,
    pub headline: String,
    pub story: String,
    pub suggested_template: TemplateId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_suggestion: Option<String>,
}

impl AnalysisResult {
    /// Seeds an editable payload from an already-persisted project, for
    /// the edit-existing entry into the wizard.
    pub fn from_project(project: &Project) -> Self {
        Self {
            business_name_suggestion: project.business_name.clone(),
            headline: project.headline.clone(),
            story: project.story.clone(),
            suggested_template: project.template_id,
            location_suggestion: project.location.clone(),
        }
    }
}

/// Finalized content handed to the publish pipeline (and accepted by
/// `POST /api/publish`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishContent {
    pub business_name: String,
    pub headline: String,
    pub story: String,
    pub phone: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    pub template_id: TemplateId,
}

/// Current time as epoch milliseconds, the project timestamp format.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
