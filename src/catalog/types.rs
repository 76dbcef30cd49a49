//! Catalog Data Types
//!
//! Records persisted in the JSON data files and the request/response bodies of
//! the catalog API. Field names are camelCase on the wire so existing data
//! files and the browser front-end keep working unchanged.

use super::media::{self, MediaKind};
use crate::search::types::SearchableRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A SAP module (MM, SD, FI, ...) that instructions are grouped under.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One how-to entry: a transaction, its steps and attached media.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub module_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transaction_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SearchableRecord for Instruction {
    fn id(&self) -> &str {
        &self.id
    }

    fn group_id(&self) -> Option<&str> {
        self.module_id.as_deref()
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn code(&self) -> Option<&str> {
        Some(&self.transaction_code)
    }

    fn steps(&self) -> &[String] {
        &self.steps
    }

    fn notes(&self) -> Option<&str> {
        Some(&self.notes)
    }
}

/// Image or video attached to an instruction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    /// Declared type (`"image"` / `"video"`); older entries omit it.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl MediaItem {
    /// Declared type when it is recognised, otherwise guessed from the URL.
    pub fn kind(&self) -> MediaKind {
        match self.media_type.as_deref() {
            Some("image") => MediaKind::Image,
            Some("video") => MediaKind::Video,
            _ => media::detect_kind(&self.url),
        }
    }

    /// Display name: the explicit filename or the last URL segment.
    pub fn display_name(&self) -> String {
        match &self.filename {
            Some(name) if !name.is_empty() => name.clone(),
            _ => media::file_name_from_url(&self.url),
        }
    }
}

// --- Request / Response bodies ---

#[derive(Debug, Default, Deserialize)]
pub struct ModuleRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionRequest {
    pub title: Option<String>,
    pub module_id: Option<String>,
    pub transaction_code: Option<String>,
    pub steps: Option<Vec<String>>,
    pub notes: Option<String>,
    pub media: Option<Vec<MediaItem>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionListParams {
    pub module_id: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub modules: usize,
    pub instructions: usize,
}

/// Accepts an explicit JSON `null` where a plain value is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
