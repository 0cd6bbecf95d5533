use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Batch;

/// Difficulty tier of a course. Stored and transported as the plain
/// capitalized name ("Beginner", "Intermediate", "Advanced").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// A catalog course document. The serialized shape (camelCase keys, `id`
/// embedded in the body) is exactly what the store persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub price: f64,
    pub duration: String,
    pub level: Level,
    pub image_id: String,
    #[serde(default)]
    pub batches: Vec<Batch>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub title: String,
    pub description: String,
    /// One feature per line; blank lines are dropped.
    #[serde(default)]
    pub features: String,
    pub price: f64,
    pub duration: String,
    pub level: Level,
    #[serde(default = "default_image_id")]
    pub image_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: String,
    pub price: f64,
    pub duration: String,
    pub level: Level,
    pub image_id: String,
}

fn default_image_id() -> String {
    "0".repeat(24)
}

/// Splits a multi-line features field into individual lines, dropping lines
/// that are blank or whitespace-only. Order and duplicates are preserved.
pub fn split_features(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
