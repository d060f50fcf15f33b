//! Google Books API Data Transfer Objects
//!
//! These types match what the Google Books `volumes` endpoint returns.
//! DO NOT use these types outside the googlebooks module - convert to domain types.
//!
//! API Reference: https://developers.google.com/books/docs/v1/reference/volumes

use serde::{Deserialize, Serialize};

/// Volume search response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    /// Total matches reported by the API (not the number returned)
    pub total_items: Option<u32>,
    /// Absent entirely when nothing matched
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// A single volume in the result set
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Bibliographic data for a volume
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    /// "YYYY", "YYYY-MM" or "YYYY-MM-DD"
    pub published_date: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    pub image_links: Option<ImageLinks>,
}

/// ISBN_10, ISBN_13, ISSN or OTHER
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type", default)]
    pub id_type: String,
    #[serde(default)]
    pub identifier: String,
}

/// Cover image URLs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
