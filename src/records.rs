use serde::{Deserialize, Serialize};

/// One video as collected from the platform API, before any cleaning.
///
/// Field names mirror the platform's response so the CSV header matches the
/// schema downstream consumers already know. Every field the API may omit is
/// nullable; a record is never dropped for missing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// JSON-encoded array, so the tag list survives a flat CSV cell.
    pub tags: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "favouriteCount")]
    pub favourite_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
    pub duration: Option<String>,
    pub definition: Option<String>,
    pub caption: Option<String>,
    /// Capture time of the extract run, RFC 3339.
    pub data_collected_at: String,
}

/// One cleaned video row as written by the transform stage.
///
/// `favouriteCount` is gone (never populated by the platform), counters are
/// numeric, `duration` is total seconds, and the free-text columns are
/// null-filled so they never render as "null" in a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformedRecord {
    pub video_id: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub title: Option<String>,
    pub description: String,
    pub tags: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "viewCount")]
    pub view_count: Option<u64>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<u64>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<u64>,
    pub duration: Option<f64>,
    pub definition: Option<String>,
    pub caption: Option<String>,
    pub data_collected_at: String,
    pub day_of_week: Option<String>,
    /// Capture time of the transform run, identical across the whole file.
    pub transformed_at: String,
}
