use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;

/// Both the playlist listing page size and the detail batch size; the
/// platform caps each at 50 ids per request.
pub const PAGE_SIZE: usize = 50;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Derive the channel's uploads playlist from its channel id. The platform
/// encodes this as a fixed prefix swap (`UC…` -> `UU…`); anything else is
/// assumed to already be a playlist id.
pub fn uploads_playlist_id(channel_id: &str) -> String {
    match channel_id.strip_prefix("UC") {
        Some(suffix) => format!("UU{suffix}"),
        None => channel_id.to_owned(),
    }
}

pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Build a client from the `YT_API_KEY` environment variable.
    pub fn from_env(base_url: &str) -> Result<Self, Error> {
        let api_key = std::env::var("YT_API_KEY")
            .map_err(|_| Error::Config("YT_API_KEY is not set".to_owned()))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::Api {
                context: "build http client".to_owned(),
                source: Some(err),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        })
    }

    /// Enumerate every video id in the uploads playlist, following the
    /// continuation token until the listing is exhausted.
    ///
    /// Any failure here aborts the caller's run: ids collected before a
    /// pagination error are an incomplete view of the channel and cannot be
    /// trusted.
    pub async fn list_upload_video_ids(&self, playlist_id: &str) -> Result<Vec<String>, Error> {
        let endpoint = format!("{}/playlistItems", self.base_url);
        let mut video_ids = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page = 1_usize;

        loop {
            let mut query = vec![
                ("part", "contentDetails".to_owned()),
                ("playlistId", playlist_id.to_owned()),
                ("maxResults", PAGE_SIZE.to_string()),
                ("key", self.api_key.clone()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let context = format!("list playlist items (page {page})");
            let response: PlaylistItemsResponse =
                self.get_json(&endpoint, &query, &context).await?;

            video_ids.extend(
                response
                    .items
                    .into_iter()
                    .map(|item| item.content_details.video_id),
            );

            match response.next_page_token {
                Some(token) => {
                    page_token = Some(token);
                    page += 1;
                }
                None => break,
            }
        }

        Ok(video_ids)
    }

    /// Fetch snippet, statistics, and content details for up to
    /// [`PAGE_SIZE`] ids in a single comma-joined request.
    pub async fn fetch_video_details(&self, ids: &[String]) -> Result<Vec<VideoItem>, Error> {
        let endpoint = format!("{}/videos", self.base_url);
        let query = [
            ("part", "snippet,contentDetails,statistics".to_owned()),
            ("id", ids.join(",")),
            ("key", self.api_key.clone()),
        ];

        let context = format!("fetch video details ({} ids)", ids.len());
        let response: VideoListResponse = self.get_json(&endpoint, &query, &context).await?;
        Ok(response.items)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        context: &str,
    ) -> Result<T, Error> {
        let response = self
            .http
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|err| Error::Api {
                context: format!("{context}: GET {endpoint}"),
                source: Some(err),
            })?;

        let status = response.status();
        let raw = response.text().await.map_err(|err| Error::Api {
            context: format!("{context}: read response body"),
            source: Some(err),
        })?;

        if !status.is_success() {
            let message = parse_error_message(&raw).unwrap_or_else(|| raw.clone());
            return Err(Error::Api {
                context: format!("{context}: API error ({status}): {message}"),
                source: None,
            });
        }

        serde_json::from_str(&raw).map_err(|err| Error::Api {
            context: format!("{context}: parse response: {err}"),
            source: None,
        })
    }
}

fn parse_error_message(raw_json: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw_json).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?.to_owned();
    Some(message)
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    video_id: String,
}

/// One item of a video details response. Every section and field is
/// optional: a missing field becomes a null column, never a failure.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// Counter values arrive as decimal strings; they stay strings until the
/// transform stage coerces them.
#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "favouriteCount", alias = "favoriteCount")]
    pub favourite_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoContentDetails {
    pub duration: Option<String>,
    pub definition: Option<String>,
    pub caption: Option<String>,
}
