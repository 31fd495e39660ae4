//! YouTube Data API v3 client.

use super::{parse_duration, SearchRequest, VideoCandidate, VideoSearch};
use crate::error::{KalimaError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Default timeout for a single API request.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Search backend talking to the public YouTube Data API.
pub struct YoutubeDataApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YoutubeDataApi {
    /// Create a client with the given API key.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE)
    }

    /// Create a client against a different endpoint (proxies, test servers).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(KalimaError::Config("YouTube API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KalimaError::VideoSearch(format!(
                "{} returned {}: {}",
                endpoint,
                status,
                api_error_message(&body).unwrap_or(body)
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    #[serde(default)]
    content_details: ContentDetails,
    #[serde(default)]
    statistics: Statistics,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
}

impl From<VideoItem> for VideoCandidate {
    fn from(item: VideoItem) -> Self {
        Self {
            duration_seconds: parse_duration(&item.content_details.duration),
            view_count: item
                .statistics
                .view_count
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            channel_name: item.snippet.channel_title,
            title: item.snippet.title,
            id: item.id,
        }
    }
}

/// Pull `error.message` out of an API error body.
fn api_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json["error"]["message"].as_str().map(|s| s.to_string())
}

#[async_trait]
impl VideoSearch for YoutubeDataApi {
    #[instrument(skip(self), fields(query = %request.query))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<String>> {
        let params = [
            ("part", "snippet".to_string()),
            ("q", request.query.clone()),
            ("type", "video".to_string()),
            ("videoDefinition", "high".to_string()),
            ("videoEmbeddable", "true".to_string()),
            ("relevanceLanguage", request.relevance_language.clone()),
            ("maxResults", request.max_results.to_string()),
        ];

        let response: SearchResponse = self.get("search", &params).await?;
        let ids: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        debug!("Search returned {} videos", ids.len());
        Ok(ids)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn fetch_details(&self, ids: &[String]) -> Result<Vec<VideoCandidate>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = [
            ("part", "contentDetails,statistics,snippet".to_string()),
            ("id", ids.join(",")),
        ];

        let response: VideosResponse = self.get("videos", &params).await?;
        Ok(response.items.into_iter().map(VideoCandidate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_key() {
        assert!(YoutubeDataApi::new("  ").is_err());
        assert!(YoutubeDataApi::new("AIza-test").is_ok());
    }

    #[test]
    fn test_search_response_skips_non_video_items() {
        let body = r#"{
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "abc123"}},
                {"id": {"kind": "youtube#channel", "channelId": "UC1"}},
                {"id": {"kind": "youtube#video", "videoId": "def456"}}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let ids: Vec<String> = response.items.into_iter().filter_map(|i| i.id.video_id).collect();
        assert_eq!(ids, vec!["abc123", "def456"]);
    }

    #[test]
    fn test_video_item_to_candidate() {
        let body = r#"{
            "items": [{
                "id": "abc123",
                "contentDetails": {"duration": "PT4M5S"},
                "statistics": {"viewCount": "12345"},
                "snippet": {"title": "Numbers in Arabic", "channelTitle": "Arabic Mike"}
            }, {
                "id": "hidden",
                "contentDetails": {"duration": "PT5M"},
                "statistics": {},
                "snippet": {"title": "No stats", "channelTitle": "Someone"}
            }]
        }"#;
        let response: VideosResponse = serde_json::from_str(body).unwrap();
        let candidates: Vec<VideoCandidate> =
            response.items.into_iter().map(VideoCandidate::from).collect();

        assert_eq!(
            candidates[0],
            VideoCandidate {
                id: "abc123".to_string(),
                title: "Numbers in Arabic".to_string(),
                view_count: 12345,
                channel_name: "Arabic Mike".to_string(),
                duration_seconds: 245,
            }
        );
        assert_eq!(candidates[1].view_count, 0);
        assert_eq!(candidates[1].duration_seconds, 300);
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"code": 403, "message": "quotaExceeded"}}"#;
        assert_eq!(api_error_message(body), Some("quotaExceeded".to_string()));
        assert_eq!(api_error_message("not json"), None);
    }

    #[tokio::test]
    async fn test_fetch_details_with_no_ids_makes_no_request() {
        let api = YoutubeDataApi::with_base_url("key", "http://127.0.0.1:9").unwrap();
        assert!(api.fetch_details(&[]).await.unwrap().is_empty());
    }
}
