//! Video lookup for catalog entries.
//!
//! A topic string is turned into a YouTube search, the results are
//! filtered to lesson-length videos, and one video id is picked.

mod duration;
mod selector;
mod youtube;

pub use duration::parse_duration;
pub use selector::{build_query, rank, Ranking, Selection, SelectionPolicy, SelectionReason, VideoSelector};
pub use youtube::YoutubeDataApi;

use crate::error::Result;
use async_trait::async_trait;

/// Metadata for one search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCandidate {
    pub id: String,
    pub title: String,
    pub view_count: u64,
    pub channel_name: String,
    pub duration_seconds: u64,
}

impl VideoCandidate {
    /// Watch URL for the video.
    pub fn url(&self) -> String {
        watch_url(&self.id)
    }
}

/// Watch URL for a video id.
pub fn watch_url(id: &str) -> String {
    format!("https://youtube.com/watch?v={}", id)
}

/// Parameters for one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub relevance_language: String,
}

/// Trait for video search backends.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for embeddable HD videos, returning ids in result order.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<String>>;

    /// Fetch duration, view count and channel for the given ids in one call.
    async fn fetch_details(&self, ids: &[String]) -> Result<Vec<VideoCandidate>>;
}
