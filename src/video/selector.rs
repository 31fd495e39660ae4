//! Ranking and selection of search results.

use super::{SearchRequest, VideoCandidate, VideoSearch};
use crate::config::YoutubeSettings;
use crate::error::{KalimaError, Result};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Marker appended to every query to bias results toward lessons for learners.
const ARABIC_LEARNING_MARKER: &str = "تعلم العربية";

/// Build the search query for a topic.
pub fn build_query(topic: &str) -> String {
    format!("learn {} {}", topic.trim(), ARABIC_LEARNING_MARKER)
}

/// Filtering and search parameters for selection.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    pub preferred_channels: Vec<String>,
    pub min_duration_seconds: u64,
    pub max_duration_seconds: u64,
    pub max_results: u32,
    pub relevance_language: String,
}

impl SelectionPolicy {
    pub fn from_settings(settings: &YoutubeSettings) -> Self {
        Self {
            preferred_channels: settings.preferred_channels.clone(),
            min_duration_seconds: settings.min_duration_seconds,
            max_duration_seconds: settings.max_duration_seconds,
            max_results: settings.max_results,
            relevance_language: settings.relevance_language.clone(),
        }
    }

    /// Case-insensitive substring match against the allow-list.
    pub fn is_preferred(&self, channel_name: &str) -> bool {
        let channel = channel_name.to_lowercase();
        self.preferred_channels
            .iter()
            .filter(|p| !p.trim().is_empty())
            .any(|p| channel.contains(&p.to_lowercase()))
    }

    /// Whether a duration falls inside the closed lesson-length window.
    pub fn in_window(&self, duration_seconds: u64) -> bool {
        (self.min_duration_seconds..=self.max_duration_seconds).contains(&duration_seconds)
    }

    fn request(&self, topic: &str) -> SearchRequest {
        SearchRequest {
            query: build_query(topic),
            max_results: self.max_results,
            relevance_language: self.relevance_language.clone(),
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::from_settings(&YoutubeSettings::default())
    }
}

/// Candidates that passed the duration window, split by channel preference.
///
/// Each bucket is ordered by view count, highest first; equal counts keep
/// their search-result order.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub preferred: Vec<VideoCandidate>,
    pub others: Vec<VideoCandidate>,
}

impl Ranking {
    /// Highest-priority candidate, if any passed the window.
    pub fn best(&self) -> Option<(&VideoCandidate, SelectionReason)> {
        self.preferred
            .first()
            .map(|c| (c, SelectionReason::PreferredChannel))
            .or_else(|| self.others.first().map(|c| (c, SelectionReason::MostViewed)))
    }

    pub fn is_empty(&self) -> bool {
        self.preferred.is_empty() && self.others.is_empty()
    }
}

/// Split candidates into preferred and other buckets and sort each by views.
pub fn rank(candidates: Vec<VideoCandidate>, policy: &SelectionPolicy) -> Ranking {
    let mut ranking = Ranking::default();

    for candidate in candidates {
        if !policy.in_window(candidate.duration_seconds) {
            debug!(
                "Skipping {} ({}s outside {}-{}s)",
                candidate.id,
                candidate.duration_seconds,
                policy.min_duration_seconds,
                policy.max_duration_seconds
            );
            continue;
        }

        if policy.is_preferred(&candidate.channel_name) {
            ranking.preferred.push(candidate);
        } else {
            ranking.others.push(candidate);
        }
    }

    // sort_by_key is stable, so ties keep search order
    ranking.preferred.sort_by_key(|c| Reverse(c.view_count));
    ranking.others.sort_by_key(|c| Reverse(c.view_count));

    ranking
}

/// Why a video was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Most-viewed lesson-length video from an allow-listed channel.
    PreferredChannel,
    /// Most-viewed lesson-length video from any other channel.
    MostViewed,
    /// Nothing passed the window; the first search hit was taken as-is.
    FirstResult,
}

impl std::fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionReason::PreferredChannel => write!(f, "preferred channel"),
            SelectionReason::MostViewed => write!(f, "most viewed"),
            SelectionReason::FirstResult => write!(f, "first search result"),
        }
    }
}

/// A chosen video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub video_id: String,
    pub reason: SelectionReason,
}

/// Picks one video per topic.
pub struct VideoSelector {
    search: Arc<dyn VideoSearch>,
    policy: SelectionPolicy,
}

impl VideoSelector {
    pub fn new(search: Arc<dyn VideoSearch>, policy: SelectionPolicy) -> Self {
        Self { search, policy }
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Select a video, logging and absorbing any search failure.
    pub async fn select(&self, topic: &str) -> Option<Selection> {
        match self.try_select(topic).await {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Video search for '{}' failed: {}", topic, e);
                None
            }
        }
    }

    /// Select a video, returning search failures to the caller.
    #[instrument(skip(self))]
    pub async fn try_select(&self, topic: &str) -> Result<Option<Selection>> {
        if topic.trim().is_empty() {
            return Err(KalimaError::InvalidInput("Search topic cannot be empty".to_string()));
        }

        let request = self.policy.request(topic);
        info!("Searching for: {}", request.query);

        let ids = self.search.search(&request).await?;
        if ids.is_empty() {
            info!("No videos found in search results");
            return Ok(None);
        }

        let mut details = self.search.fetch_details(&ids).await?;

        let position: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        details.sort_by_key(|c| position.get(c.id.as_str()).copied().unwrap_or(usize::MAX));

        let ranking = rank(details, &self.policy);
        log_ranking(&ranking);

        if let Some((best, reason)) = ranking.best() {
            return Ok(Some(Selection {
                video_id: best.id.clone(),
                reason,
            }));
        }

        info!(
            "No videos between {}s and {}s, falling back to the first search result",
            self.policy.min_duration_seconds, self.policy.max_duration_seconds
        );
        Ok(ids.into_iter().next().map(|video_id| Selection {
            video_id,
            reason: SelectionReason::FirstResult,
        }))
    }
}

fn log_ranking(ranking: &Ranking) {
    let (label, bucket) = if !ranking.preferred.is_empty() {
        ("preferred channels", &ranking.preferred)
    } else {
        ("other channels", &ranking.others)
    };

    if bucket.is_empty() {
        return;
    }

    info!("Found {} videos from {}", bucket.len(), label);
    for (i, c) in bucket.iter().take(3).enumerate() {
        info!(
            "  {}. {} - {} views - {}",
            i + 1,
            c.channel_name,
            c.view_count,
            c.url()
        );
    }
}
