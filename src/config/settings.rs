//! Configuration settings for Kalima.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the YouTube Data API key.
pub const YOUTUBE_API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub speech: SpeechSettings,
    pub youtube: YoutubeSettings,
    pub videos: VideoFileSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory that receives `text_files/`, `audio_files/` and the video maps.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// OpenAI speech model (tts-1, tts-1-hd).
    pub model: String,
    /// Voice used for Arabic audio unless overridden on the command line.
    pub arabic_voice: String,
    /// Voice used for English audio unless overridden on the command line.
    pub english_voice: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            model: "tts-1".to_string(),
            arabic_voice: "nova".to_string(),
            english_voice: "alloy".to_string(),
        }
    }
}

/// YouTube search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API key. `YOUTUBE_API_KEY` takes precedence when set.
    pub api_key: Option<String>,
    /// Number of search results requested per topic.
    pub max_results: u32,
    /// Preferred result language.
    pub relevance_language: String,
    /// Shortest acceptable video, in seconds.
    pub min_duration_seconds: u64,
    /// Longest acceptable video, in seconds.
    pub max_duration_seconds: u64,
    /// Pause between topics to stay inside the API quota.
    pub request_delay_ms: u64,
    /// Channels whose videos win over more-viewed videos from elsewhere.
    pub preferred_channels: Vec<String>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: 10,
            relevance_language: "ar".to_string(),
            min_duration_seconds: 180,
            max_duration_seconds: 600,
            request_delay_ms: 1000,
            preferred_channels: default_preferred_channels(),
        }
    }
}

fn default_preferred_channels() -> Vec<String> {
    [
        "Arabic Pod 101",
        "Learn Arabic with Maha",
        "Arabic Khatawaat",
        "Learn Arabic with ArabicPod101.com",
        "Spoken Arabic Made Easy",
        "Arabic Mike",
        "Learn Arabic with Dalya",
        "Arabic with Nadia",
        "Arabic Anywhere",
        "Easy Arabic",
        "Learn Levantine Arabic",
        "Madinah Arabic",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Locations of the persisted video maps, relative to the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFileSettings {
    pub days_file: String,
    pub supplementary_file: String,
}

impl Default for VideoFileSettings {
    fn default() -> Self {
        Self {
            days_file: "videos.json".to_string(),
            supplementary_file: "videos_supplementary.json".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::KalimaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kalima")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Path of the day-number video map.
    pub fn days_video_path(&self) -> PathBuf {
        self.output_dir().join(&self.videos.days_file)
    }

    /// Path of the category video map.
    pub fn supplementary_video_path(&self) -> PathBuf {
        self.output_dir().join(&self.videos.supplementary_file)
    }

    /// Resolve the YouTube API key, preferring the environment over the config file.
    pub fn youtube_api_key(&self) -> Option<String> {
        std::env::var(YOUTUBE_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.youtube.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_lesson_window() {
        let settings = Settings::default();
        assert_eq!(settings.youtube.max_results, 10);
        assert_eq!(settings.youtube.min_duration_seconds, 180);
        assert_eq!(settings.youtube.max_duration_seconds, 600);
        assert_eq!(settings.youtube.preferred_channels.len(), 12);
        assert_eq!(settings.videos.days_file, "videos.json");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [youtube]
            max_results = 5

            [speech]
            arabic_voice = "shimmer"
            "#,
        )
        .unwrap();

        assert_eq!(settings.youtube.max_results, 5);
        assert_eq!(settings.youtube.request_delay_ms, 1000);
        assert_eq!(settings.speech.arabic_voice, "shimmer");
        assert_eq!(settings.speech.english_voice, "alloy");
        assert_eq!(settings.general.output_dir, ".");
    }

    #[test]
    fn test_video_paths_follow_output_dir() {
        let mut settings = Settings::default();
        settings.general.output_dir = "/srv/course".to_string();
        assert_eq!(settings.days_video_path(), PathBuf::from("/srv/course/videos.json"));
        assert_eq!(
            settings.supplementary_video_path(),
            PathBuf::from("/srv/course/videos_supplementary.json")
        );
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.speech.model = "tts-1-hd".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.speech.model, "tts-1-hd");
    }
}
