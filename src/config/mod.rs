//! Configuration module for Kalima.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    GeneralSettings, Settings, SpeechSettings, VideoFileSettings, YoutubeSettings,
    YOUTUBE_API_KEY_ENV,
};
