//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are available before starting
//! batch runs that would otherwise fail on every entry.

use crate::config::{Settings, YOUTUBE_API_KEY_ENV};
use crate::error::{KalimaError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Text listings only; nothing external.
    Text,
    /// Audio synthesis requires the OpenAI API key.
    Speech,
    /// Video resolution requires the YouTube API key.
    Videos,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Text => {}
        Operation::Speech => {
            check_openai_key()?;
        }
        Operation::Videos => {
            check_youtube_key(settings)?;
        }
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_openai_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(KalimaError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...' (or use --text-only)"
                .to_string(),
        )),
        Err(_) => Err(KalimaError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...' (or use --text-only)"
                .to_string(),
        )),
    }
}

/// Check the YouTube key from the environment or `youtube.api_key`.
fn check_youtube_key(settings: &Settings) -> Result<()> {
    match settings.youtube_api_key() {
        Some(_) => Ok(()),
        None => Err(KalimaError::Config(format!(
            "{} not set. Set it with: export {}='...' or add api_key under [youtube] in the config",
            YOUTUBE_API_KEY_ENV, YOUTUBE_API_KEY_ENV
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_text_no_requirements() {
        assert!(check(Operation::Text, &Settings::default()).is_ok());
    }

    #[test]
    fn test_youtube_key_from_config() {
        if std::env::var(YOUTUBE_API_KEY_ENV).is_ok() {
            return;
        }
        let mut settings = Settings::default();
        assert!(check(Operation::Videos, &settings).is_err());

        settings.youtube.api_key = Some("AIza-test".to_string());
        assert!(check(Operation::Videos, &settings).is_ok());
    }
}
