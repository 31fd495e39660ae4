//! OpenAI text-to-speech implementation.

use super::{SpeechSynthesizer, MAX_BATCH_CHARS};
use crate::error::{KalimaError, Result};
use crate::openai::create_client;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, Voice};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// OpenAI-based speech synthesizer.
pub struct OpenAISpeech {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAISpeech {
    /// Create a synthesizer for the given model (tts-1, tts-1-hd, ...).
    pub fn new(model: &str) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: model.to_string(),
        })
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

/// Map a voice name onto the provider's voice set.
fn parse_voice(name: &str) -> Voice {
    match name.to_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        other => {
            warn!("Unknown voice '{}', using alloy", other);
            Voice::Alloy
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeech {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        if text.chars().count() > MAX_BATCH_CHARS {
            return Err(KalimaError::Speech(format!(
                "Input of {} characters exceeds the {} character limit",
                text.chars().count(),
                MAX_BATCH_CHARS
            )));
        }

        let request = CreateSpeechRequestArgs::default()
            .model(self.speech_model())
            .voice(parse_voice(voice))
            .input(text)
            .build()
            .map_err(|e| KalimaError::Speech(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| KalimaError::OpenAI(format!("Speech API error: {}", e)))?;

        debug!("Received {} bytes of audio", response.bytes.len());
        Ok(response.bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voice() {
        assert!(matches!(parse_voice("Nova"), Voice::Nova));
        assert!(matches!(parse_voice("shimmer"), Voice::Shimmer));
        assert!(matches!(parse_voice("ar-EG-SalmaNeural"), Voice::Alloy));
    }
}
