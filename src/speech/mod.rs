//! Speech synthesis for phrase entries.
//!
//! An entry is read aloud as one script: every phrase in catalog order,
//! each followed by a pause mark suited to its language.

mod openai;

pub use openai::OpenAISpeech;

use crate::catalog::{CatalogEntry, Collection, EntryKey, Field};
use crate::config::SpeechSettings;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Directory (under the output root) that receives audio files.
pub const AUDIO_DIR: &str = "audio_files";

/// Longest input accepted by a single synthesis request, in characters.
pub const MAX_BATCH_CHARS: usize = 4096;

/// Pause mark appended to each Arabic phrase.
pub const ARABIC_SEPARATOR: &str = "، ";

/// Pause mark appended to each English phrase.
pub const ENGLISH_SEPARATOR: &str = ". ";

/// A language audio is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioLanguage {
    Arabic,
    English,
}

impl AudioLanguage {
    /// Phrase field read aloud for this language.
    pub fn field(&self) -> Field {
        match self {
            AudioLanguage::Arabic => Field::Arabic,
            AudioLanguage::English => Field::English,
        }
    }

    pub fn separator(&self) -> &'static str {
        match self {
            AudioLanguage::Arabic => ARABIC_SEPARATOR,
            AudioLanguage::English => ENGLISH_SEPARATOR,
        }
    }

    /// Voice from settings, unless an override is given.
    pub fn voice<'a>(&self, settings: &'a SpeechSettings, override_voice: Option<&'a str>) -> &'a str {
        match override_voice {
            Some(voice) => voice,
            None => match self {
                AudioLanguage::Arabic => &settings.arabic_voice,
                AudioLanguage::English => &settings.english_voice,
            },
        }
    }
}

impl std::fmt::Display for AudioLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field().suffix())
    }
}

/// Which languages to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    Arabic,
    English,
    #[default]
    Both,
}

impl LanguageFilter {
    /// Languages selected by the filter, Arabic first.
    pub fn languages(&self) -> &'static [AudioLanguage] {
        match self {
            LanguageFilter::Arabic => &[AudioLanguage::Arabic],
            LanguageFilter::English => &[AudioLanguage::English],
            LanguageFilter::Both => &[AudioLanguage::Arabic, AudioLanguage::English],
        }
    }
}

impl std::str::FromStr for LanguageFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ar" | "arabic" => Ok(LanguageFilter::Arabic),
            "en" | "english" => Ok(LanguageFilter::English),
            "both" => Ok(LanguageFilter::Both),
            _ => Err(format!("Unknown language: {}. Use ar, en, or both.", s)),
        }
    }
}

/// Trait for text-to-speech providers.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize text with the named voice, returning MP3 bytes.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}

/// Build the script read aloud for one entry.
pub fn compose_script(entry: &CatalogEntry, language: AudioLanguage) -> String {
    let separator = language.separator();
    let field = language.field();

    entry.phrases().fold(String::new(), |mut script, (_, phrase)| {
        script.push_str(phrase.field(field));
        script.push_str(separator);
        script
    })
}

/// Split a script into request-sized batches at separator boundaries.
///
/// A single phrase longer than `max_chars` is cut on character boundaries.
pub fn split_into_batches(script: &str, separator: &str, max_chars: usize) -> Vec<String> {
    let mut batches = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for piece in script.split_inclusive(separator) {
        let piece_chars = piece.chars().count();

        if current_chars + piece_chars > max_chars && !current.is_empty() {
            batches.push(std::mem::take(&mut current).trim_end().to_string());
            current_chars = 0;
        }

        if piece_chars > max_chars {
            let chars: Vec<char> = piece.chars().collect();
            for chunk in chars.chunks(max_chars) {
                batches.push(chunk.iter().collect());
            }
            continue;
        }

        current.push_str(piece);
        current_chars += piece_chars;
    }

    let rest = current.trim_end();
    if !rest.is_empty() {
        batches.push(rest.to_string());
    }

    batches
}

/// Path of the audio file for an entry and language.
pub fn audio_path(
    output_dir: &Path,
    collection: Collection,
    key: &EntryKey,
    language: AudioLanguage,
) -> PathBuf {
    let mut dir = output_dir.join(AUDIO_DIR);
    if let Some(sub) = collection.subdir() {
        dir = dir.join(sub);
    }
    dir.join(format!("{}_{}.mp3", key, language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PhraseRecord, Section};

    fn entry() -> CatalogEntry {
        let phrase = |ar: &str, en: &str| PhraseRecord {
            source_text: ar.to_string(),
            transliteration: String::new(),
            translation: en.to_string(),
        };
        CatalogEntry {
            key: EntryKey::Category("emotions".to_string()),
            title: "Emotions & Feelings".to_string(),
            sections: vec![
                Section {
                    name: "Basic".to_string(),
                    phrases: vec![phrase("سعيد", "happy"), phrase("حزين", "sad")],
                },
                Section {
                    name: "More".to_string(),
                    phrases: vec![phrase("متعب", "tired")],
                },
            ],
        }
    }

    #[test]
    fn test_compose_arabic_script() {
        assert_eq!(
            compose_script(&entry(), AudioLanguage::Arabic),
            "سعيد، حزين، متعب، "
        );
    }

    #[test]
    fn test_compose_english_script() {
        assert_eq!(
            compose_script(&entry(), AudioLanguage::English),
            "happy. sad. tired. "
        );
    }

    #[test]
    fn test_parse_language_filter() {
        assert_eq!("ar".parse::<LanguageFilter>().unwrap(), LanguageFilter::Arabic);
        assert_eq!("EN".parse::<LanguageFilter>().unwrap(), LanguageFilter::English);
        assert_eq!("both".parse::<LanguageFilter>().unwrap(), LanguageFilter::Both);
        assert!("fr".parse::<LanguageFilter>().is_err());
        assert_eq!(LanguageFilter::Both.languages().len(), 2);
    }

    #[test]
    fn test_voice_override() {
        let settings = SpeechSettings::default();
        assert_eq!(AudioLanguage::Arabic.voice(&settings, None), "nova");
        assert_eq!(AudioLanguage::English.voice(&settings, None), "alloy");
        assert_eq!(AudioLanguage::English.voice(&settings, Some("onyx")), "onyx");
    }

    #[test]
    fn test_short_script_is_one_batch() {
        let batches = split_into_batches("happy. sad. tired. ", ENGLISH_SEPARATOR, MAX_BATCH_CHARS);
        assert_eq!(batches, vec!["happy. sad. tired.".to_string()]);
    }

    #[test]
    fn test_batches_break_between_phrases() {
        let batches = split_into_batches("aaaa. bbbb. cccc. ", ENGLISH_SEPARATOR, 12);
        assert_eq!(batches, vec!["aaaa. bbbb.".to_string(), "cccc.".to_string()]);
        assert!(batches.iter().all(|b| b.chars().count() <= 12));
    }

    #[test]
    fn test_oversized_phrase_is_cut() {
        let script = format!("{}، ", "ب".repeat(25));
        let batches = split_into_batches(&script, ARABIC_SEPARATOR, 10);
        assert!(batches.len() >= 3);
        assert!(batches.iter().all(|b| b.chars().count() <= 10));
    }

    #[test]
    fn test_empty_script_has_no_batches() {
        assert!(split_into_batches("", ENGLISH_SEPARATOR, MAX_BATCH_CHARS).is_empty());
    }

    #[test]
    fn test_audio_paths() {
        let root = Path::new("out");
        assert_eq!(
            audio_path(root, Collection::Days, &EntryKey::Day(9), AudioLanguage::Arabic),
            PathBuf::from("out/audio_files/day9_ar.mp3")
        );
        assert_eq!(
            audio_path(
                root,
                Collection::Supplementary,
                &EntryKey::Category("education".to_string()),
                AudioLanguage::English
            ),
            PathBuf::from("out/audio_files/supplementary/education_en.mp3")
        );
    }
}
