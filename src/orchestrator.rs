//! Batch pipelines for Kalima.
//!
//! Two independent runs share the catalog key space:
//! - generation writes text listings and synthesizes audio per entry;
//! - resolution picks a video per entry and records it in the video map.
//!
//! Both process one entry at a time and carry on past per-entry failures.

use crate::catalog::{topic_for, Catalog, CatalogEntry, Collection, EntryKey, Field};
use crate::config::Settings;
use crate::error::{KalimaError, Result};
use crate::export::write_text_file;
use crate::speech::{
    audio_path, compose_script, split_into_batches, AudioLanguage, LanguageFilter, OpenAISpeech,
    SpeechSynthesizer, MAX_BATCH_CHARS,
};
use crate::video::{SelectionPolicy, VideoSelector, YoutubeDataApi};
use crate::video_store::{Resolution, VideoStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Skip audio synthesis.
    pub text_only: bool,
    /// Voice for every language, instead of the per-language defaults.
    pub voice: Option<String>,
    /// Languages to synthesize.
    pub languages: LanguageFilter,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub entries: usize,
    pub text_files: Vec<PathBuf>,
    pub audio_files: Vec<PathBuf>,
    pub failures: Vec<String>,
}

/// Writes text listings and audio for catalog entries.
pub struct Generator {
    settings: Settings,
    output_dir: PathBuf,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

impl Generator {
    /// Create a generator; audio uses the OpenAI speech API unless `text_only`.
    pub fn new(settings: Settings, text_only: bool) -> Result<Self> {
        let synthesizer: Option<Arc<dyn SpeechSynthesizer>> = if text_only {
            None
        } else {
            Some(Arc::new(OpenAISpeech::new(&settings.speech.model)?))
        };
        let output_dir = settings.output_dir();

        Ok(Self {
            settings,
            output_dir,
            synthesizer,
        })
    }

    /// Create a generator with a custom synthesizer.
    pub fn with_synthesizer(
        settings: Settings,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        let output_dir = settings.output_dir();
        Self {
            settings,
            output_dir,
            synthesizer,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate material for each key in turn.
    #[instrument(skip(self, catalog, keys, options), fields(collection = %catalog.collection()))]
    pub async fn run(
        &self,
        catalog: &Catalog,
        keys: &[EntryKey],
        options: &GenerateOptions,
    ) -> GenerationReport {
        let mut report = GenerationReport::default();

        for key in keys {
            let entry = match catalog.require(key) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping {}: {}", key, e);
                    report.failures.push(e.to_string());
                    continue;
                }
            };

            info!("Processing {} ({})", key, entry.title);
            report.entries += 1;
            self.generate_entry(catalog.collection(), entry, options, &mut report)
                .await;
        }

        report
    }

    async fn generate_entry(
        &self,
        collection: Collection,
        entry: &CatalogEntry,
        options: &GenerateOptions,
        report: &mut GenerationReport,
    ) {
        for field in Field::ALL {
            match write_text_file(&self.output_dir, collection, entry, field) {
                Ok(path) => report.text_files.push(path),
                Err(e) => {
                    warn!("Failed to write {} {} listing: {}", entry.key, field, e);
                    report.failures.push(format!("{} {} text: {}", entry.key, field, e));
                }
            }
        }

        if options.text_only {
            return;
        }

        for &language in options.languages.languages() {
            let voice = language.voice(&self.settings.speech, options.voice.as_deref());
            match self.synthesize_entry(collection, entry, language, voice).await {
                Ok(path) => report.audio_files.push(path),
                Err(e) => {
                    warn!("Failed to synthesize {} {} audio: {}", entry.key, language, e);
                    report.failures.push(format!("{} {} audio: {}", entry.key, language, e));
                }
            }
        }
    }

    /// Synthesize one language of an entry and write the MP3.
    pub async fn synthesize_entry(
        &self,
        collection: Collection,
        entry: &CatalogEntry,
        language: AudioLanguage,
        voice: &str,
    ) -> Result<PathBuf> {
        let synthesizer = self.synthesizer.as_ref().ok_or_else(|| {
            KalimaError::Speech("No speech synthesizer configured (text-only mode)".to_string())
        })?;

        let script = compose_script(entry, language);
        let batches = split_into_batches(&script, language.separator(), MAX_BATCH_CHARS);
        if batches.is_empty() {
            return Err(KalimaError::Speech(format!("{} has no phrases to read", entry.key)));
        }

        let start = Instant::now();
        let mut audio = Vec::new();
        for batch in &batches {
            audio.extend(synthesizer.synthesize(batch, voice).await?);
        }

        let path = audio_path(&self.output_dir, collection, &entry.key, language);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &audio).await?;

        info!(
            "Saved {} ({} batches, {:.2}s)",
            path.display(),
            batches.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(path)
    }
}

/// Outcome of a resolution run.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    /// Keys resolved during this run, with their video ids.
    pub resolved: Vec<(String, String)>,
    /// Keys that already had a video.
    pub skipped: usize,
    /// Keys for which no video could be found.
    pub unresolved: Vec<String>,
    /// Saves that failed; the in-memory map kept the result.
    pub save_failures: usize,
}

/// Finds and records a video for each catalog key.
pub struct VideoResolver {
    selector: VideoSelector,
    delay: Duration,
}

impl VideoResolver {
    pub fn new(selector: VideoSelector, delay: Duration) -> Self {
        Self { selector, delay }
    }

    /// Build a resolver against the YouTube Data API.
    ///
    /// Fails before any request is made when no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.youtube_api_key().ok_or_else(|| {
            KalimaError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                crate::config::YOUTUBE_API_KEY_ENV,
                crate::config::YOUTUBE_API_KEY_ENV
            ))
        })?;

        let search = Arc::new(YoutubeDataApi::new(&api_key)?);
        let selector = VideoSelector::new(search, SelectionPolicy::from_settings(&settings.youtube));
        Ok(Self::new(
            selector,
            Duration::from_millis(settings.youtube.request_delay_ms),
        ))
    }

    /// Resolve every key that has no video yet, saving after each success.
    #[instrument(skip(self, store, keys), fields(path = %store.path().display()))]
    pub async fn resolve(&self, store: &VideoStore, keys: &[EntryKey]) -> Result<ResolutionReport> {
        let mut map = store.load()?;
        let mut report = ResolutionReport::default();
        let mut searched = false;

        for key in keys {
            let key_str = key.to_string();

            match map.resolution(&key_str) {
                Resolution::Resolved(id) => {
                    info!("Already have video for {} ({})", key_str, id);
                    report.skipped += 1;
                    continue;
                }
                Resolution::Pending => {
                    info!("Empty video for {}, searching for a new one", key_str);
                }
                Resolution::Absent => {}
            }

            if searched && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            searched = true;

            let topic = topic_for(key);
            let Some(selection) = self.selector.select(topic).await else {
                warn!("No suitable video found for {}", key_str);
                report.unresolved.push(key_str);
                continue;
            };

            info!(
                "Found video for {}: {} ({})",
                key_str,
                crate::video::watch_url(&selection.video_id),
                selection.reason
            );
            map.resolve(&key_str, &selection.video_id);
            report.resolved.push((key_str, selection.video_id));

            if let Err(e) = store.save(&map) {
                warn!("Failed to save {}: {}", store.path().display(), e);
                report.save_failures += 1;
            }
        }

        Ok(report)
    }
}
