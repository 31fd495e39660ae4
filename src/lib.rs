//! Kalima - Arabic phrase curriculum builder
//!
//! A CLI tool that turns a fixed catalog of Arabic phrases into study material.
//!
//! The name "Kalima" is the Arabic word for "word."
//!
//! # Overview
//!
//! Kalima allows you to:
//! - Write Arabic, transliteration and English listings for 40 days and 5 categories
//! - Read each listing aloud with text-to-speech
//! - Pick one YouTube lesson per day and category, remembered between runs
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `catalog` - Embedded phrase data and search topics
//! - `export` - Plain-text listings
//! - `speech` - Script composition, batching and text-to-speech
//! - `video` - YouTube search, filtering and ranking
//! - `video_store` - Persisted key-to-video map
//! - `orchestrator` - Generation and resolution pipelines
//!
//! # Example
//!
//! ```rust,no_run
//! use kalima::catalog::{Catalog, Collection, EntryKey};
//! use kalima::config::Settings;
//! use kalima::orchestrator::{GenerateOptions, Generator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let catalog = Catalog::load(Collection::Days)?;
//!     let generator = Generator::new(settings, true)?;
//!
//!     let options = GenerateOptions { text_only: true, ..Default::default() };
//!     let report = generator.run(&catalog, &[EntryKey::Day(1)], &options).await;
//!     println!("Wrote {} text files", report.text_files.len());
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod openai;
pub mod orchestrator;
pub mod speech;
pub mod video;
pub mod video_store;

pub use error::{KalimaError, Result};
