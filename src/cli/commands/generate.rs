//! Days and supplementary command implementations.

use crate::catalog::{Catalog, Collection, EntryKey};
use crate::cli::preflight::{self, Operation};
use crate::cli::{format_elapsed, GenerateArgs, Output};
use crate::config::Settings;
use crate::orchestrator::{GenerateOptions, GenerationReport, Generator};
use crate::speech::LanguageFilter;
use anyhow::Result;
use std::time::Instant;

/// Run the days command.
pub async fn run_days(day: Option<u32>, args: &GenerateArgs, settings: Settings) -> Result<()> {
    let keys = match day {
        Some(n) => vec![EntryKey::Day(n)],
        None => Collection::Days.keys(),
    };
    run_generate(Collection::Days, keys, args, settings).await
}

/// Run the supplementary command.
pub async fn run_supplementary(
    category: Option<&str>,
    args: &GenerateArgs,
    settings: Settings,
) -> Result<()> {
    let keys = match category {
        Some(c) => vec![c.parse::<EntryKey>().map_err(anyhow::Error::msg)?],
        None => Collection::Supplementary.keys(),
    };
    run_generate(Collection::Supplementary, keys, args, settings).await
}

async fn run_generate(
    collection: Collection,
    keys: Vec<EntryKey>,
    args: &GenerateArgs,
    mut settings: Settings,
) -> Result<()> {
    let languages: LanguageFilter = args.language.parse().map_err(anyhow::Error::msg)?;

    let operation = if args.text_only {
        Operation::Text
    } else {
        Operation::Speech
    };
    if let Err(e) = preflight::check(operation, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'kalima doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(dir) = &args.output_dir {
        settings.general.output_dir = dir.clone();
    }

    let catalog = Catalog::load(collection)?;
    let generator = Generator::new(settings, args.text_only)?;
    let options = GenerateOptions {
        text_only: args.text_only,
        voice: args.voice.clone(),
        languages,
    };

    Output::info(&format!(
        "Generating {} {} entr{} into {}",
        keys.len(),
        collection,
        if keys.len() == 1 { "y" } else { "ies" },
        generator.output_dir().display()
    ));

    let start = Instant::now();
    let spinner = Output::spinner("Writing listings and audio...");
    let report = generator.run(&catalog, &keys, &options).await;
    spinner.finish_and_clear();

    print_report(&report, start.elapsed().as_secs_f64());

    if report.entries == 0 && !report.failures.is_empty() {
        return Err(anyhow::anyhow!("No entries were generated"));
    }
    Ok(())
}

fn print_report(report: &GenerationReport, elapsed: f64) {
    for failure in &report.failures {
        Output::warning(failure);
    }

    let summary = format!(
        "Processed {} entries: {} text files, {} audio files, {} failures ({})",
        report.entries,
        report.text_files.len(),
        report.audio_files.len(),
        report.failures.len(),
        format_elapsed(elapsed)
    );
    if report.failures.is_empty() {
        Output::success(&summary);
    } else {
        Output::warning(&summary);
    }
}
