//! Videos command implementation.

use crate::catalog::{Collection, EntryKey};
use crate::cli::preflight::{self, Operation};
use crate::cli::{format_elapsed, Output, VideoAction};
use crate::config::Settings;
use crate::error::KalimaError;
use crate::orchestrator::{ResolutionReport, VideoResolver};
use crate::video::watch_url;
use crate::video_store::{Resolution, VideoEntry, VideoStore};
use anyhow::Result;
use std::time::Instant;

/// Run the videos command.
pub async fn run_videos(action: &VideoAction, settings: Settings) -> Result<()> {
    match action {
        VideoAction::Resolve {
            day,
            category,
            only,
        } => {
            let targets = resolve_targets(*day, category.as_deref(), only.as_deref())?;
            run_resolve(targets, &settings).await
        }
        VideoAction::List => run_list_videos(&settings),
        VideoAction::Reset { key } => run_reset(key, &settings),
    }
}

/// Work out which keys of which collections a resolve run covers.
fn resolve_targets(
    day: Option<u32>,
    category: Option<&str>,
    only: Option<&str>,
) -> Result<Vec<(Collection, Vec<EntryKey>)>> {
    if let Some(n) = day {
        return Ok(vec![(Collection::Days, vec![EntryKey::Day(n)])]);
    }
    if let Some(c) = category {
        let key: EntryKey = c.parse().map_err(anyhow::Error::msg)?;
        return Ok(vec![(Collection::Supplementary, vec![key])]);
    }

    let collections = match only {
        Some(name) => vec![name.parse::<Collection>().map_err(anyhow::Error::msg)?],
        None => vec![Collection::Days, Collection::Supplementary],
    };
    Ok(collections.into_iter().map(|c| (c, c.keys())).collect())
}

fn store_for(collection: Collection, settings: &Settings) -> VideoStore {
    match collection {
        Collection::Days => VideoStore::new(settings.days_video_path()),
        Collection::Supplementary => VideoStore::new(settings.supplementary_video_path()),
    }
}

async fn run_resolve(targets: Vec<(Collection, Vec<EntryKey>)>, settings: &Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Videos, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'kalima doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let resolver = VideoResolver::from_settings(settings)?;
    let start = Instant::now();
    let outcome = resolve_collections(&resolver, targets, settings).await;
    let total = &outcome.total;

    let mut summary = format!(
        "Resolved {}, already had {}, unresolved {}",
        total.resolved.len(),
        total.skipped,
        total.unresolved.len()
    );
    if !outcome.failed.is_empty() {
        summary.push_str(&format!(", failed collections {}", outcome.failed.len()));
    }
    summary.push_str(&format!(" ({})", format_elapsed(start.elapsed().as_secs_f64())));

    if total.unresolved.is_empty() && total.save_failures == 0 && outcome.failed.is_empty() {
        Output::success(&summary);
    } else {
        Output::warning(&summary);
    }
    if total.save_failures > 0 {
        Output::warning(&format!(
            "{} save(s) failed; those results will be searched again next run",
            total.save_failures
        ));
    }

    if !outcome.failed.is_empty() {
        let names: Vec<String> = outcome.failed.iter().map(|(c, _)| c.to_string()).collect();
        return Err(anyhow::anyhow!("Could not resolve {} videos", names.join(", ")));
    }
    Ok(())
}

/// Combined outcome of resolving several collections.
#[derive(Debug, Default)]
struct ResolveOutcome {
    total: ResolutionReport,
    /// Collections whose map could not be loaded, with the reason.
    failed: Vec<(Collection, String)>,
}

/// Resolve each collection in turn; a collection that fails does not stop the others.
async fn resolve_collections(
    resolver: &VideoResolver,
    targets: Vec<(Collection, Vec<EntryKey>)>,
    settings: &Settings,
) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();

    for (collection, keys) in targets {
        let store = store_for(collection, settings);
        Output::info(&format!(
            "Resolving {} {} keys into {}",
            keys.len(),
            collection,
            store.path().display()
        ));

        let spinner = Output::spinner("Searching YouTube...");
        let result = resolver.resolve(&store, &keys).await;
        spinner.finish_and_clear();

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                Output::error(&format!("Failed to resolve {} videos: {}", collection, e));
                outcome.failed.push((collection, e.to_string()));
                continue;
            }
        };

        for (key, id) in &report.resolved {
            Output::list_item(&format!("{}: {}", key, watch_url(id)));
        }
        for key in &report.unresolved {
            Output::warning(&format!("No suitable video found for {}", key));
        }

        outcome.total.resolved.extend(report.resolved);
        outcome.total.unresolved.extend(report.unresolved);
        outcome.total.skipped += report.skipped;
        outcome.total.save_failures += report.save_failures;
    }

    outcome
}

fn run_list_videos(settings: &Settings) -> Result<()> {
    for collection in [Collection::Days, Collection::Supplementary] {
        let store = store_for(collection, settings);
        let map = store.load()?;

        Output::header(&format!("{} ({})", collection, store.path().display()));
        println!();

        let mut missing = 0;
        for key in collection.keys() {
            let key = key.to_string();
            match map.resolution(&key) {
                Resolution::Resolved(id) => Output::video_info(&key, Some(&watch_url(id))),
                Resolution::Pending => Output::video_info(&key, None),
                Resolution::Absent => missing += 1,
            }
        }

        println!();
        Output::kv("Resolved", &map.resolved_count().to_string());
        Output::kv("Pending", &(map.len() - map.resolved_count()).to_string());
        Output::kv("Not searched yet", &missing.to_string());
    }

    Ok(())
}

fn run_reset(key: &str, settings: &Settings) -> Result<()> {
    let key: EntryKey = key.parse().map_err(anyhow::Error::msg)?;
    let collection = key.collection();
    if !collection.keys().contains(&key) {
        return Err(KalimaError::EntryNotFound(format!("{} in the {} catalog", key, collection)).into());
    }
    let store = store_for(collection, settings);
    let key = key.to_string();

    let mut map = store.load()?;
    match map.mark_pending(&key) {
        Some(VideoEntry::Resolved(previous)) => {
            Output::info(&format!("Cleared {} (was {})", key, watch_url(&previous)));
        }
        Some(VideoEntry::Pending) => {
            Output::info(&format!("{} was already pending", key));
        }
        None => {
            Output::info(&format!("Marked {} as pending", key));
        }
    }
    store.save(&map)?;

    Output::success(&format!("{} will be searched again on the next resolve", key));
    Ok(())
}
