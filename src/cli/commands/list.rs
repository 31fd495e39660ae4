//! List command implementation.

use crate::catalog::{Catalog, Collection};
use crate::cli::Output;
use anyhow::Result;

/// Run the list command.
pub fn run_list() -> Result<()> {
    for collection in [Collection::Days, Collection::Supplementary] {
        let catalog = Catalog::load(collection)?;

        Output::header(&format!("{} ({})", collection, catalog.entries().len()));
        println!();

        for entry in catalog.entries() {
            Output::entry_info(
                &entry.key.to_string(),
                &entry.title,
                entry.sections.len(),
                entry.phrase_count(),
            );
        }

        let total_phrases: usize = catalog.entries().iter().map(|e| e.phrase_count()).sum();
        println!();
        Output::kv("Total entries", &catalog.entries().len().to_string());
        Output::kv("Total phrases", &total_phrases.to_string());
    }

    Ok(())
}
