//! Plain-text phrase listings.
//!
//! Each listing holds one field of every phrase in an entry, grouped under
//! the section headings:
//!
//! ```text
//!
//! Numbers 0-10
//! ------------
//! zero
//! one
//! ```

use crate::catalog::{CatalogEntry, Collection, EntryKey, Field};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory (under the output root) that receives text listings.
pub const TEXT_DIR: &str = "text_files";

/// Render one field of an entry as a text listing.
pub fn render_listing(entry: &CatalogEntry, field: Field) -> String {
    let mut output = String::new();

    for section in &entry.sections {
        output.push('\n');
        output.push_str(&section.name);
        output.push('\n');
        output.push_str(&"-".repeat(section.name.chars().count()));
        output.push('\n');

        for phrase in &section.phrases {
            output.push_str(phrase.field(field));
            output.push('\n');
        }
    }

    output
}

/// Path of the listing for an entry and field.
pub fn text_path(output_dir: &Path, collection: Collection, key: &EntryKey, field: Field) -> PathBuf {
    let mut dir = output_dir.join(TEXT_DIR);
    if let Some(sub) = collection.subdir() {
        dir = dir.join(sub);
    }
    dir.join(format!("{}_{}.txt", key, field.suffix()))
}

/// Write the listing for one field, creating directories as needed.
pub fn write_text_file(
    output_dir: &Path,
    collection: Collection,
    entry: &CatalogEntry,
    field: Field,
) -> Result<PathBuf> {
    let path = text_path(output_dir, collection, &entry.key, field);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, render_listing(entry, field))?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PhraseRecord, Section};

    fn sample_entry() -> CatalogEntry {
        CatalogEntry {
            key: EntryKey::Day(2),
            title: "Numbers and Counting".to_string(),
            sections: vec![
                Section {
                    name: "Numbers".to_string(),
                    phrases: vec![
                        PhraseRecord {
                            source_text: "صفر".to_string(),
                            transliteration: "sifr".to_string(),
                            translation: "zero".to_string(),
                        },
                        PhraseRecord {
                            source_text: "واحد".to_string(),
                            transliteration: "wahid".to_string(),
                            translation: "one".to_string(),
                        },
                    ],
                },
                Section {
                    name: "عد".to_string(),
                    phrases: vec![PhraseRecord {
                        source_text: "كم؟".to_string(),
                        transliteration: "kam?".to_string(),
                        translation: "How many?".to_string(),
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_render_english_listing() {
        let listing = render_listing(&sample_entry(), Field::English);
        assert_eq!(listing, "\nNumbers\n-------\nzero\none\n\nعد\n--\nHow many?\n");
    }

    #[test]
    fn test_underline_counts_characters_not_bytes() {
        let listing = render_listing(&sample_entry(), Field::Arabic);
        assert!(listing.contains("\nعد\n--\nكم؟\n"));
    }

    #[test]
    fn test_text_paths() {
        let root = Path::new("/out");
        assert_eq!(
            text_path(root, Collection::Days, &EntryKey::Day(2), Field::Transliteration),
            PathBuf::from("/out/text_files/day2_transliteration.txt")
        );
        assert_eq!(
            text_path(
                root,
                Collection::Supplementary,
                &EntryKey::Category("hobbies".to_string()),
                Field::Arabic
            ),
            PathBuf::from("/out/text_files/supplementary/hobbies_ar.txt")
        );
    }

    #[test]
    fn test_write_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_text_file(dir.path(), Collection::Days, &sample_entry(), Field::Transliteration)
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("sifr\nwahid\n"));
    }
}
