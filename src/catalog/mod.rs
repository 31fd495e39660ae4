//! Phrase catalog for the curriculum.
//!
//! Two collections ship with the binary: the 40 numbered days and the
//! supplementary categories. Both are embedded JSON and are read-only
//! once loaded.

pub mod topics;

pub use topics::topic_for;

use crate::error::{KalimaError, Result};
use serde::{Deserialize, Serialize};

const DAYS_JSON: &str = include_str!("../../data/days.json");
const SUPPLEMENTARY_JSON: &str = include_str!("../../data/supplementary.json");

/// Supplementary category tags, in catalog order.
pub const CATEGORIES: [&str; 5] = ["education", "hobbies", "emotions", "daily_life", "comparisons"];

/// Highest day number in the curriculum.
pub const LAST_DAY: u32 = 40;

/// One phrase in its three renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRecord {
    #[serde(rename = "ar")]
    pub source_text: String,
    pub transliteration: String,
    #[serde(rename = "en")]
    pub translation: String,
}

impl PhraseRecord {
    /// Get the text for one field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Arabic => &self.source_text,
            Field::Transliteration => &self.transliteration,
            Field::English => &self.translation,
        }
    }
}

/// Which rendering of a phrase to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Arabic,
    Transliteration,
    English,
}

impl Field {
    /// All fields, in the order files are written.
    pub const ALL: [Field; 3] = [Field::Arabic, Field::Transliteration, Field::English];

    /// Suffix used in output file names.
    pub fn suffix(&self) -> &'static str {
        match self {
            Field::Arabic => "ar",
            Field::Transliteration => "transliteration",
            Field::English => "en",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Key of a catalog entry: a day number or a category tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EntryKey {
    Day(u32),
    Category(String),
}

impl EntryKey {
    /// Collection this key belongs to.
    pub fn collection(&self) -> Collection {
        match self {
            EntryKey::Day(_) => Collection::Days,
            EntryKey::Category(_) => Collection::Supplementary,
        }
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKey::Day(day) => write!(f, "day{}", day),
            EntryKey::Category(name) => write!(f, "{}", name),
        }
    }
}

impl std::str::FromStr for EntryKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Err("Entry key cannot be empty".to_string());
        }

        let digits = s.strip_prefix("day").unwrap_or(&s);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return digits
                .parse::<u32>()
                .map(EntryKey::Day)
                .map_err(|e| format!("Invalid day number '{}': {}", digits, e));
        }

        if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(EntryKey::Category(s))
        } else {
            Err(format!("Invalid entry key: {}", s))
        }
    }
}

impl TryFrom<String> for EntryKey {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntryKey> for String {
    fn from(key: EntryKey) -> Self {
        key.to_string()
    }
}

/// The two phrase collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Days,
    Supplementary,
}

impl Collection {
    /// Sub-directory under `text_files/` and `audio_files/`.
    pub fn subdir(&self) -> Option<&'static str> {
        match self {
            Collection::Days => None,
            Collection::Supplementary => Some("supplementary"),
        }
    }

    /// Every key in the collection, in curriculum order.
    pub fn keys(&self) -> Vec<EntryKey> {
        match self {
            Collection::Days => (1..=LAST_DAY).map(EntryKey::Day).collect(),
            Collection::Supplementary => CATEGORIES
                .iter()
                .map(|c| EntryKey::Category(c.to_string()))
                .collect(),
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Collection::Days => DAYS_JSON,
            Collection::Supplementary => SUPPLEMENTARY_JSON,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Days => write!(f, "days"),
            Collection::Supplementary => write!(f, "supplementary"),
        }
    }
}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "days" | "day" => Ok(Collection::Days),
            "supplementary" | "categories" => Ok(Collection::Supplementary),
            _ => Err(format!("Unknown collection: {}. Use days or supplementary.", s)),
        }
    }
}

/// A named group of phrases inside an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub phrases: Vec<PhraseRecord>,
}

/// One day or category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: EntryKey,
    pub title: String,
    pub sections: Vec<Section>,
}

impl CatalogEntry {
    /// Walk every phrase in catalog order, paired with its section name.
    pub fn phrases(&self) -> impl Iterator<Item = (&str, &PhraseRecord)> {
        self.sections
            .iter()
            .flat_map(|s| s.phrases.iter().map(move |p| (s.name.as_str(), p)))
    }

    /// Total number of phrases across all sections.
    pub fn phrase_count(&self) -> usize {
        self.sections.iter().map(|s| s.phrases.len()).sum()
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    entries: Vec<CatalogEntry>,
}

/// A loaded collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    collection: Collection,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Parse one of the embedded collections.
    pub fn load(collection: Collection) -> Result<Self> {
        Self::from_json(collection, collection.source())
    }

    /// Parse a collection from JSON text.
    pub fn from_json(collection: Collection, json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| KalimaError::Catalog(format!("Failed to parse {} catalog: {}", collection, e)))?;

        if let Some(stray) = file.entries.iter().find(|e| e.key.collection() != collection) {
            return Err(KalimaError::Catalog(format!(
                "Entry '{}' does not belong to the {} collection",
                stray.key, collection
            )));
        }

        Ok(Self {
            collection,
            entries: file.entries,
        })
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &EntryKey) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.key == key)
    }

    /// Look up an entry, failing with a descriptive error.
    pub fn require(&self, key: &EntryKey) -> Result<&CatalogEntry> {
        self.get(key).ok_or_else(|| {
            KalimaError::EntryNotFound(format!("{} in the {} catalog", key, self.collection))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_key() {
        assert_eq!("day7".parse::<EntryKey>().unwrap(), EntryKey::Day(7));
        assert_eq!("12".parse::<EntryKey>().unwrap(), EntryKey::Day(12));
        assert_eq!("Day3".parse::<EntryKey>().unwrap(), EntryKey::Day(3));
        assert_eq!(
            "daily_life".parse::<EntryKey>().unwrap(),
            EntryKey::Category("daily_life".to_string())
        );
        assert!("".parse::<EntryKey>().is_err());
        assert!("day 7!".parse::<EntryKey>().is_err());
    }

    #[test]
    fn test_entry_key_display_matches_persisted_keys() {
        assert_eq!(EntryKey::Day(40).to_string(), "day40");
        assert_eq!(EntryKey::Category("emotions".to_string()).to_string(), "emotions");
    }

    #[test]
    fn test_load_days() {
        let catalog = Catalog::load(Collection::Days).unwrap();
        assert_eq!(catalog.entries().len(), LAST_DAY as usize);

        let day1 = catalog.require(&EntryKey::Day(1)).unwrap();
        assert_eq!(day1.title, "Basic Greetings & Common Phrases");
        let (section, first) = day1.phrases().next().unwrap();
        assert_eq!(section, "Basic Greetings & Common Phrases");
        assert_eq!(first.source_text, "مرحبا");
        assert_eq!(first.transliteration, "Marhaba");
        assert_eq!(first.translation, "Hello");

        assert!(catalog.entries().iter().all(|e| e.phrase_count() > 0));
    }

    #[test]
    fn test_load_supplementary() {
        let catalog = Catalog::load(Collection::Supplementary).unwrap();
        let keys: Vec<String> = catalog.entries().iter().map(|e| e.key.to_string()).collect();
        assert_eq!(keys, CATEGORIES.to_vec());
        assert!(catalog.get(&EntryKey::Day(1)).is_none());
    }

    #[test]
    fn test_collection_keys() {
        let days = Collection::Days.keys();
        assert_eq!(days.first(), Some(&EntryKey::Day(1)));
        assert_eq!(days.last(), Some(&EntryKey::Day(40)));
        assert_eq!(Collection::Supplementary.keys().len(), 5);
    }

    #[test]
    fn test_rejects_entry_from_wrong_collection() {
        let json = r#"{"entries":[{"key":"education","title":"x","sections":[]}]}"#;
        assert!(Catalog::from_json(Collection::Days, json).is_err());
    }

    #[test]
    fn test_phrases_walk_sections_in_order() {
        let json = r#"{"entries":[{"key":"day1","title":"t","sections":[
            {"name":"A","phrases":[{"ar":"١","transliteration":"wahid","en":"one"}]},
            {"name":"B","phrases":[
                {"ar":"٢","transliteration":"ithnan","en":"two"},
                {"ar":"٣","transliteration":"thalatha","en":"three"}]}
        ]}]}"#;
        let catalog = Catalog::from_json(Collection::Days, json).unwrap();
        let entry = catalog.require(&EntryKey::Day(1)).unwrap();

        let walked: Vec<(&str, &str)> = entry
            .phrases()
            .map(|(s, p)| (s, p.field(Field::English)))
            .collect();
        assert_eq!(walked, vec![("A", "one"), ("B", "two"), ("B", "three")]);
        assert_eq!(entry.phrase_count(), 3);
    }
}
