use std::collections::HashMap;

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;
use zimu_core::dictionary::{LexicalEntry, Lexicon, LexiconMetadata, LoadError};
use zimu_types::UsageExample;

// JSON structures for the character table format
#[derive(Debug, Deserialize)]
struct HanziJsonEntry {
    pinyin: String,
    translation: String,
    #[serde(default)]
    examples: Vec<HanziJsonExample>,
}

#[derive(Debug, Deserialize)]
struct HanziJsonExample {
    chinese: String,
    pinyin: String,
    english: String,
}

/// Single-character Chinese lexicon
#[derive(Debug, Default)]
pub struct HanziDictionary {
    entries: HashMap<String, LexicalEntry>,
}

impl HanziDictionary {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Load from a JSON object keyed by character
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let data: HashMap<String, HanziJsonEntry> = serde_json::from_str(json_str)
            .map_err(|e| LoadError::InvalidFormat(e.to_string()))?;

        let mut dict = Self::new();
        for (character, json_entry) in data {
            // Lookups are per grapheme, longer keys could never match
            if character.graphemes(true).count() != 1 {
                tracing::warn!("Skipping multi-character key '{}'", character);
                continue;
            }

            let entry = LexicalEntry {
                pronunciation: json_entry.pinyin,
                gloss: json_entry.translation,
                examples: json_entry
                    .examples
                    .into_iter()
                    .map(|e| UsageExample {
                        source_text: e.chinese,
                        pronunciation: e.pinyin,
                        translation: e.english,
                    })
                    .collect(),
            };
            dict.entries.insert(character, entry);
        }

        Ok(dict)
    }

    pub fn insert(&mut self, character: impl Into<String>, entry: LexicalEntry) {
        self.entries.insert(character.into(), entry);
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Merge another dictionary into this one
    /// Entries from the other dictionary override existing ones per character
    pub fn merge(mut self, other: HanziDictionary) -> Self {
        self.entries.extend(other.entries);
        self
    }
}

impl Lexicon for HanziDictionary {
    fn lookup(&self, character: &str) -> Option<&LexicalEntry> {
        self.entries.get(character)
    }

    fn metadata(&self) -> LexiconMetadata {
        LexiconMetadata {
            name: "Hanzi".to_string(),
            language: "zh".to_string(),
            entry_count: self.entries.len(),
        }
    }
}
