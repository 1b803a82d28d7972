use zimu_types::{AnnotatedCharacter, UsageExample};

/// Character lookup table
pub trait Lexicon: Send + Sync {
    /// Exact match on a single grapheme
    fn lookup(&self, character: &str) -> Option<&LexicalEntry>;

    /// Get lexicon metadata
    fn metadata(&self) -> LexiconMetadata;
}

/// Linguistic data stored for one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalEntry {
    pub pronunciation: String,
    pub gloss: String,
    pub examples: Vec<UsageExample>,
}

impl LexicalEntry {
    pub fn annotate(&self, character: &str) -> AnnotatedCharacter {
        AnnotatedCharacter {
            character: character.to_string(),
            pronunciation: self.pronunciation.clone(),
            gloss: self.gloss.clone(),
            examples: self.examples.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LexiconMetadata {
    pub name: String,
    pub language: String,
    pub entry_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
