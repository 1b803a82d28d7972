use std::path::Path;

use unicode_segmentation::UnicodeSegmentation;
use zimu_core::dictionary::Lexicon;
use zimu_core::language::{LanguageProcessor, Token};
use zimu_core::preprocess::Preprocessor;
use zimu_types::AnnotatedCharacter;

use crate::dictionary::HanziDictionary;
use crate::loader::HanziLoader;

/// Caption punctuation that is never annotated
pub const CAPTION_PUNCTUATION: [char; 12] = [
    '，', '。', '！', '？', '：', '；', '（', '）', '、', '"', '‘', '’',
];

/// Whitespace or caption punctuation
pub fn is_separator(grapheme: &str) -> bool {
    if grapheme.chars().all(char::is_whitespace) {
        return true;
    }

    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => CAPTION_PUNCTUATION.contains(&c),
        _ => false,
    }
}

/// Chinese language processor
pub struct ChineseProcessor {
    dictionary: HanziDictionary,
}

impl ChineseProcessor {
    /// Create a new Chinese processor with default configuration (embedded dictionary)
    pub fn new() -> Self {
        Self::with_additional_dicts(&[])
    }

    /// Create a new Chinese processor with additional dictionary paths
    pub fn with_additional_dicts(additional_paths: &[String]) -> Self {
        // Load embedded dictionary
        let mut dict = HanziLoader::load_embedded().unwrap_or_else(|e| {
            tracing::error!("Failed to load embedded dictionary: {}", e);
            tracing::warn!("Starting with empty dictionary");
            HanziDictionary::new()
        });

        // Load and merge additional dictionaries
        for path in additional_paths {
            match HanziLoader::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional dictionary from: {}", path);
                    dict = HanziLoader::merge(dict, additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load dictionary from {}: {}", path, e);
                }
            }
        }

        Self::from_dictionary(dict)
    }

    pub fn from_dictionary(dictionary: HanziDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &HanziDictionary {
        &self.dictionary
    }
}

impl Default for ChineseProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor for ChineseProcessor {}

impl LanguageProcessor for ChineseProcessor {
    fn language_code(&self) -> &str {
        "zh"
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.grapheme_indices(true)
            .filter(|(_, grapheme)| !is_separator(grapheme))
            .map(|(position, grapheme)| Token {
                surface: grapheme.to_string(),
                position,
            })
            .collect()
    }

    fn lookup(&self, token: &Token) -> AnnotatedCharacter {
        match self.dictionary.lookup(&self.process(&token.surface)) {
            Some(entry) => entry.annotate(&token.surface),
            None => AnnotatedCharacter::unknown(token.surface.as_str()),
        }
    }
}
