use zimu_types::AnnotatedCharacter;

/// Text processing and lookup interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "zh", "ja", ...)
    fn language_code(&self) -> &str;

    /// Break text into annotatable tokens, dropping separators
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Annotate one token; unknown tokens get the sentinel annotation
    fn lookup(&self, token: &Token) -> AnnotatedCharacter;

    /// Annotations for every token of `text`, in text order
    fn annotate(&self, text: &str) -> Vec<AnnotatedCharacter> {
        self.tokenize(text)
            .iter()
            .map(|token| self.lookup(token))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    /// Byte offset of the token in the tokenized text
    pub position: usize,
}
