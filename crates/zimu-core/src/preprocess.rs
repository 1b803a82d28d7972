use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Lexicon key for a token surface
    ///
    /// The surface itself is shown to the user unchanged; only the key is
    /// composed, so decomposed input still finds its entry.
    fn process(&self, surface: &str) -> String {
        // NFC only: NFKC would fold full-width punctuation into ASCII
        surface.trim().nfc().collect()
    }
}
