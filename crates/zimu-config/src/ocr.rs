use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "zh".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

/// Which recognition backend to install at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerBackend {
    /// Fixed low-confidence result, captions fall back to DOM text
    #[default]
    Placeholder,
    /// Remote recognizer reached over HTTP
    Http,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// When false the placeholder backend is used regardless of `backend`
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub backend: RecognizerBackend,
    /// Recognizer URL for the http backend
    pub endpoint: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl OcrConfig {
    /// Backend that will actually be installed
    pub fn effective_backend(&self) -> RecognizerBackend {
        if !self.enabled || self.endpoint.is_empty() {
            RecognizerBackend::Placeholder
        } else {
            self.backend
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backend: RecognizerBackend::default(),
            endpoint: String::new(),
            language: default_language(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
