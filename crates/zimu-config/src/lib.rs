use std::env;

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::dictionary::DictionaryConfig;
use self::ocr::{OcrConfig, RecognizerBackend};
use self::translator::TranslatorConfig;

pub mod capture;
pub mod dictionary;
pub mod ocr;
pub mod translator;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub translator: TranslatorConfig,
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Defaults overridden by `ZIMU_*` environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(endpoint) = env::var("ZIMU_OCR_ENDPOINT") {
            if !endpoint.is_empty() {
                self.ocr.endpoint = endpoint;
                self.ocr.backend = RecognizerBackend::Http;
            }
        }

        if let Some(timeout) = env::var("ZIMU_OCR_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.ocr.timeout_ms = timeout;
        }

        if let Ok(api_key) = env::var("ZIMU_TRANSLATOR_API_KEY") {
            if !api_key.is_empty() {
                self.translator.api_key = api_key;
                self.translator.enabled = true;
            }
        }

        if let Some(timeout) = env::var("ZIMU_TRANSLATOR_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.translator.timeout_ms = timeout;
        }

        if let Ok(to_lang) = env::var("ZIMU_TARGET_LANG") {
            if !to_lang.is_empty() {
                self.translator.to_lang = to_lang;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.capture.supported_hosts, vec!["youtube.com".to_string()]);
        assert_eq!(config.capture.contrast_factor(), 1.5);
        assert!(!config.capture.high_contrast);
        assert!(config.capture.fallback_to_dom_text);
        assert_eq!(config.ocr.effective_backend(), RecognizerBackend::Placeholder);
        assert_eq!(config.ocr.language, "zh");
        assert!(!config.translator.enabled);
        assert_eq!(config.translator.to_lang, "en");
        assert!(config.dictionary.enabled);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "capture": { "high_contrast": true }, "ocr": { "timeout_ms": 250 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert!(config.capture.high_contrast);
        assert!(config.capture.fallback_to_dom_text);
        assert_eq!(config.capture.supported_hosts.len(), 1);
        assert_eq!(config.ocr.timeout_ms, 250);
        assert_eq!(config.ocr.language, "zh");
        assert_eq!(config.translator.provider, "deepl");
    }

    #[test]
    fn test_http_backend_needs_endpoint() {
        let json = r#"{ "ocr": { "backend": "http" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ocr.effective_backend(), RecognizerBackend::Placeholder);

        let json = r#"{ "ocr": { "backend": "http", "endpoint": "http://localhost:9000/ocr" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ocr.effective_backend(), RecognizerBackend::Http);
    }

    #[test]
    fn test_contrast_factor_is_clamped() {
        let mut capture = CaptureConfig::default();
        capture.contrast_factor = 3.5;
        assert_eq!(capture.contrast_factor(), 2.0);
        capture.contrast_factor = 0.2;
        assert_eq!(capture.contrast_factor(), 1.5);
        capture.contrast_factor = 1.8;
        assert_eq!(capture.contrast_factor(), 1.8);
    }

    #[test]
    fn test_supported_hosts() {
        let capture = CaptureConfig::default();
        assert!(capture.is_supported_host(Some("youtube.com")));
        assert!(capture.is_supported_host(Some("www.YouTube.com")));
        assert!(!capture.is_supported_host(Some("notyoutube.com")));
        assert!(!capture.is_supported_host(Some("vimeo.com")));
        assert!(!capture.is_supported_host(None));

        let open = CaptureConfig {
            supported_hosts: vec![],
            ..CaptureConfig::default()
        };
        assert!(open.is_supported_host(None));
        assert!(open.is_supported_host(Some("vimeo.com")));
    }
}
