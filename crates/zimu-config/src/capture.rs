use serde::{Deserialize, Serialize};

pub const MIN_CONTRAST_FACTOR: f32 = 1.5;
pub const MAX_CONTRAST_FACTOR: f32 = 2.0;

fn default_supported_hosts() -> Vec<String> {
    vec!["youtube.com".to_string()]
}

fn default_contrast_factor() -> f32 {
    MIN_CONTRAST_FACTOR
}

fn default_fallback() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Hosts captures may run on; empty allows every host
    #[serde(default = "default_supported_hosts")]
    pub supported_hosts: Vec<String>,
    #[serde(default = "default_contrast_factor")]
    pub contrast_factor: f32,
    /// Binarize the caption crop before recognition
    pub high_contrast: bool,
    /// Finish with DOM text when the screenshot cannot be taken
    #[serde(default = "default_fallback")]
    pub fallback_to_dom_text: bool,
}

impl CaptureConfig {
    /// Contrast factor clamped into the supported range
    pub fn contrast_factor(&self) -> f32 {
        if self.contrast_factor.is_nan() {
            return MIN_CONTRAST_FACTOR;
        }
        self.contrast_factor
            .clamp(MIN_CONTRAST_FACTOR, MAX_CONTRAST_FACTOR)
    }

    /// Subdomains of a supported host are supported too
    pub fn is_supported_host(&self, host: Option<&str>) -> bool {
        if self.supported_hosts.is_empty() {
            return true;
        }
        let Some(host) = host else {
            return false;
        };
        let host = host.trim().trim_end_matches('.').to_lowercase();

        self.supported_hosts.iter().any(|allowed| {
            let allowed = allowed.to_lowercase();
            host == allowed || host.ends_with(&format!(".{allowed}"))
        })
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            supported_hosts: default_supported_hosts(),
            contrast_factor: default_contrast_factor(),
            high_contrast: false,
            fallback_to_dom_text: default_fallback(),
        }
    }
}
