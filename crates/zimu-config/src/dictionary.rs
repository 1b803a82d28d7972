use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// When false only the sentinel annotation is produced
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Extra character tables merged over the embedded one, in order
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            additional_paths: vec![],
        }
    }
}
