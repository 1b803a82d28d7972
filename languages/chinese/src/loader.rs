use std::path::Path;

use zimu_core::dictionary::LoadError;

use crate::dictionary::HanziDictionary;

pub struct HanziLoader;

impl HanziLoader {
    /// Load embedded dictionary data
    pub fn load_embedded() -> Result<HanziDictionary, LoadError> {
        let json = include_str!("../data/hanzi.json");
        tracing::info!("Loading embedded Hanzi dictionary...");
        let dict = HanziDictionary::from_json(json)?;
        tracing::info!("Loaded {} dictionary entries", dict.entry_count());
        Ok(dict)
    }

    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<HanziDictionary, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading Hanzi dictionary from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let dict = HanziDictionary::from_json(&json)?;
        tracing::info!("Loaded {} dictionary entries from file", dict.entry_count());
        Ok(dict)
    }

    /// Merge two dictionaries (later entries override earlier ones)
    pub fn merge(base: HanziDictionary, additional: HanziDictionary) -> HanziDictionary {
        base.merge(additional)
    }
}
