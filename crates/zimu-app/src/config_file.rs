use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use zimu_config::Config;

/// Config file picked up from the working directory when none is given
const DEFAULT_CONFIG_FILE: &str = "zimu.json";

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Load the config, then apply `ZIMU_*` environment overrides
///
/// An explicit path must exist. Without one, `zimu.json` in the working
/// directory is used if present, otherwise built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };

    match path {
        Some(path) => {
            let mut config = read_config_file(&path)?;
            config.apply_env();
            Ok(config)
        }
        None => {
            tracing::debug!("No config file, using defaults");
            Ok(Config::new())
        }
    }
}
