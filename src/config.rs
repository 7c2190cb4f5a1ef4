use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::models::{BackendConfig, Config};

pub fn load_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Load the config file once. With `--backend-url` given the file is optional:
/// a missing one is skipped quietly, an unreadable one with a warning.
pub fn load_optional(path: &Path, backend_url: Option<&str>) -> Result<Option<Config>> {
    match load_config(path) {
        Ok(cfg) => Ok(Some(cfg)),
        Err(e) if backend_url.is_some() => {
            if path.exists() {
                warn!("Ignoring config file, token and server settings not applied: {:#}", e);
            } else {
                debug!("No config file: {:#}", e);
            }
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Backend settings from `--backend-url` if given, otherwise from the config file.
/// A token from the config file is kept either way.
pub fn resolve_backend(cfg: Option<&Config>, backend_url: Option<&str>) -> Result<BackendConfig> {
    match (backend_url, cfg) {
        (Some(url), cfg) => Ok(BackendConfig {
            base_url: url.to_string(),
            token: cfg.and_then(|c| c.backend.token.clone()),
        }),
        (None, Some(cfg)) => Ok(cfg.backend.clone()),
        (None, None) => bail!("No backend configured: pass --backend-url or a config file"),
    }
}
