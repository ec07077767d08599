use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::SymbolCatalog;
use crate::error::{CatalogError, ConfigError};
use crate::narrator::NarratorSettings;
use crate::sequencer::DEFAULT_PAUSE;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub assets_root: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub pause: Duration,
    pub narrator: NarratorSettings,
}

impl AppConfig {
    pub fn from_override(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let root = match path {
            Some(custom) => canonicalize_dir(&custom)?,
            None => default_assets_root()?,
        };
        Ok(Self {
            assets_root: root,
            catalog_path: None,
            pause: DEFAULT_PAUSE,
            narrator: NarratorSettings::default(),
        })
    }

    pub fn with_catalog(mut self, path: Option<PathBuf>) -> Self {
        self.catalog_path = path;
        self
    }

    pub fn with_pause_ms(mut self, millis: u64) -> Self {
        self.pause = Duration::from_millis(millis);
        self
    }

    pub fn with_voice_timing(mut self, poll_ms: u64, timeout_ms: u64) -> Self {
        self.narrator = NarratorSettings {
            poll_interval: Duration::from_millis(poll_ms),
            voice_timeout: Duration::from_millis(timeout_ms),
        };
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.narrator.poll_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("voice poll interval"));
        }
        if self.narrator.voice_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("voice timeout"));
        }
        Ok(())
    }

    /// The configured catalog file, or the built-in symbol set.
    pub fn load_catalog(&self) -> Result<SymbolCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => SymbolCatalog::load(path),
            None => Ok(SymbolCatalog::default()),
        }
    }
}

fn canonicalize_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let canonical = path.canonicalize().map_err(|source| ConfigError::Resolve {
        path: path.to_path_buf(),
        source,
    })?;
    if canonical.is_dir() {
        Ok(canonical)
    } else {
        Err(ConfigError::NotADirectory(canonical))
    }
}

fn default_assets_root() -> Result<PathBuf, ConfigError> {
    let from_exe = std::env::current_exe().ok().and_then(|exe| {
        exe.ancestors().find_map(|dir| {
            let candidate = dir.join("assets");
            candidate.is_dir().then_some(candidate)
        })
    });
    let from_cwd = || {
        std::env::current_dir()
            .ok()
            .map(|dir| dir.join("assets"))
            .filter(|candidate| candidate.is_dir())
    };
    from_exe
        .or_else(from_cwd)
        .ok_or(ConfigError::AssetsNotFound)
}
