use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embedded::EmbeddedSource;
use crate::error::{Error, Result};
use crate::locale::{Locale, REFERENCE_LOCALE};
use crate::source::{FsSource, LayeredSource, default_data_dir};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "datamirage.toml";
/// Environment variable overriding `data_dir`.
pub const DATA_DIR_ENV: &str = "DATAMIRAGE_DATA_DIR";

/// Runtime configuration shared by the generator, validator and CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirageConfig {
    /// Root of `<locale>/<category>.yaml` documents on disk.
    pub data_dir: Option<PathBuf>,
    /// Default generation locale code.
    pub locale: Option<String>,
    /// Seed for reproducible generation.
    pub seed: Option<u64>,
    /// Fall back to the packaged documents when the data directory lacks one.
    pub embedded_fallback: bool,
}

impl Default for MirageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            locale: None,
            seed: None,
            embedded_fallback: true,
        }
    }
}

impl MirageConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Load `explicit` if given, else `datamirage.toml` when present, else
    /// defaults; then apply the environment override.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)?
                } else {
                    Self::default()
                }
            }
        };
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.trim().is_empty()
        {
            config.data_dir = Some(PathBuf::from(dir));
        }
        Ok(config)
    }

    /// Configured locale, or the reference locale when unset or unsupported.
    pub fn resolved_locale(&self) -> Locale {
        match self.locale.as_deref() {
            Some(code) => Locale::parse(code).unwrap_or_else(|| {
                tracing::warn!(
                    event = "unsupported_locale",
                    locale = code,
                    fallback = %REFERENCE_LOCALE
                );
                REFERENCE_LOCALE
            }),
            None => REFERENCE_LOCALE,
        }
    }

    /// Filesystem layer (configured directory, or the crate's data
    /// directory) followed by the embedded layer when enabled.
    pub fn document_source(&self) -> LayeredSource {
        let root = self.data_dir.clone().unwrap_or_else(default_data_dir);
        let mut source = LayeredSource::new().with_layer(FsSource::new(root));
        if self.embedded_fallback {
            source.push(Box::new(EmbeddedSource));
        }
        source
    }
}
