use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "docsearch.toml";
pub const INDEX_ENV: &str = "DOCSEARCH_INDEX";

/// Settings read from `docsearch.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Index file used when neither `--index` nor `DOCSEARCH_INDEX` is set
    pub index: Option<PathBuf>,

    /// Default result limit for `search`
    pub limit: Option<usize>,
}

impl CliConfig {
    /// Load an explicitly requested config file, or `docsearch.toml` if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let mut config = Self::parse(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        // Relative index paths are relative to the config file, not the cwd.
        if let (Some(index), Some(dir)) = (&config.index, path.parent()) {
            if index.is_relative() {
                config.index = Some(dir.join(index));
            }
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(Into::into)
    }

    /// Resolve the index path: flag, then environment, then config file
    pub fn resolve_index(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| std::env::var_os(INDEX_ENV).map(PathBuf::from))
            .or_else(|| self.index.clone())
            .with_context(|| {
                format!("No index file given (use --index, {INDEX_ENV}, or `index` in {DEFAULT_CONFIG_FILE})")
            })
    }
}
