use anyhow::{Context, Result};
use bills_meta::PipelineConfig;
use bills_similarity::SimilarityConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "bills.toml";

/// Contents of `bills.toml`; every table is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub pipeline: PipelineConfig,
    pub similarity: SimilarityConfig,
}

impl FileConfig {
    /// Load `explicit`, or `bills.toml` if it exists, or defaults.
    ///
    /// The extraction concurrency env override applies on top of the file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.is_file().then_some(fallback)
            }
        };

        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                let config = Self::parse(&raw)
                    .with_context(|| format!("Invalid config {}", path.display()))?;
                log::debug!("Loaded config from {}", path.display());
                config
            }
            None => Self::default(),
        };

        config.pipeline.concurrency =
            bills_meta::extract_concurrency_from_env(config.pipeline.concurrency);
        config.validate()?;
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.pipeline
            .validate()
            .map_err(|msg| anyhow::anyhow!("Invalid [pipeline] config: {msg}"))?;
        self.similarity
            .validate()
            .context("Invalid [similarity] config")?;
        Ok(())
    }
}
