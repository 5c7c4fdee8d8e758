use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use homedir::my_home;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.yaml";

/// Default log filter when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "info";
/// Default number of terms shown by `inspect`
const DEFAULT_PREVIEW_TERMS: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Model archive used when a command is not given one explicitly
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// tracing-subscriber filter directive (e.g. "info", "synvec=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// How many terms `inspect` lists
    #[serde(default = "default_preview_terms")]
    pub preview_terms: usize,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            preview_terms: DEFAULT_PREVIEW_TERMS,
            base_path: PathBuf::new(),
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_preview_terms() -> usize {
    DEFAULT_PREVIEW_TERMS
}

/// `SYNVEC_BASE_PATH`, or `~/.local/share/synvec`.
pub fn default_base_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SYNVEC_BASE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let home = my_home()
        .context("Could not determine home directory")?
        .context("Home directory path is empty")?;
    Ok(home.join(".local/share/synvec"))
}

impl Config {
    fn validate(&mut self) -> Result<()> {
        if self.preview_terms == 0 {
            bail!("preview_terms must be greater than 0");
        }

        if self.log_filter.trim().is_empty() {
            self.log_filter = default_log_filter();
        }

        Ok(())
    }

    pub fn load() -> Result<Self> {
        Self::load_with(&default_base_path()?)
    }

    pub fn load_with(base_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(base_path)
            .with_context(|| format!("Failed to create {}", base_path.display()))?;

        let config_path = base_path.join(CONFIG_FILE);

        // create new if does not exist
        if !config_path.exists() {
            let mut config = Self::default();
            config.base_path = base_path.to_path_buf();
            config.save()?;
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let mut config: Self = serde_yml::from_str(&config_str)
            .with_context(|| format!("{} is malformed", config_path.display()))?;

        config.base_path = base_path.to_path_buf();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = self.base_path.join(CONFIG_FILE);
        let temp_path = path.with_extension("yaml.tmp");

        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(&temp_path, config_str)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
