use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::errors::{EngineError, EngineResult};
use crate::utils::format_amount;

const CONFIG_DIR_NAME: &str = "installment_engine";
const CONFIG_FILE_NAME: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// What to do with transactions whose category id does not resolve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UncategorizedPolicy {
    /// Drop the transaction's entries and plan from derived views.
    #[default]
    Omit,
    /// Keep them, attached to a synthetic "uncategorized" category.
    Sentinel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub locale: String,
    pub currency: String,
    pub uncategorized_policy: UncategorizedPolicy,
    pub uncategorized_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            uncategorized_policy: UncategorizedPolicy::Omit,
            uncategorized_label: "Uncategorized".into(),
        }
    }
}

impl EngineConfig {
    pub fn with_policy(mut self, policy: UncategorizedPolicy) -> Self {
        self.uncategorized_policy = policy;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>, locale: impl Into<String>) -> Self {
        self.currency = currency.into();
        self.locale = locale.into();
        self
    }

    /// Renders `value` in the configured currency and locale.
    pub fn format_amount(&self, value: f64) -> String {
        format_amount(value, &self.currency, &self.locale)
    }
}

/// Loads and stores [`EngineConfig`] as pretty JSON.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses the platform configuration directory.
    pub fn new() -> EngineResult<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine the platform configuration directory",
            )
        })?;
        Self::with_base_dir(base.join(CONFIG_DIR_NAME))
    }

    pub fn with_base_dir(base: PathBuf) -> EngineResult<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE_NAME),
        })
    }

    /// Returns defaults when no file has been written yet.
    pub fn load(&self) -> EngineResult<EngineConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(EngineConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "config file is not valid");
            EngineError::from(err)
        })
    }

    pub fn save(&self, config: &EngineConfig) -> EngineResult<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> EngineResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
