use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::{try_format_day, DEFAULT_DATE_FORMAT};

const HOME_ENV: &str = "PETTY_CASH_HOME";
const JSON_ENV: &str = "PETTY_CASH_JSON";
const DEFAULT_DIR_NAME: &str = ".petty_cash";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Runtime preferences for the console front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub date_format: String,
    pub income_description: String,
    pub expense_description: String,
    pub color: bool,
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.into(),
            income_description: "Income entry".into(),
            expense_description: "Expense entry".into(),
            color: true,
            json_output: false,
        }
    }
}

impl Config {
    /// Rejects date formats that cannot render a plain calendar day.
    pub fn validate(&self) -> LedgerResult<()> {
        let sample = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap_or_default();
        if try_format_day(sample, &self.date_format).is_none() {
            return Err(LedgerError::Config(format!(
                "unsupported date format `{}`",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Applies environment overrides on top of file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(raw) = env::var_os(JSON_ENV) {
            self.json_output = matches!(raw.to_str(), Some("1") | Some("true"));
        }
        self
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> LedgerResult<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> LedgerResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// `$PETTY_CASH_HOME` when set, otherwise `~/.petty_cash`.
fn base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
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

fn write_file(path: &Path, data: &str) -> LedgerResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
