//! Runtime configuration.

use camino::Utf8PathBuf;
use std::ffi::OsString;
use thiserror::Error;

use crate::entitlement::domain::PAYWALL_TRIGGER_COUNT;
use crate::onboarding::adapters::ONBOARDING_KEY;
use crate::storage::adapters::DirectoryKeyValueStore;
use crate::storage::ports::StorageResult;
use crate::task::adapters::TASKS_KEY;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "BITETASK_DATA_DIR";

/// Environment variable overriding the paywall threshold.
pub const PAYWALL_THRESHOLD_ENV: &str = "BITETASK_PAYWALL_THRESHOLD";

const DEFAULT_DATA_DIR: &str = ".bitetask";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A path variable is not valid UTF-8.
    #[error("{0} must be valid UTF-8")]
    NonUtf8(&'static str),

    /// The paywall threshold is not a positive integer.
    #[error("invalid paywall threshold '{0}', expected a positive integer")]
    InvalidThreshold(String),
}

/// Application configuration.
///
/// # Examples
///
/// ```
/// use bitetask::config::AppConfig;
///
/// let config = AppConfig::default();
/// assert_eq!(config.tasks_key, "bitetask_tasks");
/// assert_eq!(config.paywall_threshold, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted blobs.
    pub data_dir: Utf8PathBuf,
    /// Storage key for the task list.
    pub tasks_key: String,
    /// Storage key for the onboarding record.
    pub onboarding_key: String,
    /// Completed-task count that triggers the paywall.
    pub paywall_threshold: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
            tasks_key: TASKS_KEY.to_owned(),
            onboarding_key: ONBOARDING_KEY.to_owned(),
            paywall_threshold: PAYWALL_TRIGGER_COUNT,
        }
    }
}

impl AppConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Reads overrides through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(DATA_DIR_ENV) {
            let path = raw
                .into_string()
                .map_err(|_| ConfigError::NonUtf8(DATA_DIR_ENV))?;
            config.data_dir = Utf8PathBuf::from(path);
        }
        if let Some(raw) = lookup(PAYWALL_THRESHOLD_ENV) {
            let text = raw.to_string_lossy().into_owned();
            config.paywall_threshold = match text.trim().parse::<usize>() {
                Ok(threshold) if threshold > 0 => threshold,
                _ => return Err(ConfigError::InvalidThreshold(text)),
            };
        }
        Ok(config)
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<Utf8PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Sets the paywall threshold.
    #[must_use]
    pub fn with_paywall_threshold(mut self, threshold: usize) -> Self {
        self.paywall_threshold = threshold;
        self
    }

    /// Opens the directory store at [`Self::data_dir`].
    ///
    /// # Errors
    ///
    /// Returns the storage error raised while creating or opening the
    /// directory.
    pub fn open_store(&self) -> StorageResult<DirectoryKeyValueStore> {
        DirectoryKeyValueStore::open(&self.data_dir)
    }
}
