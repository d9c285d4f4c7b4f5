//! Configuration management for taskdeck.
//!
//! Handles where tasks are stored and how the task list is presented by
//! default. Configuration lives in a JSON file inside the platform data
//! directory and can be created through an interactive wizard.
//!
//! ## Core Features
//!
//! - **Store Selection**: Remote PostgREST backend or a local SQLite file
//! - **Environment Overrides**: `TASKDECK_API_URL` / `TASKDECK_API_KEY` (also from `.env`)
//! - **Interactive Setup**: Guided configuration through `taskdeck init`
//! - **Display Defaults**: Sort key and direction used by `taskdeck list`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use taskdeck::libs::config::Config;
//!
//! // Load configuration, applying .env and environment overrides
//! let config = Config::load()?;
//!
//! // Run interactive configuration setup
//! let updated_config = Config::init()?;
//! updated_config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::{DataStorage, APP_METADATA_DEFAULT_API_URL};
use super::sort::SortCriteria;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default bound on a single remote request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "TASKDECK_API_URL";
pub const ENV_API_KEY: &str = "TASKDECK_API_KEY";
pub const ENV_DB_FILE: &str = "TASKDECK_DB_FILE";

/// Which store holds the tasks.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Remote,
    #[default]
    Local,
}

/// Connection settings for the remote PostgREST store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    /// Project base URL, without the `/rest/v1` suffix.
    ///
    /// Example: `https://abcd1234.supabase.co`
    pub api_url: String,

    /// API key sent as `apikey` header and bearer token.
    pub api_key: String,

    /// Upper bound for a single request; an expired request counts as a failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings for the local SQLite store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocalConfig {
    /// Database file; relative names resolve inside the data directory.
    pub db_file: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            db_file: DB_FILE_NAME.to_string(),
        }
    }
}

impl LocalConfig {
    pub fn db_path(&self) -> io::Result<PathBuf> {
        let path = Path::new(&self.db_file);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        DataStorage::new().get_path(&self.db_file)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DisplayConfig {
    /// Sort applied by `list` when no sort flags are given.
    #[serde(default)]
    pub default_sort: SortCriteria,
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Reads configuration from the data directory.
    ///
    /// A missing file is not an error: defaults are returned (local store).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Reads the file and applies `.env` and process environment overrides.
    pub fn load() -> Result<Config> {
        let _ = dotenv::dotenv();
        let mut config = Self::read()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        msg_debug!(format!("store backend: {:?}", config.store.backend));
        Ok(config)
    }

    /// Applies overrides from `lookup` (normally the process environment).
    ///
    /// URL and key together switch the store to the remote backend; a
    /// database file name alone only changes the local file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let (Some(api_url), Some(api_key)) = (non_empty(ENV_API_URL), non_empty(ENV_API_KEY)) {
            let timeout_secs = self.store.remote.as_ref().map_or(DEFAULT_TIMEOUT_SECS, |remote| remote.timeout_secs);
            self.store.backend = StoreBackend::Remote;
            self.store.remote = Some(RemoteConfig {
                api_url,
                api_key,
                timeout_secs,
            });
        }

        if let Some(db_file) = non_empty(ENV_DB_FILE) {
            self.store.local = Some(LocalConfig { db_file });
        }
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Existing values are offered as defaults. The returned configuration
    /// is not saved; call [`Config::save`].
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let backends = [Message::BackendRemote.to_string(), Message::BackendLocal.to_string()];
        let default_index = match config.store.backend {
            StoreBackend::Remote => 0,
            StoreBackend::Local => 1,
        };
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectBackend.to_string())
            .items(&backends)
            .default(default_index)
            .interact()?;

        if selection == 0 {
            let default = config.store.remote.clone().unwrap_or(RemoteConfig {
                api_url: APP_METADATA_DEFAULT_API_URL.to_string(),
                api_key: "".to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            });
            msg_print!(Message::ConfigModuleRemote);
            config.store.backend = StoreBackend::Remote;
            config.store.remote = Some(RemoteConfig {
                api_url: Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptApiUrl.to_string())
                    .default(default.api_url)
                    .interact_text()?,
                api_key: Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptApiKey.to_string())
                    .default(default.api_key)
                    .interact_text()?,
                timeout_secs: Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptTimeout.to_string())
                    .default(default.timeout_secs)
                    .interact_text()?,
            });
        } else {
            let default = config.store.local.clone().unwrap_or_default();
            msg_print!(Message::ConfigModuleLocal);
            config.store.backend = StoreBackend::Local;
            config.store.local = Some(LocalConfig {
                db_file: Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptDbFile.to_string())
                    .default(default.db_file)
                    .interact_text()?,
            });
        }

        Ok(config)
    }
}
