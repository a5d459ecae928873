//! Configuration module for booklist.
//!
//! Handles the config file, environment variables, and settings.

mod settings;

pub use settings::{
    expand_env_vars, DatabaseSettings, LoggingSettings, Settings, SettingsError, StyleSettings,
    CONFIG_ENV_VAR, LOCAL_CONFIG_FILE,
};
