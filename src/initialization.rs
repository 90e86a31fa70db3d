use std::env;
use log::info;
use crate::config::{env_api_key, load_config, Config, DatasetSource};
use crate::errors::ConfigError;
use crate::logging::setup_logger;

/// Environment variable pointing out the configuration file
const CONFIG_FILE_VAR: &str = "CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads configuration, sets up logging and resolves where to get the dataset from
///
pub fn init() -> Result<(Config, DatasetSource), ConfigError> {
    let config_path = env::var(CONFIG_FILE_VAR).unwrap_or(DEFAULT_CONFIG_FILE.to_string());
    let config = load_config(&config_path)?;

    setup_logger(&config.general)?;

    info!("cwa-outlook version: {}", env!("CARGO_PKG_VERSION"));

    let source = config.dataset_source(env_api_key())?;

    Ok((config, source))
}
