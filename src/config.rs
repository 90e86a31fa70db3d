use std::{env, fs};
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

/// Environment variable holding the CWA authorization key
pub const API_KEY_VAR: &str = "CWA_API_KEY";

#[derive(Deserialize)]
pub struct CwaParameters {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_dataset_id")]
    pub dataset_id: String,
    #[serde(default)]
    pub location_ids: Option<Vec<String>>,
    #[serde(default)]
    pub element_names: Option<Vec<String>>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CwaParameters {
    fn default() -> Self {
        CwaParameters {
            api_key: None,
            base_url: default_base_url(),
            dataset_id: default_dataset_id(),
            location_ids: None,
            element_names: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Deserialize)]
pub struct Files {
    pub output_file: String,
    #[serde(default)]
    pub input_file: Option<String>,
}

#[derive(Deserialize)]
pub struct General {
    #[serde(default)]
    pub log_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
    #[serde(default = "default_true")]
    pub log_to_stdout: bool,
    #[serde(default)]
    pub pretty_output: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            log_path: None,
            log_level: default_log_level(),
            log_to_stdout: true,
            pretty_output: false,
        }
    }
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cwa: CwaParameters,
    pub files: Files,
    #[serde(default)]
    pub general: General,
}

/// Where the dataset comes from
pub enum DatasetSource {
    Remote { api_key: String },
    File(String),
}

fn default_base_url() -> String {
    "https://opendata.cwa.gov.tw/api/v1/rest/datastore".to_string()
}

fn default_dataset_id() -> String {
    "F-D0047-093".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> LevelFilter {
    LevelFilter::Info
}

fn default_true() -> bool {
    true
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)
        .map_err(|e| ConfigError::Read(config_path.to_string(), e))?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}

impl Config {
    /// Decides where to get the dataset from
    ///
    /// A configured input file wins. Otherwise an authorization key is required, taken from
    /// the `CWA_API_KEY` environment variable or else from the configuration file.
    ///
    /// # Arguments
    ///
    /// * 'env_key' - value of the `CWA_API_KEY` environment variable, if set
    pub fn dataset_source(&self, env_key: Option<String>) -> Result<DatasetSource, ConfigError> {
        if let Some(file) = &self.files.input_file {
            return Ok(DatasetSource::File(file.clone()));
        }

        let non_blank = |k: String| Some(k.trim().to_string()).filter(|k| !k.is_empty());

        env_key
            .and_then(non_blank)
            .or_else(|| self.cwa.api_key.clone().and_then(non_blank))
            .map(|api_key| DatasetSource::Remote { api_key })
            .ok_or(ConfigError::MissingCredential)
    }
}

/// Reads the authorization key from the environment
pub fn env_api_key() -> Option<String> {
    env::var(API_KEY_VAR).ok().filter(|k| !k.trim().is_empty())
}
