use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file '{0}'")]
    Read(String, #[source] std::io::Error),
    #[error("configuration document error: {0}")]
    Document(#[from] toml::de::Error),
    #[error("no CWA authorization key, set CWA_API_KEY or cwa.api_key")]
    MissingCredential,
    #[error("failed to set up logging: {0}")]
    Logging(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to serialize output document")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write output file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
