pub mod errors;

use std::fs;
use std::time::Duration;
use log::info;
use ureq::Agent;
use crate::config::CwaParameters;
use crate::manager_cwa::errors::CwaError;

/// Largest dataset body accepted, the full township dataset runs into tens of megabytes
const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Struct for retrieving the township forecast dataset from CWA open data
pub struct Cwa {
    agent: Agent,
    api_key: String,
    url: String,
    location_ids: Option<String>,
    element_names: Option<String>,
}

impl Cwa {
    /// Returns a Cwa struct ready for fetching the dataset
    ///
    /// # Arguments
    ///
    /// * 'config' - the cwa section of the configuration
    /// * 'api_key' - the authorization key for CWA open data
    pub fn new(config: &CwaParameters, api_key: String) -> Cwa {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let agent = agent_config.into();

        Cwa {
            agent,
            api_key,
            url: format!("{}/{}", config.base_url.trim_end_matches('/'), config.dataset_id),
            location_ids: config.location_ids.as_ref().map(|ids| ids.join(",")),
            element_names: config.element_names.as_ref().map(|names| names.join(",")),
        }
    }

    /// Retrieves the dataset and returns the raw json document
    ///
    /// Any non-success response is an error, there are no retries.
    pub fn get_dataset(&self) -> Result<String, CwaError> {
        let mut request = self.agent
            .get(&self.url)
            .query("Authorization", &self.api_key)
            .query("format", "JSON");

        if let Some(ids) = &self.location_ids {
            request = request.query("locationId", ids);
        }
        if let Some(names) = &self.element_names {
            request = request.query("elementName", names);
        }

        info!("fetching dataset from {}", self.url);

        let json = request
            .call()?
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()?;

        Ok(json)
    }
}

/// Reads a previously downloaded dataset from file
///
/// # Arguments
///
/// * 'path' - path to the json document
pub fn load_dataset_file(path: &str) -> Result<String, CwaError> {
    info!("reading dataset from {}", path);
    Ok(fs::read_to_string(path)?)
}
