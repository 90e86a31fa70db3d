use std::process;
use anyhow::{Context, Result};
use chrono::{DateTime, SubsecRound, Utc};
use log::{error, info};
use crate::assembler::build_document;
use crate::config::{Config, DatasetSource};
use crate::initialization::init;
use crate::manager_cwa::{load_dataset_file, Cwa};
use crate::models::cwa_dataset::Dataset;
use crate::output::save_document;

mod assembler;
mod config;
mod daily;
mod elements;
mod errors;
mod initialization;
mod lenient;
mod logging;
mod manager_cwa;
mod models;
mod output;
mod time_points;

fn main() {
    let (config, source) = match init() {
        Ok(init) => init,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config, source) {
        error!("{:#}", e);
        process::exit(1);
    }
}

/// Samples the current time at millisecond precision, the reference shared by all locations
fn reference_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Fetches the dataset, builds the outlook and writes it
///
/// # Arguments
///
/// * 'config' - the loaded configuration
/// * 'source' - where to get the dataset from
fn run(config: &Config, source: DatasetSource) -> Result<()> {
    let now = reference_time();

    let json = match source {
        DatasetSource::Remote { api_key } => Cwa::new(&config.cwa, api_key).get_dataset(),
        DatasetSource::File(path) => load_dataset_file(&path),
    }.context("failed to retrieve dataset")?;

    let dataset: Dataset = serde_json::from_str(&json).context("dataset is not a json document")?;

    let document = build_document(&dataset, now);
    info!("built outlook for {} locations", document.locations.len());

    save_document(&config.files.output_file, &document, config.general.pretty_output)
        .context("failed to save outlook")?;
    info!("outlook written to {}", config.files.output_file);

    Ok(())
}
