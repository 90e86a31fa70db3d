use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

pub const SOURCE_TAG: &str = "CWA F-D0047-093";
pub const NOTE: &str = "now: values nearest to generatedAt (PoP falls back to the window containing it); \
days: UTC calendar days, maxT/minT from the first window of each day, pop is the highest probability of the day";

#[derive(Serialize, Debug)]
pub struct OutputDocument {
    #[serde(rename = "generatedAt", serialize_with = "serialize_millis")]
    pub generated_at: DateTime<Utc>,
    pub source: &'static str,
    pub note: &'static str,
    pub locations: Vec<LocationOutput>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct LocationOutput {
    pub geocode: Option<String>,
    pub county: Option<String>,
    pub town: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub now: NowSnapshot,
    pub days: Vec<DaySummary>,
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct NowSnapshot {
    #[serde(rename = "T")]
    pub temperature: Option<f64>,
    #[serde(rename = "AT")]
    pub apparent_temperature: Option<f64>,
    #[serde(rename = "PoP")]
    pub precipitation_probability: Option<f64>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    #[serde(rename = "maxT")]
    pub max_temperature: Option<f64>,
    #[serde(rename = "minT")]
    pub min_temperature: Option<f64>,
    pub pop: Option<f64>,
}

fn serialize_millis<S: Serializer>(date_time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date_time.to_rfc3339_opts(SecondsFormat::Millis, true))
}
