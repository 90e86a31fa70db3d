use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use crate::models::cwa_dataset::RawWeatherElement;
use crate::time_points::TimePoint;

/// Weather elements consumed by the outlook, anything else is kept under its own name
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKey {
    Temperature,
    ApparentTemperature,
    ProbabilityOfPrecipitation,
    MaxTemperature,
    MinTemperature,
    Other(String),
}

impl ElementKey {
    /// Maps an element name, short code or canonical name, to its key
    ///
    /// # Arguments
    ///
    /// * 'name' - element name as given in the dataset
    pub fn from_name(name: &str) -> ElementKey {
        match name.trim() {
            "T" | "Temperature" => ElementKey::Temperature,
            "AT" | "ApparentTemperature" => ElementKey::ApparentTemperature,
            "PoP" | "ProbabilityOfPrecipitation" => ElementKey::ProbabilityOfPrecipitation,
            "MaxT" | "MaxTemperature" => ElementKey::MaxTemperature,
            "MinT" | "MinTemperature" => ElementKey::MinTemperature,
            other => ElementKey::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ElementKey::Temperature => write!(f, "Temperature"),
            ElementKey::ApparentTemperature => write!(f, "ApparentTemperature"),
            ElementKey::ProbabilityOfPrecipitation => write!(f, "ProbabilityOfPrecipitation"),
            ElementKey::MaxTemperature => write!(f, "MaxTemperature"),
            ElementKey::MinTemperature => write!(f, "MinTemperature"),
            ElementKey::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Time points of one location, keyed by element
#[derive(Default, Debug)]
pub struct ElementMap(HashMap<ElementKey, Vec<TimePoint>>);

impl ElementMap {
    /// Returns the time points of an element, empty if the dataset had none
    ///
    /// # Arguments
    ///
    /// * 'key' - the element to look up
    pub fn series(&self, key: &ElementKey) -> &[TimePoint] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ElementKey> {
        self.0.keys()
    }
}

/// Builds the element map of a location from its raw weather elements
///
/// Element names are trimmed and short codes rewritten to canonical keys. An element
/// appearing twice keeps its last occurrence.
///
/// # Arguments
///
/// * 'elements' - the raw weather elements of a location
pub fn normalize_elements(elements: &[RawWeatherElement]) -> ElementMap {
    let map = elements
        .iter()
        .map(|e| {
            let key = ElementKey::from_name(e.element_name.as_deref().unwrap_or_default());
            let points = e.time.iter().map(TimePoint::from).collect::<Vec<TimePoint>>();
            (key, points)
        })
        .collect::<HashMap<ElementKey, Vec<TimePoint>>>();

    ElementMap(map)
}
