use serde::{Deserialize, Deserializer};
use serde_json::Value;
use crate::lenient::{lenient, lenient_items, lenient_optional_items};

#[derive(Deserialize, Default)]
pub struct Dataset {
    #[serde(default, deserialize_with = "lenient")]
    pub records: Records,
}

#[derive(Deserialize, Default)]
pub struct Records {
    #[serde(default, deserialize_with = "lenient_items")]
    pub locations: Vec<LocationGroup>,
    /// Older schema variant without location groups
    #[serde(default, deserialize_with = "lenient_items")]
    pub location: Vec<RawLocation>,
}

#[derive(Deserialize, Default)]
pub struct LocationGroup {
    #[serde(rename = "locationsName", default, deserialize_with = "lenient")]
    pub locations_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub location: Vec<RawLocation>,
}

#[derive(Deserialize, Default)]
pub struct RawParameter {
    #[serde(rename = "parameterValue", default)]
    pub parameter_value: Option<Value>,
}

#[derive(Deserialize, Default)]
pub struct RawLocation {
    #[serde(rename = "locationName", default)]
    pub location_name: Option<Value>,
    #[serde(default)]
    pub geocode: Option<Value>,
    #[serde(rename = "Geocode", default)]
    pub geocode_upper: Option<Value>,
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(rename = "Latitude", default)]
    pub latitude_upper: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    #[serde(rename = "Longitude", default)]
    pub longitude_upper: Option<Value>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub parameter: Vec<RawParameter>,
    #[serde(rename = "weatherElement", default, deserialize_with = "lenient_optional_items")]
    pub weather_element: Option<Vec<RawWeatherElement>>,
    #[serde(rename = "WeatherElement", default, deserialize_with = "lenient_optional_items")]
    pub weather_element_upper: Option<Vec<RawWeatherElement>>,
}

#[derive(Deserialize, Default)]
pub struct RawWeatherElement {
    #[serde(rename = "elementName", default, deserialize_with = "lenient")]
    pub element_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub time: Vec<RawTime>,
}

#[derive(Deserialize, Default)]
pub struct RawTime {
    #[serde(rename = "dataTime", default, deserialize_with = "lenient")]
    pub data_time: Option<String>,
    #[serde(rename = "startTime", default, deserialize_with = "lenient")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", default, deserialize_with = "lenient")]
    pub end_time: Option<String>,
    #[serde(rename = "elementValue", default, deserialize_with = "lenient")]
    pub element_value: ElementValue,
}

/// The two payload shapes an element value comes in
#[derive(Default, Clone, Debug, PartialEq)]
pub enum ElementValue {
    List(Vec<ValueObject>),
    Object(ValueObject),
    #[default]
    Absent,
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct ValueObject {
    pub value: Option<Value>,
    pub parameter: Option<Value>,
}

impl<'de> Deserialize<'de> for ElementValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let element_value = match Value::deserialize(deserializer)? {
            Value::Array(items) => ElementValue::List(items.into_iter().map(ValueObject::from).collect()),
            object @ Value::Object(_) => ElementValue::Object(ValueObject::from(object)),
            _ => ElementValue::Absent,
        };

        Ok(element_value)
    }
}

impl From<Value> for ValueObject {
    /// Picks the `value` and `parameter` fields, anything but an object gives an empty value object
    fn from(raw: Value) -> Self {
        match raw {
            Value::Object(mut map) => {
                let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
                ValueObject { value: take("value"), parameter: take("parameter") }
            },
            _ => ValueObject::default(),
        }
    }
}

impl Dataset {
    /// Returns the location entries and the county name of their group, if any
    ///
    /// The grouped layout `records.locations[0].location` is preferred, the flat
    /// `records.location` is used when the group is missing or empty.
    pub fn location_entries(&self) -> (Option<&str>, &[RawLocation]) {
        if let Some(group) = self.records.locations.first() {
            if !group.location.is_empty() {
                let county = group.locations_name.as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty());
                return (county, group.location.as_slice());
            }
        }

        (None, self.records.location.as_slice())
    }
}

impl RawLocation {
    pub fn geocode(&self) -> Option<&Value> {
        self.geocode.as_ref().or(self.geocode_upper.as_ref())
    }

    pub fn latitude(&self) -> Option<&Value> {
        self.latitude.as_ref().or(self.latitude_upper.as_ref())
    }

    pub fn longitude(&self) -> Option<&Value> {
        self.longitude.as_ref().or(self.longitude_upper.as_ref())
    }

    pub fn weather_elements(&self) -> &[RawWeatherElement] {
        self.weather_element.as_deref()
            .or(self.weather_element_upper.as_deref())
            .unwrap_or_default()
    }
}
