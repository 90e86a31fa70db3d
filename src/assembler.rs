use chrono::{DateTime, Utc};
use log::debug;
use crate::daily::{first_per_day, max_per_day, merge_days};
use crate::elements::{normalize_elements, ElementKey, ElementMap};
use crate::lenient::{parse_number, text};
use crate::models::cwa_dataset::{Dataset, RawLocation};
use crate::models::outlook::{LocationOutput, NowSnapshot, OutputDocument, NOTE, SOURCE_TAG};
use crate::time_points::{extract_value, nearest_instant, TimePoint};

/// Builds the output document for all locations of a dataset, in dataset order
///
/// # Arguments
///
/// * 'dataset' - the decoded dataset
/// * 'now' - the reference instant, sampled once for the whole run
pub fn build_document(dataset: &Dataset, now: DateTime<Utc>) -> OutputDocument {
    let (group_county, entries) = dataset.location_entries();

    let locations = entries
        .iter()
        .map(|raw| assemble_location(raw, group_county, now))
        .collect::<Vec<LocationOutput>>();

    OutputDocument {
        generated_at: now,
        source: SOURCE_TAG,
        note: NOTE,
        locations,
    }
}

/// Builds the output record of one location
///
/// # Arguments
///
/// * 'raw' - the raw location entry
/// * 'group_county' - county name given on the location group, if any
/// * 'now' - the reference instant
pub fn assemble_location(raw: &RawLocation, group_county: Option<&str>, now: DateTime<Utc>) -> LocationOutput {
    let town = raw.location_name.as_ref().and_then(text).unwrap_or_default();

    let elements = normalize_elements(raw.weather_elements());
    if elements.is_empty() {
        debug!("no weather elements for {}", town);
    } else {
        let names = elements.keys().map(ElementKey::to_string).collect::<Vec<String>>();
        debug!("{}: {}", town, names.join(", "));
    }

    let max_t = first_per_day(elements.series(&ElementKey::MaxTemperature));
    let min_t = first_per_day(elements.series(&ElementKey::MinTemperature));
    let pop = max_per_day(elements.series(&ElementKey::ProbabilityOfPrecipitation));

    LocationOutput {
        geocode: raw.geocode().and_then(text),
        county: county(raw, group_county),
        lat: raw.latitude().and_then(parse_number),
        lon: raw.longitude().and_then(parse_number),
        now: now_snapshot(&elements, now),
        days: merge_days(&max_t, &min_t, &pop),
        town,
    }
}

/// Resolves the current values of a location
///
/// # Arguments
///
/// * 'elements' - the normalized elements of the location
/// * 'now' - the reference instant
pub fn now_snapshot(elements: &ElementMap, now: DateTime<Utc>) -> NowSnapshot {
    NowSnapshot {
        temperature: extract_value(nearest_instant(elements.series(&ElementKey::Temperature), now)),
        apparent_temperature: extract_value(nearest_instant(elements.series(&ElementKey::ApparentTemperature), now)),
        precipitation_probability: current_probability(elements.series(&ElementKey::ProbabilityOfPrecipitation), now),
    }
}

/// Resolves the current precipitation probability
///
/// The value of the point nearest in time is used if there is one, otherwise the value
/// of the first window containing the reference instant.
///
/// # Arguments
///
/// * 'points' - precipitation probability time points
/// * 'now' - the reference instant
pub fn current_probability(points: &[TimePoint], now: DateTime<Utc>) -> Option<f64> {
    // points without instant are skipped by the selector
    if let Some(value) = extract_value(nearest_instant(points, now)) {
        return Some(value);
    }

    let window = points.iter().find(|p| p.window_contains(now));
    extract_value(window)
}

/// County name: the location group name, then the first non-blank parameter value
fn county(raw: &RawLocation, group_county: Option<&str>) -> Option<String> {
    if let Some(name) = group_county {
        return Some(name.to_string());
    }

    raw.parameter
        .iter()
        .filter_map(|p| p.parameter_value.as_ref().and_then(text))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, SecondsFormat, TimeDelta};
    use serde_json::{json, Value};
    use crate::time_points::tests::{instant_point, reference_now, window_point};

    fn ts(dt: DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn location(value: Value) -> RawLocation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn scenario_nearest_temperature() {
        let now = reference_now();
        let raw = location(json!({
            "locationName": "中正區",
            "weatherElement": [{ "elementName": "T", "time": [
                { "dataTime": ts(now - TimeDelta::minutes(5)), "elementValue": [{ "value": "28" }] },
                { "dataTime": ts(now + TimeDelta::minutes(50)), "elementValue": [{ "value": "30" }] }
            ]}]
        }));

        let output = assemble_location(&raw, None, now);
        assert_eq!(output.now.temperature, Some(28.0));
        assert_eq!(output.now.apparent_temperature, None);
    }

    #[test]
    fn scenario_first_max_temperature_of_day() {
        let now = reference_now();
        let raw = location(json!({
            "locationName": "中正區",
            "weatherElement": [{ "elementName": "MaxTemperature", "time": [
                { "startTime": ts(now), "endTime": ts(now + TimeDelta::hours(6)), "elementValue": [{ "value": "35" }] },
                { "startTime": ts(now + TimeDelta::hours(6)), "endTime": ts(now + TimeDelta::hours(12)), "elementValue": [{ "value": "33" }] }
            ]}]
        }));

        let output = assemble_location(&raw, None, now);
        assert_eq!(output.days.len(), 1);
        assert_eq!(output.days[0].max_temperature, Some(35.0));
        assert_eq!(output.days[0].min_temperature, None);
    }

    #[test]
    fn scenario_highest_probability_of_day() {
        let now = reference_now();
        let points = [0, 3, 6]
            .iter()
            .zip(["20", "60", "40"])
            .map(|(h, v)| {
                let start = now + TimeDelta::hours(*h);
                json!({ "startTime": ts(start), "endTime": ts(start + TimeDelta::hours(3)), "elementValue": [{ "value": v }] })
            })
            .collect::<Vec<Value>>();
        let raw = location(json!({
            "locationName": "中正區",
            "weatherElement": [
                { "elementName": "PoP", "time": points },
                { "elementName": "MinT", "time": [{ "startTime": ts(now), "elementValue": { "value": "24" } }] }
            ]
        }));

        let output = assemble_location(&raw, None, now);
        assert_eq!(output.days[0].pop, Some(60.0));
        assert_eq!(output.days[0].min_temperature, Some(24.0));
    }

    #[test]
    fn scenario_probability_from_containing_window() {
        let now = reference_now();
        let points = vec![
            window_point(now - TimeDelta::hours(4), now - TimeDelta::hours(1), "10"),
            window_point(now - TimeDelta::hours(1), now + TimeDelta::hours(2), "70"),
            window_point(now - TimeDelta::hours(1), now + TimeDelta::hours(5), "90"),
        ];
        assert_eq!(current_probability(&points, now), Some(70.0));
    }

    #[test]
    fn probability_prefers_nearest_instant() {
        let now = reference_now();
        let points = vec![
            window_point(now - TimeDelta::hours(1), now + TimeDelta::hours(2), "70"),
            instant_point(now + TimeDelta::hours(2), "30"),
        ];
        assert_eq!(current_probability(&points, now), Some(30.0));
    }

    #[test]
    fn probability_falls_through_when_nearest_has_no_value() {
        let now = reference_now();
        let points = vec![
            instant_point(now, ""),
            window_point(now - TimeDelta::hours(1), now + TimeDelta::hours(2), "70"),
        ];
        assert_eq!(current_probability(&points, now), Some(70.0));
    }

    #[test]
    fn probability_is_none_without_match() {
        let now = reference_now();
        let points = vec![window_point(now + TimeDelta::hours(1), now + TimeDelta::hours(4), "70")];
        assert_eq!(current_probability(&points, now), None);
        assert_eq!(current_probability(&[], now), None);
    }

    #[test]
    fn scenario_location_without_elements() {
        let raw = location(json!({ "locationName": "綠島鄉", "geocode": 10014070 }));

        let output = assemble_location(&raw, Some("臺東縣"), reference_now());
        assert_eq!(output.now, NowSnapshot::default());
        assert!(output.days.is_empty());
        assert_eq!(output.geocode, Some("10014070".to_string()));
        assert_eq!(output.county, Some("臺東縣".to_string()));
        assert_eq!(output.town, "綠島鄉");
    }

    #[test]
    fn identity_fields_follow_their_fallback_chains() {
        let raw = location(json!({
            "locationName": "中正區",
            "Geocode": "63000050",
            "latitude": "25.032",
            "Latitude": "0",
            "Longitude": "not a number",
            "parameter": [{ "parameterValue": "  " }, { "parameterValue": " 臺北市 " }]
        }));

        let output = assemble_location(&raw, None, reference_now());
        assert_eq!(output.geocode, Some("63000050".to_string()));
        assert_eq!(output.county, Some("臺北市".to_string()));
        assert_eq!(output.lat, Some(25.032));
        assert_eq!(output.lon, None);

        let output = assemble_location(&location(json!({})), None, reference_now());
        assert_eq!(output.county, None);
        assert_eq!(output.geocode, None);
        assert_eq!(output.town, "");
    }

    #[test]
    fn probability_only_days_are_left_out() {
        let now = reference_now();
        let raw = location(json!({
            "weatherElement": [
                { "elementName": "MaxT", "time": [{ "startTime": ts(now), "elementValue": [{ "value": "30" }] }] },
                { "elementName": "PoP", "time": [
                    { "startTime": ts(now), "elementValue": [{ "value": "10" }] },
                    { "startTime": ts(now + TimeDelta::days(1)), "elementValue": [{ "value": "80" }] }
                ]}
            ]
        }));

        let output = assemble_location(&raw, None, now);
        assert_eq!(output.days.len(), 1);
        assert_eq!(output.days[0].date, NaiveDate::from_ymd_opt(2025, 10, 19).unwrap());
        assert_eq!(output.days[0].pop, Some(10.0));
    }

    #[test]
    fn document_keeps_dataset_order() {
        let dataset: Dataset = serde_json::from_value(json!({
            "records": { "locations": [{
                "locationsName": "臺北市",
                "location": [{ "locationName": "B" }, { "locationName": "A" }, { "locationName": "C" }]
            }]}
        })).unwrap();

        let document = build_document(&dataset, reference_now());
        let towns = document.locations.iter().map(|l| l.town.as_str()).collect::<Vec<&str>>();
        assert_eq!(towns, vec!["B", "A", "C"]);
        assert!(document.locations.iter().all(|l| l.county.as_deref() == Some("臺北市")));
        assert_eq!(document.generated_at, reference_now());
        assert_eq!(document.source, SOURCE_TAG);
    }

    #[test]
    fn bad_sibling_entries_keep_current_temperature() {
        let now = reference_now();
        let raw = location(json!({
            "locationName": "中正區",
            "weatherElement": [
                { "elementName": "T", "time": [{ "dataTime": ts(now), "elementValue": [{ "value": "28" }] }, null] },
                5
            ]
        }));
        assert_eq!(assemble_location(&raw, None, now).now.temperature, Some(28.0));

        let dataset: Dataset = serde_json::from_value(json!({
            "records": { "location": [{ "locationName": "A" }, null] }
        })).unwrap();
        assert_eq!(build_document(&dataset, now).locations.len(), 1);
    }

    #[test]
    fn malformed_dataset_gives_empty_document() {
        let dataset: Dataset = serde_json::from_value(json!({ "records": { "locations": 3 } })).unwrap();
        assert!(build_document(&dataset, reference_now()).locations.is_empty());
    }
}
