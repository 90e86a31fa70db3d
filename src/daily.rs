use std::collections::{BTreeMap, BTreeSet};
use chrono::NaiveDate;
use crate::models::outlook::DaySummary;
use crate::time_points::{extract_value, TimePoint};

/// Number of days in the outlook
pub const OUTLOOK_DAYS: usize = 7;

/// Reduces a series to one value per UTC calendar day, the first point of each day wins
///
/// Points are ordered by anchor timestamp (stable, so equal anchors keep their input
/// order) before grouping. A day whose first point carries no usable value maps to None.
///
/// # Arguments
///
/// * 'points' - the time points of one element
pub fn first_per_day(points: &[TimePoint]) -> BTreeMap<NaiveDate, Option<f64>> {
    let mut anchored = points
        .iter()
        .filter_map(|p| p.anchor().map(|a| (a, p)))
        .collect::<Vec<_>>();
    anchored.sort_by_key(|(anchor, _)| *anchor);

    let mut result: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
    for (anchor, point) in anchored {
        result.entry(anchor.date_naive()).or_insert_with(|| extract_value(Some(point)));
    }

    result
}

/// Reduces a series to the highest value per UTC calendar day
///
/// Points without a usable value are ignored, and a day without any usable value
/// does not show up in the result.
///
/// # Arguments
///
/// * 'points' - the time points of one element
pub fn max_per_day(points: &[TimePoint]) -> BTreeMap<NaiveDate, f64> {
    let mut result: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for point in points {
        let (Some(anchor), Some(value)) = (point.anchor(), extract_value(Some(point))) else {
            continue;
        };
        result.entry(anchor.date_naive())
            .and_modify(|max| *max = max.max(value))
            .or_insert(value);
    }

    result
}

/// Merges daily max and min temperatures with daily precipitation probability
///
/// Only days present in at least one of the temperature maps are included, and only the
/// first `OUTLOOK_DAYS` of those.
///
/// # Arguments
///
/// * 'max_t' - max temperature per day
/// * 'min_t' - min temperature per day
/// * 'pop' - highest precipitation probability per day
pub fn merge_days(
    max_t: &BTreeMap<NaiveDate, Option<f64>>,
    min_t: &BTreeMap<NaiveDate, Option<f64>>,
    pop: &BTreeMap<NaiveDate, f64>,
) -> Vec<DaySummary> {
    let dates = max_t.keys().chain(min_t.keys()).collect::<BTreeSet<&NaiveDate>>();

    dates
        .into_iter()
        .take(OUTLOOK_DAYS)
        .map(|date| DaySummary {
            date: *date,
            max_temperature: max_t.get(date).copied().flatten(),
            min_temperature: min_t.get(date).copied().flatten(),
            pop: pop.get(date).copied(),
        })
        .collect()
}
