use chrono::{DateTime, Utc};
use crate::lenient::{parse_number, parse_timestamp};
use crate::models::cwa_dataset::{ElementValue, RawTime};

/// A single forecast value, either at an instant or over a window
#[derive(Clone, Debug, PartialEq)]
pub struct TimePoint {
    pub instant: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub value: ElementValue,
}

impl From<&RawTime> for TimePoint {
    fn from(raw: &RawTime) -> Self {
        let parse = |t: &Option<String>| t.as_deref().and_then(parse_timestamp);

        TimePoint {
            instant: parse(&raw.data_time),
            start: parse(&raw.start_time),
            end: parse(&raw.end_time),
            value: raw.element_value.clone(),
        }
    }
}

impl TimePoint {
    /// The timestamp placing the point on the calendar: window start, instant, window end
    pub fn anchor(&self) -> Option<DateTime<Utc>> {
        self.start.or(self.instant).or(self.end)
    }

    /// True if the point's window is `[start, end)` and contains the given instant
    ///
    /// # Arguments
    ///
    /// * 'now' - the instant to check
    pub fn window_contains(&self, now: DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= now && now < end,
            _ => false,
        }
    }
}

/// Pulls the numeric value out of a time point
///
/// A list payload gives the `value` of its first entry, an object payload gives
/// `value` or, if that is missing, `parameter`. Anything unparseable is None.
///
/// # Arguments
///
/// * 'point' - the time point, if any
pub fn extract_value(point: Option<&TimePoint>) -> Option<f64> {
    let raw = match &point?.value {
        ElementValue::List(items) => items.first()?.value.as_ref(),
        ElementValue::Object(object) => object.value.as_ref().or(object.parameter.as_ref()),
        ElementValue::Absent => None,
    }?;

    parse_number(raw)
}

/// Returns the point whose instant is closest to the reference time
///
/// Points without an instant are skipped. On equal distance the earlier point in
/// the list is kept.
///
/// # Arguments
///
/// * 'points' - candidate time points
/// * 'now' - the reference instant
pub fn nearest_instant(points: &[TimePoint], now: DateTime<Utc>) -> Option<&TimePoint> {
    let mut best: Option<(i64, &TimePoint)> = None;

    for point in points {
        let Some(instant) = point.instant else { continue };
        let distance = (instant - now).num_milliseconds().abs();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, point));
        }
    }

    best.map(|(_, p)| p)
}
