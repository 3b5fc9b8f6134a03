//! Past/upcoming classification shared by every show query.
//!
//! "Now" is taken by the caller at query time and passed in. A show that
//! starts exactly at `now` is upcoming; listing counts and detail partitions
//! all go through [`classify`], so they cannot disagree.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// Orderings of `start_time` against `now` that count as upcoming.
pub const UPCOMING_BOUNDARY: [Ordering; 2] = [Ordering::Equal, Ordering::Greater];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowTiming {
    Past,
    Upcoming,
}

pub fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

pub fn classify(start_time: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> ShowTiming {
    if UPCOMING_BOUNDARY.contains(&start_time.cmp(now)) {
        ShowTiming::Upcoming
    } else {
        ShowTiming::Past
    }
}

pub fn is_upcoming(start_time: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> bool {
    classify(start_time, now) == ShowTiming::Upcoming
}

/// Splits `items` into `(past, upcoming)`, keeping their relative order.
pub fn partition<T, F>(
    items: impl IntoIterator<Item = T>,
    start_time: F,
    now: &DateTime<FixedOffset>,
) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> &DateTime<FixedOffset>,
{
    items
        .into_iter()
        .partition(|item| classify(start_time(item), now) == ShowTiming::Past)
}
