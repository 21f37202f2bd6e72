//! Week bucketing.
//!
//! Weekly rules (night cap, rest days) are evaluated over *week buckets* —
//! groups of consecutive days sharing a week index. The mapping is total
//! and never fails:
//!
//! 1. An explicit `week_index_by_day` map is used verbatim.
//! 2. Otherwise, when every day label parses as an ISO calendar date, days
//!    are grouped by ISO week number, with bucket indices assigned 0, 1, 2…
//!    in order of first appearance (so indices are always contiguous from
//!    0, regardless of the calendar week values).
//! 3. Otherwise, a sliding window of 7 consecutive input days:
//!    `bucket = position div 7`.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Day → week-bucket mapping, with the inverse grouping both roster model
/// builders iterate. Buckets are indexed by position (`of_day`) rather than
/// label since constraint rules work on day indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBuckets {
    /// Week-bucket index per day position.
    of_day: Vec<usize>,
    /// Day positions per week bucket, in input order.
    groups: Vec<Vec<usize>>,
}

impl WeekBuckets {
    /// Derives week buckets for an ordered day list.
    ///
    /// `explicit` entries take precedence; a day missing from an explicit
    /// map falls back to 0 (malformed optional inputs are never errors).
    pub fn for_days(days: &[String], explicit: Option<&HashMap<String, u32>>) -> Self {
        let indices: Vec<usize> = if let Some(map) = explicit {
            days.iter()
                .map(|d| map.get(d).copied().unwrap_or(0) as usize)
                .collect()
        } else if let Some(dates) = parse_all_iso(days) {
            // Group by ISO week number, renumbering in first-appearance
            // order so buckets are contiguous from 0.
            let mut seen: HashMap<u32, usize> = HashMap::new();
            dates
                .iter()
                .map(|date| {
                    let week = date.iso_week().week();
                    let next = seen.len();
                    *seen.entry(week).or_insert(next)
                })
                .collect()
        } else {
            (0..days.len()).map(|i| i / 7).collect()
        };

        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (day_idx, &bucket) in indices.iter().enumerate() {
            if bucket >= groups.len() {
                groups.resize_with(bucket + 1, Vec::new);
            }
            groups[bucket].push(day_idx);
        }

        Self {
            of_day: indices,
            groups,
        }
    }

    /// Week bucket of a day position.
    #[inline]
    pub fn bucket_of(&self, day_idx: usize) -> usize {
        self.of_day[day_idx]
    }

    /// Day positions grouped per bucket, in input order.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Number of week buckets.
    pub fn bucket_count(&self) -> usize {
        self.groups.len()
    }
}

fn parse_all_iso(days: &[String]) -> Option<Vec<NaiveDate>> {
    days.iter().map(|d| d.parse::<NaiveDate>().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn iso_days(start: &str, n: usize) -> Vec<String> {
        let first: NaiveDate = start.parse().unwrap();
        (0..n)
            .map(|i| (first + chrono::Days::new(i as u64)).to_string())
            .collect()
    }

    #[test]
    fn test_explicit_map_verbatim() {
        let days = labels("d", 3);
        let map: HashMap<String, u32> =
            [("d0".into(), 4u32), ("d1".into(), 4), ("d2".into(), 9)].into();
        let buckets = WeekBuckets::for_days(&days, Some(&map));

        assert_eq!(buckets.bucket_of(0), 4);
        assert_eq!(buckets.bucket_of(2), 9);
        assert_eq!(buckets.groups()[4], vec![0, 1]);
        assert_eq!(buckets.groups()[9], vec![2]);
    }

    #[test]
    fn test_iso_two_calendar_weeks() {
        // 2025-03-03 is a Monday; 14 days span exactly two ISO weeks.
        let days = iso_days("2025-03-03", 14);
        let buckets = WeekBuckets::for_days(&days, None);

        for i in 0..7 {
            assert_eq!(buckets.bucket_of(i), 0);
        }
        for i in 7..14 {
            assert_eq!(buckets.bucket_of(i), 1);
        }
        assert_eq!(buckets.bucket_count(), 2);
    }

    #[test]
    fn test_iso_indices_contiguous_from_zero() {
        // Mid-year start: calendar week numbers are large, bucket indices
        // must still be 0 and 1.
        let days = iso_days("2025-07-09", 10); // Wed..Fri next week
        let buckets = WeekBuckets::for_days(&days, None);
        assert_eq!(buckets.bucket_of(0), 0);
        assert_eq!(buckets.bucket_of(9), 1);
    }

    #[test]
    fn test_opaque_labels_div_7() {
        let days = labels("day-", 14);
        let buckets = WeekBuckets::for_days(&days, None);

        let expected: Vec<usize> = (0..14).map(|i| i / 7).collect();
        let actual: Vec<usize> = (0..14).map(|i| buckets.bucket_of(i)).collect();
        assert_eq!(actual, expected);
        assert_eq!(buckets.groups()[0], (0..7).collect::<Vec<_>>());
        assert_eq!(buckets.groups()[1], (7..14).collect::<Vec<_>>());
    }

    #[test]
    fn test_mixed_labels_fall_back_to_div_7() {
        // One unparseable label disables ISO grouping for the whole list
        let mut days = iso_days("2025-03-03", 8);
        days[3] = "holiday".into();
        let buckets = WeekBuckets::for_days(&days, None);
        assert_eq!(buckets.bucket_of(6), 0);
        assert_eq!(buckets.bucket_of(7), 1);
    }

    #[test]
    fn test_empty_days() {
        let buckets = WeekBuckets::for_days(&[], None);
        assert_eq!(buckets.bucket_count(), 0);
    }

    #[test]
    fn test_iso_year_boundary_groups_by_week_number() {
        // 2024-12-30 (ISO week 1 of 2025) through 2025-01-05 is one ISO week.
        let days = iso_days("2024-12-30", 7);
        let buckets = WeekBuckets::for_days(&days, None);
        assert_eq!(buckets.bucket_count(), 1);
    }
}
