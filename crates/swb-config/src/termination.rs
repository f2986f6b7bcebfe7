//! # Termination Policy
//!
//! When a solve stops. Every configured limit is checked; the first one
//! reached stops the solver.
//!
//! The time-spent limit is the sum of all time fields, so
//! `seconds_spent_limit: 1` plus `milliseconds_spent_limit: 500` is 1.5s.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Termination section of a solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milliseconds_spent_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_spent_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_spent_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_spent_limit: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unimproved_milliseconds_spent_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unimproved_seconds_spent_limit: Option<u64>,

    /// Maximum number of steps across all phases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count_limit: Option<u64>,

    /// Stop as soon as the best score reaches this value, e.g. `0hard/0soft`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_score_limit: Option<String>,
}

impl TerminationConfig {
    /// Total wall-clock budget, or `None` when no time field is set.
    pub fn time_spent_limit(&self) -> Option<Duration> {
        let parts = [
            self.milliseconds_spent_limit.map(Duration::from_millis),
            self.seconds_spent_limit.map(Duration::from_secs),
            self.minutes_spent_limit
                .map(|m| Duration::from_secs(m.saturating_mul(60))),
            self.hours_spent_limit
                .map(|h| Duration::from_secs(h.saturating_mul(3600))),
        ];
        sum_present(parts)
    }

    /// Budget without best-score improvement, or `None` when unset.
    pub fn unimproved_time_spent_limit(&self) -> Option<Duration> {
        let parts = [
            self.unimproved_milliseconds_spent_limit
                .map(Duration::from_millis),
            self.unimproved_seconds_spent_limit.map(Duration::from_secs),
        ];
        sum_present(parts)
    }

    /// Replace the time budget with exactly `limit`.
    ///
    /// This is an override, not a minimum: every time field is cleared and
    /// `milliseconds_spent_limit` is set, whatever the document said before.
    /// Non-time limits are kept.
    pub fn override_time_spent_limit(&mut self, limit: Duration) {
        self.seconds_spent_limit = None;
        self.minutes_spent_limit = None;
        self.hours_spent_limit = None;
        self.milliseconds_spent_limit = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
    }

    /// Whether any limit is configured at all.
    pub fn is_bounded(&self) -> bool {
        self.time_spent_limit().is_some()
            || self.unimproved_time_spent_limit().is_some()
            || self.step_count_limit.is_some()
            || self.best_score_limit.is_some()
    }
}

fn sum_present<const N: usize>(parts: [Option<Duration>; N]) -> Option<Duration> {
    parts
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<Duration>, d| {
            Some(acc.map_or(d, |a| a.saturating_add(d)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_fields_are_summed() {
        let t = TerminationConfig {
            seconds_spent_limit: Some(1),
            milliseconds_spent_limit: Some(500),
            ..Default::default()
        };
        assert_eq!(t.time_spent_limit(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn no_time_fields_means_no_limit() {
        let t = TerminationConfig {
            step_count_limit: Some(10),
            ..Default::default()
        };
        assert_eq!(t.time_spent_limit(), None);
        assert!(t.is_bounded());
        assert!(!TerminationConfig::default().is_bounded());
    }

    #[test]
    fn override_replaces_longer_budget() {
        let mut t = TerminationConfig {
            minutes_spent_limit: Some(5),
            seconds_spent_limit: Some(30),
            ..Default::default()
        };
        t.override_time_spent_limit(Duration::from_millis(3000));
        assert_eq!(t.time_spent_limit(), Some(Duration::from_millis(3000)));
        assert_eq!(t.minutes_spent_limit, None);
        assert_eq!(t.seconds_spent_limit, None);
    }

    #[test]
    fn override_replaces_shorter_budget_too() {
        let mut t = TerminationConfig {
            milliseconds_spent_limit: Some(100),
            ..Default::default()
        };
        t.override_time_spent_limit(Duration::from_millis(3000));
        assert_eq!(t.milliseconds_spent_limit, Some(3000));
    }

    #[test]
    fn override_keeps_non_time_limits() {
        let mut t = TerminationConfig {
            step_count_limit: Some(7),
            best_score_limit: Some("0hard/0soft".into()),
            ..Default::default()
        };
        t.override_time_spent_limit(Duration::from_secs(3));
        assert_eq!(t.step_count_limit, Some(7));
        assert_eq!(t.best_score_limit.as_deref(), Some("0hard/0soft"));
    }

    #[test]
    fn unimproved_limit_sums_its_own_fields() {
        let t = TerminationConfig {
            unimproved_seconds_spent_limit: Some(2),
            unimproved_milliseconds_spent_limit: Some(250),
            ..Default::default()
        };
        assert_eq!(
            t.unimproved_time_spent_limit(),
            Some(Duration::from_millis(2250))
        );
    }
}
