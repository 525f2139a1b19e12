use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::WorkerProfile;

pub const MIN_RATING: f64 = 3.0;
pub const MAX_RATING: f64 = 5.0;
const EXPERIENCE_STEP: f64 = 0.1;
const EXPERIENCE_CAP: f64 = 1.0;
const JOBS_STEP: f64 = 0.05;

/// Rating formula parameters.
///
/// The results screen and the contractor dashboard have always used
/// different constants for what is presented as the same score. Both are
/// kept as named policies until product decides whether they should merge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingPolicy {
    pub name: &'static str,
    pub base: f64,
    pub jobs_bonus_cap: f64,
}

/// Worker-search results (hiring flow).
pub const SEARCH_RESULTS: RatingPolicy = RatingPolicy {
    name: "search_results",
    base: 3.5,
    jobs_bonus_cap: 0.5,
};

/// Contractor dashboard listing.
pub const DASHBOARD_LISTING: RatingPolicy = RatingPolicy {
    name: "dashboard_listing",
    base: 3.0,
    jobs_bonus_cap: 1.0,
};

impl Default for RatingPolicy {
    fn default() -> Self {
        SEARCH_RESULTS
    }
}

impl RatingPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        [SEARCH_RESULTS, DASHBOARD_LISTING]
            .into_iter()
            .find(|policy| policy.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Computes the clamped rating for a profile.
    pub fn rate(&self, profile: &WorkerProfile) -> Rating {
        self.rate_counts(profile.experience_years, profile.completed_jobs)
    }

    pub fn rate_counts(&self, experience_years: u32, completed_jobs: u32) -> Rating {
        let experience_bonus = (f64::from(experience_years) * EXPERIENCE_STEP).min(EXPERIENCE_CAP);
        let jobs_bonus = (f64::from(completed_jobs) * JOBS_STEP).min(self.jobs_bonus_cap);
        let raw = (self.base + experience_bonus + jobs_bonus).clamp(MIN_RATING, MAX_RATING);
        Rating::from_raw(raw)
    }
}

/// Derived rating. `display` is the one-decimal text shown on cards and
/// `value` is that text parsed back; ordering always uses `value` so near
/// ties sort exactly as they are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub raw: f64,
    pub value: f64,
    pub display: String,
}

impl Rating {
    pub fn from_raw(raw: f64) -> Self {
        let display = to_one_decimal(raw);
        let value = display.parse().unwrap_or(raw);
        Self { raw, value, display }
    }

    /// Descending comparison used by the "Highest Rated" sort.
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        other
            .value
            .partial_cmp(&self.value)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// A profile paired with the rating computed for the current view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedWorker {
    pub profile: WorkerProfile,
    pub rating: Rating,
}

impl AsRef<WorkerProfile> for RatedWorker {
    fn as_ref(&self) -> &WorkerProfile {
        &self.profile
    }
}

/// Annotates every profile with a fresh rating under `policy`.
pub fn rate_all(profiles: &[WorkerProfile], policy: &RatingPolicy) -> Vec<RatedWorker> {
    profiles
        .iter()
        .map(|profile| RatedWorker {
            profile: profile.clone(),
            rating: policy.rate(profile),
        })
        .collect()
}

/// Formats a non-negative value with one decimal, rounding half up on the
/// exact binary value (4.25 → "4.3", 4.35 → "4.3" since it is stored below .35).
pub fn to_one_decimal(value: f64) -> String {
    if !value.is_finite() || value < 0.0 {
        return format!("{value:.1}");
    }

    // Doubles below 2^53 have a terminating expansion well within 64 places.
    let exact = format!("{value:.64}");
    let Some((int_part, frac)) = exact.split_once('.') else {
        return format!("{value:.1}");
    };
    let mut digits = frac.bytes().map(|b| u64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|d| d >= 5);

    let Ok(whole) = int_part.parse::<u64>() else {
        return format!("{value:.1}");
    };
    let scaled = whole * 10 + tenths + u64::from(round_up);
    format!("{}.{}", scaled / 10, scaled % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_policy_matches_known_values() {
        assert_eq!(SEARCH_RESULTS.rate_counts(5, 10).display, "4.5");
        assert_eq!(SEARCH_RESULTS.rate_counts(2, 2).display, "3.8");
        assert_eq!(SEARCH_RESULTS.rate_counts(0, 0).display, "3.5");
    }

    #[test]
    fn dashboard_policy_uses_lower_base_and_higher_cap() {
        assert_eq!(DASHBOARD_LISTING.rate_counts(0, 0).display, "3.0");
        assert_eq!(DASHBOARD_LISTING.rate_counts(10, 20).display, "5.0");
        assert_eq!(DASHBOARD_LISTING.rate_counts(3, 4).display, "3.5");
    }

    #[test]
    fn rating_is_clamped_for_extreme_inputs() {
        for policy in [SEARCH_RESULTS, DASHBOARD_LISTING] {
            for (experience, jobs) in [(0, 0), (1000, 0), (0, 100_000), (u32::MAX, u32::MAX)] {
                let rating = policy.rate_counts(experience, jobs);
                assert!(rating.raw >= MIN_RATING && rating.raw <= MAX_RATING);
                assert!(rating.value >= MIN_RATING && rating.value <= MAX_RATING);
            }
        }
    }

    #[test]
    fn one_decimal_rounds_half_up_on_exact_value() {
        assert_eq!(to_one_decimal(4.25), "4.3");
        assert_eq!(to_one_decimal(4.35), "4.3");
        assert_eq!(to_one_decimal(3.0), "3.0");
        assert_eq!(to_one_decimal(4.96), "5.0");
        assert_eq!(to_one_decimal(3.5 + 0.2 + 0.1), "3.8");
    }

    #[test]
    fn policies_resolve_by_name() {
        assert_eq!(RatingPolicy::from_name("dashboard_listing"), Some(DASHBOARD_LISTING));
        assert_eq!(RatingPolicy::from_name(" SEARCH_RESULTS "), Some(SEARCH_RESULTS));
        assert_eq!(RatingPolicy::from_name("other"), None);
    }

    #[test]
    fn descending_order_uses_displayed_value() {
        let near_a = Rating::from_raw(4.249_999);
        let near_b = Rating::from_raw(4.2);
        assert_eq!(near_a.display, "4.2");
        assert_eq!(near_a.cmp_desc(&near_b), Ordering::Equal);
    }
}
