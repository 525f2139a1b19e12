use serde::Serialize;

use crate::matching::{DASHBOARD_LISTING, RatedWorker, rate_all};
use crate::profile::{Availability, WorkerProfile};

/// Header counters on the contractor dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub immediately_available: usize,
    pub verified: usize,
}

impl DashboardSummary {
    pub fn from_profiles(profiles: &[WorkerProfile]) -> Self {
        Self {
            total: profiles.len(),
            immediately_available: profiles
                .iter()
                .filter(|p| p.availability == Availability::Immediate)
                .count(),
            verified: profiles.iter().filter(|p| p.verified).count(),
        }
    }
}

/// Dashboard list: every worker in store order, rated with the dashboard policy.
pub fn dashboard_listing(profiles: &[WorkerProfile]) -> Vec<RatedWorker> {
    rate_all(profiles, &DASHBOARD_LISTING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::normalize::RawFlag;
    use crate::profile::{RawProfile, normalize_profiles};

    fn profiles() -> Vec<WorkerProfile> {
        let mut a = RawProfile::new(1, "Asha");
        a.verified = Some(RawFlag::Number(1));
        a.experience = Some(4);
        a.completed_jobs = Some(6);

        let mut b = RawProfile::new(2, "Babu");
        b.availability = Some("Within 2 days".into());
        b.verified = Some(RawFlag::Bool(true));

        let mut c = RawProfile::new(3, "Chandra");
        c.availability = Some("Within a week".into());

        normalize_profiles(&[a, b, c])
    }

    #[test]
    fn counts_available_and_verified_workers() {
        let summary = DashboardSummary::from_profiles(&profiles());
        assert_eq!(
            summary,
            DashboardSummary {
                total: 3,
                immediately_available: 1,
                verified: 2,
            }
        );
    }

    #[test]
    fn listing_keeps_order_and_uses_dashboard_rating() {
        let listing = dashboard_listing(&profiles());
        let ids: Vec<_> = listing.iter().map(|w| w.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        // 3.0 + 0.4 + 0.3
        assert_eq!(listing[0].rating.display, "3.7");
        assert_eq!(listing[1].rating.display, "3.0");
    }

    #[test]
    fn empty_dashboard() {
        assert_eq!(DashboardSummary::from_profiles(&[]), DashboardSummary::default());
    }
}
