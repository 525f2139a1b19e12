pub mod normalize;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

pub use normalize::{NormalizeError, RawProfile, normalize_profile, normalize_profiles};

/// Availability of a worker as reported by the profile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Availability {
    Immediate,
    WithinTwoDays,
    WithinAWeek,
    Unknown,
}

impl Availability {
    /// Label used by the profile store and the results screen.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Immediate => "Immediate",
            Availability::WithinTwoDays => "Within 2 days",
            Availability::WithinAWeek => "Within a week",
            Availability::Unknown => "Unknown",
        }
    }

    /// Parses a store label. Anything unrecognised maps to `Unknown`.
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("Immediate") {
            Availability::Immediate
        } else if trimmed.eq_ignore_ascii_case("Within 2 days") {
            Availability::WithinTwoDays
        } else if trimmed.eq_ignore_ascii_case("Within a week") {
            Availability::WithinAWeek
        } else {
            Availability::Unknown
        }
    }
}

/// Worker profile after normalization. The rating is not part of the
/// profile; it is derived per search with a [`crate::matching::RatingPolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub verified: bool,
    pub skills: Vec<String>,
    pub location: String,
    pub experience_years: u32,
    pub completed_jobs: u32,
    pub hourly_rate: f64,
    pub availability: Availability,
    pub contact_number: String,
    pub languages: Vec<String>,
    pub description: String,
    pub age: Option<u32>,
}

impl AsRef<WorkerProfile> for WorkerProfile {
    fn as_ref(&self) -> &WorkerProfile {
        self
    }
}
