use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Availability, WorkerProfile};

pub const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/64";
pub const DEFAULT_LOCATION: &str = "Local Area";
pub const DEFAULT_HOURLY_RATE: f64 = 150.0;
pub const DEFAULT_LANGUAGES: [&str; 2] = ["Hindi", "English"];
pub const DEFAULT_DESCRIPTION: &str = "Professional worker with experience in various projects.";
pub const DEFAULT_CONTACT_NUMBER: &str = "+91 98765 43210";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("profile {id} has no name")]
    MissingName { id: String },
    #[error("profile has an empty id")]
    MissingId,
}

/// Profile ids come back as integers from the local store and as strings
/// from exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn to_id_string(&self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.trim().to_string(),
        }
    }
}

/// Boolean columns are stored as 0/1 integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Number(i64),
}

impl RawFlag {
    fn is_set(self) -> bool {
        match self {
            RawFlag::Bool(b) => b,
            RawFlag::Number(n) => n != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSkills {
    List(Vec<String>),
    Joined(String),
}

impl RawSkills {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            RawSkills::List(list) => list
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            RawSkills::Joined(joined) => split_comma_list(joined),
        }
    }
}

/// Worker record as returned by the profile store, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    pub id: RawId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub verified: Option<RawFlag>,
    #[serde(default)]
    pub skills: Option<RawSkills>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience: Option<i64>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub completed_jobs: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl RawProfile {
    /// Minimal record, mostly useful for fixtures.
    pub fn new(id: i64, full_name: impl Into<String>) -> Self {
        Self {
            id: RawId::Number(id),
            full_name: Some(full_name.into()),
            photo: None,
            verified: None,
            skills: None,
            location: None,
            experience: None,
            hourly_rate: None,
            availability: None,
            completed_jobs: None,
            phone: None,
            languages: None,
            description: None,
            age: None,
        }
    }

    /// Skill names as stored, used by sources that filter before normalization.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.as_ref().map(RawSkills::to_vec).unwrap_or_default()
    }
}

fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Empty strings count as absent, matching how the store leaves columns blank.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn non_negative(value: Option<i64>) -> u32 {
    value
        .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Applies store defaults and produces a [`WorkerProfile`].
pub fn normalize_profile(raw: &RawProfile) -> Result<WorkerProfile, NormalizeError> {
    let id = raw.id.to_id_string();
    if id.is_empty() {
        return Err(NormalizeError::MissingId);
    }

    let name = non_blank(&raw.full_name)
        .ok_or_else(|| NormalizeError::MissingName { id: id.clone() })?
        .to_string();

    let hourly_rate = raw
        .hourly_rate
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .unwrap_or(DEFAULT_HOURLY_RATE);

    let availability = non_blank(&raw.availability)
        .map(Availability::from_label)
        .unwrap_or(Availability::Immediate);

    let languages = match non_blank(&raw.languages) {
        Some(joined) => split_comma_list(joined),
        None => DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
    };

    Ok(WorkerProfile {
        id,
        name,
        photo: non_blank(&raw.photo).unwrap_or(PLACEHOLDER_PHOTO).to_string(),
        verified: raw.verified.is_some_and(RawFlag::is_set),
        skills: raw.skill_names(),
        location: non_blank(&raw.location).unwrap_or(DEFAULT_LOCATION).to_string(),
        experience_years: non_negative(raw.experience),
        completed_jobs: non_negative(raw.completed_jobs),
        hourly_rate,
        availability,
        contact_number: non_blank(&raw.phone)
            .unwrap_or(DEFAULT_CONTACT_NUMBER)
            .to_string(),
        languages,
        description: non_blank(&raw.description)
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        age: raw.age.and_then(|a| u32::try_from(a).ok()),
    })
}

/// Normalizes a batch, skipping records that cannot be displayed.
pub fn normalize_profiles(raws: &[RawProfile]) -> Vec<WorkerProfile> {
    raws.iter()
        .filter_map(|raw| match normalize_profile(raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(error = %err, "skipping worker profile");
                None
            }
        })
        .collect()
}
