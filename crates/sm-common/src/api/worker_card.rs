use serde::{Deserialize, Serialize};

use crate::matching::RatedWorker;

pub const SKILL_PREVIEW_LEN: usize = 3;

/// Star icons for a rating: full stars, one half star when the fraction is
/// at least .5, empty stars for the rest of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarBreakdown {
    pub fn from_rating(value: f64) -> Self {
        let clamped = value.clamp(0.0, 5.0);
        let full = clamped.floor();
        let half = clamped - full >= 0.5;
        // bounded by the clamp above
        let full = full as u8;
        let empty = 5 - full - u8::from(half);
        Self { full, half, empty }
    }
}

/// Result card shown for one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerCard {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub verified: bool,
    /// One decimal, as displayed.
    pub rating: String,
    pub stars: StarBreakdown,
    pub skills_preview: Vec<String>,
    /// Skills hidden behind the "+N" badge.
    pub more_skills: usize,
    pub location: String,
    pub experience_years: u32,
    pub completed_jobs: u32,
    pub hourly_rate: f64,
    pub availability: String,
    pub contact_number: String,
    pub languages: Vec<String>,
    pub description: String,
}

impl From<&RatedWorker> for WorkerCard {
    fn from(value: &RatedWorker) -> Self {
        let profile = &value.profile;
        let skills_preview: Vec<String> = profile
            .skills
            .iter()
            .take(SKILL_PREVIEW_LEN)
            .cloned()
            .collect();

        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            photo: profile.photo.clone(),
            verified: profile.verified,
            rating: value.rating.display.clone(),
            stars: StarBreakdown::from_rating(value.rating.value),
            more_skills: profile.skills.len().saturating_sub(skills_preview.len()),
            skills_preview,
            location: profile.location.clone(),
            experience_years: profile.experience_years,
            completed_jobs: profile.completed_jobs,
            hourly_rate: profile.hourly_rate,
            availability: profile.availability.label().to_string(),
            contact_number: profile.contact_number.clone(),
            languages: profile.languages.clone(),
            description: profile.description.clone(),
        }
    }
}
