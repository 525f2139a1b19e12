//! Profile store boundary.
//!
//! The store itself lives outside this crate; [`ProfileSource`] is the seam.
//! Two implementations ship here: an in-memory source for fixtures and a
//! JSON export reader used by the `sm-search` binary.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::matching::skills::{has_any_skill, normalize_skill_set};
use crate::profile::RawProfile;

#[derive(Debug, thiserror::Error)]
pub enum ProfileSourceError {
    #[error("failed to read profile export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode profile export: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("profile source unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn fetch_all_profiles(&self) -> Result<Vec<RawProfile>, ProfileSourceError>;

    /// Profiles having at least one of `skill_names`.
    async fn fetch_profiles_by_skills(
        &self,
        skill_names: &[String],
    ) -> Result<Vec<RawProfile>, ProfileSourceError>;
}

fn select_by_skills(profiles: Vec<RawProfile>, skill_names: &[String]) -> Vec<RawProfile> {
    let wanted = normalize_skill_set(skill_names);
    if wanted.is_empty() {
        return profiles;
    }
    profiles
        .into_iter()
        .filter(|profile| has_any_skill(&profile.skill_names(), &wanted))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileSource {
    profiles: Vec<RawProfile>,
}

impl InMemoryProfileSource {
    pub fn new(profiles: Vec<RawProfile>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl ProfileSource for InMemoryProfileSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_all_profiles(&self) -> Result<Vec<RawProfile>, ProfileSourceError> {
        Ok(self.profiles.clone())
    }

    async fn fetch_profiles_by_skills(
        &self,
        skill_names: &[String],
    ) -> Result<Vec<RawProfile>, ProfileSourceError> {
        Ok(select_by_skills(self.profiles.clone(), skill_names))
    }
}

/// Reads a JSON array of profile records on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileProfileSource {
    path: PathBuf,
}

impl JsonFileProfileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<RawProfile>, ProfileSourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let profiles: Vec<RawProfile> = serde_json::from_slice(&bytes)?;
        debug!(count = profiles.len(), "loaded profile export");
        Ok(profiles)
    }
}

#[async_trait]
impl ProfileSource for JsonFileProfileSource {
    fn name(&self) -> &str {
        "json_file"
    }

    async fn fetch_all_profiles(&self) -> Result<Vec<RawProfile>, ProfileSourceError> {
        self.load().await
    }

    async fn fetch_profiles_by_skills(
        &self,
        skill_names: &[String],
    ) -> Result<Vec<RawProfile>, ProfileSourceError> {
        Ok(select_by_skills(self.load().await?, skill_names))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::profile::normalize::RawSkills;

    fn raw(id: i64, skills: &[&str]) -> RawProfile {
        let mut raw = RawProfile::new(id, format!("worker-{id}"));
        raw.skills = Some(RawSkills::List(skills.iter().map(|s| s.to_string()).collect()));
        raw
    }

    #[tokio::test]
    async fn in_memory_source_filters_by_any_skill() {
        let source = InMemoryProfileSource::new(vec![
            raw(1, &["Painting"]),
            raw(2, &["Plumbing"]),
            raw(3, &["Moving"]),
        ]);

        let all = source.fetch_all_profiles().await.unwrap();
        assert_eq!(all.len(), 3);

        let some = source
            .fetch_profiles_by_skills(&["painting".into(), "Plumbing".into()])
            .await
            .unwrap();
        assert_eq!(some.len(), 2);
    }

    #[tokio::test]
    async fn json_file_source_reads_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "full_name": "Asha", "skills": ["Painting"]}},
                {{"id": 2, "full_name": "Babu", "skills": ["Plumbing"], "hourly_rate": 80}}]"#
        )
        .unwrap();

        let source = JsonFileProfileSource::new(file.path());
        assert_eq!(source.fetch_all_profiles().await.unwrap().len(), 2);

        let plumbers = source
            .fetch_profiles_by_skills(&["Plumbing".into()])
            .await
            .unwrap();
        assert_eq!(plumbers.len(), 1);
        assert_eq!(plumbers[0].hourly_rate, Some(80.0));
    }

    #[tokio::test]
    async fn json_file_source_reports_missing_file() {
        let source = JsonFileProfileSource::new("/nonexistent/profiles.json");
        let err = source.fetch_all_profiles().await.unwrap_err();
        assert!(matches!(err, ProfileSourceError::Io(_)));
    }

    #[tokio::test]
    async fn json_file_source_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not an array").unwrap();

        let source = JsonFileProfileSource::new(file.path());
        let err = source.fetch_all_profiles().await.unwrap_err();
        assert!(matches!(err, ProfileSourceError::Decode(_)));
    }
}
