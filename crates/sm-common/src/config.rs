use std::env;

use crate::matching::{MatchingEngineConfig, PipelineStages, RatingPolicy};

pub const RATING_POLICY_ENV: &str = "SM_RATING_POLICY";
pub const PIPELINE_STAGES_ENV: &str = "SM_PIPELINE_STAGES";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown rating policy: {0}")]
    UnknownPolicy(String),
    #[error("unknown pipeline stage: {0}")]
    UnknownStage(String),
    #[error("pipeline stage listed more than once: {0}")]
    DuplicateStage(String),
}

/// Engine settings resolved from the environment.
///
/// | variable             | default                 |
/// |----------------------|-------------------------|
/// | `SM_RATING_POLICY`   | `search_results`        |
/// | `SM_PIPELINE_STAGES` | `free_text,skills,tags` |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSettings {
    pub matching: MatchingEngineConfig,
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineSettings::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let rating_policy = match non_empty(RATING_POLICY_ENV) {
            Some(name) => parse_policy(&name)?,
            None => RatingPolicy::default(),
        };

        let stages = match non_empty(PIPELINE_STAGES_ENV) {
            Some(raw) => raw.parse::<PipelineStages>()?,
            None => PipelineStages::default(),
        };

        Ok(Self {
            matching: MatchingEngineConfig {
                rating_policy,
                stages,
            },
        })
    }
}

pub fn parse_policy(name: &str) -> Result<RatingPolicy, ConfigError> {
    RatingPolicy::from_name(name).ok_or_else(|| ConfigError::UnknownPolicy(name.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::matching::{DASHBOARD_LISTING, SEARCH_RESULTS, Stage};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = EngineSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.matching.rating_policy, SEARCH_RESULTS);
        assert_eq!(settings.matching.stages, PipelineStages::default());
    }

    #[test]
    fn reads_policy_and_stages() {
        let settings = EngineSettings::from_lookup(lookup(&[
            (RATING_POLICY_ENV, "dashboard_listing"),
            (PIPELINE_STAGES_ENV, "skills,free_text,tags"),
        ]))
        .unwrap();

        assert_eq!(settings.matching.rating_policy, DASHBOARD_LISTING);
        assert_eq!(
            settings.matching.stages.stages(),
            &[Stage::Skills, Stage::FreeText, Stage::Tags]
        );
    }

    #[test]
    fn blank_values_use_defaults() {
        let settings =
            EngineSettings::from_lookup(lookup(&[(RATING_POLICY_ENV, "  ")])).unwrap();
        assert_eq!(settings.matching.rating_policy, SEARCH_RESULTS);
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(
            EngineSettings::from_lookup(lookup(&[(RATING_POLICY_ENV, "generous")])),
            Err(ConfigError::UnknownPolicy("generous".into()))
        );
        assert!(matches!(
            EngineSettings::from_lookup(lookup(&[(PIPELINE_STAGES_ENV, "tags,tags")])),
            Err(ConfigError::DuplicateStage(_))
        ));
    }
}
