use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use tracing::debug;

use super::{
    rating::{RatedWorker, RatingPolicy, rate_all},
    skills::apply_skill_filter,
    tags::apply_tag_filters,
    text::filter_by_free_text,
};
use crate::{config::ConfigError, profile::WorkerProfile, query::SearchQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    FreeText,
    Skills,
    Tags,
}

impl FromStr for Stage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Stage::iter()
            .find(|stage| stage.as_ref().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownStage(trimmed.to_string()))
    }
}

/// Order in which the search stages run. Each stage appears at most once;
/// a stage left out is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStages(Vec<Stage>);

impl Default for PipelineStages {
    /// Free text, then skills, then tags.
    fn default() -> Self {
        Self(vec![Stage::FreeText, Stage::Skills, Stage::Tags])
    }
}

impl PipelineStages {
    pub fn new(stages: Vec<Stage>) -> Result<Self, ConfigError> {
        for (idx, stage) in stages.iter().enumerate() {
            if stages[..idx].contains(stage) {
                return Err(ConfigError::DuplicateStage(stage.as_ref().to_string()));
            }
        }
        Ok(Self(stages))
    }

    pub fn stages(&self) -> &[Stage] {
        &self.0
    }
}

impl FromStr for PipelineStages {
    type Err = ConfigError;

    /// Comma separated stage keys, e.g. `free_text,skills,tags`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stages = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Stage::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stages)
    }
}

impl fmt::Display for PipelineStages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.0.iter().map(|stage| stage.as_ref()).collect();
        f.write_str(&keys.join(","))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingEngineConfig {
    pub rating_policy: RatingPolicy,
    pub stages: PipelineStages,
}

/// Turns a profile collection and a query into the ordered list shown on
/// the results screen. Pure and deterministic: the same input always gives
/// the same output, and running it again on its own output changes nothing.
#[derive(Debug, Clone, Default)]
pub struct WorkerMatchEngine {
    config: MatchingEngineConfig,
}

impl WorkerMatchEngine {
    pub fn new(config: MatchingEngineConfig) -> Self {
        Self { config }
    }

    pub fn with_policy(rating_policy: RatingPolicy) -> Self {
        Self::new(MatchingEngineConfig {
            rating_policy,
            ..MatchingEngineConfig::default()
        })
    }

    pub fn config(&self) -> &MatchingEngineConfig {
        &self.config
    }

    pub fn rating_policy(&self) -> &RatingPolicy {
        &self.config.rating_policy
    }

    /// Rates every profile, then runs the configured stages in order.
    /// An empty input (including a failed fetch) yields an empty result.
    pub fn search(&self, profiles: &[WorkerProfile], query: &SearchQuery) -> Vec<RatedWorker> {
        let mut workers = rate_all(profiles, &self.config.rating_policy);

        for stage in self.config.stages.stages() {
            let before = workers.len();
            workers = match stage {
                Stage::FreeText => filter_by_free_text(workers, &query.free_text),
                Stage::Skills => apply_skill_filter(workers, &query.skills),
                Stage::Tags => apply_tag_filters(workers, &query.active_filters),
            };
            debug!(stage = stage.as_ref(), before, after = workers.len(), "search stage");
        }

        workers
    }
}
