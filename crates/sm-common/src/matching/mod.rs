pub mod pipeline;
pub mod rating;
pub mod skills;
pub mod tags;
pub mod text;

pub use pipeline::{MatchingEngineConfig, PipelineStages, Stage, WorkerMatchEngine};
pub use rating::{
    DASHBOARD_LISTING, Rating, RatedWorker, RatingPolicy, SEARCH_RESULTS, rate_all,
};
pub use skills::{apply_skill_filter, normalize_skill};
pub use tags::{FilterTag, FilterTags, apply_tag_filters, toggle_tag};
pub use text::filter_by_free_text;
