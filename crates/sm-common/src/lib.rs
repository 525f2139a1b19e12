//! Worker search, filtering and ranking for the Sramify labour marketplace,
//! plus the landing-page catalog, hire quotes and contractor registration.

pub mod api;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod hire;
pub mod logging;
pub mod matching;
pub mod profile;
pub mod query;
pub mod registration;
pub mod session;
pub mod source;

pub use config::{ConfigError, EngineSettings};
pub use matching::{FilterTag, FilterTags, RatedWorker, Rating, RatingPolicy, WorkerMatchEngine};
pub use profile::{Availability, RawProfile, WorkerProfile};
pub use query::SearchQuery;
pub use session::{ResultsSession, ResultsView};
pub use source::{ProfileSource, ProfileSourceError};
