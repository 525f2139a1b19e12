use tracing::{debug, info, instrument, warn};

use crate::matching::{RatedWorker, WorkerMatchEngine};
use crate::profile::{RawProfile, WorkerProfile, normalize_profiles};
use crate::query::SearchQuery;
use crate::source::{ProfileSource, ProfileSourceError};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load workers. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed { message: String },
}

/// What the results screen should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Loading,
    LoadFailed { message: String },
    NoMatches,
    Matches(Vec<RatedWorker>),
}

/// Stamp of one fetch. Only the most recently started fetch may update the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<RawProfile>, ProfileSourceError>,
}

/// Runs one fetch against `source`: by-skills when the query names skills,
/// otherwise everything.
#[instrument(skip_all, fields(source = source.name(), generation = ticket.generation))]
pub async fn fetch_profiles<S>(source: &S, skills: &[String], ticket: FetchTicket) -> FetchOutcome
where
    S: ProfileSource + ?Sized,
{
    let result = if skills.is_empty() {
        source.fetch_all_profiles().await
    } else {
        source.fetch_profiles_by_skills(skills).await
    };
    FetchOutcome { ticket, result }
}

/// State behind one visit to the results screen: the query, the last
/// fetched profile set and its load state.
///
/// Fetches may overlap (a pull-to-refresh while the first load is still
/// running). Each fetch takes a [`FetchTicket`]; results carrying an older
/// ticket than the newest one handed out are dropped, so a slow early fetch
/// cannot overwrite a newer one.
#[derive(Debug, Clone)]
pub struct ResultsSession {
    engine: WorkerMatchEngine,
    query: SearchQuery,
    profiles: Vec<WorkerProfile>,
    state: LoadState,
    generation: u64,
}

impl ResultsSession {
    pub fn new(engine: WorkerMatchEngine, query: SearchQuery) -> Self {
        Self {
            engine,
            query,
            profiles: Vec::new(),
            state: LoadState::Loading,
            generation: 0,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut SearchQuery {
        &mut self.query
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn profiles(&self) -> &[WorkerProfile] {
        &self.profiles
    }

    /// Hands out the ticket for a new fetch. A failed session goes back to
    /// loading; a loaded one keeps showing its list while refreshing.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        if matches!(self.state, LoadState::Failed { .. }) {
            self.state = LoadState::Loading;
        }
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Applies a finished fetch. Returns `false` when the outcome was stale
    /// and ignored.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.ticket.generation != self.generation {
            debug!(
                stale = outcome.ticket.generation,
                current = self.generation,
                "discarding stale profile fetch"
            );
            return false;
        }

        match outcome.result {
            Ok(raws) => {
                self.profiles = normalize_profiles(&raws);
                self.state = LoadState::Loaded;
                info!(
                    fetched = raws.len(),
                    usable = self.profiles.len(),
                    "worker profiles loaded"
                );
            }
            Err(err) => {
                warn!(error = %err, "failed to load worker profiles");
                self.profiles.clear();
                self.state = LoadState::Failed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }
        true
    }

    /// Fetch and apply in one go. Also the retry path after a failure.
    pub async fn refresh<S>(&mut self, source: &S) -> bool
    where
        S: ProfileSource + ?Sized,
    {
        let ticket = self.begin_fetch();
        let skills = self.query.skills.clone();
        let outcome = fetch_profiles(source, &skills, ticket).await;
        self.apply(outcome)
    }

    /// Current ordered list. Empty while loading or after a failure.
    pub fn results(&self) -> Vec<RatedWorker> {
        match self.state {
            LoadState::Loaded => self.engine.search(&self.profiles, &self.query),
            _ => self.engine.search(&[], &self.query),
        }
    }

    pub fn view(&self) -> ResultsView {
        match &self.state {
            LoadState::Loading => ResultsView::Loading,
            LoadState::Failed { message } => ResultsView::LoadFailed {
                message: message.clone(),
            },
            LoadState::Loaded => {
                let results = self.results();
                if results.is_empty() {
                    ResultsView::NoMatches
                } else {
                    ResultsView::Matches(results)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::matching::FilterTag;
    use crate::profile::normalize::RawSkills;
    use crate::source::InMemoryProfileSource;

    fn raw(id: i64, skills: &[&str]) -> RawProfile {
        let mut raw = RawProfile::new(id, format!("worker-{id}"));
        raw.skills = Some(RawSkills::List(skills.iter().map(|s| s.to_string()).collect()));
        raw
    }

    struct FailingSource;

    #[async_trait]
    impl ProfileSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_all_profiles(&self) -> Result<Vec<RawProfile>, ProfileSourceError> {
            Err(ProfileSourceError::Unavailable("offline".into()))
        }

        async fn fetch_profiles_by_skills(
            &self,
            _skill_names: &[String],
        ) -> Result<Vec<RawProfile>, ProfileSourceError> {
            Err(ProfileSourceError::Unavailable("offline".into()))
        }
    }

    #[tokio::test]
    async fn starts_loading_then_shows_matches() {
        let source = InMemoryProfileSource::new(vec![raw(1, &["Painting"])]);
        let mut session = ResultsSession::new(WorkerMatchEngine::default(), SearchQuery::default());
        assert_eq!(session.view(), ResultsView::Loading);

        assert!(session.refresh(&source).await);
        assert_eq!(session.state(), &LoadState::Loaded);
        assert!(matches!(session.view(), ResultsView::Matches(ref w) if w.len() == 1));
    }

    #[tokio::test]
    async fn failure_is_a_distinct_state_with_empty_results() {
        let mut session = ResultsSession::new(
            WorkerMatchEngine::default(),
            SearchQuery::new(vec!["Painting".into()], 1),
        );
        session.refresh(&FailingSource).await;

        assert_eq!(
            session.view(),
            ResultsView::LoadFailed {
                message: LOAD_FAILED_MESSAGE.into()
            }
        );
        assert!(session.results().is_empty());
        assert!(session.profiles().is_empty());
    }

    #[tokio::test]
    async fn retry_after_failure_recovers() {
        let mut session = ResultsSession::new(WorkerMatchEngine::default(), SearchQuery::default());
        session.refresh(&FailingSource).await;

        let ticket = session.begin_fetch();
        assert_eq!(session.state(), &LoadState::Loading);

        let source = InMemoryProfileSource::new(vec![raw(1, &["Painting"])]);
        let outcome = fetch_profiles(&source, &[], ticket).await;
        assert!(session.apply(outcome));
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test]
    async fn stale_fetch_does_not_overwrite_newer_one() {
        let old_source = InMemoryProfileSource::new(vec![raw(1, &["Painting"])]);
        let new_source =
            InMemoryProfileSource::new(vec![raw(1, &["Painting"]), raw(2, &["Painting"])]);
        let mut session = ResultsSession::new(WorkerMatchEngine::default(), SearchQuery::default());

        let first = session.begin_fetch();
        let second = session.begin_fetch();
        assert!(second.generation() > first.generation());

        let newer = fetch_profiles(&new_source, &[], second).await;
        let older = fetch_profiles(&old_source, &[], first).await;

        assert!(session.apply(newer));
        assert!(!session.apply(older));
        assert_eq!(session.profiles().len(), 2);
    }

    #[tokio::test]
    async fn no_matches_is_recoverable_by_clearing_filters() {
        let mut busy = raw(1, &["Painting"]);
        busy.availability = Some("Within a week".into());
        let source = InMemoryProfileSource::new(vec![busy]);

        let mut session = ResultsSession::new(WorkerMatchEngine::default(), SearchQuery::default());
        session.refresh(&source).await;
        session.query_mut().toggle_filter(FilterTag::ImmediateAvailability);
        assert_eq!(session.view(), ResultsView::NoMatches);

        session.query_mut().clear_filters();
        assert!(matches!(session.view(), ResultsView::Matches(_)));
    }

    #[tokio::test]
    async fn uses_skill_fetch_when_query_has_skills() {
        let source = InMemoryProfileSource::new(vec![raw(1, &["Painting"]), raw(2, &["Moving"])]);
        let ticket = FetchTicket { generation: 1 };
        let outcome = fetch_profiles(&source, &["Moving".into()], ticket).await;
        let profiles = outcome.result.unwrap();
        assert_eq!(profiles.len(), 1);
    }
}
