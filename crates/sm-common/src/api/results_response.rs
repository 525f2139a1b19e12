use serde::{Deserialize, Serialize};

use super::worker_card::WorkerCard;
use crate::query::SearchQuery;
use crate::session::ResultsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsStatus {
    Loading,
    LoadFailed,
    NoMatches,
    Matches,
}

/// Serializable snapshot of the results screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub status: ResultsStatus,
    pub message: Option<String>,
    pub skills: Vec<String>,
    pub persons_needed: String,
    pub free_text: String,
    pub active_filters: Vec<String>,
    pub count: usize,
    pub workers: Vec<WorkerCard>,
}

impl ResultsResponse {
    pub fn from_view(view: &ResultsView, query: &SearchQuery) -> Self {
        let (status, message, workers) = match view {
            ResultsView::Loading => (ResultsStatus::Loading, None, Vec::new()),
            ResultsView::LoadFailed { message } => {
                (ResultsStatus::LoadFailed, Some(message.clone()), Vec::new())
            }
            ResultsView::NoMatches => (
                ResultsStatus::NoMatches,
                Some("No workers found matching your criteria.".to_string()),
                Vec::new(),
            ),
            ResultsView::Matches(rated) => (
                ResultsStatus::Matches,
                None,
                rated.iter().map(WorkerCard::from).collect::<Vec<_>>(),
            ),
        };

        Self {
            status,
            message,
            skills: query.skills.clone(),
            persons_needed: query.persons_label(),
            free_text: query.free_text.clone(),
            active_filters: query
                .active_filters
                .iter()
                .map(|tag| tag.label().to_string())
                .collect(),
            count: workers.len(),
            workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::FilterTag;

    #[test]
    fn failed_view_carries_message() {
        let query = SearchQuery::default();
        let response = ResultsResponse::from_view(
            &ResultsView::LoadFailed {
                message: "Failed to load workers. Please try again.".into(),
            },
            &query,
        );
        assert_eq!(response.status, ResultsStatus::LoadFailed);
        assert_eq!(response.count, 0);
        assert_eq!(
            response.message.as_deref(),
            Some("Failed to load workers. Please try again.")
        );
    }

    #[test]
    fn serializes_filters_as_labels() {
        let mut query = SearchQuery::new(vec!["Painting".into()], 2);
        query.toggle_filter(FilterTag::ImmediateAvailability);
        let response = ResultsResponse::from_view(&ResultsView::NoMatches, &query);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "no_matches");
        assert_eq!(json["persons_needed"], "2 workers");
        assert_eq!(
            json["active_filters"],
            serde_json::json!(["Highest Rated", "Immediate Availability"])
        );
    }
}
