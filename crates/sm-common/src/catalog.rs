use serde::{Deserialize, Serialize};

use crate::query::{SearchQuery, parse_persons_needed};

/// A category of labour offered on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WorkType {
    pub id: &'static str,
    pub name: &'static str,
}

pub const WORK_TYPES: [WorkType; 8] = [
    WorkType { id: "1", name: "Construction" },
    WorkType { id: "2", name: "Painting" },
    WorkType { id: "3", name: "Plumbing" },
    WorkType { id: "4", name: "Electrical" },
    WorkType { id: "5", name: "Cleaning" },
    WorkType { id: "6", name: "Gardening" },
    WorkType { id: "7", name: "Carpentry" },
    WorkType { id: "8", name: "Moving" },
];

pub fn work_type_by_id(id: &str) -> Option<&'static WorkType> {
    WORK_TYPES.iter().find(|work_type| work_type.id == id)
}

/// Work types whose name contains `text`, ignoring case. No text, no suggestions.
pub fn suggest(text: &str) -> Vec<&'static WorkType> {
    if text.is_empty() {
        return Vec::new();
    }
    let needle = text.to_lowercase();
    WORK_TYPES
        .iter()
        .filter(|work_type| work_type.name.to_lowercase().contains(&needle))
        .collect()
}

/// Parameters handed to the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationParams {
    /// JSON array of skill names.
    pub skills: String,
    pub persons_needed: u32,
}

impl NavigationParams {
    pub fn into_query(self) -> SearchQuery {
        let persons = self.persons_needed.to_string();
        SearchQuery::from_navigation(Some(&self.skills), Some(&persons))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    Selected(&'static WorkType),
    Search(NavigationParams),
    Nothing,
}

/// Work types picked on the landing page plus the "persons needed" box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkTypeSelection {
    selected: Vec<&'static WorkType>,
    persons_needed: String,
}

impl WorkTypeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[&'static WorkType] {
        &self.selected
    }

    pub fn set_persons_needed(&mut self, raw: impl Into<String>) {
        self.persons_needed = raw.into();
    }

    /// Adds a work type unless it is already selected.
    pub fn select(&mut self, work_type: &'static WorkType) {
        if !self.selected.iter().any(|s| s.id == work_type.id) {
            self.selected.push(work_type);
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.selected.retain(|s| s.id != id);
    }

    /// Navigation parameters for the current selection, `None` when empty.
    pub fn search(&self) -> Option<NavigationParams> {
        if self.selected.is_empty() {
            return None;
        }

        let names: Vec<&str> = self.selected.iter().map(|s| s.name).collect();
        let skills = serde_json::to_string(&names).ok()?;
        let persons = (!self.persons_needed.is_empty()).then_some(self.persons_needed.as_str());

        Some(NavigationParams {
            skills,
            persons_needed: parse_persons_needed(persons),
        })
    }

    /// Return key in the search box: pick the first suggestion if the text
    /// has any, otherwise run the search.
    pub fn submit_editing(&mut self, text: &str) -> SubmitAction {
        if let Some(first) = suggest(text).into_iter().next() {
            self.select(first);
            return SubmitAction::Selected(first);
        }

        match self.search() {
            Some(params) => SubmitAction::Search(params),
            None => SubmitAction::Nothing,
        }
    }
}
