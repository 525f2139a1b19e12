use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matching::tags::{FilterTag, FilterTags};

/// Query backing one visit to the results screen. Created when the screen
/// is entered, edited in place as the user types or taps filter chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QueryPayload")]
pub struct SearchQuery {
    pub skills: Vec<String>,
    pub persons_needed: u32,
    pub free_text: String,
    pub active_filters: FilterTags,
}

/// Wire shape of [`SearchQuery`]; converted through [`SearchQuery::new`] so
/// the persons count stays positive.
#[derive(Deserialize)]
struct QueryPayload {
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    persons_needed: u32,
    #[serde(default)]
    free_text: String,
    active_filters: Option<FilterTags>,
}

impl From<QueryPayload> for SearchQuery {
    fn from(payload: QueryPayload) -> Self {
        let mut query = SearchQuery::new(payload.skills, payload.persons_needed);
        query.free_text = payload.free_text;
        if let Some(tags) = payload.active_filters {
            query.active_filters = tags;
        }
        query
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(Vec::new(), 1)
    }
}

impl SearchQuery {
    /// Starts with "Highest Rated" switched on, as the results screen does.
    pub fn new(skills: Vec<String>, persons_needed: u32) -> Self {
        Self {
            skills,
            persons_needed: persons_needed.max(1),
            free_text: String::new(),
            active_filters: [FilterTag::HighestRated].into_iter().collect(),
        }
    }

    /// Builds the query from the two navigation parameters. Malformed
    /// values fall back to defaults instead of failing.
    pub fn from_navigation(skills_json: Option<&str>, persons_needed: Option<&str>) -> Self {
        Self::new(parse_skills_param(skills_json), parse_persons_needed(persons_needed))
    }

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
    }

    pub fn toggle_filter(&mut self, tag: FilterTag) {
        self.active_filters.toggle(tag);
    }

    /// Clears free text and every filter chip (the "no matches" recovery).
    pub fn clear_filters(&mut self) {
        self.free_text.clear();
        self.active_filters.clear();
    }

    /// "1 worker", "3 workers".
    pub fn persons_label(&self) -> String {
        let plural = if self.persons_needed > 1 { "s" } else { "" };
        format!("{} worker{plural}", self.persons_needed)
    }
}

/// Decodes the JSON array of skill names passed between screens.
pub fn parse_skills_param(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(skills) => skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(err) => {
            warn!(error = %err, "ignoring malformed skills parameter");
            Vec::new()
        }
    }
}

/// Reads the leading integer of the parameter ("3 people" → 3). Absent,
/// non-numeric or zero values become 1.
pub fn parse_persons_needed(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 1;
    };

    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.parse::<u32>() {
        Ok(n) if n > 0 => n,
        Ok(_) => 1,
        // overflow still means "a lot of digits"
        Err(_) if !digits.is_empty() => u32::MAX,
        Err(_) => 1,
    }
}
