use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use super::rating::RatedWorker;
use crate::profile::Availability;

/// Filter chips on the results screen. The first three are sort directives
/// and are mutually exclusive; the rest are independent boolean filters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum FilterTag {
    #[serde(rename = "Highest Rated")]
    HighestRated,
    #[serde(rename = "Lowest Price")]
    LowestPrice,
    #[serde(rename = "Most Experienced")]
    MostExperienced,
    #[serde(rename = "Immediate Availability")]
    ImmediateAvailability,
}

impl FilterTag {
    pub fn label(&self) -> &'static str {
        match self {
            FilterTag::HighestRated => "Highest Rated",
            FilterTag::LowestPrice => "Lowest Price",
            FilterTag::MostExperienced => "Most Experienced",
            FilterTag::ImmediateAvailability => "Immediate Availability",
        }
    }

    pub fn is_sort(&self) -> bool {
        matches!(
            self,
            FilterTag::HighestRated | FilterTag::LowestPrice | FilterTag::MostExperienced
        )
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter tag: {0}")]
pub struct UnknownTagError(pub String);

impl FromStr for FilterTag {
    type Err = UnknownTagError;

    /// Accepts the chip label ("Lowest Price") or the snake_case key ("lowest_price").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FilterTag::iter()
            .find(|tag| {
                tag.label().eq_ignore_ascii_case(trimmed)
                    || tag.as_ref().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnknownTagError(s.to_string()))
    }
}

/// Active tags in the order they were switched on.
///
/// Deserializes through [`FromIterator`], so a payload naming several sort
/// tags keeps only the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FilterTag>", into = "Vec<FilterTag>")]
pub struct FilterTags(Vec<FilterTag>);

impl From<Vec<FilterTag>> for FilterTags {
    fn from(tags: Vec<FilterTag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<FilterTags> for Vec<FilterTag> {
    fn from(tags: FilterTags) -> Self {
        tags.0
    }
}

impl FilterTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: FilterTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterTag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Flips `tag`. Switching on a sort tag switches off any other sort tag;
    /// boolean filters never touch the sort tags.
    pub fn toggle(&mut self, tag: FilterTag) {
        if self.contains(tag) {
            self.0.retain(|active| *active != tag);
            return;
        }

        if tag.is_sort() {
            self.0.retain(|active| !active.is_sort());
        }
        self.0.push(tag);
    }

    /// Sort tag currently in effect, if any.
    pub fn active_sort(&self) -> Option<FilterTag> {
        self.0.iter().copied().find(FilterTag::is_sort)
    }
}

impl FromIterator<FilterTag> for FilterTags {
    /// Builds the set as if each tag were toggled on in turn, so at most one
    /// sort tag survives.
    fn from_iter<I: IntoIterator<Item = FilterTag>>(iter: I) -> Self {
        let mut tags = FilterTags::new();
        for tag in iter {
            if !tags.contains(tag) {
                tags.toggle(tag);
            }
        }
        tags
    }
}

/// Returns `tags` with `tag` toggled.
pub fn toggle_tag(tags: &FilterTags, tag: FilterTag) -> FilterTags {
    let mut updated = tags.clone();
    updated.toggle(tag);
    updated
}

/// Applies the tag pipeline in its fixed order, whatever order the tags
/// were selected in: rating sort, experience sort, price sort, then the
/// availability filter. Each sort is stable and a later sort replaces an
/// earlier one rather than acting as a secondary key.
pub fn apply_tag_filters(mut workers: Vec<RatedWorker>, tags: &FilterTags) -> Vec<RatedWorker> {
    if tags.contains(FilterTag::HighestRated) {
        workers.sort_by(|a, b| a.rating.cmp_desc(&b.rating));
    }

    if tags.contains(FilterTag::MostExperienced) {
        workers.sort_by(|a, b| b.profile.experience_years.cmp(&a.profile.experience_years));
    }

    if tags.contains(FilterTag::LowestPrice) {
        workers.sort_by(|a, b| a.profile.hourly_rate.total_cmp(&b.profile.hourly_rate));
    }

    if tags.contains(FilterTag::ImmediateAvailability) {
        workers.retain(|w| w.profile.availability == Availability::Immediate);
    }

    workers
}
