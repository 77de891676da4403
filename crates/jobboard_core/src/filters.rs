use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{FieldDescriptor, UrlState, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Dataset order.
    #[default]
    Recent,
    Company,
    Role,
    Level,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Recent,
        SortKey::Company,
        SortKey::Role,
        SortKey::Level,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Company => "company",
            SortKey::Role => "role",
            SortKey::Level => "level",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == raw)
            .ok_or_else(|| format!("unknown sort key `{raw}` (expected recent, company, role or level)"))
    }
}

/// Everything the user can narrow the list by. Empty strings mean "any".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search: String,
    pub only_new: bool,
    pub only_featured: bool,
    pub role: String,
    pub level: String,
    pub contract: String,
    /// Insertion ordered, never contains duplicates.
    pub selected_tags: Vec<String>,
    pub sort_by: SortKey,
}

/// Query layout: `?q=..&new=true&featured=true&role=..&level=..&contract=..&tag=..&tag=..&sort=..`
pub const FILTER_SCHEMA: [FieldDescriptor; 8] = [
    FieldDescriptor::new("search", "q", ValueKind::String).omit_when_falsy(),
    FieldDescriptor::new("onlyNew", "new", ValueKind::Boolean).omit_when_falsy(),
    FieldDescriptor::new("onlyFeatured", "featured", ValueKind::Boolean).omit_when_falsy(),
    FieldDescriptor::new("role", "role", ValueKind::String).omit_when_falsy(),
    FieldDescriptor::new("level", "level", ValueKind::String).omit_when_falsy(),
    FieldDescriptor::new("contract", "contract", ValueKind::String).omit_when_falsy(),
    FieldDescriptor::new("selectedTags", "tag", ValueKind::StringList).omit_when_falsy(),
    FieldDescriptor::new("sortBy", "sort", ValueKind::String).omit_when_falsy(),
];

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tag` unless it is already selected. Returns whether it was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.is_empty() || self.selected_tags.contains(&tag) {
            return false;
        }
        self.selected_tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.selected_tags.len();
        self.selected_tags.retain(|selected| selected != tag);
        self.selected_tags.len() != before
    }

    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = String>) {
        self.selected_tags.clear();
        for tag in tags {
            self.add_tag(tag);
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn summary(&self) -> String {
        summarize(self)
    }
}

impl UrlState for FilterState {
    fn schema() -> &'static [FieldDescriptor] {
        &FILTER_SCHEMA
    }

    fn normalize(&mut self) {
        let tags = std::mem::take(&mut self.selected_tags);
        self.set_tags(tags);
    }
}

/// Short human description used by the recent-search log.
pub fn summarize(filters: &FilterState) -> String {
    let mut parts = Vec::new();
    if !filters.search.is_empty() {
        parts.push(format!("q:“{}”", filters.search));
    }
    if !filters.role.is_empty() {
        parts.push(format!("role:{}", filters.role));
    }
    if !filters.level.is_empty() {
        parts.push(format!("level:{}", filters.level));
    }
    if !filters.contract.is_empty() {
        parts.push(format!("contract:{}", filters.contract));
    }
    if !filters.selected_tags.is_empty() {
        parts.push(format!("tags:{}", filters.selected_tags.join("+")));
    }
    if filters.only_new {
        parts.push("NEW".to_string());
    }
    if filters.only_featured {
        parts.push("FEATURED".to_string());
    }
    if filters.sort_by != SortKey::Recent {
        parts.push(format!("sort:{}", filters.sort_by));
    }

    if parts.is_empty() {
        "All jobs".to_string()
    } else {
        parts.join(" • ")
    }
}
