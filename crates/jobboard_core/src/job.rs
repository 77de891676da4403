use serde::{Deserialize, Serialize};

pub type JobId = u64;

/// A single posting from the static dataset. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub company: String,
    #[serde(default)]
    pub logo: String,
    #[serde(rename = "new", default)]
    pub is_new: bool,
    #[serde(rename = "featured", default)]
    pub is_featured: bool,
    pub position: String,
    pub role: String,
    pub level: String,
    pub posted_at: String,
    pub contract: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl Job {
    /// Languages followed by tools, in dataset order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .chain(self.tools.iter())
            .map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|candidate| candidate == tag)
    }
}
