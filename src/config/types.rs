//! Configuration enums and serde defaults.

use serde::{Deserialize, Serialize};

/// What the `parse` command writes to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One JSON object per committer, commit and file event.
    #[default]
    Ndjson,
    /// Only the pass counters, as a single JSON object.
    Summary,
}

impl OutputFormat {
    /// Parse an output format from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ndjson" => Some(Self::Ndjson),
            "summary" => Some(Self::Summary),
            _ => None,
        }
    }
}

pub(crate) fn default_cache_path() -> String {
    "cvs-cache.json".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
