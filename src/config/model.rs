//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a parse run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection URI of the CVS repository (e.g. `:pserver:anon@host:/cvsroot/proj`).
    pub repository_uri: String,

    /// Explicit repository root path; overrides the one derived from the URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,

    /// File where the line-delta map is stored.
    #[serde(default = "default_cache_path")]
    pub cache_path: String,

    /// Write each committer only once in the event stream.
    #[serde(default = "default_true")]
    pub dedup_committers: bool,

    /// Output written by the `parse` command.
    #[serde(default)]
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_uri: String::new(),
            root_path: None,
            cache_path: default_cache_path(),
            dedup_committers: default_true(),
            output: OutputFormat::default(),
        }
    }
}
