//! History records produced by the CVS log parser.
//!
//! A [`Commit`] here always describes one revision of one file, so it
//! carries exactly one [`Action`] once its info line has been seen.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between the raw revision and the file path in a composed id.
pub const COMPOSED_ID_SEPARATOR: char = '|';

/// A versioned path, relative to the repository root, without the `,v` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub path: String,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Kind of change a revision applies to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Added,
    Modified,
    Deleted,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Added => write!(f, "A"),
            ActionType::Modified => write!(f, "M"),
            ActionType::Deleted => write!(f, "D"),
        }
    }
}

/// A single change of a file on a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub branch: String,
    /// Snapshot of the owning file when the action was recorded.
    pub file: File,
}

/// One revision of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Raw revision and file path joined by [`COMPOSED_ID_SEPARATOR`].
    pub revision_id: String,
    pub is_composed: bool,
    pub committer: String,
    /// `None` until the commit-info line for this revision has been read.
    pub timestamp: Option<NaiveDateTime>,
    pub message: String,
    pub actions: Vec<Action>,
}

impl Commit {
    /// Create a commit whose id is composed from `revision` and `path`.
    pub fn composed(revision: &str, path: &str) -> Self {
        Self {
            revision_id: format!("{}{}{}", revision, COMPOSED_ID_SEPARATOR, path),
            is_composed: true,
            committer: String::new(),
            timestamp: None,
            message: String::new(),
            actions: Vec::new(),
        }
    }

    /// The raw numeric revision (the part of the id before the separator).
    pub fn raw_revision(&self) -> &str {
        self.revision_id
            .split(COMPOSED_ID_SEPARATOR)
            .next()
            .unwrap_or_default()
    }
}

/// Lines added and removed by one revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDelta {
    pub added: u64,
    pub removed: u64,
}

impl LineDelta {
    pub fn new(added: u64, removed: u64) -> Self {
        Self { added, removed }
    }
}

/// Composed revision id to line delta, for the whole parse pass.
pub type LineDeltaMap = BTreeMap<String, LineDelta>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_id_joins_revision_and_path() {
        let commit = Commit::composed("1.4", "src/main.c");
        assert_eq!(commit.revision_id, "1.4|src/main.c");
        assert!(commit.is_composed);
        assert_eq!(commit.raw_revision(), "1.4");
    }

    #[test]
    fn raw_revision_ignores_separator_in_path() {
        let commit = Commit::composed("1.2.2.1", "odd|name.txt");
        assert_eq!(commit.raw_revision(), "1.2.2.1");
    }

    #[test]
    fn action_type_serializes_as_snake_case() {
        let json = serde_json::to_string(&ActionType::Deleted).unwrap();
        assert_eq!(json, "\"deleted\"");
        assert_eq!(ActionType::Added.to_string(), "A");
    }
}
