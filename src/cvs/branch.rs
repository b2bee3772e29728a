//! Branch and action-type resolution for a single revision.

use crate::repository::ActionType;
use std::collections::HashMap;

/// Branch used when a revision prefix has no declared branch.
pub const DEFAULT_BRANCH: &str = "trunk";

/// Revision imported through a vendor branch; never a real commit.
pub const VENDOR_IMPORT_REVISION: &str = "1.1.1.1";

/// First revision on trunk.
pub const INITIAL_REVISION: &str = "1.1";

/// State recorded by CVS for a removed file.
pub const DEAD_STATE: &str = "dead";

/// Revision prefix (`1.2.4`) to symbolic branch name, for the open file.
#[derive(Debug, Default, Clone)]
pub struct BranchMap {
    branches: HashMap<String, String>,
}

impl BranchMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, prefix: impl Into<String>, name: impl Into<String>) {
        self.branches.insert(prefix.into(), name.into());
    }

    /// Branch owning `prefix`, or [`DEFAULT_BRANCH`] when undeclared.
    pub fn branch_for(&self, prefix: &str) -> &str {
        self.branches
            .get(prefix)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BRANCH)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.branches.contains_key(prefix)
    }

    pub fn clear(&mut self) {
        self.branches.clear();
    }
}

/// Split a revision into its branch prefix and final number.
///
/// `1.2.4.3` becomes `("1.2.4", "3")`. A revision without a dot has an
/// empty prefix.
pub fn split_revision(revision: &str) -> (&str, &str) {
    match revision.rfind('.') {
        Some(pos) => (&revision[..pos], &revision[pos + 1..]),
        None => ("", revision),
    }
}

/// Action type implied by the revision state and number alone.
pub fn classify_action(state: &str, revision: &str) -> ActionType {
    if state == DEAD_STATE {
        ActionType::Deleted
    } else if revision == INITIAL_REVISION {
        ActionType::Added
    } else {
        ActionType::Modified
    }
}

/// Outcome of resolving a revision against the branch map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub branch: String,
    pub action_type: ActionType,
    /// The added-on-branch marker was consumed by this revision.
    pub consumed_branch_marker: bool,
}

/// Resolve the branch of `revision` and apply the added-on-branch override.
///
/// When the file was created directly on the branch whose prefix is
/// `added_on_branch`, the first revision on that branch (`<prefix>.1`) is
/// the real addition. The override applies only when the prefix is a
/// declared branch.
pub fn resolve(
    branches: &BranchMap,
    revision: &str,
    action_type: ActionType,
    added_on_branch: Option<&str>,
) -> Resolution {
    let (prefix, last) = split_revision(revision);

    if !branches.contains(prefix) {
        return Resolution {
            branch: DEFAULT_BRANCH.to_string(),
            action_type,
            consumed_branch_marker: false,
        };
    }

    let is_branch_addition = added_on_branch == Some(prefix) && last == "1";
    Resolution {
        branch: branches.branch_for(prefix).to_string(),
        action_type: if is_branch_addition {
            ActionType::Added
        } else {
            action_type
        },
        consumed_branch_marker: is_branch_addition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> BranchMap {
        let mut branches = BranchMap::new();
        branches.declare("1.2.4", "RELENG_1");
        branches.declare("1.1.2", "feature");
        branches
    }

    #[test]
    fn test_split_revision() {
        assert_eq!(split_revision("1.2.4.3"), ("1.2.4", "3"));
        assert_eq!(split_revision("1.1"), ("1", "1"));
        assert_eq!(split_revision("7"), ("", "7"));
    }

    #[test]
    fn test_classify_action() {
        assert_eq!(classify_action("dead", "1.1"), ActionType::Deleted);
        assert_eq!(classify_action("Exp", "1.1"), ActionType::Added);
        assert_eq!(classify_action("Exp", "1.7"), ActionType::Modified);
        assert_eq!(classify_action("dead", "1.7"), ActionType::Deleted);
    }

    #[test]
    fn test_undeclared_prefix_is_trunk() {
        let res = resolve(&map(), "1.5", ActionType::Modified, None);
        assert_eq!(res.branch, "trunk");
        assert_eq!(res.action_type, ActionType::Modified);
        assert!(!res.consumed_branch_marker);
    }

    #[test]
    fn test_declared_prefix_resolves_name() {
        let res = resolve(&map(), "1.2.4.2", ActionType::Modified, None);
        assert_eq!(res.branch, "RELENG_1");
        assert_eq!(res.action_type, ActionType::Modified);
    }

    #[test]
    fn test_first_revision_on_added_branch_becomes_addition() {
        let res = resolve(&map(), "1.1.2.1", ActionType::Modified, Some("1.1.2"));
        assert_eq!(res.branch, "feature");
        assert_eq!(res.action_type, ActionType::Added);
        assert!(res.consumed_branch_marker);
    }

    #[test]
    fn test_later_revision_on_added_branch_is_untouched() {
        let res = resolve(&map(), "1.1.2.2", ActionType::Modified, Some("1.1.2"));
        assert_eq!(res.action_type, ActionType::Modified);
        assert!(!res.consumed_branch_marker);
    }

    #[test]
    fn test_marker_for_undeclared_branch_is_ignored() {
        let res = resolve(&map(), "1.3.2.1", ActionType::Modified, Some("1.3.2"));
        assert_eq!(res.branch, "trunk");
        assert_eq!(res.action_type, ActionType::Modified);
        assert!(!res.consumed_branch_marker);
    }
}
