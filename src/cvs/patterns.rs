//! Recognized line shapes of `cvs log` output.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static FILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RCS file: (.*)$").expect("Invalid RCS file regex"));

static REVISION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^revision ([\d\.]*)$").expect("Invalid revision regex"));

static INFO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^date: (\d\d\d\d)[/-](\d\d)[/-](\d\d) (\d\d):(\d\d):(\d\d)(.*);  author: (.*);  state: ([^;]*);(  lines: \+(\d+) -(\d+);?)?",
    )
    .expect("Invalid commit info regex")
});

static BRANCHES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^branches:  ([\d\.]*);$").expect("Invalid branches regex"));

// The leading class accepts space, backspace and tab.
static BRANCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \x08\t]+(.*): (([0-9]+\.)+)0\.([0-9]+)$").expect("Invalid branch regex")
});

static REV_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+$").expect("Invalid revision separator regex"));

static FILE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=+$").expect("Invalid file separator regex"));

/// Date and time fields of a commit-info line, still as digit strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDate<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
    pub hour: &'a str,
    pub minute: &'a str,
    pub second: &'a str,
}

/// A parsed `date: ...;  author: ...;  state: ...;` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo<'a> {
    pub date: RawDate<'a>,
    pub author: &'a str,
    pub state: &'a str,
    /// `(added, removed)` digit strings; absent on initial revisions.
    pub lines: Option<(&'a str, &'a str)>,
}

/// Classification of a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine<'a> {
    Empty,
    RevisionSeparator,
    FileSeparator,
    /// `RCS file: <path>` with the raw path.
    FileHeader(&'a str),
    /// Symbolic branch name and the revision prefix it owns (`1.2.4`).
    BranchDeclaration { name: &'a str, prefix: String },
    /// `revision <num>`.
    RevisionHeader(&'a str),
    CommitInfo(CommitInfo<'a>),
    /// `branches:  <prefix>;`.
    BranchesList(&'a str),
    /// Anything else: commit message text or ignored header lines.
    Content(&'a str),
}

/// Classify `line` against the pattern set, first match wins.
pub fn classify(line: &str) -> LogLine<'_> {
    if line.is_empty() {
        return LogLine::Empty;
    }
    if REV_SEPARATOR_REGEX.is_match(line) {
        return LogLine::RevisionSeparator;
    }
    if FILE_SEPARATOR_REGEX.is_match(line) {
        return LogLine::FileSeparator;
    }
    if let Some(caps) = FILE_REGEX.captures(line) {
        return LogLine::FileHeader(group(&caps, 1));
    }
    if let Some(caps) = BRANCH_REGEX.captures(line) {
        return LogLine::BranchDeclaration {
            name: group(&caps, 1),
            prefix: format!("{}{}", group(&caps, 2), group(&caps, 4)),
        };
    }
    if let Some(caps) = REVISION_REGEX.captures(line) {
        return LogLine::RevisionHeader(group(&caps, 1));
    }
    if let Some(caps) = INFO_REGEX.captures(line) {
        let lines = caps
            .get(10)
            .map(|_| (group(&caps, 11), group(&caps, 12)));
        return LogLine::CommitInfo(CommitInfo {
            date: RawDate {
                year: group(&caps, 1),
                month: group(&caps, 2),
                day: group(&caps, 3),
                hour: group(&caps, 4),
                minute: group(&caps, 5),
                second: group(&caps, 6),
            },
            author: group(&caps, 8),
            state: group(&caps, 9),
            lines,
        });
    }
    if let Some(caps) = BRANCHES_REGEX.captures(line) {
        return LogLine::BranchesList(group(&caps, 1));
    }
    LogLine::Content(line)
}

fn group<'a>(caps: &Captures<'a>, i: usize) -> &'a str {
    caps.get(i).map(|m| m.as_str()).unwrap_or_default()
}
