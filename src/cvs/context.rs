//! Parse state carried across lines, and the per-line step function.
//!
//! [`ParseContext::step`] consumes exactly one line and returns the events
//! it produced. It never talks to a sink or a store directly, so the whole
//! state machine can be driven from tests with plain line sequences.

use super::branch::{
    BranchMap, INITIAL_REVISION, VENDOR_IMPORT_REVISION, classify_action, resolve,
};
use super::message::{SeparatorBuffer, append_blank, append_content, trim_final};
use super::patterns::{CommitInfo, LogLine, RawDate, classify};
use crate::error::{CvsError, Result};
use crate::repository::{Action, ActionType, Commit, File, LineDelta, LineDeltaMap};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Path segment CVS uses to store the history of removed files.
const ATTIC_SEGMENT: &str = "/Attic";

/// Effect produced by a parse step, in the order it must be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    Committer(String),
    Commit(Commit),
    File(File),
    /// The full line-delta map must be written to the store.
    LinesFlushed,
}

/// Counters for a parse pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines_read: usize,
    pub files: usize,
    pub commits: usize,
    /// Vendor imports and added-on-branch placeholders that were dropped.
    pub voided: usize,
}

/// Mutable state of one parsing pass.
#[derive(Debug, Default)]
pub struct ParseContext {
    root_path: String,
    file: Option<File>,
    commit: Option<Commit>,
    branches: BranchMap,
    /// Branch prefix of a file that was created directly on a branch.
    added_on_branch: Option<String>,
    rev_separator: SeparatorBuffer,
    file_separator: SeparatorBuffer,
    lines: LineDeltaMap,
    summary: ParseSummary,
}

impl ParseContext {
    /// Create a context that strips `root_path` from every RCS file path.
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Self::default()
        }
    }

    pub fn line_deltas(&self) -> &LineDeltaMap {
        &self.lines
    }

    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    pub fn current_file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    pub fn current_commit(&self) -> Option<&Commit> {
        self.commit.as_ref()
    }

    /// Consume one line (without its terminator).
    ///
    /// # Errors
    ///
    /// * `CvsError::Format` - a commit-info line carries an impossible date
    ///   or a line count that does not fit in 64 bits
    pub fn step(&mut self, line: &str) -> Result<Vec<ParseEvent>> {
        self.summary.lines_read += 1;
        let mut events = Vec::new();

        match classify(line) {
            LogLine::Empty => {
                if let Some(commit) = self.commit.as_mut() {
                    append_blank(&mut commit.message);
                }
            }
            LogLine::RevisionSeparator => self.rev_separator.push(line),
            LogLine::FileSeparator => self.file_separator.push(line),
            LogLine::FileHeader(raw_path) => {
                events.extend(self.flush());
                self.open_file(raw_path);
            }
            LogLine::BranchDeclaration { name, prefix } => {
                self.branches.declare(prefix, name);
            }
            LogLine::RevisionHeader(revision) => self.open_revision(revision, &mut events),
            LogLine::CommitInfo(info) => self.apply_commit_info(&info, &mut events)?,
            LogLine::BranchesList(prefix) => self.apply_branches_list(prefix),
            LogLine::Content(text) => {
                if let Some(commit) = self.commit.as_mut() {
                    append_content(
                        &mut commit.message,
                        &mut self.rev_separator,
                        &mut self.file_separator,
                        text,
                    );
                }
            }
        }

        Ok(events)
    }

    /// Finalize the open commit and file.
    ///
    /// Always ends with [`ParseEvent::LinesFlushed`], whether anything was
    /// open or not.
    pub fn flush(&mut self) -> Vec<ParseEvent> {
        let mut events = Vec::new();

        if let Some(mut commit) = self.commit.take() {
            trim_final(&mut commit.message);
            self.summary.commits += 1;
            events.push(ParseEvent::Commit(commit));
        }

        if let Some(file) = self.file.take() {
            events.push(ParseEvent::File(file));
            self.added_on_branch = None;
        }

        events.push(ParseEvent::LinesFlushed);
        events
    }

    fn open_file(&mut self, raw_path: &str) {
        let path = raw_path.get(self.root_path.len()..).unwrap_or_default();
        let path = match path.rfind(',') {
            Some(pos) => &path[..pos],
            None => path,
        };
        debug!(path, "opened RCS file");

        self.file = Some(File::new(path));
        self.summary.files += 1;
        self.branches.clear();
        self.added_on_branch = None;
        self.commit = None;
        self.file_separator.clear();
    }

    fn open_revision(&mut self, revision: &str, events: &mut Vec<ParseEvent>) {
        if let Some(previous) = self.commit.take() {
            self.summary.commits += 1;
            events.push(ParseEvent::Commit(previous));
        }
        self.rev_separator.clear();

        match &self.file {
            Some(file) => self.commit = Some(Commit::composed(revision, &file.path)),
            None => warn!(revision, "revision header outside of an RCS file section ignored"),
        }
    }

    fn apply_commit_info(
        &mut self,
        info: &CommitInfo<'_>,
        events: &mut Vec<ParseEvent>,
    ) -> Result<()> {
        let (Some(commit), Some(file)) = (self.commit.as_mut(), self.file.as_mut()) else {
            trace!("commit info without an open revision ignored");
            return Ok(());
        };

        let revision = commit.raw_revision().to_string();
        if revision == VENDOR_IMPORT_REVISION {
            debug!(revision_id = %commit.revision_id, "vendor import revision discarded");
            self.commit = None;
            self.summary.voided += 1;
            return Ok(());
        }

        let line_no = self.summary.lines_read;
        let timestamp = parse_timestamp(&info.date, line_no)?;
        let delta = match info.lines {
            Some((added, removed)) => {
                LineDelta::new(parse_count(added, line_no)?, parse_count(removed, line_no)?)
            }
            None => LineDelta::default(),
        };

        commit.committer = info.author.to_string();
        events.push(ParseEvent::Committer(commit.committer.clone()));
        commit.timestamp = Some(timestamp);

        self.lines.insert(commit.revision_id.clone(), delta);

        let action_type = classify_action(info.state, &revision);
        if action_type == ActionType::Deleted {
            file.path = file.path.replace(ATTIC_SEGMENT, "");
            commit.revision_id = commit.revision_id.replace(ATTIC_SEGMENT, "");
        }

        let resolution = resolve(
            &self.branches,
            &revision,
            action_type,
            self.added_on_branch.as_deref(),
        );
        if resolution.consumed_branch_marker {
            self.added_on_branch = None;
        }

        commit.actions.push(Action {
            action_type: resolution.action_type,
            branch: resolution.branch,
            file: file.clone(),
        });

        Ok(())
    }

    fn apply_branches_list(&mut self, prefix: &str) {
        let Some(commit) = &self.commit else {
            trace!(prefix, "branches list without an open revision ignored");
            return;
        };
        let Some(action) = commit.actions.first() else {
            return;
        };

        if action.action_type == ActionType::Deleted && commit.raw_revision() == INITIAL_REVISION {
            debug!(
                revision_id = %commit.revision_id,
                branch_prefix = prefix,
                "file added on branch, trunk placeholder discarded"
            );
            self.added_on_branch = Some(prefix.to_string());
            self.commit = None;
            self.summary.voided += 1;
        }
    }
}

fn parse_timestamp(date: &RawDate<'_>, line: usize) -> Result<NaiveDateTime> {
    let field = |s: &str| -> Result<u32> {
        s.parse().map_err(|e| CvsError::Format {
            line,
            message: format!("invalid date field '{}': {}", s, e),
        })
    };

    let (year, month, day) = (field(date.year)?, field(date.month)?, field(date.day)?);
    let (hour, minute, second) = (field(date.hour)?, field(date.minute)?, field(date.second)?);

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(|| CvsError::Format {
            line,
            message: format!(
                "invalid date {}-{}-{} {}:{}:{}",
                date.year, date.month, date.day, date.hour, date.minute, date.second
            ),
        })
}

fn parse_count(digits: &str, line: usize) -> Result<u64> {
    digits.parse().map_err(|e| CvsError::Format {
        line,
        message: format!("invalid line count '{}': {}", digits, e),
    })
}
