//! Consumers of parsed history events.
//!
//! The parser depends only on [`HistorySink`]. Two sinks ship with the crate:
//! [`EventCollector`] keeps every event in memory (handy for tests and
//! library callers), and [`NdjsonSink`] streams events as newline-delimited
//! JSON, one object per event.

use crate::error::{CvsError, Result};
use crate::repository::{Commit, File};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

/// Receiver for the records produced by a parse pass, in input order.
pub trait HistorySink {
    /// Called once per accepted commit-info line, before the commit is finalized.
    fn committer(&mut self, name: &str) -> Result<()>;

    /// Called when a commit is finalized. Never called for a voided commit.
    fn commit(&mut self, commit: Commit) -> Result<()>;

    /// Called when a file section is finalized.
    fn file(&mut self, file: File) -> Result<()>;
}

/// A single event as delivered to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HistoryEvent {
    Committer { name: String },
    Commit(Commit),
    File(File),
}

/// Sink that records every event in order.
#[derive(Debug, Default)]
pub struct EventCollector {
    pub events: Vec<HistoryEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commits received so far, in order.
    pub fn commits(&self) -> Vec<&Commit> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HistoryEvent::Commit(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// All files received so far, in order.
    pub fn files(&self) -> Vec<&File> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HistoryEvent::File(f) => Some(f),
                _ => None,
            })
            .collect()
    }
}

impl HistorySink for EventCollector {
    fn committer(&mut self, name: &str) -> Result<()> {
        self.events.push(HistoryEvent::Committer {
            name: name.to_string(),
        });
        Ok(())
    }

    fn commit(&mut self, commit: Commit) -> Result<()> {
        self.events.push(HistoryEvent::Commit(commit));
        Ok(())
    }

    fn file(&mut self, file: File) -> Result<()> {
        self.events.push(HistoryEvent::File(file));
        Ok(())
    }
}

/// Sink that writes each event as a single JSON line.
pub struct NdjsonSink<W: Write> {
    writer: W,
    dedup_committers: bool,
    seen_committers: HashSet<String>,
}

impl<W: Write> NdjsonSink<W> {
    /// Create a sink writing to `writer`.
    ///
    /// With `dedup_committers`, a committer event is written only the first
    /// time a name is seen.
    pub fn new(writer: W, dedup_committers: bool) -> Self {
        Self {
            writer,
            dedup_committers,
            seen_committers: HashSet::new(),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| CvsError::Io(format!("failed to flush event output: {}", e)))?;
        Ok(self.writer)
    }

    fn write_event(&mut self, event: &HistoryEvent) -> Result<()> {
        let line = serde_json::to_string(event)
            .map_err(|e| CvsError::Io(format!("failed to serialize event to JSON: {}", e)))?;
        writeln!(self.writer, "{}", line)
            .map_err(|e| CvsError::Io(format!("failed to write event: {}", e)))
    }
}

impl<W: Write> HistorySink for NdjsonSink<W> {
    fn committer(&mut self, name: &str) -> Result<()> {
        if self.dedup_committers && !self.seen_committers.insert(name.to_string()) {
            return Ok(());
        }
        self.write_event(&HistoryEvent::Committer {
            name: name.to_string(),
        })
    }

    fn commit(&mut self, commit: Commit) -> Result<()> {
        self.write_event(&HistoryEvent::Commit(commit))
    }

    fn file(&mut self, file: File) -> Result<()> {
        self.write_event(&HistoryEvent::File(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_keeps_event_order() {
        let mut sink = EventCollector::new();
        sink.committer("alice").unwrap();
        sink.commit(Commit::composed("1.1", "a.c")).unwrap();
        sink.file(File::new("a.c")).unwrap();

        assert_eq!(sink.events.len(), 3);
        assert_eq!(
            sink.events[0],
            HistoryEvent::Committer {
                name: "alice".to_string()
            }
        );
        assert_eq!(sink.commits()[0].revision_id, "1.1|a.c");
        assert_eq!(sink.files()[0].path, "a.c");
    }

    #[test]
    fn ndjson_sink_writes_tagged_lines() {
        let mut sink = NdjsonSink::new(Vec::new(), true);
        sink.committer("bob").unwrap();
        sink.file(File::new("dir/b.h")).unwrap();

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"event":"committer","name":"bob"}"#);
        assert_eq!(lines[1], r#"{"event":"file","path":"dir/b.h"}"#);
    }

    #[test]
    fn ndjson_sink_dedups_committers_when_enabled() {
        let mut sink = NdjsonSink::new(Vec::new(), true);
        sink.committer("bob").unwrap();
        sink.committer("bob").unwrap();
        sink.committer("carol").unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(out.lines().count(), 2);

        let mut sink = NdjsonSink::new(Vec::new(), false);
        sink.committer("bob").unwrap();
        sink.committer("bob").unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn ndjson_commit_line_contains_revision_and_actions() {
        let mut sink = NdjsonSink::new(Vec::new(), true);
        sink.commit(Commit::composed("1.3", "x.c")).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["event"], "commit");
        assert_eq!(value["revision_id"], "1.3|x.c");
        assert_eq!(value["actions"], serde_json::json!([]));
    }
}
