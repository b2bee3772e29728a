//! Driver that feeds log lines through the parse context and routes the
//! resulting events to a sink and a store.

use super::context::{ParseContext, ParseEvent, ParseSummary};
use crate::cache::{Cache, LINES_CACHE_KEY, encode_line_deltas};
use crate::error::{CvsError, Result};
use crate::sink::HistorySink;
use std::io::BufRead;
use tracing::info;

/// Everything a finished parse pass hands back.
#[derive(Debug)]
pub struct ParseOutcome<S, C> {
    pub sink: S,
    pub cache: C,
    pub summary: ParseSummary,
}

/// Parser for `cvs log` output.
///
/// # Example
///
/// ```
/// use cvsparse::cache::MemoryCache;
/// use cvsparse::cvs::CvsParser;
/// use cvsparse::sink::EventCollector;
///
/// let log = "RCS file: /cvs/proj/README,v\n\
///            ----------------------------\n\
///            revision 1.1\n\
///            date: 2003/01/01 12:00:00;  author: ann;  state: Exp;\n\
///            Initial import\n\
///            =============================================================================\n";
///
/// let mut parser = CvsParser::new("/cvs/proj/", EventCollector::new(), MemoryCache::new());
/// parser.parse_str(log)?;
/// let outcome = parser.finish()?;
///
/// assert_eq!(outcome.sink.commits()[0].revision_id, "1.1|README");
/// # Ok::<(), cvsparse::error::CvsError>(())
/// ```
pub struct CvsParser<S: HistorySink, C: Cache> {
    context: ParseContext,
    sink: S,
    cache: C,
}

impl<S: HistorySink, C: Cache> CvsParser<S, C> {
    /// Create a parser stripping `root_path` from every RCS file path.
    pub fn new(root_path: impl Into<String>, sink: S, cache: C) -> Self {
        Self {
            context: ParseContext::new(root_path),
            sink,
            cache,
        }
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// Feed a single line, without its terminator.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        let events = self.context.step(line)?;
        self.dispatch(events)
    }

    /// Feed every line of `text`.
    pub fn parse_str(&mut self, text: &str) -> Result<()> {
        for line in text.lines() {
            self.feed(line)?;
        }
        Ok(())
    }

    /// Feed every line read from `reader`.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line.map_err(|e| CvsError::Io(format!("failed to read log line: {}", e)))?;
            self.feed(line.strip_suffix('\r').unwrap_or(&line))?;
        }
        Ok(())
    }

    /// Flush whatever is still open and persist the line-delta map.
    ///
    /// The map is handed to the cache at every file boundary; the cache is
    /// synced once, here.
    ///
    /// # Returns
    ///
    /// * `Ok(ParseOutcome)` - Sink, cache and pass counters
    /// * `Err(CvsError)` - The sink rejected an event or the cache could not be written
    pub fn finish(mut self) -> Result<ParseOutcome<S, C>> {
        let events = self.context.flush();
        self.dispatch(events)?;
        self.cache.sync()?;

        let summary = self.context.summary().clone();
        info!(
            lines = summary.lines_read,
            files = summary.files,
            commits = summary.commits,
            voided = summary.voided,
            "cvs log parsed"
        );

        Ok(ParseOutcome {
            sink: self.sink,
            cache: self.cache,
            summary,
        })
    }

    fn dispatch(&mut self, events: Vec<ParseEvent>) -> Result<()> {
        for event in events {
            match event {
                ParseEvent::Committer(name) => self.sink.committer(&name)?,
                ParseEvent::Commit(commit) => self.sink.commit(commit)?,
                ParseEvent::File(file) => self.sink.file(file)?,
                ParseEvent::LinesFlushed => {
                    let value = encode_line_deltas(self.context.line_deltas())?;
                    self.cache.insert(LINES_CACHE_KEY, value)?;
                }
            }
        }
        Ok(())
    }
}

/// Repository root path from a connection URI: everything after the last `:`.
///
/// `:pserver:anon@cvs.example.org:/cvsroot/proj` gives `/cvsroot/proj`.
pub fn root_path_from_uri(uri: &str) -> &str {
    match uri.rfind(':') {
        Some(pos) => &uri[pos + 1..],
        None => uri,
    }
}
