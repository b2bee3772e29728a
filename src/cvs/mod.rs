//! CVS log parsing.
//!
//! Turns the line-oriented output of `cvs log` into files, commits and
//! per-file actions. The input is not a formal grammar: separators look
//! like message text, line counts are optional, and the kind of change
//! (added, modified, deleted, and on which branch) depends on lines seen
//! earlier for the same file.
//!
//! - `patterns`: recognized line shapes
//! - `branch`: branch lookup and action classification
//! - `message`: commit message accumulation and separator handling
//! - `context`: per-pass state and the step function
//! - `parser`: driver routing events to a sink and a store

mod branch;
mod context;
mod message;
mod parser;
mod patterns;


pub use branch::{BranchMap, DEFAULT_BRANCH, VENDOR_IMPORT_REVISION};
pub use context::{ParseContext, ParseEvent, ParseSummary};
pub use parser::{CvsParser, ParseOutcome, root_path_from_uri};
pub use patterns::{CommitInfo, LogLine, RawDate, classify};
