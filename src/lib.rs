//! cvsparse: structured commit history from `cvs log` output.
//!
//! The [`cvs`] module holds the parser. It emits files, commits and
//! committers to a [`sink::HistorySink`] and stores per-revision line counts
//! in a [`cache::Cache`].

pub mod cache;
pub mod config;
pub mod cvs;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod repository;
pub mod sink;
