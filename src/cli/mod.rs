//! CLI argument parsing for cvsparse.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// cvsparse: turn `cvs log` output into structured commit history.
#[derive(Parser, Debug)]
#[command(name = "cvsparse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for cvsparse.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a `cvs log` dump into history events.
    ///
    /// Events are written to stdout as NDJSON; the per-revision line
    /// counts are stored in the cache file.
    Parse(ParseArgs),

    /// Print the line counts stored by a previous `parse` run.
    Lines(LinesArgs),
}

/// Arguments for the `parse` command.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Log file to read. Reads stdin when omitted.
    pub log: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Repository connection URI; the root path is the part after the last ':'.
    #[arg(long)]
    pub uri: Option<String>,

    /// Repository root path to strip from RCS file paths (overrides --uri).
    #[arg(long)]
    pub root: Option<String>,

    /// Cache file for the line-delta map.
    #[arg(long, conflicts_with = "no_cache")]
    pub cache: Option<String>,

    /// Keep the line-delta map in memory only.
    #[arg(long)]
    pub no_cache: bool,

    /// Output format (ndjson, summary).
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the `lines` command.
#[derive(Parser, Debug)]
pub struct LinesArgs {
    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Cache file to read.
    #[arg(long)]
    pub cache: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_minimal() {
        let cli = Cli::try_parse_from(["cvsparse", "parse"]).unwrap();
        if let Command::Parse(args) = cli.command {
            assert!(args.log.is_none());
            assert!(!args.no_cache);
            assert!(args.format.is_none());
        } else {
            panic!("Expected Parse command");
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_full() {
        let cli = Cli::try_parse_from([
            "cvsparse",
            "-vv",
            "parse",
            "proj.log",
            "--uri",
            ":pserver:anon@host:/cvsroot/proj",
            "--cache",
            "c.json",
            "--format",
            "summary",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        if let Command::Parse(args) = cli.command {
            assert_eq!(args.log, Some(PathBuf::from("proj.log")));
            assert_eq!(args.uri.as_deref(), Some(":pserver:anon@host:/cvsroot/proj"));
            assert_eq!(args.cache.as_deref(), Some("c.json"));
            assert_eq!(args.format.as_deref(), Some("summary"));
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn cache_and_no_cache_conflict() {
        let result = Cli::try_parse_from(["cvsparse", "parse", "--cache", "c.json", "--no-cache"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_lines() {
        let cli = Cli::try_parse_from(["cvsparse", "lines", "--cache", "c.json"]).unwrap();
        if let Command::Lines(args) = cli.command {
            assert_eq!(args.cache.as_deref(), Some("c.json"));
        } else {
            panic!("Expected Lines command");
        }
    }
}
