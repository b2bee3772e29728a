//! Command implementations for cvsparse.

mod lines;
mod parse;

use crate::cli::Command;
use cvsparse::config::Config;
use cvsparse::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Parse(args) => parse::cmd_parse(args),
        Command::Lines(args) => lines::cmd_lines(args),
    }
}

/// Load the config file if one was given, otherwise use defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}
