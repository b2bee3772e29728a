//! `cvsparse lines`: print the stored line-delta map.

use super::load_config;
use crate::cli::LinesArgs;
use cvsparse::cache::{JsonFileCache, load_line_deltas};
use cvsparse::error::{CvsError, Result};

pub(super) fn cmd_lines(args: LinesArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(cache) = args.cache {
        config.cache_path = cache;
    }
    config.validate()?;

    let cache = JsonFileCache::open(&config.cache_path)?;
    let lines = load_line_deltas(&cache)?;

    let rendered = serde_json::to_string_pretty(&lines)
        .map_err(|e| CvsError::Io(format!("failed to render line counts: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
