//! `cvsparse parse`: run a log through the parser.

use super::load_config;
use crate::cli::ParseArgs;
use cvsparse::cache::{Cache, JsonFileCache, MemoryCache};
use cvsparse::config::{Config, OutputFormat};
use cvsparse::cvs::CvsParser;
use cvsparse::error::{CvsError, Result};
use cvsparse::sink::NdjsonSink;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing::debug;

pub(super) fn cmd_parse(args: ParseArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let root_path = config.effective_root_path().to_string();
    debug!(root_path = %root_path, cache = %config.cache_path, "starting parse");

    let input: Box<dyn BufRead> = match &args.log {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                CvsError::Io(format!("failed to open log '{}': {}", path.display(), e))
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match config.output {
        OutputFormat::Ndjson => Box::new(BufWriter::new(io::stdout().lock())),
        OutputFormat::Summary => Box::new(io::sink()),
    };

    let cache: Box<dyn Cache> = if args.no_cache {
        Box::new(MemoryCache::new())
    } else {
        Box::new(JsonFileCache::open(&config.cache_path)?)
    };

    let sink = NdjsonSink::new(output, config.dedup_committers);
    let mut parser = CvsParser::new(root_path, sink, cache);
    parser.parse_reader(input)?;
    let outcome = parser.finish()?;
    outcome.sink.into_inner()?;

    if config.output == OutputFormat::Summary {
        let summary = serde_json::to_string(&outcome.summary)
            .map_err(|e| CvsError::Io(format!("failed to serialize summary: {}", e)))?;
        println!("{}", summary);
    }

    Ok(())
}

/// Config file values with command-line overrides applied.
fn resolve_config(args: &ParseArgs) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(uri) = &args.uri {
        config.repository_uri = uri.clone();
    }
    if let Some(root) = &args.root {
        config.root_path = Some(root.clone());
    }
    if let Some(cache) = &args.cache {
        config.cache_path = cache.clone();
    }
    if let Some(format) = &args.format {
        config.output = OutputFormat::from_str(format).ok_or_else(|| {
            CvsError::UserError(format!(
                "unknown output format '{}' (expected 'ndjson' or 'summary')",
                format
            ))
        })?;
    }

    config.validate()?;
    Ok(config)
}
