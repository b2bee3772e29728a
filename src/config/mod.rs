//! Configuration for cvsparse.
//!
//! A YAML file describes the repository being mined and where derived data
//! is cached. Unknown fields are ignored and every field has a default, so
//! an empty file is a valid configuration. Command-line flags override it.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::Config;
pub use types::OutputFormat;
