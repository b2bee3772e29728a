//! Filesystem utilities for cvsparse.
//!
//! The file-backed cache rewrites its whole document when synced, so
//! writes go through a temp file and a rename to keep the store readable
//! if the process dies mid-write.

pub mod atomic;

pub use atomic::atomic_write;
