//! Exit code constants for the cvsparse CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Malformed log input (unparseable dates or counts)
//! - 3: I/O failure reading the log or writing events
//! - 4: Cache store failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The log contained a numeric field that could not be interpreted.
pub const FORMAT_ERROR: i32 = 2;

/// Reading input or writing output failed.
pub const IO_FAILURE: i32 = 3;

/// The line-delta cache could not be read or written.
pub const CACHE_FAILURE: i32 = 4;
