//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error (missing server, conflicting options)
pub const USAGE: i32 = 64;

/// Data format error (malformed tool parameters)
pub const DATAERR: i32 = 65;

/// Cannot open input (parameters file)
pub const NOINPUT: i32 = 66;

/// Service unavailable (server could not be reached or spawned)
pub const UNAVAILABLE: i32 = 69;

/// Internal software error (protocol failure)
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
