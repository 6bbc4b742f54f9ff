//! Stable exit codes for workflow CLI commands.

/// Command succeeded, or the user declined to overwrite an existing file.
pub const OK: i32 = 0;
/// Invalid input, unknown profile or unusable configuration.
pub const INVALID: i32 = 1;
/// Directory creation or template copy failed.
pub const FILESYSTEM: i32 = 2;
/// The project file was created but the OS opener could not be launched.
pub const OPEN_FAILED: i32 = 3;
