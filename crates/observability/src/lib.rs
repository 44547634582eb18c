//! Tracing/logging setup shared by stockwise binaries.
//!
//! Libraries in the workspace only emit `tracing` events; installing a
//! subscriber is left to the process that embeds them.

pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(LogFormat::Json);
}
