//! Logging and span export.
//!
//! ```text
//! tracing macros ─┬─► fmt layer ───────────────────────────────► stderr
//!                 └─► tracing-opentelemetry ─► JsonLineExporter ─► rotated .jsonl file
//! ```
//!
//! The export branch is only installed when `trace_export` is enabled.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: OpenTelemetry span exporter and tracer provider
//! - [`span_record`]: JSON line format of an exported span
//! - [`file_writer`]: size-rotated file writer

pub mod exporter;
pub mod file_writer;
pub mod init;
pub mod span_record;

pub use init::init_tracing;
