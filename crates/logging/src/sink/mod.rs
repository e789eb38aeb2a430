//! crates/logging/src/sink/mod.rs
//! Destinations for log records.

use std::io;

use crate::format::Format;
use crate::levels::Severity;
use crate::record::Record;

mod buffer;
mod capture;
mod stream;

pub use buffer::SharedBuffer;
pub use capture::CaptureSink;
pub use stream::StreamSink;

/// Destination and formatting configuration for emitted records.
///
/// Sinks are shared between the registry and any code holding a handle, so
/// every method takes `&self` and implementations synchronise internally.
/// The registry only calls [`emit`](Self::emit) for records whose severity is
/// at or above [`threshold`](Self::threshold).
pub trait Sink: Send + Sync {
    /// Minimum severity this sink accepts.
    fn threshold(&self) -> Severity;

    /// Updates the minimum severity this sink accepts.
    fn set_threshold(&self, threshold: Severity);

    /// Replaces the template used to render records.
    fn set_format(&self, format: Format);

    /// Writes a single record.
    fn emit(&self, record: &Record) -> io::Result<()>;

    /// Flushes any buffered output.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
