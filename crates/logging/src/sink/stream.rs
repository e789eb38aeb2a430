use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Sink;
use crate::format::Format;
use crate::levels::Severity;
use crate::line_mode::LineMode;
use crate::record::Record;

/// Sink that renders records through a [`Format`] into an [`io::Write`] target.
///
/// The sink owns the writer together with a reusable render buffer, so
/// repeated emissions avoid allocating a fresh string per record. Each record
/// is followed by a newline unless the [`LineMode`] says otherwise, and the
/// writer is flushed after every record. The threshold starts at
/// [`Severity::MIN`], so only category levels filter until
/// [`Sink::set_threshold`] is called.
///
/// # Examples
///
/// ```
/// use logging::{Format, Record, SharedBuffer, Severity, Sink, StreamSink};
///
/// let buffer = SharedBuffer::new();
/// let sink = StreamSink::with_format(buffer.clone(), Format::parse("%(levelname)s %(message)s")?);
///
/// sink.emit(&Record::new("app", Severity::WARNING, "disk almost full".to_owned()))?;
/// assert_eq!(buffer.contents(), "WARNING disk almost full\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StreamSink<W> {
    threshold: AtomicI32,
    state: Mutex<StreamState<W>>,
}

struct StreamState<W> {
    writer: W,
    format: Format,
    line_mode: LineMode,
    scratch: String,
}

impl<W> StreamSink<W> {
    /// Creates a sink using the default format and newline-terminated records.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_parts(writer, Format::default(), LineMode::WithNewline)
    }

    /// Creates a sink rendering records with `format`.
    #[must_use]
    pub fn with_format(writer: W, format: Format) -> Self {
        Self::with_parts(writer, format, LineMode::WithNewline)
    }

    /// Creates a sink from an explicit format and [`LineMode`].
    #[must_use]
    pub fn with_parts(writer: W, format: Format, line_mode: LineMode) -> Self {
        Self {
            threshold: AtomicI32::new(Severity::MIN.value()),
            state: Mutex::new(StreamState {
                writer,
                format,
                line_mode,
                scratch: String::new(),
            }),
        }
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub fn line_mode(&self) -> LineMode {
        self.lock().line_mode
    }

    /// Updates the [`LineMode`] used for subsequent records.
    pub fn set_line_mode(&self, line_mode: LineMode) {
        self.lock().line_mode = line_mode;
    }

    /// Returns a copy of the current format.
    #[must_use]
    pub fn format(&self) -> Format {
        self.lock().format.clone()
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
    }

    fn lock(&self) -> MutexGuard<'_, StreamState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StreamSink<Box<dyn Write + Send>> {
    /// Creates a sink writing to the process's standard error stream.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }
}

impl<W> Sink for StreamSink<W>
where
    W: Write + Send,
{
    fn threshold(&self) -> Severity {
        Severity::new(self.threshold.load(Ordering::Relaxed))
    }

    fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold.value(), Ordering::Relaxed);
    }

    fn set_format(&self, format: Format) {
        self.lock().format = format;
    }

    fn emit(&self, record: &Record) -> io::Result<()> {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.scratch.clear();
        state.format.render_into(record, &mut state.scratch);
        if state.line_mode.append_newline() {
            state.scratch.push('\n');
        }
        state.writer.write_all(state.scratch.as_bytes())?;
        state.writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().writer.flush()
    }
}

impl<W> fmt::Debug for StreamSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("StreamSink")
            .field("threshold", &self.threshold.load(Ordering::Relaxed))
            .field("format", &state.format.template())
            .field("line_mode", &state.line_mode)
            .finish_non_exhaustive()
    }
}
