use std::io;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Sink;
use crate::format::Format;
use crate::levels::Severity;
use crate::record::Record;

/// Sink that keeps records in memory for later inspection.
///
/// The threshold starts at [`Severity::MIN`].
#[derive(Debug)]
pub struct CaptureSink {
    threshold: AtomicI32,
    format: Mutex<Format>,
    records: Mutex<Vec<Record>>,
}

impl CaptureSink {
    /// Creates an empty capture sink using the default format.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every captured record, oldest first.
    pub fn drain(&self) -> Vec<Record> {
        std::mem::take(&mut *lock(&self.records))
    }

    /// Renders every captured record with the current format without draining.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let format = lock(&self.format).clone();
        lock(&self.records)
            .iter()
            .map(|record| format.render(record))
            .collect()
    }

    /// Number of records captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    /// Reports whether no record has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.records).is_empty()
    }
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self {
            threshold: AtomicI32::new(Severity::MIN.value()),
            format: Mutex::new(Format::default()),
            records: Mutex::new(Vec::new()),
        }
    }
}

impl Sink for CaptureSink {
    fn threshold(&self) -> Severity {
        Severity::new(self.threshold.load(Ordering::Relaxed))
    }

    fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold.value(), Ordering::Relaxed);
    }

    fn set_format(&self, format: Format) {
        *lock(&self.format) = format;
    }

    fn emit(&self, record: &Record) -> io::Result<()> {
        lock(&self.records).push(record.clone());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_records_in_order_and_clears() {
        let sink = CaptureSink::new();
        sink.emit(&Record::new("a", Severity::INFO, "first".to_owned()))
            .unwrap();
        sink.emit(&Record::new("b", Severity::DEBUG, "second".to_owned()))
            .unwrap();
        assert_eq!(sink.len(), 2);

        let records = sink.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message(), "first");
        assert_eq!(records[1].name(), "b");
        assert!(sink.is_empty());
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn default_threshold_admits_negative_levels() {
        let sink = CaptureSink::new();
        assert_eq!(sink.threshold(), Severity::MIN);
        assert!(Severity::new(-980) >= sink.threshold());
    }

    #[test]
    fn lines_use_the_configured_format() {
        let sink = CaptureSink::new();
        sink.set_format(Format::parse("%(name)s|%(message)s").unwrap());
        sink.emit(&Record::new("a.b", Severity::INFO, "hi".to_owned()))
            .unwrap();
        assert_eq!(sink.lines(), vec!["a.b|hi".to_owned()]);
        assert_eq!(sink.len(), 1);
    }
}
