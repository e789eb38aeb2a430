//! crates/logging/src/record.rs
//! Log records handed from loggers to sinks.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use time::OffsetDateTime;

use crate::levels::Severity;

/// Name reported for records logged through the root category.
pub const ROOT_NAME: &str = "root";

/// A single log event, captured at the call site.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    name: String,
    level: Severity,
    message: String,
    file: &'static str,
    line: u32,
    module_path: Option<&'static str>,
    created: OffsetDateTime,
    thread: Option<String>,
    thread_id: u64,
    process: u32,
}

impl Record {
    /// Creates a record stamped with the current time, thread, and process.
    ///
    /// An empty `name` denotes the root category and is reported as
    /// [`ROOT_NAME`].
    #[must_use]
    pub fn new(name: &str, level: Severity, message: String) -> Self {
        let name = if name.is_empty() { ROOT_NAME } else { name };
        Self {
            name: name.to_owned(),
            level,
            message,
            file: "<unknown>",
            line: 0,
            module_path: None,
            created: now(),
            thread: thread::current().name().map(str::to_owned),
            thread_id: current_thread_id(),
            process: std::process::id(),
        }
    }

    /// Records the source location of the event.
    #[must_use]
    pub fn with_location(mut self, file: &'static str, line: u32) -> Self {
        self.file = file;
        self.line = line;
        self
    }

    /// Records the Rust module path of the call site.
    #[must_use]
    pub fn with_module_path(mut self, module_path: Option<&'static str>) -> Self {
        self.module_path = module_path;
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub fn with_created(mut self, created: OffsetDateTime) -> Self {
        self.created = created;
        self
    }

    /// Overrides the thread name.
    #[must_use]
    pub fn with_thread(mut self, thread: Option<String>) -> Self {
        self.thread = thread;
        self
    }

    /// Dotted category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Severity of the event.
    #[must_use]
    pub const fn level(&self) -> Severity {
        self.level
    }

    /// Fully rendered message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file path as reported by the compiler.
    #[must_use]
    pub const fn pathname(&self) -> &'static str {
        self.file
    }

    /// Final component of [`pathname`](Self::pathname).
    #[must_use]
    pub fn filename(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }

    /// [`filename`](Self::filename) without its extension.
    #[must_use]
    pub fn module(&self) -> &'static str {
        Path::new(self.file)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.file)
    }

    /// Source line of the call site, or `0` when unknown.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Rust module path of the call site, when known.
    #[must_use]
    pub const fn module_path(&self) -> Option<&'static str> {
        self.module_path
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created(&self) -> OffsetDateTime {
        self.created
    }

    /// Name of the emitting thread, if it has one.
    #[must_use]
    pub fn thread(&self) -> Option<&str> {
        self.thread.as_deref()
    }

    /// Numeric identifier of the emitting thread, unique within the process.
    #[must_use]
    pub const fn thread_id(&self) -> u64 {
        self.thread_id
    }

    /// Identifier of the emitting process.
    #[must_use]
    pub const fn process(&self) -> u32 {
        self.process
    }
}

fn current_thread_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static THREAD_ID: u64 = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    }
    THREAD_ID.with(|id| *id)
}

// The local offset is unavailable on some platforms once threads exist.
fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_reports_root() {
        let record = Record::new("", Severity::INFO, "hello".to_owned());
        assert_eq!(record.name(), ROOT_NAME);
    }

    #[test]
    fn location_helpers_split_the_path() {
        let record = Record::new("a.b", Severity::INFO, String::new())
            .with_location("src/net/server.rs", 42);
        assert_eq!(record.pathname(), "src/net/server.rs");
        assert_eq!(record.filename(), "server.rs");
        assert_eq!(record.module(), "server");
        assert_eq!(record.line(), 42);
    }

    #[test]
    fn new_record_defaults_to_unknown_location() {
        let record = Record::new("a", Severity::DEBUG, "x".to_owned());
        assert_eq!(record.line(), 0);
        assert_eq!(record.pathname(), "<unknown>");
        assert_eq!(record.process(), std::process::id());
    }

    #[test]
    fn thread_ids_are_stable_per_thread_and_distinct_across_threads() {
        let here = Record::new("a", Severity::INFO, String::new()).thread_id();
        let again = Record::new("a", Severity::INFO, String::new()).thread_id();
        let other = thread::spawn(|| Record::new("a", Severity::INFO, String::new()).thread_id())
            .join()
            .unwrap();

        assert_eq!(here, again);
        assert_ne!(here, other);
        assert!(here > 0);
    }
}
