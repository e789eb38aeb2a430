//! crates/logging/src/registry.rs
//! Category registry, hierarchical level resolution, and logger handles.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::format::Format;
use crate::levels::Severity;
use crate::line_mode::LineMode;
use crate::record::{ROOT_NAME, Record};
use crate::sink::{Sink, StreamSink};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Registry of named logger categories and the sink they write to.
///
/// Categories are dotted names such as `"net.http.client"`. A category
/// without an explicit level inherits the level of its nearest ancestor that
/// has one, and ultimately the root level (initially [`Severity::WARNING`]).
/// The empty name addresses the root category itself.
///
/// `Registry` is a cheap handle: clones share the same state. Use
/// [`Registry::global`] for the process-wide instance, or [`Registry::new`]
/// for an isolated one.
///
/// # Examples
///
/// ```
/// use logging::{CaptureSink, Registry, Severity};
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// let sink = Arc::new(CaptureSink::new());
/// registry.install_sink(sink.clone());
/// registry.set_level("x.y", Severity::DEBUG);
///
/// registry.logger("x.y.z").debug("inherited from x.y");
/// registry.logger("a.b").info("below the WARNING root level");
///
/// let records = sink.drain();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name(), "x.y.z");
/// ```
#[derive(Clone)]
pub struct Registry {
    shared: Arc<RwLock<RegistryState>>,
}

struct RegistryState {
    root_level: Severity,
    categories: HashMap<String, Option<Severity>>,
    sink: Option<Arc<dyn Sink>>,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            root_level: Severity::WARNING,
            categories: HashMap::new(),
            sink: None,
        }
    }
}

impl RegistryState {
    fn effective_level(&self, name: &str) -> Severity {
        let mut current = name;
        while !current.is_empty() {
            if let Some(Some(level)) = self.categories.get(current) {
                if *level != Severity::NOTSET {
                    return *level;
                }
            }
            current = match current.rfind('.') {
                Some(index) => &current[..index],
                None => "",
            };
        }
        self.root_level
    }
}

impl Registry {
    /// Creates an isolated registry with a `WARNING` root level and no sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(RwLock::new(RegistryState::default())),
        }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns a logger for `name`, creating the category if it does not exist.
    #[must_use]
    pub fn logger(&self, name: &str) -> Logger {
        if !name.is_empty() {
            self.write()
                .categories
                .entry(name.to_owned())
                .or_insert(None);
        }
        Logger {
            registry: self.clone(),
            name: Arc::from(name),
        }
    }

    /// Returns the root logger.
    #[must_use]
    pub fn root(&self) -> Logger {
        self.logger("")
    }

    /// Sets the explicit level of `name`, creating the category if needed.
    ///
    /// An empty name sets the root level. Setting [`Severity::NOTSET`] on a
    /// non-root category makes it inherit again.
    pub fn set_level(&self, name: &str, level: Severity) {
        let mut state = self.write();
        if name.is_empty() {
            state.root_level = level;
        } else {
            state.categories.insert(name.to_owned(), Some(level));
        }
    }

    /// Returns the explicit level of `name`, if one was set.
    #[must_use]
    pub fn level(&self, name: &str) -> Option<Severity> {
        let state = self.read();
        if name.is_empty() {
            return Some(state.root_level);
        }
        state.categories.get(name).copied().flatten()
    }

    /// Resolves the level that applies to `name` through inheritance.
    #[must_use]
    pub fn effective_level(&self, name: &str) -> Severity {
        self.read().effective_level(name)
    }

    /// Reports whether a record at `level` logged through `name` is emitted.
    #[must_use]
    pub fn is_enabled_for(&self, name: &str, level: Severity) -> bool {
        level >= self.effective_level(name)
    }

    /// Sets the root level, the threshold every category inherits by default.
    pub fn set_root_level(&self, level: Severity) {
        self.write().root_level = level;
    }

    /// Returns the root level.
    #[must_use]
    pub fn root_level(&self) -> Severity {
        self.read().root_level
    }

    /// Installs `sink`, returning the previously installed one.
    pub fn install_sink(&self, sink: Arc<dyn Sink>) -> Option<Arc<dyn Sink>> {
        self.write().sink.replace(sink)
    }

    /// Returns the installed sink.
    #[must_use]
    pub fn sink(&self) -> Option<Arc<dyn Sink>> {
        self.read().sink.clone()
    }

    /// Removes and returns the installed sink.
    pub fn take_sink(&self) -> Option<Arc<dyn Sink>> {
        self.write().sink.take()
    }

    /// Applies a one-shot configuration and reports whether a sink was installed.
    ///
    /// The root level is updated whenever the configuration carries one. A
    /// new [`StreamSink`] is installed only when no sink exists yet, unless
    /// [`BasicConfig::force`] is set, in which case the previous sink is
    /// flushed and replaced. Calling this repeatedly therefore never stacks
    /// sinks.
    pub fn basic_config(&self, config: BasicConfig) -> bool {
        let BasicConfig {
            level,
            format,
            stream,
            line_mode,
            force,
        } = config;

        let previous = {
            let mut state = self.write();
            if let Some(level) = level {
                state.root_level = level;
            }
            if state.sink.is_some() && !force {
                return false;
            }
            let stream = stream.unwrap_or_else(|| Box::new(io::stderr()));
            let sink = StreamSink::with_parts(stream, format.unwrap_or_default(), line_mode);
            state.sink.replace(Arc::new(sink))
        };

        if let Some(previous) = previous {
            if let Err(error) = previous.flush() {
                report_error(&error);
            }
        }
        true
    }

    /// Passes `record` to the installed sink if it clears the sink's threshold.
    ///
    /// Category levels are not consulted here; callers decide whether the
    /// record is enabled before building it. Without a sink, records at
    /// `WARNING` and above are written to standard error as bare messages.
    pub fn handle(&self, record: &Record) -> io::Result<()> {
        let sink = self.sink();
        match sink {
            Some(sink) if record.level() >= sink.threshold() => sink.emit(record),
            Some(_) => Ok(()),
            None if record.level() >= Severity::WARNING => {
                writeln!(io::stderr().lock(), "{}", record.message())
            }
            None => Ok(()),
        }
    }

    /// Like [`handle`](Self::handle), reporting write failures on standard
    /// error instead of returning them.
    pub fn dispatch(&self, record: &Record) {
        if let Err(error) = self.handle(record) {
            report_error(&error);
        }
    }

    /// Names of every category created so far, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().categories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Forgets every category, removes the sink, and restores the `WARNING`
    /// root level.
    pub fn reset(&self) {
        *self.write() = RegistryState::default();
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.shared.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Registry")
            .field("root_level", &state.root_level)
            .field("categories", &state.categories.len())
            .field("has_sink", &state.sink.is_some())
            .finish()
    }
}

fn report_error(error: &io::Error) {
    let _ = writeln!(io::stderr().lock(), "--- logging error: {error}");
}

/// Returns a logger for `name` from the process-wide registry.
#[must_use]
pub fn get_logger(name: &str) -> Logger {
    Registry::global().logger(name)
}

/// Settings applied by [`Registry::basic_config`].
#[derive(Default)]
pub struct BasicConfig {
    level: Option<Severity>,
    format: Option<Format>,
    stream: Option<Box<dyn Write + Send>>,
    line_mode: LineMode,
    force: bool,
}

impl BasicConfig {
    /// Creates an empty configuration: stderr, default format, level untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root level.
    #[must_use]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the record template.
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the destination stream.
    #[must_use]
    pub fn stream(mut self, stream: Box<dyn Write + Send>) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Sets the line termination mode.
    #[must_use]
    pub fn line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Replaces an existing sink instead of keeping it.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl fmt::Debug for BasicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicConfig")
            .field("level", &self.level)
            .field("format", &self.format.as_ref().map(Format::template))
            .field("stream", &self.stream.is_some())
            .field("line_mode", &self.line_mode)
            .field("force", &self.force)
            .finish()
    }
}

/// Handle for logging through one category of a [`Registry`].
#[derive(Clone)]
pub struct Logger {
    registry: Registry,
    name: Arc<str>,
}

impl Logger {
    /// Dotted category name; the root logger reports `"root"`.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            ROOT_NAME
        } else {
            &*self.name
        }
    }

    /// Registry this logger belongs to.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Sets this category's explicit level.
    pub fn set_level(&self, level: Severity) {
        self.registry.set_level(&self.name, level);
    }

    /// Returns this category's explicit level, if any.
    #[must_use]
    pub fn level(&self) -> Option<Severity> {
        self.registry.level(&self.name)
    }

    /// Resolves the level that applies to this category.
    #[must_use]
    pub fn effective_level(&self) -> Severity {
        self.registry.effective_level(&self.name)
    }

    /// Reports whether a record at `level` would be emitted.
    #[must_use]
    pub fn is_enabled_for(&self, level: Severity) -> bool {
        self.registry.is_enabled_for(&self.name, level)
    }

    /// Logs `message` at an arbitrary `level`, standard or custom.
    ///
    /// The message is only rendered when the level is enabled. The caller's
    /// file and line are recorded.
    #[track_caller]
    pub fn log(&self, level: Severity, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }
        let location = Location::caller();
        let record = Record::new(&self.name, level, message.to_string())
            .with_location(location.file(), location.line());
        self.registry.dispatch(&record);
    }

    /// Logs at [`Severity::CRITICAL`].
    #[track_caller]
    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Severity::CRITICAL, message);
    }

    /// Logs at [`Severity::ERROR`].
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::ERROR, message);
    }

    /// Logs at [`Severity::WARNING`].
    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Severity::WARNING, message);
    }

    /// Logs at [`Severity::INFO`].
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::INFO, message);
    }

    /// Logs at [`Severity::DEBUG`].
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::DEBUG, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("effective_level", &self.effective_level())
            .finish()
    }
}
