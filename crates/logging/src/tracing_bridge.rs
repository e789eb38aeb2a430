//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the category registry.
//!
//! [`RegistryLayer`] is a tracing-subscriber layer that turns tracing events
//! into [`Record`]s. The event target becomes the category name with `::`
//! replaced by `.`, so `tracing::debug!(target: "net::http", ..)` is filtered
//! by the level configured for `net.http` and its ancestors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{Registry, Severity, init_tracing};
//!
//! let registry = Registry::global().clone();
//! registry.set_level("net.http", Severity::DEBUG);
//! init_tracing(registry)?;
//!
//! tracing::debug!(target: "net::http", "request sent");
//! ```

use std::fmt::Write as _;

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::levels::Severity;
use crate::record::Record;
use crate::registry::Registry;

/// Severity assigned to `tracing` `TRACE` events.
pub const TRACE: Severity = Severity::new(5);

/// A tracing layer that routes events through a [`Registry`].
#[derive(Clone, Debug)]
pub struct RegistryLayer {
    registry: Registry,
}

impl RegistryLayer {
    /// Creates a layer feeding `registry`.
    #[must_use]
    pub const fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Maps a tracing target to a dotted category name.
    fn target_to_category(target: &str) -> String {
        target.replace("::", ".")
    }

    /// Maps a tracing level to a severity.
    const fn level_to_severity(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::ERROR,
            Level::WARN => Severity::WARNING,
            Level::INFO => Severity::INFO,
            Level::DEBUG => Severity::DEBUG,
            Level::TRACE => TRACE,
        }
    }
}

impl<S> Layer<S> for RegistryLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let category = Self::target_to_category(metadata.target());
        let severity = Self::level_to_severity(metadata.level());
        if !self.registry.is_enabled_for(&category, severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let record = Record::new(&category, severity, visitor.finish())
            .with_location(metadata.file().unwrap_or("<unknown>"), metadata.line().unwrap_or(0))
            .with_module_path(metadata.module_path());
        self.registry.dispatch(&record);
    }
}

/// Collects the `message` field and appends other fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Installs a [`RegistryLayer`] feeding `registry` as the global default
/// tracing subscriber.
///
/// Fails when another global subscriber was already installed.
pub fn init_tracing(registry: Registry) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(RegistryLayer::new(registry))
        .try_init()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::sink::CaptureSink;

    fn capture() -> (Registry, Arc<CaptureSink>) {
        let registry = Registry::new();
        let sink = Arc::new(CaptureSink::new());
        registry.install_sink(sink.clone());
        (registry, sink)
    }

    #[test]
    fn test_target_to_category() {
        assert_eq!(RegistryLayer::target_to_category("net::http::client"), "net.http.client");
        assert_eq!(RegistryLayer::target_to_category("plain"), "plain");
    }

    #[test]
    fn test_level_to_severity() {
        assert_eq!(RegistryLayer::level_to_severity(&Level::ERROR), Severity::ERROR);
        assert_eq!(RegistryLayer::level_to_severity(&Level::WARN), Severity::WARNING);
        assert_eq!(RegistryLayer::level_to_severity(&Level::INFO), Severity::INFO);
        assert_eq!(RegistryLayer::level_to_severity(&Level::DEBUG), Severity::DEBUG);
        assert_eq!(RegistryLayer::level_to_severity(&Level::TRACE), TRACE);
    }

    #[test]
    fn events_respect_category_levels() {
        let (registry, sink) = capture();
        registry.set_level("app.db", Severity::DEBUG);
        let subscriber = tracing_subscriber::registry().with(RegistryLayer::new(registry));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "app::db::pool", "connection opened");
            tracing::debug!(target: "app::web", "dropped");
            tracing::warn!(target: "app::web", "slow response");
        });

        let records = sink.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "app.db.pool");
        assert_eq!(records[0].message(), "connection opened");
        assert_eq!(records[1].level(), Severity::WARNING);
        assert!(records[1].line() > 0);
    }

    #[test]
    fn extra_fields_are_appended() {
        let (registry, sink) = capture();
        let subscriber = tracing_subscriber::registry().with(RegistryLayer::new(registry));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "job", attempt = 3, "giving up");
        });

        let records = sink.drain();
        assert_eq!(records[0].message(), "giving up attempt=3");
    }
}
