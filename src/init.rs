//! src/init.rs
//! Applies a [`VmoduleConfig`] to a registry.

use std::io::Write;

use logging::{BasicConfig, Format, Registry, log_at};

use crate::config::{VmoduleConfig, parse_override};
use crate::error::VmoduleError;
use crate::levels::{VLOG_1, VLOG_2, register_vlog_levels};

/// Category the initializer reports its own progress under.
pub const SELF_CATEGORY: &str = "vmodule";

impl VmoduleConfig {
    /// Configures `registry` from this configuration.
    ///
    /// Registers the VLOG level names, sets the root level from the
    /// verbosity, installs a stream sink writing to `output` (standard error
    /// when `None`) unless one is already installed, and finally applies each
    /// `name=level` override in order.
    ///
    /// An invalid format is reported before the registry is touched. An
    /// invalid override stops processing at that item; earlier items stay
    /// applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use vmodule::{Registry, SharedBuffer, VLOG_1, VmoduleConfig};
    ///
    /// let registry = Registry::new();
    /// let output = SharedBuffer::new();
    /// VmoduleConfig::new()
    ///     .with_vmodule("x.y.z=1")
    ///     .with_format("%(levelname)s %(name)s %(message)s")
    ///     .apply(&registry, Some(Box::new(output.clone())))?;
    ///
    /// registry.logger("x.y.z").log(VLOG_1, "Vlog 1");
    /// assert_eq!(output.contents(), "VLOG_1 x.y.z Vlog 1\n");
    /// # Ok::<(), vmodule::VmoduleError>(())
    /// ```
    pub fn apply(
        &self,
        registry: &Registry,
        output: Option<Box<dyn Write + Send>>,
    ) -> Result<(), VmoduleError> {
        register_vlog_levels();

        let format = self.format().map(Format::parse).transpose()?;

        let mut basic = BasicConfig::new()
            .level(self.threshold())
            .line_mode(self.line_mode())
            .force(self.force());
        if let Some(format) = format {
            basic = basic.format(format);
        }
        if let Some(output) = output {
            basic = basic.stream(output);
        }
        registry.basic_config(basic);

        match self.vmodule() {
            Some(vmodule) if !vmodule.is_empty() => apply_overrides(registry, vmodule),
            _ => Ok(()),
        }
    }
}

fn apply_overrides(registry: &Registry, vmodule: &str) -> Result<(), VmoduleError> {
    let logger = registry.logger(SELF_CATEGORY);
    log_at!(logger, VLOG_1, "Parse vmodule: {vmodule:?}");

    for item in vmodule.split(',') {
        log_at!(logger, VLOG_2, "Item: {item:?}");
        let (name, level) = parse_override(item)?;
        registry.set_level(name, level);
    }
    Ok(())
}

/// Configures the process-wide registry.
///
/// `base_verbosity` sets the root level (`None` is `WARNING`, `0` is `INFO`,
/// `n` is `INFO - n`). `category_overrides` is a comma-separated list of
/// `name=level` items, each setting that category to `INFO - level`.
/// `format` defaults to [`DEFAULT_FORMAT`](logging::DEFAULT_FORMAT) and
/// `output` to standard error.
///
/// Calling this again updates the levels but keeps the sink installed by the
/// first call.
///
/// # Examples
///
/// ```no_run
/// use vmodule::{VLOG_1, get_logger, vmodule_init};
///
/// vmodule_init(None, Some("net.peer=1"), None, None)?;
/// get_logger("net.peer").log(VLOG_1, "handshake complete");
/// # Ok::<(), vmodule::VmoduleError>(())
/// ```
pub fn vmodule_init(
    base_verbosity: Option<i32>,
    category_overrides: Option<&str>,
    format: Option<&str>,
    output: Option<Box<dyn Write + Send>>,
) -> Result<(), VmoduleError> {
    let mut config = VmoduleConfig::new().with_verbosity(base_verbosity);
    if let Some(overrides) = category_overrides {
        config = config.with_vmodule(overrides);
    }
    if let Some(format) = format {
        config = config.with_format(format);
    }
    config.apply(Registry::global(), output)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use logging::{CaptureSink, Severity, SharedBuffer};

    use super::*;

    fn message_only(registry: &Registry) -> SharedBuffer {
        let output = SharedBuffer::new();
        VmoduleConfig::new()
            .with_format("%(levelname)s:%(name)s:%(message)s")
            .apply(registry, Some(Box::new(output.clone())))
            .unwrap();
        output
    }

    #[test]
    fn self_logging_reports_the_parse() {
        let registry = Registry::new();
        let output = message_only(&registry);
        registry.set_level(SELF_CATEGORY, VLOG_2);

        VmoduleConfig::new()
            .with_vmodule("a=1,b=2")
            .apply(&registry, None)
            .unwrap();

        assert_eq!(
            output.contents(),
            "VLOG_1:vmodule:Parse vmodule: \"a=1,b=2\"\n\
             VLOG_2:vmodule:Item: \"a=1\"\n\
             VLOG_2:vmodule:Item: \"b=2\"\n"
        );
    }

    #[test]
    fn invalid_format_leaves_registry_untouched() {
        let registry = Registry::new();
        let error = VmoduleConfig::new()
            .with_verbosity(5)
            .with_format("%(bogus)s")
            .apply(&registry, None)
            .unwrap_err();

        assert!(matches!(error, VmoduleError::Format(_)));
        assert!(registry.sink().is_none());
        assert_eq!(registry.root_level(), Severity::WARNING);
    }

    #[test]
    fn items_before_a_bad_item_stay_applied() {
        let registry = Registry::new();
        let _output = message_only(&registry);

        let error = VmoduleConfig::new()
            .with_vmodule("good=3,bad=x,later=1")
            .apply(&registry, None)
            .unwrap_err();

        assert_eq!(error.item(), Some("bad=x"));
        assert_eq!(registry.level("good"), Some(Severity::new(17)));
        assert_eq!(registry.level("later"), None);
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let registry = Registry::new();
        let error = VmoduleConfig::new()
            .with_vmodule("a=1,")
            .apply(&registry, Some(Box::new(SharedBuffer::new())))
            .unwrap_err();
        assert_eq!(error.item(), Some(""));
    }

    #[test]
    fn empty_name_sets_the_root_level() {
        let registry = Registry::new();
        VmoduleConfig::new()
            .with_vmodule("=2")
            .apply(&registry, Some(Box::new(SharedBuffer::new())))
            .unwrap();
        assert_eq!(registry.root_level(), VLOG_2);
    }

    #[test]
    fn existing_sink_is_kept_unless_forced() {
        let registry = Registry::new();
        let capture = Arc::new(CaptureSink::new());
        registry.install_sink(capture.clone());

        let output = SharedBuffer::new();
        VmoduleConfig::new()
            .with_verbosity(0)
            .apply(&registry, Some(Box::new(output.clone())))
            .unwrap();
        registry.logger("a").info("to the capture sink");
        assert_eq!(capture.len(), 1);
        assert!(output.is_empty());

        VmoduleConfig::new()
            .with_verbosity(0)
            .with_format("%(message)s")
            .with_force(true)
            .apply(&registry, Some(Box::new(output.clone())))
            .unwrap();
        registry.logger("a").info("to the stream");
        assert_eq!(capture.len(), 1);
        assert_eq!(output.contents(), "to the stream\n");
    }
}
