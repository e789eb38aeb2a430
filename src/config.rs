//! src/config.rs
//! Raw initializer inputs and the parsing rules that turn them into levels.

use logging::{LineMode, Severity};

use crate::error::VmoduleError;

/// Inputs to [`VmoduleConfig::apply`](crate::VmoduleConfig::apply).
///
/// Holds the raw values an operator supplies: a global verbosity, a vmodule
/// override string such as `"net=2,db.pool=1"`, and an optional record
/// template. Nothing is validated until the configuration is applied.
///
/// # Examples
///
/// ```
/// use vmodule::{VmoduleConfig, Severity};
///
/// let config = VmoduleConfig::from_args(Some("2"), Some("net=1"))?
///     .with_format("%(levelname)s %(message)s");
/// assert_eq!(config.threshold(), Severity::new(18));
/// assert_eq!(config.vmodule(), Some("net=1"));
/// # Ok::<(), vmodule::VmoduleError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VmoduleConfig {
    verbosity: Option<i32>,
    vmodule: Option<String>,
    format: Option<String>,
    line_mode: LineMode,
    force: bool,
}

impl VmoduleConfig {
    /// Creates a configuration with every input unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from command-line style text.
    ///
    /// A blank verbosity counts as unset. Any other verbosity must be a
    /// base-10 integer.
    pub fn from_args(verbosity: Option<&str>, vmodule: Option<&str>) -> Result<Self, VmoduleError> {
        let verbosity = match verbosity {
            Some(text) if !text.trim().is_empty() => Some(parse_verbosity(text)?),
            _ => None,
        };
        Ok(Self {
            verbosity,
            vmodule: vmodule.map(str::to_owned),
            ..Self::default()
        })
    }

    /// Sets the global verbosity.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: impl Into<Option<i32>>) -> Self {
        self.verbosity = verbosity.into();
        self
    }

    /// Sets the comma-separated `name=level` override string.
    #[must_use]
    pub fn with_vmodule(mut self, vmodule: impl Into<String>) -> Self {
        self.vmodule = Some(vmodule.into());
        self
    }

    /// Sets the record template.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets whether each record is terminated with a newline.
    #[must_use]
    pub fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Replaces an already installed sink instead of keeping it.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Global verbosity, if set.
    #[must_use]
    pub const fn verbosity(&self) -> Option<i32> {
        self.verbosity
    }

    /// Override string, if set.
    #[must_use]
    pub fn vmodule(&self) -> Option<&str> {
        self.vmodule.as_deref()
    }

    /// Record template, if set.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Line termination mode.
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Whether an existing sink is replaced.
    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }

    /// Root level implied by the verbosity.
    #[must_use]
    pub const fn threshold(&self) -> Severity {
        verbosity_threshold(self.verbosity)
    }
}

/// Parses a textual global verbosity. Surrounding whitespace is ignored.
pub fn parse_verbosity(text: &str) -> Result<i32, VmoduleError> {
    text.trim()
        .parse::<i32>()
        .map_err(|source| VmoduleError::InvalidVerbosity {
            input: text.to_owned(),
            source,
        })
}

/// Maps a global verbosity to the root level.
///
/// Unset means `WARNING`, `0` means `INFO`, and `n` means `INFO - n`.
///
/// # Examples
///
/// ```
/// use vmodule::{Severity, verbosity_threshold};
///
/// assert_eq!(verbosity_threshold(None), Severity::WARNING);
/// assert_eq!(verbosity_threshold(Some(0)), Severity::INFO);
/// assert_eq!(verbosity_threshold(Some(10)), Severity::DEBUG);
/// ```
#[must_use]
pub const fn verbosity_threshold(verbosity: Option<i32>) -> Severity {
    match verbosity {
        None => Severity::WARNING,
        Some(0) => Severity::INFO,
        Some(level) => Severity::INFO.below(level),
    }
}

/// Maps a per-category override level to a category level.
///
/// Unlike [`verbosity_threshold`] there is no unset case, so `0` is `INFO`.
#[must_use]
pub const fn override_threshold(level: i32) -> Severity {
    Severity::INFO.below(level)
}

/// Splits one `name=level` item at its first `=` and parses the level.
///
/// The name is kept verbatim; an empty name addresses the root category. An
/// item without `=` has an empty level and is rejected.
pub fn parse_override(item: &str) -> Result<(&str, Severity), VmoduleError> {
    let (name, level) = item.split_once('=').unwrap_or((item, ""));
    let value = level
        .trim()
        .parse::<i32>()
        .map_err(|source| VmoduleError::InvalidOverride {
            item: item.to_owned(),
            category: name.to_owned(),
            level: level.to_owned(),
            source,
        })?;
    Ok((name, override_threshold(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_zero_is_info_but_unset_is_warning() {
        assert_eq!(verbosity_threshold(None), Severity::WARNING);
        assert_eq!(verbosity_threshold(Some(0)), Severity::INFO);
        assert_eq!(verbosity_threshold(Some(1)), Severity::new(19));
        assert_eq!(verbosity_threshold(Some(-5)), Severity::new(25));
    }

    #[test]
    fn verbosity_arithmetic_saturates() {
        assert_eq!(verbosity_threshold(Some(i32::MAX)), Severity::new(20 - i32::MAX));
        assert_eq!(verbosity_threshold(Some(i32::MIN)), Severity::new(i32::MAX));
    }

    #[test]
    fn override_zero_is_info() {
        assert_eq!(override_threshold(0), Severity::INFO);
        assert_eq!(override_threshold(3), Severity::new(17));
    }

    #[test]
    fn test_parse_override_splits_on_first_equals() {
        assert_eq!(parse_override("x.y.z=1").unwrap(), ("x.y.z", Severity::new(19)));
        assert_eq!(parse_override("a= 2 ").unwrap(), ("a", Severity::new(18)));
        assert_eq!(parse_override("=4").unwrap(), ("", Severity::new(16)));
        assert_eq!(parse_override("a=-1").unwrap(), ("a", Severity::new(21)));
    }

    #[test]
    fn test_parse_override_rejects_bad_levels() {
        let error = parse_override("x.y.z=foo").unwrap_err();
        assert!(matches!(
            error,
            VmoduleError::InvalidOverride { ref category, ref level, .. }
                if category == "x.y.z" && level == "foo"
        ));

        assert!(parse_override("noequals").is_err());
        assert!(parse_override("").is_err());
        assert!(parse_override("a=1=2").is_err());
    }

    #[test]
    fn test_parse_verbosity() {
        assert_eq!(parse_verbosity(" 3 ").unwrap(), 3);
        let error = parse_verbosity("lots").unwrap_err();
        assert!(matches!(error, VmoduleError::InvalidVerbosity { ref input, .. } if input == "lots"));
    }

    #[test]
    fn from_args_treats_blank_verbosity_as_unset() {
        let config = VmoduleConfig::from_args(Some("  "), None).unwrap();
        assert_eq!(config.verbosity(), None);
        assert_eq!(config.threshold(), Severity::WARNING);

        assert!(VmoduleConfig::from_args(Some("x"), None).is_err());
    }

    #[test]
    fn builders_set_fields() {
        let config = VmoduleConfig::new()
            .with_verbosity(4)
            .with_vmodule("a=1")
            .with_format("%(message)s")
            .with_line_mode(LineMode::WithoutNewline)
            .with_force(true);

        assert_eq!(config.verbosity(), Some(4));
        assert_eq!(config.vmodule(), Some("a=1"));
        assert_eq!(config.format(), Some("%(message)s"));
        assert_eq!(config.line_mode(), LineMode::WithoutNewline);
        assert!(config.force());
        assert_eq!(config.with_verbosity(None).verbosity(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let config: VmoduleConfig =
            serde_json::from_str(r#"{"verbosity": 2, "vmodule": "net=1"}"#).unwrap();
        assert_eq!(config.verbosity(), Some(2));
        assert_eq!(config.vmodule(), Some("net=1"));
        assert_eq!(config.line_mode(), LineMode::WithNewline);
        assert!(!config.force());

        let json = serde_json::to_string(&config.with_line_mode(LineMode::WithoutNewline)).unwrap();
        assert!(json.contains("\"without_newline\""));
    }
}
