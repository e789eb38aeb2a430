//! crates/logging/src/levels.rs
//! Numeric severity scale and the process-wide level-name table.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, PoisonError, RwLock};

use thiserror::Error;

/// Severity of a log record.
///
/// Severities form a linear integer scale where lower values are more
/// verbose. The standard levels are exposed as associated constants; any other
/// value is a valid custom level and can be given a display name with
/// [`register_level_name`].
///
/// # Examples
///
/// ```
/// use logging::Severity;
///
/// assert!(Severity::WARNING > Severity::INFO);
/// assert_eq!(Severity::INFO.below(10), Severity::DEBUG);
/// assert_eq!(Severity::new(30), Severity::WARNING);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Severity(i32);

impl Severity {
    /// Lowest representable severity; a threshold at this level admits everything.
    pub const MIN: Self = Self(i32::MIN);
    /// Unset level; categories at this level inherit from their ancestors.
    pub const NOTSET: Self = Self(0);
    /// Detailed diagnostic output.
    pub const DEBUG: Self = Self(10);
    /// Informational messages.
    pub const INFO: Self = Self(20);
    /// Something unexpected that does not stop the program.
    pub const WARNING: Self = Self(30);
    /// A failure of some operation.
    pub const ERROR: Self = Self(40);
    /// A failure that may stop the program.
    pub const CRITICAL: Self = Self(50);

    /// Wraps a raw severity value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw severity value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns the severity `steps` points more verbose than `self`.
    ///
    /// Negative steps move towards quieter levels. The arithmetic saturates at
    /// the bounds of `i32`.
    #[must_use]
    pub const fn below(self, steps: i32) -> Self {
        Self(self.0.saturating_sub(steps))
    }

    /// Returns the registered display name, or `Level N` when none exists.
    #[must_use]
    pub fn name(self) -> Cow<'static, str> {
        level_name(self)
    }
}

impl From<i32> for Severity {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Severity> for i32 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Error returned when a [`Severity`] cannot be parsed from text.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown severity {input:?}; expected an integer or a registered level name")]
pub struct ParseSeverityError {
    input: String,
}

impl ParseSeverityError {
    /// Returns the text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Accepts an integer (`"19"`, `"-3"`) or a registered name (`"WARNING"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Ok(Self(value));
        }
        level_for_name(trimmed).ok_or_else(|| ParseSeverityError {
            input: s.to_owned(),
        })
    }
}

static LEVEL_NAMES: LazyLock<RwLock<BTreeMap<Severity, Cow<'static, str>>>> =
    LazyLock::new(|| {
        RwLock::new(BTreeMap::from([
            (Severity::CRITICAL, Cow::Borrowed("CRITICAL")),
            (Severity::ERROR, Cow::Borrowed("ERROR")),
            (Severity::WARNING, Cow::Borrowed("WARNING")),
            (Severity::INFO, Cow::Borrowed("INFO")),
            (Severity::DEBUG, Cow::Borrowed("DEBUG")),
            (Severity::NOTSET, Cow::Borrowed("NOTSET")),
        ]))
    });

/// Associates a display name with `level`.
///
/// Registering the same pair again is a no-op, so callers may register their
/// levels unconditionally. Registering a different name for an existing level
/// replaces it.
pub fn register_level_name(level: Severity, name: impl Into<Cow<'static, str>>) {
    let name = name.into();
    let mut names = LEVEL_NAMES.write().unwrap_or_else(PoisonError::into_inner);
    if names.get(&level) != Some(&name) {
        names.insert(level, name);
    }
}

/// Returns the display name registered for `level`.
#[must_use]
pub fn level_name(level: Severity) -> Cow<'static, str> {
    let names = LEVEL_NAMES.read().unwrap_or_else(PoisonError::into_inner);
    match names.get(&level) {
        Some(name) => name.clone(),
        None => Cow::Owned(format!("Level {}", level.0)),
    }
}

/// Looks up the severity registered under `name` (case-sensitive).
#[must_use]
pub fn level_for_name(name: &str) -> Option<Severity> {
    let names = LEVEL_NAMES.read().unwrap_or_else(PoisonError::into_inner);
    names
        .iter()
        .find_map(|(level, registered)| (registered == name).then_some(*level))
}
