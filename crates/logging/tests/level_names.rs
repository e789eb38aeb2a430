//! Integration tests for the process-wide level-name table.
//!
//! The table is global, so each test registers names for its own distinct
//! severity values.

use logging::{Severity, level_for_name, level_name, register_level_name};

#[test]
fn standard_names_are_predefined() {
    assert_eq!(level_name(Severity::WARNING), "WARNING");
    assert_eq!(level_for_name("CRITICAL"), Some(Severity::CRITICAL));
    assert_eq!(level_for_name("critical"), None);
}

#[test]
fn registration_is_idempotent() {
    let level = Severity::new(23);
    register_level_name(level, "NOTICE");
    register_level_name(level, "NOTICE");

    assert_eq!(level_name(level), "NOTICE");
    assert_eq!(level_for_name("NOTICE"), Some(level));
    assert_eq!(level.to_string(), "NOTICE");
}

#[test]
fn names_parse_back_into_severities() {
    register_level_name(Severity::new(7), "TRACE_PLUS");
    assert_eq!("TRACE_PLUS".parse::<Severity>(), Ok(Severity::new(7)));
    assert_eq!(" 12 ".parse::<Severity>(), Ok(Severity::new(12)));

    let error = "LOUD".parse::<Severity>().unwrap_err();
    assert_eq!(error.input(), "LOUD");
}
