//! Integration tests for record templates and stream output.

use logging::{
    BasicConfig, DEFAULT_FORMAT, Format, FormatError, LineMode, Record, Registry, SharedBuffer,
    Severity,
};

fn stream_registry(template: &str) -> (Registry, SharedBuffer) {
    let registry = Registry::new();
    let buffer = SharedBuffer::new();
    registry.basic_config(
        BasicConfig::new()
            .format(Format::parse(template).expect("template parses"))
            .stream(Box::new(buffer.clone())),
    );
    (registry, buffer)
}

#[test]
fn default_template_lays_out_level_name_and_line() {
    let (registry, buffer) = stream_registry(DEFAULT_FORMAT);
    let line = line!() + 1;
    registry.logger("a.b.c").warning("Warn");

    let output = buffer.contents();
    let expected_tail = format!("WARNING  a.b.c:{line} Warn\n");
    assert!(output.ends_with(&expected_tail), "unexpected output {output:?}");
    // "YYYY-MM-DD HH:MM:SS,mmm " precedes the level name.
    assert_eq!(output.len(), 24 + expected_tail.len());
}

#[test]
fn padding_and_precision_follow_printf_rules() {
    let format = Format::parse("[%(levelname)8s][%(levelno)03d][%(message).3s]").unwrap();
    let record = Record::new("n", Severity::ERROR, "truncated".to_owned());
    assert_eq!(format.render(&record), "[   ERROR][040][tru]");
}

#[test]
fn repr_conversion_quotes_text() {
    let format = Format::parse("%(message)r").unwrap();
    let record = Record::new("n", Severity::ERROR, "it's".to_owned());
    assert_eq!(format.render(&record), "'it\\'s'");
}

#[test]
fn literal_percent_survives() {
    let format = Format::parse("100%% %(name)s").unwrap();
    let record = Record::new("disk", Severity::ERROR, String::new());
    assert_eq!(format.render(&record), "100% disk");
}

#[test]
fn filename_and_module_come_from_the_location() {
    let format = Format::parse("%(filename)s|%(module)s|%(lineno)d").unwrap();
    let record = Record::new("n", Severity::ERROR, String::new())
        .with_location("src/net/peer.rs", 9);
    assert_eq!(format.render(&record), "peer.rs|peer|9");
}

#[test]
fn malformed_templates_are_rejected() {
    assert_eq!(Format::parse("%(name)s %"), Err(FormatError::TrailingPercent));
    assert_eq!(
        Format::parse("%(name"),
        Err(FormatError::UnclosedKey { offset: 0 })
    );
    assert_eq!(
        Format::parse("%(colour)s"),
        Err(FormatError::UnknownField {
            key: "colour".to_owned()
        })
    );
    assert_eq!(
        Format::parse("%(message)d"),
        Err(FormatError::NonNumericField {
            key: "message".to_owned(),
            conversion: 'd'
        })
    );
    assert!(matches!(
        Format::parse("%s"),
        Err(FormatError::UnexpectedCharacter { found: 's', .. })
    ));
}

#[test]
fn without_newline_mode_concatenates_records() {
    let registry = Registry::new();
    let buffer = SharedBuffer::new();
    registry.basic_config(
        BasicConfig::new()
            .format(Format::parse("<%(message)s>").unwrap())
            .stream(Box::new(buffer.clone()))
            .line_mode(LineMode::WithoutNewline),
    );

    let logger = registry.logger("x");
    logger.error("one");
    logger.error("two");
    assert_eq!(buffer.contents(), "<one><two>");
}

#[test]
fn unregistered_custom_level_renders_generic_name() {
    let (registry, buffer) = stream_registry("%(levelname)s|%(message)s");
    registry.set_root_level(Severity::NOTSET);
    registry.logger("x").log(Severity::new(3), "deep");
    assert_eq!(buffer.contents(), "Level 3|deep\n");
}
