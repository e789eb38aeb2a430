use super::LineMode;

#[test]
fn line_mode_conversions_round_trip() {
    assert_eq!(LineMode::from(true), LineMode::WithNewline);
    assert_eq!(LineMode::from(false), LineMode::WithoutNewline);

    let append: bool = LineMode::WithNewline.into();
    assert!(append);

    let append: bool = LineMode::WithoutNewline.into();
    assert!(!append);
}

#[test]
fn default_appends_newline() {
    assert_eq!(LineMode::default(), LineMode::WithNewline);
}

#[cfg(feature = "serde")]
#[test]
fn line_mode_serializes_in_snake_case() {
    let json = serde_json::to_string(&LineMode::WithoutNewline).unwrap();
    assert_eq!(json, "\"without_newline\"");
    let decoded: LineMode = serde_json::from_str("\"with_newline\"").unwrap();
    assert_eq!(decoded, LineMode::WithNewline);
}
