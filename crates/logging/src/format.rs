//! crates/logging/src/format.rs
//! Parsing and rendering of %-style record templates.
//!
//! A template mixes literal text with placeholders of the form
//! `%(key)[flags][width][.precision]conversion`, for example
//! `%(levelname)-8s`. Templates are parsed once into tokens so rendering a
//! record never re-scans the template text.

use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use thiserror::Error;
use time::macros::format_description;

use crate::record::Record;

/// Template used when no explicit format is configured.
pub const DEFAULT_FORMAT: &str = "%(asctime)-15s %(levelname)-8s %(name)s:%(lineno)s %(message)s";

/// Error returned when a format template cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FormatError {
    /// The template ends with a lone `%`.
    #[error("format template may not end with '%'")]
    TrailingPercent,
    /// A `%` is followed by something other than `(` or `%`.
    #[error("unexpected {found:?} after '%' at offset {offset}; expected '(' or '%'")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Byte offset of the `%`.
        offset: usize,
    },
    /// A `%(` has no matching `)`.
    #[error("unclosed '%(' at offset {offset}")]
    UnclosedKey {
        /// Byte offset of the `%`.
        offset: usize,
    },
    /// The key names no known record attribute.
    #[error("unknown format field {key:?}")]
    UnknownField {
        /// The unrecognised key.
        key: String,
    },
    /// The placeholder ends before its conversion character.
    #[error("format field {key:?} is missing a conversion character")]
    MissingConversion {
        /// The placeholder key.
        key: String,
    },
    /// The conversion character is not supported.
    #[error("unsupported conversion {conversion:?} for format field {key:?}")]
    UnsupportedConversion {
        /// The placeholder key.
        key: String,
        /// The rejected conversion character.
        conversion: char,
    },
    /// A numeric conversion was applied to a text attribute.
    #[error("numeric conversion {conversion:?} cannot render text field {key:?}")]
    NonNumericField {
        /// The placeholder key.
        key: String,
        /// The numeric conversion character.
        conversion: char,
    },
}

/// Parsed record template.
///
/// # Examples
///
/// ```
/// use logging::{Format, Record, Severity};
///
/// let format = Format::parse("[%(levelname)-7s] %(name)s: %(message)s")?;
/// let record = Record::new("net.io", Severity::WARNING, "slow peer".to_owned());
/// assert_eq!(format.render(&record), "[WARNING] net.io: slow peer");
/// # Ok::<(), logging::FormatError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    template: String,
    tokens: Vec<FormatToken>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum FormatToken {
    Literal(String),
    Field(FieldSpec),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FieldSpec {
    field: Field,
    left_justify: bool,
    zero_pad: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: Conversion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    AscTime,
    Created,
    FileName,
    LevelName,
    LevelNo,
    LineNo,
    Message,
    Module,
    Msecs,
    Name,
    PathName,
    Process,
    Thread,
    ThreadName,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            "asctime" => Self::AscTime,
            "created" => Self::Created,
            "filename" => Self::FileName,
            "levelname" => Self::LevelName,
            "levelno" => Self::LevelNo,
            "lineno" => Self::LineNo,
            "message" => Self::Message,
            "module" => Self::Module,
            "msecs" => Self::Msecs,
            "name" => Self::Name,
            "pathname" => Self::PathName,
            "process" => Self::Process,
            "thread" => Self::Thread,
            "threadName" => Self::ThreadName,
            _ => return None,
        };
        Some(field)
    }

    const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Created
                | Self::LevelNo
                | Self::LineNo
                | Self::Msecs
                | Self::Process
                | Self::Thread
        )
    }

    fn value(self, record: &Record) -> Value<'_> {
        match self {
            Self::AscTime => Value::Text(Cow::Owned(asctime(record))),
            Self::Created => {
                Value::Float(record.created().unix_timestamp_nanos() as f64 / 1_000_000_000.0)
            }
            Self::FileName => Value::Text(Cow::Borrowed(record.filename())),
            Self::LevelName => Value::Text(record.level().name()),
            Self::LevelNo => Value::Int(i64::from(record.level().value())),
            Self::LineNo => Value::Int(i64::from(record.line())),
            Self::Message => Value::Text(Cow::Borrowed(record.message())),
            Self::Module => Value::Text(Cow::Borrowed(record.module())),
            Self::Msecs => Value::Float(f64::from(record.created().nanosecond()) / 1_000_000.0),
            Self::Name => Value::Text(Cow::Borrowed(record.name())),
            Self::PathName => Value::Text(Cow::Borrowed(record.pathname())),
            Self::Process => Value::Int(i64::from(record.process())),
            Self::Thread => Value::Int(i64::try_from(record.thread_id()).unwrap_or(i64::MAX)),
            Self::ThreadName => Value::Text(Cow::Borrowed(record.thread().unwrap_or("unnamed"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    Str,
    Repr,
    Int,
    Float,
}

impl Conversion {
    const fn from_char(ch: char) -> Option<Self> {
        match ch {
            's' => Some(Self::Str),
            'r' => Some(Self::Repr),
            'd' | 'i' => Some(Self::Int),
            'f' => Some(Self::Float),
            _ => None,
        }
    }

    const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

enum Value<'a> {
    Text(Cow<'a, str>),
    Int(i64),
    Float(f64),
}

impl Format {
    /// Parses `template` into a reusable format.
    pub fn parse(template: &str) -> Result<Self, FormatError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }

            match chars.next() {
                None => return Err(FormatError::TrailingPercent),
                Some((_, '%')) => literal.push('%'),
                Some((_, '(')) => {
                    let spec = parse_field(&mut chars, offset)?;
                    if !literal.is_empty() {
                        tokens.push(FormatToken::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(FormatToken::Field(spec));
                }
                Some((_, found)) => {
                    return Err(FormatError::UnexpectedCharacter { found, offset });
                }
            }
        }

        if !literal.is_empty() {
            tokens.push(FormatToken::Literal(literal));
        }

        Ok(Self {
            template: template.to_owned(),
            tokens,
        })
    }

    /// Returns the template this format was parsed from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders `record` into a new string.
    #[must_use]
    pub fn render(&self, record: &Record) -> String {
        let mut buffer = String::new();
        self.render_into(record, &mut buffer);
        buffer
    }

    /// Appends the rendering of `record` to `buffer`.
    pub fn render_into(&self, record: &Record, buffer: &mut String) {
        for token in &self.tokens {
            match token {
                FormatToken::Literal(text) => buffer.push_str(text),
                FormatToken::Field(spec) => {
                    let text = convert(spec.field.value(record), spec);
                    pad_into(buffer, &text, spec);
                }
            }
        }
    }
}

impl Default for Format {
    /// The [`DEFAULT_FORMAT`] template.
    fn default() -> Self {
        let text = |field, width: Option<usize>| {
            FormatToken::Field(FieldSpec {
                field,
                left_justify: width.is_some(),
                zero_pad: false,
                width,
                precision: None,
                conversion: Conversion::Str,
            })
        };
        let literal = |text: &str| FormatToken::Literal(text.to_owned());

        Self {
            template: DEFAULT_FORMAT.to_owned(),
            tokens: vec![
                text(Field::AscTime, Some(15)),
                literal(" "),
                text(Field::LevelName, Some(8)),
                literal(" "),
                text(Field::Name, None),
                literal(":"),
                text(Field::LineNo, None),
                literal(" "),
                text(Field::Message, None),
            ],
        }
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn parse_field(chars: &mut Peekable<CharIndices<'_>>, offset: usize) -> Result<FieldSpec, FormatError> {
    let mut key = String::new();
    let mut closed = false;
    for (_, ch) in chars.by_ref() {
        if ch == ')' {
            closed = true;
            break;
        }
        key.push(ch);
    }
    if !closed {
        return Err(FormatError::UnclosedKey { offset });
    }

    let field = Field::from_key(&key).ok_or_else(|| FormatError::UnknownField { key: key.clone() })?;

    let mut left_justify = false;
    let mut zero_pad = false;
    while let Some((_, flag)) = chars.next_if(|&(_, ch)| ch == '-' || ch == '0') {
        if flag == '-' {
            left_justify = true;
        } else {
            zero_pad = true;
        }
    }

    let width = take_number(chars);
    let precision = chars
        .next_if(|&(_, ch)| ch == '.')
        .map(|_| take_number(chars).unwrap_or(0));

    let Some((_, ch)) = chars.next() else {
        return Err(FormatError::MissingConversion { key });
    };
    let Some(conversion) = Conversion::from_char(ch) else {
        return Err(FormatError::UnsupportedConversion { key, conversion: ch });
    };
    if conversion.is_numeric() && !field.is_numeric() {
        return Err(FormatError::NonNumericField { key, conversion: ch });
    }

    Ok(FieldSpec {
        field,
        left_justify,
        zero_pad,
        width,
        precision,
        conversion,
    })
}

fn take_number(chars: &mut Peekable<CharIndices<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some((_, digit)) = chars.next_if(|&(_, ch)| ch.is_ascii_digit()) {
        let digit = digit as usize - '0' as usize;
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }
    value
}

fn convert(value: Value<'_>, spec: &FieldSpec) -> String {
    match (spec.conversion, value) {
        (Conversion::Str, Value::Text(text)) => match spec.precision {
            Some(limit) => text.chars().take(limit).collect(),
            None => text.into_owned(),
        },
        (Conversion::Repr, Value::Text(text)) => quote(&text),
        (Conversion::Str | Conversion::Repr, Value::Int(number)) => number.to_string(),
        (Conversion::Str | Conversion::Repr, Value::Float(number)) => format!("{number:?}"),
        (Conversion::Int, Value::Int(number)) => number.to_string(),
        (Conversion::Int, Value::Float(number)) => (number.trunc() as i64).to_string(),
        (Conversion::Float, Value::Int(number)) => {
            format!("{:.*}", spec.precision.unwrap_or(6), number as f64)
        }
        (Conversion::Float, Value::Float(number)) => {
            format!("{:.*}", spec.precision.unwrap_or(6), number)
        }
        // Rejected by `parse_field`.
        (Conversion::Int | Conversion::Float, Value::Text(text)) => text.into_owned(),
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

fn pad_into(buffer: &mut String, text: &str, spec: &FieldSpec) {
    let len = text.chars().count();
    let fill = spec.width.map_or(0, |width| width.saturating_sub(len));
    if fill == 0 {
        buffer.push_str(text);
        return;
    }

    if spec.left_justify {
        buffer.push_str(text);
        buffer.extend(std::iter::repeat_n(' ', fill));
    } else if spec.zero_pad && spec.conversion.is_numeric() {
        let digits = match text.strip_prefix('-') {
            Some(rest) => {
                buffer.push('-');
                rest
            }
            None => text,
        };
        buffer.extend(std::iter::repeat_n('0', fill));
        buffer.push_str(digits);
    } else {
        buffer.extend(std::iter::repeat_n(' ', fill));
        buffer.push_str(text);
    }
}

fn asctime(record: &Record) -> String {
    let created = record.created();
    let mut text = created
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| "1970-01-01 00:00:00".to_owned());
    text.push_str(&format!(",{:03}", created.millisecond()));
    text
}
