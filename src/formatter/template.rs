// file: src/formatter/template.rs
// version: 1.0.0
// guid: 5b6fd698-8b02-47a2-9ca8-7c21341955a7

//! Message template parsing and rendering
//!
//! Templates are literal text with `{field}` or `{field:spec}` placeholders.
//! `{{` and `}}` produce literal braces. `spec` follows
//! `[[fill]align][0][width][.precision]` with align one of `<`, `>`, `^`.

use crate::error::{LoggingError, Result};
use crate::record::Record;
use regex::Regex;
use std::fmt::Write;

/// Record attribute a placeholder refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Asctime,
    Msecs,
    Created,
    Name,
    Levelname,
    Levelname2,
    Levelno,
    Message,
    Module,
    Filename,
    Lineno,
    Thread,
    Process,
    ColorOn,
    ColorOff,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "asctime" => Field::Asctime,
            "msecs" => Field::Msecs,
            "created" => Field::Created,
            "name" => Field::Name,
            "levelname" => Field::Levelname,
            "levelname2" => Field::Levelname2,
            "levelno" => Field::Levelno,
            "message" => Field::Message,
            "module" => Field::Module,
            "filename" => Field::Filename,
            "lineno" => Field::Lineno,
            "thread" | "threadName" => Field::Thread,
            "process" => Field::Process,
            "color_on" => Field::ColorOn,
            "color_off" => Field::ColorOff,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Spec {
    fill: char,
    align: Option<Align>,
    zero: bool,
    width: usize,
    precision: Option<usize>,
}

impl Default for Spec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            zero: false,
            width: 0,
            precision: None,
        }
    }
}

impl Spec {
    fn parse(raw: &str) -> Option<Self> {
        let mut spec = Spec::default();
        let chars: Vec<char> = raw.chars().collect();
        let mut i = 0;

        if chars.len() >= 2 {
            if let Some(align) = Align::from_char(chars[1]) {
                spec.fill = chars[0];
                spec.align = Some(align);
                i = 2;
            }
        }
        if spec.align.is_none() {
            if let Some(align) = chars.first().copied().and_then(Align::from_char) {
                spec.align = Some(align);
                i = 1;
            }
        }

        if chars.get(i) == Some(&'0') {
            spec.zero = true;
            i += 1;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i > start {
            spec.width = chars[start..i].iter().collect::<String>().parse().ok()?;
        }

        if chars.get(i) == Some(&'.') {
            i += 1;
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i == start {
                return None;
            }
            spec.precision = Some(chars[start..i].iter().collect::<String>().parse().ok()?);
        }

        if i == chars.len() {
            Some(spec)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Field, Spec),
}

enum Value<'a> {
    Str(&'a str),
    Owned(String),
    Int(i64),
    Float(f64),
}

/// Parsed message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self> {
        let re = Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)(?::([^{}]*))?\}").map_err(
            |e| LoggingError::invalid_value(format!("Invalid template pattern: {}", e)),
        )?;

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for cap in re.captures_iter(source) {
            let whole = match cap.get(0) {
                Some(m) => m,
                None => continue,
            };
            Self::push_literal(&mut literal, &source[last..whole.start()], source)?;
            last = whole.end();

            match whole.as_str() {
                "{{" => literal.push('{'),
                "}}" => literal.push('}'),
                _ => {
                    let name = &cap[1];
                    let field = Field::from_name(name).ok_or_else(|| {
                        LoggingError::invalid_value(format!(
                            "unknown template field '{}' in '{}'",
                            name, source
                        ))
                    })?;
                    let spec = match cap.get(2) {
                        Some(raw) => Spec::parse(raw.as_str()).ok_or_else(|| {
                            LoggingError::invalid_value(format!(
                                "invalid format spec '{}' for field '{}'",
                                raw.as_str(),
                                name
                            ))
                        })?,
                        None => Spec::default(),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(field, spec));
                }
            }
        }
        Self::push_literal(&mut literal, &source[last..], source)?;
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    fn push_literal(literal: &mut String, text: &str, source: &str) -> Result<()> {
        if text.contains('{') || text.contains('}') {
            return Err(LoggingError::invalid_value(format!(
                "unbalanced brace in template '{}'",
                source
            )));
        }
        literal.push_str(text);
        Ok(())
    }

    /// Whether any placeholder refers to `field`
    pub fn uses(&self, field: Field) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Placeholder(f, _) if *f == field))
    }

    /// Render a record; `markers` are the `(color_on, color_off)` strings
    pub fn render(&self, record: &Record, datefmt: &str, markers: (&str, &str)) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(field, spec) => {
                    let value = Self::value(*field, record, datefmt, markers);
                    write_value(&mut out, value, spec);
                }
            }
        }
        out
    }

    fn value<'a>(
        field: Field,
        record: &'a Record,
        datefmt: &str,
        markers: (&'a str, &'a str),
    ) -> Value<'a> {
        match field {
            Field::Asctime => {
                let mut stamp = String::new();
                // datefmt is validated when the formatter is built
                let _ = write!(stamp, "{}", record.created.format(datefmt));
                Value::Owned(stamp)
            }
            Field::Msecs => Value::Int(i64::from(record.msecs())),
            Field::Created => {
                Value::Float(record.created.timestamp_micros() as f64 / 1_000_000.0)
            }
            Field::Name => Value::Str(&record.logger),
            Field::Levelname => Value::Str(record.level.as_str()),
            Field::Levelname2 => Value::Str(record.level.capitalized()),
            Field::Levelno => Value::Int(i64::from(record.level.value())),
            Field::Message => Value::Str(&record.message),
            Field::Module => Value::Str(record.module.as_deref().unwrap_or("")),
            Field::Filename => {
                let file = record.file.as_deref().unwrap_or("");
                Value::Str(file.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(file))
            }
            Field::Lineno => Value::Int(record.line.map(i64::from).unwrap_or(0)),
            Field::Thread => Value::Str(&record.thread),
            Field::Process => Value::Int(i64::from(record.process)),
            Field::ColorOn => Value::Str(markers.0),
            Field::ColorOff => Value::Str(markers.1),
        }
    }
}

fn write_value(out: &mut String, value: Value<'_>, spec: &Spec) {
    let (text, numeric) = match value {
        Value::Str(s) => (truncate(s, spec.precision).to_string(), false),
        Value::Owned(s) => (truncate(&s, spec.precision).to_string(), false),
        Value::Int(n) => (n.to_string(), true),
        Value::Float(f) => match spec.precision {
            Some(p) => (format!("{:.*}", p, f), true),
            None => (f.to_string(), true),
        },
    };

    let len = text.chars().count();
    if len >= spec.width {
        out.push_str(&text);
        return;
    }
    let pad = spec.width - len;

    if spec.zero && numeric && spec.align.is_none() {
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(pad));
        out.push_str(digits);
        return;
    }

    let fill = if spec.zero && spec.align.is_none() { '0' } else { spec.fill };
    let align = spec
        .align
        .unwrap_or(if numeric { Align::Right } else { Align::Left });
    let (before, after) = match align {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => (pad / 2, pad - pad / 2),
    };
    out.extend(std::iter::repeat(fill).take(before));
    out.push_str(&text);
    out.extend(std::iter::repeat(fill).take(after));
}

fn truncate(s: &str, precision: Option<usize>) -> &str {
    match precision {
        Some(p) => match s.char_indices().nth(p) {
            Some((idx, _)) => &s[..idx],
            None => s,
        },
        None => s,
    }
}
