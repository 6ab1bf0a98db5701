use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    String(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Enum(String),
    Reference(u64),
    List(Vec<StepValue>),
    Null,
    Derived,
}

impl StepValue {
    /// Instance id if this value is a `#123` reference.
    #[must_use]
    pub fn as_reference(&self) -> Option<u64> {
        match self {
            StepValue::Reference(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StepValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// All instance ids referenced by this value, flattening one list level.
    #[must_use]
    pub fn references(&self) -> Vec<u64> {
        match self {
            StepValue::Reference(id) => vec![*id],
            StepValue::List(items) => items.iter().filter_map(StepValue::as_reference).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepEntity {
    pub id: u64,
    /// Upper-case type keyword as written in the file, e.g. `IFCWALL`.
    pub entity_type: String,
    pub values: Vec<StepValue>,
}

#[derive(Debug, Clone, Default)]
pub struct StepHeader {
    pub file_name: String,
    pub schema: String,
}

#[derive(Debug)]
pub struct StepFile {
    pub header: StepHeader,
    pub entities: HashMap<u64, StepEntity>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Outside,
    Header,
    Data,
}

impl StepFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let text = strip_comments(content);
        let mut header = StepHeader::default();
        let mut entities = HashMap::new();
        let mut section = Section::Outside;
        let mut seen_data = false;

        let (statements, remainder) = split_statements(&text);
        if !remainder.trim().is_empty() {
            return Err(ParseError::InvalidStep {
                message: format!("unterminated statement: {}", truncate(remainder.trim())),
            });
        }

        for statement in statements {
            let statement = statement.trim();
            match statement {
                "" => {}
                "HEADER" => section = Section::Header,
                "DATA" => {
                    section = Section::Data;
                    seen_data = true;
                }
                "ENDSEC" => section = Section::Outside,
                s if s.starts_with("ISO-10303-21") || s.starts_with("END-ISO-10303-21") => {}
                s => match section {
                    Section::Header => read_header_entry(s, &mut header),
                    Section::Data => {
                        if let Some(entity) = parse_instance(s)? {
                            entities.insert(entity.id, entity);
                        }
                    }
                    Section::Outside => {}
                },
            }
        }

        if !seen_data {
            return Err(ParseError::InvalidStep {
                message: "missing DATA section".to_string(),
            });
        }

        Ok(StepFile { header, entities })
    }
}

/// Removes `/* ... */` comments that sit outside string literals.
fn strip_comments(content: &str) -> Cow<'_, str> {
    if !content.contains("/*") {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut rest = content;

    while let Some(ch) = rest.chars().next() {
        if !in_string && rest.starts_with("/*") {
            rest = match rest[2..].find("*/") {
                Some(end) => &rest[2 + end + 2..],
                None => "",
            };
            continue;
        }
        if ch == '\'' {
            in_string = !in_string;
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    Cow::Owned(out)
}

/// Splits on `;` terminators outside of string literals, returning the
/// unterminated tail separately.
fn split_statements(text: &str) -> (Vec<&str>, &str) {
    let mut statements = Vec::new();
    let mut in_string = false;
    let mut start = 0;

    for (i, byte) in text.bytes().enumerate() {
        match byte {
            // '' inside a string toggles twice, which leaves us inside it
            b'\'' => in_string = !in_string,
            b';' if !in_string => {
                statements.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    (statements, &text[start..])
}

fn read_header_entry(statement: &str, header: &mut StepHeader) {
    let Some(paren) = statement.find('(') else {
        return;
    };
    let keyword = statement[..paren].trim();
    let Ok(values) = ValueReader::new(&statement[paren..]).read_list() else {
        tracing::debug!(keyword, "ignoring malformed header entry");
        return;
    };

    match keyword {
        "FILE_NAME" => {
            if let Some(StepValue::String(name)) = values.first() {
                header.file_name.clone_from(name);
            }
        }
        "FILE_SCHEMA" => {
            if let Some(StepValue::List(schemas)) = values.first() {
                if let Some(StepValue::String(schema)) = schemas.first() {
                    header.schema.clone_from(schema);
                }
            }
        }
        _ => {}
    }
}

/// Parses `#123=IFCWALL('guid',#ref,'name',...)`.
///
/// Complex instances (`#1=(A()B())`) are skipped and yield `None`.
fn parse_instance(statement: &str) -> Result<Option<StepEntity>, ParseError> {
    let invalid = |reason: &str| ParseError::InvalidStep {
        message: format!("{reason}: {}", truncate(statement)),
    };

    let body = statement
        .strip_prefix('#')
        .ok_or_else(|| invalid("expected instance name"))?;
    let eq_pos = body.find('=').ok_or_else(|| invalid("missing '='"))?;
    let id: u64 = body[..eq_pos]
        .trim()
        .parse()
        .map_err(|_| invalid("bad instance id"))?;

    let rest = body[eq_pos + 1..].trim();
    if rest.starts_with('(') {
        tracing::warn!(id, "skipping complex entity instance");
        return Ok(None);
    }

    let paren_pos = rest.find('(').ok_or_else(|| invalid("missing attribute list"))?;
    let entity_type = rest[..paren_pos].trim().to_ascii_uppercase();
    if entity_type.is_empty() {
        return Err(invalid("missing entity type"));
    }

    let mut reader = ValueReader::new(&rest[paren_pos..]);
    let values = reader
        .read_list()
        .map_err(|reason| invalid(&reason))?;
    if !reader.at_end() {
        return Err(invalid("trailing characters after attribute list"));
    }

    Ok(Some(StepEntity {
        id,
        entity_type,
        values,
    }))
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(80) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

struct ValueReader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> ValueReader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos >= self.src.len()
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn read_list(&mut self) -> Result<Vec<StepValue>, String> {
        self.skip_ws();
        if self.peek() != Some(b'(') {
            return Err("expected '('".to_string());
        }
        self.pos += 1;

        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(items);
        }

        loop {
            items.push(self.read_value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(other) => return Err(format!("unexpected '{}' in list", other as char)),
                None => return Err("unterminated list".to_string()),
            }
        }
    }

    fn read_value(&mut self) -> Result<StepValue, String> {
        self.skip_ws();
        match self.peek() {
            Some(b'$') => {
                self.pos += 1;
                Ok(StepValue::Null)
            }
            Some(b'*') => {
                self.pos += 1;
                Ok(StepValue::Derived)
            }
            Some(b'#') => {
                self.pos += 1;
                let digits = self.take_while(|b| b.is_ascii_digit());
                digits
                    .parse()
                    .map(StepValue::Reference)
                    .map_err(|_| format!("bad reference '#{digits}'"))
            }
            Some(b'\'') => self.read_string(),
            Some(b'"') => {
                self.pos += 1;
                let hex = self.take_while(|b| b != b'"');
                self.pos += 1;
                Ok(StepValue::String(hex.to_string()))
            }
            Some(b'.') => {
                self.pos += 1;
                let name = self.take_while(|b| b != b'.');
                self.pos += 1;
                Ok(match name {
                    "T" => StepValue::Boolean(true),
                    "F" => StepValue::Boolean(false),
                    _ => StepValue::Enum(name.to_string()),
                })
            }
            Some(b'(') => self.read_list().map(StepValue::List),
            Some(b) if b.is_ascii_digit() || b == b'-' || b == b'+' => self.read_number(),
            Some(b) if b.is_ascii_alphabetic() => {
                // Typed value like IFCLENGTHMEASURE(3.5): keep the wrapped value
                let type_name = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_');
                let mut inner = self.read_list()?;
                if inner.len() == 1 {
                    Ok(inner.remove(0))
                } else {
                    tracing::debug!(type_name, "typed value with {} arguments", inner.len());
                    Ok(StepValue::List(inner))
                }
            }
            Some(other) => Err(format!("unexpected character '{}'", other as char)),
            None => Err("unexpected end of input".to_string()),
        }
    }

    fn read_string(&mut self) -> Result<StepValue, String> {
        self.pos += 1; // opening quote
        let bytes = self.src.as_bytes();
        let start = self.pos;

        loop {
            match bytes.get(self.pos) {
                Some(b'\'') if bytes.get(self.pos + 1) == Some(&b'\'') => self.pos += 2,
                Some(b'\'') => break,
                Some(_) => self.pos += 1,
                None => return Err("unterminated string".to_string()),
            }
        }

        let raw = &self.src[start..self.pos];
        self.pos += 1; // closing quote
        Ok(StepValue::String(decode_step_string(raw)))
    }

    fn read_number(&mut self) -> Result<StepValue, String> {
        let text = self.take_while(|b| {
            b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')
        });
        if text.contains(['.', 'e', 'E']) {
            text.parse()
                .map(StepValue::Real)
                .map_err(|_| format!("bad real '{text}'"))
        } else {
            text.parse()
                .map(StepValue::Integer)
                .map_err(|_| format!("bad integer '{text}'"))
        }
    }
}

/// Decode STEP/IFC encoded strings with escape sequences.
/// Supports:
/// - `\X2\XXXX\X0\` - UCS-2 code points, any number of 4-char groups
/// - `\X4\XXXXXXXX\X0\` - UCS-4 code points
/// - `\X\XX` - 1-byte ISO 8859-1
/// - `\S\X` - ISO 8859-1 high half
/// - `\\` - escaped backslash
/// - `''` - escaped apostrophe
pub(crate) fn decode_step_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(ch) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("\\X2\\") {
            rest = push_code_points(after, 4, &mut result);
        } else if let Some(after) = rest.strip_prefix("\\X4\\") {
            rest = push_code_points(after, 8, &mut result);
        } else if let Some((c, after)) = rest.strip_prefix("\\X\\").and_then(latin1_escape) {
            result.push(c);
            rest = after;
        } else if let Some(after) = rest.strip_prefix("\\S\\") {
            if let Some(c) = after.chars().next() {
                if let Some(shifted) = char::from_u32(u32::from(c) + 128) {
                    result.push(shifted);
                }
                rest = &after[c.len_utf8()..];
            } else {
                rest = after;
            }
        } else if let Some(after) = rest.strip_prefix("\\\\") {
            result.push('\\');
            rest = after;
        } else if let Some(after) = rest.strip_prefix("''") {
            result.push('\'');
            rest = after;
        } else {
            result.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    result
}

/// Reads the two hex digits of a `\X\` escape. Anything else is not an
/// escape and is kept as literal text.
fn latin1_escape(s: &str) -> Option<(char, &str)> {
    let hex = s.get(..2).filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))?;
    let code = u8::from_str_radix(hex, 16).ok()?;
    Some((char::from(code), &s[2..]))
}

/// Reads hex groups of `width` digits up to the `\X0\` terminator.
fn push_code_points<'a>(s: &'a str, width: usize, out: &mut String) -> &'a str {
    let end = s.find("\\X0\\").unwrap_or(s.len());
    let hex = &s[..end];
    for chunk in hex.as_bytes().chunks(width) {
        let Ok(digits) = std::str::from_utf8(chunk) else {
            continue;
        };
        if let Some(c) = u32::from_str_radix(digits, 16).ok().and_then(char::from_u32) {
            out.push(c);
        }
    }
    s.get(end + 4..).unwrap_or("")
}
