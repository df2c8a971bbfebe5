use std::path::Path;

use crate::foundation::error::{TextreelError, TextreelResult};

/// Continuation lines longer than this start the body.
const BODY_LINE_CHARS: usize = 100;

/// One video's worth of content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// Small line above the title.
    pub upper: Option<String>,
    /// Title (`Judul`).
    pub title: Option<String>,
    /// Subtitle (`Subjudul`).
    pub subtitle: Option<String>,
    /// Body paragraphs in display order; may contain `[[highlight]]` markup.
    pub paragraphs: Vec<String>,
}

impl Record {
    /// Title for logs, or a stand-in when the record has none.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(|t| t.lines().next().unwrap_or(t))
            .unwrap_or("(untitled)")
    }

    fn is_empty(&self) -> bool {
        self.upper.is_none()
            && self.title.is_none()
            && self.subtitle.is_none()
            && self.paragraphs.is_empty()
    }

    fn normalized(mut self) -> Self {
        for field in [&mut self.upper, &mut self.title, &mut self.subtitle] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Upper,
    Title,
    Subtitle,
    Body,
}

fn header<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let head = line.get(..key.len())?;
    head.eq_ignore_ascii_case(key)
        .then(|| line[key.len()..].trim())
}

fn is_separator(line: &str) -> bool {
    line.len() >= 3 && (line.bytes().all(|b| b == b'-') || line.bytes().all(|b| b == b'='))
}

fn starts_body(line: &str) -> bool {
    line.chars().count() > BODY_LINE_CHARS || line.contains("[[")
}

fn append_line(field: &mut Option<String>, line: &str) {
    match field {
        Some(v) if !v.is_empty() => {
            v.push('\n');
            v.push_str(line);
        }
        _ => *field = Some(line.to_owned()),
    }
}

struct RecordBuilder {
    records: Vec<Record>,
    current: Record,
    field: Option<Field>,
}

impl RecordBuilder {
    fn flush(&mut self) {
        let record = std::mem::take(&mut self.current).normalized();
        if !record.is_empty() {
            self.records.push(record);
        }
        self.field = None;
    }

    fn line(&mut self, line: &str) {
        if is_separator(line) {
            self.flush();
        } else if let Some(rest) = header(line, "upper:") {
            self.flush();
            self.current.upper = Some(rest.to_owned());
            self.field = Some(Field::Upper);
        } else if let Some(rest) = header(line, "judul:") {
            if self.current.title.is_some() {
                self.flush();
            }
            self.current.title = Some(rest.to_owned());
            self.field = Some(Field::Title);
        } else if let Some(rest) = header(line, "subjudul:") {
            self.current.subtitle = Some(rest.to_owned());
            self.field = Some(Field::Subtitle);
        } else {
            let target = match self.field {
                Some(Field::Upper) if !starts_body(line) => Some(&mut self.current.upper),
                Some(Field::Title) if !starts_body(line) => Some(&mut self.current.title),
                Some(Field::Subtitle) if !starts_body(line) => Some(&mut self.current.subtitle),
                _ => None,
            };
            match target {
                Some(field) => append_line(field, line),
                None => {
                    self.current.paragraphs.push(line.to_owned());
                    self.field = Some(Field::Body);
                }
            }
        }
    }
}

/// Split a record file into records.
///
/// Parsing never fails: unknown lines become body paragraphs and empty records are dropped.
pub fn parse_document(text: &str) -> Vec<Record> {
    let mut builder = RecordBuilder {
        records: Vec::new(),
        current: Record::default(),
        field: None,
    };
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        builder.line(line);
    }
    builder.flush();
    tracing::debug!(records = builder.records.len(), "parsed document");
    builder.records
}

/// Read and parse a UTF-8 record file.
pub fn parse_document_file(path: &Path) -> TextreelResult<Vec<Record>> {
    let bytes = std::fs::read(path).map_err(|e| {
        TextreelError::resource(format!("read input '{}': {e}", path.display()))
    })?;
    let text = String::from_utf8(bytes).map_err(|e| {
        TextreelError::parse(format!("input '{}' is not UTF-8: {e}", path.display()))
    })?;
    Ok(parse_document(&text))
}

#[cfg(test)]
#[path = "../../tests/unit/document/parser.rs"]
mod tests;
