//! Schema-driven record parser.
//!
//! Reads one record from a sequence of lines. Each line starts with a
//! property name; the property's [`PropertyKind`] decides how many of the
//! following lines it claims. Schema mismatches are fatal, cosmetic problems
//! go to the [`WarningSink`].

use std::fmt;
use std::sync::Arc;

use crate::error::{ParseError, Warning};
use crate::lexer::{Line, Lookahead, RawLines};
use crate::record::{Record, Value};
use crate::schema::{Dimension, GridSpec, LineMatcher, PropertyKind, Schema};
use crate::sink::{TracingSink, WarningSink};

/// Default start marker.
pub const START_MARKER: &str = "begin";

/// Accepted end markers. Besides `end` these are spellings observed in real
/// data files.
pub const END_MARKERS: &[&str] = &["end", "send", "eend", "endend", "ends", "ssend"];

/// Lines that bracket a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    /// Compared against the whole first line.
    pub start: String,
    /// Compared case-insensitively against the first token of a line.
    pub ends: Vec<String>,
}

impl Sentinels {
    pub fn new(
        start: impl Into<String>,
        ends: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            start: start.into(),
            ends: ends.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if `token` is one of the end markers.
    #[inline]
    pub fn is_end(&self, token: &str) -> bool {
        self.ends.iter().any(|end| end.eq_ignore_ascii_case(token))
    }
}

impl Default for Sentinels {
    fn default() -> Self {
        Self::new(START_MARKER, END_MARKERS.iter().copied())
    }
}

/// Record parser: a schema plus parsing options.
///
/// Parsing takes `&self`, so one parser can be shared across threads and
/// reused for any number of inputs. Clones copy the schema; the warning sink
/// is shared.
#[derive(Clone)]
pub struct Parser {
    schema: Schema,
    use_sentinels: bool,
    comment_chars: String,
    sentinels: Sentinels,
    sink: Arc<dyn WarningSink + Send + Sync>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Schema::new())
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("schema", &self.schema)
            .field("use_sentinels", &self.use_sentinels)
            .field("comment_chars", &self.comment_chars)
            .field("sentinels", &self.sentinels)
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Create a parser for the given schema.
    ///
    /// Sentinels are required, no comment characters are set and warnings
    /// go to `tracing`.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            use_sentinels: true,
            comment_chars: String::new(),
            sentinels: Sentinels::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Require (or stop requiring) start and end markers.
    ///
    /// Missing markers are only ever warnings.
    pub fn with_sentinels(mut self, use_sentinels: bool) -> Self {
        self.use_sentinels = use_sentinels;
        self
    }

    /// Drop lines whose first non-blank character is one of `chars`.
    pub fn with_comment_chars(mut self, chars: &str) -> Self {
        self.comment_chars = chars.to_string();
        self
    }

    /// Replace the start and end markers.
    pub fn with_markers(mut self, sentinels: Sentinels) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Send warnings to `sink`.
    pub fn with_sink(mut self, sink: impl WarningSink + Send + Sync + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Send warnings to a sink shared with other parsers.
    pub fn with_shared_sink(mut self, sink: Arc<dyn WarningSink + Send + Sync>) -> Self {
        self.sink = sink;
        self
    }

    pub fn set_use_sentinels(&mut self, use_sentinels: bool) {
        self.use_sentinels = use_sentinels;
    }

    pub fn set_comment_chars(&mut self, chars: &str) {
        self.comment_chars = chars.to_string();
    }

    pub fn set_sink(&mut self, sink: Arc<dyn WarningSink + Send + Sync>) {
        self.sink = sink;
    }

    pub fn use_sentinels(&self) -> bool {
        self.use_sentinels
    }

    pub fn comment_chars(&self) -> &str {
        &self.comment_chars
    }

    pub fn sentinels(&self) -> &Sentinels {
        &self.sentinels
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Declare a flag property. See [`Schema::declare`] for panics.
    pub fn declare_flag(&mut self, name: &str) -> &mut Self {
        self.schema.declare_flag(name);
        self
    }

    /// Declare a same-line string property.
    pub fn declare_string(&mut self, name: &str) -> &mut Self {
        self.schema.declare_string(name);
        self
    }

    /// Declare an integer property.
    pub fn declare_integer(&mut self, name: &str) -> &mut Self {
        self.schema.declare_integer(name);
        self
    }

    /// Declare a grid property.
    pub fn declare_grid(&mut self, name: &str, grid: GridSpec) -> &mut Self {
        self.schema.declare_grid(name, grid);
        self
    }

    /// Declare a delimited block property.
    pub fn declare_block(&mut self, name: &str, matcher: LineMatcher) -> &mut Self {
        self.schema.declare_block(name, matcher);
        self
    }

    /// Remove a declaration so it can be re-declared differently.
    pub fn undeclare(&mut self, name: &str) -> Option<PropertyKind> {
        self.schema.undeclare(name)
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse a record from a sequence of lines.
    #[inline]
    pub fn parse<I, S>(&self, lines: I) -> Result<Record, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_with_sink(lines, self.sink.as_ref())
    }

    /// Parse a record from a sequence of lines, reporting warnings to `sink`
    /// instead of the configured sink.
    pub fn parse_with_sink<I, S>(
        &self,
        lines: I,
        sink: &dyn WarningSink,
    ) -> Result<Record, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines.into_iter().enumerate().filter_map(|(index, raw)| {
            let text = self.preprocess(raw.as_ref())?;
            Some(Line::new(index + 1, text.to_string()))
        });
        self.parse_source(&mut Lookahead::new(lines), sink)
    }

    /// Parse a record from a whole document held in memory.
    #[inline]
    pub fn parse_str(&self, input: &str) -> Result<Record, ParseError> {
        self.parse_str_with_sink(input, self.sink.as_ref())
    }

    /// Parse a record from a whole document, reporting warnings to `sink`.
    pub fn parse_str_with_sink(
        &self,
        input: &str,
        sink: &dyn WarningSink,
    ) -> Result<Record, ParseError> {
        let lines = RawLines::new(input).enumerate().filter_map(|(index, raw)| {
            self.preprocess(raw).map(|text| Line::new(index + 1, text))
        });
        self.parse_source(&mut Lookahead::new(lines), sink)
    }

    /// Trim a raw line; `None` if it is blank or a comment.
    #[inline]
    fn preprocess<'r>(&self, raw: &'r str) -> Option<&'r str> {
        let text = raw.trim();
        let first = text.chars().next()?;
        if self.comment_chars.contains(first) {
            return None;
        }
        Some(text)
    }

    fn parse_source<'a, I>(
        &self,
        source: &mut Lookahead<I>,
        sink: &dyn WarningSink,
    ) -> Result<Record, ParseError>
    where
        I: Iterator<Item = Line<'a>>,
    {
        let mut record = Record::new();

        if self.use_sentinels {
            let start = self.sentinels.start.as_str();
            if source.next_if(|line| line.text.as_ref() == start).is_none() {
                warn(sink, Warning::MissingStart(self.sentinels.start.clone()));
            }
        }

        let mut found_end = false;
        while let Ok(line) = source.advance() {
            let Some(first) = line.first_token() else {
                continue;
            };
            if self.sentinels.is_end(first) {
                found_end = true;
                break;
            }

            let name = first.to_ascii_lowercase();
            let kind = self
                .schema
                .get(&name)
                .ok_or_else(|| ParseError::unknown_property(&name, line.number))?;

            let key = if record.contains_key(&name) {
                let renamed = record.free_key(&name);
                warn(
                    sink,
                    Warning::DuplicateProperty {
                        property: name.clone(),
                        renamed: renamed.clone(),
                    },
                );
                renamed
            } else {
                name
            };

            let value = self.decode(kind, &key, &line, &record, source, sink)?;
            record.push(key, value);
        }

        if self.use_sentinels && !found_end {
            let marker = self.sentinels.ends.first().cloned().unwrap_or_default();
            warn(sink, Warning::MissingEnd(marker));
        }

        if source.advance().is_ok() {
            warn(sink, Warning::TrailingData);
        }

        Ok(record)
    }

    fn decode<'a, I>(
        &self,
        kind: &PropertyKind,
        key: &str,
        line: &Line<'a>,
        record: &Record,
        source: &mut Lookahead<I>,
        sink: &dyn WarningSink,
    ) -> Result<Value, ParseError>
    where
        I: Iterator<Item = Line<'a>>,
    {
        match kind {
            PropertyKind::Flag => {
                if line.tokens().nth(1).is_some() {
                    warn(sink, Warning::ExtraFlagData(key.to_string()));
                }
                Ok(Value::Null)
            }
            PropertyKind::Str => {
                let value = line.tokens().skip(1).collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    warn(sink, Warning::EmptyString(key.to_string()));
                }
                Ok(Value::Str(value))
            }
            PropertyKind::Int => {
                let mut tokens = line.tokens().skip(1);
                let raw = tokens
                    .next()
                    .ok_or_else(|| ParseError::malformed_integer(key, None, line.number))?;
                let value = raw
                    .parse::<i64>()
                    .map_err(|_| ParseError::malformed_integer(key, Some(raw), line.number))?;
                if tokens.next().is_some() {
                    warn(sink, Warning::ExtraIntegerData(key.to_string()));
                }
                Ok(Value::Int(value))
            }
            PropertyKind::Grid(grid) => self.decode_grid(grid, key, line, record, source),
            PropertyKind::Block(matcher) => {
                let mut block = String::new();
                while source.peek().is_ok_and(|next| matcher.matches(&next.text)) {
                    if let Ok(next) = source.advance() {
                        block.push_str(&next.text);
                    }
                }
                Ok(Value::Str(block))
            }
        }
    }

    fn decode_grid<'a, I>(
        &self,
        grid: &GridSpec,
        key: &str,
        line: &Line<'a>,
        record: &Record,
        source: &mut Lookahead<I>,
    ) -> Result<Value, ParseError>
    where
        I: Iterator<Item = Line<'a>>,
    {
        let rows = grid
            .row_transform
            .apply(resolve(&grid.rows, "row", record, line.number)?);
        let cols = grid
            .col_transform
            .apply(resolve(&grid.cols, "col", record, line.number)?);

        let row_count = usize::try_from(rows).unwrap_or(0);
        // the declared count is unchecked until the rows are read
        let mut cells = Vec::with_capacity(row_count.min(1024));
        let mut last_line = line.number;

        for r in 0..row_count {
            let row_line = source
                .advance()
                .map_err(|_| ParseError::unexpected_end(key, last_line))?;
            last_line = row_line.number;

            let row: Vec<String> = row_line.tokens().map(str::to_string).collect();
            let len = row.len() as i64;
            if grid.allow_short_rows {
                if len > cols {
                    return Err(ParseError::row_too_long(key, r, row.len(), cols, row_line.number));
                }
            } else if len != cols {
                return Err(ParseError::row_length(key, r, row.len(), cols, row_line.number));
            }
            cells.push(row);
        }

        Ok(Value::Grid(cells))
    }
}

/// Resolve a grid dimension against the properties decoded so far.
fn resolve(
    dimension: &Dimension,
    axis: &str,
    record: &Record,
    line: usize,
) -> Result<i64, ParseError> {
    match dimension {
        Dimension::Literal(n) => Ok(*n),
        Dimension::Field(name) => record
            .get(name)
            .and_then(Value::as_int)
            .ok_or_else(|| ParseError::missing_dimension(axis, name, line)),
    }
}

#[inline]
fn warn(sink: &dyn WarningSink, warning: Warning) {
    sink.report(&warning.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Transform;

    #[test]
    fn test_preprocess_drops_blank_and_comment_lines() {
        let parser = Parser::default().with_comment_chars(";#");
        assert_eq!(parser.preprocess("  size 3 \t"), Some("size 3"));
        assert_eq!(parser.preprocess("   "), None);
        assert_eq!(parser.preprocess("  ; note"), None);
        assert_eq!(parser.preprocess("# note"), None);
    }

    #[test]
    fn test_sentinels_end_is_case_insensitive() {
        let sentinels = Sentinels::default();
        for marker in END_MARKERS {
            assert!(sentinels.is_end(marker));
            assert!(sentinels.is_end(&marker.to_uppercase()));
        }
        assert!(!sentinels.is_end("begin"));
        assert!(!sentinels.is_end("endx"));
    }

    #[test]
    fn test_negative_row_count_reads_nothing() {
        let mut parser = Parser::default().with_sentinels(false);
        parser.declare_grid("nodes", GridSpec::new(0, 3).map_rows(Transform::offset(-1)));
        let record = parser.parse_str("nodes\n").unwrap();
        assert_eq!(record.get("nodes"), Some(&Value::Grid(Vec::new())));
    }
}
