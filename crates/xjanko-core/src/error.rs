use std::fmt;

/// Error kinds for categorizing fatal parse errors.
///
/// Every kind here means the schema does not fit the data. The caller may
/// retry the same input with another schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended while a property still expected lines (e.g. grid rows).
    UnexpectedEnd,
    /// A line starts with a property name the schema does not declare.
    UnknownProperty,
    /// A grid dimension names a property that has not been decoded yet,
    /// or that does not hold an integer.
    MissingDimension,
    /// A grid row has the wrong number of tokens.
    RowLengthMismatch,
    /// An integer property's value is missing or not a base-10 integer.
    MalformedInteger,
}

/// A fatal parse error. Aborts the parse call; no partial record survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// 1-based physical line number where the error was detected
    pub line: Option<usize>,
    /// Error categorization
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error of the given kind.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            message: message.into(),
            line,
            kind,
        }
    }

    /// Create an error for input that ran out too early.
    pub fn unexpected_end(property: &str, line: usize) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEnd,
            format!("unexpected end of input in property: {}", property),
            Some(line),
        )
    }

    /// Create an error for a property name the schema does not know.
    pub fn unknown_property(property: &str, line: usize) -> Self {
        Self::new(
            ParseErrorKind::UnknownProperty,
            format!("unknown property: {}", property),
            Some(line),
        )
    }

    /// Create an error for a grid dimension that cannot be resolved.
    pub fn missing_dimension(axis: &str, field: &str, line: usize) -> Self {
        Self::new(
            ParseErrorKind::MissingDimension,
            format!("{} length not specified before grid (needs integer {})", axis, field),
            Some(line),
        )
    }

    /// Create an error for a grid row with the wrong token count.
    pub fn row_length(
        property: &str,
        row: usize,
        found: usize,
        expected: i64,
        line: usize,
    ) -> Self {
        Self::new(
            ParseErrorKind::RowLengthMismatch,
            format!(
                "row with invalid length (prop = {}, row = {}, found {}, expected {})",
                property, row, found, expected
            ),
            Some(line),
        )
    }

    /// Create an error for a row longer than a lenient grid allows.
    pub fn row_too_long(property: &str, row: usize, found: usize, max: i64, line: usize) -> Self {
        Self::new(
            ParseErrorKind::RowLengthMismatch,
            format!(
                "row longer than col length (prop = {}, row = {}, found {}, max {})",
                property, row, found, max
            ),
            Some(line),
        )
    }

    /// Create an error for an integer property that does not hold an integer.
    pub fn malformed_integer(property: &str, value: Option<&str>, line: usize) -> Self {
        let message = match value {
            Some(v) => format!("invalid integer for property {}: {:?}", property, v),
            None => format!("missing integer value for property: {}", property),
        };
        Self::new(ParseErrorKind::MalformedInteger, message, Some(line))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Recoverable irregularities reported through the warning sink.
///
/// These never abort a parse. The `Display` form is the text handed to the
/// sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Sentinels are required but the first line is not the start marker.
    MissingStart(String),
    /// Sentinels are required but input ended without an end marker.
    MissingEnd(String),
    /// The same property appeared twice; the new value was stored under `renamed`.
    DuplicateProperty { property: String, renamed: String },
    /// A flag property had trailing tokens.
    ExtraFlagData(String),
    /// A string property had nothing after its name.
    EmptyString(String),
    /// An integer property had more than one value token.
    ExtraIntegerData(String),
    /// Lines remained after the end marker.
    TrailingData,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingStart(marker) => write!(f, "no \"{}\" line", marker),
            Warning::MissingEnd(marker) => write!(f, "no \"{}\" line", marker),
            Warning::DuplicateProperty { property, renamed } => {
                write!(f, "duplicate property: {} (stored as {})", property, renamed)
            }
            Warning::ExtraFlagData(p) => write!(f, "extra data for none property: {}", p),
            Warning::EmptyString(p) => write!(f, "string property value empty: {}", p),
            Warning::ExtraIntegerData(p) => write!(f, "extra data for int property: {}", p),
            Warning::TrailingData => write!(f, "extra data not read"),
        }
    }
}

/// Returned by the lookahead source when no elements remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("end of input")
    }
}

impl std::error::Error for EndOfInput {}
