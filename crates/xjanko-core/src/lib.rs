//! # xjanko Core
//!
//! A schema-driven parser for the line-oriented `x-janko` puzzle format.
//!
//! A record is a run of lines between optional `begin`/`end` markers. Each
//! line starts with a property name; a declared [`PropertyKind`] says whether
//! the property is a flag, a same-line string or integer, a grid spanning the
//! next lines, or a block of lines selected by a [`LineMatcher`].
//!
//! ## Quick Start
//!
//! ```rust
//! use xjanko_core::{GridSpec, Parser, Value};
//!
//! let mut parser = Parser::default();
//! parser
//!     .declare_string("puzzle")
//!     .declare_integer("size")
//!     .declare_grid("problem", GridSpec::new("size", "size"));
//!
//! let input = "begin\npuzzle sudoku\nsize 2\nproblem\n1 -\n- 2\nend\n";
//! let record = parser.parse_str(input).unwrap();
//!
//! assert_eq!(record.get("size"), Some(&Value::Int(2)));
//! assert_eq!(record.get("problem").and_then(Value::as_grid).map(|g| g.len()), Some(2));
//! ```
//!
//! ## Warnings vs. errors
//!
//! Schema mismatches (unknown property, unresolved grid dimension, wrong row
//! length, bad integer) abort the parse with a [`ParseError`]. Cosmetic
//! irregularities are reported to a [`WarningSink`] and parsing continues:
//!
//! ```rust
//! use std::sync::Arc;
//! use xjanko_core::{CollectingSink, Parser};
//!
//! let sink = Arc::new(CollectingSink::new());
//! let mut parser = Parser::default().with_shared_sink(sink.clone());
//! parser.declare_string("author");
//!
//! let record = parser.parse(["author A", "author B"]).unwrap();
//! assert!(record.contains_key("author_"));
//! assert_eq!(sink.len(), 3); // no begin, duplicate, no end
//! ```
//!
//! ## Candidates
//!
//! [`parse_with_candidates`] tries an ordered list of parsers on the same
//! input and keeps the first record that parses.

pub mod error;
pub mod fallback;
pub mod lexer;
pub mod parser;
pub mod presets;
pub mod record;
pub mod schema;
pub mod sink;

pub use error::{EndOfInput, ParseError, ParseErrorKind, Warning};
pub use fallback::{
    parse_with_candidates, parse_with_candidates_and_sink, Accepted, CandidateFailures,
};
pub use lexer::{Line, Lookahead, RawLines};
pub use parser::{Parser, Sentinels, END_MARKERS, START_MARKER};
pub use record::{Record, Value};
pub use schema::{Dimension, GridSpec, LineMatcher, PropertyKind, Schema, Transform};
pub use sink::{CollectingSink, NullSink, TracingSink, WarningSink};
