//! Trying several candidate schemas on the same input.
//!
//! Files of one puzzle type are not all written the same way, so callers
//! keep an ordered list of parsers per type and take the first that accepts
//! the file.

use std::fmt;

use crate::error::ParseError;
use crate::parser::Parser;
use crate::record::Record;
use crate::sink::WarningSink;

/// A record accepted by one of the candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    /// Position of the accepting parser in the candidate list.
    pub index: usize,
    pub record: Record,
}

/// Every candidate rejected the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFailures {
    failures: Vec<(usize, ParseError)>,
}

impl CandidateFailures {
    /// Candidate index and error, in the order the candidates were tried.
    pub fn iter(&self) -> impl Iterator<Item = &(usize, ParseError)> {
        self.failures.iter()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for CandidateFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            return f.write_str("no candidate parsers");
        }
        for (i, (index, error)) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "parser {}: {}", index, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CandidateFailures {}

/// Parse `input` with each candidate in turn, warnings going to each
/// parser's own sink.
pub fn parse_with_candidates(
    candidates: &[Parser],
    input: &str,
) -> Result<Accepted, CandidateFailures> {
    try_each(candidates, |parser| parser.parse_str(input))
}

/// Parse `input` with each candidate in turn, warnings going to `sink`.
///
/// Warnings from rejected candidates are reported too.
pub fn parse_with_candidates_and_sink(
    candidates: &[Parser],
    input: &str,
    sink: &dyn WarningSink,
) -> Result<Accepted, CandidateFailures> {
    try_each(candidates, |parser| parser.parse_str_with_sink(input, sink))
}

fn try_each<F>(candidates: &[Parser], mut parse: F) -> Result<Accepted, CandidateFailures>
where
    F: FnMut(&Parser) -> Result<Record, ParseError>,
{
    let mut failures = Vec::new();
    for (index, parser) in candidates.iter().enumerate() {
        match parse(parser) {
            Ok(record) => return Ok(Accepted { index, record }),
            Err(error) => failures.push((index, error)),
        }
    }
    Err(CandidateFailures { failures })
}
