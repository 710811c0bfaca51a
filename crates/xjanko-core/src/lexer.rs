//! Line splitting and one-token lookahead.
//!
//! The record parser pulls lines through a [`Lookahead`], which lets
//! delimited blocks test the next line before deciding to claim it.
//!
//! # Performance
//!
//! - Zero-copy: [`RawLines`] borrows directly from input
//! - SIMD-accelerated newline scanning via `memchr`
//! - Peek/advance API for lookahead without allocations

use std::borrow::Cow;

use memchr::memchr;

use crate::error::EndOfInput;

/// A preprocessed input line: trimmed, non-blank, not a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based physical line number in the original input.
    pub number: usize,
    /// The line text with surrounding whitespace removed.
    pub text: Cow<'a, str>,
}

impl<'a> Line<'a> {
    /// Create a line from already-trimmed text.
    #[inline]
    pub fn new(number: usize, text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Whitespace-separated tokens of the line.
    #[inline]
    pub fn tokens(&self) -> std::str::SplitWhitespace<'_> {
        self.text.split_whitespace()
    }

    /// The first token (property name or marker), if any.
    #[inline]
    pub fn first_token(&self) -> Option<&str> {
        self.tokens().next()
    }
}

/// Wrapper for an iterator supporting a look at the next element without
/// consuming it.
///
/// The underlying iterator is pulled at most one element ahead. Once it is
/// exhausted the source stays exhausted.
#[derive(Debug)]
pub struct Lookahead<I: Iterator> {
    iter: I,
    peeked: Option<I::Item>,
}

impl<I: Iterator> Lookahead<I> {
    /// Wrap an iterator.
    #[inline]
    pub fn new(iter: I) -> Self {
        Self { iter, peeked: None }
    }

    /// Return the next element without advancing.
    ///
    /// Repeated calls return the same element.
    #[inline]
    pub fn peek(&mut self) -> Result<&I::Item, EndOfInput> {
        if self.peeked.is_none() {
            self.peeked = self.iter.next();
        }
        self.peeked.as_ref().ok_or(EndOfInput)
    }

    /// Consume and return the next element.
    #[inline]
    pub fn advance(&mut self) -> Result<I::Item, EndOfInput> {
        if let Some(item) = self.peeked.take() {
            return Ok(item);
        }
        self.iter.next().ok_or(EndOfInput)
    }

    /// Consume the next element only if `accept` returns true for it.
    #[inline]
    pub fn next_if(&mut self, accept: impl FnOnce(&I::Item) -> bool) -> Option<I::Item> {
        if matches!(self.peek(), Ok(item) if accept(item)) {
            self.peeked.take()
        } else {
            None
        }
    }

    /// Check if no elements remain.
    #[inline]
    pub fn is_exhausted(&mut self) -> bool {
        self.peek().is_err()
    }
}

/// Splits borrowed text into physical lines.
///
/// Line terminators (`\n` or `\r\n`) are not included. A trailing newline
/// does not produce an extra empty line.
#[derive(Debug, Clone)]
pub struct RawLines<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> RawLines<'a> {
    /// Create a line splitter for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    /// Get the remaining unconsumed input.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }
}

impl<'a> Iterator for RawLines<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.input.as_bytes();
        if self.offset >= bytes.len() {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &bytes[start..]) {
            Some(pos) => start + pos,
            None => bytes.len(),
        };

        // Handle CRLF
        let text_end = if end > start && bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < bytes.len() { end + 1 } else { end };

        // `start` and `text_end` sit next to ASCII newline bytes or at the
        // input bounds, so both are char boundaries.
        Some(&self.input[start..text_end])
    }
}
