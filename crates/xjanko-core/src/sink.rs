//! Where recoverable warnings go.
//!
//! Fatal problems are returned as [`ParseError`](crate::ParseError); only
//! cosmetic irregularities reach a [`WarningSink`].

use std::sync::Mutex;

/// Receives human-readable warning messages from the parser.
pub trait WarningSink {
    /// Report one warning.
    fn report(&self, message: &str);
}

impl<F> WarningSink for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Forwards warnings to `tracing` at WARN level. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn report(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Drops every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl WarningSink for NullSink {
    fn report(&self, _message: &str) {}
}

/// Keeps warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of collected messages.
    pub fn len(&self) -> usize {
        match self.messages.lock() {
            Ok(messages) => messages.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for CollectingSink {
    fn report(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
