//! Decoded property values and the records built from them.
//!
//! A [`Record`] is what one successful parse produces:
//!
//! - **Ordered**: entries keep the order properties appeared in the input
//! - **Owned**: values do not borrow from the input, so a record outlives it
//! - **Loss-free**: duplicate properties are kept under renamed keys

/// A decoded property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Flag property, present with no value.
    Null,
    /// Same-line string or delimited block.
    Str(String),
    /// Integer property.
    Int(i64),
    /// Grid of tokens, row-major. Rows may be shorter than the declared
    /// column count when the grid allows short rows.
    Grid(Vec<Vec<String>>),
}

impl Value {
    /// The integer held by this value, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The string held by this value, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The grid held by this value, if it is one.
    pub fn as_grid(&self) -> Option<&[Vec<String>]> {
        match self {
            Value::Grid(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Property name to decoded value, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in input order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Pick the key a new value for `name` is stored under: `name` itself if
    /// unused, otherwise `name` followed by as many `_` as needed.
    pub(crate) fn free_key(&self, name: &str) -> String {
        let mut key = name.to_string();
        while self.contains_key(&key) {
            key.push('_');
        }
        key
    }

    /// Append an entry. The caller guarantees `key` is unused.
    pub(crate) fn push(&mut self, key: String, value: Value) {
        debug_assert!(!self.contains_key(&key));
        self.entries.push((key, value));
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_key_appends_underscores() {
        let mut record = Record::new();
        assert_eq!(record.free_key("author"), "author");
        record.push("author".into(), Value::Str("A".into()));
        assert_eq!(record.free_key("author"), "author_");
        record.push("author_".into(), Value::Str("B".into()));
        assert_eq!(record.free_key("author"), "author__");
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut record = Record::new();
        record.push("size".into(), Value::Int(4));
        record.push("puzzle".into(), Value::Str("sudoku".into()));
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["size", "puzzle"]);
        assert_eq!(record.get("size").and_then(Value::as_int), Some(4));
    }
}
