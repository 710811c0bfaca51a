//! Property declarations.
//!
//! A [`Schema`] maps property names to a [`PropertyKind`], which says how
//! many lines the property claims and how its value is decoded. Schemas have
//! value semantics: cloning one and specializing the clone never affects the
//! original.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// Where a grid gets one of its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// A fixed count.
    Literal(i64),
    /// The value of an integer property decoded earlier in the same record.
    Field(String),
}

impl From<i64> for Dimension {
    fn from(n: i64) -> Self {
        Dimension::Literal(n)
    }
}

impl From<i32> for Dimension {
    fn from(n: i32) -> Self {
        Dimension::Literal(n as i64)
    }
}

impl From<&str> for Dimension {
    fn from(name: &str) -> Self {
        Dimension::Field(name.to_ascii_lowercase())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Literal(n) => write!(f, "{}", n),
            Dimension::Field(name) => f.write_str(name),
        }
    }
}

/// Adjustment applied to a resolved grid dimension before rows are read.
#[derive(Clone, Default)]
pub enum Transform {
    #[default]
    Identity,
    /// `scale * x + offset`
    Affine { scale: i64, offset: i64 },
    Custom(Arc<dyn Fn(i64) -> i64 + Send + Sync>),
}

impl Transform {
    pub fn identity() -> Self {
        Transform::Identity
    }

    /// `x + n`, e.g. `offset(1)` for a fencepost row or column.
    pub fn offset(n: i64) -> Self {
        Transform::Affine {
            scale: 1,
            offset: n,
        }
    }

    /// `scale * x + offset`, e.g. `affine(2, -1)` for a grid with cells
    /// between every pair of nodes.
    pub fn affine(scale: i64, offset: i64) -> Self {
        Transform::Affine { scale, offset }
    }

    /// Any other integer function.
    pub fn custom(f: impl Fn(i64) -> i64 + Send + Sync + 'static) -> Self {
        Transform::Custom(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, x: i64) -> i64 {
        match self {
            Transform::Identity => x,
            Transform::Affine { scale, offset } => scale.saturating_mul(x).saturating_add(*offset),
            Transform::Custom(f) => f(x),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => f.write_str("Identity"),
            Transform::Affine { scale, offset } => f
                .debug_struct("Affine")
                .field("scale", scale)
                .field("offset", offset)
                .finish(),
            Transform::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Decides whether a line still belongs to a delimited block.
#[derive(Clone)]
pub enum LineMatcher {
    /// The pattern occurs somewhere in the line.
    Regex(Regex),
    /// The line ends with the given suffix.
    EndsWith(String),
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl LineMatcher {
    /// Match lines in which `pattern` occurs.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(LineMatcher::Regex(Regex::new(pattern)?))
    }

    /// Match lines ending with `suffix`.
    pub fn ends_with(suffix: impl Into<String>) -> Self {
        LineMatcher::EndsWith(suffix.into())
    }

    pub fn custom(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        LineMatcher::Custom(Arc::new(f))
    }

    #[inline]
    pub fn matches(&self, line: &str) -> bool {
        match self {
            LineMatcher::Regex(re) => re.is_match(line),
            LineMatcher::EndsWith(suffix) => line.ends_with(suffix.as_str()),
            LineMatcher::Custom(f) => f(line),
        }
    }
}

impl From<Regex> for LineMatcher {
    fn from(re: Regex) -> Self {
        LineMatcher::Regex(re)
    }
}

impl fmt::Debug for LineMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineMatcher::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            LineMatcher::EndsWith(s) => f.debug_tuple("EndsWith").field(s).finish(),
            LineMatcher::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Shape of a grid property.
#[derive(Debug, Clone)]
pub struct GridSpec {
    pub rows: Dimension,
    pub cols: Dimension,
    pub row_transform: Transform,
    pub col_transform: Transform,
    /// Accept rows shorter than the column count (jagged grid).
    pub allow_short_rows: bool,
}

impl GridSpec {
    /// A grid of `rows` by `cols` with no transforms and exact row lengths.
    pub fn new(rows: impl Into<Dimension>, cols: impl Into<Dimension>) -> Self {
        Self {
            rows: rows.into(),
            cols: cols.into(),
            row_transform: Transform::Identity,
            col_transform: Transform::Identity,
            allow_short_rows: false,
        }
    }

    /// Transform the resolved row count.
    pub fn map_rows(mut self, transform: Transform) -> Self {
        self.row_transform = transform;
        self
    }

    /// Transform the resolved column count.
    pub fn map_cols(mut self, transform: Transform) -> Self {
        self.col_transform = transform;
        self
    }

    /// Apply the same transform to both dimensions.
    pub fn map_both(self, transform: Transform) -> Self {
        self.map_rows(transform.clone()).map_cols(transform)
    }

    /// Allow rows with fewer tokens than the column count.
    pub fn allow_short_rows(mut self) -> Self {
        self.allow_short_rows = true;
        self
    }
}

/// How a property is decoded.
#[derive(Debug, Clone)]
pub enum PropertyKind {
    /// No value; the property is present or not.
    Flag,
    /// Rest of the line, tokens rejoined with single spaces.
    Str,
    /// Second token as a base-10 integer.
    Int,
    /// A fixed number of following lines, split into tokens.
    Grid(GridSpec),
    /// Following lines accepted by the matcher, concatenated.
    Block(LineMatcher),
}

/// Registry of property declarations, keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    properties: HashMap<String, PropertyKind>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or already declared.
    pub fn declare(&mut self, name: &str, kind: PropertyKind) -> &mut Self {
        let key = name.to_ascii_lowercase();
        assert!(!key.is_empty(), "property name must not be empty");
        assert!(
            !self.properties.contains_key(&key),
            "property already declared: {}",
            key
        );
        self.properties.insert(key, kind);
        self
    }

    /// Register a flag property.
    pub fn declare_flag(&mut self, name: &str) -> &mut Self {
        self.declare(name, PropertyKind::Flag)
    }

    /// Register a same-line string property.
    pub fn declare_string(&mut self, name: &str) -> &mut Self {
        self.declare(name, PropertyKind::Str)
    }

    /// Register an integer property.
    pub fn declare_integer(&mut self, name: &str) -> &mut Self {
        self.declare(name, PropertyKind::Int)
    }

    /// Register a grid property.
    pub fn declare_grid(&mut self, name: &str, grid: GridSpec) -> &mut Self {
        self.declare(name, PropertyKind::Grid(grid))
    }

    /// Register a delimited block property.
    pub fn declare_block(&mut self, name: &str, matcher: LineMatcher) -> &mut Self {
        self.declare(name, PropertyKind::Block(matcher))
    }

    /// Remove a declaration, returning it if it existed.
    pub fn undeclare(&mut self, name: &str) -> Option<PropertyKind> {
        self.properties.remove(&name.to_ascii_lowercase())
    }

    /// Look up a declaration. `name` must already be lowercase.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&PropertyKind> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
