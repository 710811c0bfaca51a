//! Schema building blocks shared by most puzzle types.
//!
//! Puzzle schemas are usually one of two base shapes, a square grid keyed on
//! `size` or a rectangular one keyed on `rows` and `cols`, plus a few extra
//! properties. Build the base once with [`size_grid`] or [`rc_grid`], then
//! clone and specialize it per puzzle type.

use crate::parser::Parser;
use crate::schema::{GridSpec, LineMatcher};

/// Properties every puzzle file may carry.
pub fn add_common(p: &mut Parser) {
    p.declare_string("puzzle")
        .declare_string("author")
        .declare_string("solver")
        .declare_block("moves", LineMatcher::ends_with(";"))
        .declare_string("source")
        .declare_integer("unit")
        .declare_integer("depth")
        .declare_string("info")
        .declare_string("title")
        .declare_string("variant")
        .declare_string("layout")
        .declare_string("options")
        .declare_string("mail");
}

/// `rows` and `cols`, with `problem`, `solution` (and optionally `areas`)
/// grids of that shape.
pub fn add_rc_grid(p: &mut Parser, areas: bool) {
    p.declare_integer("rows")
        .declare_integer("cols")
        .declare_grid("problem", GridSpec::new("rows", "cols"))
        .declare_grid("solution", GridSpec::new("rows", "cols"));
    if areas {
        p.declare_grid("areas", GridSpec::new("rows", "cols"));
    }
}

/// `size`, with square `problem`, `solution` (and optionally `areas`) grids.
pub fn add_size_grid(p: &mut Parser, areas: bool) {
    p.declare_integer("size")
        .declare_grid("problem", GridSpec::new("size", "size"))
        .declare_grid("solution", GridSpec::new("size", "size"));
    if areas {
        p.declare_grid("areas", GridSpec::new("size", "size"));
    }
}

/// Row and column labels, `count` lines each, for a `rows` x `cols` grid.
pub fn add_labels_rc(p: &mut Parser, count: i64) {
    p.declare_grid("rlabels", GridSpec::new(count, "rows"))
        .declare_grid("clabels", GridSpec::new(count, "cols"));
}

/// Row and column labels, `count` lines each, for a `size` grid.
pub fn add_labels_size(p: &mut Parser, count: i64) {
    p.declare_grid("rlabels", GridSpec::new(count, "size"))
        .declare_grid("clabels", GridSpec::new(count, "size"));
}

/// Row and column labels, `depth` lines each, for a `rows` x `cols` grid.
///
/// `depth` itself comes from [`add_common`].
pub fn add_labels_rc_depth(p: &mut Parser) {
    p.declare_grid("rlabels", GridSpec::new("depth", "rows"))
        .declare_grid("clabels", GridSpec::new("depth", "cols"));
}

/// Sudoku-style box pattern.
pub fn add_pattern(p: &mut Parser) {
    p.declare_integer("pattern")
        .declare_integer("patternx")
        .declare_integer("patterny");
}

pub fn add_min_max(p: &mut Parser) {
    p.declare_integer("min").declare_integer("max");
}

/// Common properties plus a `size` grid.
pub fn size_grid(areas: bool) -> Parser {
    let mut p = Parser::default();
    add_common(&mut p);
    add_size_grid(&mut p, areas);
    p
}

/// Common properties plus a `rows` x `cols` grid.
pub fn rc_grid(areas: bool) -> Parser {
    let mut p = Parser::default();
    add_common(&mut p);
    add_rc_grid(&mut p, areas);
    p
}
