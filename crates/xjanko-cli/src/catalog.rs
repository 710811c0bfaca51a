//! Built-in table of candidate parsers per puzzle category.
//!
//! A category is a directory path below the puzzle root, e.g. `/Sudoku`.
//! Each maps to an ordered list of parsers; the first that accepts a file
//! wins. Most entries are one of ten base parsers, the rest are clones of a
//! base with a few properties added or re-declared.

use std::collections::BTreeMap;
use std::sync::Arc;

use xjanko_core::presets::{self, rc_grid, size_grid};
use xjanko_core::{GridSpec, LineMatcher, Parser, Transform};

/// Category path to candidate parsers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, Arc<[Parser]>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the candidates for a category, replacing any previous entry.
    pub fn insert(&mut self, category: &str, candidates: Vec<Parser>) {
        self.entries.insert(category.to_string(), candidates.into());
    }

    /// Make `category` use the same candidates as `target`.
    ///
    /// Returns `false` if `target` is not registered.
    pub fn alias(&mut self, category: &str, target: &str) -> bool {
        match self.entries.get(target).cloned() {
            Some(candidates) => {
                self.entries.insert(category.to_string(), candidates);
                true
            }
            None => false,
        }
    }

    /// Candidates for a category, in the order they should be tried.
    pub fn get(&self, category: &str) -> Option<&[Parser]> {
        self.entries.get(category).map(|c| &c[..])
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    /// Categories with their candidate counts, sorted by path.
    pub fn categories(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.len()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The catalog of known puzzle categories.
    pub fn builtin() -> Result<Self, regex::Error> {
        let base = Bases::new();
        let mut c = Catalog::new();

        for (category, bases) in PLAIN {
            c.insert(category, bases.iter().map(|&b| base.get(b).clone()).collect());
        }
        transformed_grids(&mut c, &base);
        labelled_grids(&mut c, &base);
        extra_properties(&mut c, &base);
        sudoku(&mut c, &base);
        text_blocks(&mut c, &base)?;

        for (category, target) in ALIASES {
            c.alias(category, target);
        }

        Ok(c)
    }
}

/// Directories known to hold no puzzle records (indexes, images, articles).
pub fn is_unparsed(category: &str) -> bool {
    UNPARSED.binary_search(&category).is_ok()
}

// =============================================================================
// Base Parsers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Size,
    Rc,
    SizeAreas,
    RcAreas,
    SizeLabels1,
    SizeLabels2,
    RcLabels1,
    RcLabels2,
    SizeAreasLabels1,
    SizeAreasLabels2,
}

/// Base parsers shared by most categories.
struct Bases {
    size: Parser,
    rc: Parser,
    size_areas: Parser,
    rc_areas: Parser,
    size_labels1: Parser,
    size_labels2: Parser,
    rc_labels1: Parser,
    rc_labels2: Parser,
    size_areas_labels1: Parser,
    size_areas_labels2: Parser,
}

impl Bases {
    fn new() -> Self {
        let size = size_grid(false);
        let rc = rc_grid(false);
        let size_areas = size_grid(true);
        Self {
            size_labels1: derive(&size, |p| presets::add_labels_size(p, 1)),
            size_labels2: derive(&size, |p| presets::add_labels_size(p, 2)),
            rc_labels1: derive(&rc, |p| presets::add_labels_rc(p, 1)),
            rc_labels2: derive(&rc, |p| presets::add_labels_rc(p, 2)),
            size_areas_labels1: derive(&size_areas, |p| presets::add_labels_size(p, 1)),
            size_areas_labels2: derive(&size_areas, |p| presets::add_labels_size(p, 2)),
            rc_areas: rc_grid(true),
            size,
            rc,
            size_areas,
        }
    }

    fn get(&self, base: Base) -> &Parser {
        match base {
            Base::Size => &self.size,
            Base::Rc => &self.rc,
            Base::SizeAreas => &self.size_areas,
            Base::RcAreas => &self.rc_areas,
            Base::SizeLabels1 => &self.size_labels1,
            Base::SizeLabels2 => &self.size_labels2,
            Base::RcLabels1 => &self.rc_labels1,
            Base::RcLabels2 => &self.rc_labels2,
            Base::SizeAreasLabels1 => &self.size_areas_labels1,
            Base::SizeAreasLabels2 => &self.size_areas_labels2,
        }
    }
}

/// Clone `base` and specialize the clone.
fn derive(base: &Parser, specialize: impl FnOnce(&mut Parser)) -> Parser {
    let mut p = base.clone();
    specialize(&mut p);
    p
}

/// Re-declare a property as a grid.
fn regrid(p: &mut Parser, name: &str, grid: GridSpec) {
    p.undeclare(name);
    p.declare_grid(name, grid);
}

// =============================================================================
// Transformed Grids
// =============================================================================

fn transformed_grids(c: &mut Catalog, b: &Bases) {
    // Problem grids of nodes, one wider and taller than the cell grid
    let size_nodes = derive(&b.size, |p| {
        regrid(p, "problem", GridSpec::new("size", "size").map_both(Transform::offset(1)))
    });
    let rc_nodes = derive(&b.rc, |p| {
        regrid(p, "problem", GridSpec::new("rows", "cols").map_both(Transform::offset(1)))
    });
    c.insert("/Creek", vec![size_nodes.clone(), rc_nodes.clone()]);
    c.insert("/Gokigen-Naname", vec![size_nodes.clone(), rc_nodes.clone()]);
    c.insert("/Pillen", vec![size_nodes, rc_nodes]);

    // The grids are always 7x7 and 5x5
    let mut abc_pfad = Parser::default();
    presets::add_common(&mut abc_pfad);
    abc_pfad
        .declare_integer("size")
        .declare_grid(
            "problem",
            GridSpec::new("size", "size").map_both(Transform::offset(2)),
        )
        .declare_grid("solution", GridSpec::new("size", "size"));
    c.insert("/Abc-Pfad", vec![abc_pfad]);

    c.insert(
        "/Area-51",
        vec![
            derive(&b.size, |p| {
                p.declare_grid(
                    "nodes",
                    GridSpec::new("size", "size").map_both(Transform::offset(1)),
                );
            }),
            derive(&b.rc, |p| {
                p.declare_grid(
                    "nodes",
                    GridSpec::new("rows", "cols").map_both(Transform::offset(1)),
                );
            }),
        ],
    );

    c.insert(
        "/Futoshiki",
        vec![derive(&b.size, |p| {
            regrid(
                p,
                "problem",
                GridSpec::new("size", "size").map_both(Transform::affine(2, -1)),
            )
        })],
    );

    c.insert(
        "/Mathrax",
        vec![derive(&b.size, |p| {
            p.declare_grid(
                "nodes",
                GridSpec::new("size", "size").map_both(Transform::offset(-1)),
            );
        })],
    );

    c.insert(
        "/Miss-Lupun",
        vec![derive(&b.rc, |p| {
            regrid(
                p,
                "problem",
                GridSpec::new("rows", "cols")
                    .map_both(Transform::affine(2, -1))
                    .allow_short_rows(),
            )
        })],
    );

    c.insert(
        "/Hotaru-Beam",
        vec![derive(&b.size, |p| {
            regrid(
                p,
                "problem",
                GridSpec::new("size", "size").map_both(Transform::offset(1)),
            );
            p.declare_grid("rlabels", GridSpec::new(2, "size").map_cols(Transform::offset(-1)))
                .declare_grid("clabels", GridSpec::new(2, "size").map_cols(Transform::offset(-1)));
        })],
    );

    let pfeil = derive(&b.size, |p| {
        regrid(p, "problem", GridSpec::new("size", "size").map_both(Transform::offset(2)));
        regrid(p, "solution", GridSpec::new("size", "size").map_both(Transform::offset(2)));
    });
    let pfeil_inner = derive(&pfeil, |p| regrid(p, "problem", GridSpec::new("size", "size")));
    c.insert("/Pfeilzahlen", vec![pfeil, pfeil_inner]);

    let spuk = |base: &Parser, rows: &str, cols: &str| {
        derive(base, |p| {
            regrid(p, "problem", GridSpec::new(rows, cols).map_both(Transform::offset(2)));
            p.declare_integer("ghosts")
                .declare_integer("zombies")
                .declare_integer("vampires");
        })
    };
    c.insert(
        "/Spukschloss",
        vec![spuk(&b.size, "size", "size"), spuk(&b.rc, "rows", "cols")],
    );

    // Guess rows carry two extra columns of feedback pegs
    let mastermind_size = derive(&b.size, |p| {
        regrid(p, "problem", GridSpec::new("size", "size").map_cols(Transform::offset(2)));
        regrid(p, "solution", GridSpec::new(1, "size"));
        p.declare_string("unique");
    });
    let mastermind_rc = derive(&b.rc, |p| {
        regrid(p, "problem", GridSpec::new("rows", "cols").map_cols(Transform::offset(2)));
        regrid(p, "solution", GridSpec::new(1, "cols"));
        p.declare_string("unique");
    });
    // some have a full length solution row
    let mastermind_full = derive(&mastermind_rc, |p| {
        regrid(p, "solution", GridSpec::new(1, "cols").map_cols(Transform::offset(2)))
    });
    c.insert("/Mastermind", vec![mastermind_size, mastermind_rc, mastermind_full]);
}

// =============================================================================
// Labelled Grids
// =============================================================================

fn labelled_grids(c: &mut Catalog, b: &Bases) {
    c.insert(
        "/Abc-End-View",
        vec![derive(&b.size_labels2, |p| {
            p.declare_string("diagonals");
        })],
    );

    c.insert("/Abc-Kombi", vec![derive(&b.rc, presets::add_labels_rc_depth)]);

    c.insert(
        "/Kakurasu",
        vec![
            b.size_labels1.clone(),
            b.rc_labels1.clone(),
            derive(&b.rc_labels1, |p| {
                // some files carry an integer on the begin line
                p.declare_integer("begin");
            }),
        ],
    );

    c.insert(
        "/Elbow-Room",
        vec![derive(&b.size_labels1, |p| {
            p.declare_string("nlabels")
                .declare_grid("celltext", GridSpec::new("size", "size"));
        })],
    );

    // Clue lists have at most one entry per cell
    let jagged_rc = derive(&b.rc, |p| {
        p.declare_grid("rlabels", GridSpec::new("rows", "cols").allow_short_rows())
            .declare_grid("clabels", GridSpec::new("cols", "rows").allow_short_rows());
    });
    let jagged_size = derive(&b.size, |p| {
        p.declare_grid("rlabels", GridSpec::new("size", "size").allow_short_rows())
            .declare_grid("clabels", GridSpec::new("size", "size").allow_short_rows());
    });
    c.insert(
        "/Nonogramme",
        vec![b.rc.clone(), b.size.clone(), jagged_rc, jagged_size.clone()],
    );
    c.insert("/Sukano", vec![jagged_size]);

    c.insert(
        "/Nanro/Outside",
        vec![derive(&b.size_areas_labels2, |p| {
            p.declare_string("nlabels");
        })],
    );

    // 1-20 have lines starting with ';'
    c.insert(
        "/Pipeline",
        vec![
            b.rc_labels1.clone().with_comment_chars(";"),
            b.size_labels1.clone().with_comment_chars(";"),
        ],
    );

    c.insert(
        "/Battleships",
        vec![derive(&b.size_labels1, |p| {
            p.declare_string("ships");
        })],
    );

    c.insert(
        "/Thermometer",
        vec![derive(&b.size_labels1, |p| {
            p.declare_grid("labels", GridSpec::new("size", "size"));
        })],
    );

    c.insert(
        "/Wasserspass",
        vec![
            derive(&b.size_labels1, |p| {
                p.declare_grid("lines", GridSpec::new("size", "size"));
            }),
            derive(&b.rc_labels1, |p| {
                p.declare_grid("lines", GridSpec::new("rows", "cols"));
            }),
        ],
    );
}

// =============================================================================
// Extra Properties
// =============================================================================

fn extra_properties(c: &mut Catalog, b: &Bases) {
    c.insert(
        "/Battlemines",
        vec![derive(&b.size, |p| {
            p.declare_string("ships");
        })],
    );

    c.insert(
        "/Boxing-Match",
        vec![
            derive(&b.size, |p| {
                p.declare_grid("cellimage", GridSpec::new("size", "size"));
            }),
            derive(&b.rc, |p| {
                p.declare_grid("cellimage", GridSpec::new("rows", "cols"));
            }),
        ],
    );

    c.insert(
        "/Boxing-Match-2",
        vec![
            derive(&b.size_areas, presets::add_min_max),
            derive(&b.rc_areas, presets::add_min_max),
        ],
    );

    c.insert(
        "/Partiti",
        vec![derive(&b.size, |p| {
            presets::add_min_max(p);
            p.declare_grid("cornertext", GridSpec::new("size", "size"));
        })],
    );

    c.insert(
        "/Nanro/Litro",
        vec![derive(&b.size_areas, |p| {
            p.declare_grid("cornertext", GridSpec::new("size", "size"));
        })],
    );

    let lines = derive(&b.size, |p| {
        p.declare_grid("lines", GridSpec::new("size", "size"));
    });
    c.insert("/Burokku", vec![lines.clone()]);
    c.insert("/Zahlenlabyrinth", vec![lines]);

    c.insert(
        "/Pfeilpfad",
        vec![derive(&b.size, |p| {
            p.declare_grid("labels", GridSpec::new("size", "size"));
        })],
    );

    c.insert(
        "/Detektivschach",
        vec![derive(&b.size, |p| {
            p.declare_string("pieces").declare_integer("begin");
        })],
    );

    c.insert(
        "/Lampions",
        vec![derive(&b.size, |p| {
            p.declare_integer("begin");
        })],
    );

    c.insert(
        "/Nurimaze/Dead-End",
        vec![
            b.size_areas.clone(),
            derive(&b.size_areas, |p| {
                p.declare_integer("begin");
            }),
        ],
    );

    c.insert(
        "/Minesweeper",
        vec![
            derive(&b.rc, |p| {
                p.declare_integer("mines");
            }),
            derive(&b.size, |p| {
                p.declare_integer("mines");
            }),
        ],
    );

    c.insert(
        "/Schlange/Akkara",
        vec![derive(&b.size, |p| {
            p.declare_string("nlabels");
        })],
    );

    c.insert(
        "/Ziegelmauer",
        vec![derive(&b.size, |p| {
            p.declare_string("areas");
        })],
    );

    c.insert("/Fillodoku", vec![derive(&b.size, presets::add_pattern)]);
}

// =============================================================================
// Sudoku
// =============================================================================

fn sudoku(c: &mut Catalog, b: &Bases) {
    // Size or rows/cols cover almost all; some files give no grid size at all
    let mut literal = Parser::default();
    presets::add_common(&mut literal);
    literal
        .declare_grid("problem", GridSpec::new(9, 9))
        .declare_grid("solution", GridSpec::new(9, 9));
    c.insert(
        "/Sudoku",
        vec![
            derive(&b.size, |p| {
                presets::add_pattern(p);
                // some have an empty areas property
                p.declare_flag("areas");
            }),
            derive(&b.rc, |p| {
                presets::add_pattern(p);
                p.declare_flag("areas");
            }),
            literal,
        ],
    );

    c.insert(
        "/Sudoku/Killer",
        vec![
            derive(&b.size_areas, presets::add_pattern),
            derive(&b.rc_areas, presets::add_pattern),
        ],
    );

    let size_pattern = derive(&b.size, presets::add_pattern);
    c.insert("/Sudoku/Kropki", vec![size_pattern.clone()]);
    c.insert("/Sudoku/Randsummen", vec![size_pattern.clone()]);

    c.insert(
        "/Sudoku/Magic-Number",
        vec![derive(&b.size, |p| {
            p.declare_grid("clues", GridSpec::new("size", "size"))
                .declare_integer("magic");
        })],
    );

    c.insert(
        "/Sudoku/Vergleich",
        vec![derive(&size_pattern, |p| {
            p.declare_grid("clues", GridSpec::new("size", "size"));
        })],
    );
}

// =============================================================================
// Text Blocks
// =============================================================================

fn text_blocks(c: &mut Catalog, b: &Bases) -> Result<(), regex::Error> {
    // Lines up to the "solution" property, which ends in `n`
    let until_solution = LineMatcher::regex(r"^.*[^n]$")?;
    // Lines up to the "moves" or "end" line
    let until_moves_or_end = LineMatcher::regex(r"^.*[^sd]$")?;
    // Lines of at least four characters
    let long_lines = LineMatcher::regex(r"^.+...$")?;

    c.insert(
        "/Rechengitter",
        vec![derive(&b.size, |p| {
            p.undeclare("problem");
            p.declare_block("problem", until_solution.clone())
                .declare_flag("negative");
        })],
    );

    c.insert(
        "/Symbolrechnen",
        vec![derive(&b.rc, |p| {
            p.undeclare("problem");
            p.undeclare("solution");
            p.declare_block("problem", until_solution.clone())
                .declare_block("solution", until_moves_or_end.clone());
        })],
    );

    c.insert(
        "/Zitatemix",
        vec![derive(&b.rc, |p| {
            p.undeclare("solution");
            p.declare_block("solution", long_lines.clone());
        })],
    );

    Ok(())
}

// =============================================================================
// Tables
// =============================================================================

use Base::*;

/// Categories that use base parsers unchanged.
const PLAIN: &[(&str, &[Base])] = &[
    ("/Airando", &[Size]),
    ("/Aisuban", &[SizeAreas, RcAreas]),
    ("/Akari", &[Size, Rc]),
    ("/Anglers", &[Size, Rc]),
    ("/Aqre", &[SizeAreas]),
    ("/Araf", &[Size, Rc]),
    ("/Armyants", &[SizeAreas, RcAreas]),
    ("/Arukone", &[Size, Rc]),
    ("/Arukone-2", &[Size, Rc]),
    ("/Arukone-3", &[Size, Rc]),
    ("/Bosanowa", &[Size, Rc]),
    ("/Campixu", &[RcAreas]),
    ("/Canal-View", &[Size]),
    ("/Castle-Wall", &[Size, Rc]),
    ("/Chocona", &[SizeAreas, RcAreas]),
    ("/Compass", &[Size]),
    ("/Corral", &[Size, Rc]),
    ("/Country-Road", &[SizeAreas, RcAreas]),
    ("/Curving-Road", &[Size]),
    ("/Detour", &[SizeAreas, RcAreas]),
    ("/Different-Neighbors", &[SizeAreas]),
    ("/Dominion", &[Size]),
    ("/Dominos", &[Rc]),
    ("/Doppelblock", &[RcLabels1]),
    ("/Dosun-Fuwari", &[SizeAreas, RcAreas]),
    ("/Double-Back", &[SizeAreas, RcAreas]),
    ("/Dutch-Loop", &[Size]),
    ("/Ebony-Ivory", &[SizeLabels2, RcLabels2]),
    ("/Eins-bis-X", &[SizeAreasLabels1]),
    ("/Entry-Exit", &[SizeAreas]),
    ("/Eulero", &[Size]),
    ("/Factors", &[SizeAreas]),
    ("/Fillomino", &[Size, Rc]),
    ("/Firumatto", &[Size]),
    ("/Fobidoshi", &[Size]),
    ("/Foseruzu", &[Size, Rc]),
    ("/Fuzuli", &[Size]),
    ("/Galaxien", &[Size, Rc]),
    ("/Gappy", &[RcLabels1, SizeLabels1]),
    ("/Geradeweg", &[Size]),
    ("/Grades", &[SizeLabels2]),
    ("/Grand-Tour", &[Size]),
    ("/Gyokuseki", &[SizeLabels2]),
    ("/Hakoiri", &[SizeAreas]),
    ("/Hakyuu", &[SizeAreas, RcAreas]),
    ("/Hamusando", &[SizeLabels1]),
    ("/Hanare", &[SizeAreas]),
    ("/Hashi", &[Size, Rc]),
    ("/Hashi-2", &[Size, Rc]),
    ("/Hebi-Ichigo", &[Size, Rc]),
    ("/Herugolf", &[Size, Rc]),
    ("/Heyawake", &[RcAreas, SizeAreas]),
    ("/Heyawake/AYE", &[RcAreas, SizeAreas]),
    ("/Heyawake/AYE-2", &[RcAreas, SizeAreas]),
    ("/Hidoku", &[Size]),
    ("/Hitori", &[Rc, Size]),
    ("/Irasuto", &[Size]),
    ("/Japanische-Summen", &[Size]),
    ("/Juosan", &[SizeAreas, RcAreas]),
    ("/Kaero", &[SizeAreas, RcAreas]),
    ("/Kakuro", &[Rc, Size]),
    ("/Kapetto", &[Size]),
    ("/Kendoku", &[SizeAreas]),
    ("/Ketten", &[Size, Rc]),
    ("/Kinkonkan", &[SizeAreasLabels2]),
    ("/Knickweg", &[SizeLabels1]),
    ("/Knossos", &[Size]),
    ("/Koburin", &[Size]),
    ("/Kojun", &[SizeAreas]),
    ("/Kuromasu", &[Rc, Size]),
    ("/Kuroshiro", &[Size]),
    ("/Kuroshuto", &[Size]),
    ("/Kurotto", &[Size, Rc]),
    ("/Lateinische-Summen", &[Size, Rc]),
    ("/Leuchttuerme", &[Rc, Size]),
    ("/Licht-Schatten", &[Size]),
    ("/Linesweeper", &[Size, Rc]),
    ("/LITS", &[RcAreas, SizeAreas]),
    ("/Maeander", &[Size, Rc]),
    ("/Maeanderzahlen", &[SizeAreas]),
    ("/Magnete", &[SizeAreasLabels2]),
    ("/Makaro", &[SizeAreas]),
    ("/Masyu", &[Size, Rc]),
    ("/Masyu-2", &[Rc]),
    ("/Mauerbau", &[Size, Rc]),
    ("/Meadows", &[Size]),
    ("/Milchtee", &[Size]),
    ("/Mintonette", &[Size]),
    ("/Mochikoro", &[Size]),
    ("/Mochinyoro", &[Size, Rc]),
    ("/Moonsun", &[SizeAreas, RcAreas]),
    ("/Mosaik", &[Rc, Size]),
    ("/Nachbarn", &[Size, Rc]),
    ("/Nanbaboru", &[Size]),
    ("/Nanro", &[SizeAreas]),
    ("/Nanro/Double", &[SizeAreas]),
    ("/Nanro/Doubleback", &[SizeAreas]),
    ("/Nanro/Loop", &[SizeAreas]),
    ("/Nanro/Odd-Even", &[SizeAreas]),
    ("/Nawabari", &[Size]),
    ("/Nondango", &[SizeAreas, RcAreas]),
    ("/Norinori", &[SizeAreas, RcAreas]),
    ("/Nuribou", &[Size]),
    ("/Nurikabe", &[Rc, Size]),
    ("/Nurikabe-Pairs", &[Size]),
    ("/Nurimaze", &[SizeAreas, RcAreas]),
    ("/Nurimaze/Domino", &[SizeAreas]),
    ("/Nurimaze/Forbidden-Four", &[SizeAreas]),
    ("/Nurimisaki", &[Size]),
    ("/Oasis", &[Size]),
    ("/Patchwork", &[SizeAreas]),
    ("/Peintoeria", &[SizeAreas]),
    ("/Pfeilnetz", &[Size]),
    ("/Pipelink", &[Size, Rc]),
    ("/Putteria", &[SizeAreas, RcAreas]),
    ("/Raitonanba", &[Size]),
    ("/Reflect", &[Size, Rc]),
    ("/Regenwolken", &[Size]),
    ("/Rekuto", &[Size]),
    ("/Renban", &[SizeAreas]),
    ("/Renkatsu", &[Size]),
    ("/Roma", &[SizeAreas]),
    ("/Rukkuea", &[Size]),
    ("/Rundreise", &[Size, Rc]),
    ("/Sashigane", &[Size, Rc]),
    ("/Sashikabe", &[Size]),
    ("/Satogaeri", &[SizeAreas]),
    ("/Schlange", &[SizeLabels1]),
    ("/Schlangenlinie", &[Rc, Size]),
    ("/Scrin", &[Size, Rc]),
    ("/Seek-Numbers", &[Rc]),
    ("/Serpentominos", &[Rc]),
    ("/Shakashaka", &[Size, Rc]),
    ("/Shimaguni", &[SizeAreas]),
    ("/Shingoki", &[Size]),
    ("/Shirokuro", &[Size]),
    ("/Shugaku", &[Size, Rc]),
    ("/Sikaku", &[Rc, Size]),
    ("/Slitherlink", &[Rc, Size]),
    ("/Snake-Pit", &[Size, Rc]),
    ("/Spotlight", &[Size]),
    ("/SquarO", &[Size]),
    ("/Sternenhaufen", &[Size]),
    ("/Sternenhimmel", &[SizeLabels1, RcLabels1]),
    ("/Sternennacht", &[RcLabels1]),
    ("/Sternenschlacht", &[SizeAreas]),
    ("/Stitches", &[SizeAreasLabels1]),
    ("/Stostone", &[SizeAreas, RcAreas]),
    ("/Straights", &[Size]),
    ("/Sudoku/2D", &[Size]),
    ("/Sudoku/Butterfly", &[Size]),
    ("/Sudoku/Chaos", &[SizeAreas]),
    ("/Sudoku/Clueless-1", &[Size]),
    ("/Sudoku/Clueless-2", &[Size]),
    ("/Sudoku/Flower", &[Size]),
    ("/Sudoku/Gattai-8", &[Rc]),
    ("/Sudoku/Konsekutiv", &[Size]),
    ("/Sudoku/Odd-Even", &[Size]),
    ("/Sudoku/Samurai", &[Size]),
    ("/Sudoku/Shogun", &[Rc]),
    ("/Sudoku/Sohei", &[Size]),
    ("/Sudoku/Sumo", &[Size]),
    ("/Sudoku/Windmill", &[Size]),
    ("/Sudoku/Wolkenkratzer", &[Size]),
    ("/Suguru", &[SizeAreas]),
    ("/Sukaku", &[Size, SizeAreas]),
    ("/Sukima", &[Size]),
    ("/Sukoro", &[Size]),
    ("/Sukrokuro", &[Size]),
    ("/Sumdoku", &[SizeAreas]),
    ("/Suraido", &[Size]),
    ("/Suraromu", &[Size, Rc]),
    ("/Tairupeinto", &[SizeAreasLabels1]),
    ("/Tapa", &[Size, Rc]),
    ("/Tapa/1-to-N", &[Size]),
    ("/Tapa/Islands", &[Size]),
    ("/Tapa/Yin-Yang", &[Size]),
    ("/Tasukuea", &[Size]),
    ("/Tatamibari", &[Size]),
    ("/Tateboo-Yokoboo", &[Size, Rc]),
    ("/Terra-X", &[SizeAreas]),
    ("/Tetroid", &[Size]),
    ("/Tohu-Wa-Vohu", &[Size]),
    ("/Toichika", &[SizeAreas]),
    ("/Trace-Numbers", &[Rc]),
    ("/Trilogik", &[Size]),
    ("/Trinudo", &[Size]),
    ("/Tripletts", &[RcAreas, SizeAreas]),
    ("/Tueren", &[Size]),
    ("/Usoone", &[SizeAreas]),
    ("/Usotatami", &[Size]),
    ("/Vier-Winde", &[Size]),
    ("/View", &[Size]),
    ("/Wolkenkratzer", &[SizeLabels2]),
    ("/Wolkenkratzer-2", &[SizeLabels2]),
    ("/Yagit", &[Size]),
    ("/Yajikabe", &[Size]),
    ("/Yajilin", &[Size, Rc]),
    ("/Yajilin-Regional", &[SizeAreas, RcAreas]),
    ("/Yajisan-Kazusan", &[Size, Rc]),
    ("/Yakuso", &[Size, Rc]),
    ("/Yin-Yang", &[Size]),
    ("/Yonmasu", &[Size]),
    ("/Yosenabe", &[SizeAreas]),
    ("/Zahlenkreuz", &[SizeLabels1]),
    ("/Zahlenschlange", &[Size]),
    ("/Zehnergitter", &[Rc]),
    ("/Zeltlager", &[Size, Rc]),
    ("/Zeltlager-2", &[Size]),
    ("/Zipline", &[Rc]),
    ("/Zwischenknick", &[Size]),
];

/// Categories sharing another category's candidates.
const ALIASES: &[(&str, &str)] = &[
    ("/Battleships-Digital", "/Battleships"),
    ("/Battleships-Retrograde", "/Battleships"),
    ("/Nanro/Signpost", "/Nanro/Litro"),
    ("/Nonograms", "/Nonogramme"),
    ("/Schlange/Knight", "/Schlange/Akkara"),
    ("/Sudoku-Kropki", "/Sudoku/Kropki"),
    ("/Sudoku-Odd-Even", "/Sudoku/Odd-Even"),
    ("/Sudoku-Randsummen", "/Sudoku/Randsummen"),
];

/// Sorted.
const UNPARSED: &[&str] = &[
    "/",
    "/Aisurom",
    "/Alphametics",
    "/Alphametics/Additionen",
    "/Alphametics/Goetter",
    "/Alphametics/Klassisch",
    "/Alphametics/Loy",
    "/Alphametics/Metamatik",
    "/Alphametics/Wurzeln",
    "/Altay",
    "/Amibo",
    "/Analogien",
    "/Autoren",
    "/Banzu",
    "/Battleships-Lighthouses",
    "/Begriffe",
    "/Biographien",
    "/Blackbox",
    "/Bleistifte",
    "/Bodaburokku",
    "/Bogdan",
    "/Bolota",
    "/Bonsan",
    "/Branqueta",
    "/Carroll",
    "/Chatroom",
    "/Chokuhashi",
    "/Chronik",
    "/Cross-The-Streams",
    "/Diogenes",
    "/Doppel-Schokolade",
    "/Doughnut",
    "/Ekici",
    "/Friedman",
    "/Friedman/img",
    "/Gedichte",
    "/Gedichte/04",
    "/Gedichte/07",
    "/Gedichte/08",
    "/Gedichte/10",
    "/H2O",
    "/Hiroimono",
    "/Hitori-Ribashi",
    "/Ichimaga",
    "/International-Borders",
    "/Kalkulu",
    "/Kanjo",
    "/Karakiri",
    "/Kazunori",
    "/Kreuzzahlen",
    "/Kuroclone",
    "/LMI",
    "/Lagioia",
    "/Laterale",
    "/Literatur",
    "/Logicals",
    "/Logik",
    "/Mainarizumu",
    "/Manekingeto",
    "/Mathematik",
    "/Mejirinku",
    "/Milchkaffee",
    "/Mittelweg",
    "/Molekularis",
    "/Nagareru",
    "/Nagewawa",
    "/Nanro/Hex",
    "/Nikoli",
    "/Nikoli/img",
    "/Nishiyama",
    "/Null-Zwei-Fuenf",
    "/OAPC",
    "/Out-Of-Sight",
    "/Pathfinder",
    "/Peeters",
    "/Pentominos",
    "/Physik",
    "/Polyominos",
    "/Portugalov",
    "/Rectslider",
    "/Renban-Madoguchi",
    "/Saltatori",
    "/Sashikaku",
    "/Sphinx",
    "/Stained-Glass",
    "/Statue-Park",
    "/Sudoku/Subset",
    "/Summandum",
    "/Takahiko",
    "/Targets",
    "/Tawa",
    "/Triplace",
    "/Trivia",
    "/Um-Die-Ecke-Gedacht",
    "/Vermischtes",
    "/WPF",
    "/Wortwandlung",
    "/Zahlenpfad",
    "/Zeiger",
    "/img",
    "/img2",
];

#[cfg(test)]
mod tests {
    use super::*;
    use xjanko_core::{parse_with_candidates, NullSink, Value};

    fn quiet(candidates: &[Parser]) -> Vec<Parser> {
        candidates.iter().map(|p| p.clone().with_sink(NullSink)).collect()
    }

    fn accept(category: &str, input: &str) -> (usize, xjanko_core::Record) {
        let catalog = Catalog::builtin().unwrap();
        let candidates = quiet(catalog.get(category).unwrap());
        let accepted = parse_with_candidates(&candidates, input).unwrap();
        (accepted.index, accepted.record)
    }

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), PLAIN.len() + ALIASES.len() + 47);
        assert_eq!(catalog.len(), 266);
        assert_eq!(catalog.get("/Sudoku").map(<[_]>::len), Some(3));
        assert_eq!(catalog.get("/Mastermind").map(<[_]>::len), Some(3));
        assert!(catalog.get("/Nowhere").is_none());
    }

    #[test]
    fn test_plain_entries_do_not_collide_with_specialized() {
        let catalog = Catalog::builtin().unwrap();
        for (category, bases) in PLAIN {
            assert_eq!(catalog.get(category).map(<[_]>::len), Some(bases.len()), "{category}");
        }
    }

    #[test]
    fn test_subcategories_present() {
        let catalog = Catalog::builtin().unwrap();
        for category in [
            "/Slitherlink",
            "/Tapa",
            "/Tapa/1-to-N",
            "/Tapa/Islands",
            "/Tapa/Yin-Yang",
            "/Yajilin",
            "/Sikaku",
            "/Shakashaka",
            "/Wolkenkratzer",
            "/Sudoku/Killer",
            "/Sudoku/Samurai",
            "/Heyawake/AYE-2",
        ] {
            assert!(catalog.contains(category), "{category}");
        }
    }

    #[test]
    fn test_aliases_share_candidates() {
        let catalog = Catalog::builtin().unwrap();
        for (category, target) in ALIASES {
            let a = catalog.get(category).unwrap();
            let b = catalog.get(target).unwrap();
            assert!(std::ptr::eq(a, b), "{category}");
        }
    }

    #[test]
    fn test_alias_to_unknown_target() {
        let mut catalog = Catalog::new();
        assert!(!catalog.alias("/A", "/B"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_unparsed_directories() {
        assert!(UNPARSED.windows(2).all(|w| w[0] < w[1]));
        assert!(is_unparsed("/"));
        assert!(is_unparsed("/Sudoku/Subset"));
        assert!(!is_unparsed("/Sudoku"));
    }

    #[test]
    fn test_sudoku_without_size_falls_back_to_literal() {
        let row = "1 2 3 4 5 6 7 8 9\n";
        let input = format!("begin\npuzzle sudoku\nproblem\n{}end\n", row.repeat(9));

        let (index, record) = accept("/Sudoku", &input);

        assert_eq!(index, 2);
        assert_eq!(record.get("problem").and_then(Value::as_grid).map(<[_]>::len), Some(9));
    }

    #[test]
    fn test_killer_sudoku_areas_and_pattern() {
        let input = "begin\nsize 4\npatternx 2\npatterny 2\nproblem\n- - - -\n- - - -\n\
                     - - - -\n- - - -\nareas\na a b b\na c c b\nd c e e\nd d e e\nend\n";

        let (index, record) = accept("/Sudoku/Killer", input);

        assert_eq!(index, 0);
        assert_eq!(record.get("patternx"), Some(&Value::Int(2)));
        assert!(record.get("areas").and_then(Value::as_grid).is_some());
    }

    #[test]
    fn test_magic_number_sudoku() {
        let input = "begin\nsize 2\nmagic 3\nclues\n1 -\n- 2\nend\n";

        let (_, record) = accept("/Sudoku/Magic-Number", input);

        assert_eq!(record.get("magic"), Some(&Value::Int(3)));
        assert_eq!(record.get("clues").and_then(Value::as_grid).map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_vergleich_sudoku_adds_pattern_and_clues() {
        let catalog = Catalog::builtin().unwrap();
        let plain = quiet(catalog.get("/Sudoku/Samurai").unwrap());
        let input = "begin\nsize 1\npattern 1\nclues\nx\nend\n";

        assert!(parse_with_candidates(&plain, input).is_err());
        assert_eq!(accept("/Sudoku/Vergleich", input).1.len(), 3);
    }

    #[test]
    fn test_kakurasu_integer_on_begin_line() {
        let input = "begin 7\nrows 2\ncols 2\nrlabels\n1 2\nclabels\n3 4\nend\n";

        let (index, record) = accept("/Kakurasu", input);

        assert_eq!(index, 2);
        assert_eq!(record.get("begin"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_symbolrechnen_blocks() {
        let input = "begin\nrows 2\ncols 2\nproblem\nAB + C = D\nE - F = G\nsolution\n\
                     A=1 B=2\nend\n";

        let (_, record) = accept("/Symbolrechnen", input);

        assert_eq!(
            record.get("problem").and_then(Value::as_str),
            Some("AB + C = DE - F = G")
        );
        assert_eq!(record.get("solution").and_then(Value::as_str), Some("A=1 B=2"));
    }
}
