//! Text maps parsed into a grid of [`Terrain`] cells.
//!
//! A [`TileMap`] reads one character per cell, one row per line. Rows may
//! have different lengths: columns past the end of a short row simply do not
//! exist (they are not walls), so the map's bounds are the widest row by the
//! number of rows.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};
use crate::terrain::Terrain;

/// A rectangular (possibly ragged) grid of terrain parsed from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    cells: Vec<Option<Terrain>>,
    bounds: Range,
}

impl TileMap {
    /// Parse a text map.
    ///
    /// Lines are separated by `'\n'`; a trailing `'\r'` and any trailing
    /// whitespace on a line are ignored, as are blank lines at the end of the
    /// input. Every remaining character must belong to the terrain
    /// vocabulary.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<Terrain>> = Vec::new();
        for (y, line) in s.split('\n').enumerate() {
            let line = line.trim_end();
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let Some(t) = Terrain::from_symbol(ch) else {
                    return Err(GridError::UnknownSymbol {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    });
                };
                row.push(t);
            }
            rows.push(row);
        }
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(GridError::Malformed(format!(
                "map has {height} rows and {width} columns"
            )));
        }

        let mut cells = vec![None; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, &t) in row.iter().enumerate() {
                cells[y * width + x] = Some(t);
            }
        }

        log::debug!("parsed {width}x{height} tile map");
        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width as i32, height as i32),
        })
    }

    /// The bounding range of the map (widest row × number of rows).
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width of the widest row.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The terrain at `p`, or `None` if `p` is outside the map or past the
    /// end of a short row.
    pub fn at(&self, p: Point) -> Option<Terrain> {
        if !self.bounds.contains(p) {
            return None;
        }
        self.cells[(p.y * self.width() + p.x) as usize]
    }

    /// Iterate over every existing cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Terrain)> + '_ {
        self.bounds
            .iter()
            .zip(self.cells.iter())
            .filter_map(|(p, t)| t.map(|t| (p, t)))
    }

    /// All positions holding `terrain`, in row-major order.
    pub fn find(&self, terrain: Terrain) -> impl Iterator<Item = Point> + '_ {
        self.iter().filter(move |&(_, t)| t == terrain).map(|(p, _)| p)
    }

    /// The single position holding `terrain`.
    ///
    /// Fails with [`GridError::MissingLandmark`] if no cell holds it and with
    /// [`GridError::DuplicateLandmark`] if more than one does.
    pub fn landmark(&self, terrain: Terrain) -> Result<Point, GridError> {
        let mut found = self.find(terrain);
        let first = found.next().ok_or(GridError::MissingLandmark(terrain))?;
        if let Some(second) = found.next() {
            return Err(GridError::DuplicateLandmark {
                terrain,
                first,
                second,
            });
        }
        Ok(first)
    }
}

impl FromStr for TileMap {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the map back to text, one line per row.
impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                if let Some(t) = self.at(Point::new(x, y)) {
                    write!(f, "{}", t.symbol())?;
                }
            }
        }
        Ok(())
    }
}

/// Errors that can occur while turning text into a navigable grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows or no columns.
    Malformed(String),
    /// A character outside the terrain vocabulary was found.
    UnknownSymbol { ch: char, pos: Point },
    /// No cell holds the given landmark.
    MissingLandmark(Terrain),
    /// More than one cell holds the given landmark.
    DuplicateLandmark {
        terrain: Terrain,
        first: Point,
        second: Point,
    },
    /// The position lies outside the grid.
    OutOfBounds(Point),
    /// The position holds a wall or a missing cell.
    NotWalkable(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(why) => write!(f, "malformed grid: {why}"),
            Self::UnknownSymbol { ch, pos } => {
                write!(f, "unknown terrain symbol \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingLandmark(t) => {
                write!(f, "grid has no {t} cell (\u{201c}{}\u{201d})", t.symbol())
            }
            Self::DuplicateLandmark {
                terrain,
                first,
                second,
            } => write!(
                f,
                "grid has more than one {terrain} cell: {first} and {second}"
            ),
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::NotWalkable(p) => write!(f, "position {p} is not walkable"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
A.#
.#B
...";

    #[test]
    fn parse_and_size() {
        let m = TileMap::parse(MAP).unwrap();
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 3);
        assert_eq!(m.at(Point::new(0, 0)), Some(Terrain::Start));
        assert_eq!(m.at(Point::new(2, 0)), Some(Terrain::Wall));
        assert_eq!(m.at(Point::new(2, 1)), Some(Terrain::Goal));
        assert_eq!(m.at(Point::new(3, 0)), None);
    }

    #[test]
    fn ragged_rows_leave_missing_cells() {
        let m = TileMap::parse("A...\n.\n..B").unwrap();
        assert_eq!(m.width(), 4);
        assert_eq!(m.height(), 3);
        assert_eq!(m.at(Point::new(1, 1)), None);
        assert_eq!(m.at(Point::new(3, 2)), None);
        assert_eq!(m.iter().count(), 8);
    }

    #[test]
    fn trailing_whitespace_and_crlf_are_ignored() {
        let m = TileMap::parse("A.  \r\n.B\r\n\n\n").unwrap();
        assert_eq!(m.width(), 2);
        assert_eq!(m.height(), 2);
        assert_eq!(m.to_string(), "A.\n.B");
    }

    #[test]
    fn empty_input_is_malformed() {
        for s in ["", "\n\n", "   \n"] {
            assert!(matches!(TileMap::parse(s), Err(GridError::Malformed(_))), "{s:?}");
        }
    }

    #[test]
    fn unknown_symbol_reports_position() {
        let err = TileMap::parse("A..\n.x.\n..B").unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownSymbol {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn interior_space_is_unknown() {
        let err = TileMap::parse("A . B").unwrap_err();
        assert!(matches!(err, GridError::UnknownSymbol { ch: ' ', .. }));
    }

    #[test]
    fn landmark_lookup() {
        let m: TileMap = MAP.parse().unwrap();
        assert_eq!(m.landmark(Terrain::Start), Ok(Point::new(0, 0)));
        assert_eq!(m.landmark(Terrain::Goal), Ok(Point::new(2, 1)));
        assert_eq!(
            m.landmark(Terrain::Water),
            Err(GridError::MissingLandmark(Terrain::Water))
        );
    }

    #[test]
    fn duplicate_landmark() {
        let m = TileMap::parse("A.A\n..B").unwrap();
        assert_eq!(
            m.landmark(Terrain::Start),
            Err(GridError::DuplicateLandmark {
                terrain: Terrain::Start,
                first: Point::new(0, 0),
                second: Point::new(2, 0),
            })
        );
    }

    #[test]
    fn display_round_trip() {
        let m = TileMap::parse(MAP).unwrap();
        assert_eq!(m.to_string(), MAP);
    }
}
