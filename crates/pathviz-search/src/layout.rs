//! Plain-text grid descriptions.
//!
//! A [`Layout`] is parsed from lines of equal width using this legend:
//!
//! | char | meaning |
//! |---|---|
//! | `.` | open cell |
//! | `#` | wall |
//! | `~` | weighted cell |
//! | `S` | source |
//! | `D` | destination |
//!
//! Leading and trailing whitespace is ignored, both around the whole text
//! and on each line. A layout is replayed onto a [`Grid`] or a
//! [`Workbench`] through their public mutators.

use pathviz_core::Point;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::workbench::Workbench;

/// What occupies a layout position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Open,
    Wall,
    Weight,
}

/// A parsed text grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rows: i32,
    columns: i32,
    tiles: Vec<Tile>,
    source: Option<Point>,
    destination: Option<Point>,
}

impl Layout {
    /// Parse a layout. See the module documentation for the format.
    pub fn parse(s: &str) -> Result<Self> {
        let mut tiles = Vec::new();
        let mut source = None;
        let mut destination = None;
        let mut columns: Option<usize> = None;
        let mut rows = 0;

        for (y, line) in s.trim().lines().enumerate() {
            let line = line.trim();
            let mut width = 0;
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let tile = match ch {
                    '.' => Tile::Open,
                    '#' => Tile::Wall,
                    '~' => Tile::Weight,
                    'S' => {
                        if source.replace(pos).is_some() {
                            return Err(Error::DuplicateEndpoint('S'));
                        }
                        Tile::Open
                    }
                    'D' => {
                        if destination.replace(pos).is_some() {
                            return Err(Error::DuplicateEndpoint('D'));
                        }
                        Tile::Open
                    }
                    _ => return Err(Error::InvalidRune { ch, pos }),
                };
                tiles.push(tile);
                width += 1;
            }
            match columns {
                None => columns = Some(width),
                Some(w) if w != width => return Err(Error::InconsistentSize { line: y + 1 }),
                Some(_) => {}
            }
            rows += 1;
        }

        Ok(Self {
            rows,
            columns: columns.unwrap_or(0) as i32,
            tiles,
            source,
            destination,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn source(&self) -> Option<Point> {
        self.source
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    /// The tile at `p`, or `None` outside the layout.
    pub fn tile(&self, p: Point) -> Option<Tile> {
        if p.x < 0 || p.y < 0 || p.x >= self.columns || p.y >= self.rows {
            return None;
        }
        Some(self.tiles[(p.y * self.columns + p.x) as usize])
    }

    /// A fresh grid of the layout's size with the layout applied.
    pub fn to_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.rows, self.columns);
        self.apply(&mut grid)?;
        Ok(grid)
    }

    /// Clear `grid` and replay the layout onto it. The grid must be at
    /// least as large as the layout; if it is not, `OutOfBounds` is
    /// returned and the grid is left untouched.
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        self.replay(grid)
    }

    /// Clear every grid in `bench` and replay the layout onto all of them.
    pub fn apply_to(&self, bench: &mut Workbench) -> Result<()> {
        self.replay(bench)
    }

    fn replay<T: Editable>(&self, target: &mut T) -> Result<()> {
        let (rows, columns) = target.bounds();
        if self.rows > rows || self.columns > columns {
            return Err(Error::OutOfBounds {
                pos: Point::new(self.columns - 1, self.rows - 1),
                rows,
                columns,
            });
        }
        target.clear();
        for (i, tile) in self.tiles.iter().enumerate() {
            let p = Point::new(i as i32 % self.columns, i as i32 / self.columns);
            match tile {
                Tile::Open => {}
                Tile::Wall => target.toggle_wall(p)?,
                Tile::Weight => target.toggle_weight(p)?,
            }
        }
        if let Some(p) = self.source {
            target.set_source(p)?;
        }
        if let Some(p) = self.destination {
            target.set_destination(p)?;
        }
        Ok(())
    }
}

/// Anything a layout can be replayed onto.
trait Editable {
    /// `(rows, columns)`.
    fn bounds(&self) -> (i32, i32);
    fn clear(&mut self);
    fn toggle_wall(&mut self, p: Point) -> Result<()>;
    fn toggle_weight(&mut self, p: Point) -> Result<()>;
    fn set_source(&mut self, p: Point) -> Result<()>;
    fn set_destination(&mut self, p: Point) -> Result<()>;
}

impl Editable for Grid {
    fn bounds(&self) -> (i32, i32) {
        (self.rows(), self.columns())
    }
    fn clear(&mut self) {
        Grid::clear(self)
    }
    fn toggle_wall(&mut self, p: Point) -> Result<()> {
        Grid::toggle_wall(self, p)
    }
    fn toggle_weight(&mut self, p: Point) -> Result<()> {
        Grid::toggle_weight(self, p)
    }
    fn set_source(&mut self, p: Point) -> Result<()> {
        Grid::set_source(self, p)
    }
    fn set_destination(&mut self, p: Point) -> Result<()> {
        Grid::set_destination(self, p)
    }
}

impl Editable for Workbench {
    fn bounds(&self) -> (i32, i32) {
        (self.rows(), self.columns())
    }
    fn clear(&mut self) {
        Workbench::clear(self)
    }
    fn toggle_wall(&mut self, p: Point) -> Result<()> {
        Workbench::toggle_wall(self, p)
    }
    fn toggle_weight(&mut self, p: Point) -> Result<()> {
        Workbench::toggle_weight(self, p)
    }
    fn set_source(&mut self, p: Point) -> Result<()> {
        Workbench::set_source(self, p)
    }
    fn set_destination(&mut self, p: Point) -> Result<()> {
        Workbench::set_destination(self, p)
    }
}

/// Draw `grid` as text using the layout legend, plus `*` for cells on
/// `path` and `o` for other visited cells.
pub fn render(grid: &Grid, path: &[Point]) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for cell in grid.cells() {
        let p = cell.pos();
        if p.x == 0 && p.y > 0 {
            out.push('\n');
        }
        let ch = if grid.source() == Some(p) {
            'S'
        } else if grid.destination() == Some(p) {
            'D'
        } else if cell.is_wall() {
            '#'
        } else if path.contains(&p) {
            '*'
        } else if cell.is_weighted() {
            '~'
        } else if cell.is_visited() {
            'o'
        } else {
            '.'
        };
        out.push(ch);
    }
    out
}
