use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::legend::Legend;

/// What a cell of the map is
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Open,
    /// traversable, where the route begins
    Start,
    /// traversable, where the route ends
    Finish,
    Blocked,
}

impl Kind {
    pub fn is_traversable(&self) -> bool {
        !matches!(self, Kind::Blocked)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Legend::default().symbol_of(*self))
    }
}

/// A single position of the map. Two cells with the same coordinates and kind are interchangeable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub kind: Kind,
}

impl Cell {
    pub fn new(row: usize, col: usize, kind: Kind) -> Self {
        Self { row, col, kind }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@({}, {})", self.kind, self.row, self.col)
    }
}

/// A rectangular grid of cells read from map text.
///
/// Rows are expected to be of equal length. Nothing checks this: a ragged map is simply clipped
/// row by row when looking up neighbours.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Read a map using the default legend (`.` open, `S` start, `X` finish, `B` blocked)
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &Legend::default())
    }

    /// Read a map, classifying every character with the provided legend
    pub fn parse_with(text: &str, legend: &Legend) -> Result<Self> {
        let mut cells = Vec::new();

        for (row, line) in text.lines().enumerate() {
            let mut cells_row = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                let kind = legend
                    .kind_of(symbol)
                    .ok_or(RouteError::Parse { symbol, row, col })?;
                cells_row.push(Cell::new(row, col, kind));
            }
            cells.push(cells_row);
        }

        Ok(Self {
            rows: cells.len(),
            columns: cells.first().map_or(0, |r| r.len()),
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The cell at the given position, `None` if outside the map
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Returns the first cell of the given kind in row-major order
    pub fn find(&self, kind: Kind) -> Option<Cell> {
        self.iter().find(|c| c.kind == kind)
    }

    /// Returns the (up to 8) cells surrounding the given one, including diagonals.
    /// Positions outside the map are left out, blocked cells are not.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let mut points = Vec::with_capacity(8);

        for row in cell.row.saturating_sub(1)..=cell.row + 1 {
            for col in cell.col.saturating_sub(1)..=cell.col + 1 {
                if row == cell.row && col == cell.col {
                    continue;
                }
                if let Some(n) = self.get(row, col) {
                    points.push(n);
                }
            }
        }

        points.into_iter()
    }

    /// Create a storage holding one value of type T per cell
    pub fn create_storage<T: Default + Clone>(&self) -> CellStorage<T> {
        CellStorage(
            self.cells
                .iter()
                .map(|row| vec![T::default(); row.len()])
                .collect(),
        )
    }
}

impl FromStr for Grid {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.kind)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Per-cell scratch values shaped like the grid that created it (a vec in a vec)
#[derive(Debug, Clone)]
pub struct CellStorage<T>(Vec<Vec<T>>);

impl<T> CellStorage<T> {
    pub fn get(&self, cell: Cell) -> &T {
        &self.0[cell.row][cell.col]
    }

    pub fn get_mut(&mut self, cell: Cell) -> &mut T {
        &mut self.0[cell.row][cell.col]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn create_basic_grid() -> Grid {
        "S..B\n.B..\n...X".parse().unwrap()
    }

    #[test]
    fn test_parse_classifies_cells() {
        let grid = create_basic_grid();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.get(0, 0), Some(Cell::new(0, 0, Kind::Start)));
        assert_eq!(grid.get(0, 3), Some(Cell::new(0, 3, Kind::Blocked)));
        assert_eq!(grid.get(1, 0), Some(Cell::new(1, 0, Kind::Open)));
        assert_eq!(grid.get(2, 3), Some(Cell::new(2, 3, Kind::Finish)));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        assert_eq!(
            Grid::parse("S.\n.Y"),
            Err(RouteError::Parse {
                symbol: 'Y',
                row: 1,
                col: 1
            })
        );
        assert!(matches!(
            Grid::parse("S#\n#X"),
            Err(RouteError::Parse { symbol: '#', .. })
        ));
    }

    #[test]
    fn test_parse_accepts_crlf_and_trailing_newline() {
        let grid = Grid::parse("S.\r\n.X\r\n").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.find(Kind::Finish), Some(Cell::new(1, 1, Kind::Finish)));
    }

    #[test]
    fn test_parse_with_custom_legend() {
        let legend = Legend {
            blocked: '#',
            ..Default::default()
        };
        let grid = Grid::parse_with("S#\n#X", &legend).unwrap();
        assert_eq!(grid.get(0, 1).map(|c| c.kind), Some(Kind::Blocked));
        assert!(Grid::parse_with("S.\n.X", &legend).is_ok());
        assert!(Grid::parse_with("SB\nBX", &legend).is_err());
    }

    #[test]
    fn test_find_is_row_major() {
        let grid = Grid::parse("..S\nS.X").unwrap();
        assert_eq!(grid.find(Kind::Start), Some(Cell::new(0, 2, Kind::Start)));
        assert_eq!(grid.find(Kind::Blocked), None);
        assert_eq!(Grid::parse("").unwrap().find(Kind::Start), None);
    }

    #[test]
    fn test_neighbors_clipped_to_bounds() {
        let grid = create_basic_grid();

        let corner: Vec<Cell> = grid.neighbors(grid.get(0, 0).unwrap()).collect();
        assert_eq!(
            corner,
            vec![
                Cell::new(0, 1, Kind::Open),
                Cell::new(1, 0, Kind::Open),
                Cell::new(1, 1, Kind::Blocked),
            ]
        );

        let middle: Vec<Cell> = grid.neighbors(grid.get(1, 1).unwrap()).collect();
        assert_eq!(middle.len(), 8);
        assert!(!middle.contains(&Cell::new(1, 1, Kind::Blocked)));
        assert!(middle
            .iter()
            .all(|n| n.row.abs_diff(1).max(n.col.abs_diff(1)) == 1));

        let edge: Vec<Cell> = grid.neighbors(grid.get(2, 3).unwrap()).collect();
        assert_eq!(edge.len(), 3);
    }

    #[test]
    fn test_display_round_trip() {
        let text = "S..B\n.B..\n...X\n";
        let grid = Grid::parse(text).unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_storage_matches_shape() {
        let grid = create_basic_grid();
        let mut storage: CellStorage<Option<u32>> = grid.create_storage();
        let finish = grid.find(Kind::Finish).unwrap();
        assert_eq!(*storage.get(finish), None);
        *storage.get_mut(finish) = Some(3);
        assert_eq!(*storage.get(finish), Some(3));
    }
}
