use std::fmt;

use crate::constants::{DEFAULT_COLS, DEFAULT_ROWS};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum CellStatus {
    #[default]
    Open,
    Wall,
    Visited,
    OutOfBounds, // Reported for coordinates off the board; never stored.
}

/// Cell access used by the path search.
///
/// Reads off the board report `CellStatus::OutOfBounds` and writes off the
/// board do nothing, so callers can probe neighbours without bounds checks.
pub trait Grid {
    fn status(&self, coord: Coord) -> CellStatus;
    fn set_status(&mut self, coord: Coord, status: CellStatus);
    fn dimensions(&self) -> (i32, i32);

    fn contains(&self, coord: Coord) -> bool {
        let (rows, cols) = self.dimensions();
        coord.row >= 0 && coord.row < rows && coord.col >= 0 && coord.col < cols
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    MissingSize,
    InvalidSize { rows: i32, cols: i32 },
    OutOfMemory,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::MissingSize => write!(f, "board file does not start with a size"),
            BoardError::InvalidSize { rows, cols } => {
                write!(f, "invalid game board size {} x {}", rows, cols)
            }
            BoardError::OutOfMemory => write!(f, "not enough memory to allocate the board"),
        }
    }
}

impl std::error::Error for BoardError {}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: Vec<Vec<CellStatus>>,
    rows: i32,
    cols: i32,
}

impl Board {
    pub fn new(rows: i32, cols: i32) -> Result<Self, BoardError> {
        if rows <= 0 || cols <= 0 {
            return Err(BoardError::InvalidSize { rows, cols });
        }

        let mut grid = Vec::new();
        grid.try_reserve_exact(rows as usize)
            .map_err(|_| BoardError::OutOfMemory)?;

        for _ in 0..rows {
            let mut row = Vec::new();
            row.try_reserve_exact(cols as usize)
                .map_err(|_| BoardError::OutOfMemory)?;
            row.resize(cols as usize, CellStatus::Open);
            grid.push(row);
        }

        Ok(Self { grid, rows, cols })
    }

    /// Reads a board in the `rows cols` then `row col` per wall format.
    ///
    /// Walls are read until the first token that isn't an integer, or until a
    /// coordinate is left without its partner. Walls off the board are ignored.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut numbers = text.split_whitespace().map(str::parse::<i32>);

        let (rows, cols) = match (numbers.next(), numbers.next()) {
            (Some(Ok(rows)), Some(Ok(cols))) => (rows, cols),
            _ => return Err(BoardError::MissingSize),
        };

        let mut board = Board::new(rows, cols)?;

        while let (Some(Ok(row)), Some(Ok(col))) = (numbers.next(), numbers.next()) {
            board.set_status(Coord::new(row, col), CellStatus::Wall);
        }

        Ok(board)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The bottom-right cell.
    pub fn far_corner(&self) -> Coord {
        Coord::new(self.rows - 1, self.cols - 1)
    }

    pub fn count(&self, status: CellStatus) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == status)
            .count()
    }

    pub fn log(&self) -> String {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&cell| match cell {
                        CellStatus::Wall => 'X',
                        CellStatus::Visited => '0',
                        CellStatus::Open | CellStatus::OutOfBounds => '.',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn index(&self, coord: Coord) -> Option<(usize, usize)> {
        if self.contains(coord) {
            Some((coord.row as usize, coord.col as usize))
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            grid: vec![vec![CellStatus::Open; DEFAULT_COLS as usize]; DEFAULT_ROWS as usize],
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl Grid for Board {
    fn status(&self, coord: Coord) -> CellStatus {
        match self.index(coord) {
            Some((row, col)) => self.grid[row][col],
            None => CellStatus::OutOfBounds,
        }
    }

    fn set_status(&mut self, coord: Coord, status: CellStatus) {
        if status == CellStatus::OutOfBounds {
            return;
        }
        if let Some((row, col)) = self.index(coord) {
            self.grid[row][col] = status;
        }
    }

    fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
