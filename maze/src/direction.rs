use strum::{Display, EnumIter};

use crate::board::Coord;

/// A compass move between adjacent cells, plus `None` for "nothing tried yet".
///
/// Formats as the single-letter code used in path strings (`None` formats as
/// an empty string).
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq, Hash)]
pub enum Direction {
    #[default]
    #[strum(to_string = "")]
    None,
    #[strum(to_string = "N")]
    North,
    #[strum(to_string = "E")]
    East,
    #[strum(to_string = "S")]
    South,
    #[strum(to_string = "W")]
    West,
}

impl Direction {
    /// The direction to try after `self`: none, north, east, south, west, then
    /// back to none once a cell's moves are exhausted.
    pub fn next(self) -> Direction {
        match self {
            Direction::None => Direction::North,
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::None,
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn is_compass(self) -> bool {
        self != Direction::None
    }

    /// Moves `coord` one cell in this direction. `None` leaves it where it is.
    pub fn step(self, coord: Coord) -> Coord {
        let (d_row, d_col) = match self {
            Direction::None => (0, 0),
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        };

        Coord::new(coord.row + d_row, coord.col + d_col)
    }

    pub fn from_letter(letter: char) -> Option<Direction> {
        match letter {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}
