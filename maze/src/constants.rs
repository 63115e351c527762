use crate::board::Coord;

// Board:
pub const DEFAULT_ROWS: i32 = 5;
pub const DEFAULT_COLS: i32 = 5;
pub const START_POS: Coord = Coord::new(0, 0);

// Path strings:
pub const EXIT_DIR: &str = "S"; // The final move, taken from the exit cell to leave the board.
pub const PATH_DELIMITER: &str = "-";

// Output:
pub const OUTPUT_FILE: &str = "solution.out";
