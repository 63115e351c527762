pub mod board;
pub mod constants;
pub mod direction;
pub mod search;
pub mod stack;

pub use board::{Board, BoardError, CellStatus, Coord, Grid};
pub use direction::Direction;
pub use search::{SearchError, SearchObserver, SearchOutcome, find_paths, find_paths_observed};
pub use stack::{PathStack, StackError, StackRec};
