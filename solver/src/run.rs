use std::fmt;
use std::fs;
use std::io::{self, Write, stdout};
use std::path::{Path, PathBuf};

use log::info;

use maze::{
    Board, BoardError, SearchError, SearchOutcome, constants::START_POS, find_paths,
    find_paths_observed,
};

use crate::config::Config;
use crate::render::{LivePainter, draw_board};

#[derive(Debug)]
pub enum RunError {
    ReadInput { path: PathBuf, source: io::Error },
    WriteOutput { path: PathBuf, source: io::Error },
    Board(BoardError),
    Search(SearchError),
    Render(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::ReadInput { path, source } => {
                write!(f, "could not read '{}': {}", path.display(), source)
            }
            RunError::WriteOutput { path, source } => {
                write!(f, "could not write '{}': {}", path.display(), source)
            }
            RunError::Board(e) => write!(f, "{}", e),
            RunError::Search(e) => write!(f, "{}", e),
            RunError::Render(e) => write!(f, "could not draw the board: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::ReadInput { source, .. } | RunError::WriteOutput { source, .. } => {
                Some(source)
            }
            RunError::Board(e) => Some(e),
            RunError::Search(e) => Some(e),
            RunError::Render(e) => Some(e),
        }
    }
}

impl From<BoardError> for RunError {
    fn from(e: BoardError) -> Self {
        RunError::Board(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        RunError::Search(e)
    }
}

pub fn load_board(path: &Path) -> Result<Board, RunError> {
    let text = fs::read_to_string(path).map_err(|source| RunError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let board = Board::parse(&text)?;
    info!(
        "loaded {} x {} board with {} wall(s) from {}",
        board.rows(),
        board.cols(),
        board.count(maze::CellStatus::Wall),
        path.display()
    );

    Ok(board)
}

/// Searches `board` from the top-left corner to the bottom-right one,
/// drawing each move live if the config asks for it.
pub fn solve(board: &mut Board, config: &Config) -> Result<SearchOutcome, RunError> {
    let exit = board.far_corner();

    let outcome = match config.render_delay {
        Some(delay) => {
            let mut painter = LivePainter::new(stdout(), delay);
            let outcome = find_paths_observed(board, START_POS, exit, &mut painter)?;
            painter.finish().map_err(RunError::Render)?;
            outcome
        }
        None => find_paths(board, START_POS, exit)?,
    };

    Ok(outcome)
}

pub fn write_outcome(path: &Path, outcome: &SearchOutcome) -> Result<(), RunError> {
    fs::write(path, outcome.to_string()).map_err(|source| RunError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the board at `input`, writes every path to the configured output
/// file, then shows the board on `console`.
pub fn run<W: Write>(
    config: &Config,
    input: &Path,
    console: &mut W,
) -> Result<SearchOutcome, RunError> {
    let mut board = load_board(input)?;
    let outcome = solve(&mut board, config)?;

    write_outcome(&config.output, &outcome)?;

    draw_board(console, &board, None).map_err(RunError::Render)?;

    Ok(outcome)
}
