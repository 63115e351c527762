use std::fmt;

use log::{debug, info, trace};

use crate::board::{CellStatus, Coord, Grid};
use crate::constants::{EXIT_DIR, PATH_DELIMITER};
use crate::direction::Direction;
use crate::stack::{PathStack, StackError, StackRec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    Stack(StackError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Stack(e) => write!(f, "path search aborted: {}", e),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Stack(e) => Some(e),
        }
    }
}

impl From<StackError> for SearchError {
    fn from(e: StackError) -> Self {
        SearchError::Stack(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The start or the exit is not an open cell, so nothing was explored.
    Blocked,
    NoPaths,
    /// Path strings in the order they were discovered.
    Found(Vec<String>),
}

impl SearchOutcome {
    pub fn count(&self) -> usize {
        self.paths().len()
    }

    pub fn paths(&self) -> &[String] {
        match self {
            SearchOutcome::Found(paths) => paths,
            SearchOutcome::Blocked | SearchOutcome::NoPaths => &[],
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Blocked => writeln!(f, "No possible paths found!"),
            SearchOutcome::NoPaths => writeln!(f, "No possible paths!"),
            SearchOutcome::Found(paths) => {
                for (i, path) in paths.iter().enumerate() {
                    write!(f, "Path #{}:\t{}\n\n", i + 1, path)?;
                }
                Ok(())
            }
        }
    }
}

/// Watches a search as it runs. Both hooks default to doing nothing.
pub trait SearchObserver<G: Grid> {
    /// Called after a step onto `head`, including the step onto the exit.
    fn on_advance(&mut self, _grid: &G, _head: Coord) {}

    /// Called after backing out of a dead end; `head` is the cell returned to.
    fn on_retreat(&mut self, _grid: &G, _head: Coord) {}
}

impl<G: Grid> SearchObserver<G> for () {}

pub fn find_paths<G: Grid>(
    grid: &mut G,
    start: Coord,
    exit: Coord,
) -> Result<SearchOutcome, SearchError> {
    find_paths_observed(grid, start, exit, &mut ())
}

/// Enumerates every simple path from `start` to `exit`.
///
/// Moves are tried north, east, south, then west from each cell, which fixes
/// the order paths are reported in. Cells on the current path are marked
/// `Visited` while the search runs; every cell is back to its original status
/// when this returns `Ok`.
pub fn find_paths_observed<G, O>(
    grid: &mut G,
    start: Coord,
    exit: Coord,
    observer: &mut O,
) -> Result<SearchOutcome, SearchError>
where
    G: Grid,
    O: SearchObserver<G> + ?Sized,
{
    if grid.status(start) != CellStatus::Open || grid.status(exit) != CellStatus::Open {
        info!("start {} or exit {} is blocked; nothing to search", start, exit);
        return Ok(SearchOutcome::Blocked);
    }

    if start == exit {
        return Ok(SearchOutcome::Found(vec![EXIT_DIR.to_string()]));
    }

    let mut traversal = Traversal {
        grid,
        observer,
        exit,
        stack: PathStack::new(),
        heading: Direction::None,
        paths: Vec::new(),
    };
    traversal.enter(StackRec::new(start, Direction::None))?;
    let paths = traversal.run()?;

    info!("found {} path(s) from {} to {}", paths.len(), start, exit);

    if paths.is_empty() {
        Ok(SearchOutcome::NoPaths)
    } else {
        Ok(SearchOutcome::Found(paths))
    }
}

/// Joins the arrival directions on `stack`, bottom to top, and appends the
/// exit move. The entrance step has no arrival direction and is skipped.
pub fn path_directions(stack: &PathStack) -> String {
    let mut segments: Vec<String> = stack
        .iter()
        .filter(|rec| rec.dir.is_compass())
        .map(|rec| rec.dir.to_string())
        .collect();
    segments.push(EXIT_DIR.to_string());
    segments.join(PATH_DELIMITER)
}

struct Traversal<'a, G: Grid, O: SearchObserver<G> + ?Sized> {
    grid: &'a mut G,
    observer: &'a mut O,
    exit: Coord,
    stack: PathStack,
    heading: Direction, // Last direction tried from the top of the stack.
    paths: Vec<String>,
}

impl<G, O> Traversal<'_, G, O>
where
    G: Grid,
    O: SearchObserver<G> + ?Sized,
{
    fn run(mut self) -> Result<Vec<String>, SearchError> {
        while !self.stack.is_empty() {
            self.heading = self.heading.next();

            if !self.heading.is_compass() {
                self.retreat();
                continue;
            }

            let here = self.stack.peek()?.loc;
            let next = self.heading.step(here);

            if self.grid.status(next) == CellStatus::Open {
                self.advance(next)?;
            }
        }

        Ok(self.paths)
    }

    fn enter(&mut self, rec: StackRec) -> Result<(), StackError> {
        self.stack.push(rec)?;
        self.grid.set_status(rec.loc, CellStatus::Visited);
        trace!("push {} via {:?} (depth {})", rec.loc, rec.dir, self.stack.len());
        Ok(())
    }

    fn leave(&mut self) -> Option<StackRec> {
        let rec = self.stack.pop()?;
        self.grid.set_status(rec.loc, CellStatus::Open);
        trace!("pop {} (depth {})", rec.loc, self.stack.len());
        Some(rec)
    }

    fn advance(&mut self, next: Coord) -> Result<(), SearchError> {
        self.enter(StackRec::new(next, self.heading))?;
        self.observer.on_advance(&*self.grid, next);

        if next == self.exit {
            let path = path_directions(&self.stack);
            debug!("path #{}: {}", self.paths.len() + 1, path);
            self.paths.push(path);

            // Step straight back off the exit; the parent carries on with the
            // direction after the one that reached it.
            self.leave();
        } else {
            self.heading = Direction::None;
        }

        Ok(())
    }

    /// Backs out of a cell whose directions are all used up, resuming the
    /// parent just after the direction that led here.
    fn retreat(&mut self) {
        if let Some(left) = self.leave() {
            self.heading = left.dir;
        }

        if let Ok(head) = self.stack.peek() {
            self.observer.on_retreat(&*self.grid, head.loc);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::Rng;

    use super::*;
    use crate::board::Board;

    fn open_board(rows: i32, cols: i32) -> Board {
        Board::new(rows, cols).expect("test boards have positive sizes")
    }

    fn search(board: &mut Board) -> SearchOutcome {
        let exit = board.far_corner();
        find_paths(board, Coord::new(0, 0), exit).expect("search should not run out of memory")
    }

    #[test]
    fn single_cell_board_has_only_the_exit_move() {
        let mut board = open_board(1, 1);
        assert_eq!(search(&mut board), SearchOutcome::Found(vec!["S".to_string()]));
    }

    #[test]
    fn two_by_two_board_finds_east_first_then_south() {
        let mut board = open_board(2, 2);
        assert_eq!(
            search(&mut board),
            SearchOutcome::Found(vec!["E-S-S".to_string(), "S-E-S".to_string()])
        );
    }

    #[test]
    fn walled_start_reports_blocked() {
        let mut board = open_board(3, 3);
        board.set_status(Coord::new(0, 0), CellStatus::Wall);

        let outcome = search(&mut board);
        assert_eq!(outcome, SearchOutcome::Blocked);
        assert_eq!(outcome.count(), 0);
        assert_eq!(outcome.to_string(), "No possible paths found!\n");
    }

    #[test]
    fn walled_exit_reports_blocked() {
        let mut board = open_board(3, 3);
        board.set_status(Coord::new(2, 2), CellStatus::Wall);
        assert_eq!(search(&mut board), SearchOutcome::Blocked);
    }

    #[test]
    fn walled_single_cell_is_blocked_rather_than_trivial() {
        let mut board = open_board(1, 1);
        board.set_status(Coord::new(0, 0), CellStatus::Wall);
        assert_eq!(search(&mut board), SearchOutcome::Blocked);
    }

    #[test]
    fn start_off_the_board_is_blocked() {
        let mut board = open_board(2, 2);
        let outcome = find_paths(&mut board, Coord::new(-1, 0), Coord::new(1, 1)).unwrap();
        assert_eq!(outcome, SearchOutcome::Blocked);
    }

    #[test]
    fn enclosed_exit_finds_no_paths() {
        let mut board = Board::parse("3 3\n1 2\n2 1\n").unwrap();

        let outcome = search(&mut board);
        assert_eq!(outcome, SearchOutcome::NoPaths);
        assert_eq!(outcome.to_string(), "No possible paths!\n");
    }

    #[test]
    fn single_corridor_has_one_path() {
        let mut board = open_board(1, 4);
        assert_eq!(
            search(&mut board),
            SearchOutcome::Found(vec!["E-E-E-S".to_string()])
        );
    }

    #[test]
    fn open_three_by_three_has_twelve_paths_starting_along_the_top() {
        let mut board = open_board(3, 3);
        let outcome = search(&mut board);

        assert_eq!(outcome.count(), 12);
        assert_eq!(outcome.paths()[0], "E-E-S-S-S");
        assert_eq!(outcome.paths()[11], "S-S-E-E-S");
    }

    #[test]
    fn open_four_by_four_has_184_paths() {
        let mut board = open_board(4, 4);
        assert_eq!(search(&mut board).count(), 184);
    }

    #[test]
    fn walls_force_a_detour() {
        // . X .
        // . X .
        // . . .
        let mut board = Board::parse("3 3 0 1 1 1").unwrap();
        assert_eq!(
            search(&mut board),
            SearchOutcome::Found(vec!["S-S-E-E-S".to_string()])
        );
    }

    #[test]
    fn exit_need_not_be_in_a_corner() {
        let mut board = open_board(3, 3);
        let outcome = find_paths(&mut board, Coord::new(0, 0), Coord::new(0, 1)).unwrap();

        assert_eq!(outcome.paths().first().map(String::as_str), Some("E-S"));
        assert!(outcome.paths().iter().all(|path| path.ends_with("-S")));
    }

    #[test]
    fn found_outcome_numbers_paths_from_one() {
        let outcome = SearchOutcome::Found(vec!["E-S-S".to_string(), "S-E-S".to_string()]);
        assert_eq!(outcome.to_string(), "Path #1:\tE-S-S\n\nPath #2:\tS-E-S\n\n");
    }

    #[test]
    fn path_directions_skips_the_entrance_and_appends_the_exit_move() {
        let mut stack = PathStack::new();
        stack.push(StackRec::new(Coord::new(0, 0), Direction::None)).unwrap();
        stack.push(StackRec::new(Coord::new(0, 1), Direction::East)).unwrap();
        stack.push(StackRec::new(Coord::new(1, 1), Direction::South)).unwrap();

        assert_eq!(path_directions(&stack), "E-S-S");
        assert_eq!(path_directions(&PathStack::new()), "S");
    }

    #[derive(Default)]
    struct Recorder {
        advances: Vec<Coord>,
        retreats: Vec<Coord>,
        max_visited: usize,
    }

    impl SearchObserver<Board> for Recorder {
        fn on_advance(&mut self, grid: &Board, head: Coord) {
            self.advances.push(head);
            self.max_visited = self.max_visited.max(grid.count(CellStatus::Visited));
        }

        fn on_retreat(&mut self, _grid: &Board, head: Coord) {
            self.retreats.push(head);
        }
    }

    #[test]
    fn observer_sees_every_move_without_changing_the_result() {
        let mut plain = open_board(2, 2);
        let expected = search(&mut plain);

        let mut observed = open_board(2, 2);
        let mut recorder = Recorder::default();
        let outcome =
            find_paths_observed(&mut observed, Coord::new(0, 0), Coord::new(1, 1), &mut recorder)
                .unwrap();

        assert_eq!(outcome, expected);
        assert_eq!(
            recorder.advances,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 1),
                Coord::new(1, 0),
                Coord::new(1, 1)
            ]
        );
        assert_eq!(recorder.retreats, vec![Coord::new(0, 0), Coord::new(0, 0)]);
        assert_eq!(recorder.max_visited, 3);
    }

    #[test]
    fn search_leaves_the_board_as_it_found_it() {
        let mut board = Board::parse("4 4 1 1 2 2").unwrap();
        let before = board.clone();

        search(&mut board);

        assert_eq!(board, before);
        assert_eq!(board.count(CellStatus::Visited), 0);
    }

    fn random_board(rng: &mut impl Rng) -> Board {
        let rows = rng.random_range(1..=4);
        let cols = rng.random_range(1..=4);
        let mut board = open_board(rows, cols);

        for row in 0..rows {
            for col in 0..cols {
                if rng.random_bool(0.25) {
                    board.set_status(Coord::new(row, col), CellStatus::Wall);
                }
            }
        }

        board
    }

    /// Walks `path` from `start`, checking each move lands on a fresh open cell.
    fn assert_simple_path_to_exit(board: &Board, start: Coord, exit: Coord, path: &str) {
        let segments: Vec<&str> = path.split(PATH_DELIMITER).collect();
        let (last, moves) = segments.split_last().expect("path should not be empty");
        assert_eq!(*last, EXIT_DIR, "path {} should end with the exit move", path);

        let mut seen = HashSet::from([start]);
        let mut here = start;

        for segment in moves {
            let letter = segment.chars().next().expect("segments are single letters");
            let dir = Direction::from_letter(letter).expect("segments are compass letters");
            here = dir.step(here);

            assert_eq!(
                board.status(here),
                CellStatus::Open,
                "path {} crosses {} which is not open:\n{}",
                path,
                here,
                board.log()
            );
            assert!(seen.insert(here), "path {} revisits {}", path, here);
        }

        assert_eq!(here, exit, "path {} should finish on the exit", path);
    }

    #[test]
    fn random_boards_yield_distinct_simple_paths_and_restore_the_board() {
        let mut rng = rand::rng();

        for _ in 0..64 {
            let board = random_board(&mut rng);
            let start = Coord::new(0, 0);
            let exit = board.far_corner();

            let mut searched = board.clone();
            let outcome = find_paths(&mut searched, start, exit).unwrap();

            assert_eq!(searched, board, "search should restore every cell");

            let unique: HashSet<&String> = outcome.paths().iter().collect();
            assert_eq!(unique.len(), outcome.count(), "paths should not repeat");

            for path in outcome.paths() {
                assert_simple_path_to_exit(&board, start, exit, path);
            }

            let mut again = board.clone();
            let repeat = find_paths(&mut again, start, exit).unwrap();
            assert_eq!(repeat, outcome, "search order should be deterministic");
        }
    }
}
