use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use log::warn;

use maze::{Board, CellStatus, Coord, Grid, SearchObserver};

/// Draws `board` as a table: red `X` for walls, green `0` for the current
/// path, and a green `O` on `head` if one is given.
pub fn draw_board<W: Write>(out: &mut W, board: &Board, head: Option<Coord>) -> io::Result<()> {
    let (rows, cols) = board.dimensions();
    let border = format!("{}+\r\n", "+---".repeat(cols as usize));

    for row in 0..rows {
        queue!(out, Print(&border))?;

        for col in 0..cols {
            let coord = Coord::new(row, col);
            queue!(out, Print("| "))?;

            if Some(coord) == head {
                queue!(out, PrintStyledContent("O".green().bold()))?;
            } else {
                match board.status(coord) {
                    CellStatus::Wall => queue!(out, PrintStyledContent("X".red().bold()))?,
                    CellStatus::Visited => queue!(out, PrintStyledContent("0".green().bold()))?,
                    CellStatus::Open | CellStatus::OutOfBounds => queue!(out, Print(" "))?,
                }
            }

            queue!(out, Print(" "))?;
        }

        queue!(out, Print("|\r\n"))?;
    }

    queue!(out, Print(&border))?;
    out.flush()
}

/// Redraws the board after every move of a running search, pausing between
/// frames so the search can be followed by eye.
pub struct LivePainter<W: Write> {
    out: W,
    delay: Duration,
    frames: usize,
    failed: bool,
}

impl<W: Write> LivePainter<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self {
            out,
            delay,
            frames: 0,
            failed: false,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Puts the cursor back and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.failed {
            queue!(self.out, Show)?;
            self.out.flush()?;
        }
        Ok(self.out)
    }

    fn paint(&mut self, board: &Board, head: Coord) {
        if self.failed {
            return;
        }

        let frame = queue!(self.out, Hide, MoveTo(0, 0), Clear(ClearType::All))
            .and_then(|_| draw_board(&mut self.out, board, Some(head)));

        match frame {
            Ok(()) => {
                self.frames += 1;
                if !self.delay.is_zero() {
                    thread::sleep(self.delay);
                }
            }
            Err(e) => {
                // Drawing is only for show; keep searching without it.
                warn!("live rendering disabled: {}", e);
                self.failed = true;
            }
        }
    }
}

impl<W: Write> SearchObserver<Board> for LivePainter<W> {
    fn on_advance(&mut self, grid: &Board, head: Coord) {
        self.paint(grid, head);
    }

    fn on_retreat(&mut self, grid: &Board, head: Coord) {
        self.paint(grid, head);
    }
}
