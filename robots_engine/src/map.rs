use crate::entities::{Colour, Direction, Robot};
use crate::error::SimulationError;
use crate::random::RandomSequence;
use crossterm::{
    queue,
    style::{Color, Print, SetForegroundColor},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::io::{self, Write};

/// How the board is coloured before the first turn.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BoardLayout {
    /// One random draw per cell, row by row.
    Random,
    /// White where `row + col` is even, red where it is odd.
    Checkerboard,
    /// Every cell white.
    Uniform,
}

impl BoardLayout {
    pub fn from_code(code: u32) -> Option<BoardLayout> {
        match code {
            1 => Some(BoardLayout::Random),
            2 => Some(BoardLayout::Checkerboard),
            3 => Some(BoardLayout::Uniform),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            BoardLayout::Random => 1,
            BoardLayout::Checkerboard => 2,
            BoardLayout::Uniform => 3,
        }
    }
}

/// The grid of coloured cells, stored row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Colour>,
}

impl Board {
    /// Creates a board with every cell set to `fill`.
    pub fn new(rows: usize, columns: usize, fill: Colour) -> Result<Board, SimulationError> {
        let mut board = Board::allocate(rows, columns)?;
        board.cells.resize(rows * columns, fill);
        Ok(board)
    }

    /// Creates and colours a board according to `layout`.
    ///
    /// Only [`BoardLayout::Random`] draws from `sequence`; the other layouts
    /// leave it untouched.
    pub fn initialise(
        rows: usize,
        columns: usize,
        layout: BoardLayout,
        sequence: &mut dyn RandomSequence,
    ) -> Result<Board, SimulationError> {
        let mut board = Board::allocate(rows, columns)?;

        for row in 0..rows {
            for col in 0..columns {
                let colour = match layout {
                    BoardLayout::Random => Colour::from_draw(sequence.next_value()),
                    BoardLayout::Checkerboard if (row + col) % 2 == 0 => Colour::White,
                    BoardLayout::Checkerboard => Colour::Red,
                    BoardLayout::Uniform => Colour::White,
                };
                board.cells.push(colour);
            }
        }

        Ok(board)
    }

    /// Reads a board back from its snapshot text: one line of colour digits
    /// per row, up to the first blank line.
    pub fn parse(contents: &str) -> Option<Board> {
        let row_pattern = Regex::new(r"^[1-4]+$").ok()?;

        let lines: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .take_while(|line| !line.is_empty())
            .collect();

        let columns = lines.first()?.len();
        if lines
            .iter()
            .any(|line| line.len() != columns || !row_pattern.is_match(line))
        {
            return None;
        }

        let mut board = Board::allocate(lines.len(), columns).ok()?;
        for line in lines {
            for value in line.chars() {
                board.cells.push(Colour::from_char(value)?);
            }
        }

        Some(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Colour> {
        self.offset(row, col).map(|index| self.cells[index])
    }

    /// Paints a cell, returning the colour it had before.
    /// Out of bounds coordinates leave the board untouched and return `None`.
    pub fn set(&mut self, row: usize, col: usize, colour: Colour) -> Option<Colour> {
        let index = self.offset(row, col)?;
        Some(std::mem::replace(&mut self.cells[index], colour))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Colour] {
        &self.cells
    }

    /// Iterates over the rows of the board.
    pub fn row_slices(&self) -> impl Iterator<Item = &[Colour]> {
        // `max(1)` keeps `chunks` happy on a board with no columns
        self.cells.chunks(self.columns.max(1))
    }

    /// Colour codes, one digit string per row.
    pub fn codes(&self) -> Vec<String> {
        self.row_slices()
            .map(|row| row.iter().map(|colour| colour.char()).collect())
            .collect()
    }

    pub fn count(&self, colour: Colour) -> usize {
        self.cells.iter().filter(|cell| **cell == colour).count()
    }

    /// Draws the board in colour, marking robots with an arrow for their heading.
    pub fn draw<W: Write>(&self, out: &mut W, turn: usize, robots: &[Robot]) -> io::Result<()> {
        queue!(
            out,
            Print("Turn: "),
            Print(turn.to_string()),
            Print(", Robots: "),
            Print(robots.len().to_string()),
            Print("\n")
        )?;

        for (row, cells) in self.row_slices().enumerate() {
            for (col, colour) in cells.iter().enumerate() {
                // The last robot in index order is the one that painted the cell
                let marker = robots
                    .iter()
                    .rev()
                    .find(|robot| robot.x() == col && robot.y() == row)
                    .map(|robot| match robot.direction() {
                        Direction::North => '^',
                        Direction::East => '>',
                        Direction::South => 'v',
                        Direction::West => '<',
                    });

                queue!(
                    out,
                    SetForegroundColor(colour.term_color()),
                    Print(marker.unwrap_or('█')),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            queue!(out, Print("\n"))?;
        }

        out.flush()
    }

    fn allocate(rows: usize, columns: usize) -> Result<Board, SimulationError> {
        // An overflowing cell count becomes an impossible request so the
        // reservation reports it
        let requested = rows.checked_mul(columns).unwrap_or(usize::MAX);

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(requested)
            .map_err(|source| SimulationError::Allocation {
                resource: "board",
                requested,
                source,
            })?;

        Ok(Board {
            rows,
            columns,
            cells,
        })
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.columns {
            Some(row * self.columns + col)
        } else {
            None
        }
    }
}

/// Indexes by `(row, col)`. Panics when the cell is outside the board.
impl Index<(usize, usize)> for Board {
    type Output = Colour;

    fn index(&self, (row, col): (usize, usize)) -> &Colour {
        match self.offset(row, col) {
            Some(offset) => &self.cells[offset],
            None => panic!(
                "cell ({row}, {col}) is outside a {}x{} board",
                self.rows, self.columns
            ),
        }
    }
}

impl fmt::Display for Board {
    /// One line per row, colour codes concatenated without separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            for colour in row {
                write!(f, "{}", colour.char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
