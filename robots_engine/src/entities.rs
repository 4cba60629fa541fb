use crate::error::SimulationError;
use crate::random::RandomSequence;
use crossterm::style::Color as TermColor;
use serde::Serialize;
use tracing::info;

/// The colour of a board cell, also used as a robot's paint.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Colour {
    White,
    Red,
    Green,
    Blue,
}

impl Colour {
    pub const ALL: [Colour; 4] = [Colour::White, Colour::Red, Colour::Green, Colour::Blue];

    /// The single digit written for this colour in snapshots.
    pub fn code(self) -> u8 {
        match self {
            Colour::White => 1,
            Colour::Red => 2,
            Colour::Green => 3,
            Colour::Blue => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Colour> {
        match code {
            1 => Some(Colour::White),
            2 => Some(Colour::Red),
            3 => Some(Colour::Green),
            4 => Some(Colour::Blue),
            _ => None,
        }
    }

    pub fn from_char(value: char) -> Option<Colour> {
        value
            .to_digit(10)
            .and_then(|digit| Colour::from_code(digit as u8))
    }

    /// Maps a random draw uniformly onto the four colours.
    pub fn from_draw(value: u32) -> Colour {
        Colour::ALL[(value % 4) as usize]
    }

    /// How many positions a robot standing on this colour turns clockwise.
    pub fn rotation_steps(self) -> usize {
        match self {
            Colour::White => 1,
            Colour::Red => 2,
            Colour::Green => 3,
            Colour::Blue => 0,
        }
    }

    pub fn char(self) -> char {
        (b'0' + self.code()) as char
    }

    pub fn term_color(self) -> TermColor {
        match self {
            Colour::White => TermColor::White,
            Colour::Red => TermColor::Red,
            Colour::Green => TermColor::Green,
            Colour::Blue => TermColor::Blue,
        }
    }
}

/// The direction a robot is facing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    West,
    North,
    East,
    South,
}

impl Direction {
    /// Clockwise order used when rotating.
    pub const CYCLE: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn code(self) -> u8 {
        match self {
            Direction::West => 1,
            Direction::North => 2,
            Direction::East => 3,
            Direction::South => 4,
        }
    }

    /// Maps a random draw uniformly onto the four directions, in code order.
    pub fn from_draw(value: u32) -> Direction {
        match value % 4 {
            0 => Direction::West,
            1 => Direction::North,
            2 => Direction::East,
            _ => Direction::South,
        }
    }

    /// The direction `steps` positions further along [`Direction::CYCLE`].
    pub fn rotate(self, steps: usize) -> Direction {
        if steps % 4 == 0 {
            return self;
        }

        let index = match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        };
        Direction::CYCLE[(index + steps) % 4]
    }
}

/// A robot walking over the board.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Robot {
    x: usize,
    y: usize,
    direction: Direction,
    paint: Colour,
}

impl Robot {
    pub fn new(x: usize, y: usize, direction: Direction, paint: Colour) -> Robot {
        Robot {
            x,
            y,
            direction,
            paint,
        }
    }

    /// Draws `count` robots from `sequence`, four draws each in the order
    /// x, y, direction, colour.
    pub fn spawn_all(
        count: usize,
        rows: usize,
        columns: usize,
        sequence: &mut dyn RandomSequence,
    ) -> Result<Vec<Robot>, SimulationError> {
        let mut robots = Vec::new();
        robots
            .try_reserve_exact(count)
            .map_err(|source| SimulationError::Allocation {
                resource: "robots",
                requested: count,
                source,
            })?;

        for index in 0..count {
            let x = sequence.next_value() as usize % columns;
            let y = sequence.next_value() as usize % rows;
            let direction = Direction::from_draw(sequence.next_value());
            let paint = Colour::from_draw(sequence.next_value());

            let robot = Robot::new(x, y, direction, paint);
            info!(
                "Robot {}({}, {}) Dir {} Col {}",
                index,
                robot.x,
                robot.y,
                robot.direction.code(),
                robot.paint.code()
            );
            robots.push(robot);
        }

        Ok(robots)
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn paint(&self) -> Colour {
        self.paint
    }

    /// Moves one cell forward, wrapping around the edges of a `rows` x `columns` board.
    pub fn advance(&mut self, rows: usize, columns: usize) {
        match self.direction {
            Direction::North => self.y = if self.y == 0 { rows - 1 } else { self.y - 1 },
            Direction::South => self.y = if self.y + 1 >= rows { 0 } else { self.y + 1 },
            Direction::East => self.x = if self.x + 1 >= columns { 0 } else { self.x + 1 },
            Direction::West => self.x = if self.x == 0 { columns - 1 } else { self.x - 1 },
        }
    }

    /// Turns according to the colour the robot is standing on.
    pub fn turn(&mut self, sensed: Colour) {
        self.direction = self.direction.rotate(sensed.rotation_steps());
    }
}
