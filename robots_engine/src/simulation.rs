use crate::config::Config;
use crate::entities::Robot;
use crate::error::SimulationError;
use crate::map::Board;
use crate::random::RandomSequence;
use crate::replay::{NoOpReplayLogger, ReplayLogger};
use crate::snapshot::{Snapshot, SnapshotWriter};
use tracing::{debug, info, trace};

/// Where a simulation is in its lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Built, no turn played yet.
    Setup,
    /// The given turn was the last one played.
    Running(usize),
    /// Every turn has been played.
    Done,
}

/// The outcome of a single turn.
#[derive(Debug)]
pub struct TurnReport {
    pub turn: usize,
    /// Present when the turn falls on the snapshot interval.
    pub snapshot: Option<Snapshot>,
}

/// A run of robots painting the board.
/// Main entry point for running the simulation.
pub struct Simulation {
    board: Board,
    robots: Vec<Robot>,
    turns: usize,
    interval: usize,
    phase: Phase,
    replay_logger: Box<dyn ReplayLogger>,
}

impl Simulation {
    /// Creates a simulation from a validated configuration.
    ///
    /// The sequence is seeded with the configured seed to colour the board,
    /// then reseeded with the same seed before placing the robots.
    ///
    /// # Arguments
    /// * `config` - The validated configuration.
    /// * `sequence` - The random sequence used for initialisation.
    pub fn new(
        config: &Config,
        sequence: &mut dyn RandomSequence,
    ) -> Result<Simulation, SimulationError> {
        sequence.reseed(config.seed());
        let board = Board::initialise(config.rows(), config.columns(), config.layout(), sequence)?;

        sequence.reseed(config.seed());
        let robots = Robot::spawn_all(config.robots(), config.rows(), config.columns(), sequence)?;

        info!(
            rows = config.rows(),
            columns = config.columns(),
            robots = config.robots(),
            layout = ?config.layout(),
            turns = config.turns(),
            interval = config.interval(),
            "Simulation initialised"
        );

        Simulation::from_parts(board, robots, config.turns(), config.interval())
    }

    /// Assembles a simulation from a prepared board and robots.
    ///
    /// # Arguments
    /// * `board` - The initial board.
    /// * `robots` - The robots, in the order they act each turn.
    /// * `turns` - The index of the last turn; `turns + 1` turns are played.
    /// * `interval` - Turns between snapshots. Must be at least 1.
    pub fn from_parts(
        board: Board,
        robots: Vec<Robot>,
        turns: usize,
        interval: usize,
    ) -> Result<Simulation, SimulationError> {
        if interval == 0 {
            return Err(SimulationError::InvalidInterval);
        }

        if let Some((index, robot)) = robots
            .iter()
            .enumerate()
            .find(|(_, robot)| board.get(robot.y(), robot.x()).is_none())
        {
            return Err(SimulationError::RobotOutOfBounds {
                index,
                x: robot.x(),
                y: robot.y(),
            });
        }

        Ok(Simulation {
            board,
            robots,
            turns,
            interval,
            phase: Phase::Setup,
            replay_logger: Box::new(NoOpReplayLogger),
        })
    }

    /// Records the run with the given replay logger.
    pub fn with_replay(mut self, replay_logger: Box<dyn ReplayLogger>) -> Simulation {
        self.replay_logger = replay_logger;
        self
    }

    /// Plays the next turn.
    ///
    /// Returns `None` once every turn has been played.
    pub fn step(&mut self) -> Option<TurnReport> {
        let turn = match self.phase {
            Phase::Setup => {
                self.replay_logger.clear();
                self.replay_logger.log_start(&self.robots);
                0
            }
            Phase::Running(turn) => turn + 1,
            Phase::Done => return None,
        };

        self.play_turn(turn);

        let snapshot = if turn % self.interval == 0 {
            debug!(turn, "Taking snapshot");
            self.replay_logger.log_snapshot(turn, &self.board);
            Some(Snapshot {
                turn,
                board: self.board.clone(),
                robots: self.robots.clone(),
            })
        } else {
            None
        };

        self.phase = if turn >= self.turns {
            Phase::Done
        } else {
            Phase::Running(turn)
        };

        Some(TurnReport { turn, snapshot })
    }

    /// Plays every remaining turn, handing each snapshot to `writer`.
    ///
    /// Returns the number of snapshots written. The replay, if any, is saved
    /// once the last turn has been played.
    pub fn run(&mut self, writer: &mut dyn SnapshotWriter) -> Result<usize, SimulationError> {
        let mut written = 0;

        while let Some(report) = self.step() {
            if let Some(snapshot) = report.snapshot {
                writer.write(&snapshot)?;
                written += 1;
            }
        }

        self.replay_logger.save()?;
        info!(snapshots = written, turns = self.turns + 1, "Simulation finished");

        Ok(written)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The last turn played, if any.
    pub fn turn(&self) -> Option<usize> {
        match self.phase {
            Phase::Setup => None,
            Phase::Running(turn) => Some(turn),
            Phase::Done => Some(self.turns),
        }
    }

    fn play_turn(&mut self, turn: usize) {
        let (rows, columns) = (self.board.rows(), self.board.columns());

        for (index, robot) in self.robots.iter_mut().enumerate() {
            // Turn 0 evaluates the starting cells without moving
            if turn != 0 {
                let from = (robot.x(), robot.y());
                robot.advance(rows, columns);
                self.replay_logger
                    .log_move(turn, index, from, (robot.x(), robot.y()));
            }

            // `from_parts` places every robot on the board and moves wrap around
            let sensed = self.board[(robot.y(), robot.x())];
            robot.turn(sensed);
            self.replay_logger.log_rotate(
                turn,
                index,
                (robot.x(), robot.y()),
                sensed,
                robot.direction(),
            );

            self.board.set(robot.y(), robot.x(), robot.paint());
            self.replay_logger
                .log_paint(turn, index, (robot.x(), robot.y()), robot.paint());

            trace!(
                turn,
                robot = index,
                x = robot.x(),
                y = robot.y(),
                sensed = ?sensed,
                heading = ?robot.direction(),
                "Robot stepped"
            );
        }
    }
}
