//! # robots_engine
//!
//! The core engine for the painting robots automaton.
//! Robots walk a wrapping board, turn according to the colour under them and
//! repaint the cell with their own colour.

pub mod config;
pub use config::Config;
pub use config::ConfigError;
pub use config::ConfigErrors;

pub mod entities;
pub use entities::Colour;
pub use entities::Direction;
pub use entities::Robot;

pub mod error;
pub use error::SimulationError;

pub mod map;
pub use map::Board;
pub use map::BoardLayout;

pub mod random;
pub use random::RandomSequence;
pub use random::ScriptedSequence;
pub use random::SeededSequence;

pub mod replay;
pub use replay::create_replay_logger;
pub use replay::ReplayLogger;

pub mod simulation;
pub use simulation::Phase;
pub use simulation::Simulation;
pub use simulation::TurnReport;

pub mod snapshot;
pub use snapshot::Snapshot;
pub use snapshot::SnapshotWriter;
pub use snapshot::TerminalSnapshotWriter;
pub use snapshot::TextSnapshotWriter;
