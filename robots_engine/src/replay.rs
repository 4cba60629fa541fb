use crate::config::Config;
use crate::entities::{Colour, Direction, Robot};
use crate::map::Board;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

pub fn create_replay_logger(filename: Option<PathBuf>, config: &Config) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, config.clone())),
    }
}

/// Records what happens during a run.
pub trait ReplayLogger {
    #[allow(unused_variables)]
    fn log_start(&mut self, robots: &[Robot]) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, turn: usize, event: Event) {}

    #[allow(unused_variables)]
    fn log_snapshot(&mut self, turn: usize, board: &Board) {}

    fn clear(&mut self) {}

    fn save(&self) -> io::Result<()> {
        Ok(())
    }

    fn log_move(
        &mut self,
        turn: usize,
        robot: usize,
        location: (usize, usize),
        destination: (usize, usize),
    ) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Move,
                robot,
                location,
                destination: Some(destination),
                sensed: None,
                heading: None,
                colour: None,
            },
        );
    }

    fn log_rotate(
        &mut self,
        turn: usize,
        robot: usize,
        location: (usize, usize),
        sensed: Colour,
        heading: Direction,
    ) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Rotate,
                robot,
                location,
                destination: None,
                sensed: Some(sensed),
                heading: Some(heading),
                colour: None,
            },
        );
    }

    fn log_paint(&mut self, turn: usize, robot: usize, location: (usize, usize), colour: Colour) {
        self.log_event(
            turn,
            Event {
                event_type: EventType::Paint,
                robot,
                location,
                destination: None,
                sensed: None,
                heading: None,
                colour: Some(colour),
            },
        );
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum EventType {
    Move,
    Rotate,
    Paint,
}

/// A single robot action. Locations are `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    pub event_type: EventType,
    pub robot: usize,
    pub location: (usize, usize),
    pub destination: Option<(usize, usize)>,
    pub sensed: Option<Colour>,
    pub heading: Option<Direction>,
    pub colour: Option<Colour>,
}

/// Discards everything.
pub struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

/// A board as it was at the end of a turn, one digit string per row.
#[derive(Clone, Debug, Serialize)]
struct SnapshotRecord {
    turn: usize,
    cells: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TurnRecord<'a> {
    turn: usize,
    events: &'a [Event],
}

/// The replay file layout.
#[derive(Debug, Serialize)]
struct Replay<'a> {
    config: &'a Config,
    robots: &'a [Robot],
    turns: Vec<TurnRecord<'a>>,
    snapshots: &'a [SnapshotRecord],
}

struct JsonReplayLogger {
    filename: PathBuf,
    config: Config,
    robots: Vec<Robot>,
    snapshots: Vec<SnapshotRecord>,
    events: BTreeMap<usize, Vec<Event>>,
}

impl JsonReplayLogger {
    pub fn new(filename: PathBuf, config: Config) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            config,
            robots: Vec::new(),
            snapshots: Vec::new(),
            events: BTreeMap::new(),
        }
    }

    fn replay(&self) -> Replay<'_> {
        Replay {
            config: &self.config,
            robots: &self.robots,
            turns: self
                .events
                .iter()
                .map(|(turn, events)| TurnRecord {
                    turn: *turn,
                    events,
                })
                .collect(),
            snapshots: &self.snapshots,
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_start(&mut self, robots: &[Robot]) {
        self.robots = robots.to_vec();
    }

    fn log_event(&mut self, turn: usize, event: Event) {
        self.events.entry(turn).or_default().push(event);
    }

    fn log_snapshot(&mut self, turn: usize, board: &Board) {
        self.snapshots.push(SnapshotRecord {
            turn,
            cells: board.codes(),
        });
    }

    fn clear(&mut self) {
        self.robots.clear();
        self.snapshots.clear();
        self.events.clear();
    }

    fn save(&self) -> io::Result<()> {
        let file = File::create(&self.filename)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.replay())?;
        writer.flush()
    }
}
