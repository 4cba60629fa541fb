use crate::entities::Robot;
use crate::map::Board;
use std::io::{self, Write};

/// The board and robots as they were at the end of a turn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub turn: usize,
    pub board: Board,
    pub robots: Vec<Robot>,
}

impl Snapshot {
    /// The snapshot in its file format: one line of colour codes per row,
    /// followed by two extra newlines.
    pub fn to_text(&self) -> String {
        format!("{}\n\n", self.board)
    }
}

/// Receives every snapshot a simulation emits.
pub trait SnapshotWriter {
    fn write(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// Writes snapshots in the text file format.
pub struct TextSnapshotWriter<W: Write> {
    out: W,
}

impl<W: Write> TextSnapshotWriter<W> {
    pub fn new(out: W) -> TextSnapshotWriter<W> {
        TextSnapshotWriter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SnapshotWriter for TextSnapshotWriter<W> {
    fn write(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.out.write_all(snapshot.to_text().as_bytes())?;
        self.out.flush()
    }
}

/// Draws snapshots in colour on a terminal.
pub struct TerminalSnapshotWriter<W: Write> {
    out: W,
}

impl<W: Write> TerminalSnapshotWriter<W> {
    pub fn new(out: W) -> TerminalSnapshotWriter<W> {
        TerminalSnapshotWriter { out }
    }
}

impl<W: Write> SnapshotWriter for TerminalSnapshotWriter<W> {
    fn write(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        snapshot
            .board
            .draw(&mut self.out, snapshot.turn, &snapshot.robots)?;
        writeln!(self.out)
    }
}

/// Keeps every snapshot in memory.
impl SnapshotWriter for Vec<Snapshot> {
    fn write(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.push(snapshot.clone());
        Ok(())
    }
}

/// Hands each snapshot to every writer in order, stopping at the first failure.
impl SnapshotWriter for Vec<Box<dyn SnapshotWriter>> {
    fn write(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        for writer in self.iter_mut() {
            writer.write(snapshot)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Colour, Direction};

    fn snapshot() -> Snapshot {
        let mut board = Board::new(2, 3, Colour::White).unwrap();
        board.set(0, 2, Colour::Green);
        board.set(1, 1, Colour::Blue);

        Snapshot {
            turn: 4,
            board,
            robots: vec![Robot::new(1, 1, Direction::North, Colour::Blue)],
        }
    }

    #[test]
    fn when_rendering_a_snapshot_rows_are_followed_by_two_newlines() {
        assert_eq!(snapshot().to_text(), "113\n141\n\n\n");
    }

    #[test]
    fn when_writing_text_snapshots_they_are_appended_in_order() {
        let mut writer = TextSnapshotWriter::new(Vec::new());
        let first = snapshot();
        let mut second = snapshot();
        second.board.set(0, 0, Colour::Red);

        writer.write(&first).unwrap();
        writer.write(&second).unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "113\n141\n\n\n213\n141\n\n\n");
    }

    #[test]
    fn when_writing_text_the_board_can_be_parsed_back() {
        let mut writer = TextSnapshotWriter::new(Vec::new());
        writer.write(&snapshot()).unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(Board::parse(&text).unwrap(), snapshot().board);
    }

    #[test]
    fn when_fanning_out_every_writer_receives_the_snapshot() {
        let mut writers: Vec<Box<dyn SnapshotWriter>> = vec![
            Box::new(Vec::<Snapshot>::new()),
            Box::new(TerminalSnapshotWriter::new(io::sink())),
        ];

        assert!(writers.write(&snapshot()).is_ok());
    }

    #[test]
    fn when_collecting_snapshots_they_are_kept_in_order() {
        let mut collected: Vec<Snapshot> = Vec::new();
        let mut later = snapshot();
        later.turn = 8;

        collected.write(&snapshot()).unwrap();
        collected.write(&later).unwrap();

        let turns: Vec<usize> = collected.iter().map(|snapshot| snapshot.turn).collect();
        assert_eq!(turns, vec![4, 8]);
    }
}
