use robots_engine::{
    create_replay_logger, Board, BoardLayout, Colour, Config, SeededSequence, Simulation,
    TextSnapshotWriter,
};
use std::fs;
use std::path::Path;

fn example_config() -> Config {
    let config_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data/example.cfg");
    let contents = fs::read_to_string(config_file).unwrap();
    Config::parse(&contents).unwrap()
}

#[test]
fn when_running_the_example_config_the_snapshot_file_has_every_board() {
    let config = example_config();
    assert_eq!(config.layout(), BoardLayout::Checkerboard);

    let mut simulation = Simulation::new(&config, &mut SeededSequence::new(config.seed())).unwrap();
    let mut writer = TextSnapshotWriter::new(Vec::new());
    let written = simulation.run(&mut writer).unwrap();

    assert_eq!(written, 5);

    let text = String::from_utf8(writer.into_inner()).unwrap();
    let boards: Vec<&str> = text.split("\n\n\n").filter(|chunk| !chunk.is_empty()).collect();
    assert_eq!(boards.len(), 5);
    assert!(text.ends_with("\n\n\n"));

    for chunk in boards {
        let lines: Vec<&str> = chunk.lines().collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|line| line.len() == 20));
    }
}

#[test]
fn when_the_first_snapshot_is_taken_only_robot_cells_differ_from_the_checkerboard() {
    let config = example_config();

    let mut simulation = Simulation::new(&config, &mut SeededSequence::new(config.seed())).unwrap();
    let first = simulation.step().unwrap().snapshot.unwrap();

    for row in 0..20 {
        for col in 0..20 {
            let expected = if (row + col) % 2 == 0 {
                Colour::White
            } else {
                Colour::Red
            };
            let occupied = first
                .robots
                .iter()
                .any(|robot| robot.x() == col && robot.y() == row);
            if !occupied {
                assert_eq!(first.board.get(row, col), Some(expected));
            }
        }
    }
}

#[test]
fn when_a_replay_is_requested_it_records_every_snapshot() {
    let config = example_config();
    let dir = tempfile::tempdir().unwrap();
    let replay_file = dir.path().join("replay.json");

    let mut simulation = Simulation::new(&config, &mut SeededSequence::new(config.seed()))
        .unwrap()
        .with_replay(create_replay_logger(Some(replay_file.clone()), &config));
    let mut writer = TextSnapshotWriter::new(Vec::new());
    simulation.run(&mut writer).unwrap();

    let replay: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(replay_file).unwrap()).unwrap();
    assert_eq!(replay["snapshots"].as_array().unwrap().len(), 5);
    assert_eq!(replay["robots"].as_array().unwrap().len(), 3);
    assert_eq!(replay["turns"].as_array().unwrap().len(), 41);

    // The last recorded snapshot matches the last one written
    let text = String::from_utf8(writer.into_inner()).unwrap();
    let last = text.split("\n\n\n").filter(|chunk| !chunk.is_empty()).last().unwrap();
    let board = Board::parse(last).unwrap();
    let codes = serde_json::to_value(board.codes()).unwrap();
    assert_eq!(replay["snapshots"][4]["cells"], codes);
}
