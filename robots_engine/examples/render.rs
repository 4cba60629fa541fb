use robots_engine::{Config, SeededSequence, Simulation, TerminalSnapshotWriter};
use std::fs;
use std::io::stdout;
use std::path::Path;

fn main() {
    let config_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data/example.cfg");
    let config = Config::parse(&fs::read_to_string(config_file).unwrap()).unwrap();

    let mut simulation = Simulation::new(&config, &mut SeededSequence::new(config.seed())).unwrap();
    simulation
        .run(&mut TerminalSnapshotWriter::new(stdout()))
        .unwrap();
}
