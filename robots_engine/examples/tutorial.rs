use robots_engine::{
    create_replay_logger, BoardLayout, Config, SeededSequence, Simulation, TextSnapshotWriter,
};
use std::fs::File;
use std::io::BufWriter;

fn main() {
    let config = match Config::new(
        20,
        40,
        4,
        BoardLayout::Random,
        2024,
        500,
        100,
        "/tmp/tutorial_board.txt",
    ) {
        Ok(config) => config,
        Err(e) => panic!("Invalid configuration: {}", e),
    };

    let replay_filename = "/tmp/tutorial_replay.json".into();

    let mut sequence = SeededSequence::new(config.seed());
    let mut simulation = match Simulation::new(&config, &mut sequence) {
        Ok(simulation) => simulation,
        Err(e) => panic!("Error creating the simulation: {}", e),
    }
    .with_replay(create_replay_logger(Some(replay_filename), &config));

    let output = match File::create(config.output()) {
        Ok(file) => file,
        Err(e) => panic!("Error creating output file: {}", e),
    };
    let mut writer = TextSnapshotWriter::new(BufWriter::new(output));

    match simulation.run(&mut writer) {
        Ok(written) => println!(
            "\nWrote {} snapshots to {}",
            written,
            config.output().display()
        ),
        Err(e) => panic!("Simulation failed: {}", e),
    }
}
