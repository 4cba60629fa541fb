use crate::map::BoardLayout;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Inclusive bounds for one numeric configuration value.
struct Field {
    name: &'static str,
    min: u32,
    max: u32,
}

const ROWS: Field = Field {
    name: "number of rows",
    min: 20,
    max: 300,
};
const COLUMNS: Field = Field {
    name: "number of columns",
    min: 20,
    max: 300,
};
const ROBOTS: Field = Field {
    name: "number of robots",
    min: 1,
    max: 10,
};
const LAYOUT: Field = Field {
    name: "initTypeValue",
    min: 1,
    max: 3,
};
const SEED: Field = Field {
    name: "initSeed",
    min: 10,
    max: 32767,
};
const TURNS: Field = Field {
    name: "number of turns",
    min: 10,
    max: 5000,
};
const INTERVAL: Field = Field {
    name: "number of interval turns",
    min: 1,
    max: 5000,
};

/// A single problem with a configuration value.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("ERROR: The {field} was not in the input file (reached eof)")]
    Missing { field: &'static str },
    #[error("ERROR: The {field} could not be read due to corrupt data in the file")]
    Corrupt { field: &'static str },
    #[error("ERROR: The {field} was outside the specified range ({min} to {max} inclusive)")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("ERROR: The output file was not in the input file (reached eof)")]
    MissingOutput,
}

/// Every problem found while validating a configuration.
///
/// `output` holds the output file name when it could still be read, so the
/// caller can report the errors there as well.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigErrors {
    pub errors: Vec<ConfigError>,
    pub output: Option<PathBuf>,
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

/// A validated simulation configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Config {
    rows: usize,
    columns: usize,
    robots: usize,
    layout: BoardLayout,
    seed: u64,
    turns: usize,
    interval: usize,
    output: PathBuf,
}

impl Config {
    /// Creates a configuration, checking every value against its documented range.
    ///
    /// # Arguments
    /// * `rows` - Board height, 20 to 300.
    /// * `columns` - Board width, 20 to 300.
    /// * `robots` - Number of robots, 1 to 10.
    /// * `layout` - How the board is coloured initially.
    /// * `seed` - Seed for the random sequence, 10 to 32767.
    /// * `turns` - Number of turns after turn 0, 10 to 5000.
    /// * `interval` - Turns between snapshots, 1 to 5000.
    /// * `output` - Where snapshots are written.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rows: u32,
        columns: u32,
        robots: u32,
        layout: BoardLayout,
        seed: u32,
        turns: u32,
        interval: u32,
        output: impl Into<PathBuf>,
    ) -> Result<Config, ConfigErrors> {
        let output = output.into();
        let errors: Vec<ConfigError> = [
            (&ROWS, rows),
            (&COLUMNS, columns),
            (&ROBOTS, robots),
            (&LAYOUT, layout.code()),
            (&SEED, seed),
            (&TURNS, turns),
            (&INTERVAL, interval),
        ]
        .into_iter()
        .filter_map(|(field, value)| check_range(field, value).err())
        .collect();

        if !errors.is_empty() {
            return Err(ConfigErrors {
                errors,
                output: Some(output),
            });
        }

        Ok(Config {
            rows: rows as usize,
            columns: columns as usize,
            robots: robots as usize,
            layout,
            seed: seed as u64,
            turns: turns as usize,
            interval: interval as usize,
            output,
        })
    }

    /// Parses the contents of a configuration file.
    ///
    /// The file holds whitespace separated values in this order: rows, columns,
    /// robots, layout code, seed, turns, snapshot interval and the output file
    /// name. All values are checked and every problem is reported.
    pub fn parse(contents: &str) -> Result<Config, ConfigErrors> {
        let token_pattern = Regex::new(r"\S+").expect("token pattern is valid");
        let mut tokens = token_pattern
            .find_iter(contents)
            .map(|token| token.as_str());

        let values = [&ROWS, &COLUMNS, &ROBOTS, &LAYOUT, &SEED, &TURNS, &INTERVAL]
            .map(|field| read_value(field, tokens.next()));
        let output = tokens.next().map(PathBuf::from);

        let errors: Vec<ConfigError> = values
            .iter()
            .filter_map(|value| value.clone().err())
            .chain(output.is_none().then_some(ConfigError::MissingOutput))
            .collect();

        if !errors.is_empty() {
            return Err(ConfigErrors { errors, output });
        }

        let [rows, columns, robots, layout, seed, turns, interval] =
            values.map(|value| value.unwrap_or_default());

        let layout = BoardLayout::from_code(layout).ok_or_else(|| ConfigErrors {
            errors: vec![out_of_range(&LAYOUT)],
            output: output.clone(),
        })?;

        Config::new(
            rows,
            columns,
            robots,
            layout,
            seed,
            turns,
            interval,
            output.unwrap_or_default(),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn robots(&self) -> usize {
        self.robots
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

fn read_value(field: &'static Field, token: Option<&str>) -> Result<u32, ConfigError> {
    let token = token.ok_or(ConfigError::Missing { field: field.name })?;

    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ConfigError::Corrupt { field: field.name });
    }

    // All digits but too long for a u32 is still just a value out of range
    let value = token.parse::<u32>().map_err(|_| out_of_range(field))?;
    check_range(field, value)?;

    Ok(value)
}

fn check_range(field: &'static Field, value: u32) -> Result<(), ConfigError> {
    if value < field.min || value > field.max {
        return Err(out_of_range(field));
    }
    Ok(())
}

fn out_of_range(field: &'static Field) -> ConfigError {
    ConfigError::OutOfRange {
        field: field.name,
        min: field.min,
        max: field.max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_parsing_a_valid_file_every_value_is_read() {
        let config = Config::parse("20 30 2 2 42 100 10 board.txt\n").unwrap();

        assert_eq!(config.rows(), 20);
        assert_eq!(config.columns(), 30);
        assert_eq!(config.robots(), 2);
        assert_eq!(config.layout(), BoardLayout::Checkerboard);
        assert_eq!(config.seed(), 42);
        assert_eq!(config.turns(), 100);
        assert_eq!(config.interval(), 10);
        assert_eq!(config.output(), Path::new("board.txt"));
    }

    #[test]
    fn when_parsing_values_may_be_spread_over_lines() {
        let contents = "\
            300
            300
            10
            1
            32767
            5000
            5000
            out.txt";

        let config = Config::parse(contents).unwrap();

        assert_eq!(config.rows(), 300);
        assert_eq!(config.layout(), BoardLayout::Random);
        assert_eq!(config.output(), Path::new("out.txt"));
    }

    #[test]
    fn when_a_value_is_out_of_range_the_range_is_reported() {
        let errors = Config::parse("19 30 2 2 42 100 10 board.txt").unwrap_err();

        assert_eq!(
            errors.errors,
            vec![ConfigError::OutOfRange {
                field: "number of rows",
                min: 20,
                max: 300
            }]
        );
        assert_eq!(
            errors.to_string(),
            "ERROR: The number of rows was outside the specified range (20 to 300 inclusive)"
        );
    }

    #[test]
    fn when_a_value_is_not_numeric_it_is_reported_as_corrupt() {
        let errors = Config::parse("20 3x 2 2 42 100 10 board.txt").unwrap_err();

        assert_eq!(
            errors.errors,
            vec![ConfigError::Corrupt {
                field: "number of columns"
            }]
        );
    }

    #[test]
    fn when_a_value_is_negative_it_is_reported_as_corrupt() {
        let errors = Config::parse("20 20 -2 2 42 100 10 board.txt").unwrap_err();

        assert_eq!(
            errors.errors,
            vec![ConfigError::Corrupt {
                field: "number of robots"
            }]
        );
    }

    #[test]
    fn when_several_values_are_invalid_every_error_is_reported() {
        let errors = Config::parse("20 20 11 4 5 100 0 board.txt").unwrap_err();

        assert_eq!(errors.errors.len(), 4);
        assert_eq!(errors.output, Some(PathBuf::from("board.txt")));
        assert_eq!(errors.to_string().lines().count(), 4);
        assert!(errors.to_string().contains("number of interval turns"));
    }

    #[test]
    fn when_the_file_ends_early_the_missing_values_are_reported() {
        let errors = Config::parse("20 20 1 1").unwrap_err();

        assert_eq!(
            errors.errors,
            vec![
                ConfigError::Missing { field: "initSeed" },
                ConfigError::Missing {
                    field: "number of turns"
                },
                ConfigError::Missing {
                    field: "number of interval turns"
                },
                ConfigError::MissingOutput,
            ]
        );
        assert_eq!(errors.output, None);
    }

    #[test]
    fn when_only_the_output_file_is_missing_it_is_reported() {
        let errors = Config::parse("20 20 1 1 10 10 1").unwrap_err();

        assert_eq!(errors.errors, vec![ConfigError::MissingOutput]);
    }

    #[test]
    fn when_a_value_overflows_it_is_reported_as_out_of_range() {
        let errors = Config::parse("20 20 1 1 99999999999 10 1 out.txt").unwrap_err();

        assert_eq!(
            errors.errors,
            vec![ConfigError::OutOfRange {
                field: "initSeed",
                min: 10,
                max: 32767
            }]
        );
    }

    #[test]
    fn when_creating_a_config_directly_ranges_are_checked() {
        assert!(Config::new(20, 20, 1, BoardLayout::Uniform, 10, 10, 1, "out.txt").is_ok());

        let errors =
            Config::new(20, 20, 0, BoardLayout::Uniform, 10, 10, 1, "out.txt").unwrap_err();
        assert_eq!(
            errors.errors,
            vec![ConfigError::OutOfRange {
                field: "number of robots",
                min: 1,
                max: 10
            }]
        );
    }
}
