use anyhow::{bail, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

/// How many times the user may mistype the input file name.
pub const MAX_OPEN_ATTEMPTS: usize = 5;

/// Asks for the configuration file name until one can be read.
///
/// # Arguments
/// * `input` - Where file names are read from, one per line.
/// * `out` - Where the prompt is printed.
/// * `err` - Where failed attempts are reported.
/// * `attempts` - How many names to try before giving up.
pub fn prompt_for_config<R: BufRead, W: Write, E: Write>(
    input: &mut R,
    out: &mut W,
    err: &mut E,
    attempts: usize,
) -> Result<(PathBuf, String)> {
    for attempt in 1..=attempts {
        write!(out, "Enter the name of input: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("ERROR: No input file name was given.");
        }

        let path = PathBuf::from(line.trim());
        match fs::read_to_string(&path) {
            Ok(contents) => return Ok((path, contents)),
            Err(e) => {
                warn!(attempt, path = %path.display(), error = %e, "Could not open input file");
                writeln!(err, "\nERROR: Input file not opened correctly.")?;
            }
        }
    }

    bail!("ERROR: Failed to open the input file {attempts} times. Terminating the program.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn when_the_first_name_is_valid_its_contents_are_returned() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("robots.cfg");
        fs::write(&config, "20 20 1 1 10 10 1 out.txt").unwrap();

        let mut input = Cursor::new(format!("{}\n", config.display()));
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let (path, contents) =
            prompt_for_config(&mut input, &mut out, &mut err, MAX_OPEN_ATTEMPTS).unwrap();

        assert_eq!(path, config);
        assert_eq!(contents, "20 20 1 1 10 10 1 out.txt");
        assert_eq!(String::from_utf8(out).unwrap(), "Enter the name of input: ");
        assert!(err.is_empty());
    }

    #[test]
    fn when_a_name_is_wrong_the_user_is_asked_again() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("robots.cfg");
        fs::write(&config, "contents").unwrap();

        let mut input = Cursor::new(format!(
            "{}\n{}\n",
            dir.path().join("missing.cfg").display(),
            config.display()
        ));
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let (path, _) =
            prompt_for_config(&mut input, &mut out, &mut err, MAX_OPEN_ATTEMPTS).unwrap();

        assert_eq!(path, config);
        assert_eq!(
            String::from_utf8(out).unwrap().matches("Enter the name of input: ").count(),
            2
        );
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "\nERROR: Input file not opened correctly.\n"
        );
    }

    #[test]
    fn when_every_attempt_fails_the_prompt_gives_up() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.cfg");
        let names = format!("{}\n", missing.display()).repeat(6);

        let mut input = Cursor::new(names);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let error =
            prompt_for_config(&mut input, &mut out, &mut err, MAX_OPEN_ATTEMPTS).unwrap_err();

        assert!(error.to_string().contains("Failed to open the input file 5 times"));
        assert_eq!(
            String::from_utf8(err)
                .unwrap()
                .matches("Input file not opened correctly")
                .count(),
            5
        );
    }

    #[test]
    fn when_input_ends_the_prompt_stops() {
        let mut input = Cursor::new(String::new());
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let error = prompt_for_config(&mut input, &mut out, &mut err, MAX_OPEN_ATTEMPTS).unwrap_err();

        assert!(error.to_string().contains("No input file name"));
    }
}
