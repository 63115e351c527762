use std::fmt;
use std::io::{self, BufRead, Write};

const EXTENSION_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNameError {
    Empty,
    MissingStem,
    MissingPeriod,
    InvalidCharacter(char),
    BadExtension,
}

impl fmt::Display for FileNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileNameError::Empty => write!(f, "file name cannot be empty"),
            FileNameError::MissingStem => write!(f, "file name needs letters before the period"),
            FileNameError::MissingPeriod => write!(f, "file name needs a period and an extension"),
            FileNameError::InvalidCharacter(c) => {
                write!(f, "file name contains invalid character '{}'", c)
            }
            FileNameError::BadExtension => write!(
                f,
                "file extension must be exactly {} letters",
                EXTENSION_LENGTH
            ),
        }
    }
}

impl std::error::Error for FileNameError {}

/// Accepts names made of letters, a single period, and a three letter
/// extension, such as `maze.txt`.
pub fn validate_file_name(name: &str) -> Result<(), FileNameError> {
    if name.is_empty() {
        return Err(FileNameError::Empty);
    }

    let Some((stem, extension)) = name.split_once('.') else {
        if let Some(c) = name.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(FileNameError::InvalidCharacter(c));
        }
        return Err(FileNameError::MissingPeriod);
    };

    if stem.is_empty() {
        return Err(FileNameError::MissingStem);
    }

    if let Some(c) = stem
        .chars()
        .chain(extension.chars())
        .find(|c| !c.is_ascii_alphabetic())
    {
        return Err(FileNameError::InvalidCharacter(c));
    }

    if extension.len() != EXTENSION_LENGTH {
        return Err(FileNameError::BadExtension);
    }

    Ok(())
}

/// Asks for an input file name until a valid one is given.
///
/// Returns `Ok(None)` if the input runs out first.
pub fn prompt_file_name<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    loop {
        write!(output, "Please enter the name of the input file: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let name = line.trim();

        match validate_file_name(name) {
            Ok(()) => return Ok(Some(name.to_string())),
            Err(e) => writeln!(
                output,
                "\n'{}' is not a valid file name ({}).\nPlease input a different name.\n",
                name, e
            )?,
        }
    }
}
