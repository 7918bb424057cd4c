// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    SpotFile(SpotFileError),
    Stack(String),
}

/// Specific error types for spot file loading.
#[derive(Debug, Clone, PartialEq)]
pub enum SpotFileError {
    /// The file is not valid TOML or does not match the expected layout.
    Parse(String),

    /// Two spots share the same name, so links cannot be resolved.
    DuplicateName(String),

    /// A link references a spot name that does not exist.
    UnknownSpot(String),

    /// A spot references a frame outside the acquisition settings.
    FrameOutOfRange { spot: String, frame: usize },
}

impl fmt::Display for SpotFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotFileError::Parse(msg) => write!(f, "Invalid spot file: {}", msg),
            SpotFileError::DuplicateName(name) => write!(f, "Duplicate spot name: {}", name),
            SpotFileError::UnknownSpot(name) => write!(f, "Link references unknown spot: {}", name),
            SpotFileError::FrameOutOfRange { spot, frame } => {
                write!(f, "Spot {} is in frame {} which is out of range", spot, frame)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::SpotFile(e) => write!(f, "Spot File Error: {}", e),
            Error::Stack(e) => write!(f, "Stack Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<SpotFileError> for Error {
    fn from(err: SpotFileError) -> Self {
        Error::SpotFile(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
