use std::io;

use thiserror::Error;

use crate::format::FormatFlags;
use crate::segment::Location;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input ended while a group delimiter was still open.
    #[error("{location} - unterminated {format} group")]
    UnterminatedGroup {
        location: Location,
        format: FormatFlags,
    },

    /// Failure reading the rune source or writing the output sink.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Source location for parser errors.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::UnterminatedGroup { location, .. } => Some(location),
            Error::Io(_) => None,
        }
    }
}
