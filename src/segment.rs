use std::fmt;

use crate::format::FormatFlags;

/// A position in an alt source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// The first character of `file`.
    pub fn start(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A run of text sharing one set of formatting flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub flags: FormatFlags,
    pub text: String,
    pub location: Location,
    /// Flags turned off for following segments by this segment's closer.
    /// Empty unless the segment closed a group.
    pub disables: FormatFlags,
}

impl Segment {
    /// A normal (unformatted) run.
    pub fn literal(text: String, location: Location) -> Self {
        Self {
            flags: FormatFlags::empty(),
            text,
            location,
            disables: FormatFlags::empty(),
        }
    }

    pub fn is_normal(&self) -> bool {
        self.flags.is_empty()
    }
}
