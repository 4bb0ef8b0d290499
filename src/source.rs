//! Character input for the parser.
//!
//! [`RuneSource`] wraps any stream of `io::Result<char>` with a single-slot
//! pushback buffer and line/column tracking. In-memory text goes through
//! [`TextChars`], byte streams through [`Utf8Chars`].

use std::io::{self, BufReader, Read};
use std::str::Chars;

use crate::segment::Location;

/// Pull-based character source with one character of pushback.
pub struct RuneSource<I> {
    chars: I,
    file: String,
    line: u32,
    column: u32,
    /// Position before the most recent read, restored by `unread`.
    previous: (u32, u32),
    last: Option<char>,
    pushed_back: Option<char>,
}

impl<I> RuneSource<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    pub fn new(file: impl Into<String>, chars: I) -> Self {
        Self {
            chars,
            file: file.into(),
            line: 1,
            column: 1,
            previous: (1, 1),
            last: None,
            pushed_back: None,
        }
    }

    /// Read the next character, or `None` at end of input.
    pub fn read(&mut self) -> io::Result<Option<char>> {
        let c = match self.pushed_back.take() {
            Some(c) => c,
            None => match self.chars.next() {
                Some(c) => c?,
                None => {
                    self.last = None;
                    return Ok(None);
                }
            },
        };
        self.previous = (self.line, self.column);
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.last = Some(c);
        Ok(Some(c))
    }

    /// Push back the character returned by the last `read`.
    ///
    /// Only one character can be pushed back at a time.
    pub fn unread(&mut self) -> io::Result<()> {
        let c = self.last.take().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "no character available to push back",
            )
        })?;
        self.pushed_back = Some(c);
        (self.line, self.column) = self.previous;
        Ok(())
    }

    /// Position of the next character to be read.
    pub fn location(&self) -> Location {
        Location {
            file: self.file.clone(),
            line: self.line,
            column: self.column,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

impl<'a> RuneSource<TextChars<'a>> {
    /// Source over in-memory text.
    pub fn from_text(text: &'a str, file: impl Into<String>) -> Self {
        Self::new(file, TextChars(text.chars()))
    }
}

impl<R: Read> RuneSource<Utf8Chars<R>> {
    /// Source over a UTF-8 byte stream.
    pub fn from_reader(reader: R, file: impl Into<String>) -> Self {
        Self::new(file, Utf8Chars::new(reader))
    }
}

/// Infallible characters of a string slice.
pub struct TextChars<'a>(Chars<'a>);

impl Iterator for TextChars<'_> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Ok)
    }
}

/// Characters decoded from a UTF-8 byte stream.
pub struct Utf8Chars<R> {
    bytes: io::Bytes<BufReader<R>>,
}

impl<R: Read> Utf8Chars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
        }
    }

    fn decode(&mut self, first: u8) -> io::Result<char> {
        let width = match first {
            0x00..=0x7F => return Ok(char::from(first)),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(invalid_utf8("invalid leading byte")),
        };
        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = match self.bytes.next() {
                Some(byte) => byte?,
                None => return Err(invalid_utf8("truncated character at end of input")),
            };
        }
        let decoded = std::str::from_utf8(&buf[..width])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        decoded
            .chars()
            .next()
            .ok_or_else(|| invalid_utf8("empty character"))
    }
}

impl<R: Read> Iterator for Utf8Chars<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.bytes.next()? {
            Ok(byte) => byte,
            Err(e) => return Some(Err(e)),
        };
        Some(self.decode(first))
    }
}

fn invalid_utf8(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
