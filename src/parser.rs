use std::io;
use std::iter::FusedIterator;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::format::FormatFlags;
use crate::segment::{Location, Segment};
use crate::source::RuneSource;

#[derive(Debug, Clone, Copy)]
enum Scan {
    Literal,
    Group(FormatFlags),
}

/// Incremental alt parser.
///
/// Each call to [`Parser::next_segment`] consumes just enough input to
/// produce one [`Segment`]. Between calls the parser remembers only the
/// flags and disables of the segment it returned last.
pub struct Parser<I> {
    source: RuneSource<I>,
    last_flags: FormatFlags,
    last_disables: FormatFlags,
    finished: bool,
}

impl<I> Parser<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    pub fn new(source: RuneSource<I>) -> Self {
        Self {
            source,
            last_flags: FormatFlags::empty(),
            last_disables: FormatFlags::empty(),
            finished: false,
        }
    }

    /// Parse the next segment, or `None` at end of input.
    pub fn next_segment(&mut self) -> Result<Option<Segment>> {
        loop {
            let start = self.source.location();
            let Some(c) = self.source.read()? else {
                return Ok(None);
            };
            if c == '(' {
                return self.scan_group(start).map(Some);
            }

            let mut text = String::new();
            match self.enclosing_closer(c) {
                Some(kind) => match self.source.read()? {
                    Some(')') => {
                        debug!("{start}: closed enclosing {kind} group");
                        self.last_disables |= kind;
                        continue;
                    }
                    Some(_) => {
                        self.source.unread()?;
                        text.push(c);
                    }
                    None => text.push(c),
                },
                None => self.source.unread()?,
            }
            return self.scan(Scan::Literal, text, start).map(Some);
        }
    }

    /// Flags still in effect from groups that were left open.
    fn open_flags(&self) -> FormatFlags {
        self.last_flags & !self.last_disables
    }

    /// Kind closed by `c` when it could end a group that is still open.
    fn enclosing_closer(&self, c: char) -> Option<FormatFlags> {
        FormatFlags::from_closer(c).filter(|kind| self.open_flags().contains(*kind))
    }

    /// Scan after an opening `(` at `start`.
    fn scan_group(&mut self, start: Location) -> Result<Segment> {
        let mut text = String::from('(');
        match self.source.read()? {
            Some(c) => match FormatFlags::from_opener(c) {
                Some(kind) => {
                    debug!("{start}: opened {kind} group");
                    return self.scan(Scan::Group(kind), String::new(), start);
                }
                None => text.push(c),
            },
            None => {}
        }
        trace!("{start}: {text:?} is not a group opener");
        self.scan(Scan::Literal, text, start)
    }

    fn scan(&mut self, scan: Scan, mut text: String, location: Location) -> Result<Segment> {
        loop {
            let Some(c) = self.source.read()? else {
                return match scan {
                    Scan::Literal => Ok(self.finish_literal(text, location)),
                    Scan::Group(format) => Err(Error::UnterminatedGroup { location, format }),
                };
            };

            if c == '(' {
                self.source.unread()?;
                return Ok(match scan {
                    Scan::Literal => self.finish_literal(text, location),
                    Scan::Group(kind) => {
                        self.finish_group(kind, FormatFlags::empty(), text, location)
                    }
                });
            }

            if let (')', Scan::Group(kind)) = (c, scan) {
                let closer = text.chars().last().and_then(FormatFlags::from_closer);
                if let Some(disables) = closer {
                    text.pop();
                    return Ok(self.finish_group(kind, disables, text, location));
                }
            }

            text.push(c);
        }
    }

    fn finish_group(
        &mut self,
        kind: FormatFlags,
        disables: FormatFlags,
        text: String,
        location: Location,
    ) -> Segment {
        let segment = Segment {
            flags: kind | self.open_flags(),
            text,
            location,
            disables,
        };
        self.last_flags = segment.flags;
        self.last_disables = segment.disables;
        trace!(
            "{}: {} segment {:?} disables {}",
            segment.location, segment.flags, segment.text, segment.disables
        );
        segment
    }

    fn finish_literal(&mut self, text: String, location: Location) -> Segment {
        self.last_flags = FormatFlags::empty();
        self.last_disables = FormatFlags::empty();
        trace!("{location}: literal segment {text:?}");
        Segment::literal(text, location)
    }
}

impl<I> Iterator for Parser<I>
where
    I: Iterator<Item = io::Result<char>>,
{
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_segment() {
            Ok(Some(segment)) => Some(Ok(segment)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<I> FusedIterator for Parser<I> where I: Iterator<Item = io::Result<char>> {}
