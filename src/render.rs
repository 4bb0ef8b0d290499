use std::io::{self, Write};

use log::debug;
use serde::Deserialize;

use crate::error::Result;
use crate::format::FormatFlags;
use crate::parser::Parser;
use crate::segment::Segment;

/// Output markers for each formatting flag.
///
/// A flag without a marker pair is dropped silently.
pub trait Markup {
    fn open(&self, flag: FormatFlags) -> Option<&'static str>;
    fn close(&self, flag: FormatFlags) -> Option<&'static str>;
}

/// `<i>`, `<b>`, `<u>`, `<s>` and `<mark>` tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html;

impl Markup for Html {
    fn open(&self, flag: FormatFlags) -> Option<&'static str> {
        html_tag(flag).map(|tag| tag.0)
    }

    fn close(&self, flag: FormatFlags) -> Option<&'static str> {
        html_tag(flag).map(|tag| tag.1)
    }
}

fn html_tag(flag: FormatFlags) -> Option<(&'static str, &'static str)> {
    if flag == FormatFlags::ITALIC {
        Some(("<i>", "</i>"))
    } else if flag == FormatFlags::BOLD {
        Some(("<b>", "</b>"))
    } else if flag == FormatFlags::UNDERLINE {
        Some(("<u>", "</u>"))
    } else if flag == FormatFlags::STRIKETHROUGH {
        Some(("<s>", "</s>"))
    } else if flag == FormatFlags::HIGHLIGHT {
        Some(("<mark>", "</mark>"))
    } else {
        None
    }
}

/// Markdown delimiters. Markdown has no highlight.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markdown;

impl Markup for Markdown {
    fn open(&self, flag: FormatFlags) -> Option<&'static str> {
        if flag == FormatFlags::ITALIC {
            Some("*")
        } else if flag == FormatFlags::BOLD {
            Some("**")
        } else if flag == FormatFlags::UNDERLINE {
            Some("__")
        } else if flag == FormatFlags::STRIKETHROUGH {
            Some("~~")
        } else {
            None
        }
    }

    fn close(&self, flag: FormatFlags) -> Option<&'static str> {
        self.open(flag)
    }
}

/// Output format selectable from the command line and config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
        }
    }
}

/// Write one segment: opening markers in flag order, the text, then the
/// closing markers in reverse. Returns the bytes written.
pub fn write_segment<M, W>(segment: &Segment, markup: &M, out: &mut W) -> io::Result<usize>
where
    M: Markup + ?Sized,
    W: Write + ?Sized,
{
    let mut n = 0;
    for flag in segment.flags.ordered() {
        if let Some(marker) = markup.open(flag) {
            out.write_all(marker.as_bytes())?;
            n += marker.len();
        }
    }
    out.write_all(segment.text.as_bytes())?;
    n += segment.text.len();
    for flag in segment.flags.ordered().rev() {
        if let Some(marker) = markup.close(flag) {
            out.write_all(marker.as_bytes())?;
            n += marker.len();
        }
    }
    Ok(n)
}

/// Render every segment of `parser` into `out`.
///
/// Stops at the first parser or write error. Returns the total bytes
/// written.
pub fn generate<I, M, W>(parser: &mut Parser<I>, markup: &M, out: &mut W) -> Result<usize>
where
    I: Iterator<Item = io::Result<char>>,
    M: Markup + ?Sized,
    W: Write + ?Sized,
{
    let mut n = 0;
    while let Some(segment) = parser.next_segment()? {
        n += write_segment(&segment, markup, out)?;
    }
    debug!("rendered {n} bytes");
    Ok(n)
}

pub fn generate_html<I, W>(parser: &mut Parser<I>, out: &mut W) -> Result<usize>
where
    I: Iterator<Item = io::Result<char>>,
    W: Write + ?Sized,
{
    generate(parser, &Html, out)
}

pub fn generate_markdown<I, W>(parser: &mut Parser<I>, out: &mut W) -> Result<usize>
where
    I: Iterator<Item = io::Result<char>>,
    W: Write + ?Sized,
{
    generate(parser, &Markdown, out)
}
