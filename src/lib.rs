mod config;
mod error;
mod format;
mod parser;
mod render;
mod segment;
mod source;

pub use config::{CONFIG_FILE, Config, ConfigError, OutputConfig};
pub use error::{Error, Result};
pub use format::FormatFlags;
pub use parser::Parser;
pub use render::{
    Html, Markdown, Markup, OutputFormat, generate, generate_html, generate_markdown,
    write_segment,
};
pub use segment::{Location, Segment};
pub use source::{RuneSource, TextChars, Utf8Chars};

use std::io::Read;

/// Parse alt text into all of its segments.
pub fn parse(text: &str, name: &str) -> Result<Vec<Segment>> {
    Parser::new(RuneSource::from_text(text, name)).collect()
}

/// Render alt text from a reader to HTML. `name` is used in error messages.
pub fn render_file<R: Read>(src: R, name: &str) -> Result<Vec<u8>> {
    render_file_as(src, name, OutputFormat::Html)
}

/// Render alt text from a string to HTML. `name` is used in error messages.
pub fn render_string(src: &str, name: &str) -> Result<Vec<u8>> {
    render_string_as(src, name, OutputFormat::Html)
}

/// Render alt text from a reader to Markdown.
pub fn render_file_markdown<R: Read>(src: R, name: &str) -> Result<Vec<u8>> {
    render_file_as(src, name, OutputFormat::Markdown)
}

/// Render alt text from a string to Markdown.
pub fn render_string_markdown(src: &str, name: &str) -> Result<Vec<u8>> {
    render_string_as(src, name, OutputFormat::Markdown)
}

/// Render alt text from a reader to the given format.
pub fn render_file_as<R: Read>(src: R, name: &str, format: OutputFormat) -> Result<Vec<u8>> {
    render_parser(Parser::new(RuneSource::from_reader(src, name)), format)
}

/// Render alt text from a string to the given format.
pub fn render_string_as(src: &str, name: &str, format: OutputFormat) -> Result<Vec<u8>> {
    render_parser(Parser::new(RuneSource::from_text(src, name)), format)
}

fn render_parser<I>(mut parser: Parser<I>, format: OutputFormat) -> Result<Vec<u8>>
where
    I: Iterator<Item = std::io::Result<char>>,
{
    let mut out = Vec::new();
    match format {
        OutputFormat::Html => generate_html(&mut parser, &mut out)?,
        OutputFormat::Markdown => generate_markdown(&mut parser, &mut out)?,
    };
    Ok(out)
}
