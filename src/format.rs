use std::fmt;

bitflags::bitflags! {
    /// Formatting applied to a run of text.
    ///
    /// Flags combine additively: `FormatFlags::BOLD | FormatFlags::ITALIC`.
    /// The empty set is normal text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FormatFlags: u8 {
        const ITALIC = 1 << 0;
        const BOLD = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const HIGHLIGHT = 1 << 4;
    }
}

impl FormatFlags {
    /// Every flag in marker emission order.
    pub const ORDER: [FormatFlags; 5] = [
        FormatFlags::ITALIC,
        FormatFlags::BOLD,
        FormatFlags::UNDERLINE,
        FormatFlags::STRIKETHROUGH,
        FormatFlags::HIGHLIGHT,
    ];

    /// Kind selected by the character following an opening `(`.
    pub fn from_opener(c: char) -> Option<Self> {
        match c {
            '(' | '/' => Some(FormatFlags::ITALIC),
            '*' => Some(FormatFlags::BOLD),
            '_' => Some(FormatFlags::UNDERLINE),
            '-' => Some(FormatFlags::STRIKETHROUGH),
            '|' | '!' => Some(FormatFlags::HIGHLIGHT),
            _ => None,
        }
    }

    /// Kind disabled by the character preceding a closing `)`.
    ///
    /// A group body can never hold a `(`, so italic closes with `))`.
    pub fn from_closer(c: char) -> Option<Self> {
        match c {
            ')' | '/' => Some(FormatFlags::ITALIC),
            '*' => Some(FormatFlags::BOLD),
            '_' => Some(FormatFlags::UNDERLINE),
            '-' => Some(FormatFlags::STRIKETHROUGH),
            '|' | '!' => Some(FormatFlags::HIGHLIGHT),
            _ => None,
        }
    }

    /// Iterate the set flags in marker emission order.
    pub fn ordered(self) -> impl DoubleEndedIterator<Item = FormatFlags> {
        Self::ORDER.into_iter().filter(move |f| self.contains(*f))
    }

    fn name(self) -> &'static str {
        if self == FormatFlags::ITALIC {
            "italic"
        } else if self == FormatFlags::BOLD {
            "bold"
        } else if self == FormatFlags::UNDERLINE {
            "underline"
        } else if self == FormatFlags::STRIKETHROUGH {
            "strikethrough"
        } else if self == FormatFlags::HIGHLIGHT {
            "highlight"
        } else {
            "mixed"
        }
    }
}

impl fmt::Display for FormatFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("normal");
        }
        let mut first = true;
        for flag in self.ordered() {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(flag.name())?;
            first = false;
        }
        Ok(())
    }
}
