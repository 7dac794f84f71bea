use std::str::Lines;

const BOM: char = '\u{feff}';

/// Forward-only reader over the lines of a log.
///
/// The cursor remembers the line it last produced. Once exhausted it stays
/// exhausted; there is no way to step back.
#[derive(Debug, Clone)]
pub struct LogCursor<'a> {
    lines: Lines<'a>,
    current: Option<&'a str>,
    exhausted: bool,
    line_number: usize,
}

impl<'a> LogCursor<'a> {
    /// Positions the cursor before the first line. A leading byte-order mark
    /// is skipped and `\r\n` endings are accepted.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.strip_prefix(BOM).unwrap_or(text).lines(),
            current: None,
            exhausted: false,
            line_number: 0,
        }
    }

    /// The most recently consumed line
    pub fn current(&self) -> Option<&'a str> {
        self.current
    }

    /// 1-based number of the current line, 0 before the first advance
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Move to the next line
    pub fn advance(&mut self) -> Option<&'a str> {
        if self.exhausted {
            return None;
        }
        self.current = self.lines.next();
        match self.current {
            Some(_) => self.line_number += 1,
            None => self.exhausted = true,
        }
        self.current
    }

    /// Skip forward to the first line matching `predicate` and return it
    pub fn advance_until<P>(&mut self, mut predicate: P) -> Option<&'a str>
    where
        P: FnMut(&str) -> bool,
    {
        self.find(|line| predicate(line))
    }

    /// Move to the next line that is not blank
    pub fn advance_non_blank(&mut self) -> Option<&'a str> {
        self.advance_until(|line| !line.trim().is_empty())
    }
}

impl<'a> Iterator for LogCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

/// The value of a `Label : value` line, taken after the first `": "`
pub fn field_value(line: &str) -> Option<&str> {
    line.split_once(": ").map(|(_, value)| value.trim())
}
