use super::error::*;
use super::lex::*;
use super::token::Keywords;
use crate::Options;

/// One listed BASIC line: a line number and its statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: u16,
    text: Vec<u8>,
}

impl Line {
    pub fn new<T: Into<Vec<u8>>>(number: u16, text: T) -> Line {
        Line {
            number,
            text: text.into(),
        }
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// The line as it appears in a listing, without a newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = format!("{} ", self.number).into_bytes();
        out.extend_from_slice(&self.text);
        out
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.number, String::from_utf8_lossy(&self.text))
    }
}

/// A raw input line with the newline stripped, case inverted if asked,
/// and the line number located.
#[derive(Debug)]
pub struct SourceLine {
    text: Vec<u8>,
    number: Option<i64>,
    start: usize,
    end: usize,
}

impl SourceLine {
    pub fn new(raw: &[u8], options: &Options) -> SourceLine {
        let mut text = raw.to_vec();
        while matches!(text.last(), Some(&b'\n') | Some(&b'\r')) {
            text.pop();
        }
        if options.invert_case {
            for ch in text.iter_mut() {
                if ch.is_ascii_uppercase() {
                    ch.make_ascii_lowercase();
                } else if ch.is_ascii_lowercase() {
                    ch.make_ascii_uppercase();
                }
            }
        }
        let (number, mut start) = line_number(&text);
        if number.is_some() && text.get(start) == Some(&b' ') {
            start += 1;
        }
        let mut end = text.len();
        if options.trim_spaces {
            while end > start && is_basic_whitespace(text[end - 1]) {
                end -= 1;
            }
            while start < end && is_basic_whitespace(text[start]) {
                start += 1;
            }
        }
        SourceLine {
            text,
            number,
            start,
            end,
        }
    }

    /// The number as written, before clamping. `None` when absent.
    pub fn number(&self) -> Option<i64> {
        self.number
    }

    pub fn statement(&self) -> &[u8] {
        &self.text[self.start..self.end]
    }

    pub fn crunch(&self, keywords: &'static Keywords, collapse_spaces: bool) -> Result<Vec<u8>, Error> {
        crunch(&self.text[..self.end], self.start, keywords, collapse_spaces)
    }
}

/// Assigns line numbers in input order, remembering the last one.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    previous: Option<u16>,
    auto_number: bool,
}

impl Numbering {
    pub fn new(auto_number: bool) -> Numbering {
        Numbering {
            previous: None,
            auto_number,
        }
    }

    pub fn previous(&self) -> Option<u16> {
        self.previous
    }

    pub fn assign(&mut self, written: Option<i64>, warnings: &mut Vec<Warning>) -> u16 {
        let wanted = match written {
            Some(n) => n,
            None if self.auto_number => {
                let n = self.previous.map_or(0, |p| i64::from(p) + 1);
                Warning::AutoNumber(n).report(warnings);
                n
            }
            None => 0,
        };
        let number = if wanted < 0 || wanted > i64::from(u16::max_value()) {
            let clamped = if wanted < 0 { 0 } else { u16::max_value() };
            Warning::OutOfRange(wanted, clamped).report(warnings);
            clamped
        } else {
            wanted as u16
        };
        match self.previous {
            Some(previous) if previous == number => Warning::Duplicate(number).report(warnings),
            Some(previous) if number < previous => Warning::OutOfOrder(number).report(warnings),
            _ => {}
        }
        self.previous = Some(number);
        number
    }
}

#[cfg(test)]
#[path = "tests/line_test.rs"]
mod tests;
