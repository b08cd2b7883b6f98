use super::token::Keywords;
use super::Error;
use crate::error;

/// Parse a leading decimal line number the way `strtol` does.
/// Returns the value, saturated, and the offset where parsing stopped.
/// Nothing is consumed when there are no digits.
pub fn line_number(s: &[u8]) -> (Option<i64>, usize) {
    let mut pos = 0;
    while pos < s.len() && is_basic_whitespace(s[pos]) {
        pos += 1;
    }
    let mut negative = false;
    if let Some(&sign) = s.get(pos) {
        if sign == b'+' || sign == b'-' {
            negative = sign == b'-';
            pos += 1;
        }
    }
    let digits_start = pos;
    let mut value: i64 = 0;
    while pos < s.len() && is_basic_digit(s[pos]) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(s[pos] - b'0'));
        pos += 1;
    }
    if pos == digits_start {
        return (None, 0);
    }
    if negative {
        value = -value;
    }
    (Some(value), pos)
}

/// Crunch `line[start..]` into token bytes. The result is never empty and
/// does not include the record terminator.
pub fn crunch(
    line: &[u8],
    start: usize,
    keywords: &'static Keywords,
    collapse_spaces: bool,
) -> Result<Vec<u8>, Error> {
    BasicCruncher {
        src: line,
        pos: start,
        keywords,
        collapse_spaces,
        quoted: false,
        remark: false,
        out: Vec::with_capacity(line.len()),
    }
    .crunch()
}

pub(super) fn is_basic_whitespace(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

fn is_basic_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

struct BasicCruncher<'a> {
    src: &'a [u8],
    pos: usize,
    keywords: &'static Keywords,
    collapse_spaces: bool,
    quoted: bool,
    remark: bool,
    out: Vec<u8>,
}

impl<'a> BasicCruncher<'a> {
    fn crunch(mut self) -> Result<Vec<u8>, Error> {
        while self.pos < self.src.len() {
            if self.collapse_spaces && !(self.remark || self.quoted) {
                self.whitespace();
                if self.pos == self.src.len() {
                    break;
                }
            }
            let ch = self.src[self.pos];
            if ch == b'"' {
                self.quoted = !self.quoted;
            }
            if ch == b'{' && self.escape()? {
                continue;
            }
            if !(self.remark || self.quoted) && self.keyword() {
                continue;
            }
            if ch != b'\r' {
                self.out.push(ch);
            }
            self.pos += 1;
        }
        // The interpreter chokes on zero-length lines.
        if self.out.is_empty() {
            self.out.push(b' ');
        }
        Ok(self.out)
    }

    fn whitespace(&mut self) {
        while self.pos < self.src.len() && is_basic_whitespace(self.src[self.pos]) {
            self.pos += 1;
        }
    }

    fn keyword(&mut self) -> bool {
        match self.keywords.find(&self.src[self.pos..]) {
            Some((token, len)) => {
                if token.is_rem() {
                    self.remark = true;
                }
                token.write_to(&mut self.out);
                self.pos += len;
                true
            }
            None => false,
        }
    }

    /// `{XX}` with two uppercase hex digits. A brace not followed by two
    /// hex digits is an ordinary character.
    fn escape(&mut self) -> Result<bool, Error> {
        let rest = &self.src[self.pos..];
        let (hi, lo) = match (rest.get(1).copied(), rest.get(2).copied()) {
            (Some(hi), Some(lo)) => match (hex_value(hi), hex_value(lo)) {
                (Some(hi), Some(lo)) => (hi, lo),
                _ => return Ok(false),
            },
            _ => return Ok(false),
        };
        let column = self.pos..self.pos + 4;
        if rest.get(3) != Some(&b'}') {
            return Err(error!(SyntaxError, ..&(self.pos..self.pos + 3); "MALFORMED ESCAPE"));
        }
        let byte = hi << 4 | lo;
        if byte == 0 {
            return Err(error!(SyntaxError, ..&column; "NUL ENDS THE LINE"));
        }
        self.out.push(byte);
        self.pos += 4;
        Ok(true)
    }
}
