use super::Address;

/// A zero link ends the program.
pub const TERMINATOR: [u8; 2] = [0, 0];

/// One tokenized line as stored in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    next: Address,
    number: u16,
    body: Vec<u8>,
}

impl Record {
    /// The link and line number words.
    pub const HEADER_LEN: usize = 4;

    pub fn new(next: Address, number: u16, body: Vec<u8>) -> Record {
        debug_assert!(!body.is_empty());
        debug_assert!(!body.contains(&0));
        Record { next, number, body }
    }

    /// Address of whatever follows this record.
    pub fn next(&self) -> Address {
        self.next
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    /// Token bytes without the terminating zero.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Bytes this record occupies, terminator included.
    pub fn len(&self) -> usize {
        Record::encoded_len(self.body.len())
    }

    pub fn encoded_len(body_len: usize) -> usize {
        Record::HEADER_LEN + body_len + 1
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        put_word(out, self.next);
        put_word(out, self.number);
        out.extend_from_slice(&self.body);
        out.push(0);
    }
}

pub fn put_word(out: &mut Vec<u8>, word: u16) {
    out.extend_from_slice(&word.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to() {
        let r = Record::new(0x080c, 10, b"\x99 \"HI\"".to_vec());
        assert_eq!(r.len(), 11);
        let mut out = vec![];
        r.write_to(&mut out);
        assert_eq!(
            out,
            [0x0c, 0x08, 0x0a, 0x00, 0x99, 0x20, 0x22, 0x48, 0x49, 0x22, 0x00]
        );
    }
}
