use super::{Address, Listing, Record};
use crate::lang::{list, Error, Keywords, Line, LineNumber, Warning};
use crate::Options;
use std::io::{ErrorKind, Read};
use tracing::{debug, info, trace};

/// Reads a PRG image strictly front to back, one record per line.
///
/// Running out of input anywhere is a truncation: decoding stops, a
/// warning is raised and every line already returned stays valid.
pub struct Decoder<R> {
    reader: R,
    keywords: &'static Keywords,
    escape_quoted: bool,
    load_address: Option<Address>,
    cursor: u32,
    previous: LineNumber,
    done: bool,
    warnings: Vec<Warning>,
}

impl<R: Read> Decoder<R> {
    pub fn new(mut reader: R, options: &Options) -> Result<Decoder<R>, Error> {
        let mut warnings = vec![];
        let load_address = read_word(&mut reader)?;
        match load_address {
            Some(address) => info!("load address: ${:04X}", address),
            None => Warning::Truncated(None).report(&mut warnings),
        }
        Ok(Decoder {
            reader,
            keywords: options.keywords(),
            escape_quoted: options.escape_quoted,
            load_address,
            cursor: u32::from(load_address.unwrap_or(0)),
            previous: None,
            done: load_address.is_none(),
            warnings,
        })
    }

    /// `None` when the input was too short to hold one.
    pub fn load_address(&self) -> Option<Address> {
        self.load_address
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    pub fn next_line(&mut self) -> Result<Option<Line>, Error> {
        if self.done {
            return Ok(None);
        }
        let result = self.read_record();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result
    }

    fn read_record(&mut self) -> Result<Option<Line>, Error> {
        let next = match read_word(&mut self.reader)? {
            Some(0) => {
                debug!(at = self.cursor, "end of program");
                return Ok(None);
            }
            Some(next) => next,
            None => return Ok(self.truncated()),
        };
        let number = match read_word(&mut self.reader)? {
            Some(number) => number,
            None => return Ok(self.truncated()),
        };
        let mut body = vec![];
        loop {
            match read_byte(&mut self.reader)? {
                Some(0) => break,
                Some(b) => body.push(b),
                None => return Ok(self.truncated()),
            }
        }
        self.cursor += Record::encoded_len(body.len()) as u32;
        if u32::from(next) != self.cursor {
            Warning::BadLink {
                line: number,
                found: next,
                expected: self.cursor,
            }
            .report(&mut self.warnings);
        }
        trace!(line = number, len = body.len(), "listing");
        let text = list(
            number,
            &body,
            self.keywords,
            self.escape_quoted,
            &mut self.warnings,
        );
        self.previous = Some(number);
        Ok(Some(Line::new(number, text)))
    }

    fn truncated(&mut self) -> Option<Line> {
        Warning::Truncated(self.previous).report(&mut self.warnings);
        None
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Line, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Decode a whole PRG image held in memory.
pub fn decode(bytes: &[u8], options: &Options) -> Result<Listing, Error> {
    let mut decoder = Decoder::new(bytes, options)?;
    let mut lines = vec![];
    while let Some(line) = decoder.next_line()? {
        lines.push(line);
    }
    let load_address = decoder.load_address();
    Ok(Listing::new(load_address, lines, decoder.into_warnings()))
}

fn read_word<R: Read>(reader: &mut R) -> Result<Option<u16>, Error> {
    let mut buf = [0u8; 2];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(u16::from_le_bytes(buf))),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn read_byte<R: Read>(reader: &mut R) -> Result<Option<u8>, Error> {
    let mut buf = [0u8; 1];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(buf[0])),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    const PRINT_HI: [u8; 15] = [
        0x01, 0x08, 0x0c, 0x08, 0x0a, 0x00, 0x99, 0x20, 0x22, 0x48, 0x49, 0x22, 0x00, 0x00, 0x00,
    ];

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "unplugged"))
        }
    }

    #[test]
    fn test_print_hi() {
        let listing = decode(&PRINT_HI, &Options::default()).unwrap();
        assert_eq!(listing.load_address(), Some(0x0801));
        assert_eq!(listing.to_string(), "10 PRINT \"HI\"\n");
        assert!(listing.warnings().is_empty());
    }

    #[test]
    fn test_iterator_stops_at_terminator() {
        let mut bytes = PRINT_HI.to_vec();
        bytes.extend_from_slice(b"trailing garbage");
        let decoder = Decoder::new(&bytes[..], &Options::default()).unwrap();
        let lines: Vec<Line> = decoder.map(|l| l.unwrap()).collect();
        assert_eq!(lines, [Line::new(10, &b"PRINT \"HI\""[..])]);
    }

    #[test]
    fn test_truncated_body() {
        let listing = decode(&PRINT_HI[..10], &Options::default()).unwrap();
        assert!(listing.lines().is_empty());
        assert_eq!(listing.warnings(), [Warning::Truncated(None)]);
    }

    #[test]
    fn test_missing_terminator() {
        let listing = decode(&PRINT_HI[..13], &Options::default()).unwrap();
        assert_eq!(listing.lines().len(), 1);
        assert_eq!(listing.warnings(), [Warning::Truncated(Some(10))]);
    }

    #[test]
    fn test_empty_input() {
        let listing = decode(&[], &Options::default()).unwrap();
        assert_eq!(listing.load_address(), None);
        assert!(listing.lines().is_empty());
        assert_eq!(listing.warnings(), [Warning::Truncated(None)]);
        let listing = decode(&[0x01], &Options::default()).unwrap();
        assert_eq!(listing.load_address(), None);
    }

    #[test]
    fn test_line_zero_is_a_line() {
        let bytes = [0x01, 0x08, 0x07, 0x08, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00];
        let listing = decode(&bytes, &Options::default()).unwrap();
        assert_eq!(listing.to_string(), "0 END\n");
    }

    #[test]
    fn test_bad_link() {
        let mut bytes = PRINT_HI;
        bytes[2] = 0x40;
        let listing = decode(&bytes, &Options::default()).unwrap();
        assert_eq!(listing.lines().len(), 1);
        assert_eq!(
            listing.warnings(),
            [Warning::BadLink {
                line: 10,
                found: 0x0840,
                expected: 0x080c
            }]
        );
    }

    #[test]
    fn test_read_error() {
        let err = Decoder::new(Broken, &Options::default()).err().unwrap();
        assert_eq!(err.code(), ErrorCode::DiskIoError);
    }
}
