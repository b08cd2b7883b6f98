use super::{Address, Program, Record};
use crate::error;
use crate::lang::{Error, Keywords, Numbering, SourceLine};
use crate::Options;
use tracing::{debug, info, trace};

/// Crunches source lines one at a time into a [`Program`].
pub struct Encoder<'a> {
    options: &'a Options,
    keywords: &'static Keywords,
    numbering: Numbering,
    cursor: u32,
    program: Program,
}

impl<'a> Encoder<'a> {
    pub fn new(options: &'a Options) -> Encoder<'a> {
        Encoder {
            options,
            keywords: options.keywords(),
            numbering: Numbering::new(options.auto_number),
            cursor: u32::from(options.start_address),
            program: Program::new(options.start_address),
        }
    }

    /// Address the next record will be written to.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Append one raw source line. On error nothing is appended and the
    /// line does not count toward numbering.
    pub fn push(&mut self, raw: &[u8]) -> Result<&Record, Error> {
        let source = SourceLine::new(raw, self.options);
        let mut numbering = self.numbering.clone();
        let mut warnings = vec![];
        let number = numbering.assign(source.number(), &mut warnings);
        let body = source
            .crunch(self.keywords, self.options.collapse_spaces)
            .map_err(|e| e.in_line_number(Some(number)))?;
        let next = self.cursor + Record::encoded_len(body.len()) as u32;
        if next > u32::from(Address::max_value()) {
            return Err(error!(OutOfMemory, Some(number)));
        }
        trace!(line = number, at = self.cursor, len = body.len(), "crunched");
        self.numbering = numbering;
        self.program.warnings_mut().append(&mut warnings);
        self.cursor = next;
        Ok(self.program.push(Record::new(next as Address, number, body)))
    }

    pub fn finish(self) -> Program {
        info!(
            lines = self.program.records().len(),
            end = self.cursor,
            "encoded {} program at ${:04X}",
            self.keywords.dialect(),
            self.program.load_address()
        );
        self.program
    }
}

/// Encode a whole text program. Stops at the first hard error.
pub fn encode<I>(lines: I, options: &Options) -> Result<Program, Error>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut encoder = Encoder::new(options);
    for line in lines {
        let record = encoder.push(line.as_ref())?;
        debug!(line = record.number(), next = record.next(), "record");
    }
    Ok(encoder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ErrorCode, Warning};

    #[test]
    fn test_print_hi() {
        let p = encode(&["10 PRINT \"HI\""], &Options::default()).unwrap();
        assert_eq!(
            p.to_bytes(),
            [
                0x01, 0x08, 0x0c, 0x08, 0x0a, 0x00, 0x99, 0x20, 0x22, 0x48, 0x49, 0x22, 0x00,
                0x00, 0x00
            ]
        );
        assert!(p.warnings().is_empty());
    }

    #[test]
    fn test_chaining() {
        let lines = ["10 A=1", "20", "30 GOTO 10"];
        let p = encode(&lines, &Options::default()).unwrap();
        let addresses = p.addresses();
        for (index, record) in p.records().iter().enumerate() {
            let next = addresses
                .get(index + 1)
                .copied()
                .unwrap_or_else(|| p.end_address());
            assert_eq!(u32::from(record.next()), next);
        }
        assert_eq!(p.records()[1].body(), b" ");
    }

    #[test]
    fn test_start_address() {
        let o = Options {
            start_address: 0x1c01,
            ..Options::default()
        };
        let p = encode(&["1 END"], &o).unwrap();
        assert_eq!(p.to_bytes(), [0x01, 0x1c, 0x07, 0x1c, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_auto_number() {
        let o = Options {
            auto_number: true,
            ..Options::default()
        };
        let p = encode(&["50 END", "STOP"], &o).unwrap();
        assert_eq!(p.records()[1].number(), 51);
        assert_eq!(p.warnings(), [Warning::AutoNumber(51)]);
        let p = encode(&["50 END", "STOP"], &Options::default()).unwrap();
        assert_eq!(p.records()[1].number(), 0);
        assert_eq!(p.warnings(), [Warning::OutOfOrder(0)]);
    }

    #[test]
    fn test_malformed_escape_stops() {
        let err = encode(&["10 END", "20 ?\"{1F\"", "30 END"], &Options::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SyntaxError);
        assert_eq!(err.line_number(), Some(20));
        assert_eq!(err.column(), 5..8);
    }

    #[test]
    fn test_push_error_appends_nothing() {
        let o = Options::default();
        let mut e = Encoder::new(&o);
        e.push(b"10 END").unwrap();
        let cursor = e.cursor();
        assert!(e.push(b"20 {4").is_ok());
        assert!(e.push(b"30 {4A").is_err());
        assert!(e.cursor() > cursor);
        assert_eq!(e.finish().records().len(), 2);
    }

    #[test]
    fn test_failed_push_keeps_numbering() {
        let o = Options::default();
        let mut e = Encoder::new(&o);
        e.push(b"10 END").unwrap();
        assert!(e.push(b"20 {4A").is_err());
        e.push(b"15 END").unwrap();
        assert!(e.finish().warnings().is_empty());

        let o = Options {
            auto_number: true,
            ..Options::default()
        };
        let mut e = Encoder::new(&o);
        e.push(b"10 END").unwrap();
        assert!(e.push(b"{4A").is_err());
        assert_eq!(e.push(b"END").unwrap().number(), 11);
        assert_eq!(e.finish().warnings(), [Warning::AutoNumber(11)]);
    }

    #[test]
    fn test_out_of_memory() {
        let o = Options {
            start_address: 0xfff0,
            ..Options::default()
        };
        let err = encode(&["10 A=1", "20 B=2", "30 C=3"], &o).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfMemory);
        assert_eq!(err.line_number(), Some(20));
    }
}
