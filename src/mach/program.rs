use super::record::{put_word, TERMINATOR};
use super::{Address, Record};
use crate::lang::Warning;
use std::io::Write;

/// A complete PRG image: load address, chained records, end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    load_address: Address,
    records: Vec<Record>,
    warnings: Vec<Warning>,
}

impl Program {
    pub fn new(load_address: Address) -> Program {
        Program {
            load_address,
            records: vec![],
            warnings: vec![],
        }
    }

    pub fn load_address(&self) -> Address {
        self.load_address
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(super) fn push(&mut self, record: Record) -> &Record {
        let index = self.records.len();
        self.records.push(record);
        &self.records[index]
    }

    pub(super) fn warnings_mut(&mut self) -> &mut Vec<Warning> {
        &mut self.warnings
    }

    /// Where each record starts in memory, in order.
    pub fn addresses(&self) -> Vec<u32> {
        let mut address = u32::from(self.load_address);
        self.records
            .iter()
            .map(|record| {
                let start = address;
                address += record.len() as u32;
                start
            })
            .collect()
    }

    /// Where the terminating zero link sits.
    pub fn end_address(&self) -> u32 {
        let body: usize = self.records.iter().map(Record::len).sum();
        u32::from(self.load_address) + body as u32
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let len = (self.end_address() - u32::from(self.load_address)) as usize;
        let mut out = Vec::with_capacity(len + 4);
        put_word(&mut out, self.load_address);
        for record in &self.records {
            record.write_to(&mut out);
        }
        out.extend_from_slice(&TERMINATOR);
        out
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program() {
        let p = Program::new(0x0801);
        assert_eq!(p.to_bytes(), [0x01, 0x08, 0x00, 0x00]);
        assert_eq!(p.end_address(), 0x0801);
        assert!(p.addresses().is_empty());
    }

    #[test]
    fn test_addresses() {
        let mut p = Program::new(0x1001);
        p.push(Record::new(0x1007, 1, vec![0x80]));
        p.push(Record::new(0x100e, 2, vec![0x80, 0x3a]));
        assert_eq!(p.addresses(), [0x1001, 0x1007]);
        assert_eq!(p.end_address(), 0x100e);
        let mut sink = vec![];
        p.write_to(&mut sink).unwrap();
        assert_eq!(sink, p.to_bytes());
        assert_eq!(sink.len(), 2 + 6 + 7 + 2);
    }
}
