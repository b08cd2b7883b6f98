use super::Address;
use crate::lang::{Line, Warning};

/// Every line decoded from one PRG image, in container order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    load_address: Option<Address>,
    lines: Vec<Line>,
    warnings: Vec<Warning>,
}

impl Listing {
    pub fn new(load_address: Option<Address>, lines: Vec<Line>, warnings: Vec<Warning>) -> Listing {
        Listing {
            load_address,
            lines,
            warnings,
        }
    }

    pub fn load_address(&self) -> Option<Address> {
        self.load_address
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text form, one newline-terminated line per record.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![];
        for line in &self.lines {
            out.extend_from_slice(&line.to_bytes());
            out.push(b'\n');
        }
        out
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
