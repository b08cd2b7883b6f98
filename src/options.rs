use crate::lang::{Dialect, Keywords};
use crate::mach::Address;

/// Where C64 BASIC programs start.
pub const DEFAULT_START_ADDRESS: Address = 0x0801;

/// Settings for one encode or decode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub dialect: Dialect,
    /// Swap ASCII upper and lower case before anything else.
    pub invert_case: bool,
    /// Number lines without one as the previous line plus one.
    pub auto_number: bool,
    /// Drop whitespace outside strings and remarks.
    pub collapse_spaces: bool,
    /// Drop whitespace at both ends of the statement text.
    pub trim_spaces: bool,
    pub start_address: Address,
    /// List unprintable bytes inside strings as `{XX}`.
    pub escape_quoted: bool,
}

impl Options {
    pub fn keywords(&self) -> &'static Keywords {
        self.dialect.keywords()
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            dialect: Dialect::default(),
            invert_case: false,
            auto_number: false,
            collapse_spaces: false,
            trim_spaces: false,
            start_address: DEFAULT_START_ADDRESS,
            escape_quoted: true,
        }
    }
}
