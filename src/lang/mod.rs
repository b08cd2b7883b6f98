/*!
# Rust Language Module

This Rust module handles the text side of a BASIC program: the keyword
tables, crunching a source line into token bytes, and listing token
bytes back out as text.

*/

#[macro_use]
mod error;
mod lex;
mod line;
mod list;

pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::Warning;
pub use lex::{crunch, line_number};
pub use line::{Line, Numbering, SourceLine};
pub use list::list;
pub use token::{Dialect, Keywords, Token};

pub type LineNumber = Option<u16>;
pub type Column = std::ops::Range<usize>;
