/*!
## Rust Machine Module

This Rust module handles the binary side of a BASIC program: line records
chained by their link addresses, the PRG container that holds them, and
the encoder and decoder passes between text and that container.

*/

pub type Address = u16;

mod decoder;
mod encoder;
mod listing;
mod program;
mod record;

pub use decoder::decode;
pub use decoder::Decoder;
pub use encoder::encode;
pub use encoder::Encoder;
pub use listing::Listing;
pub use program::Program;
pub use record::Record;
pub use record::TERMINATOR;
