//! # BASIC PRG
//!
//! Tokenized BASIC programs as the 8-bit Commodores stored them.
//!
//! `bas2prg` crunches a text file of numbered BASIC lines into a PRG file
//! ready to `LOAD` on a C64 or an emulator. `prg2bas` lists a PRG file
//! back out as text.
//! ```text
//! $ bas2prg -o hello.prg hello.bas
//! $ prg2bas hello.prg
//! 10 PRINT "HELLO"
//! 20 GOTO 10
//! ```
//!
//! The same passes are available as a library through
//! [`mach::encode`] and [`mach::decode`].

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod lang;
pub mod mach;
mod options;
pub mod term;

pub use options::{Options, DEFAULT_START_ADDRESS};
