#![allow(dead_code)]

use prg::lang::Dialect;
use prg::mach::{decode, encode, Listing, Program};
use prg::Options;

pub fn options() -> Options {
    Options::default()
}

pub fn basic7() -> Options {
    Options {
        dialect: Dialect::Basic7,
        ..Options::default()
    }
}

/// Encode newline-separated source text.
pub fn encode_str(source: &str, options: &Options) -> Program {
    match encode(source.lines(), options) {
        Ok(program) => program,
        Err(e) => panic!("{}", e),
    }
}

pub fn decode_bytes(bytes: &[u8], options: &Options) -> Listing {
    match decode(bytes, options) {
        Ok(listing) => listing,
        Err(e) => panic!("{}", e),
    }
}

/// Listing text of an encoded source.
pub fn roundtrip(source: &str, options: &Options) -> String {
    let program = encode_str(source, options);
    let listing = decode_bytes(&program.to_bytes(), options);
    String::from_utf8_lossy(&listing.to_bytes()).into_owned()
}

/// A PRG image with correctly chained links around raw bodies.
pub fn image(load_address: u16, lines: &[(u16, &[u8])]) -> Vec<u8> {
    let mut out = load_address.to_le_bytes().to_vec();
    let mut cursor = u32::from(load_address);
    for (number, body) in lines {
        cursor += 4 + body.len() as u32 + 1;
        out.extend_from_slice(&(cursor as u16).to_le_bytes());
        out.extend_from_slice(&number.to_le_bytes());
        out.extend_from_slice(body);
        out.push(0);
    }
    out.extend_from_slice(&[0, 0]);
    out
}
