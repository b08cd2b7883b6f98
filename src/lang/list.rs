use super::error::Warning;
use super::token::{Keywords, Token, TOKEN_BASE};

fn is_printable(b: u8) -> bool {
    (0x20..0x7f).contains(&b)
}

fn push_escape(out: &mut Vec<u8>, b: u8) {
    out.extend_from_slice(format!("{{{:02X}}}", b).as_bytes());
}

fn is_escape_digit(b: Option<&u8>) -> bool {
    matches!(b, Some(b'0'..=b'9') | Some(b'A'..=b'F'))
}

/// Rewrite each literal brace at `braces` as `{7B}` when the listed text
/// after it would read back as an escape.
fn escape_braces(out: Vec<u8>, braces: &[usize]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(out.len() + braces.len() * 3);
    let mut braces = braces.iter().copied().peekable();
    for (pos, &b) in out.iter().enumerate() {
        if braces.peek() == Some(&pos) {
            braces.next();
            if is_escape_digit(out.get(pos + 1)) && is_escape_digit(out.get(pos + 2)) {
                push_escape(&mut escaped, b);
                continue;
            }
        }
        escaped.push(b);
    }
    escaped
}

/// Expand the body of line `number` back into text.
///
/// Inside quotes nothing is expanded. With `escape_quoted` any byte there
/// that is not printable ASCII is written as `{XX}`, otherwise it is copied.
/// Outside quotes, token bytes become their spelling, codes without one
/// become `{XX}` and bare carriage returns are dropped. A literal `{`
/// that would start an escape in the listing is written as `{7B}`.
pub fn list(
    number: u16,
    body: &[u8],
    keywords: &Keywords,
    escape_quoted: bool,
    warnings: &mut Vec<Warning>,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() * 2);
    let mut quoted = false;
    let mut braces = vec![];
    let mut bytes = body.iter().copied();
    while let Some(b) = bytes.next() {
        if b == b'"' {
            quoted = !quoted;
            out.push(b);
            continue;
        }
        if b == b'{' {
            braces.push(out.len());
            out.push(b);
            continue;
        }
        if quoted {
            if escape_quoted && !is_printable(b) {
                push_escape(&mut out, b);
            } else {
                out.push(b);
            }
            continue;
        }
        if b < TOKEN_BASE {
            if b != b'\r' {
                out.push(b);
            }
            continue;
        }
        if !keywords.is_prefix(b) {
            match keywords.lookup(Token::Byte(b)) {
                Some(s) => out.extend_from_slice(s.as_bytes()),
                None => push_escape(&mut out, b),
            }
            continue;
        }
        let code = match bytes.next() {
            Some(code) => code,
            None => {
                Warning::DanglingPrefix { line: number, prefix: b }.report(warnings);
                push_escape(&mut out, b);
                break;
            }
        };
        match keywords.lookup(Token::Extended { prefix: b, code }) {
            Some(s) => out.extend_from_slice(s.as_bytes()),
            None => {
                Warning::UnknownToken {
                    line: number,
                    prefix: b,
                    code,
                }
                .report(warnings);
                push_escape(&mut out, b);
                push_escape(&mut out, code);
            }
        }
    }
    if braces.is_empty() {
        return out;
    }
    escape_braces(out, &braces)
}

#[cfg(test)]
mod tests {
    use super::super::token::{Dialect, PREFIX_1, PREFIX_2};
    use super::*;

    fn list_str(body: &[u8], dialect: Dialect) -> (String, Vec<Warning>) {
        let mut warnings = vec![];
        let out = list(10, body, dialect.keywords(), true, &mut warnings);
        (String::from_utf8(out).unwrap(), warnings)
    }

    #[test]
    fn test_print_hi() {
        let (s, w) = list_str(b"\x99 \"HI\"", Dialect::Basic2);
        assert_eq!(s, "PRINT \"HI\"");
        assert!(w.is_empty());
    }

    #[test]
    fn test_quoted_tokens_are_not_expanded() {
        let (s, _) = list_str(b"\x99\"\x99\x05\"\x99", Dialect::Basic2);
        assert_eq!(s, "PRINT\"{99}{05}\"PRINT");
    }

    #[test]
    fn test_quoted_verbatim() {
        let mut warnings = vec![];
        let out = list(
            10,
            b"\"\x93\"",
            Dialect::Basic2.keywords(),
            false,
            &mut warnings,
        );
        assert_eq!(out, b"\"\x93\"");
    }

    #[test]
    fn test_unassigned_primary_code() {
        let (s, w) = list_str(b"\xcc\xff", Dialect::Basic2);
        assert_eq!(s, "{CC}{FF}");
        assert!(w.is_empty());
        let (s, _) = list_str(b"\xcc\xff", Dialect::Basic7);
        assert_eq!(s, "RGR{pi}");
    }

    #[test]
    fn test_extended() {
        let (s, w) = list_str(&[PREFIX_1, 0x08, b'1', PREFIX_2, 0x37], Dialect::Basic7);
        assert_eq!(s, "XOR1MERGE");
        assert!(w.is_empty());
    }

    #[test]
    fn test_unknown_extended() {
        let (s, w) = list_str(&[PREFIX_1, 0x40, b'A'], Dialect::Basic7);
        assert_eq!(s, "{CE}{40}A");
        assert_eq!(
            w,
            vec![Warning::UnknownToken {
                line: 10,
                prefix: PREFIX_1,
                code: 0x40
            }]
        );
        let (s, _) = list_str(&[PREFIX_2, 0x00], Dialect::Basic7);
        assert_eq!(s, "{FE}{00}");
    }

    #[test]
    fn test_dangling_prefix() {
        let (s, w) = list_str(&[b'A', PREFIX_2], Dialect::Basic7);
        assert_eq!(s, "A{FE}");
        assert_eq!(
            w,
            vec![Warning::DanglingPrefix {
                line: 10,
                prefix: PREFIX_2
            }]
        );
    }

    #[test]
    fn test_carriage_return_dropped() {
        let (s, _) = list_str(b"A\rB", Dialect::Basic2);
        assert_eq!(s, "AB");
    }

    #[test]
    fn test_brace_that_reads_as_escape() {
        let (s, _) = list_str(b"\"{41}\"{4AX", Dialect::Basic2);
        assert_eq!(s, "\"{7B}41}\"{7B}4AX");
        let (s, _) = list_str(b"{4\x80{x}{4", Dialect::Basic2);
        assert_eq!(s, "{7B}4END{x}{4");
    }

    #[test]
    fn test_tokens_in_remark_are_expanded() {
        let (s, _) = list_str(b"\x8f \x99", Dialect::Basic2);
        assert_eq!(s, "REM PRINT");
    }
}
