/// First code of every primary table.
pub const TOKEN_BASE: u8 = 0x80;

/// The only primary token after which the rest of a line is never crunched.
pub const TOKEN_REM: u8 = 0x8f;

/// Prefix for the V3.5 and V7.0 extension table.
pub const PREFIX_1: u8 = 0xce;

/// Prefix for the V7.0 and V7.1 extension table.
pub const PREFIX_2: u8 = 0xfe;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Dialect {
    /// Commodore 64 BASIC V2, codes `$80-$CB`.
    Basic2,
    /// BASIC V3.5/V7.0/V7.1 with both prefixed tables.
    Basic7,
}

impl Dialect {
    pub fn keywords(self) -> &'static Keywords {
        match self {
            Dialect::Basic2 => &BASIC2,
            Dialect::Basic7 => &BASIC7,
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Basic2
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Dialect::Basic2 => write!(f, "BASIC V2"),
            Dialect::Basic7 => write!(f, "BASIC V7"),
        }
    }
}

/// A crunched keyword as it appears in a line record.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Token {
    Byte(u8),
    Extended { prefix: u8, code: u8 },
}

impl Token {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match *self {
            Token::Byte(b) => out.push(b),
            Token::Extended { prefix, code } => {
                out.push(prefix);
                out.push(code);
            }
        }
    }

    pub fn is_rem(&self) -> bool {
        *self == Token::Byte(TOKEN_REM)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Byte(b) => write!(f, "{{{:02X}}}", b),
            Token::Extended { prefix, code } => write!(f, "{{{:02X}}}{{{:02X}}}", prefix, code),
        }
    }
}

/// One contiguous run of codes and their canonical spellings.
/// `None` marks a code with no spelling of its own.
#[derive(Debug)]
pub struct TokenTable {
    first: u8,
    spellings: &'static [Option<&'static str>],
    len: usize,
}

impl TokenTable {
    pub const fn new(first: u8, spellings: &'static [Option<&'static str>]) -> TokenTable {
        TokenTable {
            first,
            spellings,
            len: spellings.len(),
        }
    }

    /// Only the first `len` entries of `spellings`.
    pub const fn truncated(
        first: u8,
        spellings: &'static [Option<&'static str>],
        len: usize,
    ) -> TokenTable {
        TokenTable {
            first,
            spellings,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, code: u8) -> bool {
        code >= self.first && ((code - self.first) as usize) < self.len
    }

    pub fn lookup(&self, code: u8) -> Option<&'static str> {
        if !self.contains(code) {
            return None;
        }
        self.spellings[(code - self.first) as usize]
    }

    /// First entry, in code order, whose spelling begins `input`.
    pub fn find(&self, input: &[u8]) -> Option<(u8, usize)> {
        for (index, spelling) in self.spellings[..self.len].iter().enumerate() {
            if let Some(s) = spelling {
                if input.starts_with(s.as_bytes()) {
                    return Some((self.first + index as u8, s.len()));
                }
            }
        }
        None
    }
}

#[derive(Debug)]
pub struct Extension {
    prefix: u8,
    table: TokenTable,
}

/// Everything needed to crunch and list one dialect.
#[derive(Debug)]
pub struct Keywords {
    dialect: Dialect,
    primary: TokenTable,
    extensions: &'static [Extension],
}

impl Keywords {
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn primary(&self) -> &TokenTable {
        &self.primary
    }

    pub fn extension(&self, prefix: u8) -> Option<&TokenTable> {
        self.extensions
            .iter()
            .find(|ext| ext.prefix == prefix)
            .map(|ext| &ext.table)
    }

    pub fn is_prefix(&self, byte: u8) -> bool {
        self.extensions.iter().any(|ext| ext.prefix == byte)
    }

    pub fn lookup(&self, token: Token) -> Option<&'static str> {
        match token {
            Token::Byte(b) if self.is_prefix(b) => None,
            Token::Byte(b) => self.primary.lookup(b),
            Token::Extended { prefix, code } => self.extension(prefix)?.lookup(code),
        }
    }

    /// Primary table first, then each extension table in prefix order.
    pub fn find(&self, input: &[u8]) -> Option<(Token, usize)> {
        if let Some((code, len)) = self.primary.find(input) {
            return Some((Token::Byte(code), len));
        }
        for ext in self.extensions {
            if let Some((code, len)) = ext.table.find(input) {
                let token = Token::Extended {
                    prefix: ext.prefix,
                    code,
                };
                return Some((token, len));
            }
        }
        None
    }
}

pub static BASIC2: Keywords = Keywords {
    dialect: Dialect::Basic2,
    primary: TokenTable::truncated(TOKEN_BASE, &PRIMARY, 76),
    extensions: &[],
};

pub static BASIC7: Keywords = Keywords {
    dialect: Dialect::Basic7,
    primary: TokenTable::new(TOKEN_BASE, &PRIMARY),
    extensions: &[
        Extension {
            prefix: PREFIX_1,
            table: TokenTable::new(0x00, &EXTENDED_CE),
        },
        Extension {
            prefix: PREFIX_2,
            table: TokenTable::new(0x00, &EXTENDED_FE),
        },
    ],
};

#[rustfmt::skip]
static PRIMARY: [Option<&str>; 128] = [
    // $80
    Some("END"), Some("FOR"), Some("NEXT"), Some("DATA"),
    Some("INPUT#"), Some("INPUT"), Some("DIM"), Some("READ"),
    // $88
    Some("LET"), Some("GOTO"), Some("RUN"), Some("IF"),
    Some("RESTORE"), Some("GOSUB"), Some("RETURN"), Some("REM"),
    // $90
    Some("STOP"), Some("ON"), Some("WAIT"), Some("LOAD"),
    Some("SAVE"), Some("VERIFY"), Some("DEF"), Some("POKE"),
    // $98
    Some("PRINT#"), Some("PRINT"), Some("CONT"), Some("LIST"),
    Some("CLR"), Some("CMD"), Some("SYS"), Some("OPEN"),
    // $A0
    Some("CLOSE"), Some("GET"), Some("NEW"), Some("TAB("),
    Some("TO"), Some("FN"), Some("SPC("), Some("THEN"),
    // $A8
    Some("NOT"), Some("STEP"), Some("+"), Some("-"),
    Some("*"), Some("/"), Some("^"), Some("AND"),
    // $B0
    Some("OR"), Some(">"), Some("="), Some("<"),
    Some("SGN"), Some("INT"), Some("ABS"), Some("USR"),
    // $B8
    Some("FRE"), Some("POS"), Some("SQR"), Some("RND"),
    Some("LOG"), Some("EXP"), Some("COS"), Some("SIN"),
    // $C0
    Some("TAN"), Some("ATN"), Some("PEEK"), Some("LEN"),
    Some("STR$"), Some("VAL"), Some("ASC"), Some("CHR$"),
    // $C8
    Some("LEFT$"), Some("RIGHT$"), Some("MID$"), Some("GO"),
    // $CC, V3.5 and up; $CE is RLUM on V3.5 and the prefix on V7.0
    Some("RGR"), Some("RCLR"), None, Some("JOY"),
    // $D0
    Some("RDOT"), Some("DEC"), Some("HEX$"), Some("ERR$"),
    Some("INSTR"), Some("ELSE"), Some("RESUME"), Some("TRAP"),
    // $D8
    Some("TRON"), Some("TROFF"), Some("SOUND"), Some("VOL"),
    Some("AUTO"), Some("PUDEF"), Some("GRAPHIC"), Some("PAINT"),
    // $E0
    Some("CHAR"), Some("BOX"), Some("CIRCLE"), Some("GSHAPE"),
    Some("SSHAPE"), Some("DRAW"), Some("LOCATE"), Some("COLOR"),
    // $E8
    Some("SCNCLR"), Some("SCALE"), Some("HELP"), Some("DO"),
    Some("LOOP"), Some("EXIT"), Some("DIRECTORY"), Some("DSAVE"),
    // $F0
    Some("DLOAD"), Some("HEADER"), Some("SCRATCH"), Some("COLLECT"),
    Some("COPY"), Some("RENAME"), Some("BACKUP"), Some("DELETE"),
    // $F8, $FE is the V7.0 prefix
    Some("RENUMBER"), Some("KEY"), Some("MONITOR"), Some("USING"),
    Some("UNTIL"), Some("WHILE"), None, Some("{pi}"),
];

#[rustfmt::skip]
static EXTENDED_CE: [Option<&str>; 11] = [
    None, None, Some("POT"), Some("BUMP"),
    Some("PEN"), Some("RSPPOS"), Some("RSPRITE"), Some("RSPCOLOR"),
    Some("XOR"), Some("RWINDOW"), Some("POINTER"),
];

#[rustfmt::skip]
static EXTENDED_FE: [Option<&str>; 56] = [
    // $00
    None, None, Some("BANK"), Some("FILTER"),
    Some("PLAY"), Some("TEMPO"), Some("MOVSPR"), Some("SPRITE"),
    Some("SPRCOLOR"), Some("RREG"), Some("ENVELOPE"), Some("SLEEP"),
    Some("CATALOG"), Some("DOPEN"), Some("APPEND"), Some("DCLOSE"),
    // $10
    Some("BSAVE"), Some("BLOAD"), Some("RECORD"), Some("CONCAT"),
    Some("DVERIFY"), Some("DCLEAR"), Some("SPRSAV"), Some("COLLISION"),
    Some("BEGIN"), Some("BEND"), Some("WINDOW"), Some("BOOT"),
    Some("WIDTH"), Some("SPRDEF"), Some("QUIT"), Some("STASH"),
    // $20
    None, Some("FETCH"), None, Some("SWAP"),
    Some("OFF"), Some("FAST"), Some("SLOW"),
    // $27, V7.1
    Some("CWIND"),
    Some("SSCRN"), Some("LSCRN"), Some("HIDE"), Some("SHOW"),
    Some("SFONT"), Some("LFONT"), Some("VIEW"), Some("FCOPY"),
    // $30
    Some("ESAVE"), Some("SEND"), Some("CHECK"), Some("ESC"),
    Some("OLD"), Some("FIND"), Some("DUMP"), Some("MERGE"),
];
