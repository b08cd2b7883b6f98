/*!
## Rust Terminal Module

Command line front ends for `bas2prg` and `prg2bas`.

*/

use crate::lang::{Dialect, Error};
use crate::mach::{Address, Decoder, Encoder};
use crate::options::{Options, DEFAULT_START_ADDRESS};
use ansi_term::Style;
use clap::{ArgAction, Args, Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    Usage = 1,
    Input = 2,
    Output = 3,
    Failure = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    /// Commodore 64 BASIC V2
    Basic2,
    /// BASIC V3.5, V7.0 and V7.1
    Basic7,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Basic2 => Dialect::Basic2,
            DialectArg::Basic7 => Dialect::Basic7,
        }
    }
}

#[derive(Args, Debug)]
pub struct Common {
    #[arg(
        short = 'd',
        long = "dialect",
        value_enum,
        default_value_t = DialectArg::Basic2,
        help = "Keyword table to use"
    )]
    pub dialect: DialectArg,
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "More diagnostics; repeat for more"
    )]
    pub verbose: u8,
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write here instead of stdout"
    )]
    pub output: Option<PathBuf>,
    #[arg(value_name = "INPUT", help = "Read this instead of stdin")]
    pub input: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(
    name = "bas2prg",
    version,
    about = "Tokenize a BASIC text file into a PRG file"
)]
pub struct Bas2Prg {
    #[arg(short = 'i', long = "invert-case", help = "Swap upper and lower case")]
    pub invert_case: bool,
    #[arg(
        short = 'n',
        long = "auto-number",
        help = "Number lines without a number as the previous line plus one"
    )]
    pub auto_number: bool,
    #[arg(
        short = 'c',
        long = "collapse-spaces",
        help = "Remove spaces outside strings and remarks"
    )]
    pub collapse_spaces: bool,
    #[arg(
        short = 't',
        long = "trim-spaces",
        help = "Remove spaces at the start and end of each line"
    )]
    pub trim_spaces: bool,
    #[arg(
        short = 'a',
        long = "address",
        value_name = "ADDR",
        value_parser = parse_address,
        default_value_t = DEFAULT_START_ADDRESS,
        help = "Load address; decimal, 0x or $ hex"
    )]
    pub start_address: Address,
    #[command(flatten)]
    pub common: Common,
}

impl Bas2Prg {
    pub fn options(&self) -> Options {
        Options {
            dialect: self.common.dialect.into(),
            invert_case: self.invert_case,
            auto_number: self.auto_number,
            collapse_spaces: self.collapse_spaces,
            trim_spaces: self.trim_spaces,
            start_address: self.start_address,
            ..Options::default()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "prg2bas", version, about = "List a PRG file as BASIC text")]
pub struct Prg2Bas {
    #[arg(
        long = "verbatim-quotes",
        help = "Copy unprintable bytes in strings instead of writing {XX}"
    )]
    pub verbatim_quotes: bool,
    #[command(flatten)]
    pub common: Common,
}

impl Prg2Bas {
    pub fn options(&self) -> Options {
        Options {
            dialect: self.common.dialect.into(),
            escape_quoted: !self.verbatim_quotes,
            ..Options::default()
        }
    }
}

pub fn parse_address(s: &str) -> Result<Address, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Address::from_str_radix(hex, 16)
    } else if let Some(hex) = s.strip_prefix('$') {
        Address::from_str_radix(hex, 16)
    } else {
        s.parse::<Address>()
    };
    parsed.map_err(|e| format!("bad address '{}': {}", s, e))
}

/// Where a run went wrong decides the exit status.
#[derive(Debug)]
pub enum Failure {
    Input(Error),
    Output(Error),
    Pass(Error),
}

impl Failure {
    fn exit(&self) -> Exit {
        match self {
            Failure::Input(_) => Exit::Input,
            Failure::Output(_) => Exit::Output,
            Failure::Pass(_) => Exit::Failure,
        }
    }

    fn error(&self) -> &Error {
        match self {
            Failure::Input(e) | Failure::Output(e) | Failure::Pass(e) => e,
        }
    }
}

pub fn bas2prg() -> Exit {
    let cli = match Bas2Prg::try_parse() {
        Ok(cli) => cli,
        Err(error) => return usage(error),
    };
    init_logging(cli.common.verbose);
    report(run_bas2prg(&cli.common, &cli.options()))
}

pub fn prg2bas() -> Exit {
    let cli = match Prg2Bas::try_parse() {
        Ok(cli) => cli,
        Err(error) => return usage(error),
    };
    init_logging(cli.common.verbose);
    report(run_prg2bas(&cli.common, &cli.options()))
}

pub fn run_bas2prg(common: &Common, options: &Options) -> Result<(), Failure> {
    let mut output = Output::create(common.output.as_deref()).map_err(Failure::Output)?;
    let mut input = open_input(common.input.as_deref()).map_err(Failure::Input)?;
    let mut encoder = Encoder::new(options);
    let mut line = vec![];
    loop {
        line.clear();
        let len = input
            .read_until(b'\n', &mut line)
            .map_err(|e| Failure::Pass(e.into()))?;
        if len == 0 {
            break;
        }
        encoder.push(&line).map_err(Failure::Pass)?;
    }
    let program = encoder.finish();
    program
        .write_to(&mut output)
        .map_err(|e| Failure::Pass(e.into()))?;
    output.commit().map_err(Failure::Pass)
}

pub fn run_prg2bas(common: &Common, options: &Options) -> Result<(), Failure> {
    let mut output = Output::create(common.output.as_deref()).map_err(Failure::Output)?;
    let input = open_input(common.input.as_deref()).map_err(Failure::Input)?;
    let mut decoder = Decoder::new(input, options).map_err(Failure::Pass)?;
    while let Some(line) = decoder.next_line().map_err(Failure::Pass)? {
        output
            .write_all(&line.to_bytes())
            .and_then(|_| output.write_all(b"\n"))
            .map_err(|e| Failure::Pass(e.into()))?;
    }
    output.commit().map_err(Failure::Pass)
}

fn usage(error: clap::Error) -> Exit {
    let exit = if error.use_stderr() {
        Exit::Usage
    } else {
        Exit::Success
    };
    let _ = error.print();
    exit
}

fn report(result: Result<(), Failure>) -> Exit {
    match result {
        Ok(()) => Exit::Success,
        Err(failure) => {
            eprintln!("{}", Style::new().bold().paint(failure.error().to_string()));
            failure.exit()
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn with_path(error: io::Error, path: &Path) -> Error {
    let msg = format!("{}: {}", path.display(), error);
    io::Error::new(error.kind(), msg).into()
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, Error> {
    match path {
        None => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => match File::open(path) {
            Ok(file) => {
                debug!("reading {}", path.display());
                Ok(Box::new(BufReader::new(file)))
            }
            Err(error) => Err(with_path(error, path)),
        },
    }
}

/// Output that deletes the file it created unless committed.
pub struct Output {
    writer: Box<dyn Write>,
    path: Option<PathBuf>,
    committed: bool,
}

impl Output {
    pub fn create(path: Option<&Path>) -> Result<Output, Error> {
        let writer: Box<dyn Write> = match path {
            None => Box::new(io::stdout()),
            Some(path) => match File::create(path) {
                Ok(file) => Box::new(BufWriter::new(file)),
                Err(error) => return Err(with_path(error, path)),
            },
        };
        Ok(Output {
            writer,
            path: path.map(Path::to_path_buf),
            committed: false,
        })
    }

    pub fn commit(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        self.committed = true;
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Some(path) = &self.path {
            self.writer = Box::new(io::sink());
            match fs::remove_file(path) {
                Ok(()) => debug!("removed {}", path.display()),
                Err(error) => warn!("could not remove {}: {}", path.display(), error),
            }
        }
    }
}
