use super::{Column, LineNumber};

/// A hard failure. The current pass stops when one of these is returned.
#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn in_column(self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            column: column.clone(),
            ..self
        }
    }

    pub fn message(self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.to_string(),
            ..self
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        let msg = error.to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => error!(FileNotFound; &msg),
            std::io::ErrorKind::PermissionDenied => error!(PathFileAccessError; &msg),
            _ => error!(DiskIoError; &msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    OutOfMemory = 7,
    InternalError = 51,
    FileNotFound = 53,
    DiskIoError = 57,
    PathFileAccessError = 75,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "SYNTAX ERROR",
            ErrorCode::OutOfMemory => "OUT OF MEMORY",
            ErrorCode::InternalError => "INTERNAL ERROR",
            ErrorCode::FileNotFound => "FILE NOT FOUND",
            ErrorCode::DiskIoError => "DISK I/O ERROR",
            ErrorCode::PathFileAccessError => "PATH/FILE ACCESS ERROR",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if suffix.is_empty() {
            write!(f, "{}", self.code.as_str())
        } else {
            write!(f, "{} IN{}", self.code.as_str(), suffix)
        }
    }
}

impl std::error::Error for Error {}

/// Something worth reporting that never stops a pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    #[error("auto-numbering {0}")]
    AutoNumber(i64),
    #[error("line number {0} outside of range [0..65535], clamped to {1}")]
    OutOfRange(i64, u16),
    #[error("duplicate line number {0}")]
    Duplicate(u16),
    #[error("line number {0} out of order")]
    OutOfOrder(u16),
    #[error("unknown token {{{prefix:02X}}}{{{code:02X}}} in line {line}")]
    UnknownToken { line: u16, prefix: u8, code: u8 },
    #[error("dangling prefix {{{prefix:02X}}} at end of line {line}")]
    DanglingPrefix { line: u16, prefix: u8 },
    #[error("line {line} links to ${found:04X}, expected ${expected:04X}")]
    BadLink { line: u16, found: u16, expected: u32 },
    #[error("input truncated {}", truncated_after(.0))]
    Truncated(LineNumber),
}

impl Warning {
    /// Log the warning and keep it with the others from this pass.
    pub fn report(self, warnings: &mut Vec<Warning>) {
        tracing::warn!("{}", self);
        warnings.push(self);
    }
}

fn truncated_after(line: &LineNumber) -> String {
    match line {
        Some(n) => format!("after line {}", n),
        None => "before the first line".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(error!(SyntaxError).to_string(), "SYNTAX ERROR");
        assert_eq!(
            error!(SyntaxError, Some(10), ..&(4..8); "MALFORMED ESCAPE").to_string(),
            "SYNTAX ERROR IN 10 (4..8); MALFORMED ESCAPE"
        );
        assert_eq!(
            error!(OutOfMemory, Some(65000)).to_string(),
            "OUT OF MEMORY IN 65000"
        );
    }

    #[test]
    fn test_from_io() {
        let e: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(e.code(), ErrorCode::FileNotFound);
        let e: Error = std::io::Error::new(std::io::ErrorKind::Other, "bad").into();
        assert_eq!(e.code(), ErrorCode::DiskIoError);
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(Warning::AutoNumber(51).to_string(), "auto-numbering 51");
        assert_eq!(
            Warning::UnknownToken {
                line: 10,
                prefix: 0xce,
                code: 0x40
            }
            .to_string(),
            "unknown token {CE}{40} in line 10"
        );
        assert_eq!(
            Warning::Truncated(Some(20)).to_string(),
            "input truncated after line 20"
        );
        assert_eq!(
            Warning::Truncated(None).to_string(),
            "input truncated before the first line"
        );
    }
}
