//! Line-tagged diagnostics.
//!
//! Fatal problems are returned as [`AsmError`] and stop the run;
//! [`Warning`]s are collected and assembly carries on.
use std::fmt;
use thiserror::Error;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    #[error("instruction not implemented: {0}")]
    UnknownMnemonic(String),
    #[error("expected number, got: {0}")]
    MalformedLiteral(String),
    #[error("expected number, got EOF")]
    UnexpectedEof,
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("ERROR [line {line}]: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl AsmError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        AsmError { line, kind }
    }
}

/// An operand that did not fit its field and was cut down to `bits` bits.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Warning {
    pub line: usize,
    pub bits: u8,
    pub value: u32,
}

impl Warning {
    /// The value that actually lands in the output.
    pub fn truncated(&self) -> u32 {
        self.value & ((1u32 << self.bits) - 1)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WARNING [line {}]: value will be truncated to {} bit(s) in width: {}",
            self.line, self.bits, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_format() {
        let e = AsmError::new(5, ErrorKind::UnknownMnemonic("FOOBAR".to_owned()));
        assert_eq!(e.to_string(), "ERROR [line 5]: instruction not implemented: FOOBAR");

        let e = AsmError::new(2, ErrorKind::MalformedLiteral("12".to_owned()));
        assert_eq!(e.to_string(), "ERROR [line 2]: expected number, got: 12");

        let e = AsmError::new(9, ErrorKind::UnexpectedEof);
        assert_eq!(e.to_string(), "ERROR [line 9]: expected number, got EOF");
    }

    #[test]
    fn test_warning_format() {
        let w = Warning { line: 3, bits: 5, value: 37 };
        assert_eq!(w.to_string(), "WARNING [line 3]: value will be truncated to 5 bit(s) in width: 37");
        assert_eq!(w.truncated(), 5);
    }
}
