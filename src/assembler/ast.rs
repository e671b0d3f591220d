//! This AST describes a parsed baseline (12-bit word) PIC program.
//!
//! Comments are prefixed with semicolons (;) and are single-line only.
//! Tokens are delimited by any whitespace, so an instruction may span
//! several lines. Mnemonics are case-insensitive; every operand is a
//! hexadecimal literal.
//!
//! Supported Instructions:
//!
//! ```nasm
//! ADDWF f d   ; byte-oriented: d selects W (0) or f (1) as destination
//! ANDWF f d
//! COMF  f d
//! DECF  f d
//! DECFSZ f d
//! INCF  f d
//! INCFSZ f d
//! IORWF f d
//! MOVF  f d
//! RLF   f d
//! RRF   f d
//! SUBWF f d
//! SWAPF f d
//! XORWF f d
//! CLRF  f     ; f <= 0
//! MOVWF f     ; f <= W
//! CLRW        ; W <= 0
//! NOP
//!
//! BCF   f b   ; bit-oriented: clear/set/test bit b of f
//! BSF   f b
//! BTFSC f b
//! BTFSS f b
//!
//! ANDLW k     ; literal and control
//! CALL  k
//! GOTO  k     ; 9-bit target
//! IORLW k
//! MOVLW k
//! RETLW k
//! XORLW k
//! TRIS  f     ; 3-bit port select
//! CLRWDT
//! OPTION
//! SLEEP
//! ```
//!
//! Example source file:
//!
//! ```nasm
//! start:              ; labels end with a colon
//!     MOVLW 0x3A      ; all operands are hexadecimal
//!     MOVWF 0x06
//!     bsf   0x03 0x5  ; mnemonics may be any case
//!     GOTO  0x001
//! ```
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Opcode {
    // byte-oriented
    ADDWF,
    ANDWF,
    CLRF,
    CLRW,
    COMF,
    DECF,
    DECFSZ,
    INCF,
    INCFSZ,
    IORWF,
    MOVF,
    MOVWF,
    NOP,
    RLF,
    RRF,
    SUBWF,
    SWAPF,
    XORWF,

    // bit-oriented
    BCF,
    BSF,
    BTFSC,
    BTFSS,

    // literal/control
    ANDLW,
    CALL,
    CLRWDT,
    GOTO,
    IORLW,
    MOVLW,
    OPTION,
    RETLW,
    SLEEP,
    TRIS,
    XORLW,
}

/// The operand fields an instruction can carry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Field {
    /// Register file address.
    F,
    /// Destination flag.
    D,
    /// Literal or jump/call target.
    K,
    /// Bit index.
    B,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Field::F => "f",
            Field::D => "d",
            Field::K => "k",
            Field::B => "b",
        };
        write!(f, "{}", name)
    }
}

/// A fixed bit pattern followed by variable fields, most significant first.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Encoding {
    pub prefix: u16,
    pub prefix_bits: u8,
    pub fields: &'static [(Field, u8)],
}

impl Encoding {
    const fn new(prefix: u16, prefix_bits: u8, fields: &'static [(Field, u8)]) -> Self {
        Encoding { prefix, prefix_bits, fields }
    }
}

const DF: &[(Field, u8)] = &[(Field::D, 1), (Field::F, 5)];
const F5: &[(Field, u8)] = &[(Field::F, 5)];
const BF: &[(Field, u8)] = &[(Field::B, 3), (Field::F, 5)];
const K8: &[(Field, u8)] = &[(Field::K, 8)];
const K9: &[(Field, u8)] = &[(Field::K, 9)];
const F3: &[(Field, u8)] = &[(Field::F, 3)];
const NONE: &[(Field, u8)] = &[];

impl Opcode {
    pub const ALL: [Opcode; 33] = {
        use Opcode::*;
        [
            ADDWF, ANDWF, CLRF, CLRW, COMF, DECF, DECFSZ, INCF, INCFSZ,
            IORWF, MOVF, MOVWF, NOP, RLF, RRF, SUBWF, SWAPF, XORWF,
            BCF, BSF, BTFSC, BTFSS,
            ANDLW, CALL, CLRWDT, GOTO, IORLW, MOVLW, OPTION, RETLW, SLEEP, TRIS, XORLW,
        ]
    };

    /// The canonical (upper-case) mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            ADDWF  => "ADDWF",
            ANDWF  => "ANDWF",
            CLRF   => "CLRF",
            CLRW   => "CLRW",
            COMF   => "COMF",
            DECF   => "DECF",
            DECFSZ => "DECFSZ",
            INCF   => "INCF",
            INCFSZ => "INCFSZ",
            IORWF  => "IORWF",
            MOVF   => "MOVF",
            MOVWF  => "MOVWF",
            NOP    => "NOP",
            RLF    => "RLF",
            RRF    => "RRF",
            SUBWF  => "SUBWF",
            SWAPF  => "SWAPF",
            XORWF  => "XORWF",
            BCF    => "BCF",
            BSF    => "BSF",
            BTFSC  => "BTFSC",
            BTFSS  => "BTFSS",
            ANDLW  => "ANDLW",
            CALL   => "CALL",
            CLRWDT => "CLRWDT",
            GOTO   => "GOTO",
            IORLW  => "IORLW",
            MOVLW  => "MOVLW",
            OPTION => "OPTION",
            RETLW  => "RETLW",
            SLEEP  => "SLEEP",
            TRIS   => "TRIS",
            XORLW  => "XORLW",
        }
    }

    /// Operands in the order they are written in source.
    /// This is not always the order they are encoded in.
    pub fn operands(&self) -> &'static [Field] {
        use Opcode::*;
        match self {
            ADDWF | ANDWF | COMF | DECF | DECFSZ | INCF | INCFSZ |
            IORWF | MOVF  | RLF  | RRF  | SUBWF  | SWAPF | XORWF => &[Field::F, Field::D],

            CLRF | MOVWF | TRIS => &[Field::F],

            BCF | BSF | BTFSC | BTFSS => &[Field::F, Field::B],

            ANDLW | CALL | GOTO | IORLW | MOVLW | RETLW | XORLW => &[Field::K],

            CLRW | NOP | CLRWDT | OPTION | SLEEP => &[],
        }
    }

    /// Returns the bit pattern and field layout of the instruction word.
    pub fn encoding(&self) -> Encoding {
        use Opcode::*;
        match self {
            ADDWF  => Encoding::new(0b0001_11, 6, DF),
            ANDWF  => Encoding::new(0b0001_01, 6, DF),
            CLRF   => Encoding::new(0b0000_011, 7, F5),
            CLRW   => Encoding::new(0b0000_0100_0000, 12, NONE),
            COMF   => Encoding::new(0b0010_01, 6, DF),
            DECF   => Encoding::new(0b0000_11, 6, DF),
            DECFSZ => Encoding::new(0b0010_11, 6, DF),
            INCF   => Encoding::new(0b0010_10, 6, DF),
            INCFSZ => Encoding::new(0b0011_11, 6, DF),
            IORWF  => Encoding::new(0b0001_00, 6, DF),
            MOVF   => Encoding::new(0b0010_00, 6, DF),
            MOVWF  => Encoding::new(0b0000_001, 7, F5),
            NOP    => Encoding::new(0b0000_0000_0000, 12, NONE),
            RLF    => Encoding::new(0b0011_01, 6, DF),
            RRF    => Encoding::new(0b0011_00, 6, DF),
            SUBWF  => Encoding::new(0b0000_10, 6, DF),
            SWAPF  => Encoding::new(0b0011_10, 6, DF),
            XORWF  => Encoding::new(0b0001_10, 6, DF),

            BCF    => Encoding::new(0b0100, 4, BF),
            BSF    => Encoding::new(0b0101, 4, BF),
            BTFSC  => Encoding::new(0b0110, 4, BF),
            BTFSS  => Encoding::new(0b0111, 4, BF),

            ANDLW  => Encoding::new(0b1110, 4, K8),
            CALL   => Encoding::new(0b1001, 4, K8),
            CLRWDT => Encoding::new(0b0000_0000_0100, 12, NONE),
            GOTO   => Encoding::new(0b101, 3, K9),
            IORLW  => Encoding::new(0b1101, 4, K8),
            MOVLW  => Encoding::new(0b1100, 4, K8),
            OPTION => Encoding::new(0b0000_0000_0010, 12, NONE),
            RETLW  => Encoding::new(0b1000, 4, K8),
            SLEEP  => Encoding::new(0b0000_0000_0011, 12, NONE),
            TRIS   => Encoding::new(0b0000_0000_0, 9, F3),
            XORLW  => Encoding::new(0b1111, 4, K8),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// One parsed instruction. Fields the opcode does not use stay zero.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub f: u32,
    pub d: u32,
    pub k: u32,
    pub b: u32,
    /// Source line of the mnemonic.
    pub line: usize,
}

impl Instruction {
    pub fn new(opcode: Opcode, line: usize) -> Self {
        Instruction { opcode, f: 0, d: 0, k: 0, b: 0, line }
    }

    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::F => self.f,
            Field::D => self.d,
            Field::K => self.k,
            Field::B => self.b,
        }
    }

    pub fn set(&mut self, field: Field, value: u32) {
        match field {
            Field::F => self.f = value,
            Field::D => self.d = value,
            Field::K => self.k = value,
            Field::B => self.b = value,
        }
    }

    /// Assembles the instruction to a single 12-bit word.
    /// Oversized operands are silently truncated to their field width.
    pub fn assemble(&self) -> u16 {
        let enc = self.opcode.encoding();
        let mut word = enc.prefix;
        for (field, bits) in enc.fields {
            let mask = (1u32 << bits) - 1;
            word = (word << bits) | (self.get(*field) & mask) as u16;
        }
        word
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for field in self.opcode.operands() {
            write!(f, " 0x{:02X}", self.get(*field))?;
        }
        Ok(())
    }
}
