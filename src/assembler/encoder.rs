//! Packs instructions into a contiguous bit-stream.
//!
//! Words are not padded to byte boundaries: a 12-bit instruction may
//! start in the middle of a byte. Only the last byte is zero-filled.
use super::ast::Instruction;
use super::diagnostic::Warning;

/// Appends fields most significant bit first, filling each byte from
/// its top bit down.
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    bytes:  Vec<u8>,
    // Bits already used in the last byte, 0-7. Zero means a new
    // byte is needed before the next bit.
    cursor: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the low `bits` bits of `value`. Returns false if any
    /// higher bit was set and had to be dropped.
    pub fn write(&mut self, value: u32, bits: u8) -> bool {
        let mask = if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 };
        let fits = value & mask == value;

        for i in (0..bits).rev() {
            if self.cursor == 0 {
                self.bytes.push(0);
            }
            let bit = ((value >> i) & 0x1) as u8;
            if let Some(byte) = self.bytes.last_mut() {
                *byte |= bit << (7 - self.cursor);
            }
            self.cursor = (self.cursor + 1) % 8;
        }

        fits
    }

    pub fn bit_len(&self) -> usize {
        match self.cursor {
            0 => self.bytes.len() * 8,
            used => (self.bytes.len() - 1) * 8 + used as usize,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The packed program and any truncation warnings raised while packing.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Encoded {
    pub bytes:    Vec<u8>,
    pub warnings: Vec<Warning>,
}

/// Encodes the instructions in order.
pub fn encode(instructions: &[Instruction]) -> Encoded {
    let mut writer = BitWriter::new();
    let mut warnings = Vec::new();

    for ins in instructions {
        let enc = ins.opcode.encoding();
        let prefix_fits = writer.write(enc.prefix as u32, enc.prefix_bits);
        debug_assert!(prefix_fits, "{} prefix wider than {} bits", ins.opcode, enc.prefix_bits);

        for (field, bits) in enc.fields {
            let value = ins.get(*field);
            if !writer.write(value, *bits) {
                let warning = Warning { line: ins.line, bits: *bits, value };
                debug!("line {}: {} field {} truncated to 0x{:X}", ins.line, ins.opcode, field, warning.truncated());
                warnings.push(warning);
            }
        }
    }

    debug!("encoded {} instruction(s) into {} bit(s)", instructions.len(), writer.bit_len());
    Encoded { bytes: writer.into_bytes(), warnings }
}

/// Renders bytes for the console: each byte as two 4-bit groups,
/// each group followed by a space.
pub fn format_binary(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 10);
    for byte in bytes {
        s.push_str(&format!("{:04b} {:04b} ", byte >> 4, byte & 0x0F));
    }
    s
}
