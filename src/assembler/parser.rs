//! The Parser module takes a token stream (Vec<Token>) from the lexer
//! and converts it into a list of instructions and a label table.
use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;
use super::ast::*;
use super::diagnostic::{AsmError, ErrorKind};
use super::lexer::Token;
use super::literal;

/// A label and the index of the instruction that follows it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Label {
    pub name: String,
    pub target: usize,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ParseOutput {
    pub instructions: Vec<Instruction>,
    pub labels: Vec<Label>,
}

/// Upper-case mnemonic to opcode.
fn mnemonics() -> &'static HashMap<&'static str, Opcode> {
    static TABLE: OnceLock<HashMap<&'static str, Opcode>> = OnceLock::new();
    TABLE.get_or_init(|| Opcode::ALL.iter().map(|op| (op.mnemonic(), *op)).collect())
}

/// Looks up a mnemonic, ignoring case.
pub fn lookup(mnemonic: &str) -> Option<Opcode> {
    mnemonics().get(mnemonic.to_ascii_uppercase().as_str()).copied()
}

pub struct Parser<'a> {
    tokens: VecDeque<Token<'a>>,
    out:    ParseOutput,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Parser{tokens: VecDeque::from(tokens), out: ParseOutput::default()}
    }

    /// Run the parser, consuming itself. Stops at the first error.
    pub fn run(mut self) -> Result<ParseOutput, AsmError> {
        while let Some(tok) = self.consume() {
            if let Some(name) = tok.text.strip_suffix(':') {
                let target = self.out.instructions.len();
                debug!("label `{}` -> instruction {} (line {})", name, target, tok.line);
                self.out.labels.push(Label { name: name.to_owned(), target });
                continue;
            }

            let ins = self.instruction(tok)?;
            self.out.instructions.push(ins);
        }

        Ok(self.out)
    }

    /// Resolves a mnemonic token and consumes its operands.
    fn instruction(&mut self, tok: Token<'a>) -> Result<Instruction, AsmError> {
        let opcode = match lookup(tok.text) {
            Some(op) => op,
            None => return Err(AsmError::new(
                tok.line,
                ErrorKind::UnknownMnemonic(tok.text.to_ascii_uppercase()),
            )),
        };

        let mut ins = Instruction::new(opcode, tok.line);
        for field in opcode.operands() {
            let value = self.number(tok.line)?;
            ins.set(*field, value);
        }

        trace!("line {}: {}", ins.line, ins);
        Ok(ins)
    }

    /// Consumes one hexadecimal operand. `line` is reported if the
    /// stream has run dry.
    fn number(&mut self, line: usize) -> Result<u32, AsmError> {
        match self.consume() {
            Some(tok) => literal::parse_hex(tok.text).ok_or_else(|| AsmError::new(
                tok.line,
                ErrorKind::MalformedLiteral(tok.text.to_owned()),
            )),
            None => Err(AsmError::new(line, ErrorKind::UnexpectedEof)),
        }
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token<'a>> {
        self.tokens.pop_front()
    }
}
