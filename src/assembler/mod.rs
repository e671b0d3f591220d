//! The Assembler module is in charge of taking baseline PIC
//! source text and producing the packed program image.
//!
//! It does this with a whitespace tokenizer, a single-pass
//! table-driven parser and a bit-packing encoder. Nothing here
//! prints or exits: fatal problems come back as an [`AsmError`].

pub mod ast;
pub mod diagnostic;
pub mod encoder;
pub mod lexer;
pub mod literal;
pub mod parser;

use diagnostic::{AsmError, Warning};
use parser::{Label, ParseOutput};
use ast::Instruction;

/// Everything produced by one successful run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assembly {
    pub instructions: Vec<Instruction>,
    pub labels:       Vec<Label>,
    pub bytes:        Vec<u8>,
    pub warnings:     Vec<Warning>,
}

/// Runs the whole pipeline over a fully loaded source.
pub fn assemble(source: &str) -> Result<Assembly, AsmError> {
    let tokens = lexer::tokenize(source);
    info!("{} token(s)", tokens.len());

    let ParseOutput { instructions, labels } = parser::Parser::new(tokens).run()?;
    info!("{} instruction(s), {} label(s)", instructions.len(), labels.len());

    let encoded = encoder::encode(&instructions);
    Ok(Assembly { instructions, labels, bytes: encoded.bytes, warnings: encoded.warnings })
}
