//! This lexer splits source text into whitespace-delimited tokens.
//!
//! The lexer knows nothing about mnemonics or operands: a token is
//! just a run of non-whitespace, non-comment characters together
//! with the line it started on. Classifying tokens is the parser's job.

/// A slice of the source text and the (1-based) line it appears on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, line: usize) -> Self {
        Token { text, line }
    }
}

/// Tokenizes the whole source. The source is borrowed, never modified;
/// every returned token is a slice of it.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token> = Vec::with_capacity(256);
    let mut line: usize = 1;
    let mut start: Option<usize> = None;
    let mut in_comment = false;

    for (idx, c) in source.char_indices() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
                line += 1;
            }
            continue;
        }

        match c {
            ';' => {
                flush(source, &mut start, idx, line, &mut tokens);
                in_comment = true;
            },
            '\n' => {
                flush(source, &mut start, idx, line, &mut tokens);
                line += 1;
            },
            c if is_space(c) => flush(source, &mut start, idx, line, &mut tokens),
            _ => {
                if start.is_none() {
                    start = Some(idx);
                }
            },
        }
    }
    // Process any final token that may be pending at end of input.
    flush(source, &mut start, source.len(), line, &mut tokens);

    trace!("lexer produced {} token(s) over {} line(s)", tokens.len(), line);
    tokens
}

/// ASCII whitespace, including vertical tab. Other Unicode spaces
/// are ordinary token characters.
#[inline]
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Closes the pending token, if any, ending just before `end`.
#[inline]
fn flush<'a>(source: &'a str, start: &mut Option<usize>, end: usize, line: usize, tokens: &mut Vec<Token<'a>>) {
    if let Some(begin) = start.take() {
        tokens.push(Token::new(&source[begin..end], line));
    }
}
