//! Compilers for the date and number format strings carried in schema metadata.
//!
//! Both follow the pattern-letter conventions of the schema store
//! (`yyyy-MM-dd HH:mm:ss`, `#,##0.00`), rendered locale-invariantly.

mod date;
mod number;

pub use date::DatePattern;
pub use number::NumberPattern;

/// A format string could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct PatternError {
    pub detail: String,
}

impl PatternError {
    pub(crate) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Split the pattern into literal and letter-run tokens, honouring
/// `'quoted'` literals and the `''` escape for a single quote.
///
/// `is_letter` decides which unquoted characters form runs of the same
/// character; everything else is literal.
pub(crate) fn tokenize(
    pattern: &str,
    is_letter: impl Fn(char) -> bool,
) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                push_literal(&mut tokens, '\'', true);
                continue;
            }
            let mut closed = false;
            while let Some(q) = chars.next() {
                if q == '\'' {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        push_literal(&mut tokens, '\'', true);
                        continue;
                    }
                    closed = true;
                    break;
                }
                push_literal(&mut tokens, q, true);
            }
            if !closed {
                return Err(PatternError::new("unterminated quote"));
            }
        } else if is_letter(c) {
            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            tokens.push(Token::Run(c, count));
        } else {
            push_literal(&mut tokens, c, false);
        }
    }

    Ok(tokens)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Unquoted non-letter characters.
    Literal(String),
    /// Characters taken verbatim from a quoted section.
    Quoted(String),
    /// `count` repetitions of a pattern letter.
    Run(char, usize),
}

fn push_literal(tokens: &mut Vec<Token>, c: char, quoted: bool) {
    match (tokens.last_mut(), quoted) {
        (Some(Token::Quoted(text)), true) | (Some(Token::Literal(text)), false) => text.push(c),
        (_, true) => tokens.push(Token::Quoted(c.to_string())),
        (_, false) => tokens.push(Token::Literal(c.to_string())),
    }
}
