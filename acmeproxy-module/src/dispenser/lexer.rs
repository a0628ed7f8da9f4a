//! Splits configuration text into tokens.
//!
//! Tokens are separated by whitespace. A token starting with `"` runs to the
//! next unescaped `"` (only `\"` is unescaped inside it); a token starting
//! with a backtick runs to the next backtick verbatim. A `#` at the start of
//! a token begins a comment that runs to the end of the line. Braces are
//! ordinary tokens, so placeholders such as `{env.TOKEN}` stay whole.

use crate::dispenser::token::{Location, Token};
use crate::error::LexError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Backtick,
}

struct Lexer<'a> {
    file: &'a str,
    tokens: Vec<Token>,
    text: String,
    start: (usize, usize),
    quote: Option<Quote>,
}

impl Lexer<'_> {
    fn begin(&mut self, line: usize, column: usize) {
        if self.text.is_empty() {
            self.start = (line, column);
        }
    }

    fn finish(&mut self, quoted: bool) {
        if self.text.is_empty() && !quoted {
            return;
        }
        let (line, column) = self.start;
        self.tokens.push(Token {
            file: self.file.to_string(),
            line,
            column,
            text: std::mem::take(&mut self.text),
            quoted,
        });
    }

    fn location(&self) -> Location {
        Location {
            file: self.file.to_string(),
            line: self.start.0,
            column: self.start.1,
        }
    }
}

/// Tokenize `input`, attributing every token to `file`.
///
/// Fails on an unterminated quote or on unbalanced unquoted braces.
pub fn tokenize(file: &str, input: &str) -> Result<Vec<Token>, LexError> {
    let mut lx = Lexer {
        file,
        tokens: Vec::new(),
        text: String::new(),
        start: (1, 1),
        quote: None,
    };
    let mut line = 1;
    let mut column = 0;
    let mut escaped = false;
    let mut in_comment = false;

    for ch in input.chars() {
        column += 1;

        if in_comment {
            in_comment = ch != '\n';
        } else {
            match lx.quote {
                Some(Quote::Double) => {
                    if escaped {
                        if ch != '"' {
                            lx.text.push('\\');
                        }
                        lx.text.push(ch);
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        lx.quote = None;
                        lx.finish(true);
                    } else {
                        lx.text.push(ch);
                    }
                }
                Some(Quote::Backtick) => {
                    if ch == '`' {
                        lx.quote = None;
                        lx.finish(true);
                    } else {
                        lx.text.push(ch);
                    }
                }
                None => {
                    if ch.is_whitespace() {
                        lx.finish(false);
                    } else if lx.text.is_empty() && ch == '#' {
                        in_comment = true;
                    } else if lx.text.is_empty() && (ch == '"' || ch == '`') {
                        lx.begin(line, column);
                        lx.quote = Some(if ch == '"' {
                            Quote::Double
                        } else {
                            Quote::Backtick
                        });
                    } else {
                        lx.begin(line, column);
                        lx.text.push(ch);
                    }
                }
            }
        }

        if ch == '\n' {
            line += 1;
            column = 0;
        }
    }

    if lx.quote.is_some() {
        return Err(LexError::UnterminatedQuote {
            location: lx.location(),
        });
    }
    lx.finish(false);

    check_braces(&lx.tokens)?;
    Ok(lx.tokens)
}

fn check_braces(tokens: &[Token]) -> Result<(), LexError> {
    let mut open: Vec<&Token> = Vec::new();
    for token in tokens {
        if token.is_block_open() {
            open.push(token);
        } else if token.is_block_close() && open.pop().is_none() {
            return Err(LexError::UnexpectedClosingBrace {
                location: token.location(),
            });
        }
    }
    match open.pop() {
        Some(token) => Err(LexError::UnclosedBrace {
            location: token.location(),
        }),
        None => Ok(()),
    }
}
