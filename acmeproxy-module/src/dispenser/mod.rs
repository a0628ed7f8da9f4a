//! Cursor over a tokenized configuration block.
//!
//! [`TokenStream`] is the capability the directive parser needs from a host:
//! walk tokens, stay on the current line for arguments, step through the lines
//! of a `{ ... }` block, and report where the cursor is. [`Dispenser`] is the
//! reference implementation over [`tokenize`] output.

mod lexer;
mod token;

pub use lexer::tokenize;
pub use token::{Location, Token};

use crate::error::{LexError, ParseError, ParseErrorKind};

/// File name used by [`Dispenser::new_test`].
pub const TEST_FILE: &str = "Testfile";

/// Token cursor grouped into lines and nested blocks.
pub trait TokenStream {
    /// Advance to the next token regardless of line or nesting.
    fn next(&mut self) -> bool;

    /// Advance to the next token only if it is on the current line and does
    /// not open a block.
    fn next_arg(&mut self) -> bool;

    /// Advance to the first token of the next line inside the block opened at
    /// `initial_nesting`, entering the block first if the cursor sits right
    /// before its `{`. Returns `false` once the block's `}` is consumed.
    fn next_block(&mut self, initial_nesting: usize) -> bool;

    /// Current block depth.
    fn nesting(&self) -> usize;

    /// Text of the current token, or `""` before the first token.
    fn val(&self) -> &str;

    /// Position of the current token.
    fn location(&self) -> Location;

    /// Error of the given kind at the current token.
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.location())
    }

    /// Argument count error after the current token.
    fn arg_err(&self) -> ParseError {
        self.error(ParseErrorKind::ArgumentCount {
            after: self.val().to_string(),
        })
    }

    /// Unrecognized subdirective error naming the current token.
    fn unknown_directive(&self) -> ParseError {
        self.error(ParseErrorKind::UnknownDirective {
            name: self.val().to_string(),
        })
    }
}

/// Reference [`TokenStream`] over an owned token list.
#[derive(Debug, Clone)]
pub struct Dispenser {
    file: String,
    tokens: Vec<Token>,
    /// Number of tokens consumed; the current token is `tokens[consumed - 1]`.
    consumed: usize,
    nesting: usize,
}

impl Dispenser {
    /// Tokenize `input` read from `file`.
    pub fn new(file: impl Into<String>, input: &str) -> Result<Self, LexError> {
        let file = file.into();
        let tokens = tokenize(&file, input)?;
        Ok(Self::from_tokens(file, tokens))
    }

    /// Wrap tokens produced elsewhere.
    pub fn from_tokens(file: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            file: file.into(),
            tokens,
            consumed: 0,
            nesting: 0,
        }
    }

    /// Dispenser over `input` attributed to [`TEST_FILE`].
    pub fn new_test(input: &str) -> Result<Self, LexError> {
        Self::new(TEST_FILE, input)
    }

    /// Move the cursor back before the first token.
    pub fn reset(&mut self) {
        self.consumed = 0;
        self.nesting = 0;
    }

    /// Advance to the first token of the next line.
    pub fn next_line(&mut self) -> bool {
        if self.consumed == 0 {
            return TokenStream::next(self);
        }
        if self.next_is_on_new_line() == Some(true) {
            self.consumed += 1;
            true
        } else {
            false
        }
    }

    /// Consume and return every remaining argument on the current line.
    pub fn remaining_args(&mut self) -> Vec<String> {
        let mut args = Vec::new();
        while self.next_arg() {
            args.push(self.val().to_string());
        }
        args
    }

    /// The current token, if the cursor has moved onto one.
    pub fn token(&self) -> Option<&Token> {
        self.current()
    }

    fn current(&self) -> Option<&Token> {
        self.consumed.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.consumed)
    }

    fn next_on_same_line(&mut self) -> bool {
        if self.consumed == 0 {
            return TokenStream::next(self);
        }
        if self.next_is_on_new_line() == Some(false) {
            self.consumed += 1;
            true
        } else {
            false
        }
    }

    /// `None` when there is no current or no next token.
    fn next_is_on_new_line(&self) -> Option<bool> {
        let curr = self.current()?;
        let next = self.peek()?;
        Some(curr.is_followed_on_new_line(next))
    }
}

impl TokenStream for Dispenser {
    fn next(&mut self) -> bool {
        if self.consumed < self.tokens.len() {
            self.consumed += 1;
            true
        } else {
            false
        }
    }

    fn next_arg(&mut self) -> bool {
        if !self.next_on_same_line() {
            return false;
        }
        if self.current().is_some_and(Token::is_block_open) {
            self.consumed -= 1;
            return false;
        }
        true
    }

    fn next_block(&mut self, initial_nesting: usize) -> bool {
        if self.nesting > initial_nesting {
            if !TokenStream::next(self) {
                return false;
            }
            if self.current().is_some_and(Token::is_block_close) {
                self.nesting -= 1;
            } else if self.current().is_some_and(Token::is_block_open) {
                self.nesting += 1;
            }
            return self.nesting > initial_nesting;
        }

        // A block must open on the same line as the tokens that precede it.
        if !self.next_on_same_line() {
            return false;
        }
        if !self.current().is_some_and(Token::is_block_open) {
            self.consumed -= 1;
            return false;
        }
        if !TokenStream::next(self) || self.current().is_some_and(Token::is_block_close) {
            return false;
        }
        self.nesting += 1;
        true
    }

    fn nesting(&self) -> usize {
        self.nesting
    }

    fn val(&self) -> &str {
        self.current().map_or("", |t| t.text.as_str())
    }

    fn location(&self) -> Location {
        self.current()
            .map_or_else(|| Location::start_of(&self.file), Token::location)
    }
}
