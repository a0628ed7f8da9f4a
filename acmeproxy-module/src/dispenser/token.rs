use serde::Serialize;

/// Source position of a token, used to point diagnostics at the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Name of the file the token was read from.
    pub file: String,
    /// 1-indexed line; 0 when the stream holds no tokens.
    pub line: usize,
    /// 1-indexed column; 0 when the stream holds no tokens.
    pub column: usize,
}

impl Location {
    pub(crate) fn start_of(file: &str) -> Self {
        Self {
            file: file.to_string(),
            line: 0,
            column: 0,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// File the token came from.
    pub file: String,
    /// Line the token starts on (1-indexed).
    pub line: usize,
    /// Column the token starts at (1-indexed, in chars).
    pub column: usize,
    /// Token text with quotes removed.
    pub text: String,
    /// Whether the token was written in quotes.
    pub quoted: bool,
}

impl Token {
    /// Position of this token.
    pub fn location(&self) -> Location {
        Location {
            file: self.file.clone(),
            line: self.line,
            column: self.column,
        }
    }

    /// An unquoted `{`.
    pub fn is_block_open(&self) -> bool {
        !self.quoted && self.text == "{"
    }

    /// An unquoted `}`.
    pub fn is_block_close(&self) -> bool {
        !self.quoted && self.text == "}"
    }

    /// Line breaks inside the token (quoted tokens may span lines).
    pub(crate) fn line_breaks(&self) -> usize {
        self.text.matches('\n').count()
    }

    /// Whether `next` starts on a later line than `self` ends on.
    pub(crate) fn is_followed_on_new_line(&self, next: &Self) -> bool {
        self.file != next.file || self.line + self.line_breaks() < next.line
    }
}
