use std::fmt;

use crate::utils::config::codes;

/// Category of a token, recovered from the numeric range its code falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Eof,
    Delimiter,
    MultiDelimiter,
    Keyword,
    Constant,
    Identifier,
    Unknown,
}

impl TokenCategory {
    pub fn of(code: u32) -> Self {
        match code {
            codes::EOF => TokenCategory::Eof,
            c if c >= codes::IDENTIFIER_BASE => TokenCategory::Identifier,
            c if c >= codes::CONSTANT_BASE => TokenCategory::Constant,
            c if c > codes::KEYWORD_BASE => TokenCategory::Keyword,
            c if c > codes::DELIMITER_BASE && c < codes::KEYWORD_BASE => {
                TokenCategory::MultiDelimiter
            }
            c if c > codes::EMPTY && c < 256 => TokenCategory::Delimiter,
            _ => TokenCategory::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line: usize,
    pub column: usize,
    pub code: u32,
    pub lexeme: String,
}

impl Token {
    pub fn new(line: usize, column: usize, code: u32, lexeme: impl Into<String>) -> Self {
        Self {
            line,
            column,
            code,
            lexeme: lexeme.into(),
        }
    }

    /// The synthetic end-of-file sentinel the parser relies on.
    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(line, column, codes::EOF, "")
    }

    pub fn category(&self) -> TokenCategory {
        TokenCategory::of(self.code)
    }

    pub fn is_eof(&self) -> bool {
        self.code == codes::EOF
    }

    pub fn is_identifier(&self) -> bool {
        self.category() == TokenCategory::Identifier
    }

    pub fn is_constant(&self) -> bool {
        self.category() == TokenCategory::Constant
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {} '{}'", self.line, self.column, self.code, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ranges() {
        assert_eq!(TokenCategory::of(codes::EOF), TokenCategory::Eof);
        assert_eq!(TokenCategory::of(codes::SEMICOLON), TokenCategory::Delimiter);
        assert_eq!(TokenCategory::of(codes::ASSIGN), TokenCategory::MultiDelimiter);
        assert_eq!(TokenCategory::of(codes::PROGRAM), TokenCategory::Keyword);
        assert_eq!(TokenCategory::of(codes::ENDIF), TokenCategory::Keyword);
        assert_eq!(TokenCategory::of(codes::CONSTANT_BASE), TokenCategory::Constant);
        assert_eq!(TokenCategory::of(codes::IDENTIFIER_BASE - 1), TokenCategory::Constant);
        assert_eq!(TokenCategory::of(codes::IDENTIFIER_BASE), TokenCategory::Identifier);
        assert_eq!(TokenCategory::of(codes::IDENTIFIER_BASE + 500), TokenCategory::Identifier);
        assert_eq!(TokenCategory::of(codes::NONE), TokenCategory::Unknown);
    }
}
