use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, trace};

use crate::frontend::token::Token;
use crate::semantic::symboltable::SymbolTables;
use crate::utils::config::{codes, lexer::FIRST_LINE, lexer::TAB_WIDTH};
use crate::utils::errors::{Diagnostic, ErrorHandler, ErrorInstigator, SignalError};

/// Class of a source byte; drives the lexer's state dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    None,
    WhiteSpace,
    Identifier,
    Constant,
    UnaryDelimiter,
    MultiDelimiter,
    CommentStart,
}

impl CharClass {
    /// Classes that may legally follow an integer constant.
    fn ends_constant(self) -> bool {
        matches!(
            self,
            CharClass::WhiteSpace
                | CharClass::UnaryDelimiter
                | CharClass::MultiDelimiter
                | CharClass::CommentStart
        )
    }
}

fn build_char_classes() -> [CharClass; 256] {
    let mut classes = [CharClass::None; 256];
    for byte in 8..14 {
        classes[byte] = CharClass::WhiteSpace;
    }
    classes[b' ' as usize] = CharClass::WhiteSpace;
    for byte in b'0'..=b'9' {
        classes[byte as usize] = CharClass::Constant;
    }
    // '@' sits right before 'A'
    for byte in b'@'..=b'Z' {
        classes[byte as usize] = CharClass::Identifier;
    }
    for byte in b'a'..=b'z' {
        classes[byte as usize] = CharClass::Identifier;
    }
    classes[b'_' as usize] = CharClass::Identifier;
    classes[b'(' as usize] = CharClass::CommentStart;
    classes[b':' as usize] = CharClass::MultiDelimiter;
    classes[b';' as usize] = CharClass::UnaryDelimiter;
    classes[b'=' as usize] = CharClass::UnaryDelimiter;
    classes[b'.' as usize] = CharClass::UnaryDelimiter;
    classes
}

lazy_static! {
    static ref CHAR_CLASSES: [CharClass; 256] = build_char_classes();
}

pub fn char_class(byte: u8) -> CharClass {
    CHAR_CLASSES[byte as usize]
}

/// Everything the lexer hands to later stages and to the reporting layer.
#[derive(Debug, Clone)]
pub struct LexerData {
    pub tokens: Vec<Token>,
    pub tables: SymbolTables,
}

impl LexerData {
    /// Tokens without the trailing end-of-file sentinel.
    pub fn source_tokens(&self) -> &[Token] {
        match self.tokens.split_last() {
            Some((last, rest)) if last.is_eof() => rest,
            _ => &self.tokens,
        }
    }
}

pub struct Lexer<'a> {
    source: &'a [u8],
    offset: usize,
    current: Option<u8>,
    line: usize,
    column: usize,
    buffer: String,
    tokens: Vec<Token>,
    tables: SymbolTables,
    errors: &'a mut ErrorHandler,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], errors: &'a mut ErrorHandler) -> Self {
        Self {
            source,
            offset: 0,
            current: None,
            line: FIRST_LINE,
            column: 0,
            buffer: String::new(),
            tokens: Vec::new(),
            tables: SymbolTables::new(),
            errors,
        }
    }

    pub fn scan(mut self) -> LexerData {
        self.next();
        while let Some(class) = self.class() {
            match class {
                CharClass::WhiteSpace => self.white_space_state(),
                CharClass::Identifier => self.identifier_state(),
                CharClass::Constant => self.constant_state(),
                CharClass::UnaryDelimiter => self.unary_delimiter_state(),
                CharClass::MultiDelimiter => self.multi_delimiter_state(),
                CharClass::CommentStart => self.comment_state(),
                CharClass::None => {
                    let ch = self.current.map(char::from).unwrap_or_default();
                    self.report(
                        self.line,
                        self.column,
                        format!("Illegal character '{}' found", ch),
                    );
                    self.next();
                }
            }
        }
        self.tokens.push(Token::eof(self.line, self.column));
        self.tables.seal();
        debug!(
            "lexing finished: {} tokens, {} identifiers, {} constants",
            self.tokens.len(),
            self.tables.identifiers.len(),
            self.tables.constants.len()
        );
        LexerData {
            tokens: self.tokens,
            tables: self.tables,
        }
    }

    fn next(&mut self) {
        self.current = self.source.get(self.offset).copied();
        self.offset += 1;
        match self.current {
            Some(b'\n') => {
                self.line += 1;
                self.column = 0;
            }
            Some(b'\t') => self.column += TAB_WIDTH,
            _ => self.column += 1,
        }
    }

    fn class(&self) -> Option<CharClass> {
        self.current.map(char_class)
    }

    fn report(&mut self, line: usize, column: usize, message: String) {
        self.errors.report(Diagnostic::lexical(line, column, message));
    }

    fn push_current(&mut self) {
        if let Some(byte) = self.current {
            self.buffer.push(char::from(byte));
        }
    }

    fn emit(&mut self, line: usize, column: usize, code: u32) {
        let lexeme = std::mem::take(&mut self.buffer);
        let token = Token::new(line, column, code, lexeme);
        trace!("token {}", token);
        self.tokens.push(token);
    }

    fn white_space_state(&mut self) {
        while self.class() == Some(CharClass::WhiteSpace) {
            self.next();
        }
    }

    fn identifier_state(&mut self) {
        let (line, column) = (self.line, self.column);
        while matches!(
            self.class(),
            Some(CharClass::Identifier) | Some(CharClass::Constant)
        ) {
            self.push_current();
            self.next();
        }
        let code = match self.tables.keywords.get(&self.buffer) {
            Some(code) => code,
            None => self.tables.identifiers.intern(&self.buffer),
        };
        self.emit(line, column, code);
    }

    fn constant_state(&mut self) {
        let (line, column) = (self.line, self.column);
        while self.class() == Some(CharClass::Constant) {
            self.push_current();
            self.next();
        }
        if self.buffer.parse::<u32>().is_err() {
            let message = format!("Integer constant \"{}\" is out of range", self.buffer);
            self.report(line, column, message);
        }
        if matches!(self.class(), Some(class) if !class.ends_constant()) {
            let mut suffix = String::new();
            while let Some(class) = self.class() {
                if class.ends_constant() {
                    break;
                }
                if let Some(byte) = self.current {
                    suffix.push(char::from(byte));
                }
                self.next();
            }
            self.buffer.push_str(&suffix);
            let message = format!(
                "Invalid suffix \"{}\" on integer constant \"{}\"",
                suffix, self.buffer
            );
            self.report(line, column, message);
        }
        let code = self.tables.constants.intern(&self.buffer);
        self.emit(line, column, code);
    }

    fn unary_delimiter_state(&mut self) {
        let (line, column) = (self.line, self.column);
        let code = self.current.map(u32::from).unwrap_or(codes::NONE);
        self.push_current();
        self.next();
        self.emit(line, column, code);
    }

    fn multi_delimiter_state(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut code = self.current.map(u32::from).unwrap_or(codes::NONE);
        self.push_current();
        self.next();
        if self.current == Some(b'=') {
            self.push_current();
            if let Some(assign) = self.tables.keywords.get(&self.buffer) {
                code = assign;
            }
            self.next();
        }
        self.emit(line, column, code);
    }

    fn comment_state(&mut self) {
        let (line, column) = (self.line, self.column);
        self.next();
        if self.current == Some(b'*') {
            self.in_comment_state(line, column);
        } else {
            self.report(line, column, "Missing '*' after '(' in comment".to_string());
        }
    }

    // Comments do not nest: a "(*" inside a comment is ordinary text.
    fn in_comment_state(&mut self, line: usize, column: usize) {
        self.next();
        loop {
            match self.current {
                None => {
                    self.report(line, column, "Comment not closed".to_string());
                    return;
                }
                Some(b'*') => {
                    while self.current == Some(b'*') {
                        self.next();
                    }
                    if self.current == Some(b')') {
                        self.next();
                        return;
                    }
                }
                Some(_) => self.next(),
            }
        }
    }
}

/// Scans in-memory source text.
pub fn scan(source: &str, errors: &mut ErrorHandler) -> LexerData {
    Lexer::new(source.as_bytes(), errors).scan()
}

/// Scans a source file. A missing or unreadable file is fatal and produces no tokens.
pub fn scan_file(path: &Path, errors: &mut ErrorHandler) -> Option<LexerData> {
    debug!("scanning {}", path.display());
    match fs::read(path) {
        Ok(bytes) => Some(Lexer::new(&bytes, errors).scan()),
        Err(err) => {
            let error = if err.kind() == std::io::ErrorKind::NotFound {
                SignalError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SignalError::Io(err)
            };
            errors.report_fatal(ErrorInstigator::FileIO, &error);
            None
        }
    }
}
