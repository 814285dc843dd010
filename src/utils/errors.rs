use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::frontend::token::Token;

/// Fatal failures. These travel with `?` inside a single stage and are turned into a
/// [`Diagnostic`] at the stage boundary.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("No such file or directory: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Incorrect input file type: .{extension}; expected file extension \".sig\"")]
    InvalidExtension { extension: String },

    #[error("Can't open file for write: {}: {source}", path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Undeclared identifier '{name}'")]
    UndeclaredIdentifier {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("{stage} failed:\n{output}")]
    Build { stage: String, output: String },

    #[error("Formatting failed: {0}")]
    Format(#[from] fmt::Error),
}

impl SignalError {
    pub fn build_error(stage: impl Into<String>, output: impl Into<String>) -> Self {
        SignalError::Build {
            stage: stage.into(),
            output: output.into(),
        }
    }

    pub fn undeclared(token: &Token) -> Self {
        SignalError::UndeclaredIdentifier {
            name: token.lexeme.clone(),
            line: token.line,
            column: token.column,
        }
    }

    /// Source position carried by the error, if any.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            SignalError::UndeclaredIdentifier { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

pub type SignalResult<T> = Result<T, SignalError>;

/// The stage that raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorInstigator {
    FileIO,
    Lexer,
    Parser,
    CodeGenerator,
    Compiler,
}

impl fmt::Display for ErrorInstigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorInstigator::FileIO => "File IO",
            ErrorInstigator::Lexer => "Lexer",
            ErrorInstigator::Parser => "Parser",
            ErrorInstigator::CodeGenerator => "Code Generator",
            ErrorInstigator::Compiler => "Compiler",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileIo,
    Lexical,
    Syntax,
    Semantic,
    Build,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::FileIo => "file error",
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Semantic => "semantic error",
            ErrorKind::Build => "build error",
            ErrorKind::Internal => "internal error",
        };
        f.write_str(name)
    }
}

/// One entry of the shared error list. Line 0 means "no source position".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub instigator: ErrorInstigator,
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        instigator: ErrorInstigator,
        kind: ErrorKind,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            instigator,
            kind,
            line,
            column,
            message: message.into(),
        }
    }

    pub fn lexical(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorInstigator::Lexer, ErrorKind::Lexical, line, column, message)
    }

    /// Syntax error positioned at `token`; the message names the token or says "at end".
    pub fn syntax(token: &Token, message: &str) -> Self {
        let message = if token.is_eof() {
            format!("at end; {}", message)
        } else {
            format!("at '{}'; {}", token.lexeme, message)
        };
        Self::new(
            ErrorInstigator::Parser,
            ErrorKind::Syntax,
            token.line,
            token.column,
            message,
        )
    }

    /// Builds a diagnostic out of a fatal error raised by `instigator`.
    pub fn from_error(instigator: ErrorInstigator, error: &SignalError) -> Self {
        let kind = match error {
            SignalError::FileNotFound { .. }
            | SignalError::InvalidExtension { .. }
            | SignalError::OutputFile { .. }
            | SignalError::Io(_) => ErrorKind::FileIo,
            SignalError::UndeclaredIdentifier { .. } => ErrorKind::Semantic,
            SignalError::Build { .. } => ErrorKind::Build,
            SignalError::Format(_) => ErrorKind::Internal,
        };
        let (line, column) = error.position().unwrap_or((0, 0));
        Self::new(instigator, kind, line, column, error.to_string())
    }

    pub fn has_position(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.instigator)?;
        if self.has_position() {
            write!(f, "({},{}): ", self.line, self.column)?;
        }
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Ordered error list plus the fatal flag the driver checks between stages.
#[derive(Debug, Default)]
pub struct ErrorHandler {
    errors: Vec<Diagnostic>,
    fatal: bool,
}

impl ErrorHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::debug!("reported: {}", diagnostic);
        self.errors.push(diagnostic);
    }

    /// Records a fatal error and raises the fatal flag.
    pub fn report_fatal(&mut self, instigator: ErrorInstigator, error: &SignalError) {
        self.report(Diagnostic::from_error(instigator, error));
        self.fatal = true;
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_fatal_error(&self) -> bool {
        self.fatal
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|error| error.kind == kind).count()
    }
}
