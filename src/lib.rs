use std::path::Path;

pub mod ast;
pub mod codegen;
pub mod driver;
pub mod frontend;
pub mod report;
pub mod semantic;
pub mod toolchain;
pub mod utils;

use crate::utils::config::driver::SOURCE_EXTENSION;
use crate::utils::errors::{SignalError, SignalResult};

/// Checks that `path` names a `.sig` source file that exists.
pub fn validate_source_path(path: &Path) -> SignalResult<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext == SOURCE_EXTENSION => {}
        other => {
            return Err(SignalError::InvalidExtension {
                extension: other.unwrap_or_default().to_string(),
            })
        }
    }
    if !path.is_file() {
        return Err(SignalError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Lexes and parses `source`, returning the tree and everything the lexer collected.
pub fn parse_source(
    source: &str,
    errors: &mut utils::errors::ErrorHandler,
) -> (frontend::LexerData, ast::SignalProgram) {
    let data = frontend::lexer::scan(source, errors);
    let program = frontend::parser::parse(&data.tokens, errors);
    (data, program)
}
