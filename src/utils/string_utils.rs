use crate::utils::errors::SignalResult;

/// Helper function for writing formatted strings to a buffer.
/// Used by the code emitter and the AST printer.
pub fn write_line(buf: &mut String, args: std::fmt::Arguments) -> SignalResult<()> {
    use std::fmt::Write;
    buf.write_fmt(args)?;
    buf.write_char('\n')?;
    Ok(())
}

/// Leading decimal digits of a lexeme; a constant with an invalid suffix keeps its digits.
pub fn leading_digits(lexeme: &str) -> &str {
    let end = lexeme
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(lexeme.len());
    &lexeme[..end]
}
