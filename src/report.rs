use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use owo_colors::OwoColorize;
use regex::Regex;

use crate::driver::{CompilationStats, Compiler};
use crate::frontend::token::Token;
use crate::semantic::printer::print_ast;
use crate::semantic::symboltable::{InternTable, SymbolTables};
use crate::utils::errors::{Diagnostic, SignalError, SignalResult};

lazy_static! {
    static ref ANSI_ESCAPE: Regex = Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI pattern");
}

/// Which optional sections to include next to the error list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub show_tokens: bool,
    pub show_tables: bool,
    pub show_ast: bool,
}

pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

pub fn render_errors(errors: &[Diagnostic]) -> SignalResult<String> {
    let mut out = String::new();
    if errors.is_empty() {
        writeln!(out, "{}", "No errors.".green())?;
        return Ok(out);
    }
    writeln!(out, "{}", format!("Errors ({}):", errors.len()).red().bold())?;
    for error in errors {
        writeln!(out, "  {}", error.to_string().red())?;
    }
    Ok(out)
}

pub fn render_tokens(tokens: &[Token]) -> SignalResult<String> {
    let mut out = String::new();
    writeln!(out, "{}", "Tokens:".cyan().bold())?;
    writeln!(out, "  {:>5} {:>6} {:>6}  {}", "line", "column", "code", "lexeme")?;
    for token in tokens {
        writeln!(
            out,
            "  {:>5} {:>6} {:>6}  {}",
            token.line,
            token.column,
            token.code,
            token.lexeme.yellow()
        )
        ?;
    }
    Ok(out)
}

fn render_table(out: &mut String, title: &str, table: &InternTable) -> SignalResult<()> {
    writeln!(out, "{}", title.cyan().bold())?;
    if table.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for (code, lexeme) in table.records() {
        writeln!(out, "  {:>6}  {}", code, lexeme)?;
    }
    Ok(())
}

pub fn render_tables(tables: &SymbolTables) -> SignalResult<String> {
    let mut out = String::new();
    render_table(&mut out, "Identifiers:", &tables.identifiers)?;
    render_table(&mut out, "Constants:", &tables.constants)?;
    render_table(&mut out, "Keywords:", &tables.keywords)?;
    Ok(out)
}

pub fn render_stats(stats: &CompilationStats) -> SignalResult<String> {
    let mut out = String::new();
    writeln!(out, "{}", "Compilation Statistics:".cyan().bold())?;
    writeln!(out, "  Lexical Analysis  {:>8.3}s", stats.lexer_time)?;
    writeln!(out, "  Parsing           {:>8.3}s", stats.parser_time)?;
    writeln!(out, "  Code Generation   {:>8.3}s", stats.codegen_time)?;
    writeln!(out, "  Assemble + Link   {:>8.3}s", stats.build_time)?;
    writeln!(out, "  Total             {:>8.3}s", stats.total_time)?;
    writeln!(out, "  Tokens:        {}", stats.token_count)?;
    writeln!(out, "  AST Nodes:     {}", stats.ast_size)?;
    writeln!(out, "  Listing Lines: {}", stats.listing_lines)?;
    Ok(out)
}

/// Full report for one compilation. The error list always comes last so it is the
/// first thing seen at the bottom of a terminal.
pub fn render(compiler: &Compiler, options: ReportOptions) -> SignalResult<String> {
    let mut out = String::new();
    if let Some(data) = compiler.lexer_data() {
        if options.show_tokens {
            out.push_str(&render_tokens(data.source_tokens())?);
            out.push('\n');
        }
        if options.show_tables {
            out.push_str(&render_tables(&data.tables)?);
            out.push('\n');
        }
        if options.show_ast {
            if let Some(ast) = compiler.ast() {
                writeln!(out, "{}", "Abstract Syntax Tree:".cyan().bold())?;
                out.push_str(&print_ast(ast, &data.tables)?);
                out.push('\n');
            }
        }
    }
    out.push_str(&render_errors(compiler.errors().errors())?);
    Ok(out)
}

/// Persists `report` without colour codes.
pub fn write_info_file(path: &Path, report: &str) -> SignalResult<()> {
    fs::write(path, strip_ansi(report).as_bytes()).map_err(|source| SignalError::OutputFile {
        path: path.to_path_buf(),
        source,
    })
}
