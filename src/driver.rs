use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};

use crate::ast::SignalProgram;
use crate::codegen;
use crate::frontend::lexer::{self, LexerData};
use crate::frontend::parser;
use crate::semantic::NodeCounter;
use crate::toolchain::{self, Toolchain};
use crate::utils::config::assembly::DEFAULT_EXTENSION;
use crate::utils::errors::{ErrorHandler, ErrorInstigator, SignalError};
use crate::validate_source_path;

/// What to compile and how far to go.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    /// Stop after writing the listing; never run the assembler or the linker.
    pub listing_only: bool,
}

impl CompileOptions {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: None,
            listing_only: false,
        }
    }

    /// Explicit output path, or the source stem with the listing extension.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.source.with_extension(DEFAULT_EXTENSION),
        }
    }
}

// Compilation statistics for performance analysis
#[derive(Debug, Default, Clone)]
pub struct CompilationStats {
    pub lexer_time: f64,
    pub parser_time: f64,
    pub codegen_time: f64,
    pub build_time: f64,
    pub total_time: f64,
    pub token_count: usize,
    pub ast_size: usize,
    pub listing_lines: usize,
}

/// Runs lexer, parser, generator and toolchain in order. Every stage records its
/// problems in the shared error handler; a fatal error stops the pipeline.
pub struct Compiler {
    options: CompileOptions,
    errors: ErrorHandler,
    lexer_data: Option<LexerData>,
    ast: Option<SignalProgram>,
    listing: Option<String>,
    built: bool,
    stats: CompilationStats,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            errors: ErrorHandler::new(),
            lexer_data: None,
            ast: None,
            listing: None,
            built: false,
            stats: CompilationStats::default(),
        }
    }

    /// Runs the whole pipeline. Returns `true` when no error of any kind was reported.
    pub fn run(&mut self, toolchain: &dyn Toolchain) -> bool {
        let start = Instant::now();
        info!("compiling {}", self.options.source.display());

        if let Err(error) = validate_source_path(&self.options.source) {
            self.errors.report_fatal(ErrorInstigator::FileIO, &error);
        } else {
            self.lex();
            self.parse();
            self.generate();
            self.build(toolchain);
        }

        self.stats.total_time = start.elapsed().as_secs_f64();
        !self.errors.has_errors()
    }

    pub fn lex(&mut self) {
        if self.errors.has_fatal_error() {
            return;
        }
        let start = Instant::now();
        self.lexer_data = lexer::scan_file(&self.options.source, &mut self.errors);
        self.stats.lexer_time = start.elapsed().as_secs_f64();
        if let Some(data) = &self.lexer_data {
            self.stats.token_count = data.source_tokens().len();
            debug!("lexed {} tokens", self.stats.token_count);
        }
    }

    pub fn parse(&mut self) {
        if self.errors.has_fatal_error() {
            return;
        }
        let Some(data) = &self.lexer_data else {
            return;
        };
        let start = Instant::now();
        let ast = parser::parse(&data.tokens, &mut self.errors);
        self.stats.parser_time = start.elapsed().as_secs_f64();
        self.stats.ast_size = NodeCounter::count(&ast);
        debug!("parsed {} nodes", self.stats.ast_size);
        self.ast = Some(ast);
    }

    /// Writes the listing. Syntax errors do not stop generation; the listing is then
    /// produced for inspection only and never assembled.
    pub fn generate(&mut self) {
        if self.errors.has_fatal_error() {
            return;
        }
        let Some(ast) = &self.ast else {
            return;
        };
        let start = Instant::now();
        let output = self.options.output_path();
        match codegen::write_listing(ast, &output) {
            Ok(listing) => {
                self.stats.listing_lines = listing.lines().count();
                self.listing = Some(listing);
            }
            Err(error) => {
                let instigator = match error {
                    SignalError::OutputFile { .. } => ErrorInstigator::FileIO,
                    _ => ErrorInstigator::CodeGenerator,
                };
                self.errors.report_fatal(instigator, &error);
            }
        }
        self.stats.codegen_time = start.elapsed().as_secs_f64();
    }

    pub fn build(&mut self, toolchain: &dyn Toolchain) {
        if self.options.listing_only || self.errors.has_errors() || self.listing.is_none() {
            return;
        }
        let start = Instant::now();
        let output = self.options.output_path();
        match toolchain::assemble_and_link(toolchain, &output) {
            Ok(()) => self.built = true,
            Err(error) => self.errors.report_fatal(ErrorInstigator::Compiler, &error),
        }
        self.stats.build_time = start.elapsed().as_secs_f64();
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn errors(&self) -> &ErrorHandler {
        &self.errors
    }

    pub fn lexer_data(&self) -> Option<&LexerData> {
        self.lexer_data.as_ref()
    }

    pub fn ast(&self) -> Option<&SignalProgram> {
        self.ast.as_ref()
    }

    pub fn listing(&self) -> Option<&str> {
        self.listing.as_deref()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn stats(&self) -> &CompilationStats {
        &self.stats
    }

    pub fn source(&self) -> &Path {
        &self.options.source
    }
}
