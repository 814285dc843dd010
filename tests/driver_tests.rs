use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use signalc::driver::{CompileOptions, Compiler};
use signalc::toolchain::{ToolOutput, Toolchain};
use signalc::utils::errors::{ErrorInstigator, ErrorKind, SignalResult};
use tempfile::TempDir;
use test_log::test;

#[derive(Default)]
struct FakeToolchain {
    fail_assembly: bool,
    calls: RefCell<Vec<PathBuf>>,
}

impl Toolchain for FakeToolchain {
    fn assemble(&self, listing: &Path) -> SignalResult<ToolOutput> {
        self.calls.borrow_mut().push(listing.to_path_buf());
        Ok(ToolOutput {
            success: !self.fail_assembly,
            output: "error A2008: syntax error".to_string(),
        })
    }

    fn link(&self, object: &Path) -> SignalResult<ToolOutput> {
        self.calls.borrow_mut().push(object.to_path_buf());
        Ok(ToolOutput {
            success: true,
            output: String::new(),
        })
    }
}

fn write_source(dir: &TempDir, name: &str, source: &str) -> SignalResult<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, source)?;
    Ok(path)
}

#[test]
fn test_wrong_extension_is_fatal() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(&dir, "prog.txt", "PROGRAM p; BEGIN END.")?;
    let toolchain = FakeToolchain::default();

    let mut compiler = Compiler::new(CompileOptions::new(&path));
    assert!(!compiler.run(&toolchain));

    let errors = compiler.errors();
    assert!(errors.has_fatal_error());
    assert_eq!(errors.errors()[0].instigator, ErrorInstigator::FileIO);
    assert!(errors.errors()[0].message.contains(".txt"));
    assert!(compiler.lexer_data().is_none());
    assert!(toolchain.calls.borrow().is_empty());
    Ok(())
}

#[test]
fn test_missing_source_is_fatal() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("absent.sig");

    let mut compiler = Compiler::new(CompileOptions::new(&path));
    assert!(!compiler.run(&FakeToolchain::default()));

    assert_eq!(compiler.errors().count_of(ErrorKind::FileIo), 1);
    assert!(compiler.ast().is_none());
    Ok(())
}

#[test]
fn test_listing_only_writes_asm_next_to_source() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(
        &dir,
        "prog.sig",
        "PROGRAM p; VAR x: INTEGER; BEGIN x := 1; END.",
    )?;
    let toolchain = FakeToolchain::default();

    let mut options = CompileOptions::new(&path);
    options.listing_only = true;
    let mut compiler = Compiler::new(options);
    assert!(compiler.run(&toolchain));

    let listing = fs::read_to_string(dir.path().join("prog.asm"))?;
    assert_eq!(compiler.listing(), Some(listing.as_str()));
    assert!(listing.contains("    mov $x, eax\n"));
    assert!(!compiler.is_built());
    assert!(toolchain.calls.borrow().is_empty());

    let stats = compiler.stats();
    assert_eq!(stats.token_count, 15);
    assert!(stats.ast_size > 0);
    assert_eq!(stats.listing_lines, listing.lines().count());
    Ok(())
}

#[test]
fn test_explicit_output_path() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(&dir, "prog.sig", "PROGRAM p; BEGIN END.")?;
    let output = dir.path().join("custom.asm");

    let mut options = CompileOptions::new(&path);
    options.output = Some(output.clone());
    options.listing_only = true;
    let mut compiler = Compiler::new(options);
    assert!(compiler.run(&FakeToolchain::default()));

    assert!(output.exists());
    assert!(!dir.path().join("prog.asm").exists());
    Ok(())
}

#[test]
fn test_syntax_errors_skip_build() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(&dir, "prog.sig", "PROGRAM p; BEGIN END")?;
    let toolchain = FakeToolchain::default();

    let mut compiler = Compiler::new(CompileOptions::new(&path));
    assert!(!compiler.run(&toolchain));

    assert_eq!(compiler.errors().count_of(ErrorKind::Syntax), 1);
    assert!(!compiler.errors().has_fatal_error());
    assert!(compiler.listing().is_some());
    assert!(toolchain.calls.borrow().is_empty());
    Ok(())
}

#[test]
fn test_oversized_constant_skips_build() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(
        &dir,
        "prog.sig",
        "PROGRAM p; VAR x: INTEGER; BEGIN x := 4294967296; END.",
    )?;
    let toolchain = FakeToolchain::default();

    let mut compiler = Compiler::new(CompileOptions::new(&path));
    assert!(!compiler.run(&toolchain));

    assert_eq!(compiler.errors().count_of(ErrorKind::Lexical), 1);
    assert!(!compiler.is_built());
    assert!(toolchain.calls.borrow().is_empty());
    Ok(())
}

#[test]
fn test_undeclared_identifier_leaves_no_listing() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(&dir, "prog.sig", "PROGRAM p; BEGIN y := 1; END.")?;

    let mut compiler = Compiler::new(CompileOptions::new(&path));
    assert!(!compiler.run(&FakeToolchain::default()));

    let error = &compiler.errors().errors()[0];
    assert_eq!(error.instigator, ErrorInstigator::CodeGenerator);
    assert_eq!(error.kind, ErrorKind::Semantic);
    assert_eq!((error.line, error.column), (1, 18));
    assert!(compiler.listing().is_none());
    assert!(!dir.path().join("prog.asm").exists());
    Ok(())
}

#[test]
fn test_clean_program_is_assembled_and_linked() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(&dir, "prog.sig", "PROGRAM p; BEGIN END.")?;
    let toolchain = FakeToolchain::default();

    let mut compiler = Compiler::new(CompileOptions::new(&path));
    assert!(compiler.run(&toolchain));

    assert!(compiler.is_built());
    assert_eq!(
        *toolchain.calls.borrow(),
        vec![dir.path().join("prog.asm"), dir.path().join("prog.obj")]
    );
    Ok(())
}

#[test]
fn test_assembler_failure_is_reported() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = write_source(&dir, "prog.sig", "PROGRAM p; BEGIN END.")?;
    let toolchain = FakeToolchain {
        fail_assembly: true,
        ..FakeToolchain::default()
    };

    let mut compiler = Compiler::new(CompileOptions::new(&path));
    assert!(!compiler.run(&toolchain));

    let error = &compiler.errors().errors()[0];
    assert_eq!(error.instigator, ErrorInstigator::Compiler);
    assert_eq!(error.kind, ErrorKind::Build);
    assert!(error.message.contains("A2008"));
    assert!(!compiler.is_built());
    assert_eq!(toolchain.calls.borrow().len(), 1);
    Ok(())
}
