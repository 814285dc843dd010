use signalc::codegen::{generate_listing, write_listing};
use signalc::parse_source;
use signalc::utils::errors::{ErrorHandler, SignalError, SignalResult};
use test_log::test;

fn generate(source: &str) -> SignalResult<String> {
    let mut errors = ErrorHandler::new();
    let (_, ast) = parse_source(source, &mut errors);
    assert!(
        !errors.has_errors(),
        "unexpected errors: {:?}",
        errors.errors()
    );
    generate_listing(&ast)
}

/// Instruction lines between the body label and the epilogue.
fn body(listing: &str) -> Vec<String> {
    listing
        .lines()
        .skip_while(|line| !line.ends_with("_body:"))
        .skip(1)
        .take_while(|line| line.trim() != "xor eax, eax")
        .map(|line| line.to_string())
        .collect()
}

#[test]
fn test_minimal_program_listing() -> SignalResult<()> {
    let listing = generate("PROGRAM p; VAR x: INTEGER; BEGIN x := 1; END.")?;

    let expected = "\
.386
.model flat, C
option casemap:none
.stack 4096

.data
    $x dd ?

.code
main PROC
    jmp ?p_body
?p_body:
    mov eax, 1
    mov $x, eax
    xor eax, eax
    ret
main ENDP
END main
";
    assert_eq!(listing, expected);
    Ok(())
}

#[test]
fn test_one_slot_per_declaration() -> SignalResult<()> {
    let listing = generate("PROGRAM p; VAR a: INTEGER; b: FLOAT; BEGIN END.")?;

    assert!(listing.contains("\n    $a dd ?\n    $b dd ?\n"));
    Ok(())
}

#[test]
fn test_variable_to_variable_assignment() -> SignalResult<()> {
    let listing = generate("PROGRAM p; VAR a: INTEGER; b: INTEGER; BEGIN a := 4; b := a; END.")?;

    assert_eq!(
        body(&listing),
        vec![
            "    mov eax, 4",
            "    mov $a, eax",
            "    mov eax, $a",
            "    mov $b, eax",
        ]
    );
    Ok(())
}

#[test]
fn test_if_else_control_flow() -> SignalResult<()> {
    let listing = generate(
        "PROGRAM p; VAR a: INTEGER; BEGIN IF a = 1 THEN a := 2; ELSE a := 3; ENDIF; END.",
    )?;

    assert_eq!(
        body(&listing),
        vec![
            "    mov eax, $a",
            "    mov ebx, 1",
            "    cmp eax, ebx",
            "    jne ?L1",
            "    mov eax, 2",
            "    mov $a, eax",
            "    jmp ?L2",
            "?L1:",
            "    mov eax, 3",
            "    mov $a, eax",
            "?L2:",
        ]
    );
    Ok(())
}

#[test]
fn test_sequential_ifs_use_distinct_labels() -> SignalResult<()> {
    let listing = generate(
        "PROGRAM p; VAR a: INTEGER; BEGIN \
         IF a = 1 THEN a := 2; ENDIF; \
         IF a = 2 THEN a := 1; ENDIF; \
         END.",
    )?;

    let labels: Vec<&str> = listing
        .lines()
        .filter(|line| line.starts_with("?L"))
        .collect();
    assert_eq!(labels, vec!["?L1:", "?L2:", "?L3:", "?L4:"]);
    Ok(())
}

#[test]
fn test_nested_if_labels_close_innermost_first() -> SignalResult<()> {
    let listing = generate(
        "PROGRAM p; VAR a: INTEGER; BEGIN \
         IF a = 1 THEN IF a = 2 THEN a := 3; ENDIF; ENDIF; \
         END.",
    )?;

    let labels: Vec<&str> = listing
        .lines()
        .filter(|line| line.starts_with("?L"))
        .collect();
    assert_eq!(labels, vec!["?L3:", "?L4:", "?L1:", "?L2:"]);
    Ok(())
}

#[test]
fn test_undeclared_target_is_fatal() {
    let mut errors = ErrorHandler::new();
    let (_, ast) = parse_source("PROGRAM p; BEGIN y := 1; END.", &mut errors);

    match generate_listing(&ast) {
        Err(SignalError::UndeclaredIdentifier { name, line, column }) => {
            assert_eq!(name, "y");
            assert_eq!((line, column), (1, 18));
        }
        other => panic!("expected undeclared identifier, got {:?}", other),
    }
}

#[test]
fn test_undeclared_operand_is_fatal() {
    let mut errors = ErrorHandler::new();
    let (_, ast) = parse_source(
        "PROGRAM p; VAR a: INTEGER; BEGIN IF a = b THEN ENDIF; END.",
        &mut errors,
    );

    let error = generate_listing(&ast).expect_err("b is not declared");
    assert_eq!(error.to_string(), "Undeclared identifier 'b'");
    assert_eq!(error.position(), Some((1, 41)));
}

/// Names of every symbol the listing defines: data slots and labels.
fn defined_symbols(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if let Some(name) = line.strip_suffix(" dd ?") {
                Some(name.to_string())
            } else {
                line.strip_suffix(':').map(|label| label.to_string())
            }
        })
        .collect()
}

#[test]
fn test_register_names_do_not_clash_with_variables() -> SignalResult<()> {
    let listing = generate(
        "PROGRAM p; VAR eax: INTEGER; _eax: INTEGER; BEGIN eax := 1; _eax := eax; END.",
    )?;

    assert_eq!(defined_symbols(&listing), vec!["$eax", "$_eax", "?p_body"]);
    assert_eq!(
        body(&listing),
        vec![
            "    mov eax, 1",
            "    mov $eax, eax",
            "    mov eax, $eax",
            "    mov $_eax, eax",
        ]
    );
    Ok(())
}

#[test]
fn test_variable_named_like_body_label() -> SignalResult<()> {
    let listing = generate("PROGRAM p; VAR p_body: INTEGER; BEGIN p_body := 1; END.")?;

    let symbols = defined_symbols(&listing);
    assert_eq!(symbols, vec!["$p_body", "?p_body"]);
    assert!(listing.contains("    mov $p_body, eax\n"));
    Ok(())
}

#[test]
fn test_case_distinct_variables_stay_distinct() -> SignalResult<()> {
    let listing = generate("PROGRAM p; VAR x: INTEGER; X: INTEGER; BEGIN x := 1; X := 2; END.")?;

    assert!(listing.contains("\noption casemap:none\n"));
    assert_eq!(defined_symbols(&listing), vec!["$x", "$X", "?p_body"]);
    Ok(())
}

#[test]
fn test_defined_symbols_are_unique() -> SignalResult<()> {
    let listing = generate(
        "PROGRAM p; VAR x: INTEGER; X: INTEGER; eax: INTEGER; _eax: INTEGER; \
         p_body: INTEGER; main: INTEGER; L1: INTEGER; BEGIN \
         IF x = X THEN eax := 1; ELSE _eax := 2; ENDIF; p_body := main; L1 := 3; \
         END.",
    )?;

    let mut symbols = defined_symbols(&listing);
    let count = symbols.len();
    symbols.sort();
    symbols.dedup();
    assert_eq!(symbols.len(), count, "{}", listing);
    Ok(())
}

#[test]
fn test_invalid_constant_uses_leading_digits() {
    let mut errors = ErrorHandler::new();
    let (_, ast) = parse_source("PROGRAM p; VAR a: INTEGER; BEGIN a := 12ab; END.", &mut errors);

    assert_eq!(errors.errors().len(), 1);
    let listing = generate_listing(&ast).expect("lexical errors do not stop generation");
    assert!(listing.contains("    mov eax, 12\n"));
}

#[test]
fn test_failed_generation_leaves_no_file() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.asm");
    let mut errors = ErrorHandler::new();
    let (_, ast) = parse_source("PROGRAM p; BEGIN y := 1; END.", &mut errors);

    assert!(write_listing(&ast, &path).is_err());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_listing_is_written_to_file() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.asm");
    let mut errors = ErrorHandler::new();
    let (_, ast) = parse_source("PROGRAM p; VAR x: INTEGER; BEGIN x := 1; END.", &mut errors);

    let listing = write_listing(&ast, &path)?;
    assert_eq!(std::fs::read_to_string(&path)?, listing);
    Ok(())
}

#[test]
fn test_unwritable_output_is_reported() -> SignalResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing-dir").join("out.asm");
    let mut errors = ErrorHandler::new();
    let (_, ast) = parse_source("PROGRAM p; BEGIN END.", &mut errors);

    assert!(matches!(
        write_listing(&ast, &path),
        Err(SignalError::OutputFile { .. })
    ));
    Ok(())
}
