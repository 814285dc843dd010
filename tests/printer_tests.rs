use signalc::parse_source;
use signalc::semantic::printer::print_ast;
use signalc::utils::errors::{ErrorHandler, SignalResult};

fn render(source: &str) -> SignalResult<(String, ErrorHandler)> {
    let mut errors = ErrorHandler::new();
    let (data, ast) = parse_source(source, &mut errors);
    let output = print_ast(&ast, &data.tables)?;
    Ok((output, errors))
}

fn count_tag(output: &str, tag: &str) -> usize {
    output
        .lines()
        .filter(|line| line.trim_start_matches('-') == tag)
        .count()
}

#[test]
fn test_minimal_program_dump() -> SignalResult<()> {
    let (output, errors) = render("PROGRAM p; VAR x: INTEGER; BEGIN x := 1; END.")?;

    assert!(!errors.has_errors());
    assert_eq!(count_tag(&output, "<declaration>"), 1);
    assert_eq!(count_tag(&output, "<assign-statement>"), 1);
    assert_eq!(count_tag(&output, "<error-nullptr>"), 0);

    let expected = "\
<signal-program>
-<program>
--402 PROGRAM
--<procedure-identifier>
---<identifier>
----1001 p
--59 ;
--<block>
---<variable-declarations>
----403 VAR
----<declarations-list>
-----<declaration>
------<variable-identifier>
-------<identifier>
--------1002 x
------58 :
------<attribute>
-------406 INTEGER
------59 ;
-----<declarations-list>
------<empty>
---404 BEGIN
---<statements-list>
----<assign-statement>
-----<variable-identifier>
------<identifier>
-------1002 x
-----302 :=
-----<unsigned-integer>
------501 1
-----59 ;
----<statements-list>
-----<empty>
---405 END
--46 .
";
    assert_eq!(output, expected);
    Ok(())
}

#[test]
fn test_empty_sections_render_as_empty() -> SignalResult<()> {
    let (output, _) = render("PROGRAM p; BEGIN END.")?;
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines.contains(&"---<variable-declarations>"));
    assert!(lines.contains(&"---<statements-list>"));
    assert_eq!(count_tag(&output, "<empty>"), 2);
    assert_eq!(count_tag(&output, "<error-nullptr>"), 0);
    Ok(())
}

#[test]
fn test_missing_parts_render_error_markers() -> SignalResult<()> {
    let (output, errors) =
        render("PROGRAM p; VAR a: INTEGER; BEGIN IF a = 1 THEN a := 2; END.")?;

    assert_eq!(errors.errors().len(), 1);
    assert_eq!(count_tag(&output, "<if-statement>"), 1);
    // ENDIF and the trailing ';' are both missing
    assert_eq!(count_tag(&output, "<error-symbol>"), 2);
    assert_eq!(count_tag(&output, "<alternative-part>"), 1);
    Ok(())
}

#[test]
fn test_missing_program_renders_nullptr() -> SignalResult<()> {
    let (output, _) = render("BEGIN END.")?;
    assert_eq!(output, "<signal-program>\n-<error-nullptr>\n");
    Ok(())
}

#[test]
fn test_missing_expression_renders_nullptr() -> SignalResult<()> {
    let (output, _) = render("PROGRAM p; VAR a: INTEGER; BEGIN a := ; END.")?;
    assert_eq!(count_tag(&output, "<error-nullptr>"), 1);
    assert_eq!(count_tag(&output, "<assign-statement>"), 1);
    Ok(())
}

#[test]
fn test_if_else_dump_contains_every_part() -> SignalResult<()> {
    let (output, errors) = render(
        "PROGRAM p; VAR a: INTEGER; BEGIN IF a = 1 THEN a := 2; ELSE a := 3; ENDIF; END.",
    )?;

    assert!(!errors.has_errors());
    for tag in [
        "<if-statement>",
        "<condition-statement>",
        "<incomplete-condition-statement>",
        "<conditional-expression>",
        "<alternative-part>",
    ] {
        assert_eq!(count_tag(&output, tag), 1, "{}", tag);
    }
    assert_eq!(count_tag(&output, "408 IF"), 1);
    assert_eq!(count_tag(&output, "409 THEN"), 1);
    assert_eq!(count_tag(&output, "410 ELSE"), 1);
    assert_eq!(count_tag(&output, "411 ENDIF"), 1);
    assert_eq!(count_tag(&output, "61 ="), 1);
    Ok(())
}
