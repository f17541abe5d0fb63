use std::collections::HashSet;
use std::rc::Rc;

use blamec::ast::{
    AssignmentStatement, Expression, Factor, Identifier, Program, SignedTerm, Statement, Term,
};
use blamec::backend::{emit, emit_with, EmitConfig};
use blamec::errors::{BlameError, BlameResult};
use blamec::frontend::parser::parse_source;
use blamec::semantic::ScopeTable;
use blamec::utils::config::emitter::is_reserved;
use blamec::{compile, compile_with, CompileOptions};

const HEADER: &str = "#include <stdio.h>\n#include <stdlib.h>\n#include <string.h>\n\nint main() {\n";
const FOOTER: &str = "    return 0;\n}\n";

fn translate(source: &str) -> BlameResult<String> {
    compile(source)
}

// Names from the `long <name> = 0;` lines, in declaration order.
fn declared_names(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("long "))
        .filter_map(|rest| rest.strip_suffix(" = 0;"))
        .collect()
}

fn assert_distinct_and_unreserved(output: &str, expected: usize) {
    let names = declared_names(output);
    assert_eq!(names.len(), expected, "declarations in {}", output);
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len(), "duplicate declaration in {}", output);
    for name in names {
        assert!(!is_reserved(name), "{} is reserved in C", name);
    }
}

#[test]
fn test_assignments() -> BlameResult<()> {
    let output = translate("x = 5; y = 2; z = x + y;")?;
    let expected = format!(
        "{}    long x = 0;\n    long y = 0;\n    long z = 0;\n\n    x = 5;\n    y = 2;\n    z = x + y;\n{}",
        HEADER, FOOTER
    );
    assert_eq!(output, expected);
    Ok(())
}

#[test]
fn test_empty_program_keeps_boilerplate() -> BlameResult<()> {
    let output = translate("")?;
    assert_eq!(output, format!("{}{}", HEADER, FOOTER));
    Ok(())
}

#[test]
fn test_boilerplate_surrounds_any_program() -> BlameResult<()> {
    let sources = [
        "a = 1",
        "if a < 1 { a = 2 } else { a = 3 }",
        "do { b = b + 1 } while b < 10",
        "{ { c = 1 } }",
    ];
    for source in sources {
        let output = translate(source)?;
        assert!(output.starts_with(HEADER), "missing header for {:?}", source);
        assert!(output.ends_with(FOOTER), "missing footer for {:?}", source);
    }
    Ok(())
}

#[test]
fn test_emission_is_deterministic() -> BlameResult<()> {
    let source = "total = 0\ni = 1\nwhile i <= 10 { total = total + i * i; i = i + 1 }";
    let first = translate(source)?;
    for _ in 0..5 {
        assert_eq!(translate(source)?, first);
    }
    Ok(())
}

#[test]
fn test_parentheses_and_signs() -> BlameResult<()> {
    let output = translate("x = 5 * (2 + 3)\ny = -x\nz = -x / 2 + 1")?;
    assert!(output.contains("    x = 5 * (2 + 3);\n"));
    assert!(output.contains("    y = -x;\n"));
    assert!(output.contains("    z = -(x / 2) + 1;\n"));
    Ok(())
}

#[test]
fn test_control_flow() -> BlameResult<()> {
    let source = "\
i = 0
if (i < 1) {
    i = 2
} else {
    i = 3
}
while i > 0 {
    i = i - 1
}
do {
    i = i + 1
} while i != 4
{
    i = 7
}
";
    let output = translate(source)?;
    let body = "    long i = 0;

    i = 0;
    if (i < 1) {
        i = 2;
    } else {
        i = 3;
    }
    while (i > 0) {
        i = i - 1;
    }
    do {
        i = i + 1;
    } while (i != 4);
    {
        i = 7;
    }
";
    assert_eq!(output, format!("{}{}{}", HEADER, body, FOOTER));
    Ok(())
}

#[test]
fn test_if_without_else() -> BlameResult<()> {
    let output = translate("if a == b { a = 1 }")?;
    assert!(output.contains("    if (a == b) {\n        a = 1;\n    }\n    return 0;"));
    Ok(())
}

#[test]
fn test_reserved_words_are_mangled() -> BlameResult<()> {
    let output = translate("int = 1; main = int + 1")?;
    assert!(output.contains("    long _int = 0;\n"));
    assert!(output.contains("    _main = _int + 1;\n"));
    Ok(())
}

#[test]
fn test_renamed_keyword_does_not_collide_with_source_name() -> BlameResult<()> {
    let output = translate("int = 1\n_int = 2\n")?;
    assert_eq!(declared_names(&output), ["_int_1", "_int"]);
    assert!(output.contains("    _int_1 = 1;\n    _int = 2;\n"));

    let output = translate("_int = 2\nint = 1\n")?;
    assert_eq!(declared_names(&output), ["_int", "_int_1"]);
    assert!(output.contains("    _int = 2;\n    _int_1 = 1;\n"));
    Ok(())
}

#[test]
fn test_header_names_are_renamed() -> BlameResult<()> {
    let output = translate("EOF = 1\nstdin = EOF\nerrno = 2\nEXIT_FAILURE = 3\n_Atomic = 4\n")?;
    assert!(!output.contains("long EOF"));
    assert!(output.contains("    _stdin = _EOF;\n"));
    assert_distinct_and_unreserved(&output, 5);
    Ok(())
}

#[test]
fn test_every_declared_name_is_distinct() -> BlameResult<()> {
    let source = "int = 1\n_int = 2\n_int_1 = 3\nmain = _main\n_main = 4\nEOF = 5\n_EOF = 6\n";
    let output = translate(source)?;
    assert_distinct_and_unreserved(&output, 7);
    assert_eq!(
        declared_names(&output),
        ["_int_2", "_int", "_int_1", "_main_1", "_main", "_EOF_1", "_EOF"]
    );
    // Uses follow the same renaming as declarations.
    assert!(output.contains("    _main_1 = _main;\n"));
    Ok(())
}

#[test]
fn test_renaming_is_per_emission() -> BlameResult<()> {
    let (colliding, _) = parse_source("int = 1\n_int = 2\n");
    let (alone, _) = parse_source("int = 1\n");
    assert!(emit(&colliding)?.contains("long _int_1 = 0;"));
    let output = emit(&alone)?;
    assert!(output.contains("long _int = 0;"));
    assert!(!output.contains("_int_1"));
    Ok(())
}

#[test]
fn test_custom_indent_and_variable_dump() -> BlameResult<()> {
    let (program, diagnostics) = parse_source("x = 3");
    assert!(diagnostics.is_empty());
    let config = EmitConfig {
        indent: 2,
        dump_variables: true,
    };
    let output = emit_with(&program, &config)?;
    assert!(output.contains("\n  long x = 0;\n"));
    assert!(output.contains("\n  x = 3;\n"));
    assert!(output.ends_with("  printf(\"x = %ld\\n\", x);\n  return 0;\n}\n"));
    Ok(())
}

#[test]
fn test_string_literal_is_unsupported() {
    let mut scopes = ScopeTable::new();
    let s = scopes.intern("global", "s");
    let expression = Expression::new(SignedTerm::unsigned(Term::new(Factor::StringLiteral(
        "hello".to_string(),
    ))));
    let program = Program::new(
        vec![Statement::Assignment(AssignmentStatement::new(s, expression))],
        scopes,
    );
    match emit(&program) {
        Err(BlameError::UnsupportedConstruct { construct }) => assert_eq!(construct, "string literal"),
        other => panic!("Expected UnsupportedConstruct, got {:?}", other),
    }
    // A failed emission leaves nothing behind for the next call.
    let output = translate("ok = 1").expect("independent emission");
    assert!(output.starts_with(HEADER));
}

#[test]
fn test_invalid_identifier_is_rejected() {
    let identifier = Rc::new(Identifier::new("not-valid"));
    let expression = Expression::new(SignedTerm::unsigned(Term::new(Factor::NumberLiteral(1))));
    let program = Program::new(
        vec![Statement::Assignment(AssignmentStatement::new(identifier, expression))],
        ScopeTable::new(),
    );
    match emit(&program) {
        Err(BlameError::InvalidTargetIdentifier { identifier }) => assert_eq!(identifier, "not-valid"),
        other => panic!("Expected InvalidTargetIdentifier, got {:?}", other),
    }
}

#[test]
fn test_diagnostics_block_compilation() {
    match compile("x 5;") {
        Err(BlameError::ParseFailed { diagnostics }) => {
            assert_eq!(diagnostics.len(), 1);
            assert!(diagnostics[0].message.contains("expected '='"));
        }
        other => panic!("Expected ParseFailed, got {:?}", other),
    }
}

#[test]
fn test_allow_diagnostics_emits_partial_tree() -> BlameResult<()> {
    let options = CompileOptions {
        allow_diagnostics: true,
        ..CompileOptions::default()
    };
    let output = compile_with("a = 1\nb 2\nc = a\n", &options)?;
    assert!(output.contains("    a = 1;\n"));
    assert!(output.contains("    c = a;\n"));
    assert!(!output.contains("b = 2"));
    // The dropped statement declares nothing.
    assert!(!output.contains("long b"));
    assert_eq!(declared_names(&output), ["a", "c"]);
    Ok(())
}
