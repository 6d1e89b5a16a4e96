use sprig::{parse, Interpreter, Value};

fn run(src: &str) -> Value {
    let program = parse(src).expect("parse failed");
    Interpreter::new().run(&program)
}

fn assert_int(src: &str, want: i64) {
    match run(src) {
        Value::Int(got) => assert_eq!(got, want, "source: {:?}", src),
        other => panic!("expected {} for {:?}, got {:?}", want, src, other),
    }
}

fn assert_bool(src: &str, want: bool) {
    match run(src) {
        Value::Bool(got) => assert_eq!(got, want, "source: {:?}", src),
        other => panic!("expected {} for {:?}, got {:?}", want, src, other),
    }
}

fn assert_null(src: &str) {
    match run(src) {
        Value::Null => {}
        other => panic!("expected null for {:?}, got {:?}", src, other),
    }
}

fn assert_error(src: &str, want: &str) {
    match run(src) {
        Value::Error(got) => assert_eq!(got, want, "source: {:?}", src),
        other => panic!("expected error {:?} for {:?}, got {:?}", want, src, other),
    }
}

#[test]
fn integer_arithmetic() {
    assert_int("5", 5);
    assert_int("10", 10);
    assert_int("-5", -5);
    assert_int("-10", -10);
    assert_int("5 + 5 + 5 + 5 - 10", 10);
    assert_int("2 * 2 * 2 * 2 * 2", 32);
    assert_int("-50 + 100 + -50", 0);
    assert_int("5 * 2 + 10", 20);
    assert_int("5 + 2 * 10", 25);
    assert_int("50 / 2 * 2 + 10", 60);
    assert_int("2 * (5 + 10)", 30);
    assert_int("3 * 3 * 3 + 10", 37);
    assert_int("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50);
    assert_int("7 / 2", 3);
}

#[test]
fn division_by_zero_is_an_error_value() {
    assert_error("5 / 0", "division by zero");
    assert_error("let x = 10; x / (5 - 5)", "division by zero");
}

#[test]
fn boolean_expressions() {
    assert_bool("true", true);
    assert_bool("false", false);
    assert_bool("1 < 2", true);
    assert_bool("1 > 2", false);
    assert_bool("1 == 1", true);
    assert_bool("1 != 1", false);
    assert_bool("1 != 2", true);
    assert_bool("true == true", true);
    assert_bool("false == false", true);
    assert_bool("true == false", false);
    assert_bool("true != false", true);
    assert_bool("(1 < 2) == true", true);
    assert_bool("(1 > 2) == true", false);
}

#[test]
fn bang_operator_follows_truthiness() {
    assert_bool("!true", false);
    assert_bool("!false", true);
    assert_bool("!5", false);
    assert_bool("!0", false);
    assert_bool("!!true", true);
    assert_bool("!!false", false);
    assert_bool("!!5", true);
}

#[test]
fn if_else_expressions() {
    assert_int("if (true) { 10 }", 10);
    assert_null("if (false) { 10 }");
    assert_int("if (1) { 10 }", 10);
    assert_int("if (0) { 10 }", 10);
    assert_int("if (1 < 2) { 10 }", 10);
    assert_null("if (1 > 2) { 10 }");
    assert_int("if (1 > 2) { 10 } else { 20 }", 20);
    assert_int("if (1 < 2) { 10 } else { 20 }", 10);
}

#[test]
fn return_statements() {
    assert_int("return 10;", 10);
    assert_int("return 10; 9;", 10);
    assert_int("return 2 * 5; 9;", 10);
    assert_int("9; return 2 * 5; 9;", 10);
}

#[test]
fn return_bubbles_through_nested_blocks() {
    assert_int(
        "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
        10,
    );
    assert_int("if (true) { if (true) { return 10; } return 1; }", 10);
}

#[test]
fn error_values_and_propagation() {
    assert_error("5 + true;", "type mismatch: INTEGER + BOOLEAN");
    assert_error("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN");
    assert_error("-true", "unknown operator: -BOOLEAN");
    assert_error("true + false;", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error(
        "if (10 > 1) { true + false; }",
        "unknown operator: BOOLEAN + BOOLEAN",
    );
    assert_error(
        "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
        "unknown operator: BOOLEAN + BOOLEAN",
    );
    assert_error("foobar", "identifier not found: foobar");
    assert_error("let x = foobar; 5;", "identifier not found: foobar");
}

#[test]
fn error_inspect_carries_prefix() {
    assert_eq!(
        run("5 + true;").to_string(),
        "ERROR: type mismatch: INTEGER + BOOLEAN"
    );
}

#[test]
fn let_bindings() {
    assert_int("let a = 5; a;", 5);
    assert_int("let a = 5 * 5; a;", 25);
    assert_int("let a = 5; let b = a; b;", 5);
    assert_int("let a = 5; let b = a; let c = a + b + 5; c;", 15);
    // Aynı frame'de let üzerine yazar.
    assert_int("let a = 5; let a = 6; a;", 6);
}

#[test]
fn strings_concatenate() {
    match run(r#""Hello World!""#) {
        Value::String(s) => assert_eq!(&*s, "Hello World!"),
        other => panic!("expected string, got {:?}", other),
    }
    match run(r#""Hello" + " " + "World!""#) {
        Value::String(s) => assert_eq!(&*s, "Hello World!"),
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn string_equality_is_identity() {
    assert_bool(r#""a" == "a""#, false);
    assert_bool(r#""a" != "a""#, true);
    assert_bool(r#"let s = "a"; s == s"#, true);
    assert_bool(r#"let s = "a"; s != s"#, false);
}

#[test]
fn string_operators_other_than_concat_fail() {
    assert_error(r#""a" - "b""#, "unknown operator: STRING - STRING");
    assert_error(r#""a" < "b""#, "unknown operator: STRING < STRING");
    assert_error(r#""a" + 1"#, "type mismatch: STRING + INTEGER");
}

#[test]
fn string_escapes_are_not_processed() {
    // "a\nb" dört bayttır: a, ters bölü, n, b.
    assert_int(r#"len("a\nb")"#, 4);
}

#[test]
fn conditional_on_computed_binding() {
    assert_int(
        "let a = 5; let b = a > 3; let c = a * 99; if (b) { 10 } else { 1 };",
        10,
    );
}
