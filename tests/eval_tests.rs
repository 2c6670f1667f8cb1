//! Tests for the Evaluator
//!
//! These tests verify:
//! - Arithmetic for each verb
//! - Status precedence (arity, then operands, then operator)
//! - Exact-zero division handling
//! - Statelessness between evaluations

use calcd::eval::{apply, evaluate};
use calcd::protocol::{split_tokens, Command, ParsedRequest, Response, Status};

// =============================================================================
// Helper Functions
// =============================================================================

fn eval_line(line: &str) -> Response {
    evaluate(&split_tokens(line))
}

// =============================================================================
// Arithmetic Tests
// =============================================================================

#[test]
fn test_add() {
    assert_eq!(eval_line("ADD 2 3"), Response::ok(5.0));
    assert_eq!(eval_line("ADD -1.5 0.5"), Response::ok(-1.0));
}

#[test]
fn test_sub() {
    assert_eq!(eval_line("SUB 2 3"), Response::ok(-1.0));
    assert_eq!(eval_line("SUB 1E3 1"), Response::ok(999.0));
}

#[test]
fn test_mul() {
    assert_eq!(eval_line("MUL 4 2.5"), Response::ok(10.0));
    assert_eq!(eval_line("MUL -3 0"), Response::ok(-0.0));
}

#[test]
fn test_div() {
    assert_eq!(eval_line("DIV 10 4"), Response::ok(2.5));
    assert_eq!(eval_line("DIV 1 3"), Response::ok(1.0 / 3.0));
}

#[test]
fn test_results_match_native_arithmetic() {
    let operands = [
        ("0", 0.0),
        ("1", 1.0),
        ("-7", -7.0),
        ("0.1", 0.1),
        ("2.5E3", 2500.0),
        ("-0.003", -0.003),
    ];

    for (a_text, a) in operands {
        for (b_text, b) in operands {
            assert_eq!(
                eval_line(&format!("ADD {} {}", a_text, b_text)),
                Response::ok(a + b)
            );
            assert_eq!(
                eval_line(&format!("SUB {} {}", a_text, b_text)),
                Response::ok(a - b)
            );
            assert_eq!(
                eval_line(&format!("MUL {} {}", a_text, b_text)),
                Response::ok(a * b)
            );

            let div = eval_line(&format!("DIV {} {}", a_text, b_text));
            if b == 0.0 {
                assert_eq!(div, Response::unprocessable());
            } else {
                assert_eq!(div, Response::ok(a / b));
            }
        }
    }
}

// =============================================================================
// Division by Zero Tests
// =============================================================================

#[test]
fn test_div_by_zero_is_unprocessable() {
    assert_eq!(eval_line("DIV 10 0"), Response::unprocessable());
    assert_eq!(eval_line("DIV 0 0"), Response::unprocessable());
    assert_eq!(eval_line("DIV 10 0.0"), Response::unprocessable());
    assert_eq!(eval_line("DIV 10 -0"), Response::unprocessable());
}

#[test]
fn test_div_by_tiny_divisor_is_allowed() {
    let response = eval_line("DIV 1 1E-320");
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.value(), Some(f64::INFINITY));
    assert_eq!(response.to_string(), "Infinity 200 OK");
}

// =============================================================================
// Error Status Tests
// =============================================================================

#[test]
fn test_wrong_token_count_is_bad_request() {
    for line in ["", "ADD", "ADD 1", "ADD 1 2 3", "ADD  1 2", "QUIT NOW"] {
        assert_eq!(eval_line(line), Response::bad_request(), "line {:?}", line);
    }
}

#[test]
fn test_non_numeric_operand_is_bad_request() {
    for line in ["MUL ABC 2", "ADD 1 X", "FOO 1 X", "DIV NAN 1"] {
        assert_eq!(eval_line(line), Response::bad_request(), "line {:?}", line);
    }
}

#[test]
fn test_unknown_operator_is_not_found() {
    for line in ["FOO 1 2", "POW 2 3", "QUIT 1 2", "add 1 2"] {
        assert_eq!(eval_line(line), Response::not_found(), "line {:?}", line);
    }
}

#[test]
fn test_wire_lines_for_failures() {
    assert_eq!(eval_line("ADD 1").to_string(), "NULL 400 Bad Request");
    assert_eq!(eval_line("FOO 1 2").to_string(), "NULL 404 Not Found");
    assert_eq!(
        eval_line("DIV 10 0").to_string(),
        "NULL 422 Unprocessable entity"
    );
}

// =============================================================================
// Apply Tests
// =============================================================================

#[test]
fn test_apply_parsed_request() {
    let request = ParsedRequest {
        command: Command::Sub,
        left: 10.0,
        right: 4.0,
    };
    assert_eq!(apply(&request), Response::ok(6.0));

    let request = ParsedRequest {
        command: Command::Unknown("MOD".to_string()),
        left: 10.0,
        right: 4.0,
    };
    assert_eq!(apply(&request), Response::not_found());
}

#[test]
fn test_evaluation_is_stateless() {
    let first = eval_line("DIV 7 2");
    let _ = eval_line("DIV 1 0");
    let _ = eval_line("ADD X Y");
    let second = eval_line("DIV 7 2");
    assert_eq!(first, second);
}
