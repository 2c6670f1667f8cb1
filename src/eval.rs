//! Evaluator Module
//!
//! Pure request evaluation: tokens in, response out. No I/O happens here.
//!
//! ## Decision Order
//! 1. Token count must be exactly three, else 400
//! 2. Both operands must be numbers, else 400
//! 3. The operator must be one of ADD/SUB/MUL/DIV, else 404
//! 4. DIV by exactly zero (either sign) is 422
//!
//! Arithmetic is plain `f64`; a tiny non-zero divisor is allowed through and
//! may produce an infinite result.

use crate::protocol::{Command, ParsedRequest, Response};

/// Evaluate one tokenized, uppercased line
pub fn evaluate(tokens: &[&str]) -> Response {
    match ParsedRequest::from_tokens(tokens) {
        Ok(request) => apply(&request),
        Err(response) => response,
    }
}

/// Apply the operator of a parsed request to its operands
pub fn apply(request: &ParsedRequest) -> Response {
    let ParsedRequest {
        command,
        left,
        right,
    } = request;

    match command {
        Command::Add => Response::ok(left + right),
        Command::Sub => Response::ok(left - right),
        Command::Mul => Response::ok(left * right),
        Command::Div if *right == 0.0 => Response::unprocessable(),
        Command::Div => Response::ok(left / right),
        Command::Quit | Command::Unknown(_) => {
            tracing::trace!("Unknown operator {:?}", command);
            Response::not_found()
        }
    }
}
