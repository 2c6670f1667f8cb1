//! Command definitions
//!
//! Classifies the operator token and validates request shape.

use super::codec::parse_operand;
use super::{Response, REQUEST_ARITY};

/// Operator named by the first token of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    Sub,
    Mul,
    Div,

    /// Ends the session when it is the whole line
    Quit,

    /// Anything else, kept for logging
    Unknown(String),
}

impl Command {
    /// Classify an (already uppercased) operator token
    pub fn parse(token: &str) -> Self {
        match token {
            "ADD" => Command::Add,
            "SUB" => Command::Sub,
            "MUL" => Command::Mul,
            "DIV" => Command::Div,
            "QUIT" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// A request that passed the shape checks and is ready to evaluate
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub command: Command,
    pub left: f64,
    pub right: f64,
}

impl ParsedRequest {
    /// Build a request from a tokenized line.
    ///
    /// Fails with the bad request response when the line does not have
    /// exactly three tokens or when either operand is not a number. The
    /// operator is not checked here, so an unknown verb still parses.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, Response> {
        if tokens.len() != REQUEST_ARITY {
            return Err(Response::bad_request());
        }

        let left = parse_operand(tokens[1]).ok_or_else(Response::bad_request)?;
        let right = parse_operand(tokens[2]).ok_or_else(Response::bad_request)?;

        Ok(Self {
            command: Command::parse(tokens[0]),
            left,
            right,
        })
    }
}
