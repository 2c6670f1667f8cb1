//! Protocol Module
//!
//! Defines the line-oriented text protocol spoken between client and server.
//!
//! ## Session Shape
//! ```text
//! S: ADD 2;SUB 2;MUL 2;DIV 2;        (banner, once per connection)
//! C: add 2 3
//! S: > ADD 2 3                       (echo, always uppercased)
//! S: 5.0 200 OK                      (result line)
//! C: quit
//! S: > QUIT                          (echo only, then the server closes)
//! ```
//!
//! ### Result Line
//! `<RESULT> <STATUS-CODE> <STATUS-TEXT>` where RESULT is a number or `NULL`.
//!
//! ### Status Codes
//! - 200: OK
//! - 400: Bad Request (wrong token count, non-numeric operand)
//! - 404: Not Found (unknown operator)
//! - 422: Unprocessable entity (division by exactly zero)

mod command;
mod response;
pub mod codec;

pub use command::{Command, ParsedRequest};
pub use response::{Response, Status};
pub use codec::{
    decode_response, format_number, parse_operand, read_line, split_tokens, write_banner,
    write_echo, write_line, write_response, MAX_LINE_LEN,
};

/// Banner written on connect: the four verbs and their operand count
pub const BANNER: &str = "ADD 2;SUB 2;MUL 2;DIV 2;";

/// Prefix of the echo line
pub const ECHO_PREFIX: &str = "> ";

/// Line that ends a session (compared after uppercasing and trimming)
pub const QUIT: &str = "QUIT";

/// Token count of every well-formed arithmetic request
pub const REQUEST_ARITY: usize = 3;

/// Returns true when an uppercased line asks to end the session
pub fn is_quit(upper_line: &str) -> bool {
    upper_line.trim() == QUIT
}
