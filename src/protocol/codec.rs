//! Protocol codec
//!
//! Line framing, tokenizing, operand parsing and number formatting.
//!
//! ## Framing
//! Every message is one line terminated by `\n`. Incoming `\r\n` is accepted
//! and the `\r` dropped; a lone `\r` is not a terminator and stays in the
//! line. Bytes that are not valid UTF-8 are replaced rather than rejected.
//! A line longer than `MAX_LINE_LEN` bytes is a protocol error.
//!
//! ## Numbers
//! ```text
//! operand := [+-]? (digits [. digits?]? | . digits) ([eE] [+-]? digits)? [dDfF]?
//! result  := plain decimal when 1e-3 <= |x| < 1e7 or x == 0     (5.0, 0.25)
//!          | d.ddddE[-]n otherwise                               (1.0E7)
//!          | Infinity | -Infinity | NaN
//! ```

use std::io::{BufRead, Read, Write};

use crate::error::{CalcError, Result};
use super::{Response, Status, BANNER, ECHO_PREFIX};

/// Lower bound (inclusive) of magnitudes printed in plain decimal
const PLAIN_MIN: f64 = 1e-3;

/// Upper bound (exclusive) of magnitudes printed in plain decimal
const PLAIN_MAX: f64 = 1e7;

/// Maximum line length in bytes, terminator excluded
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Literal written in place of a result when nothing was computed
pub const NULL_RESULT: &str = "NULL";

// =============================================================================
// Tokens and Numbers
// =============================================================================

/// Split a line into tokens on single spaces.
///
/// Consecutive spaces produce empty tokens; trailing empty tokens are
/// dropped, so `"ADD 1 2 "` has three tokens and `"ADD  1 2"` has four.
pub fn split_tokens(line: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = line.split(' ').collect();
    while tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    if tokens.len() == 1 && tokens[0].is_empty() && !line.is_empty() {
        tokens.clear();
    }
    tokens
}

/// Parse an operand token as a double.
///
/// Accepts decimal and scientific literals with an optional sign and an
/// optional trailing `D`/`F` type suffix; surrounding control characters
/// are ignored. Named values (`NAN`, `INFINITY`), hexadecimal floats
/// (`0X1P3`) and empty strings are rejected.
pub fn parse_operand(token: &str) -> Option<f64> {
    let trimmed = token.trim_matches(|c: char| c <= ' ');
    let literal = trimmed
        .strip_suffix(|c: char| matches!(c, 'D' | 'F' | 'd' | 'f'))
        .unwrap_or(trimmed);
    let unsigned = literal
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(literal);

    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    literal.parse::<f64>().ok()
}

/// Render a result value the way it appears on the wire
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
        // Debug keeps shortest round-trip digits and always shows a fraction
        return format!("{:?}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

// =============================================================================
// Server Side
// =============================================================================

/// Read one line from a stream
///
/// Returns `None` at end of input. The line terminator is stripped.
/// Fails with `Protocol` once more than `MAX_LINE_LEN` bytes arrive without
/// a newline; nothing past the limit is buffered.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64 + 2)
        .read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    if buf.len() > MAX_LINE_LEN {
        return Err(CalcError::Protocol(format!(
            "Line too long: more than {} bytes without a newline",
            MAX_LINE_LEN
        )));
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Write one line followed by `\n` and flush it
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the connect banner
pub fn write_banner<W: Write>(writer: &mut W) -> Result<()> {
    write_line(writer, BANNER)
}

/// Write the echo of an uppercased input line
pub fn write_echo<W: Write>(writer: &mut W, upper_line: &str) -> Result<()> {
    write_line(writer, &format!("{}{}", ECHO_PREFIX, upper_line))
}

/// Write a result line
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    write_line(writer, &response.to_string())
}

// =============================================================================
// Client Side
// =============================================================================

/// Decode a result line such as `5.0 200 OK` or `NULL 404 Not Found`
pub fn decode_response(line: &str) -> Result<Response> {
    let mut parts = line.splitn(3, ' ');
    let (result, code, text) = match (parts.next(), parts.next(), parts.next()) {
        (Some(result), Some(code), Some(text)) => (result, code, text),
        _ => {
            return Err(CalcError::Protocol(format!(
                "Malformed result line: {:?}",
                line
            )))
        }
    };

    let status = code
        .parse::<u16>()
        .ok()
        .and_then(Status::from_code)
        .ok_or_else(|| CalcError::Protocol(format!("Unknown status code: {:?}", code)))?;

    if text != status.text() {
        return Err(CalcError::Protocol(format!(
            "Status text {:?} does not match code {}",
            text,
            status.code()
        )));
    }

    match (status, result) {
        (Status::Ok, NULL_RESULT) => Err(CalcError::Protocol(
            "OK result line without a value".to_string(),
        )),
        (Status::Ok, value) => value
            .parse::<f64>()
            .map(Response::ok)
            .map_err(|_| CalcError::Protocol(format!("Unparsable result value: {:?}", value))),
        (Status::BadRequest, NULL_RESULT) => Ok(Response::bad_request()),
        (Status::NotFound, NULL_RESULT) => Ok(Response::not_found()),
        (Status::UnprocessableEntity, NULL_RESULT) => Ok(Response::unprocessable()),
        (status, value) => Err(CalcError::Protocol(format!(
            "Status {} carries a value {:?}",
            status.code(),
            value
        ))),
    }
}
