//! Response definitions
//!
//! Represents result lines sent to clients.

use std::fmt;

use super::codec::{format_number, NULL_RESULT};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    UnprocessableEntity = 422,
}

impl Status {
    /// Numeric code written on the wire
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Status text written after the code
    pub fn text(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::UnprocessableEntity => "Unprocessable entity",
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(Status::Ok),
            400 => Some(Status::BadRequest),
            404 => Some(Status::NotFound),
            422 => Some(Status::UnprocessableEntity),
            _ => None,
        }
    }
}

/// A response to send to client
///
/// A value is present exactly when the status is `Ok`; the constructors are
/// the only way to build one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    value: Option<f64>,
    status: Status,
}

impl Response {
    /// Create an OK response carrying the computed value
    pub fn ok(value: f64) -> Self {
        Self {
            value: Some(value),
            status: Status::Ok,
        }
    }

    /// Create a BAD_REQUEST response
    pub fn bad_request() -> Self {
        Self {
            value: None,
            status: Status::BadRequest,
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self {
            value: None,
            status: Status::NotFound,
        }
    }

    /// Create an UNPROCESSABLE_ENTITY response
    pub fn unprocessable() -> Self {
        Self {
            value: None,
            status: Status::UnprocessableEntity,
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

/// Renders the result line without its terminator, e.g. `5.0 200 OK`
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}", format_number(value))?,
            None => f.write_str(NULL_RESULT)?,
        }
        write!(f, " {} {}", self.status.code(), self.status.text())
    }
}
