//! # calcd
//!
//! A line-oriented arithmetic server over TCP:
//! - Banner advertising ADD, SUB, MUL, DIV
//! - Uppercased echo of every input line
//! - Status-coded result lines (200 / 400 / 404 / 422)
//! - Sequential serving by default, optional bounded worker pool
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │         (one client at a time, or worker pool)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ accepted stream
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Connection Handler                           │
//! │        banner → read line → echo → respond → ...             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ tokens
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Evaluator  │
//!   │   (codec)   │          │   (pure)    │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod eval;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CalcError, Result};
pub use config::{Config, ConnectionMode};
pub use eval::evaluate;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of calcd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
