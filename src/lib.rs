#![forbid(unsafe_code)]
//! repc: inspection tool for `.rep` remote-object interface files.
//!
//! Parsing lives in the `rep_syntax` crate; this crate adds the command-line front
//! end that reads files, renders the resulting AST and reports diagnostics.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a clear
//!   explanation.

pub mod cli;
pub mod version;

pub use rep_syntax::{Ast, ParseError, ParseWarning, ParserConfig, RepParser, ast, diagnostics, parser};
