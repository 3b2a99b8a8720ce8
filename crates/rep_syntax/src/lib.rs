//! Syntax frontend for `.rep` remote-object interface files: line classifier,
//! declaration parsers, AST, diagnostics.
//!
//! A `.rep` file declares classes (properties, signals, slots), plain-old-data
//! structs (`POD`) and enum reuse directives (`USE_ENUM`). Every statement lives on
//! a single line, so parsing is a line-by-line classification folded into an
//! [`ast::Ast`]. Lines the parser does not recognize (typically `#include`
//! directives) are kept verbatim for the code generator.
//!
//! ## Notes
//! - This crate is syntax-only: it does not check for duplicate names or resolve
//!   enum references.
//! - Enable the `serde` feature to serialize the AST.
//!
//! ## Examples
//! ```rust,no_run
//! let ast = rep_syntax::parse_str("POD Point(int x, int y)\n").unwrap();
//! assert_eq!(ast.pods[0].attributes.len(), 2);
//! ```

pub mod ast;
pub mod classifier;
pub mod diagnostics;
pub mod parser;

pub use ast::{Ast, Class, Modifier, Pod, PodAttribute, Property};
pub use diagnostics::{ParseError, ParseWarning};
pub use parser::{ParserConfig, RepParser, parse_file, parse_str};
