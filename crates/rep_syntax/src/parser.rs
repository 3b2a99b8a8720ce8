//! Parser driver for `.rep` files
//!
//! Streams the input line by line, classifies each line and folds it into an
//! [`Ast`]. Class blocks are tracked by a small state machine ([`ClassState`]):
//! a header opens a class, `}` commits it, and a class that is still open when the
//! next header or the end of input arrives is dropped.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use rep_syntax::parser::RepParser;
//!
//! let mut parser = RepParser::new();
//! let ast = parser.parse_str("class Engine\n{\n    PROP(int rpm)\n}\n").unwrap();
//! assert_eq!(ast.classes[0].properties[0].name, "rpm");
//! ```

mod pod;
mod property;

pub use pod::parse_pod_attributes;
pub use property::parse_property;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::ast::{Ast, Class, Pod};
use crate::classifier::{LineKind, classify};
use crate::diagnostics::{ParseError, ParseWarning};

// ============================================================================
// Configuration
// ============================================================================

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Record a [`ParseWarning::UnclosedClass`] (and log it) when an open class
    /// block is dropped.
    pub report_unclosed_classes: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            report_unclosed_classes: true,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unclosed_class_warnings(mut self, enabled: bool) -> Self {
        self.report_unclosed_classes = enabled;
        self
    }
}

// ============================================================================
// Class accumulator
// ============================================================================

/// The in-progress class.
///
/// `Idle` still carries a nameless accumulator: declarations found outside any
/// class collect there and reach the AST only if a stray `}` commits them.
#[derive(Debug)]
enum ClassState {
    Idle(Class),
    InClass { class: Class, line: usize },
}

impl Default for ClassState {
    fn default() -> Self {
        ClassState::Idle(Class::default())
    }
}

impl ClassState {
    fn current(&mut self) -> &mut Class {
        match self {
            ClassState::Idle(class) | ClassState::InClass { class, .. } => class,
        }
    }

    /// Open a new class, returning the previous one if it was never closed.
    fn start(&mut self, name: &str, line: usize) -> Option<(Class, usize)> {
        let previous = std::mem::replace(
            self,
            ClassState::InClass {
                class: Class::new(name),
                line,
            },
        );
        previous.into_open()
    }

    /// Commit whatever is accumulated and go back to idle.
    fn close(&mut self) -> Class {
        match std::mem::take(self) {
            ClassState::Idle(class) | ClassState::InClass { class, .. } => class,
        }
    }

    fn into_open(self) -> Option<(Class, usize)> {
        match self {
            ClassState::InClass { class, line } => Some((class, line)),
            ClassState::Idle(_) => None,
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Reusable `.rep` parser.
///
/// Every `parse_*` call starts from an empty [`Ast`]. After an error the AST is
/// left empty, so a failed parse never exposes partial results.
#[derive(Debug, Default)]
pub struct RepParser {
    config: ParserConfig,
    ast: Ast,
    warnings: Vec<ParseWarning>,
}

impl RepParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The tree produced by the last successful parse.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    /// Warnings recorded by the last successful parse.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Parse `.rep` source held in memory.
    pub fn parse_str(&mut self, source: &str) -> Result<&Ast, ParseError> {
        self.parse_named(source.as_bytes(), "<string>")
    }

    /// Parse `.rep` source from any buffered reader.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<&Ast, ParseError> {
        self.parse_named(reader, "<reader>")
    }

    /// Open and parse a `.rep` file.
    ///
    /// ## Errors
    /// [`ParseError::SourceUnavailable`] if the file cannot be opened or read,
    /// otherwise the first declaration error.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<&Ast, ParseError> {
        self.reset();
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|e| ParseError::unavailable(origin.as_str(), e))?;
        self.parse_named(BufReader::new(file), &origin)
    }

    fn reset(&mut self) {
        self.ast = Ast::default();
        self.warnings.clear();
    }

    fn parse_named<R: BufRead>(&mut self, reader: R, origin: &str) -> Result<&Ast, ParseError> {
        self.reset();
        let (ast, warnings) = self.run(reader, origin)?;
        self.ast = ast;
        self.warnings = warnings;
        Ok(&self.ast)
    }

    #[tracing::instrument(skip_all, fields(origin = %origin))]
    fn run<R: BufRead>(&self, reader: R, origin: &str) -> Result<(Ast, Vec<ParseWarning>), ParseError> {
        let mut ast = Ast::new();
        let mut warnings = Vec::new();
        let mut state = ClassState::default();
        let mut line_no = 0;

        for line in reader.lines() {
            let line = line.map_err(|e| ParseError::unavailable(origin, e))?;
            line_no += 1;

            let kind = classify(&line);
            tracing::trace!(line = line_no, kind = kind.label(), "classified");

            match kind {
                LineKind::ClassHeader { name } => {
                    if let Some(dropped) = state.start(name, line_no) {
                        self.drop_unclosed(dropped, &mut warnings);
                    }
                }
                LineKind::Pod { name, args } => {
                    let attributes = parse_pod_attributes(args, line_no)?;
                    if !attributes.is_empty() {
                        ast.pods.push(Pod {
                            name: name.to_string(),
                            attributes,
                        });
                    }
                }
                LineKind::Property { body } => {
                    let property = parse_property(body, line_no)?;
                    state.current().properties.push(property);
                }
                LineKind::UseEnum { name } => ast.enum_uses.push(name.to_string()),
                LineKind::Signal { signature } => state.current().signals.push(signature.to_string()),
                LineKind::Slot { signature } => state.current().slots.push(signature.to_string()),
                LineKind::BlockEnd => {
                    let class = state.close();
                    tracing::debug!(class = %class.name, properties = class.properties.len(), "committed class");
                    ast.classes.push(class);
                }
                LineKind::BlockStart | LineKind::Comment | LineKind::Blank => {}
                LineKind::Passthrough(text) => ast.includes.push(text.to_string()),
            }
        }

        if let Some(dropped) = state.into_open() {
            self.drop_unclosed(dropped, &mut warnings);
        }

        tracing::debug!(
            lines = line_no,
            classes = ast.classes.len(),
            pods = ast.pods.len(),
            "parsed"
        );
        Ok((ast, warnings))
    }

    fn drop_unclosed(&self, (class, line): (Class, usize), warnings: &mut Vec<ParseWarning>) {
        if !self.config.report_unclosed_classes {
            return;
        }
        tracing::warn!(class = %class.name, line, "class block never closed; dropping its declarations");
        warnings.push(ParseWarning::UnclosedClass { name: class.name, line });
    }
}

// ============================================================================
// One-shot entrypoints
// ============================================================================

/// Parse `.rep` source held in memory.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_str(source: &str) -> Result<Ast, ParseError> {
    let mut parser = RepParser::new();
    parser.parse_str(source)?;
    Ok(parser.into_ast())
}

/// Open and parse a `.rep` file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Ast, ParseError> {
    let mut parser = RepParser::new();
    parser.parse_file(path)?;
    Ok(parser.into_ast())
}

#[cfg(test)]
mod tests;
