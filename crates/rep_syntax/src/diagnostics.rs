//! Diagnostics for `.rep` parsing
//!
//! Errors abort a parse; warnings are collected alongside a successful AST.
//! Both carry a stable miette code so tooling can match on them.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// A failure that aborts a parse. No partial AST is produced alongside it.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("cannot read `{origin}`")]
    #[diagnostic(
        code(rep::source_unavailable),
        help("check that the path exists and contains UTF-8 text")
    )]
    SourceUnavailable {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid property declaration on line {line}: `{declaration}`")]
    #[diagnostic(
        code(rep::malformed_property),
        help("properties are written `PROP(Type name)`, optionally followed by `= default` and a flag")
    )]
    MalformedProperty { line: usize, declaration: String },

    #[error("invalid property declaration on line {line}: flag `{flag}` is unknown")]
    #[diagnostic(code(rep::unknown_modifier_flag), help("valid flags are READONLY and CONSTANT"))]
    UnknownModifierFlag { line: usize, flag: String },

    #[error("invalid POD attribute on line {line}: `{segment}`")]
    #[diagnostic(
        code(rep::malformed_pod_attribute),
        help("each POD attribute is a type followed by a name, e.g. `POD Point(int x, int y)`")
    )]
    MalformedPodAttribute { line: usize, segment: String },
}

impl ParseError {
    /// 1-based source line of a declaration error. `None` for I/O failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::SourceUnavailable { .. } => None,
            ParseError::MalformedProperty { line, .. }
            | ParseError::UnknownModifierFlag { line, .. }
            | ParseError::MalformedPodAttribute { line, .. } => Some(*line),
        }
    }

    pub(crate) fn unavailable(origin: impl Into<String>, source: io::Error) -> Self {
        ParseError::SourceUnavailable {
            origin: origin.into(),
            source,
        }
    }
}

/// A non-fatal finding recorded during a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseWarning {
    /// A class header was seen but its block never closed; its declarations were dropped.
    #[error("class `{name}` declared on line {line} is never closed and was dropped")]
    #[diagnostic(
        code(rep::unclosed_class),
        severity(Warning),
        help("close the class block before the next class header or the end of the file")
    )]
    UnclosedClass { name: String, line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_text() {
        let err = ParseError::UnknownModifierFlag {
            line: 4,
            flag: "BOGUS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid property declaration on line 4: flag `BOGUS` is unknown"
        );
        assert_eq!(err.line(), Some(4));

        let err = ParseError::MalformedPodAttribute {
            line: 2,
            segment: "int".to_string(),
        };
        assert!(err.to_string().contains("`int`"));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = ParseError::MalformedProperty {
            line: 1,
            declaration: "intx".to_string(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("rep::malformed_property"));

        let warning = ParseWarning::UnclosedClass {
            name: "Foo".to_string(),
            line: 3,
        };
        assert_eq!(warning.severity(), Some(miette::Severity::Warning));
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err = ParseError::unavailable("missing.rep", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "cannot read `missing.rep`");
    }
}
