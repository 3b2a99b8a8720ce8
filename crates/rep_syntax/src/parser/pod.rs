//! `POD Name(...)` attribute list parsing.

use crate::ast::PodAttribute;
use crate::diagnostics::ParseError;

/// Split a POD argument list into `(type, name)` attributes, in source order.
///
/// An empty list yields no attributes; the driver then skips the POD entirely.
///
/// ## Errors
/// [`ParseError::MalformedPodAttribute`] when a comma-separated segment is not
/// exactly two whitespace-separated tokens.
pub fn parse_pod_attributes(args: &str, line: usize) -> Result<Vec<PodAttribute>, ParseError> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(Vec::new());
    }

    args.split(',')
        .map(|segment| {
            let mut tokens = segment.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(type_name), Some(name), None) => Ok(PodAttribute::new(type_name, name)),
                _ => Err(ParseError::MalformedPodAttribute {
                    line,
                    segment: segment.trim().to_string(),
                }),
            }
        })
        .collect()
}
