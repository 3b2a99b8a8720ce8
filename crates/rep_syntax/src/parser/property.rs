//! `PROP(...)` body parsing.
//!
//! The body is `Type name [= default] [FLAG]`. The type may be a template
//! expression such as `QMap<QString, int>`, so the type/name separator is the
//! first space outside any `<...>` nesting rather than simply the first space.

use crate::ast::{Modifier, Property};
use crate::diagnostics::ParseError;

/// Parse the text captured between the parentheses of `PROP(...)`.
///
/// ## Errors
/// - [`ParseError::MalformedProperty`] when no top-level space separates type and
///   name, or the name comes out empty.
/// - [`ParseError::UnknownModifierFlag`] when the trailing flag is neither
///   `READONLY` nor `CONSTANT`.
pub fn parse_property(body: &str, line: usize) -> Result<Property, ParseError> {
    let input = body.trim();
    let malformed = || ParseError::MalformedProperty {
        line,
        declaration: body.to_string(),
    };

    let (type_name, name_index) = split_type(input).ok_or_else(malformed)?;
    let rest = input[name_index..].trim();

    let (name, default_value, flag) = match rest.find('=') {
        Some(eq) => {
            let name = rest[..eq].trim();
            let value = rest[eq + 1..].trim();
            match value.find(' ') {
                None => (name, value, None),
                Some(ws) => (name, value[..ws].trim(), Some(value[ws + 1..].trim())),
            }
        }
        None => match rest.find(' ') {
            None => (rest, "", None),
            Some(ws) => (rest[..ws].trim(), "", Some(rest[ws + 1..].trim())),
        },
    };

    if name.is_empty() {
        return Err(malformed());
    }

    let modifier = match flag {
        None => Modifier::ReadWrite,
        Some(flag) => Modifier::from_flag(flag).ok_or_else(|| ParseError::UnknownModifierFlag {
            line,
            flag: flag.to_string(),
        })?,
    };

    Ok(Property::new(type_name, name, default_value, modifier))
}

/// Scan the type expression at the start of `input`.
///
/// Returns the type text and the byte index of the separating space, or `None`
/// if the input ends before a space outside template brackets is found.
fn split_type(input: &str) -> Option<(String, usize)> {
    let mut type_name = String::new();
    let mut in_template = false;
    let mut depth: i32 = 0;

    for (i, c) in input.char_indices() {
        match c {
            '<' => {
                in_template = true;
                depth += 1;
            }
            '>' => {
                depth -= 1;
                if depth == 0 {
                    in_template = false;
                }
            }
            ' ' if !in_template => return Some((type_name, i)),
            _ => {}
        }
        type_name.push(c);
    }

    None
}
