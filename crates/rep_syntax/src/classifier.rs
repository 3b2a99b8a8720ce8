//! Line classification
//!
//! Every `.rep` statement fits on a single line, so the frontend needs no
//! tokenizer: each line is matched against a fixed, ordered list of patterns and
//! the first one that matches the whole line decides its [`LineKind`].
//!
//! ## Order
//!
//! class header, POD, PROP, USE_ENUM, SIGNAL, SLOT, block end, block start,
//! comment. Anything else that is not blank is passed through verbatim.
//!
//! ## Notes
//! - Patterns are compiled once into read-only statics and shared between threads.
//! - Keywords are only anchored at the start of the line, not at a word boundary:
//!   `classify` is a class header for a class named `ify`.

use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_HEADER: Lazy<Regex> = Lazy::new(|| compile(r"^class\s*(\S+)\s*$"));
static POD_DECL: Lazy<Regex> = Lazy::new(|| compile(r"^POD\s*(\S+)\s*\(\s*(.*)\s*\);?\s*$"));
static PROP_DECL: Lazy<Regex> = Lazy::new(|| compile(r"^\s*PROP\s*\(([^)]+)\);?.*$"));
static USE_ENUM: Lazy<Regex> = Lazy::new(|| compile(r"^USE_ENUM\s*\(\s*(.*)\s*\);?\s*$"));
static SIGNAL_DECL: Lazy<Regex> = Lazy::new(|| compile(r"^\s*SIGNAL\s*\(\s*(.*)\s*\);?\s*$"));
static SLOT_DECL: Lazy<Regex> = Lazy::new(|| compile(r"^\s*SLOT\s*\(\s*(.*)\s*\);?\s*$"));
static BLOCK_END: Lazy<Regex> = Lazy::new(|| compile(r"^\s*\};?\s*$"));
static BLOCK_START: Lazy<Regex> = Lazy::new(|| compile(r"^\s*\{\s*$"));
static COMMENT: Lazy<Regex> = Lazy::new(|| compile(r"^\s*//(.*)$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("INVARIANT: line classifier patterns are valid regexes")
}

/// The shape of a single source line, with the captured text borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `class Name`
    ClassHeader { name: &'a str },
    /// `POD Name(args)`; `args` is the untrimmed attribute list.
    Pod { name: &'a str, args: &'a str },
    /// `PROP(body)`; `body` is everything between the parentheses.
    Property { body: &'a str },
    /// `USE_ENUM(Name)`
    UseEnum { name: &'a str },
    /// `SIGNAL(signature)`
    Signal { signature: &'a str },
    /// `SLOT(signature)`
    Slot { signature: &'a str },
    /// `}` or `};`
    BlockEnd,
    /// `{`
    BlockStart,
    /// `// ...`
    Comment,
    /// Empty line.
    Blank,
    /// Any other line, kept verbatim.
    Passthrough(&'a str),
}

impl LineKind<'_> {
    /// Short stable label used in trace output.
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::ClassHeader { .. } => "class",
            LineKind::Pod { .. } => "pod",
            LineKind::Property { .. } => "prop",
            LineKind::UseEnum { .. } => "use_enum",
            LineKind::Signal { .. } => "signal",
            LineKind::Slot { .. } => "slot",
            LineKind::BlockEnd => "block_end",
            LineKind::BlockStart => "block_start",
            LineKind::Comment => "comment",
            LineKind::Blank => "blank",
            LineKind::Passthrough(_) => "passthrough",
        }
    }
}

/// Classify one line of input (without its line terminator).
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(name) = capture(&CLASS_HEADER, line, 1) {
        return LineKind::ClassHeader { name };
    }
    if let Some(caps) = POD_DECL.captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let args = caps.get(2).map_or("", |m| m.as_str());
        return LineKind::Pod { name, args };
    }
    if let Some(body) = capture(&PROP_DECL, line, 1) {
        return LineKind::Property { body };
    }
    if let Some(name) = capture(&USE_ENUM, line, 1) {
        return LineKind::UseEnum { name: name.trim() };
    }
    if let Some(signature) = capture(&SIGNAL_DECL, line, 1) {
        return LineKind::Signal {
            signature: signature.trim(),
        };
    }
    if let Some(signature) = capture(&SLOT_DECL, line, 1) {
        return LineKind::Slot {
            signature: signature.trim(),
        };
    }
    if BLOCK_END.is_match(line) {
        return LineKind::BlockEnd;
    }
    if BLOCK_START.is_match(line) {
        return LineKind::BlockStart;
    }
    if COMMENT.is_match(line) {
        return LineKind::Comment;
    }
    if line.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Passthrough(line)
    }
}

fn capture<'a>(re: &Regex, line: &'a str, group: usize) -> Option<&'a str> {
    re.captures(line)
        .map(|caps| caps.get(group).map_or("", |m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_header() {
        assert_eq!(classify("class Engine"), LineKind::ClassHeader { name: "Engine" });
        assert_eq!(classify("class Engine  "), LineKind::ClassHeader { name: "Engine" });
        // Leading whitespace is not part of the header shape.
        assert_eq!(classify("  class Engine"), LineKind::Passthrough("  class Engine"));
        // A header followed by an opening brace on the same line is not a header.
        assert_eq!(classify("class Engine {"), LineKind::Passthrough("class Engine {"));
    }

    #[test]
    fn test_prefix_anchored_keywords() {
        assert_eq!(classify("classify"), LineKind::ClassHeader { name: "ify" });
        assert_eq!(classify("classEngine"), LineKind::ClassHeader { name: "Engine" });
    }

    #[test]
    fn test_pod() {
        assert_eq!(
            classify("POD Point(int x, int y)"),
            LineKind::Pod {
                name: "Point",
                args: "int x, int y"
            }
        );
        assert_eq!(
            classify("POD Point ( int x );"),
            LineKind::Pod {
                name: "Point",
                args: "int x "
            }
        );
    }

    #[test]
    fn test_property() {
        assert_eq!(classify("PROP(int x)"), LineKind::Property { body: "int x" });
        assert_eq!(
            classify("    PROP(int x = 5 READONLY); // trailing"),
            LineKind::Property {
                body: "int x = 5 READONLY"
            }
        );
    }

    #[test]
    fn test_use_enum_signal_slot() {
        assert_eq!(classify("USE_ENUM(Mode)"), LineKind::UseEnum { name: "Mode" });
        assert_eq!(classify("USE_ENUM( Mode );"), LineKind::UseEnum { name: "Mode" });
        assert_eq!(
            classify("  SIGNAL(changed(int value));"),
            LineKind::Signal {
                signature: "changed(int value)"
            }
        );
        assert_eq!(
            classify("\tSLOT(void reset())"),
            LineKind::Slot {
                signature: "void reset()"
            }
        );
    }

    #[test]
    fn test_block_markers_and_comments() {
        assert_eq!(classify("{"), LineKind::BlockStart);
        assert_eq!(classify("  {  "), LineKind::BlockStart);
        assert_eq!(classify("}"), LineKind::BlockEnd);
        assert_eq!(classify("};"), LineKind::BlockEnd);
        assert_eq!(classify("  };  "), LineKind::BlockEnd);
        assert_eq!(classify("// note"), LineKind::Comment);
        assert_eq!(classify("   // indented"), LineKind::Comment);
    }

    #[test]
    fn test_blank_and_passthrough() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("#include \"foo.h\""), LineKind::Passthrough("#include \"foo.h\""));
        // Whitespace-only lines are non-empty and pass through untouched.
        assert_eq!(classify("   "), LineKind::Passthrough("   "));
    }
}
