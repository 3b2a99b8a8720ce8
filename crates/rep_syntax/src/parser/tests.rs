//! Driver tests.
//!
//! These cover how classified lines are folded into the AST: class lifecycles,
//! top-level records, and error propagation.

use super::*;
use crate::ast::{Modifier, PodAttribute, Property};

fn parse_ok(source: &str) -> Ast {
    parse_str(source).unwrap()
}

#[test]
fn test_parse_class_block() {
    let source = r#"
class Engine
{
    PROP(int rpm)
    PROP(QString model = "V8" READONLY)
    SIGNAL(stalled())
    SLOT(void start())
    SIGNAL(rpmChanged(int rpm))
};
"#;
    let ast = parse_ok(source);
    assert_eq!(ast.classes.len(), 1);
    let class = &ast.classes[0];
    assert_eq!(class.name, "Engine");
    assert_eq!(
        class.properties,
        vec![
            Property::new("int", "rpm", "", Modifier::ReadWrite),
            Property::new("QString", "model", "\"V8\"", Modifier::ReadOnly),
        ]
    );
    assert_eq!(class.signals, vec!["stalled()", "rpmChanged(int rpm)"]);
    assert_eq!(class.slots, vec!["void start()"]);
    assert!(ast.includes.is_empty());
}

#[test]
fn test_top_level_records() {
    let source = "#include \"types.h\"\nUSE_ENUM(Mode)\nPOD Point(int x, int y)\n// comment\n\n#include <QtCore>\n";
    let ast = parse_ok(source);
    assert_eq!(ast.enum_uses, vec!["Mode"]);
    assert_eq!(ast.pods.len(), 1);
    assert_eq!(ast.pods[0].name, "Point");
    assert_eq!(
        ast.pods[0].attributes,
        vec![PodAttribute::new("int", "x"), PodAttribute::new("int", "y")]
    );
    assert_eq!(ast.includes, vec!["#include \"types.h\"", "#include <QtCore>"]);
    assert!(ast.classes.is_empty());
}

#[test]
fn test_empty_pod_is_skipped() {
    let ast = parse_ok("POD Nothing()\n");
    assert!(ast.pods.is_empty());
}

#[test]
fn test_multiple_classes_in_order() {
    let source = "class A\n{\nPROP(int a)\n}\nclass B\n{\nSLOT(b())\n}\n";
    let ast = parse_ok(source);
    let names: Vec<_> = ast.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(ast.classes[0].properties.len(), 1);
    assert!(ast.classes[0].slots.is_empty());
    assert_eq!(ast.classes[1].slots, vec!["b()"]);
}

#[test]
fn test_unclosed_class_at_end_is_dropped() {
    let mut parser = RepParser::new();
    let ast = parser.parse_str("class Lost\n{\nPROP(int x)\n").unwrap();
    assert!(ast.classes.is_empty());
    assert_eq!(
        parser.warnings(),
        &[ParseWarning::UnclosedClass {
            name: "Lost".to_string(),
            line: 1
        }]
    );
}

#[test]
fn test_new_header_drops_open_class() {
    let mut parser = RepParser::new();
    let ast = parser
        .parse_str("class First\n{\nPROP(int x)\nclass Second\n{\nPROP(int y)\n}\n")
        .unwrap();
    assert_eq!(ast.classes.len(), 1);
    assert_eq!(ast.classes[0].name, "Second");
    assert_eq!(ast.classes[0].properties.len(), 1);
    assert_eq!(ast.classes[0].properties[0].name, "y");
    assert_eq!(parser.warnings().len(), 1);
}

#[test]
fn test_unclosed_warning_can_be_disabled() {
    let mut parser = RepParser::with_config(ParserConfig::new().with_unclosed_class_warnings(false));
    parser.parse_str("class Lost\n").unwrap();
    assert!(parser.warnings().is_empty());
}

#[test]
fn test_stray_block_end_commits_nameless_class() {
    let ast = parse_ok("PROP(int orphan)\n}\n");
    assert_eq!(ast.classes.len(), 1);
    assert!(!ast.classes[0].is_valid());
    assert_eq!(ast.classes[0].properties[0].name, "orphan");
}

#[test]
fn test_block_end_resets_accumulator() {
    let ast = parse_ok("class A\n{\nPROP(int a)\n}\n}\n");
    assert_eq!(ast.classes.len(), 2);
    assert_eq!(ast.classes[0].name, "A");
    assert!(!ast.classes[1].is_valid());
    assert!(ast.classes[1].is_empty());
}

#[test]
fn test_property_error_aborts_parse() {
    let mut parser = RepParser::new();
    let err = parser
        .parse_str("#include \"a.h\"\nclass A\n{\nPROP(int x BOGUS)\nPROP(int y)\n}\n")
        .unwrap_err();
    assert!(matches!(err, ParseError::UnknownModifierFlag { line: 4, .. }));
    // Nothing from before the failure is observable.
    assert!(parser.ast().is_empty());
}

#[test]
fn test_malformed_property_reports_declaration() {
    match parse_str("class A\n{\nPROP(intx)\n}\n").unwrap_err() {
        ParseError::MalformedProperty { line, declaration } => {
            assert_eq!(line, 3);
            assert_eq!(declaration, "intx");
        }
        other => panic!("Expected MalformedProperty, got {other:?}"),
    }
}

#[test]
fn test_malformed_pod_attribute() {
    let err = parse_str("POD Broken(int)\n").unwrap_err();
    assert!(matches!(err, ParseError::MalformedPodAttribute { line: 1, .. }));
}

#[test]
fn test_parser_is_reusable() {
    let mut parser = RepParser::new();
    parser.parse_str("class A\n{\n}\n#include \"a.h\"\n").unwrap();
    assert_eq!(parser.ast().classes.len(), 1);

    let ast = parser.parse_str("USE_ENUM(Mode)\n").unwrap();
    assert!(ast.classes.is_empty());
    assert!(ast.includes.is_empty());
    assert_eq!(ast.enum_uses, vec!["Mode"]);
}

#[test]
fn test_crlf_line_endings() {
    let ast = parse_ok("class A\r\n{\r\nPROP(int x)\r\n}\r\n");
    assert_eq!(ast.classes.len(), 1);
    assert_eq!(ast.classes[0].properties[0].name, "x");
}

#[test]
fn test_missing_file_is_unavailable() {
    let mut parser = RepParser::new();
    let err = parser.parse_file("definitely/not/here.rep").unwrap_err();
    assert!(matches!(err, ParseError::SourceUnavailable { .. }));
    assert!(parser.ast().is_empty());
}

#[test]
fn test_reader_input() {
    let source = std::io::Cursor::new("POD Size(int w, int h);\n");
    let mut parser = RepParser::new();
    let ast = parser.parse_reader(source).unwrap();
    assert_eq!(ast.pods[0].attributes.len(), 2);
}
