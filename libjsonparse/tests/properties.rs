//! Property-based tests for the JSON parser.
//!
//! Values are generated, rendered to JSON text with a test-local writer, and
//! parsed back. The writer is deliberately tiny: it only has to cover what
//! the generators produce.

use libjsonparse::{parse, Map, Value};
use proptest::prelude::*;

/// Render `value` as JSON, putting `ws` between every pair of tokens.
fn render(value: &Value, ws: &str, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => render_string(s, out),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push_str(ws);
                    out.push(',');
                }
                out.push_str(ws);
                render(item, ws, out);
            }
            out.push_str(ws);
            out.push(']');
        }
        Value::Object(obj) => {
            out.push('{');
            for (i, (key, item)) in obj.iter().enumerate() {
                if i > 0 {
                    out.push_str(ws);
                    out.push(',');
                }
                out.push_str(ws);
                render_string(key, out);
                out.push_str(ws);
                out.push(':');
                out.push_str(ws);
                render(item, ws, out);
            }
            out.push_str(ws);
            out.push('}');
        }
    }
}

fn render_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn to_json(value: &Value, ws: &str) -> String {
    let mut out = String::new();
    out.push_str(ws);
    render(value, ws, &mut out);
    out.push_str(ws);
    out
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::Number(f64::from(n) / 4.0)),
        "[a-z \"\\\\\né]{0,8}".prop_map(Value::String),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{0,4}", inner), 0..6).prop_map(|entries| {
                let mut obj = Map::new();
                for (key, value) in entries {
                    obj.insert(key, value);
                }
                Value::Object(obj)
            }),
        ]
    })
}

fn whitespace_strategy() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,3}"
}

/// Element counts at every level, in document order.
fn shape(value: &Value) -> Vec<usize> {
    let mut out = Vec::new();
    collect_shape(value, &mut out);
    out
}

fn collect_shape(value: &Value, out: &mut Vec<usize>) {
    match value {
        Value::Array(arr) => {
            out.push(arr.len());
            arr.iter().for_each(|v| collect_shape(v, out));
        }
        Value::Object(obj) => {
            out.push(obj.len());
            obj.values().for_each(|v| collect_shape(v, out));
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn test_well_formed_input_parses(value in value_strategy()) {
        let text = to_json(&value, "");
        let parsed = parse(&text).unwrap();
        prop_assert_eq!(&parsed, &value);
        prop_assert_eq!(parsed.depth(), value.depth());
        prop_assert_eq!(shape(&parsed), shape(&value));
    }

    #[test]
    fn test_whitespace_is_insignificant(value in value_strategy(), ws in whitespace_strategy()) {
        let compact = parse(&to_json(&value, "")).unwrap();
        let spaced = parse(&to_json(&value, &ws)).unwrap();
        prop_assert_eq!(compact, spaced);
    }

    #[test]
    fn test_object_key_order_is_preserved(value in value_strategy()) {
        if let Value::Object(obj) = &value {
            let parsed = parse(&to_json(&value, " ")).unwrap();
            let expected: Vec<&String> = obj.keys().collect();
            let actual: Vec<&String> = parsed.as_object().unwrap().keys().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_never_panics(input in "\\PC{0,32}") {
        let _ = parse(&input);
    }

    #[test]
    fn test_never_panics_on_json_like_input(input in "[\\[\\]{}:,\"\\\\ 0-9eE+.\\-tfnrulas]{0,32}") {
        if let Err(err) = parse(&input) {
            prop_assert!(err.offset() <= input.len());
        }
    }
}
