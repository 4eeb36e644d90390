//! Literal type aliases compile to constant generators.

use serde_json::json;

use crate::compile_source;

#[test]
fn string_literal_alias_is_constant() {
    let unit = compile_source("x.ts", "type L = 'x';").unwrap();

    assert_eq!(unit.generators.len(), 1);
    let declaration = &unit.generators[0];
    assert_eq!((declaration.get)(), json!("x"));
    assert_eq!((declaration.get)(), json!("x"));
    assert_eq!((declaration.get)(), json!("x"));
}

#[test]
fn number_literal_alias_is_constant() {
    let unit = compile_source("x.ts", "type L = 42;").unwrap();

    let declaration = &unit.generators[0];
    assert_eq!((declaration.get)(), json!(42));
    assert_eq!((declaration.get)(), json!(42));
}

#[test]
fn tuple_of_literals_rebuilds_each_call() {
    let unit = compile_source("x.ts", "type T = [1, 'two', true];").unwrap();

    let declaration = &unit.generators[0];
    assert_eq!((declaration.get)(), json!([1, "two", true]));
    assert_eq!((declaration.get)(), json!([1, "two", true]));
}

#[test]
fn namespace_members_register_like_top_level_declarations() {
    let source = "
        namespace N {
            type L = 'x';
            interface Shape {
                tag: L;
            }
        }
    ";
    let unit = compile_source("x.ts", source).unwrap();

    assert_eq!(unit.generators.len(), 2);
    let shape = unit.registry.get("Shape").unwrap();
    assert_eq!(shape(), json!({ "tag": "x" }));
}

#[test]
fn unclassifiable_statements_are_skipped() {
    let source = "
        const x = 5;
        enum E { A }
        type L = 'x';
    ";
    let unit = compile_source("x.ts", source).unwrap();

    // only the literal alias compiles; the rest is skipped, not rejected
    assert_eq!(unit.generators.len(), 1);
    assert_eq!(unit.generators[0].identifier.as_deref(), Some("L"));
}
