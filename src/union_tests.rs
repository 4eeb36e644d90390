//! Union declarations: literal cycling, reference resolution (including
//! forward and missing references), object unions, and tuple unions.

use serde_json::{json, Value};

use crate::compile_source;

#[test]
fn string_union_cycles_in_declaration_order() {
    let unit = compile_source("x.ts", "type Name = 'a' | 'b' | 'c';").unwrap();

    assert_eq!(unit.generators.len(), 1);
    let declaration = &unit.generators[0];
    assert_eq!(declaration.identifier.as_deref(), Some("Name"));

    assert_eq!((declaration.get)(), json!("a"));
    assert_eq!((declaration.get)(), json!("b"));
    assert_eq!((declaration.get)(), json!("c"));
    assert_eq!((declaration.get)(), json!("a"));
}

#[test]
fn number_union_cycles() {
    let unit = compile_source("x.ts", "type N = 1 | 2 | 3;").unwrap();

    let declaration = &unit.generators[0];
    assert_eq!((declaration.get)(), json!(1));
    assert_eq!((declaration.get)(), json!(2));
    assert_eq!((declaration.get)(), json!(3));
    assert_eq!((declaration.get)(), json!(1));
}

#[test]
fn union_resolves_references_in_either_declaration_order() {
    let source = "
        type A = 'a';
        type B = 'b';
        type Name = A | B | C;
        type C = 'c';
    ";
    let unit = compile_source("x.ts", source).unwrap();

    assert_eq!(unit.generators.len(), 4);

    let name = unit.registry.get("Name").expect("Name should be registered");
    assert_eq!(name(), json!("a"));
    assert_eq!(name(), json!("b"));
    assert_eq!(name(), json!("c"));
    assert_eq!(name(), json!("a"));
}

#[test]
fn forward_reference_resolves_after_full_pass() {
    let source = "
        type A = 'a';
        type Name = A | B;
        type B = 'b';
    ";
    let unit = compile_source("x.ts", source).unwrap();

    let name = unit.registry.get("Name").unwrap();
    assert_eq!(name(), json!("a"));
    assert_eq!(name(), json!("b"));
}

#[test]
fn unresolved_reference_yields_null_silently() {
    let unit = compile_source("x.ts", "type A = 'a';\ntype Name = A | Missing;").unwrap();

    let name = unit.registry.get("Name").unwrap();
    assert_eq!(name(), json!("a"));
    assert_eq!(name(), Value::Null);
    assert_eq!(name(), json!("a"));
}

#[test]
fn object_union_alternates_exact_records() {
    let source = r#"type Name = { x: 1; y: "1" } | { x: 2; y: "2" };"#;
    let unit = compile_source("x.ts", source).unwrap();

    let declaration = &unit.generators[0];
    assert_eq!((declaration.get)(), json!({ "x": 1, "y": "1" }));
    assert_eq!((declaration.get)(), json!({ "x": 2, "y": "2" }));
    assert_eq!((declaration.get)(), json!({ "x": 1, "y": "1" }));
}

#[test]
fn tuple_union_alternates_arrays() {
    let unit = compile_source("x.ts", "type W = [1, 2, 3] | [2, 3, 4];").unwrap();

    assert_eq!(unit.generators.len(), 1);
    let declaration = &unit.generators[0];
    assert_eq!((declaration.get)(), json!([1, 2, 3]));
    assert_eq!((declaration.get)(), json!([2, 3, 4]));
    assert_eq!((declaration.get)(), json!([1, 2, 3]));
}

#[test]
fn uncompilable_branches_are_dropped() {
    // the function-type branch compiles to nothing, leaving a one-branch union
    let unit = compile_source("x.ts", "type U = 'a' | (() => void);").unwrap();

    let declaration = &unit.generators[0];
    assert_eq!((declaration.get)(), json!("a"));
    assert_eq!((declaration.get)(), json!("a"));
}
