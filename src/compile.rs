//! Structural compiler: TypeScript type nodes to value generators.
//!
//! A recursive, leaf-first case analysis over `oxc_ast` type nodes. Every
//! case either produces a generator or `None`; `None` means "skip this
//! node", never "abort the declaration". Named references are not chased at
//! compile time — they become lazy registry lookups, which is what makes
//! forward references and reference cycles work.

use std::rc::Rc;

use oxc_ast::ast::{
    PropertyKey, TSLiteral, TSPropertySignature, TSSignature, TSTupleElement, TSType, TSTypeName,
};
use serde_json::{Map, Value};

use crate::generator::{
    array_generator, boolean_generator, empty_fragment, literal_generator, number_generator,
    optional_generator, string_generator, union_generator, GenFn,
};
use crate::registry::TypeRegistry;

/// Recursive type-to-generator compiler. Holds a handle to the shared
/// registry so reference sites can defer resolution to call time.
pub struct Compiler {
    registry: TypeRegistry,
}

impl Compiler {
    pub fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    /// Compile any type node, seeding primitive leaves with `path`. Case
    /// order is significant; the first matching case wins.
    pub fn compile_type(&self, ty: &TSType<'_>, path: &str) -> Option<GenFn> {
        match ty {
            TSType::TSLiteralType(literal) => compile_literal(&literal.literal),
            TSType::TSTupleType(tuple) => self.compile_tuple(&tuple.element_types, path),
            TSType::TSArrayType(array) => self
                .compile_type(&array.element_type, path)
                .map(array_generator),
            TSType::TSUnionType(union) => self.compile_union(&union.types, path),
            TSType::TSTypeLiteral(shape) => self.compile_object(&shape.members, path),
            TSType::TSStringKeyword(_) => Some(string_generator(path)),
            TSType::TSNumberKeyword(_) => Some(number_generator(path)),
            TSType::TSBooleanKeyword(_) => Some(boolean_generator()),
            // `object` degrades to an empty shape, `any`/`null`/`undefined`
            // to null — stand-ins, not failures
            TSType::TSObjectKeyword(_) => Some(literal_generator(empty_fragment())),
            TSType::TSAnyKeyword(_)
            | TSType::TSNullKeyword(_)
            | TSType::TSUndefinedKeyword(_) => Some(literal_generator(Value::Null)),
            TSType::TSTypeReference(reference) => type_reference_name(&reference.type_name)
                .map(|name| self.registry.resolve(&name)),
            TSType::TSParenthesizedType(inner) => self.compile_type(&inner.type_annotation, path),
            _ => None,
        }
    }

    /// Object shapes and interface bodies: compile each property signature,
    /// then merge the per-property fragments into one record per call.
    /// Properties that fail to compile are left out of the record.
    pub fn compile_object(&self, members: &[TSSignature<'_>], path: &str) -> Option<GenFn> {
        let mut fields: Vec<GenFn> = Vec::new();
        for member in members {
            if let TSSignature::TSPropertySignature(property) = member {
                if let Some(field) = self.compile_property(property, path) {
                    fields.push(field);
                }
            }
        }
        if fields.is_empty() {
            return None;
        }
        Some(Rc::new(move || {
            let mut record = Map::new();
            for field in &fields {
                if let Value::Object(fragment) = field() {
                    record.extend(fragment);
                }
            }
            Value::Object(record)
        }))
    }

    /// One property signature: a generator producing a `{ key: value }`
    /// fragment, wrapped in the optional alternator when the signature is
    /// marked optional.
    fn compile_property(&self, property: &TSPropertySignature<'_>, path: &str) -> Option<GenFn> {
        let key = property_key_name(&property.key)?;
        let annotation = property.type_annotation.as_ref()?;
        let value = self.compile_type(&annotation.type_annotation, &format!("{path}{key}"))?;

        let fragment: GenFn = Rc::new(move || {
            let mut fragment = Map::new();
            fragment.insert(key.clone(), value());
            Value::Object(fragment)
        });

        if property.optional {
            Some(optional_generator(empty_fragment(), fragment))
        } else {
            Some(fragment)
        }
    }

    fn compile_union(&self, members: &[TSType<'_>], path: &str) -> Option<GenFn> {
        let mut branches: Vec<GenFn> = Vec::new();
        for member in members {
            // declaration order is the cycling order; uncompilable branches
            // are dropped
            if let Some(branch) = self.compile_type(member, path) {
                branches.push(branch);
            }
        }
        if branches.is_empty() {
            return None;
        }
        Some(union_generator(branches))
    }

    fn compile_tuple(&self, elements: &[TSTupleElement<'_>], path: &str) -> Option<GenFn> {
        let mut slots: Vec<GenFn> = Vec::new();
        for element in elements {
            let compiled = element
                .as_ts_type()
                .and_then(|ty| self.compile_type(ty, path));
            if let Some(slot) = compiled {
                slots.push(slot);
            }
        }
        if slots.is_empty() {
            return None;
        }
        Some(Rc::new(move || {
            Value::Array(slots.iter().map(|slot| slot()).collect())
        }))
    }
}

fn compile_literal(literal: &TSLiteral<'_>) -> Option<GenFn> {
    match literal {
        TSLiteral::StringLiteral(string) => {
            Some(literal_generator(Value::String(string.value.to_string())))
        }
        TSLiteral::NumericLiteral(number) => Some(literal_generator(number_value(number.value))),
        TSLiteral::BooleanLiteral(boolean) => Some(literal_generator(Value::Bool(boolean.value))),
        _ => None,
    }
}

/// Integral numeric literals serialize as integers, everything else as f64.
fn number_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Dotted text of a type reference name, e.g. `Cat` or `React.SFC`.
pub fn type_reference_name(name: &TSTypeName<'_>) -> Option<String> {
    match name {
        TSTypeName::IdentifierReference(ident) => Some(ident.name.to_string()),
        TSTypeName::QualifiedName(qualified) => type_reference_name(&qualified.left)
            .map(|left| format!("{}.{}", left, qualified.right.name)),
        _ => None,
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.to_string()),
        _ => None,
    }
}
