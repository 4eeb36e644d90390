//! Type registry: declared type name to compiled generator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::generator::GenFn;

/// Shared name-to-generator table for one compilation pass.
///
/// Handles are cheap clones of the same table, so the registry can be passed
/// into every compilation call instead of living in ambient state. Lookups
/// through [`TypeRegistry::resolve`] are lazy: the table is consulted when
/// the returned generator is *called*, which is what lets a reference
/// compile before its target is declared, including mutual cycles.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    map: Rc<RefCell<HashMap<String, GenFn>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled generator under a declared name. Redeclaration
    /// overwrites: last compiled wins, no diagnostic.
    pub fn register(&self, name: &str, generator: GenFn) {
        self.map.borrow_mut().insert(name.to_string(), generator);
    }

    /// The generator registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<GenFn> {
        self.map.borrow().get(name).cloned()
    }

    /// A lazy reference to a named type. Every call re-reads the table; a
    /// name that is never registered yields `Value::Null` silently.
    pub fn resolve(&self, name: &str) -> GenFn {
        let map = Rc::clone(&self.map);
        let name = name.to_string();
        Rc::new(move || {
            let found = map.borrow().get(&name).cloned();
            match found {
                Some(generator) => generator(),
                None => Value::Null,
            }
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.map.borrow().len()
    }
}
