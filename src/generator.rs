//! Deterministic value generators.
//!
//! Every compiled type bottoms out in one of these: a zero-argument closure
//! that yields the next value in a repeatable sequence each time it is
//! called. State is a private call counter per closure; the sequence itself
//! is keyed entirely by the seed path, so the same path always replays the
//! same values.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// A compiled generator. Safe to call repeatedly and indefinitely; each call
/// advances the closure's own counter and nothing else.
pub type GenFn = Rc<dyn Fn() -> Value>;

/// Array lengths cycled by [`array_generator`]: none, short, medium, long —
/// the spread of lengths a frontend actually needs to see rendered.
pub const ARRAY_LENGTHS: [usize; 4] = [0, 3, 10, 100];

/// Hex SHA-256 of a seed path. The digest is both the string alphabet and
/// the cycling period of the primitive generators below.
pub fn seed_digest(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// String generator: call N returns the digest sliced at `N % len`, head
/// `[0, N)` followed by tail `[N, len)`.
pub fn string_generator(path: &str) -> GenFn {
    let seed = seed_digest(path);
    let calls = Cell::new(0usize);
    Rc::new(move || {
        let n = calls.get();
        calls.set(n + 1);
        let end = n % seed.len();
        // hex digest: byte offsets are char offsets
        Value::String(format!("{}{}", &seed[..end], &seed[end..]))
    })
}

/// Number generator: call N returns the char code of the digest at
/// `N % len` — a bounded, repeating integer sequence.
pub fn number_generator(path: &str) -> GenFn {
    let seed = seed_digest(path);
    let calls = Cell::new(0usize);
    Rc::new(move || {
        let n = calls.get();
        calls.set(n + 1);
        Value::from(seed.as_bytes()[n % seed.len()] as u64)
    })
}

/// Boolean generator: `true` on even call indices, starting at call 0.
pub fn boolean_generator() -> GenFn {
    let calls = Cell::new(0usize);
    Rc::new(move || {
        let n = calls.get();
        calls.set(n + 1);
        Value::Bool(n % 2 == 0)
    })
}

/// Constant generator for literal types: every call returns the same value.
pub fn literal_generator(value: Value) -> GenFn {
    Rc::new(move || value.clone())
}

/// Array generator: cycles [`ARRAY_LENGTHS`] by call count and builds a
/// fresh array each call, invoking the element generator once per slot.
pub fn array_generator(element: GenFn) -> GenFn {
    let calls = Cell::new(0usize);
    Rc::new(move || {
        let n = calls.get();
        calls.set(n + 1);
        let len = ARRAY_LENGTHS[n % ARRAY_LENGTHS.len()];
        Value::Array((0..len).map(|_| element()).collect())
    })
}

/// Union generator: call N invokes branch `N % count`, in declaration order.
pub fn union_generator(branches: Vec<GenFn>) -> GenFn {
    let calls = Cell::new(0usize);
    Rc::new(move || {
        let n = calls.get();
        calls.set(n + 1);
        branches[n % branches.len()]()
    })
}

/// Optional-field generator: alternates between the configured default
/// (even calls, without touching the inner generator) and the inner
/// generator's value (odd calls). Each wrapper owns its counter, so sibling
/// optional fields alternate independently.
pub fn optional_generator(default: Value, inner: GenFn) -> GenFn {
    let calls = Cell::new(0usize);
    Rc::new(move || {
        let n = calls.get();
        calls.set(n + 1);
        if n % 2 == 0 {
            default.clone()
        } else {
            inner()
        }
    })
}

/// The empty-object default used for optional object properties; merging it
/// into a record leaves the key out entirely.
pub fn empty_fragment() -> Value {
    Value::Object(Map::new())
}
