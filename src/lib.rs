//! Native props compiler.
//!
//! Compiles TypeScript type declarations into deterministic value
//! generators — zero-argument closures that produce a fresh conforming
//! value on every call — and pairs React component declarations with the
//! generator compiled for their props type.
//!
//! The oxc parser is the front end: this crate consumes its declaration
//! tree and never tokenizes source text itself. Compilation is a single
//! synchronous recursion over that tree; the only shared state is the
//! per-compilation [`TypeRegistry`], which reference sites consult lazily
//! at generator call time. That laziness is what makes forward references
//! and mutually recursive named types resolve without any ordering pass.
//!
//! There are no fatal errors in the core: unsupported node shapes compile
//! to nothing and are skipped, unresolved type references yield null at
//! call time, and a missing identifier just makes the binding anonymous.

mod compile;
mod discovery;
mod generator;
mod registry;

#[cfg(test)]
mod literal_tests;
#[cfg(test)]
mod union_tests;

pub use compile::Compiler;
pub use discovery::{
    compile_program, compile_source, component_props_reports, CompiledUnit, ComponentPropsReport,
    ExportRecord, Generator, ReactExport,
};
pub use generator::{
    array_generator, boolean_generator, literal_generator, number_generator, optional_generator,
    seed_digest, string_generator, union_generator, GenFn, ARRAY_LENGTHS,
};
pub use registry::TypeRegistry;

#[cfg(feature = "napi")]
pub use discovery::compile_props_native;
