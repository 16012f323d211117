//! Rust source emission for generated constants interfaces.
//!
//! Each top-level interface becomes one module directory: `mod.rs` holds the
//! constants trait, the optional lookup trait and the factory, and every
//! locale gets its own file with the implementing struct.

pub mod emitter;
pub mod printer;

pub use emitter::RustSourceEmitter;
pub use printer::ConstantsPrinter;
