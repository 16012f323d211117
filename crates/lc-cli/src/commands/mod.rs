//! Command implementations for the lcgen CLI

pub mod common;
pub mod generate;
pub mod lookup;
pub mod resolve;

pub use generate::generate_command;
pub use lookup::lookup_command;
pub use resolve::resolve_command;
