//! A library for the definition of decoded WebAssembly core module types.

#![deny(missing_docs)]

mod core;
mod instructions;
mod module;

pub use self::core::*;
pub use self::instructions::*;
pub use self::module::*;
