//! A library for decoding modules in the WebAssembly binary format.
//!
//! The decoder reads forward through any [`std::io::Read`] implementation,
//! never seeking and never buffering more than the region it is currently
//! inside of. Every error it produces carries the absolute byte offset at
//! which decoding failed.
//!
//! # Example
//!
//! ```
//! use wasmod_parser::decode_module;
//!
//! let bytes: &[u8] = &[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
//! let module = decode_module(bytes)?;
//! assert!(module.sections.is_empty());
//! # Ok::<(), wasmod_parser::Error>(())
//! ```

#![deny(missing_docs)]

mod error;
mod instructions;
mod leb128;
mod module;
mod sections;
mod types;

pub mod limits;
pub mod source;

pub use self::error::*;
pub use self::module::*;
