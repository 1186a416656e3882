//! Module for CLI commands.

mod exports;
mod parse;
mod sections;

pub use self::exports::*;
pub use self::parse::*;
pub use self::sections::*;
