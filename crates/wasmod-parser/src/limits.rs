//! Module for implementation limits.
//!
//! The binary format places no bounds of its own on length-prefixed counts,
//! so a crafted or corrupted input could otherwise demand unbounded
//! allocation. Exceeding a limit fails the decode with
//! [`Error::LimitExceeded`](crate::Error::LimitExceeded).

/// The maximum number of function types in a type section.
pub const MAX_TYPES: u64 = 1_000_000;

/// The maximum number of entries in a function or code section.
pub const MAX_FUNCTIONS: u64 = 1_000_000;

/// The maximum number of exports in an export section.
pub const MAX_EXPORTS: u64 = 100_000;

/// The maximum byte length of a name.
pub const MAX_NAME_BYTES: u64 = 100_000;

/// The maximum number of parameters or results of a function type.
pub const MAX_RESULT_TYPES: u64 = 1_000;

/// The maximum number of local variable runs declared by a function body.
pub const MAX_LOCAL_RUNS: u64 = 50_000;

/// The maximum total number of local variables of a function body.
pub const MAX_LOCALS: u64 = 50_000;

/// The maximum number of labels in a `br_table` instruction.
pub const MAX_BR_TABLE_LABELS: u64 = 65_536;

/// The maximum nesting depth of structured control instructions.
///
/// Nested bodies decode recursively, so this also bounds the decoder's own
/// stack growth on crafted inputs.
pub const MAX_NESTING_DEPTH: u64 = 200;
