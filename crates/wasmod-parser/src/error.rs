//! Module for decode errors.

use std::fmt;
use wasmod_types::SectionId;

struct HexBytes([u8; 4]);

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }

            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

/// Represents an error that can occur when decoding a module.
///
/// Every failure aborts the decode operation; no partial module is ever
/// returned. Offsets are absolute byte positions from the start of the
/// module image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input ended before a read could complete.
    #[error("unexpected end of input while reading {context} at offset {offset}")]
    UnexpectedEof {
        /// What was being read when the input ended.
        context: &'static str,
        /// The offset at which the read started.
        offset: u64,
    },
    /// The underlying reader failed.
    #[error("failed to read {context} at offset {offset}")]
    Io {
        /// What was being read when the reader failed.
        context: &'static str,
        /// The offset at which the read started.
        offset: u64,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The module did not start with the expected magic bytes.
    #[error("magic mismatch: expected `00 61 73 6d`, found `{found}`", found = HexBytes(*.found))]
    InvalidMagic {
        /// The bytes that were found instead of the magic.
        found: [u8; 4],
    },
    /// The module declared a version other than the one supported.
    #[error("unsupported version: expected `01 00 00 00`, found `{found}`", found = HexBytes(*.found))]
    UnsupportedVersion {
        /// The bytes that were found instead of the version.
        found: [u8; 4],
    },
    /// An unsigned LEB128 value did not fit the requested width.
    #[error("integer at offset {offset} is too large for a u{bits}")]
    IntegerTooLarge {
        /// The requested width in bits.
        bits: u32,
        /// The offset of the first byte of the encoding.
        offset: u64,
    },
    /// A signed LEB128 encoding was longer than its width permits.
    #[error("malformed signed integer at offset {offset}: encoding exceeds {bits} bits")]
    IntegerTooLong {
        /// The width of the requested integer in bits.
        bits: u32,
        /// The offset of the first byte of the encoding.
        offset: u64,
    },
    /// A declared count or length exceeded an implementation limit.
    #[error("number of {kind} at offset {offset} exceeds the implementation limit of {limit}")]
    LimitExceeded {
        /// The kind of item whose count was excessive.
        kind: &'static str,
        /// The limit that was exceeded.
        limit: u64,
        /// The offset of the count.
        offset: u64,
    },
    /// A name was not valid UTF-8.
    #[error("name at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// The offset of the name's contents.
        offset: u64,
        /// The underlying UTF-8 error.
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// A section id byte was not one defined by the format.
    #[error("invalid section id {id} at offset {offset}")]
    InvalidSectionId {
        /// The id byte that was found.
        id: u8,
        /// The offset of the id byte.
        offset: u64,
    },
    /// A section id is defined by the format but its grammar is not decoded.
    #[error("the {id} section at offset {offset} is not supported")]
    SectionNotSupported {
        /// The id of the unsupported section.
        id: SectionId,
        /// The offset of the id byte.
        offset: u64,
    },
    /// A byte did not encode a value type.
    #[error("invalid value type code `0x{byte:02X}` at offset {offset}")]
    InvalidValueType {
        /// The byte that was found.
        byte: u8,
        /// The offset of the byte.
        offset: u64,
    },
    /// A function type did not start with the `0x60` header byte.
    #[error("expected function type header byte `0x60`, found `0x{byte:02X}` at offset {offset}")]
    InvalidFunctionTypeHeader {
        /// The byte that was found.
        byte: u8,
        /// The offset of the byte.
        offset: u64,
    },
    /// An export description tag was not one of the four defined kinds.
    #[error("invalid export description tag `0x{tag:02X}` at offset {offset}")]
    InvalidExportDesc {
        /// The tag byte that was found.
        tag: u8,
        /// The offset of the tag byte.
        offset: u64,
    },
    /// An opcode byte had no registered instruction decoder.
    #[error("unknown opcode `0x{opcode:02X}` at offset {offset}")]
    UnknownOpcode {
        /// The opcode byte that was found.
        opcode: u8,
        /// The offset of the opcode byte.
        offset: u64,
    },
    /// An `else` opcode appeared outside of an `if` instruction.
    #[error("misplaced `else` opcode at offset {offset}")]
    MisplacedElse {
        /// The offset of the opcode byte.
        offset: u64,
    },
    /// A section decoder left bytes of its declared length unconsumed.
    #[error("{remaining} byte(s) left unconsumed at the end of the {section} section at offset {offset}")]
    TrailingSectionBytes {
        /// The section that was not fully consumed.
        section: SectionId,
        /// The number of unconsumed bytes.
        remaining: u64,
        /// The offset of the first unconsumed byte.
        offset: u64,
    },
    /// A function body terminated before the end of its declared length.
    #[error("{remaining} byte(s) left after a function body terminator at offset {offset}")]
    TrailingFunctionBytes {
        /// The number of unconsumed bytes.
        remaining: u64,
        /// The offset of the first unconsumed byte.
        offset: u64,
    },
}

/// The result type used by the decoder.
pub type DecodeResult<T> = std::result::Result<T, Error>;
