//! Module for decoding a whole module image.

use crate::{
    sections,
    source::{ByteSource, Source},
    DecodeResult, Error,
};
use std::io::Read;
use wasmod_types::Module;

/// The magic bytes that begin every module: `\0asm`.
pub const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// The only supported binary format version, as little-endian bytes.
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Decodes a complete module from the given reader.
///
/// The reader is consumed to its end; sections are decoded in the order
/// they appear. Any failure aborts the decode without returning a partial
/// module.
pub fn decode_module<R: Read>(reader: R) -> DecodeResult<Module> {
    let mut source = Source::new(reader);
    decode_header(&mut source)?;

    let mut sections = Vec::new();
    while let Some(id) = source.try_read_byte("section id")? {
        let id_offset = source.offset() - 1;
        sections.push(sections::decode_section(&mut source, id, id_offset)?);
    }

    log::debug!("decoded module with {} section(s)", sections.len());
    Ok(Module { sections })
}

fn decode_header<S: ByteSource>(source: &mut S) -> DecodeResult<()> {
    let mut magic = [0; 4];
    source.read_exact(&mut magic, "magic")?;
    if magic != MAGIC {
        return Err(Error::InvalidMagic { found: magic });
    }

    let mut version = [0; 4];
    source.read_exact(&mut version, "version")?;
    if version != VERSION {
        return Err(Error::UnsupportedVersion { found: version });
    }

    Ok(())
}
