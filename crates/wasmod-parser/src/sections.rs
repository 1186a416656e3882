//! Module for decoding module sections.

use crate::{
    instructions, leb128, limits,
    source::{read_name, Bounded, ByteSource},
    types, DecodeResult, Error,
};
use indexmap::IndexMap;
use wasmod_types::{
    CodeSection, CustomSection, Export, ExportDesc, ExportSection, FunctionCode, FunctionSection,
    Section, SectionId, TypeSection,
};

/// Reads a vector count and checks it against an implementation limit.
fn read_count<S: ByteSource>(
    source: &mut S,
    kind: &'static str,
    limit: u64,
) -> DecodeResult<u32> {
    let offset = source.offset();
    let count = leb128::read_u32(source, kind)?;
    if u64::from(count) > limit {
        return Err(Error::LimitExceeded {
            kind,
            limit,
            offset,
        });
    }

    Ok(count)
}

/// Decodes one section whose id byte has already been read.
///
/// The section's declared byte length scopes a bounded source; the section
/// decoder must consume that region exactly.
pub(crate) fn decode_section<S: ByteSource>(
    source: &mut S,
    id_byte: u8,
    id_offset: u64,
) -> DecodeResult<Section> {
    let id = SectionId::from_byte(id_byte).ok_or(Error::InvalidSectionId {
        id: id_byte,
        offset: id_offset,
    })?;

    let size = leb128::read_u32(source, "section size")?;
    log::debug!("decoding {id} section of {size} bytes");

    let mut content = Bounded::new(source, u64::from(size));
    let section = match id {
        SectionId::Custom => Section::Custom(decode_custom_section(&mut content)?),
        SectionId::Type => Section::Type(decode_type_section(&mut content)?),
        SectionId::Function => Section::Function(decode_function_section(&mut content)?),
        SectionId::Export => Section::Export(decode_export_section(&mut content)?),
        SectionId::Code => Section::Code(decode_code_section(&mut content)?),
        id => {
            return Err(Error::SectionNotSupported {
                id,
                offset: id_offset,
            })
        }
    };

    let remaining = content.remaining().unwrap_or(0);
    if remaining > 0 {
        return Err(Error::TrailingSectionBytes {
            section: id,
            remaining,
            offset: content.offset(),
        });
    }

    Ok(section)
}

/// Decodes a custom section: a name, then the remainder of the region
/// verbatim as uninterpreted payload.
fn decode_custom_section<S: ByteSource>(source: &mut S) -> DecodeResult<CustomSection> {
    let name = read_name(source)?;
    let mut data = Vec::new();
    source.read_remaining(&mut data, "custom section payload")?;
    Ok(CustomSection { name, data })
}

/// Decodes a type section: a vector of function types.
fn decode_type_section<S: ByteSource>(source: &mut S) -> DecodeResult<TypeSection> {
    let count = read_count(source, "types", limits::MAX_TYPES)?;
    let mut types = Vec::with_capacity(count as usize);
    for _ in 0..count {
        types.push(types::decode_function_type(source)?);
    }

    Ok(TypeSection { types })
}

/// Decodes a function section: a vector of type indices.
fn decode_function_section<S: ByteSource>(source: &mut S) -> DecodeResult<FunctionSection> {
    let count = read_count(source, "functions", limits::MAX_FUNCTIONS)?;
    let mut type_indices = Vec::with_capacity(count as usize);
    for _ in 0..count {
        type_indices.push(leb128::read_u32(source, "type index")?);
    }

    Ok(FunctionSection { type_indices })
}

/// Decodes an export section: a vector of exports, each a name, a
/// description tag, and an index into the tagged index space.
fn decode_export_section<S: ByteSource>(source: &mut S) -> DecodeResult<ExportSection> {
    let count = read_count(source, "exports", limits::MAX_EXPORTS)?;
    let mut exports = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = read_name(source)?;
        let offset = source.offset();
        let tag = source.read_byte("export description tag")?;
        let index = leb128::read_u32(source, "export index")?;
        let desc = match tag {
            0x00 => ExportDesc::Func(index),
            0x01 => ExportDesc::Table(index),
            0x02 => ExportDesc::Memory(index),
            0x03 => ExportDesc::Global(index),
            tag => return Err(Error::InvalidExportDesc { tag, offset }),
        };

        exports.push(Export { name, desc });
    }

    Ok(ExportSection { exports })
}

/// Decodes a code section: a vector of function bodies, each scoped to its
/// own declared byte length.
fn decode_code_section<S: ByteSource>(source: &mut S) -> DecodeResult<CodeSection> {
    let count = read_count(source, "function bodies", limits::MAX_FUNCTIONS)?;
    let mut functions = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let size = leb128::read_u32(source, "function body size")?;
        let mut entry = Bounded::new(source, u64::from(size));
        functions.push(decode_function_code(&mut entry)?);

        let remaining = entry.remaining().unwrap_or(0);
        if remaining > 0 {
            return Err(Error::TrailingFunctionBytes {
                remaining,
                offset: entry.offset(),
            });
        }
    }

    Ok(CodeSection { functions })
}

fn decode_function_code<S: ByteSource>(source: &mut S) -> DecodeResult<FunctionCode> {
    let runs = read_count(source, "local declarations", limits::MAX_LOCAL_RUNS)?;
    let mut locals = IndexMap::new();
    let mut total: u64 = 0;
    for _ in 0..runs {
        let offset = source.offset();
        let count = leb128::read_u32(source, "local count")?;
        let ty = types::decode_value_type(source)?;

        total += u64::from(count);
        if total > limits::MAX_LOCALS {
            return Err(Error::LimitExceeded {
                kind: "locals",
                limit: limits::MAX_LOCALS,
                offset,
            });
        }

        // Counts accumulate when a type is declared in multiple runs.
        *locals.entry(ty).or_insert(0u32) += count;
    }

    let body = instructions::decode_expression(source)?;
    Ok(FunctionCode { locals, body })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::Source;
    use pretty_assertions::assert_eq;
    use wasmod_types::{FunctionType, Instruction, ValueType};

    fn section(bytes: &[u8]) -> DecodeResult<Section> {
        let mut source = Source::new(bytes);
        let id = source.read_byte("section id").unwrap();
        decode_section(&mut source, id, 0)
    }

    #[test]
    fn custom_section() {
        // Name "name" followed by the payload [0x02, 0x01, 0x00].
        let decoded = section(&[0x00, 0x08, 0x04, 0x6E, 0x61, 0x6D, 0x65, 0x02, 0x01, 0x00])
            .unwrap();
        assert_eq!(
            decoded,
            Section::Custom(CustomSection {
                name: "name".to_string(),
                data: vec![0x02, 0x01, 0x00],
            })
        );
    }

    #[test]
    fn type_section() {
        let decoded = section(&[0x01, 0x07, 0x01, 0x60, 0x02, 0x7F, 0x7F, 0x01, 0x7F]).unwrap();
        assert_eq!(
            decoded,
            Section::Type(TypeSection {
                types: vec![FunctionType {
                    params: vec![ValueType::I32, ValueType::I32],
                    results: vec![ValueType::I32],
                }],
            })
        );
    }

    #[test]
    fn function_section() {
        let decoded = section(&[0x03, 0x02, 0x01, 0x00]).unwrap();
        assert_eq!(
            decoded,
            Section::Function(FunctionSection {
                type_indices: vec![0],
            })
        );
    }

    #[test]
    fn export_section() {
        let decoded =
            section(&[0x07, 0x07, 0x01, 0x03, 0x61, 0x64, 0x64, 0x00, 0x00]).unwrap();
        assert_eq!(
            decoded,
            Section::Export(ExportSection {
                exports: vec![Export {
                    name: "add".to_string(),
                    desc: ExportDesc::Func(0),
                }],
            })
        );
    }

    #[test]
    fn export_section_rejects_unknown_tags() {
        let err = section(&[0x07, 0x05, 0x01, 0x01, 0x65, 0x04, 0x00]).unwrap_err();
        assert!(matches!(err, Error::InvalidExportDesc { tag: 0x04, .. }));
    }

    #[test]
    fn code_section() {
        let decoded = section(&[
            0x0A, 0x0B, 0x01, // one function body
            0x09, // body size
            0x01, 0x02, 0x7F, // two i32 locals
            0x20, 0x00, 0x20, 0x01, 0x6A, 0x0B, // local.get 0; local.get 1; i32.add; end
        ])
        .unwrap();

        let Section::Code(code) = decoded else {
            panic!("expected a code section");
        };

        assert_eq!(code.functions.len(), 1);
        let function = &code.functions[0];
        assert_eq!(function.locals.get(&ValueType::I32), Some(&2));
        assert_eq!(
            function.body,
            [
                Instruction::LocalGet { local: 0 },
                Instruction::LocalGet { local: 1 },
                Instruction::I32Add,
            ]
        );
    }

    #[test]
    fn locals_accumulate_across_runs() {
        let decoded = section(&[
            0x0A, 0x08, 0x01, // one function body
            0x06, // body size
            0x02, 0x01, 0x7F, 0x02, 0x7F, // one i32 local, then two more
            0x0B, // end
        ])
        .unwrap();

        let Section::Code(code) = decoded else {
            panic!("expected a code section");
        };
        assert_eq!(code.functions[0].locals.get(&ValueType::I32), Some(&3));
    }

    #[test]
    fn section_must_consume_its_declared_length() {
        // A function section declaring three content bytes but only
        // consuming two of them.
        let err = section(&[0x03, 0x03, 0x01, 0x00, 0xAA]).unwrap_err();
        assert!(matches!(
            err,
            Error::TrailingSectionBytes {
                section: SectionId::Function,
                remaining: 1,
                ..
            }
        ));
    }

    #[test]
    fn function_body_must_consume_its_declared_length() {
        let err = section(&[
            0x0A, 0x06, 0x01, // one function body
            0x04, // body size
            0x00, 0x01, 0x0B, // no locals; nop; end
            0xAA, // left over within the body's bound
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::TrailingFunctionBytes { remaining: 1, .. }
        ));
    }

    #[test]
    fn unsupported_sections_are_named() {
        let err = section(&[0x02, 0x01, 0x00]).unwrap_err();
        assert!(matches!(
            err,
            Error::SectionNotSupported {
                id: SectionId::Import,
                ..
            }
        ));

        let err = section(&[0x0D, 0x01, 0x00]).unwrap_err();
        assert!(matches!(err, Error::InvalidSectionId { id: 0x0D, .. }));
    }

    #[test]
    fn truncated_section_content_fails() {
        // A custom section claiming six bytes of content in a shorter input.
        let err = section(&[0x00, 0x06, 0x04, 0x6E, 0x61]).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof { .. }));
    }
}
