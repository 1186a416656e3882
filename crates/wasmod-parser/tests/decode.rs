use pretty_assertions::assert_eq;
use wasmod_parser::{decode_module, Error};
use wasmod_types::{
    Export, ExportDesc, FunctionType, Instruction, Module, Section, SectionId, ValueType,
};

/// A module exporting an `add` function: `(func (param i32 i32) (result i32))`
/// whose body is `local.get 0; local.get 1; i32.add`.
const ADD: &[u8] = &[
    0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
    0x01, 0x07, 0x01, 0x60, 0x02, 0x7F, 0x7F, 0x01, 0x7F, // type section
    0x03, 0x02, 0x01, 0x00, // function section
    0x07, 0x07, 0x01, 0x03, 0x61, 0x64, 0x64, 0x00, 0x00, // export section
    0x0A, 0x09, 0x01, 0x07, 0x00, 0x20, 0x00, 0x20, 0x01, 0x6A, 0x0B, // code section
];

#[test]
fn decodes_a_complete_module() {
    let module = decode_module(ADD).unwrap();

    let ids = module
        .sections
        .iter()
        .map(Section::id)
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        [
            SectionId::Type,
            SectionId::Function,
            SectionId::Export,
            SectionId::Code
        ]
    );

    let types = module.types().unwrap();
    assert_eq!(
        types.types,
        [FunctionType {
            params: vec![ValueType::I32, ValueType::I32],
            results: vec![ValueType::I32],
        }]
    );

    let functions = module.functions().unwrap();
    assert_eq!(functions.type_indices, [0]);

    let exports = module.exports().unwrap();
    assert_eq!(
        exports.exports,
        [Export {
            name: "add".to_string(),
            desc: ExportDesc::Func(0),
        }]
    );

    let code = module.code().unwrap();
    assert_eq!(code.functions.len(), 1);
    assert!(code.functions[0].locals.is_empty());
    assert_eq!(
        code.functions[0].body,
        [
            Instruction::LocalGet { local: 0 },
            Instruction::LocalGet { local: 1 },
            Instruction::I32Add,
        ]
    );
}

#[test]
fn decodes_custom_sections() {
    let module = decode_module(
        &[
            0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
            0x00, 0x08, 0x04, 0x6E, 0x61, 0x6D, 0x65, 0x02, 0x01, 0x00, // custom "name"
        ][..],
    )
    .unwrap();

    let customs = module.custom_sections().collect::<Vec<_>>();
    assert_eq!(customs.len(), 1);
    assert_eq!(customs[0].name, "name");
    assert_eq!(customs[0].data, [0x02, 0x01, 0x00]);
}

#[test]
fn decodes_an_empty_module() {
    let module = decode_module(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00][..]).unwrap();
    assert_eq!(module, Module::default());
}

#[test]
fn rejects_a_bad_magic() {
    let err = decode_module(&b"\x7FELF\x01\x00\x00\x00"[..]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "magic mismatch: expected `00 61 73 6d`, found `7f 45 4c 46`"
    );
}

#[test]
fn rejects_an_unsupported_version() {
    let err = decode_module(&[0x00, 0x61, 0x73, 0x6D, 0x0D, 0x00, 0x00, 0x00][..]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported version: expected `01 00 00 00`, found `0d 00 00 00`"
    );
}

#[test]
fn rejects_an_unsupported_section() {
    // A well-formed header followed by a memory section.
    let err = decode_module(
        &[
            0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
            0x05, 0x03, 0x01, 0x00, 0x01, // memory section
        ][..],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::SectionNotSupported {
            id: SectionId::Memory,
            offset: 8
        }
    ));
}

#[test]
fn rejects_runaway_block_nesting() {
    fn uleb(mut value: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }

            bytes.push(byte);
            if value == 0 {
                return bytes;
            }
        }
    }

    // A function body that opens two million empty blocks and never closes
    // them. The decode must fail with a limit error rather than recursing
    // until the stack is exhausted.
    let mut body = vec![0x00]; // no locals
    for _ in 0..2_000_000 {
        body.extend([0x02, 0x40]);
    }

    let mut content = vec![0x01];
    content.extend(uleb(body.len() as u32));
    content.extend(&body);

    let mut module = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, 0x0A];
    module.extend(uleb(content.len() as u32));
    module.extend(&content);

    let err = decode_module(&module[..]).unwrap_err();
    assert!(matches!(
        err,
        Error::LimitExceeded {
            kind: "block nesting levels",
            ..
        }
    ));
}

#[test]
fn rejects_truncated_input() {
    let err = decode_module(&ADD[..ADD.len() - 2]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn rejects_a_section_with_an_inflated_length() {
    // The function section declares three content bytes but its vector only
    // occupies two.
    let err = decode_module(
        &[
            0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
            0x03, 0x03, 0x01, 0x00, 0x00, // function section with a spare byte
        ][..],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::TrailingSectionBytes {
            section: SectionId::Function,
            remaining: 1,
            ..
        }
    ));
}
