//! Module for decoding instructions and expressions.

use crate::{leb128, limits, source::ByteSource, DecodeResult, Error};
use wasmod_types::{BlockType, Instruction, MemArg, ValueType};

/// The byte terminating an expression.
const END: u8 = 0x0B;
/// The byte separating the branches of an `if` instruction.
const ELSE: u8 = 0x05;
/// The byte encoding an empty block type.
const EMPTY_BLOCK_TYPE: u8 = 0x40;

/// How an instruction sequence was terminated.
#[derive(PartialEq, Eq)]
enum Terminator {
    End,
    Else,
}

/// Decodes an expression: a sequence of instructions terminated by the
/// `end` byte, which is consumed and discarded.
pub(crate) fn decode_expression<S: ByteSource>(source: &mut S) -> DecodeResult<Vec<Instruction>> {
    let (body, _) = decode_sequence(source, false, 0)?;
    Ok(body)
}

fn decode_sequence<S: ByteSource>(
    source: &mut S,
    in_if: bool,
    depth: u64,
) -> DecodeResult<(Vec<Instruction>, Terminator)> {
    let mut instructions = Vec::new();

    loop {
        let offset = source.offset();
        let opcode = source.read_byte("opcode")?;
        match opcode {
            END => return Ok((instructions, Terminator::End)),
            ELSE if in_if => return Ok((instructions, Terminator::Else)),
            ELSE => return Err(Error::MisplacedElse { offset }),
            _ => instructions.push(decode_instruction(source, opcode, offset, depth)?),
        }
    }
}

/// Descends into the nested body of a structured control instruction.
///
/// `depth` is the nesting depth of the enclosing sequence; descending past
/// [`limits::MAX_NESTING_DEPTH`] fails rather than recursing unboundedly.
fn enter_block<S: ByteSource>(
    source: &mut S,
    in_if: bool,
    depth: u64,
    offset: u64,
) -> DecodeResult<(Vec<Instruction>, Terminator)> {
    if depth == limits::MAX_NESTING_DEPTH {
        return Err(Error::LimitExceeded {
            kind: "block nesting levels",
            limit: limits::MAX_NESTING_DEPTH,
            offset,
        });
    }

    decode_sequence(source, in_if, depth + 1)
}

fn decode_block_type<S: ByteSource>(source: &mut S) -> DecodeResult<BlockType> {
    let offset = source.offset();
    let byte = source.read_byte("block type")?;
    if byte == EMPTY_BLOCK_TYPE {
        return Ok(BlockType::Empty);
    }

    if let Some(ty) = ValueType::from_code(byte) {
        return Ok(BlockType::Value(ty));
    }

    // Anything else must be a non-negative signed 33-bit type index whose
    // first byte has just been consumed.
    let index = leb128::read_s33_tail(source, "block type", byte)?;
    if index < 0 {
        return Err(Error::InvalidValueType { byte, offset });
    }

    Ok(BlockType::FuncType(index as u32))
}

fn decode_mem_arg<S: ByteSource>(source: &mut S) -> DecodeResult<MemArg> {
    let align = leb128::read_u32(source, "memory alignment")?;
    let offset = leb128::read_u64(source, "memory offset")?;
    Ok(MemArg { align, offset })
}

/// Decodes the instruction introduced by `opcode`, consuming its immediate
/// operands. `offset` is the position of the opcode byte; `depth` is the
/// nesting depth of the enclosing sequence.
fn decode_instruction<S: ByteSource>(
    source: &mut S,
    opcode: u8,
    offset: u64,
    depth: u64,
) -> DecodeResult<Instruction> {
    Ok(match opcode {
        0x00 => Instruction::Unreachable,
        0x01 => Instruction::Nop,
        0x02 => {
            let block_type = decode_block_type(source)?;
            let (body, _) = enter_block(source, false, depth, offset)?;
            Instruction::Block { block_type, body }
        }
        0x03 => {
            let block_type = decode_block_type(source)?;
            let (body, _) = enter_block(source, false, depth, offset)?;
            Instruction::Loop { block_type, body }
        }
        0x04 => {
            let block_type = decode_block_type(source)?;
            let (consequent, terminator) = enter_block(source, true, depth, offset)?;
            let alternative = match terminator {
                Terminator::Else => Some(enter_block(source, false, depth, offset)?.0),
                Terminator::End => None,
            };
            Instruction::If {
                block_type,
                consequent,
                alternative,
            }
        }
        0x0C => Instruction::Br {
            label: leb128::read_u32(source, "label index")?,
        },
        0x0D => Instruction::BrIf {
            label: leb128::read_u32(source, "label index")?,
        },
        0x0E => {
            let count_offset = source.offset();
            let count = leb128::read_u32(source, "branch table labels")?;
            if u64::from(count) > limits::MAX_BR_TABLE_LABELS {
                return Err(Error::LimitExceeded {
                    kind: "branch table labels",
                    limit: limits::MAX_BR_TABLE_LABELS,
                    offset: count_offset,
                });
            }

            let mut labels = Vec::with_capacity(count as usize);
            for _ in 0..count {
                labels.push(leb128::read_u32(source, "label index")?);
            }

            Instruction::BrTable {
                labels,
                default: leb128::read_u32(source, "label index")?,
            }
        }
        0x0F => Instruction::Return,
        0x10 => Instruction::Call {
            function: leb128::read_u32(source, "function index")?,
        },
        0x11 => Instruction::CallIndirect {
            ty: leb128::read_u32(source, "type index")?,
            table: leb128::read_u32(source, "table index")?,
        },

        0x1A => Instruction::Drop,
        0x1B => Instruction::Select,

        0x20 => Instruction::LocalGet {
            local: leb128::read_u32(source, "local index")?,
        },
        0x21 => Instruction::LocalSet {
            local: leb128::read_u32(source, "local index")?,
        },
        0x22 => Instruction::LocalTee {
            local: leb128::read_u32(source, "local index")?,
        },
        0x23 => Instruction::GlobalGet {
            global: leb128::read_u32(source, "global index")?,
        },
        0x24 => Instruction::GlobalSet {
            global: leb128::read_u32(source, "global index")?,
        },

        0x28 => Instruction::I32Load(decode_mem_arg(source)?),
        0x29 => Instruction::I64Load(decode_mem_arg(source)?),
        0x2A => Instruction::F32Load(decode_mem_arg(source)?),
        0x2B => Instruction::F64Load(decode_mem_arg(source)?),
        0x2C => Instruction::I32Load8S(decode_mem_arg(source)?),
        0x2D => Instruction::I32Load8U(decode_mem_arg(source)?),
        0x2E => Instruction::I32Load16S(decode_mem_arg(source)?),
        0x2F => Instruction::I32Load16U(decode_mem_arg(source)?),
        0x30 => Instruction::I64Load8S(decode_mem_arg(source)?),
        0x31 => Instruction::I64Load8U(decode_mem_arg(source)?),
        0x32 => Instruction::I64Load16S(decode_mem_arg(source)?),
        0x33 => Instruction::I64Load16U(decode_mem_arg(source)?),
        0x34 => Instruction::I64Load32S(decode_mem_arg(source)?),
        0x35 => Instruction::I64Load32U(decode_mem_arg(source)?),
        0x36 => Instruction::I32Store(decode_mem_arg(source)?),
        0x37 => Instruction::I64Store(decode_mem_arg(source)?),
        0x38 => Instruction::F32Store(decode_mem_arg(source)?),
        0x39 => Instruction::F64Store(decode_mem_arg(source)?),
        0x3A => Instruction::I32Store8(decode_mem_arg(source)?),
        0x3B => Instruction::I32Store16(decode_mem_arg(source)?),
        0x3C => Instruction::I64Store8(decode_mem_arg(source)?),
        0x3D => Instruction::I64Store16(decode_mem_arg(source)?),
        0x3E => Instruction::I64Store32(decode_mem_arg(source)?),
        0x3F => {
            // Reserved memory index; single-memory modules encode zero.
            leb128::read_u8(source, "memory index")?;
            Instruction::MemorySize
        }
        0x40 => {
            leb128::read_u8(source, "memory index")?;
            Instruction::MemoryGrow
        }

        0x41 => Instruction::I32Const {
            value: leb128::read_i32(source, "i32 constant")?,
        },
        0x42 => Instruction::I64Const {
            value: leb128::read_i64(source, "i64 constant")?,
        },
        0x43 => {
            let mut bytes = [0; 4];
            source.read_exact(&mut bytes, "f32 constant")?;
            Instruction::F32Const {
                value: f32::from_le_bytes(bytes),
            }
        }
        0x44 => {
            let mut bytes = [0; 8];
            source.read_exact(&mut bytes, "f64 constant")?;
            Instruction::F64Const {
                value: f64::from_le_bytes(bytes),
            }
        }

        0x45 => Instruction::I32Eqz,
        0x46 => Instruction::I32Eq,
        0x47 => Instruction::I32Ne,
        0x48 => Instruction::I32LtS,
        0x49 => Instruction::I32LtU,
        0x4A => Instruction::I32GtS,
        0x4B => Instruction::I32GtU,
        0x4C => Instruction::I32LeS,
        0x4D => Instruction::I32LeU,
        0x4E => Instruction::I32GeS,
        0x4F => Instruction::I32GeU,
        0x50 => Instruction::I64Eqz,
        0x51 => Instruction::I64Eq,
        0x52 => Instruction::I64Ne,
        0x53 => Instruction::I64LtS,
        0x54 => Instruction::I64LtU,
        0x55 => Instruction::I64GtS,
        0x56 => Instruction::I64GtU,
        0x57 => Instruction::I64LeS,
        0x58 => Instruction::I64LeU,
        0x59 => Instruction::I64GeS,
        0x5A => Instruction::I64GeU,
        0x5B => Instruction::F32Eq,
        0x5C => Instruction::F32Ne,
        0x5D => Instruction::F32Lt,
        0x5E => Instruction::F32Gt,
        0x5F => Instruction::F32Le,
        0x60 => Instruction::F32Ge,
        0x61 => Instruction::F64Eq,
        0x62 => Instruction::F64Ne,
        0x63 => Instruction::F64Lt,
        0x64 => Instruction::F64Gt,
        0x65 => Instruction::F64Le,
        0x66 => Instruction::F64Ge,
        0x67 => Instruction::I32Clz,
        0x68 => Instruction::I32Ctz,
        0x69 => Instruction::I32Popcnt,
        0x6A => Instruction::I32Add,
        0x6B => Instruction::I32Sub,
        0x6C => Instruction::I32Mul,
        0x6D => Instruction::I32DivS,
        0x6E => Instruction::I32DivU,
        0x6F => Instruction::I32RemS,
        0x70 => Instruction::I32RemU,
        0x71 => Instruction::I32And,
        0x72 => Instruction::I32Or,
        0x73 => Instruction::I32Xor,
        0x74 => Instruction::I32Shl,
        0x75 => Instruction::I32ShrS,
        0x76 => Instruction::I32ShrU,
        0x77 => Instruction::I32Rotl,
        0x78 => Instruction::I32Rotr,
        0x79 => Instruction::I64Clz,
        0x7A => Instruction::I64Ctz,
        0x7B => Instruction::I64Popcnt,
        0x7C => Instruction::I64Add,
        0x7D => Instruction::I64Sub,
        0x7E => Instruction::I64Mul,
        0x7F => Instruction::I64DivS,
        0x80 => Instruction::I64DivU,
        0x81 => Instruction::I64RemS,
        0x82 => Instruction::I64RemU,
        0x83 => Instruction::I64And,
        0x84 => Instruction::I64Or,
        0x85 => Instruction::I64Xor,
        0x86 => Instruction::I64Shl,
        0x87 => Instruction::I64ShrS,
        0x88 => Instruction::I64ShrU,
        0x89 => Instruction::I64Rotl,
        0x8A => Instruction::I64Rotr,
        0x8B => Instruction::F32Abs,
        0x8C => Instruction::F32Neg,
        0x8D => Instruction::F32Ceil,
        0x8E => Instruction::F32Floor,
        0x8F => Instruction::F32Trunc,
        0x90 => Instruction::F32Nearest,
        0x91 => Instruction::F32Sqrt,
        0x92 => Instruction::F32Add,
        0x93 => Instruction::F32Sub,
        0x94 => Instruction::F32Mul,
        0x95 => Instruction::F32Div,
        0x96 => Instruction::F32Min,
        0x97 => Instruction::F32Max,
        0x98 => Instruction::F32Copysign,
        0x99 => Instruction::F64Abs,
        0x9A => Instruction::F64Neg,
        0x9B => Instruction::F64Ceil,
        0x9C => Instruction::F64Floor,
        0x9D => Instruction::F64Trunc,
        0x9E => Instruction::F64Nearest,
        0x9F => Instruction::F64Sqrt,
        0xA0 => Instruction::F64Add,
        0xA1 => Instruction::F64Sub,
        0xA2 => Instruction::F64Mul,
        0xA3 => Instruction::F64Div,
        0xA4 => Instruction::F64Min,
        0xA5 => Instruction::F64Max,
        0xA6 => Instruction::F64Copysign,
        0xA7 => Instruction::I32WrapI64,
        0xA8 => Instruction::I32TruncF32S,
        0xA9 => Instruction::I32TruncF32U,
        0xAA => Instruction::I32TruncF64S,
        0xAB => Instruction::I32TruncF64U,
        0xAC => Instruction::I64ExtendI32S,
        0xAD => Instruction::I64ExtendI32U,
        0xAE => Instruction::I64TruncF32S,
        0xAF => Instruction::I64TruncF32U,
        0xB0 => Instruction::I64TruncF64S,
        0xB1 => Instruction::I64TruncF64U,
        0xB2 => Instruction::F32ConvertI32S,
        0xB3 => Instruction::F32ConvertI32U,
        0xB4 => Instruction::F32ConvertI64S,
        0xB5 => Instruction::F32ConvertI64U,
        0xB6 => Instruction::F32DemoteF64,
        0xB7 => Instruction::F64ConvertI32S,
        0xB8 => Instruction::F64ConvertI32U,
        0xB9 => Instruction::F64ConvertI64S,
        0xBA => Instruction::F64ConvertI64U,
        0xBB => Instruction::F64PromoteF32,
        0xBC => Instruction::I32ReinterpretF32,
        0xBD => Instruction::I64ReinterpretF64,
        0xBE => Instruction::F32ReinterpretI32,
        0xBF => Instruction::F64ReinterpretI64,
        0xC0 => Instruction::I32Extend8S,
        0xC1 => Instruction::I32Extend16S,
        0xC2 => Instruction::I64Extend8S,
        0xC3 => Instruction::I64Extend16S,
        0xC4 => Instruction::I64Extend32S,

        opcode => return Err(Error::UnknownOpcode { opcode, offset }),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::Source;
    use pretty_assertions::assert_eq;

    fn expression(bytes: &[u8]) -> DecodeResult<Vec<Instruction>> {
        let mut source = Source::new(bytes);
        decode_expression(&mut source)
    }

    #[test]
    fn empty_expression() {
        assert_eq!(expression(&[0x0B]).unwrap(), Vec::new());
    }

    #[test]
    fn add_body() {
        let body = expression(&[0x20, 0x00, 0x20, 0x01, 0x6A, 0x0B]).unwrap();
        assert_eq!(
            body,
            [
                Instruction::LocalGet { local: 0 },
                Instruction::LocalGet { local: 1 },
                Instruction::I32Add,
            ]
        );
    }

    #[test]
    fn constants() {
        let body = expression(&[0x41, 0x7F, 0x42, 0x80, 0x01, 0x0B]).unwrap();
        assert_eq!(
            body,
            [
                Instruction::I32Const { value: -1 },
                Instruction::I64Const { value: 128 },
            ]
        );

        let body = expression(&[0x43, 0x00, 0x00, 0x80, 0x3F, 0x0B]).unwrap();
        assert_eq!(body, [Instruction::F32Const { value: 1.0 }]);
    }

    #[test]
    fn nested_blocks() {
        // block (result i32) ... i32.const 1 ... end
        let body = expression(&[0x02, 0x7F, 0x41, 0x01, 0x0B, 0x0B]).unwrap();
        assert_eq!(
            body,
            [Instruction::Block {
                block_type: BlockType::Value(ValueType::I32),
                body: vec![Instruction::I32Const { value: 1 }],
            }]
        );
    }

    #[test]
    fn if_with_else() {
        let body = expression(&[0x04, 0x40, 0x01, 0x05, 0x00, 0x0B, 0x0B]).unwrap();
        assert_eq!(
            body,
            [Instruction::If {
                block_type: BlockType::Empty,
                consequent: vec![Instruction::Nop],
                alternative: Some(vec![Instruction::Unreachable]),
            }]
        );
    }

    #[test]
    fn if_without_else() {
        let body = expression(&[0x04, 0x40, 0x01, 0x0B, 0x0B]).unwrap();
        assert_eq!(
            body,
            [Instruction::If {
                block_type: BlockType::Empty,
                consequent: vec![Instruction::Nop],
                alternative: None,
            }]
        );
    }

    #[test]
    fn block_type_can_be_a_type_index() {
        let body = expression(&[0x02, 0x02, 0x0B, 0x0B]).unwrap();
        assert_eq!(
            body,
            [Instruction::Block {
                block_type: BlockType::FuncType(2),
                body: Vec::new(),
            }]
        );
    }

    #[test]
    fn memory_instructions() {
        // i32.load align=2 offset=16
        let body = expression(&[0x28, 0x02, 0x10, 0x0B]).unwrap();
        assert_eq!(
            body,
            [Instruction::I32Load(MemArg {
                align: 2,
                offset: 16
            })]
        );
    }

    #[test]
    fn nesting_up_to_the_limit_succeeds() {
        let mut bytes = Vec::new();
        for _ in 0..limits::MAX_NESTING_DEPTH {
            bytes.extend([0x02, 0x40]);
        }
        for _ in 0..=limits::MAX_NESTING_DEPTH {
            bytes.push(0x0B);
        }

        assert!(expression(&bytes).is_ok());
    }

    #[test]
    fn nesting_depth_is_bounded() {
        // One block more than the limit permits, never closed.
        let mut bytes = Vec::new();
        for _ in 0..=limits::MAX_NESTING_DEPTH {
            bytes.extend([0x02, 0x40]);
        }

        let err = expression(&bytes).unwrap_err();
        assert!(matches!(
            err,
            Error::LimitExceeded {
                kind: "block nesting levels",
                ..
            }
        ));
    }

    #[test]
    fn unknown_opcode_fails() {
        let err = expression(&[0xFE, 0x0B]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownOpcode {
                opcode: 0xFE,
                offset: 0
            }
        ));
    }

    #[test]
    fn misplaced_else_fails() {
        let err = expression(&[0x01, 0x05, 0x0B]).unwrap_err();
        assert!(matches!(err, Error::MisplacedElse { offset: 1 }));
    }

    #[test]
    fn truncated_expression_fails() {
        let err = expression(&[0x20, 0x00]).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof { .. }));
    }
}
