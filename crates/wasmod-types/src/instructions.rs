use crate::ValueType;
use std::fmt;

/// Represents the type of a structured control instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BlockType {
    /// The block has no result.
    Empty,
    /// The block results in a single value of the given type.
    Value(ValueType),
    /// The block's type is the function type at the given type index.
    FuncType(u32),
}

/// Represents the memory immediate of a load or store instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MemArg {
    /// The expected alignment, expressed as the exponent of a power of two.
    pub align: u32,
    /// The static offset added to the dynamic address operand.
    pub offset: u64,
}

/// Represents a decoded instruction.
///
/// One variant exists per supported opcode, carrying the instruction's
/// immediate operands. Structured control instructions own their nested
/// instruction sequences; the terminating `end` (and `else`) bytes are
/// consumed during decoding and never appear as instructions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Instruction {
    /// The `unreachable` instruction.
    Unreachable,
    /// The `nop` instruction.
    Nop,
    /// The `block` instruction and its body.
    Block {
        /// The type of the block.
        block_type: BlockType,
        /// The instructions of the block's body.
        body: Vec<Instruction>,
    },
    /// The `loop` instruction and its body.
    Loop {
        /// The type of the block.
        block_type: BlockType,
        /// The instructions of the loop's body.
        body: Vec<Instruction>,
    },
    /// The `if` instruction and its branches.
    If {
        /// The type of the block.
        block_type: BlockType,
        /// The instructions executed when the condition is non-zero.
        consequent: Vec<Instruction>,
        /// The instructions of the `else` branch, if present.
        alternative: Option<Vec<Instruction>>,
    },
    /// The `br` instruction.
    Br {
        /// The relative depth of the target label.
        label: u32,
    },
    /// The `br_if` instruction.
    BrIf {
        /// The relative depth of the target label.
        label: u32,
    },
    /// The `br_table` instruction.
    BrTable {
        /// The table of target labels.
        labels: Vec<u32>,
        /// The default target label.
        default: u32,
    },
    /// The `return` instruction.
    Return,
    /// The `call` instruction.
    Call {
        /// The index of the called function.
        function: u32,
    },
    /// The `call_indirect` instruction.
    CallIndirect {
        /// The index of the expected function type.
        ty: u32,
        /// The index of the table holding the callees.
        table: u32,
    },

    /// The `drop` instruction.
    Drop,
    /// The `select` instruction.
    Select,

    /// The `local.get` instruction.
    LocalGet {
        /// The index of the local variable.
        local: u32,
    },
    /// The `local.set` instruction.
    LocalSet {
        /// The index of the local variable.
        local: u32,
    },
    /// The `local.tee` instruction.
    LocalTee {
        /// The index of the local variable.
        local: u32,
    },
    /// The `global.get` instruction.
    GlobalGet {
        /// The index of the global variable.
        global: u32,
    },
    /// The `global.set` instruction.
    GlobalSet {
        /// The index of the global variable.
        global: u32,
    },

    /// The `i32.load` instruction.
    I32Load(MemArg),
    /// The `i64.load` instruction.
    I64Load(MemArg),
    /// The `f32.load` instruction.
    F32Load(MemArg),
    /// The `f64.load` instruction.
    F64Load(MemArg),
    /// The `i32.load8_s` instruction.
    I32Load8S(MemArg),
    /// The `i32.load8_u` instruction.
    I32Load8U(MemArg),
    /// The `i32.load16_s` instruction.
    I32Load16S(MemArg),
    /// The `i32.load16_u` instruction.
    I32Load16U(MemArg),
    /// The `i64.load8_s` instruction.
    I64Load8S(MemArg),
    /// The `i64.load8_u` instruction.
    I64Load8U(MemArg),
    /// The `i64.load16_s` instruction.
    I64Load16S(MemArg),
    /// The `i64.load16_u` instruction.
    I64Load16U(MemArg),
    /// The `i64.load32_s` instruction.
    I64Load32S(MemArg),
    /// The `i64.load32_u` instruction.
    I64Load32U(MemArg),
    /// The `i32.store` instruction.
    I32Store(MemArg),
    /// The `i64.store` instruction.
    I64Store(MemArg),
    /// The `f32.store` instruction.
    F32Store(MemArg),
    /// The `f64.store` instruction.
    F64Store(MemArg),
    /// The `i32.store8` instruction.
    I32Store8(MemArg),
    /// The `i32.store16` instruction.
    I32Store16(MemArg),
    /// The `i64.store8` instruction.
    I64Store8(MemArg),
    /// The `i64.store16` instruction.
    I64Store16(MemArg),
    /// The `i64.store32` instruction.
    I64Store32(MemArg),
    /// The `memory.size` instruction.
    MemorySize,
    /// The `memory.grow` instruction.
    MemoryGrow,

    /// The `i32.const` instruction.
    I32Const {
        /// The constant value.
        value: i32,
    },
    /// The `i64.const` instruction.
    I64Const {
        /// The constant value.
        value: i64,
    },
    /// The `f32.const` instruction.
    F32Const {
        /// The constant value.
        value: f32,
    },
    /// The `f64.const` instruction.
    F64Const {
        /// The constant value.
        value: f64,
    },

    /// The `i32.eqz` instruction.
    I32Eqz,
    /// The `i32.eq` instruction.
    I32Eq,
    /// The `i32.ne` instruction.
    I32Ne,
    /// The `i32.lt_s` instruction.
    I32LtS,
    /// The `i32.lt_u` instruction.
    I32LtU,
    /// The `i32.gt_s` instruction.
    I32GtS,
    /// The `i32.gt_u` instruction.
    I32GtU,
    /// The `i32.le_s` instruction.
    I32LeS,
    /// The `i32.le_u` instruction.
    I32LeU,
    /// The `i32.ge_s` instruction.
    I32GeS,
    /// The `i32.ge_u` instruction.
    I32GeU,
    /// The `i64.eqz` instruction.
    I64Eqz,
    /// The `i64.eq` instruction.
    I64Eq,
    /// The `i64.ne` instruction.
    I64Ne,
    /// The `i64.lt_s` instruction.
    I64LtS,
    /// The `i64.lt_u` instruction.
    I64LtU,
    /// The `i64.gt_s` instruction.
    I64GtS,
    /// The `i64.gt_u` instruction.
    I64GtU,
    /// The `i64.le_s` instruction.
    I64LeS,
    /// The `i64.le_u` instruction.
    I64LeU,
    /// The `i64.ge_s` instruction.
    I64GeS,
    /// The `i64.ge_u` instruction.
    I64GeU,
    /// The `f32.eq` instruction.
    F32Eq,
    /// The `f32.ne` instruction.
    F32Ne,
    /// The `f32.lt` instruction.
    F32Lt,
    /// The `f32.gt` instruction.
    F32Gt,
    /// The `f32.le` instruction.
    F32Le,
    /// The `f32.ge` instruction.
    F32Ge,
    /// The `f64.eq` instruction.
    F64Eq,
    /// The `f64.ne` instruction.
    F64Ne,
    /// The `f64.lt` instruction.
    F64Lt,
    /// The `f64.gt` instruction.
    F64Gt,
    /// The `f64.le` instruction.
    F64Le,
    /// The `f64.ge` instruction.
    F64Ge,

    /// The `i32.clz` instruction.
    I32Clz,
    /// The `i32.ctz` instruction.
    I32Ctz,
    /// The `i32.popcnt` instruction.
    I32Popcnt,
    /// The `i32.add` instruction.
    I32Add,
    /// The `i32.sub` instruction.
    I32Sub,
    /// The `i32.mul` instruction.
    I32Mul,
    /// The `i32.div_s` instruction.
    I32DivS,
    /// The `i32.div_u` instruction.
    I32DivU,
    /// The `i32.rem_s` instruction.
    I32RemS,
    /// The `i32.rem_u` instruction.
    I32RemU,
    /// The `i32.and` instruction.
    I32And,
    /// The `i32.or` instruction.
    I32Or,
    /// The `i32.xor` instruction.
    I32Xor,
    /// The `i32.shl` instruction.
    I32Shl,
    /// The `i32.shr_s` instruction.
    I32ShrS,
    /// The `i32.shr_u` instruction.
    I32ShrU,
    /// The `i32.rotl` instruction.
    I32Rotl,
    /// The `i32.rotr` instruction.
    I32Rotr,
    /// The `i64.clz` instruction.
    I64Clz,
    /// The `i64.ctz` instruction.
    I64Ctz,
    /// The `i64.popcnt` instruction.
    I64Popcnt,
    /// The `i64.add` instruction.
    I64Add,
    /// The `i64.sub` instruction.
    I64Sub,
    /// The `i64.mul` instruction.
    I64Mul,
    /// The `i64.div_s` instruction.
    I64DivS,
    /// The `i64.div_u` instruction.
    I64DivU,
    /// The `i64.rem_s` instruction.
    I64RemS,
    /// The `i64.rem_u` instruction.
    I64RemU,
    /// The `i64.and` instruction.
    I64And,
    /// The `i64.or` instruction.
    I64Or,
    /// The `i64.xor` instruction.
    I64Xor,
    /// The `i64.shl` instruction.
    I64Shl,
    /// The `i64.shr_s` instruction.
    I64ShrS,
    /// The `i64.shr_u` instruction.
    I64ShrU,
    /// The `i64.rotl` instruction.
    I64Rotl,
    /// The `i64.rotr` instruction.
    I64Rotr,
    /// The `f32.abs` instruction.
    F32Abs,
    /// The `f32.neg` instruction.
    F32Neg,
    /// The `f32.ceil` instruction.
    F32Ceil,
    /// The `f32.floor` instruction.
    F32Floor,
    /// The `f32.trunc` instruction.
    F32Trunc,
    /// The `f32.nearest` instruction.
    F32Nearest,
    /// The `f32.sqrt` instruction.
    F32Sqrt,
    /// The `f32.add` instruction.
    F32Add,
    /// The `f32.sub` instruction.
    F32Sub,
    /// The `f32.mul` instruction.
    F32Mul,
    /// The `f32.div` instruction.
    F32Div,
    /// The `f32.min` instruction.
    F32Min,
    /// The `f32.max` instruction.
    F32Max,
    /// The `f32.copysign` instruction.
    F32Copysign,
    /// The `f64.abs` instruction.
    F64Abs,
    /// The `f64.neg` instruction.
    F64Neg,
    /// The `f64.ceil` instruction.
    F64Ceil,
    /// The `f64.floor` instruction.
    F64Floor,
    /// The `f64.trunc` instruction.
    F64Trunc,
    /// The `f64.nearest` instruction.
    F64Nearest,
    /// The `f64.sqrt` instruction.
    F64Sqrt,
    /// The `f64.add` instruction.
    F64Add,
    /// The `f64.sub` instruction.
    F64Sub,
    /// The `f64.mul` instruction.
    F64Mul,
    /// The `f64.div` instruction.
    F64Div,
    /// The `f64.min` instruction.
    F64Min,
    /// The `f64.max` instruction.
    F64Max,
    /// The `f64.copysign` instruction.
    F64Copysign,

    /// The `i32.wrap_i64` instruction.
    I32WrapI64,
    /// The `i32.trunc_f32_s` instruction.
    I32TruncF32S,
    /// The `i32.trunc_f32_u` instruction.
    I32TruncF32U,
    /// The `i32.trunc_f64_s` instruction.
    I32TruncF64S,
    /// The `i32.trunc_f64_u` instruction.
    I32TruncF64U,
    /// The `i64.extend_i32_s` instruction.
    I64ExtendI32S,
    /// The `i64.extend_i32_u` instruction.
    I64ExtendI32U,
    /// The `i64.trunc_f32_s` instruction.
    I64TruncF32S,
    /// The `i64.trunc_f32_u` instruction.
    I64TruncF32U,
    /// The `i64.trunc_f64_s` instruction.
    I64TruncF64S,
    /// The `i64.trunc_f64_u` instruction.
    I64TruncF64U,
    /// The `f32.convert_i32_s` instruction.
    F32ConvertI32S,
    /// The `f32.convert_i32_u` instruction.
    F32ConvertI32U,
    /// The `f32.convert_i64_s` instruction.
    F32ConvertI64S,
    /// The `f32.convert_i64_u` instruction.
    F32ConvertI64U,
    /// The `f32.demote_f64` instruction.
    F32DemoteF64,
    /// The `f64.convert_i32_s` instruction.
    F64ConvertI32S,
    /// The `f64.convert_i32_u` instruction.
    F64ConvertI32U,
    /// The `f64.convert_i64_s` instruction.
    F64ConvertI64S,
    /// The `f64.convert_i64_u` instruction.
    F64ConvertI64U,
    /// The `f64.promote_f32` instruction.
    F64PromoteF32,
    /// The `i32.reinterpret_f32` instruction.
    I32ReinterpretF32,
    /// The `i64.reinterpret_f64` instruction.
    I64ReinterpretF64,
    /// The `f32.reinterpret_i32` instruction.
    F32ReinterpretI32,
    /// The `f64.reinterpret_i64` instruction.
    F64ReinterpretI64,

    /// The `i32.extend8_s` instruction.
    I32Extend8S,
    /// The `i32.extend16_s` instruction.
    I32Extend16S,
    /// The `i64.extend8_s` instruction.
    I64Extend8S,
    /// The `i64.extend16_s` instruction.
    I64Extend16S,
    /// The `i64.extend32_s` instruction.
    I64Extend32S,
}

impl Instruction {
    /// Gets the mnemonic of the instruction, without its immediates.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Unreachable => "unreachable",
            Self::Nop => "nop",
            Self::Block { .. } => "block",
            Self::Loop { .. } => "loop",
            Self::If { .. } => "if",
            Self::Br { .. } => "br",
            Self::BrIf { .. } => "br_if",
            Self::BrTable { .. } => "br_table",
            Self::Return => "return",
            Self::Call { .. } => "call",
            Self::CallIndirect { .. } => "call_indirect",
            Self::Drop => "drop",
            Self::Select => "select",
            Self::LocalGet { .. } => "local.get",
            Self::LocalSet { .. } => "local.set",
            Self::LocalTee { .. } => "local.tee",
            Self::GlobalGet { .. } => "global.get",
            Self::GlobalSet { .. } => "global.set",
            Self::I32Load(_) => "i32.load",
            Self::I64Load(_) => "i64.load",
            Self::F32Load(_) => "f32.load",
            Self::F64Load(_) => "f64.load",
            Self::I32Load8S(_) => "i32.load8_s",
            Self::I32Load8U(_) => "i32.load8_u",
            Self::I32Load16S(_) => "i32.load16_s",
            Self::I32Load16U(_) => "i32.load16_u",
            Self::I64Load8S(_) => "i64.load8_s",
            Self::I64Load8U(_) => "i64.load8_u",
            Self::I64Load16S(_) => "i64.load16_s",
            Self::I64Load16U(_) => "i64.load16_u",
            Self::I64Load32S(_) => "i64.load32_s",
            Self::I64Load32U(_) => "i64.load32_u",
            Self::I32Store(_) => "i32.store",
            Self::I64Store(_) => "i64.store",
            Self::F32Store(_) => "f32.store",
            Self::F64Store(_) => "f64.store",
            Self::I32Store8(_) => "i32.store8",
            Self::I32Store16(_) => "i32.store16",
            Self::I64Store8(_) => "i64.store8",
            Self::I64Store16(_) => "i64.store16",
            Self::I64Store32(_) => "i64.store32",
            Self::MemorySize => "memory.size",
            Self::MemoryGrow => "memory.grow",
            Self::I32Const { .. } => "i32.const",
            Self::I64Const { .. } => "i64.const",
            Self::F32Const { .. } => "f32.const",
            Self::F64Const { .. } => "f64.const",
            Self::I32Eqz => "i32.eqz",
            Self::I32Eq => "i32.eq",
            Self::I32Ne => "i32.ne",
            Self::I32LtS => "i32.lt_s",
            Self::I32LtU => "i32.lt_u",
            Self::I32GtS => "i32.gt_s",
            Self::I32GtU => "i32.gt_u",
            Self::I32LeS => "i32.le_s",
            Self::I32LeU => "i32.le_u",
            Self::I32GeS => "i32.ge_s",
            Self::I32GeU => "i32.ge_u",
            Self::I64Eqz => "i64.eqz",
            Self::I64Eq => "i64.eq",
            Self::I64Ne => "i64.ne",
            Self::I64LtS => "i64.lt_s",
            Self::I64LtU => "i64.lt_u",
            Self::I64GtS => "i64.gt_s",
            Self::I64GtU => "i64.gt_u",
            Self::I64LeS => "i64.le_s",
            Self::I64LeU => "i64.le_u",
            Self::I64GeS => "i64.ge_s",
            Self::I64GeU => "i64.ge_u",
            Self::F32Eq => "f32.eq",
            Self::F32Ne => "f32.ne",
            Self::F32Lt => "f32.lt",
            Self::F32Gt => "f32.gt",
            Self::F32Le => "f32.le",
            Self::F32Ge => "f32.ge",
            Self::F64Eq => "f64.eq",
            Self::F64Ne => "f64.ne",
            Self::F64Lt => "f64.lt",
            Self::F64Gt => "f64.gt",
            Self::F64Le => "f64.le",
            Self::F64Ge => "f64.ge",
            Self::I32Clz => "i32.clz",
            Self::I32Ctz => "i32.ctz",
            Self::I32Popcnt => "i32.popcnt",
            Self::I32Add => "i32.add",
            Self::I32Sub => "i32.sub",
            Self::I32Mul => "i32.mul",
            Self::I32DivS => "i32.div_s",
            Self::I32DivU => "i32.div_u",
            Self::I32RemS => "i32.rem_s",
            Self::I32RemU => "i32.rem_u",
            Self::I32And => "i32.and",
            Self::I32Or => "i32.or",
            Self::I32Xor => "i32.xor",
            Self::I32Shl => "i32.shl",
            Self::I32ShrS => "i32.shr_s",
            Self::I32ShrU => "i32.shr_u",
            Self::I32Rotl => "i32.rotl",
            Self::I32Rotr => "i32.rotr",
            Self::I64Clz => "i64.clz",
            Self::I64Ctz => "i64.ctz",
            Self::I64Popcnt => "i64.popcnt",
            Self::I64Add => "i64.add",
            Self::I64Sub => "i64.sub",
            Self::I64Mul => "i64.mul",
            Self::I64DivS => "i64.div_s",
            Self::I64DivU => "i64.div_u",
            Self::I64RemS => "i64.rem_s",
            Self::I64RemU => "i64.rem_u",
            Self::I64And => "i64.and",
            Self::I64Or => "i64.or",
            Self::I64Xor => "i64.xor",
            Self::I64Shl => "i64.shl",
            Self::I64ShrS => "i64.shr_s",
            Self::I64ShrU => "i64.shr_u",
            Self::I64Rotl => "i64.rotl",
            Self::I64Rotr => "i64.rotr",
            Self::F32Abs => "f32.abs",
            Self::F32Neg => "f32.neg",
            Self::F32Ceil => "f32.ceil",
            Self::F32Floor => "f32.floor",
            Self::F32Trunc => "f32.trunc",
            Self::F32Nearest => "f32.nearest",
            Self::F32Sqrt => "f32.sqrt",
            Self::F32Add => "f32.add",
            Self::F32Sub => "f32.sub",
            Self::F32Mul => "f32.mul",
            Self::F32Div => "f32.div",
            Self::F32Min => "f32.min",
            Self::F32Max => "f32.max",
            Self::F32Copysign => "f32.copysign",
            Self::F64Abs => "f64.abs",
            Self::F64Neg => "f64.neg",
            Self::F64Ceil => "f64.ceil",
            Self::F64Floor => "f64.floor",
            Self::F64Trunc => "f64.trunc",
            Self::F64Nearest => "f64.nearest",
            Self::F64Sqrt => "f64.sqrt",
            Self::F64Add => "f64.add",
            Self::F64Sub => "f64.sub",
            Self::F64Mul => "f64.mul",
            Self::F64Div => "f64.div",
            Self::F64Min => "f64.min",
            Self::F64Max => "f64.max",
            Self::F64Copysign => "f64.copysign",
            Self::I32WrapI64 => "i32.wrap_i64",
            Self::I32TruncF32S => "i32.trunc_f32_s",
            Self::I32TruncF32U => "i32.trunc_f32_u",
            Self::I32TruncF64S => "i32.trunc_f64_s",
            Self::I32TruncF64U => "i32.trunc_f64_u",
            Self::I64ExtendI32S => "i64.extend_i32_s",
            Self::I64ExtendI32U => "i64.extend_i32_u",
            Self::I64TruncF32S => "i64.trunc_f32_s",
            Self::I64TruncF32U => "i64.trunc_f32_u",
            Self::I64TruncF64S => "i64.trunc_f64_s",
            Self::I64TruncF64U => "i64.trunc_f64_u",
            Self::F32ConvertI32S => "f32.convert_i32_s",
            Self::F32ConvertI32U => "f32.convert_i32_u",
            Self::F32ConvertI64S => "f32.convert_i64_s",
            Self::F32ConvertI64U => "f32.convert_i64_u",
            Self::F32DemoteF64 => "f32.demote_f64",
            Self::F64ConvertI32S => "f64.convert_i32_s",
            Self::F64ConvertI32U => "f64.convert_i32_u",
            Self::F64ConvertI64S => "f64.convert_i64_s",
            Self::F64ConvertI64U => "f64.convert_i64_u",
            Self::F64PromoteF32 => "f64.promote_f32",
            Self::I32ReinterpretF32 => "i32.reinterpret_f32",
            Self::I64ReinterpretF64 => "i64.reinterpret_f64",
            Self::F32ReinterpretI32 => "f32.reinterpret_i32",
            Self::F64ReinterpretI64 => "f64.reinterpret_i64",
            Self::I32Extend8S => "i32.extend8_s",
            Self::I32Extend16S => "i32.extend16_s",
            Self::I64Extend8S => "i64.extend8_s",
            Self::I64Extend16S => "i64.extend16_s",
            Self::I64Extend32S => "i64.extend32_s",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mnemonics() {
        assert_eq!(Instruction::I32Add.to_string(), "i32.add");
        assert_eq!(
            Instruction::LocalGet { local: 0 }.to_string(),
            "local.get"
        );
        assert_eq!(
            Instruction::I32Load(MemArg {
                align: 2,
                offset: 0
            })
            .to_string(),
            "i32.load"
        );
        assert_eq!(
            Instruction::If {
                block_type: BlockType::Empty,
                consequent: Vec::new(),
                alternative: None,
            }
            .to_string(),
            "if"
        );
    }
}
