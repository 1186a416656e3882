use std::fmt;

/// Represents a core WebAssembly value type.
///
/// The variant is the identity of the type; the wire code and the display
/// name are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ValueType {
    /// The value type is i32.
    I32,
    /// The value type is i64.
    I64,
    /// The value type is f32.
    F32,
    /// The value type is f64.
    F64,
    /// The value type is v128.
    V128,
    /// The value type is a reference to a function.
    FuncRef,
    /// The value type is a reference to an external object.
    ExternRef,
}

impl ValueType {
    /// Gets the one-byte code encoding this value type in the binary format.
    pub const fn code(&self) -> u8 {
        match self {
            Self::I32 => 0x7F,
            Self::I64 => 0x7E,
            Self::F32 => 0x7D,
            Self::F64 => 0x7C,
            Self::V128 => 0x7B,
            Self::FuncRef => 0x70,
            Self::ExternRef => 0x6F,
        }
    }

    /// Gets the value type encoded by the given byte.
    ///
    /// Returns `None` if the byte does not encode a value type.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x7F => Some(Self::I32),
            0x7E => Some(Self::I64),
            0x7D => Some(Self::F32),
            0x7C => Some(Self::F64),
            0x7B => Some(Self::V128),
            0x70 => Some(Self::FuncRef),
            0x6F => Some(Self::ExternRef),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::V128 => write!(f, "v128"),
            Self::FuncRef => write!(f, "funcref"),
            Self::ExternRef => write!(f, "externref"),
        }
    }
}

/// Represents a core function type (signature).
///
/// Two function types are equal if and only if their parameter and result
/// sequences are element-wise equal. A function type is identified by its
/// position in the type section; the index is never stored in the type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FunctionType {
    /// The parameters of the function, in call order.
    pub params: Vec<ValueType>,
    /// The results of the function, in return order.
    pub results: Vec<ValueType>,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, ty) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{ty}")?;
        }

        write!(f, "] -> [")?;

        for (i, ty) in self.results.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{ty}")?;
        }

        write!(f, "]")
    }
}

/// Represents the module entity an export name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ExportDesc {
    /// The export is a function.
    Func(u32),
    /// The export is a table.
    Table(u32),
    /// The export is a memory.
    Memory(u32),
    /// The export is a global.
    Global(u32),
}

impl ExportDesc {
    /// Gets the index of the referenced entity within its index space.
    pub const fn index(&self) -> u32 {
        match self {
            Self::Func(i) | Self::Table(i) | Self::Memory(i) | Self::Global(i) => *i,
        }
    }
}

impl fmt::Display for ExportDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Func(_) => write!(f, "function"),
            Self::Table(_) => write!(f, "table"),
            Self::Memory(_) => write!(f, "memory"),
            Self::Global(_) => write!(f, "global"),
        }
    }
}

/// Represents an export of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Export {
    /// The name of the export.
    pub name: String,
    /// The description of the exported entity.
    pub desc: ExportDesc,
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_type_codes_round_trip() {
        for ty in [
            ValueType::I32,
            ValueType::I64,
            ValueType::F32,
            ValueType::F64,
            ValueType::V128,
            ValueType::FuncRef,
            ValueType::ExternRef,
        ] {
            assert_eq!(ValueType::from_code(ty.code()), Some(ty));
        }

        assert_eq!(ValueType::from_code(0x60), None);
        assert_eq!(ValueType::from_code(0x00), None);
    }

    #[test]
    fn function_type_display() {
        let ty = FunctionType {
            params: vec![ValueType::I32, ValueType::I64],
            results: vec![ValueType::F64],
        };

        assert_eq!(ty.to_string(), "[i32, i64] -> [f64]");
        assert_eq!(FunctionType::default().to_string(), "[] -> []");
    }

    #[test]
    fn function_type_equality_is_element_wise() {
        let a = FunctionType {
            params: vec![ValueType::I32],
            results: vec![],
        };
        let b = FunctionType {
            params: vec![ValueType::I32],
            results: vec![],
        };
        let c = FunctionType {
            params: vec![],
            results: vec![ValueType::I32],
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
