use crate::{Export, FunctionType, Instruction, ValueType};
use indexmap::IndexMap;
use std::fmt;

/// Represents the id of a module section.
///
/// All thirteen ids defined by the binary format are represented, including
/// those whose content grammars are not yet decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SectionId {
    /// The custom section (id 0).
    Custom,
    /// The type section (id 1).
    Type,
    /// The import section (id 2).
    Import,
    /// The function section (id 3).
    Function,
    /// The table section (id 4).
    Table,
    /// The memory section (id 5).
    Memory,
    /// The global section (id 6).
    Global,
    /// The export section (id 7).
    Export,
    /// The start section (id 8).
    Start,
    /// The element section (id 9).
    Element,
    /// The code section (id 10).
    Code,
    /// The data section (id 11).
    Data,
    /// The data count section (id 12).
    DataCount,
}

impl SectionId {
    /// Gets the section id encoded by the given byte.
    ///
    /// Returns `None` if the byte is not a defined section id.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Custom),
            1 => Some(Self::Type),
            2 => Some(Self::Import),
            3 => Some(Self::Function),
            4 => Some(Self::Table),
            5 => Some(Self::Memory),
            6 => Some(Self::Global),
            7 => Some(Self::Export),
            8 => Some(Self::Start),
            9 => Some(Self::Element),
            10 => Some(Self::Code),
            11 => Some(Self::Data),
            12 => Some(Self::DataCount),
            _ => None,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom => write!(f, "custom"),
            Self::Type => write!(f, "type"),
            Self::Import => write!(f, "import"),
            Self::Function => write!(f, "function"),
            Self::Table => write!(f, "table"),
            Self::Memory => write!(f, "memory"),
            Self::Global => write!(f, "global"),
            Self::Export => write!(f, "export"),
            Self::Start => write!(f, "start"),
            Self::Element => write!(f, "element"),
            Self::Code => write!(f, "code"),
            Self::Data => write!(f, "data"),
            Self::DataCount => write!(f, "data count"),
        }
    }
}

/// Represents a custom section.
///
/// The payload is kept verbatim; callers that understand a particular
/// custom section convention reinterpret it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CustomSection {
    /// The name of the custom section.
    pub name: String,
    /// The uninterpreted payload of the section.
    pub data: Vec<u8>,
}

/// Represents a type section: the function types of a module.
///
/// Types are referenced by their position in this vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TypeSection {
    /// The function types, in declaration order.
    pub types: Vec<FunctionType>,
}

/// Represents a function section: one type index per module-defined function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FunctionSection {
    /// The type indices, in function declaration order.
    pub type_indices: Vec<u32>,
}

/// Represents an export section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExportSection {
    /// The exports, in declaration order.
    pub exports: Vec<Export>,
}

/// Represents the decoded body of a single function.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FunctionCode {
    /// The local variable counts by value type.
    ///
    /// Counts accumulate when the same type is declared in multiple runs.
    pub locals: IndexMap<ValueType, u32>,
    /// The instructions of the function body.
    ///
    /// The terminating `end` byte is not represented.
    pub body: Vec<Instruction>,
}

/// Represents a code section.
///
/// Entries parallel the function section by position: entry `i` is the body
/// of the function whose signature is `type_indices[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CodeSection {
    /// The function bodies, in function declaration order.
    pub functions: Vec<FunctionCode>,
}

/// Represents a decoded module section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Section {
    /// The section is a custom section.
    Custom(CustomSection),
    /// The section is a type section.
    Type(TypeSection),
    /// The section is a function section.
    Function(FunctionSection),
    /// The section is an export section.
    Export(ExportSection),
    /// The section is a code section.
    Code(CodeSection),
}

impl Section {
    /// Gets the id of the section.
    pub const fn id(&self) -> SectionId {
        match self {
            Self::Custom(_) => SectionId::Custom,
            Self::Type(_) => SectionId::Type,
            Self::Function(_) => SectionId::Function,
            Self::Export(_) => SectionId::Export,
            Self::Code(_) => SectionId::Code,
        }
    }
}

/// Represents a decoded module.
///
/// Sections appear in the order they were encountered in the byte stream;
/// the module header (magic and version) was validated before any section
/// was produced.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Module {
    /// The sections of the module, in stream order.
    pub sections: Vec<Section>,
}

impl Module {
    /// Gets the first type section of the module, if any.
    pub fn types(&self) -> Option<&TypeSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Type(s) => Some(s),
            _ => None,
        })
    }

    /// Gets the first function section of the module, if any.
    pub fn functions(&self) -> Option<&FunctionSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Function(s) => Some(s),
            _ => None,
        })
    }

    /// Gets the first export section of the module, if any.
    pub fn exports(&self) -> Option<&ExportSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Export(s) => Some(s),
            _ => None,
        })
    }

    /// Gets the first code section of the module, if any.
    pub fn code(&self) -> Option<&CodeSection> {
        self.sections.iter().find_map(|s| match s {
            Section::Code(s) => Some(s),
            _ => None,
        })
    }

    /// Iterates the custom sections of the module, in stream order.
    pub fn custom_sections(&self) -> impl Iterator<Item = &CustomSection> {
        self.sections.iter().filter_map(|s| match s {
            Section::Custom(s) => Some(s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn section_ids_round_trip() {
        for byte in 0..=12 {
            let id = SectionId::from_byte(byte).unwrap();
            assert_eq!(SectionId::from_byte(byte), Some(id));
        }

        assert_eq!(SectionId::from_byte(13), None);
        assert_eq!(SectionId::from_byte(0xFF), None);
    }

    #[test]
    fn module_accessors() {
        let module = Module {
            sections: vec![
                Section::Custom(CustomSection {
                    name: "first".to_string(),
                    data: Vec::new(),
                }),
                Section::Type(TypeSection::default()),
                Section::Custom(CustomSection {
                    name: "second".to_string(),
                    data: Vec::new(),
                }),
            ],
        };

        assert!(module.types().is_some());
        assert!(module.functions().is_none());
        assert!(module.code().is_none());

        let names = module
            .custom_sections()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["first", "second"]);
    }
}
