//! Module for decoding the type grammar.

use crate::{leb128, limits, source::ByteSource, DecodeResult, Error};
use wasmod_types::{FunctionType, ValueType};

/// The header byte introducing every function type.
const FUNCTION_TYPE_HEADER: u8 = 0x60;

/// Decodes a single value type byte.
pub(crate) fn decode_value_type<S: ByteSource>(source: &mut S) -> DecodeResult<ValueType> {
    let offset = source.offset();
    let byte = source.read_byte("value type")?;
    ValueType::from_code(byte).ok_or(Error::InvalidValueType { byte, offset })
}

/// Decodes a result type: a length-prefixed vector of value types.
///
/// Order is preserved; it denotes call and return positions.
pub(crate) fn decode_result_type<S: ByteSource>(
    source: &mut S,
    kind: &'static str,
) -> DecodeResult<Vec<ValueType>> {
    let offset = source.offset();
    let count = leb128::read_u32(source, kind)?;
    if u64::from(count) > limits::MAX_RESULT_TYPES {
        return Err(Error::LimitExceeded {
            kind,
            limit: limits::MAX_RESULT_TYPES,
            offset,
        });
    }

    let mut types = Vec::with_capacity(count as usize);
    for _ in 0..count {
        types.push(decode_value_type(source)?);
    }

    Ok(types)
}

/// Decodes a function type: the `0x60` header byte, then the parameter and
/// result types in that order.
pub(crate) fn decode_function_type<S: ByteSource>(source: &mut S) -> DecodeResult<FunctionType> {
    let offset = source.offset();
    let byte = source.read_byte("function type header")?;
    if byte != FUNCTION_TYPE_HEADER {
        return Err(Error::InvalidFunctionTypeHeader { byte, offset });
    }

    let params = decode_result_type(source, "parameters")?;
    let results = decode_result_type(source, "results")?;
    Ok(FunctionType { params, results })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::Source;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_types() {
        let mut source = Source::new(&[0x7F, 0x7E, 0x7D, 0x7C, 0x7B, 0x70, 0x6F][..]);
        let expected = [
            ValueType::I32,
            ValueType::I64,
            ValueType::F32,
            ValueType::F64,
            ValueType::V128,
            ValueType::FuncRef,
            ValueType::ExternRef,
        ];

        for ty in expected {
            assert_eq!(decode_value_type(&mut source).unwrap(), ty);
        }
    }

    #[test]
    fn unknown_value_type_names_the_byte() {
        let mut source = Source::new(&[0x99][..]);
        let err = decode_value_type(&mut source).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValueType {
                byte: 0x99,
                offset: 0
            }
        ));
    }

    #[test]
    fn function_types() {
        // (i32, i32) -> (i64)
        let mut source = Source::new(&[0x60, 0x02, 0x7F, 0x7F, 0x01, 0x7E][..]);
        let ty = decode_function_type(&mut source).unwrap();
        assert_eq!(
            ty,
            FunctionType {
                params: vec![ValueType::I32, ValueType::I32],
                results: vec![ValueType::I64],
            }
        );
    }

    #[test]
    fn function_type_requires_the_header_byte() {
        let mut source = Source::new(&[0x61, 0x00, 0x00][..]);
        let err = decode_function_type(&mut source).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFunctionTypeHeader {
                byte: 0x61,
                offset: 0
            }
        ));
    }
}
