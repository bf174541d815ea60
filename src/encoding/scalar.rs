use aws_sdk_dynamodb::types::AttributeValue;

use crate::{
    error::Error,
    models::{
        record::Kind,
        reflect::{Reflect, ValueShape},
    },
};

/// Encodes one key field into its tagged attribute value.
pub fn encode_scalar(field: &str, value: &dyn Reflect) -> Result<AttributeValue, Error> {
    let unsupported = |kind: Kind| Error::UnsupportedScalar {
        field: field.to_string(),
        kind,
    };

    match value.value_shape() {
        ValueShape::Absent => Ok(AttributeValue::Null(true)),
        ValueShape::Bool(b) => Ok(AttributeValue::Bool(b)),
        ValueShape::String(s) => {
            if s.is_empty() {
                return Err(Error::EmptyString {
                    field: field.to_string(),
                });
            }
            Ok(AttributeValue::S(s.into_owned()))
        }
        ValueShape::Int(i) => Ok(AttributeValue::N(i.to_string())),
        ValueShape::Uint(u) => Ok(AttributeValue::N(u.to_string())),
        // Display prints the shortest decimal that round-trips at the
        // value's own precision, without an exponent.
        ValueShape::F32(f) if f.is_finite() => Ok(AttributeValue::N(f.to_string())),
        ValueShape::F32(_) => Err(unsupported(Kind::F32)),
        ValueShape::F64(f) if f.is_finite() => Ok(AttributeValue::N(f.to_string())),
        ValueShape::F64(_) => Err(unsupported(Kind::F64)),
        ValueShape::Record(..) => Err(unsupported(Kind::Record)),
        ValueShape::Other(kind) => Err(unsupported(kind)),
        ValueShape::Indirect(inner) => encode_scalar(field, inner),
    }
}
