use chrono::{DateTime, SecondsFormat, Utc};
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use super::record::{Kind, Record, RecordDescription};

/// Static shape of a type, one layer at a time.
#[derive(Clone, Copy)]
pub enum TypeShape {
    /// A reference, box, or optional wrapping another type.
    Indirect(fn() -> TypeShape),
    Kind(Kind),
    Record(fn() -> RecordDescription),
}

/// Dynamic shape of a value, one layer at a time.
pub enum ValueShape<'a> {
    Indirect(&'a dyn Reflect),
    /// An empty optional.
    Absent,
    Bool(bool),
    String(Cow<'a, str>),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Record(RecordDescription, &'a dyn Record),
    Other(Kind),
}

/// Runtime type information used by the schema and key encoders.
pub trait Reflect {
    fn type_shape() -> TypeShape
    where
        Self: Sized;

    fn value_shape(&self) -> ValueShape<'_>;
}

/// Peels indirection layers off a type until a concrete shape remains.
pub fn elem_of_type(mut shape: TypeShape) -> TypeShape {
    while let TypeShape::Indirect(inner) = shape {
        shape = inner();
    }
    shape
}

/// Peels indirection layers off a value until a concrete shape remains.
pub fn elem_of_value(value: &dyn Reflect) -> ValueShape<'_> {
    let mut shape = value.value_shape();
    while let ValueShape::Indirect(inner) = shape {
        shape = inner.value_shape();
    }
    shape
}

macro_rules! reflect_pointer {
    ($($ptr:ty),*) => {
        $(
            impl<T: Reflect> Reflect for $ptr {
                fn type_shape() -> TypeShape {
                    TypeShape::Indirect(T::type_shape)
                }

                fn value_shape(&self) -> ValueShape<'_> {
                    ValueShape::Indirect(&**self)
                }
            }
        )*
    };
}

reflect_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: Reflect> Reflect for Option<T> {
    fn type_shape() -> TypeShape {
        TypeShape::Indirect(T::type_shape)
    }

    fn value_shape(&self) -> ValueShape<'_> {
        match self {
            Some(inner) => ValueShape::Indirect(inner),
            None => ValueShape::Absent,
        }
    }
}

impl Reflect for bool {
    fn type_shape() -> TypeShape {
        TypeShape::Kind(Kind::Bool)
    }

    fn value_shape(&self) -> ValueShape<'_> {
        ValueShape::Bool(*self)
    }
}

impl Reflect for String {
    fn type_shape() -> TypeShape {
        TypeShape::Kind(Kind::String)
    }

    fn value_shape(&self) -> ValueShape<'_> {
        ValueShape::String(Cow::Borrowed(self))
    }
}

macro_rules! reflect_number {
    ($variant:ident as $cast:ty => $($ty:ty : $kind:ident),*) => {
        $(
            impl Reflect for $ty {
                fn type_shape() -> TypeShape {
                    TypeShape::Kind(Kind::$kind)
                }

                fn value_shape(&self) -> ValueShape<'_> {
                    ValueShape::$variant(*self as $cast)
                }
            }
        )*
    };
}

reflect_number!(Int as i64 => i8: I8, i16: I16, i32: I32, i64: I64, isize: Isize);
reflect_number!(Uint as u64 => u8: U8, u16: U16, u32: U32, u64: U64, usize: Usize);
reflect_number!(F32 as f32 => f32: F32);
reflect_number!(F64 as f64 => f64: F64);

// Same text serde writes, so key maps match marshalled items.
impl Reflect for DateTime<Utc> {
    fn type_shape() -> TypeShape {
        TypeShape::Kind(Kind::String)
    }

    fn value_shape(&self) -> ValueShape<'_> {
        ValueShape::String(Cow::Owned(self.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
    }
}

impl Reflect for Uuid {
    fn type_shape() -> TypeShape {
        TypeShape::Kind(Kind::String)
    }

    fn value_shape(&self) -> ValueShape<'_> {
        ValueShape::String(Cow::Owned(self.to_string()))
    }
}

impl Reflect for Vec<u8> {
    fn type_shape() -> TypeShape {
        TypeShape::Kind(Kind::Bytes)
    }

    fn value_shape(&self) -> ValueShape<'_> {
        ValueShape::Other(Kind::Bytes)
    }
}

macro_rules! reflect_map {
    ($kind:ident => $($ty:ty),*) => {
        $(
            impl<V> Reflect for $ty {
                fn type_shape() -> TypeShape {
                    TypeShape::Kind(Kind::$kind)
                }

                fn value_shape(&self) -> ValueShape<'_> {
                    ValueShape::Other(Kind::$kind)
                }
            }
        )*
    };
}

reflect_map!(Map => HashMap<String, V>, BTreeMap<String, V>);

macro_rules! reflect_list {
    ($($ty:ty),*) => {
        $(
            impl Reflect for Vec<$ty> {
                fn type_shape() -> TypeShape {
                    TypeShape::Kind(Kind::List)
                }

                fn value_shape(&self) -> ValueShape<'_> {
                    ValueShape::Other(Kind::List)
                }
            }
        )*
    };
}

reflect_list!(
    bool, String, i8, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64, Uuid
);

impl Reflect for serde_json::Value {
    fn type_shape() -> TypeShape {
        TypeShape::Kind(Kind::Map)
    }

    fn value_shape(&self) -> ValueShape<'_> {
        use serde_json::Value;
        match self {
            Value::Null => ValueShape::Absent,
            Value::Bool(b) => ValueShape::Bool(*b),
            Value::String(s) => ValueShape::String(Cow::Borrowed(s)),
            Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                (Some(i), _, _) => ValueShape::Int(i),
                (None, Some(u), _) => ValueShape::Uint(u),
                (None, None, Some(f)) => ValueShape::F64(f),
                _ => ValueShape::Other(Kind::F64),
            },
            Value::Array(_) => ValueShape::Other(Kind::List),
            Value::Object(_) => ValueShape::Other(Kind::Map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(shape: TypeShape) -> Option<Kind> {
        match elem_of_type(shape) {
            TypeShape::Kind(kind) => Some(kind),
            _ => None,
        }
    }

    #[test]
    fn elem_of_type_peels_every_layer() {
        assert_eq!(kind(<Option<Box<Arc<String>>>>::type_shape()), Some(Kind::String));
        assert_eq!(kind(<&&u8>::type_shape()), Some(Kind::U8));
        assert_eq!(kind(<Rc<f32>>::type_shape()), Some(Kind::F32));
        assert_eq!(kind(<Vec<u8>>::type_shape()), Some(Kind::Bytes));
        assert_eq!(kind(<HashMap<String, i32>>::type_shape()), Some(Kind::Map));
    }

    #[test]
    fn elem_of_value_stops_at_absent() {
        let value: Option<Box<String>> = None;
        assert!(matches!(elem_of_value(&value), ValueShape::Absent));

        let value = Some(Box::new(String::from("x")));
        match elem_of_value(&value) {
            ValueShape::String(s) => assert_eq!(s, "x"),
            _ => panic!("Expected a string shape"),
        }
    }

    #[test]
    fn numbers_keep_sign_and_width() {
        assert!(matches!(elem_of_value(&-5i8), ValueShape::Int(-5)));
        assert!(matches!(elem_of_value(&u64::MAX), ValueShape::Uint(u64::MAX)));
        assert!(matches!(elem_of_value(&1.5f32), ValueShape::F32(_)));
        assert!(matches!(elem_of_value(&1.5f64), ValueShape::F64(_)));
    }

    #[test]
    fn json_values_reflect_by_variant() {
        let value = serde_json::json!({ "ID": "1" });
        assert!(matches!(elem_of_value(&value), ValueShape::Other(Kind::Map)));
        assert!(matches!(
            elem_of_value(&serde_json::json!(-3)),
            ValueShape::Int(-3)
        ));
    }
}
