use core::fmt;
use std::borrow::Cow;

use super::reflect::{elem_of_type, Reflect, TypeShape};

/// The storage class of a field once all indirection has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    String,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bytes,
    List,
    Map,
    Record,
}

impl Kind {
    /// Whether a value of this kind can be encoded as a key attribute.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Kind::Bytes | Kind::List | Kind::Map | Kind::Record)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Record => "record",
        };
        write!(f, "{}", name)
    }
}

/// A `name:"value"` pair attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
    pub name: Cow<'static, str>,
    pub value: Cow<'static, str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: Cow<'static, str>,
    kind: Kind,
    tags: Vec<FieldTag>,
}

impl Field {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: Kind) -> Self {
        Field {
            name: name.into(),
            kind,
            tags: Vec::new(),
        }
    }

    /// A field whose kind is derived from the Rust type `T`.
    pub fn of<T: Reflect>(name: impl Into<Cow<'static, str>>) -> Self {
        Field::new(name, kind_of(T::type_shape()))
    }

    /// Same as [`Field::of`], with `T` inferred from a field accessor.
    pub fn from_accessor<R, T: Reflect>(
        name: impl Into<Cow<'static, str>>,
        _accessor: fn(&R) -> &T,
    ) -> Self {
        Field::of::<T>(name)
    }

    pub fn tag(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.tags.push(FieldTag {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn tags(&self) -> &[FieldTag] {
        &self.tags
    }

    /// Looks up the value of the first tag called `name`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.value.as_ref())
    }
}

fn kind_of(shape: TypeShape) -> Kind {
    match elem_of_type(shape) {
        TypeShape::Kind(kind) => kind,
        _ => Kind::Record,
    }
}

/// The static shape of a record: its name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescription {
    name: Cow<'static, str>,
    fields: Vec<Field>,
}

impl RecordDescription {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        RecordDescription {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// A record type whose fields can be inspected by attribute name.
///
/// Attribute names returned by [`Record::describe`] must match the names the
/// type serializes to with serde, so whole-record marshalling and key
/// encoding address the same attributes. Types implementing `Record` also
/// implement [`Reflect`] with a `Record` shape; the [`record!`](crate::record)
/// macro writes both impls.
pub trait Record {
    fn describe() -> RecordDescription
    where
        Self: Sized;

    fn field(&self, name: &str) -> Option<&dyn Reflect>;
}

/// Implements [`Record`] and [`Reflect`] for a struct.
///
/// ```
/// use dynabind::record;
///
/// struct Todo {
///     id: String,
///     item: String,
/// }
///
/// record!(Todo {
///     "ID" => id (dynamodb = "paritionkey"),
///     "Item" => item,
/// });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($attr:literal => $field:ident $(($($tag:ident = $value:literal),* $(,)?))?),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn describe() -> $crate::RecordDescription {
                $crate::RecordDescription::new(stringify!($ty))
                    $(.field(
                        $crate::Field::from_accessor($attr, |r: &$ty| &r.$field)
                            $($(.tag(stringify!($tag), $value))*)?
                    ))*
            }

            fn field(&self, name: &str) -> Option<&dyn $crate::Reflect> {
                match name {
                    $($attr => Some(&self.$field as &dyn $crate::Reflect),)*
                    _ => None,
                }
            }
        }

        impl $crate::Reflect for $ty {
            fn type_shape() -> $crate::TypeShape {
                $crate::TypeShape::Record(<$ty as $crate::Record>::describe)
            }

            fn value_shape(&self) -> $crate::ValueShape<'_> {
                $crate::ValueShape::Record(<$ty as $crate::Record>::describe(), self)
            }
        }
    };
}
