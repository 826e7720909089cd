//! Owned PDF objects.

use std::sync::Arc;

pub mod dict;
pub mod name;
pub mod stream;
pub mod string;

use dict::Dict;
use name::Name;
use stream::Stream;

macro_rules! object {
    ($t:ty, $s:ident) => {
        impl TryFrom<Object> for $t {
            type Error = ();

            fn try_from(value: Object) -> std::result::Result<Self, Self::Error> {
                match value {
                    Object::$s(b) => Ok(b),
                    _ => Err(()),
                }
            }
        }
    };
}

/// A primitive PDF object.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// A null object.
    Null,
    /// A boolean object.
    Boolean(bool),
    /// A number object.
    Number(Number),
    /// A string object.
    String(string::String),
    /// A name object.
    Name(Name),
    /// An array object.
    Array(Array),
    /// A dict object.
    Dict(Dict),
    /// A stream object.
    Stream(Stream),
    /// A reference to an indirect object.
    Ref(ObjRef),
}

impl Object {
    /// Try casting the object to a specific subtype.
    pub fn cast<T>(self) -> Option<T>
    where
        T: TryFrom<Object>,
    {
        self.try_into().ok()
    }

    /// Cast the object to a name.
    #[inline(always)]
    pub fn into_name(self) -> Option<Name> {
        self.cast()
    }

    /// Cast the object to an array.
    #[inline(always)]
    pub fn into_array(self) -> Option<Array> {
        self.cast()
    }

    /// Cast the object to a dict.
    #[inline(always)]
    pub fn into_dict(self) -> Option<Dict> {
        self.cast()
    }

    /// Cast the object to a stream.
    #[inline(always)]
    pub fn into_stream(self) -> Option<Stream> {
        self.cast()
    }
}

object!(bool, Boolean);
object!(Number, Number);
object!(string::String, String);
object!(Name, Name);
object!(Array, Array);
object!(Dict, Dict);
object!(Stream, Stream);
object!(ObjRef, Ref);

macro_rules! number_object {
    ($($t:ty, $via:ident);*) => {
        $(
            impl TryFrom<Object> for $t {
                type Error = ();

                fn try_from(value: Object) -> std::result::Result<Self, Self::Error> {
                    match value {
                        Object::Number(n) => n.$via(),
                        _ => Err(()),
                    }
                }
            }
        )*
    };
}

number_object!(
    u8, as_unsigned; u16, as_unsigned; u32, as_unsigned; usize, as_unsigned;
    i32, as_signed; i64, as_signed
);

impl TryFrom<Object> for f32 {
    type Error = ();

    fn try_from(value: Object) -> std::result::Result<Self, Self::Error> {
        match value {
            Object::Number(n) => Ok(n.as_f32()),
            _ => Err(()),
        }
    }
}

impl<const N: usize> TryFrom<Object> for [f32; N] {
    type Error = ();

    fn try_from(value: Object) -> std::result::Result<Self, Self::Error> {
        let array = value.into_array().ok_or(())?;

        if array.len() != N {
            return Err(());
        }

        let mut out = [0.0; N];
        for (slot, obj) in out.iter_mut().zip(array.iter()) {
            *slot = obj.clone().cast::<f32>().ok_or(())?;
        }

        Ok(out)
    }
}

/// A PDF number object.
///
/// PDF does not distinguish between integers and reals at the call sites this
/// crate serves, so a number is stored as a double and converted on access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(f64);

impl Number {
    /// Create a number from an integer.
    pub fn from_i32(value: i32) -> Self {
        Self(value as f64)
    }

    /// Create a number from a float.
    pub fn from_f32(value: f32) -> Self {
        Self(value as f64)
    }

    /// Return the number as a float.
    pub fn as_f32(&self) -> f32 {
        self.0 as f32
    }

    /// Return the number as a double.
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    fn as_unsigned<T: TryFrom<u64>>(&self) -> std::result::Result<T, ()> {
        if self.0 < 0.0 || self.0.fract() != 0.0 {
            return Err(());
        }

        T::try_from(self.0 as u64).map_err(|_| ())
    }

    fn as_signed<T: TryFrom<i64>>(&self) -> std::result::Result<T, ()> {
        if self.0.fract() != 0.0 {
            return Err(());
        }

        T::try_from(self.0 as i64).map_err(|_| ())
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Object::Number(Number::from_i32(value))
    }
}

impl From<f32> for Object {
    fn from(value: f32) -> Self {
        Object::Number(Number::from_f32(value))
    }
}

/// An array object.
#[derive(Debug, Clone, PartialEq)]
pub struct Array(Arc<[Object]>);

impl Array {
    /// Create a new array from a sequence of objects.
    pub fn new(items: impl IntoIterator<Item = Object>) -> Self {
        Self(items.into_iter().collect())
    }

    /// Return the number of items in the array.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the item at an index.
    pub fn get(&self, index: usize) -> Option<&Object> {
        self.0.get(index)
    }

    /// Return an iterator over the items of the array.
    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.0.iter()
    }
}

impl FromIterator<Object> for Array {
    fn from_iter<T: IntoIterator<Item = Object>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// A reference to an indirect object.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct ObjRef {
    /// The object number.
    pub obj_number: i32,
    /// The generation number.
    pub gen_number: i32,
}

impl ObjRef {
    /// Create a new object reference.
    pub fn new(obj_number: i32, gen_number: i32) -> Self {
        Self {
            obj_number,
            gen_number,
        }
    }
}
