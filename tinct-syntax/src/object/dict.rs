//! Dictionaries.

use crate::object::Object;
use crate::object::name::Name;
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// A dictionary, which is a key-value map, keys being names and values being
/// any PDF object or object reference.
#[derive(Clone)]
pub struct Dict(Arc<FxHashMap<Name, Object>>);

impl Default for Dict {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Dict {
    /// Create a new dictionary from a sequence of entries.
    pub fn new(entries: impl IntoIterator<Item = (Name, Object)>) -> Self {
        Self(Arc::new(entries.into_iter().collect()))
    }

    /// Create a new empty dictionary.
    pub fn empty() -> Self {
        Self(Arc::new(FxHashMap::default()))
    }

    /// Return the number of entries in the dictionary.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether the dictionary contains an entry with a specific key.
    pub fn contains_key(&self, key: impl Deref<Target = [u8]>) -> bool {
        self.0.contains_key(key.deref())
    }

    /// Return the entry of a key as a specific object type.
    ///
    /// Returns `None` if the entry is absent or has a different type.
    pub fn get<T>(&self, key: impl Deref<Target = [u8]>) -> Option<T>
    where
        T: TryFrom<Object>,
    {
        self.get_raw(key)?.clone().cast()
    }

    /// Return the raw object stored under a key.
    pub fn get_raw(&self, key: impl Deref<Target = [u8]>) -> Option<&Object> {
        self.0.get(key.deref())
    }

    /// Return an iterator over all keys in the dictionary.
    pub fn keys(&self) -> impl Iterator<Item = &Name> {
        self.0.keys()
    }
}

impl Debug for Dict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(Name, Object)> for Dict {
    fn from_iter<T: IntoIterator<Item = (Name, Object)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// The dictionary keys used by the evaluator.
pub mod keys {
    /// The white point of a calibrated color space.
    pub const WHITE_POINT: &[u8] = b"WhitePoint";
    /// The black point of a calibrated color space.
    pub const BLACK_POINT: &[u8] = b"BlackPoint";
    /// The gamma of a calibrated color space.
    pub const GAMMA: &[u8] = b"Gamma";
    /// The XYZ conversion matrix of a CalRGB color space.
    pub const MATRIX: &[u8] = b"Matrix";
    /// The a/b component ranges of a Lab color space.
    pub const RANGE: &[u8] = b"Range";
    /// The component count of an ICCBased stream.
    pub const N: &[u8] = b"N";
    /// The alternate color space of an ICCBased stream.
    pub const ALTERNATE: &[u8] = b"Alternate";
    /// The color-space subdictionary of a resources dictionary.
    pub const COLOR_SPACE: &[u8] = b"ColorSpace";
}
