//! Resolution of indirect object references.

use crate::object::{ObjRef, Object};
use core::fmt;

/// The result of a fetch from an [`XRef`].
pub type Result<T> = core::result::Result<T, FetchError>;

/// An error raised while resolving an object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    /// The referenced data is not resident yet.
    ///
    /// This is a sentinel for incrementally loaded documents: callers that
    /// probe caches or attempt opportunistic resolution must let it
    /// propagate so the document layer can load the missing range and retry.
    MissingData,
    /// The reference does not resolve to an object.
    MissingEntry,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingData => write!(f, "object data has not been loaded yet"),
            Self::MissingEntry => write!(f, "reference does not resolve to an object"),
        }
    }
}

impl core::error::Error for FetchError {}

/// A resolver for indirect object references.
///
/// Implemented by the document layer; the evaluator only ever resolves
/// through this trait.
pub trait XRef {
    /// Resolve a reference to the object it designates.
    fn fetch(&self, r: ObjRef) -> Result<Object>;

    /// Resolve an object in case it is a reference, and return any other
    /// object unchanged.
    fn fetch_if_ref(&self, obj: Object) -> Result<Object> {
        match obj {
            Object::Ref(r) => self.fetch(r),
            other => Ok(other),
        }
    }
}

impl XRef for rustc_hash::FxHashMap<ObjRef, Object> {
    fn fetch(&self, r: ObjRef) -> Result<Object> {
        self.get(&r).cloned().ok_or(FetchError::MissingEntry)
    }
}

#[cfg(test)]
mod tests {
    use crate::object::{Number, ObjRef, Object};
    use crate::xref::{FetchError, XRef};
    use rustc_hash::FxHashMap;

    #[test]
    fn fetch_1() {
        let mut store = FxHashMap::default();
        store.insert(ObjRef::new(4, 0), Object::Number(Number::from_i32(7)));

        assert_eq!(
            store.fetch(ObjRef::new(4, 0)),
            Ok(Object::Number(Number::from_i32(7)))
        );
        assert_eq!(
            store.fetch(ObjRef::new(5, 0)),
            Err(FetchError::MissingEntry)
        );
    }

    #[test]
    fn fetch_if_ref_1() {
        let store = FxHashMap::default();
        let obj = Object::Boolean(true);

        assert_eq!(store.fetch_if_ref(obj.clone()), Ok(obj));
    }
}
