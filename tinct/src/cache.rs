//! Caching of parsed color spaces.

use crate::color::ColorSpace;
use rustc_hash::FxHashMap;
use tinct_syntax::{Name, ObjRef};

/// A cache of parsed color spaces, keyed by indirect-object reference or by
/// resource-dictionary name.
///
/// The cache is owned by whoever owns the document scope the spaces belong
/// to (typically one cache per content stream or page). Parsed composite
/// spaces are cheap to clone, so hits hand out clones that share the
/// underlying representation.
#[derive(Debug, Default)]
pub struct ColorSpaceCache {
    by_ref: FxHashMap<ObjRef, ColorSpace>,
    by_name: FxHashMap<Name, ColorSpace>,
}

impl ColorSpaceCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the space cached under an object reference.
    pub fn get_by_ref(&self, r: ObjRef) -> Option<ColorSpace> {
        self.by_ref.get(&r).cloned()
    }

    /// Return the space cached under a resource name.
    pub fn get_by_name(&self, name: &[u8]) -> Option<ColorSpace> {
        self.by_name.get(name).cloned()
    }

    /// Store a parsed space under whichever of `name` and `r` are present.
    ///
    /// Storing the same keys again replaces the entries; a set is
    /// idempotent on `(name, ref)`.
    pub fn set(&mut self, name: Option<Name>, r: Option<ObjRef>, space: ColorSpace) {
        match (name, r) {
            (Some(name), Some(r)) => {
                self.by_name.insert(name, space.clone());
                self.by_ref.insert(r, space);
            }
            (Some(name), None) => {
                self.by_name.insert(name, space);
            }
            (None, Some(r)) => {
                self.by_ref.insert(r, space);
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::ColorSpaceCache;
    use crate::color::ColorSpace;
    use tinct_syntax::{Name, ObjRef};

    #[test]
    fn cache_1() {
        let mut cache = ColorSpaceCache::new();
        let r = ObjRef::new(3, 0);

        assert!(cache.get_by_ref(r).is_none());
        cache.set(None, Some(r), ColorSpace::DeviceRgb);
        assert!(matches!(cache.get_by_ref(r), Some(ColorSpace::DeviceRgb)));
        assert!(cache.get_by_name(b"CS0").is_none());
    }

    #[test]
    fn cache_2() {
        let mut cache = ColorSpaceCache::new();
        cache.set(Some(Name::new(b"CS0")), None, ColorSpace::DeviceCmyk);
        assert!(matches!(
            cache.get_by_name(b"CS0"),
            Some(ColorSpace::DeviceCmyk)
        ));
    }
}
