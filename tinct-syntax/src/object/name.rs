//! Names.

use core::borrow::Borrow;
use core::fmt::{self, Debug, Formatter};
use core::ops::Deref;
use smallvec::SmallVec;

type NameInner = SmallVec<[u8; 31]>;

/// A PDF name object.
///
/// Names are byte sequences; escape sequences are assumed to have been
/// resolved by the producing layer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(NameInner);

impl Name {
    /// Create a new name from a sequence of bytes.
    pub fn new(data: &[u8]) -> Self {
        Self(SmallVec::from_slice(data))
    }

    /// Return a string representation of the name.
    ///
    /// Returns a placeholder in case the name is not UTF-8 encoded.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("{non-ascii name}")
    }
}

impl Deref for Name {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Name {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Name {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(&self.0) {
            Ok(s) => <str as Debug>::fmt(s, f),
            Err(_) => <[u8] as Debug>::fmt(&self.0, f),
        }
    }
}

/// The color-space names recognized by the evaluator.
pub mod names {
    /// The `G` abbreviation for DeviceGray.
    pub const G: &[u8] = b"G";
    /// The DeviceGray color space.
    pub const DEVICE_GRAY: &[u8] = b"DeviceGray";
    /// The `RGB` abbreviation for DeviceRGB.
    pub const RGB: &[u8] = b"RGB";
    /// The DeviceRGB color space.
    pub const DEVICE_RGB: &[u8] = b"DeviceRGB";
    /// The `CMYK` abbreviation for DeviceCMYK.
    pub const CMYK: &[u8] = b"CMYK";
    /// The DeviceCMYK color space.
    pub const DEVICE_CMYK: &[u8] = b"DeviceCMYK";
    /// The CalGray color space.
    pub const CAL_GRAY: &[u8] = b"CalGray";
    /// The CalRGB color space.
    pub const CAL_RGB: &[u8] = b"CalRGB";
    /// The CalCMYK color space, defined as an alias of DeviceCMYK.
    pub const CAL_CMYK: &[u8] = b"CalCMYK";
    /// The Lab color space.
    pub const LAB: &[u8] = b"Lab";
    /// The ICCBased color space.
    pub const ICC_BASED: &[u8] = b"ICCBased";
    /// The `I` abbreviation for Indexed.
    pub const I: &[u8] = b"I";
    /// The Indexed color space.
    pub const INDEXED: &[u8] = b"Indexed";
    /// The Separation color space.
    pub const SEPARATION: &[u8] = b"Separation";
    /// The DeviceN color space.
    pub const DEVICE_N: &[u8] = b"DeviceN";
    /// The Pattern color space.
    pub const PATTERN: &[u8] = b"Pattern";
}

#[cfg(test)]
mod tests {
    use crate::object::name::Name;
    use std::ops::Deref;

    #[test]
    fn name_1() {
        assert_eq!(Name::new(b"DeviceRGB").deref(), b"DeviceRGB");
    }

    #[test]
    fn name_2() {
        assert_eq!(Name::new(b"").deref(), b"");
    }

    #[test]
    fn name_3() {
        assert_eq!(Name::new(b"Name1").as_str(), "Name1");
    }

    #[test]
    fn name_4() {
        assert_eq!(Name::new(&[0xff, 0xfe]).as_str(), "{non-ascii name}");
    }
}
