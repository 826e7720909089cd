//! Strings.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A PDF string object.
///
/// PDF strings are byte sequences with no inherent encoding; consumers that
/// use one as binary data (an Indexed lookup table, for example) read the
/// bytes directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct String(Arc<[u8]>);

impl String {
    /// Create a new string from a sequence of bytes.
    pub fn new(data: &[u8]) -> Self {
        Self(data.into())
    }

    /// Return the bytes of the string.
    pub fn get(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for String {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match core::str::from_utf8(&self.0) {
            Ok(s) => <str as Debug>::fmt(s, f),
            Err(_) => <[u8] as Debug>::fmt(&self.0, f),
        }
    }
}
