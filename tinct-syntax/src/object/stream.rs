//! Streams.

use crate::object::dict::Dict;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A stream of arbitrary data.
///
/// The data is fully resident and already passed through any stream filters;
/// reading from it never blocks.
#[derive(Clone, PartialEq)]
pub struct Stream(Arc<Repr>);

#[derive(PartialEq)]
struct Repr {
    dict: Dict,
    data: Vec<u8>,
}

impl Stream {
    /// Create a new stream from its dictionary and decoded data.
    pub fn new(dict: Dict, data: Vec<u8>) -> Self {
        Self(Arc::new(Repr { dict, data }))
    }

    /// Return the dictionary of the stream.
    pub fn dict(&self) -> &Dict {
        &self.0.dict
    }

    /// Return the decoded data of the stream.
    pub fn data(&self) -> &[u8] {
        &self.0.data
    }

    /// Return the first `n` bytes of the stream, or all of them if the
    /// stream is shorter than that.
    pub fn bytes(&self, n: usize) -> &[u8] {
        &self.0.data[..n.min(self.0.data.len())]
    }
}

impl Debug for Stream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stream({} bytes)", self.0.data.len())
    }
}
