//! The Indexed color space.

use crate::color::ColorSpace;
use crate::error::{FormatError, Result};
use crate::util::Sample;
use log::warn;
use std::sync::Arc;
use tinct_syntax::Object;

#[derive(Debug)]
struct IndexedRepr {
    base: ColorSpace,
    // Number of palette entries, i.e. the descriptor's hival plus one.
    high_val: usize,
    lookup: Vec<u8>,
}

/// An Indexed color space: a palette of samples in a base color space.
#[derive(Debug, Clone)]
pub struct Indexed(Arc<IndexedRepr>);

impl Indexed {
    pub(crate) fn new(base: ColorSpace, high_val: usize, lookup: &Object) -> Result<Self> {
        let length = base.num_components() * high_val;
        let mut table = vec![0; length];

        // The lookup table is either a binary stream or a byte string; a
        // short table leaves the remaining entries zeroed.
        match lookup {
            Object::Stream(stream) => {
                let bytes = stream.bytes(length);
                table[..bytes.len()].copy_from_slice(bytes);
            }
            Object::String(string) => {
                let bytes = string.get();
                let n = length.min(bytes.len());
                table[..n].copy_from_slice(&bytes[..n]);
            }
            _ => return Err(FormatError::InvalidLookup.into()),
        }

        Ok(Self(Arc::new(IndexedRepr {
            base,
            high_val,
            lookup: table,
        })))
    }

    /// The base color space the palette entries live in.
    pub fn base(&self) -> &ColorSpace {
        &self.0.base
    }

    /// The number of palette entries.
    pub fn high_val(&self) -> usize {
        self.0.high_val
    }

    pub(crate) fn lookup(&self) -> &[u8] {
        &self.0.lookup
    }

    fn entry(&self, index: usize) -> &[u8] {
        let num_comps = self.0.base.num_components();
        let pos = index.min(self.0.high_val.saturating_sub(1)) * num_comps;

        &self.0.lookup[pos..pos + num_comps]
    }

    pub(crate) fn get_rgb_item(&self, src: &[f32], dest: &mut [u8]) {
        self.0.base.get_rgb_buffer(self.entry(src[0] as usize), dest, 1, 8, 0);
    }

    // The indices are raw palette positions, so `bits` plays no role here.
    pub(crate) fn get_rgb_buffer<S: Sample>(
        &self,
        src: &[S],
        dest: &mut [u8],
        count: usize,
        alpha01: usize,
    ) {
        let base = &self.0.base;
        let output_delta = base.get_output_length(base.num_components(), alpha01);

        let mut q = 0;
        for s in src.iter().take(count) {
            base.get_rgb_buffer(self.entry(s.widen() as usize), &mut dest[q..], 1, 8, alpha01);
            q += output_delta;
        }
    }

    /// For an Indexed space the default decode array spans the palette
    /// index domain rather than `[0, 1]`.
    pub(crate) fn is_default_decode(&self, decode: Option<&[f32]>, bpc: u8) -> bool {
        let Some(decode) = decode else {
            return true;
        };

        if decode.len() != 2 {
            warn!("decode map length is not correct");

            return true;
        }

        if bpc < 1 {
            warn!("bits per component is not correct");

            return true;
        }

        decode[0] == 0.0 && decode[1] == ((1u32 << bpc) - 1) as f32
    }
}
