//! Separation and DeviceN color spaces.
//!
//! Both families carry a tint transformation into an alternate ("base")
//! space and only differ in their input component count, so a single type
//! covers them.

use crate::color::{ColorComponents, ColorSpace};
use crate::function::TintFunction;
use crate::util::{Sample, rgb_byte};
use smallvec::smallvec;
use std::sync::Arc;

#[derive(Debug)]
struct AlternateRepr {
    num_components: usize,
    base: ColorSpace,
    tint: TintFunction,
}

/// A Separation or DeviceN color space.
#[derive(Debug, Clone)]
pub struct Alternate(Arc<AlternateRepr>);

impl Alternate {
    pub(crate) fn new(num_components: usize, base: ColorSpace, tint: TintFunction) -> Self {
        Self(Arc::new(AlternateRepr {
            num_components,
            base,
            tint,
        }))
    }

    /// The alternate color space the tint transformation maps into.
    pub fn base(&self) -> &ColorSpace {
        &self.0.base
    }

    pub(crate) fn num_components(&self) -> usize {
        self.0.num_components
    }

    pub(crate) fn get_rgb_item(&self, src: &[f32], dest: &mut [u8]) {
        let mut tinted: ColorComponents = smallvec![0.0; self.0.base.num_components()];
        self.0.tint.eval(&src[..self.0.num_components], &mut tinted);
        self.0.base.get_rgb_item(&tinted, dest);
    }

    /// Run the tint transformation over `count` samples, writing the base
    /// components as bytes into `out`. Lab bases keep their native range
    /// and are converted right away, since byte quantization would destroy
    /// it.
    fn tint_into<S: Sample>(&self, src: &[S], scale: f32, count: usize, out: &mut [u8]) {
        let base = &self.0.base;
        let num_comps = self.0.num_components;
        let base_num_comps = base.num_components();
        let uses_zero_to_one_range = base.uses_zero_to_one_range();

        let mut scaled: ColorComponents = smallvec![0.0; num_comps];
        let mut tinted: ColorComponents = smallvec![0.0; base_num_comps];

        let mut j = 0;
        let mut pos = 0;
        for _ in 0..count {
            for s in scaled.iter_mut() {
                *s = src[j].widen() as f32 * scale;
                j += 1;
            }

            self.0.tint.eval(&scaled, &mut tinted);

            if uses_zero_to_one_range {
                for t in &tinted {
                    out[pos] = rgb_byte(t * 255.0);
                    pos += 1;
                }
            } else {
                base.get_rgb_item(&tinted, &mut out[pos..]);
                pos += base_num_comps;
            }
        }
    }

    pub(crate) fn get_rgb_buffer<S: Sample>(
        &self,
        src: &[S],
        dest: &mut [u8],
        count: usize,
        bits: u8,
        alpha01: usize,
    ) {
        let base = &self.0.base;
        let scale = 1.0 / ((1u32 << bits) - 1) as f32;

        // When the base consumes its components unchanged (passthrough RGB
        // bytes, or Lab which converts immediately), the tint output can be
        // written straight into the destination.
        let is_passthrough =
            (base.is_passthrough(8) || !base.uses_zero_to_one_range()) && alpha01 == 0;

        if is_passthrough {
            self.tint_into(src, scale, count, dest);
        } else {
            let mut base_buf = vec![0; base.num_components() * count];
            self.tint_into(src, scale, count, &mut base_buf);
            base.get_rgb_buffer(base_buf.as_slice(), dest, count, 8, alpha01);
        }
    }

    pub(crate) fn get_output_length(&self, input_length: usize, alpha01: usize) -> usize {
        let base = &self.0.base;

        base.get_output_length(
            input_length * base.num_components() / self.0.num_components,
            alpha01,
        )
    }
}
