/*!
Evaluation of PDF color spaces into sRGB bytes.

This crate implements the color-space families of the PDF reference
(`8.6 Colour Spaces`): the device spaces, CalGray, CalRGB, Lab, Indexed,
Separation/DeviceN and Pattern. A [`ColorSpace`] is built from a PDF
descriptor object with [`ColorSpace::parse`] and then converts samples into
clamped sRGB bytes, either one at a time or in bulk over raw image
components, including whole-image fills with an optional nearest-neighbor
resize.

The crate is deliberately narrow: it performs no I/O and holds no document
state. The object model it consumes lives in `tinct-syntax`, references are
resolved through the [`XRef`](tinct_syntax::XRef) trait, and tint
transformations for Separation/DeviceN spaces are produced by a
caller-supplied [`TintFunctionFactory`]. ICC profiles are not interpreted;
an ICCBased descriptor degrades to its alternate space or to the device
space matching its component count.

# Example

```rust
use tinct::ColorSpace;

// Full coverage in DeviceCMYK, as bytes of an 8-bit image sample.
let mut rgb = [0u8; 3];
ColorSpace::DeviceCmyk.get_rgb_buffer(&[0u8, 0, 0, 255], &mut rgb, 1, 8, 0);
assert!(rgb.iter().all(|c| *c < 64));
```
*/

pub mod cache;
pub mod color;
pub mod error;
pub mod function;
mod util;

pub use cache::ColorSpaceCache;
pub use color::{
    Alternate, CalGray, CalRgb, ColorComponents, ColorSpace, Indexed, Lab, Pattern,
};
pub use error::{Error, FormatError, Result};
pub use function::{TintFunction, TintFunctionFactory};
pub use util::Sample;
