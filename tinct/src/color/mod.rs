//! Color spaces and their conversion into sRGB bytes.
//!
//! A [`ColorSpace`] is built from a PDF descriptor by [`ColorSpace::parse`]
//! and then queried either per sample ([`get_rgb_item`](ColorSpace::get_rgb_item))
//! or in bulk over raw image components
//! ([`get_rgb_buffer`](ColorSpace::get_rgb_buffer),
//! [`fill_rgb`](ColorSpace::fill_rgb)). Destination buffers are plain byte
//! slices; every write saturates to `[0, 255]`.

use crate::cache::ColorSpaceCache;
use crate::error::{Error, FormatError, Result};
use crate::function::TintFunctionFactory;
use crate::util;
use crate::util::{Sample, resize_rgb};
use log::warn;
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;
use tinct_syntax::object::dict::keys::*;
use tinct_syntax::object::name::names;
use tinct_syntax::{Array, Dict, FetchError, Name, Object, XRef};

mod alternate;
mod calibrated;
mod device;
mod indexed;
mod lab;

pub use alternate::Alternate;
pub use calibrated::{CalGray, CalRgb};
pub use indexed::Indexed;
pub use lab::Lab;

/// A color value, as a small vector of components.
pub type ColorComponents = SmallVec<[f32; 4]>;

/// A color space, as one of the families of the PDF reference.
///
/// Separation and DeviceN are covered jointly by [`Alternate`]; ICCBased
/// descriptors degrade to their alternate space during parsing. Instances
/// are immutable and cheap to clone.
#[derive(Debug, Clone)]
pub enum ColorSpace {
    /// The DeviceGray color space.
    DeviceGray,
    /// The DeviceRGB color space.
    DeviceRgb,
    /// The DeviceCMYK color space.
    DeviceCmyk,
    /// A CalGray color space.
    CalGray(CalGray),
    /// A CalRGB color space.
    CalRgb(CalRgb),
    /// A Lab color space.
    Lab(Lab),
    /// An Indexed color space.
    Indexed(Indexed),
    /// A Separation or DeviceN color space.
    Alternate(Alternate),
    /// A Pattern color space.
    Pattern(Pattern),
}

/// A Pattern color space: a holder for the optional underlying space of an
/// uncolored pattern.
///
/// Patterns are painted by the pattern machinery, never evaluated per
/// sample; all conversion operations abort on them.
#[derive(Debug, Clone)]
pub struct Pattern(Option<Arc<ColorSpace>>);

impl Pattern {
    pub(crate) fn new(base: Option<ColorSpace>) -> Self {
        Self(base.map(Arc::new))
    }

    /// The underlying color space, for uncolored patterns.
    pub fn base(&self) -> Option<&ColorSpace> {
        self.0.as_deref()
    }
}

impl ColorSpace {
    /// The name of the color-space family.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeviceGray => "DeviceGray",
            Self::DeviceRgb => "DeviceRGB",
            Self::DeviceCmyk => "DeviceCMYK",
            Self::CalGray(_) => "CalGray",
            Self::CalRgb(_) => "CalRGB",
            Self::Lab(_) => "Lab",
            Self::Indexed(_) => "Indexed",
            Self::Alternate(_) => "Alternate",
            Self::Pattern(_) => "Pattern",
        }
    }

    /// The number of input components of one sample.
    pub fn num_components(&self) -> usize {
        match self {
            Self::DeviceGray | Self::CalGray(_) | Self::Indexed(_) | Self::Pattern(_) => 1,
            Self::DeviceRgb | Self::CalRgb(_) | Self::Lab(_) => 3,
            Self::DeviceCmyk => 4,
            Self::Alternate(a) => a.num_components(),
        }
    }

    /// Whether decoded components lie in `[0, 1]`. Only Lab components
    /// live on their own ranges.
    pub fn uses_zero_to_one_range(&self) -> bool {
        !matches!(self, Self::Lab(_))
    }

    /// The owned base space of a composite space.
    pub fn base(&self) -> Option<&ColorSpace> {
        match self {
            Self::Indexed(i) => Some(i.base()),
            Self::Alternate(a) => Some(a.base()),
            Self::Pattern(p) => p.base(),
            _ => None,
        }
    }

    /// Convert one decoded sample into an RGB triple.
    pub fn get_rgb(&self, src: &[f32]) -> [u8; 3] {
        let mut rgb = [0; 3];
        self.get_rgb_item(src, &mut rgb);

        rgb
    }

    /// Convert one decoded sample, writing the triple into `dest[0..3]`.
    pub fn get_rgb_item(&self, src: &[f32], dest: &mut [u8]) {
        match self {
            Self::DeviceGray => device::gray_rgb_item(src, dest),
            Self::DeviceRgb => device::rgb_rgb_item(src, dest),
            Self::DeviceCmyk => device::cmyk_rgb_item(src, dest),
            Self::CalGray(c) => c.get_rgb_item(src, dest),
            Self::CalRgb(c) => c.get_rgb_item(src, dest),
            Self::Lab(l) => l.get_rgb_item(src, dest),
            Self::Indexed(i) => i.get_rgb_item(src, dest),
            Self::Alternate(a) => a.get_rgb_item(src, dest),
            Self::Pattern(_) => unreachable!("Pattern spaces cannot be evaluated per sample"),
        }
    }

    /// Convert `count` raw samples with `bits` bits per component.
    ///
    /// Samples lie in `[0, 2^bits - 1]` and are scaled down before
    /// conversion, except for Indexed spaces, whose samples are raw palette
    /// indices. `alpha01` (0 or 1) bytes are skipped after each written
    /// triple, leaving interleaved alpha slots untouched.
    pub fn get_rgb_buffer<S: Sample>(
        &self,
        src: &[S],
        dest: &mut [u8],
        count: usize,
        bits: u8,
        alpha01: usize,
    ) {
        match self {
            Self::DeviceGray => device::gray_rgb_buffer(src, dest, count, bits, alpha01),
            Self::DeviceRgb => device::rgb_rgb_buffer(src, dest, count, bits, alpha01),
            Self::DeviceCmyk => device::cmyk_rgb_buffer(src, dest, count, bits, alpha01),
            Self::CalGray(c) => c.get_rgb_buffer(src, dest, count, bits, alpha01),
            Self::CalRgb(c) => c.get_rgb_buffer(src, dest, count, bits, alpha01),
            Self::Lab(l) => l.get_rgb_buffer(src, dest, count, bits, alpha01),
            Self::Indexed(i) => i.get_rgb_buffer(src, dest, count, alpha01),
            Self::Alternate(a) => a.get_rgb_buffer(src, dest, count, bits, alpha01),
            Self::Pattern(_) => unreachable!("Pattern spaces cannot be evaluated per sample"),
        }
    }

    /// The number of output bytes produced for `input_length` input
    /// components.
    pub fn get_output_length(&self, input_length: usize, alpha01: usize) -> usize {
        match self {
            Self::Indexed(i) => {
                let base = i.base();

                base.get_output_length(input_length * base.num_components(), alpha01)
            }
            Self::Alternate(a) => a.get_output_length(input_length, alpha01),
            _ => input_length * (3 + alpha01) / self.num_components(),
        }
    }

    /// Whether converted output equals the input, making conversion a
    /// plain copy.
    pub fn is_passthrough(&self, bits: u8) -> bool {
        matches!(self, Self::DeviceRgb) && bits == 8
    }

    /// Whether a decode array equals the default decode of this space.
    pub fn is_default_decode(&self, decode: Option<&[f32]>, bpc: u8) -> bool {
        match self {
            // Decoding is folded into the conversion, so any decode array
            // is informational only.
            Self::Lab(_) => true,
            Self::Indexed(i) => i.is_default_decode(decode, bpc),
            // Patterns carry no sample semantics, so there is nothing a
            // decode array could deviate from.
            Self::Pattern(_) => true,
            _ => util::is_default_decode(decode, self.num_components()),
        }
    }

    /// The initial color of the space, per the content-stream semantics.
    pub fn default_color(&self) -> ColorComponents {
        match self {
            Self::DeviceGray | Self::CalGray(_) | Self::Indexed(_) | Self::Pattern(_) => {
                smallvec![0.0]
            }
            Self::DeviceRgb | Self::CalRgb(_) | Self::Lab(_) => smallvec![0.0; 3],
            Self::DeviceCmyk => smallvec![0.0, 0.0, 0.0, 1.0],
            Self::Alternate(a) => smallvec![1.0; a.num_components()],
        }
    }

    /// The per-component decode ranges assumed when an image carries no
    /// decode array.
    pub fn default_decode(&self, bpc: u8) -> Vec<(f32, f32)> {
        match self {
            Self::Lab(l) => {
                let range = l.range();

                vec![(0.0, 100.0), (range[0], range[1]), (range[2], range[3])]
            }
            Self::Indexed(_) => vec![(0.0, ((1u32 << bpc) - 1) as f32)],
            _ => vec![(0.0, 1.0); self.num_components()],
        }
    }

    /// Convert a whole image into `dest`, optionally resizing it.
    ///
    /// `comps` holds `original_width · original_height` samples of
    /// [`num_components`](Self::num_components) components each;
    /// `actual_height` is the number of scanlines actually present, which
    /// may be smaller for partially decoded images. `dest` is laid out as
    /// `width · height` pixels of `3 + alpha01` bytes each.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_rgb<S: Sample>(
        &self,
        dest: &mut [u8],
        original_width: usize,
        original_height: usize,
        width: usize,
        height: usize,
        actual_height: usize,
        bpc: u8,
        comps: &[S],
        alpha01: usize,
    ) {
        let count = original_width * original_height;
        let num_component_colors = 1usize << bpc;
        let needs_resizing = original_height != height || original_width != width;

        if self.is_passthrough(bpc) {
            if needs_resizing {
                let rgb_buf = comps.iter().map(|s| s.widen() as u8).collect::<Vec<_>>();
                resize_rgb(
                    &rgb_buf,
                    dest,
                    original_width,
                    original_height,
                    width,
                    height,
                    alpha01,
                );
            } else {
                let mut j = 0;
                let mut q = 0;
                for _ in 0..width * actual_height {
                    dest[q] = comps[j].widen() as u8;
                    dest[q + 1] = comps[j + 1].widen() as u8;
                    dest[q + 2] = comps[j + 2].widen() as u8;
                    j += 3;
                    q += 3 + alpha01;
                }
            }

            return;
        }

        if self.num_components() == 1
            && count > num_component_colors
            && !matches!(self, Self::DeviceGray | Self::DeviceRgb)
        {
            // Expensive single-component spaces (Indexed, Separation) have
            // a tiny input domain: converting every possible value once
            // and sampling that table beats reconverting each pixel.
            let all_colors = (0..num_component_colors)
                .map(|i| i as u16)
                .collect::<Vec<_>>();
            let mut color_map = vec![0; num_component_colors * 3];
            self.get_rgb_buffer(
                all_colors.as_slice(),
                &mut color_map,
                num_component_colors,
                bpc,
                0,
            );

            if needs_resizing {
                let mut rgb_buf = vec![0; count * 3];
                for (pixel, s) in rgb_buf.chunks_exact_mut(3).zip(comps) {
                    let key = s.widen() as usize * 3;
                    pixel.copy_from_slice(&color_map[key..key + 3]);
                }

                resize_rgb(
                    &rgb_buf,
                    dest,
                    original_width,
                    original_height,
                    width,
                    height,
                    alpha01,
                );
            } else {
                let mut q = 0;
                for s in comps.iter().take(count) {
                    let key = s.widen() as usize * 3;
                    dest[q..q + 3].copy_from_slice(&color_map[key..key + 3]);
                    q += 3 + alpha01;
                }
            }
        } else if needs_resizing {
            let mut rgb_buf = vec![0; count * 3];
            self.get_rgb_buffer(comps, &mut rgb_buf, count, bpc, 0);
            resize_rgb(
                &rgb_buf,
                dest,
                original_width,
                original_height,
                width,
                height,
                alpha01,
            );
        } else {
            self.get_rgb_buffer(comps, dest, width * actual_height, bpc, alpha01);
        }
    }

    /// Parse a color-space descriptor, probing and filling `cache`.
    ///
    /// `cs` is a name, an array, or a reference to either; `resources` is
    /// the resource dictionary names are looked up in.
    pub fn parse(
        cs: Object,
        xref: &dyn XRef,
        resources: Option<&Dict>,
        tint_factory: &dyn TintFunctionFactory,
        cache: &mut ColorSpaceCache,
    ) -> Result<ColorSpace> {
        if let Some(cached) = Self::get_cached(&cs, xref, cache)? {
            return Ok(cached);
        }

        Self::parse_uncached(cs, xref, resources, tint_factory, cache)
    }

    /// Probe the cache for an already-parsed descriptor.
    ///
    /// Resolution failures during the probe count as a miss, with one
    /// exception: the missing-data sentinel always propagates so the
    /// document layer can load the data and retry.
    pub fn get_cached(
        cs: &Object,
        xref: &dyn XRef,
        cache: &ColorSpaceCache,
    ) -> Result<Option<ColorSpace>> {
        match cs {
            Object::Ref(r) => {
                if let Some(hit) = cache.get_by_ref(*r) {
                    return Ok(Some(hit));
                }

                match xref.fetch(*r) {
                    Ok(Object::Name(name)) => Ok(cache.get_by_name(&name)),
                    Ok(_) => Ok(None),
                    Err(FetchError::MissingData) => Err(Error::MissingData),
                    Err(_) => Ok(None),
                }
            }
            Object::Name(name) => Ok(cache.get_by_name(name)),
            _ => Ok(None),
        }
    }

    /// Parse a descriptor the cache was already probed for, and store the
    /// result.
    ///
    /// The cache is written only here, at the outermost successful return;
    /// nested base-space parsing never touches it, so re-entrant descriptors
    /// cannot observe half-parsed state.
    pub fn parse_uncached(
        cs: Object,
        xref: &dyn XRef,
        resources: Option<&Dict>,
        tint_factory: &dyn TintFunctionFactory,
        cache: &mut ColorSpaceCache,
    ) -> Result<ColorSpace> {
        debug_assert!(
            Self::get_cached(&cs, xref, cache).is_ok_and(|hit| hit.is_none()),
            "descriptor was already cached"
        );

        let parsed = Self::parse_impl(cs.clone(), xref, resources, tint_factory)?;

        let mut cs_name = None;
        let mut cs_ref = None;

        let mut key = cs;
        if let Object::Ref(r) = key {
            cs_ref = Some(r);
            key = xref.fetch(r)?;
        }
        if let Object::Name(name) = key {
            cs_name = Some(name);
        }

        if cs_name.is_some() || cs_ref.is_some() {
            cache.set(cs_name, cs_ref, parsed.clone());
        }

        Ok(parsed)
    }

    fn parse_impl(
        cs: Object,
        xref: &dyn XRef,
        resources: Option<&Dict>,
        tint_factory: &dyn TintFunctionFactory,
    ) -> Result<ColorSpace> {
        let cs = xref.fetch_if_ref(cs)?;

        match cs {
            Object::Name(name) => Self::parse_name(&name, xref, resources, tint_factory),
            Object::Array(array) => Self::parse_array(&array, xref, resources, tint_factory),
            _ => Err(FormatError::UnrecognizedObject.into()),
        }
    }

    fn parse_name(
        name: &Name,
        xref: &dyn XRef,
        resources: Option<&Dict>,
        tint_factory: &dyn TintFunctionFactory,
    ) -> Result<ColorSpace> {
        match name.as_ref() {
            names::G | names::DEVICE_GRAY => Ok(ColorSpace::DeviceGray),
            names::RGB | names::DEVICE_RGB => Ok(ColorSpace::DeviceRgb),
            names::CMYK | names::DEVICE_CMYK => Ok(ColorSpace::DeviceCmyk),
            names::PATTERN => Ok(ColorSpace::Pattern(Pattern::new(None))),
            _ => {
                // Anything else must be declared in the resource
                // dictionary, possibly as another level of indirection.
                let resolved = resources
                    .and_then(|r| r.get::<Dict>(COLOR_SPACE))
                    .and_then(|spaces| spaces.get_raw(name.as_ref()).cloned());

                match resolved {
                    Some(obj) => Self::parse_impl(obj, xref, resources, tint_factory),
                    None => Err(FormatError::UnrecognizedName.into()),
                }
            }
        }
    }

    fn parse_array(
        array: &Array,
        xref: &dyn XRef,
        resources: Option<&Dict>,
        tint_factory: &dyn TintFunctionFactory,
    ) -> Result<ColorSpace> {
        let operand = |i: usize| -> Result<Object> {
            let obj = array.get(i).ok_or(FormatError::InvalidOperand)?.clone();

            Ok(xref.fetch_if_ref(obj)?)
        };

        let mode = operand(0)?
            .into_name()
            .ok_or(FormatError::UnrecognizedMode)?;

        match mode.as_ref() {
            names::G | names::DEVICE_GRAY => Ok(ColorSpace::DeviceGray),
            names::RGB | names::DEVICE_RGB => Ok(ColorSpace::DeviceRgb),
            names::CMYK | names::DEVICE_CMYK => Ok(ColorSpace::DeviceCmyk),
            // CalCMYK is defined as a DeviceCMYK alias.
            names::CAL_CMYK => Ok(ColorSpace::DeviceCmyk),
            names::CAL_GRAY => {
                let params = operand(1)?.into_dict().ok_or(FormatError::InvalidOperand)?;

                Ok(ColorSpace::CalGray(CalGray::new(&params)?))
            }
            names::CAL_RGB => {
                let params = operand(1)?.into_dict().ok_or(FormatError::InvalidOperand)?;

                Ok(ColorSpace::CalRgb(CalRgb::new(&params)?))
            }
            names::LAB => {
                let params = operand(1)?.into_dict().ok_or(FormatError::InvalidOperand)?;

                Ok(ColorSpace::Lab(Lab::new(&params)?))
            }
            names::ICC_BASED => {
                let stream = operand(1)?
                    .into_stream()
                    .ok_or(FormatError::InvalidOperand)?;
                let dict = stream.dict();
                let num_comps = dict.get::<usize>(N);

                if let Some(alternate) = dict.get_raw(ALTERNATE) {
                    let alternate =
                        Self::parse_impl(alternate.clone(), xref, resources, tint_factory)?;

                    if Some(alternate.num_components()) == num_comps {
                        return Ok(alternate);
                    }

                    warn!("ICCBased color space: ignoring incorrect /Alternate entry");
                }

                match num_comps {
                    Some(1) => Ok(ColorSpace::DeviceGray),
                    Some(3) => Ok(ColorSpace::DeviceRgb),
                    Some(4) => Ok(ColorSpace::DeviceCmyk),
                    _ => Err(FormatError::UnrecognizedObject.into()),
                }
            }
            names::PATTERN => {
                let base = match array.get(1) {
                    None | Some(Object::Null) => None,
                    Some(obj) => {
                        Some(Self::parse_impl(obj.clone(), xref, resources, tint_factory)?)
                    }
                };

                Ok(ColorSpace::Pattern(Pattern::new(base)))
            }
            names::I | names::INDEXED => {
                let base = Self::parse_impl(operand(1)?, xref, resources, tint_factory)?;
                let high_val = operand(2)?
                    .cast::<u8>()
                    .ok_or(FormatError::InvalidOperand)? as usize
                    + 1;
                let lookup = operand(3)?;

                Ok(ColorSpace::Indexed(Indexed::new(base, high_val, &lookup)?))
            }
            names::SEPARATION | names::DEVICE_N => {
                let num_components = match operand(1)? {
                    Object::Array(components) => components.len(),
                    _ => 1,
                };
                // A DeviceN descriptor with an empty component list has no
                // well-defined sample layout.
                if num_components == 0 {
                    return Err(FormatError::InvalidOperand.into());
                }

                let base = Self::parse_impl(operand(2)?, xref, resources, tint_factory)?;
                let tint =
                    tint_factory.create(array.get(3).ok_or(FormatError::InvalidOperand)?)?;

                Ok(ColorSpace::Alternate(Alternate::new(
                    num_components,
                    base,
                    tint,
                )))
            }
            _ => Err(FormatError::UnrecognizedMode.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::ColorSpaceCache;
    use crate::color::{ColorSpace, Pattern};
    use crate::error::{Error, FormatError, Result};
    use crate::function::{TintFunction, TintFunctionFactory};
    use rustc_hash::FxHashMap;
    use tinct_syntax::object::dict::keys::*;
    use tinct_syntax::object::name::names;
    use tinct_syntax::{Array, Dict, FetchError, Name, ObjRef, Object, Stream, String, XRef};

    struct NegatingFactory;

    impl TintFunctionFactory for NegatingFactory {
        fn create(&self, _obj: &Object) -> Result<TintFunction> {
            Ok(TintFunction::new(|src, dest| {
                for d in dest.iter_mut() {
                    *d = 1.0 - src[0];
                }
            }))
        }
    }

    struct MissingDataXRef;

    impl XRef for MissingDataXRef {
        fn fetch(&self, _r: ObjRef) -> core::result::Result<Object, FetchError> {
            Err(FetchError::MissingData)
        }
    }

    fn name(n: &[u8]) -> Object {
        Object::Name(Name::new(n))
    }

    fn float_array(values: &[f32]) -> Object {
        Object::Array(Array::new(values.iter().map(|v| Object::from(*v))))
    }

    fn empty_xref() -> FxHashMap<ObjRef, Object> {
        FxHashMap::default()
    }

    fn parse(cs: Object) -> Result<ColorSpace> {
        parse_with(cs, &empty_xref(), &mut ColorSpaceCache::new())
    }

    fn parse_with(
        cs: Object,
        xref: &dyn XRef,
        cache: &mut ColorSpaceCache,
    ) -> Result<ColorSpace> {
        ColorSpace::parse(cs, xref, None, &NegatingFactory, cache)
    }

    #[test]
    fn parse_device_names() {
        for (n, expected) in [
            (&b"G"[..], "DeviceGray"),
            (b"DeviceGray", "DeviceGray"),
            (b"RGB", "DeviceRGB"),
            (b"CMYK", "DeviceCMYK"),
        ] {
            assert_eq!(parse(name(n)).unwrap().name(), expected);
        }
    }

    #[test]
    fn parse_device_name_twice() {
        let mut cache = ColorSpaceCache::new();
        let xref = empty_xref();

        let first = parse_with(name(names::RGB), &xref, &mut cache).unwrap();
        let second = parse_with(name(names::RGB), &xref, &mut cache).unwrap();

        assert!(matches!(first, ColorSpace::DeviceRgb));
        assert!(matches!(second, ColorSpace::DeviceRgb));
        assert!(matches!(
            cache.get_by_name(b"RGB"),
            Some(ColorSpace::DeviceRgb)
        ));
    }

    #[test]
    fn parse_unknown_name() {
        assert_eq!(
            parse(name(b"NoSuchSpace")).unwrap_err(),
            Error::Format(FormatError::UnrecognizedName)
        );
    }

    #[test]
    fn parse_name_through_resources() {
        let resources = Dict::new([(
            Name::new(COLOR_SPACE),
            Object::Dict(Dict::new([(Name::new(b"CS0"), name(names::DEVICE_CMYK))])),
        )]);

        let cs = ColorSpace::parse(
            name(b"CS0"),
            &empty_xref(),
            Some(&resources),
            &NegatingFactory,
            &mut ColorSpaceCache::new(),
        )
        .unwrap();

        assert!(matches!(cs, ColorSpace::DeviceCmyk));
    }

    #[test]
    fn parse_cal_gray_array() {
        let params = Dict::new([
            (Name::new(WHITE_POINT), float_array(&[0.9505, 1.0, 1.0888])),
            (Name::new(GAMMA), Object::from(2.2f32)),
        ]);
        let cs = parse(Object::Array(Array::new([
            name(names::CAL_GRAY),
            Object::Dict(params),
        ])))
        .unwrap();

        assert_eq!(cs.name(), "CalGray");
        assert_eq!(cs.num_components(), 1);
    }

    #[test]
    fn parse_cal_cmyk_degrades() {
        let cs = parse(Object::Array(Array::new([name(names::CAL_CMYK)]))).unwrap();
        assert!(matches!(cs, ColorSpace::DeviceCmyk));
    }

    #[test]
    fn parse_icc_based_with_alternate() {
        let dict = Dict::new([
            (Name::new(N), Object::from(4i32)),
            (Name::new(ALTERNATE), name(names::DEVICE_CMYK)),
        ]);
        let cs = parse(Object::Array(Array::new([
            name(names::ICC_BASED),
            Object::Stream(Stream::new(dict, vec![])),
        ])))
        .unwrap();

        assert!(matches!(cs, ColorSpace::DeviceCmyk));
    }

    #[test]
    fn parse_icc_based_mismatched_alternate() {
        // N disagrees with the alternate, so only N decides.
        let dict = Dict::new([
            (Name::new(N), Object::from(1i32)),
            (Name::new(ALTERNATE), name(names::DEVICE_CMYK)),
        ]);
        let cs = parse(Object::Array(Array::new([
            name(names::ICC_BASED),
            Object::Stream(Stream::new(dict, vec![])),
        ])))
        .unwrap();

        assert!(matches!(cs, ColorSpace::DeviceGray));
    }

    #[test]
    fn parse_indexed_array() {
        let palette = [0x00, 0xff, 0x00, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff];
        let cs = parse(Object::Array(Array::new([
            name(names::INDEXED),
            name(names::DEVICE_RGB),
            Object::from(2i32),
            Object::String(String::new(&palette)),
        ])))
        .unwrap();

        let ColorSpace::Indexed(indexed) = &cs else {
            panic!("expected an Indexed space");
        };
        assert_eq!(indexed.high_val(), 3);
        assert_eq!(indexed.lookup(), &palette);
        assert!(matches!(indexed.base(), ColorSpace::DeviceRgb));
    }

    #[test]
    fn parse_separation_array() {
        let cs = parse(Object::Array(Array::new([
            name(names::SEPARATION),
            name(b"Spot"),
            name(names::DEVICE_RGB),
            Object::Null,
        ])))
        .unwrap();

        assert_eq!(cs.num_components(), 1);
        assert!(matches!(cs.base(), Some(ColorSpace::DeviceRgb)));

        // The negating tint maps full coverage onto black.
        let mut dest = [0xaa; 3];
        cs.get_rgb_buffer(&[255u8], &mut dest, 1, 8, 0);
        assert_eq!(dest, [0, 0, 0]);
    }

    #[test]
    fn parse_device_n_array() {
        let components = Object::Array(Array::new([name(b"Cyan"), name(b"Magenta")]));
        let cs = parse(Object::Array(Array::new([
            name(names::DEVICE_N),
            components,
            name(names::DEVICE_RGB),
            Object::Null,
        ])))
        .unwrap();

        assert_eq!(cs.num_components(), 2);
    }

    #[test]
    fn parse_device_n_without_components() {
        let cs = parse(Object::Array(Array::new([
            name(names::DEVICE_N),
            Object::Array(Array::new([])),
            name(names::DEVICE_RGB),
            Object::Null,
        ])));

        assert_eq!(
            cs.unwrap_err(),
            Error::Format(FormatError::InvalidOperand)
        );
    }

    #[test]
    fn parse_pattern_with_base() {
        let cs = parse(Object::Array(Array::new([
            name(names::PATTERN),
            name(names::DEVICE_RGB),
        ])))
        .unwrap();

        assert!(matches!(cs.base(), Some(ColorSpace::DeviceRgb)));

        let bare = parse(name(names::PATTERN)).unwrap();
        assert!(bare.base().is_none());
    }

    #[test]
    fn parse_through_reference_caches_by_ref() {
        let r = ObjRef::new(7, 0);
        let descriptor = Object::Array(Array::new([
            name(names::INDEXED),
            name(names::DEVICE_RGB),
            Object::from(0i32),
            Object::String(String::new(&[1, 2, 3])),
        ]));

        let mut xref = empty_xref();
        xref.insert(r, descriptor);

        let mut cache = ColorSpaceCache::new();
        let first = parse_with(Object::Ref(r), &xref, &mut cache).unwrap();
        assert!(matches!(first, ColorSpace::Indexed(_)));
        assert!(matches!(
            cache.get_by_ref(r),
            Some(ColorSpace::Indexed(_))
        ));

        let second = parse_with(Object::Ref(r), &xref, &mut cache).unwrap();
        assert!(matches!(second, ColorSpace::Indexed(_)));
    }

    #[test]
    fn missing_data_propagates() {
        assert_eq!(
            parse_with(
                Object::Ref(ObjRef::new(1, 0)),
                &MissingDataXRef,
                &mut ColorSpaceCache::new()
            )
            .unwrap_err(),
            Error::MissingData
        );
    }

    #[test]
    fn unresolved_reference_is_a_format_error() {
        // The cache probe swallows the failed fetch; parsing then surfaces
        // it as a format error.
        assert_eq!(
            parse_with(
                Object::Ref(ObjRef::new(1, 0)),
                &empty_xref(),
                &mut ColorSpaceCache::new()
            )
            .unwrap_err(),
            Error::Format(FormatError::UnresolvedReference)
        );
    }

    #[test]
    fn output_length_invariant() {
        let indexed = ColorSpace::Indexed(
            crate::color::Indexed::new(
                ColorSpace::DeviceCmyk,
                2,
                &Object::String(String::new(&[0; 8])),
            )
            .unwrap(),
        );
        let spaces = [
            ColorSpace::DeviceGray,
            ColorSpace::DeviceRgb,
            ColorSpace::DeviceCmyk,
            indexed,
        ];

        for cs in &spaces {
            for alpha01 in [0, 1] {
                for count in [0, 1, 7] {
                    assert_eq!(
                        cs.get_output_length(count * cs.num_components(), alpha01),
                        count * (3 + alpha01),
                        "{} at alpha01 {alpha01}",
                        cs.name()
                    );
                }
            }
        }
    }

    #[test]
    fn get_rgb_matches_item_and_buffer() {
        let spaces = [
            (ColorSpace::DeviceGray, vec![0.5f32]),
            (ColorSpace::DeviceRgb, vec![0.1, 0.6, 0.9]),
            (ColorSpace::DeviceCmyk, vec![0.2, 0.4, 0.6, 0.8]),
        ];

        for (cs, src) in &spaces {
            let rgb = cs.get_rgb(src);

            let mut item = [0; 3];
            cs.get_rgb_item(src, &mut item);
            assert_eq!(rgb, item, "{}", cs.name());
        }
    }

    #[test]
    fn default_colors() {
        assert_eq!(
            ColorSpace::DeviceCmyk.default_color().as_slice(),
            &[0.0, 0.0, 0.0, 1.0]
        );
        assert_eq!(ColorSpace::DeviceGray.default_color().as_slice(), &[0.0]);

        let separation = ColorSpace::Alternate(crate::color::Alternate::new(
            2,
            ColorSpace::DeviceRgb,
            TintFunction::new(|_, _| {}),
        ));
        assert_eq!(separation.default_color().as_slice(), &[1.0, 1.0]);
    }

    #[test]
    fn default_decode_ranges() {
        assert_eq!(
            ColorSpace::DeviceRgb.default_decode(8),
            vec![(0.0, 1.0); 3]
        );

        let indexed = ColorSpace::Indexed(
            crate::color::Indexed::new(
                ColorSpace::DeviceRgb,
                2,
                &Object::String(String::new(&[0; 6])),
            )
            .unwrap(),
        );
        assert_eq!(indexed.default_decode(4), vec![(0.0, 15.0)]);
    }

    #[test]
    fn pattern_base_accessor() {
        let pattern = ColorSpace::Pattern(Pattern::new(Some(ColorSpace::DeviceRgb)));
        assert!(matches!(pattern.base(), Some(ColorSpace::DeviceRgb)));
    }

    #[test]
    fn pattern_decode_is_default() {
        let pattern = ColorSpace::Pattern(Pattern::new(None));
        assert!(pattern.is_default_decode(None, 8));
        assert!(pattern.is_default_decode(Some(&[0.2, 0.8]), 8));
    }

    fn indexed_ramp() -> ColorSpace {
        // Four gray levels over DeviceRGB.
        let palette = [0u8, 0, 0, 85, 85, 85, 170, 170, 170, 255, 255, 255];
        ColorSpace::Indexed(
            crate::color::Indexed::new(
                ColorSpace::DeviceRgb,
                4,
                &Object::String(String::new(&palette)),
            )
            .unwrap(),
        )
    }

    #[test]
    fn fill_rgb_color_map_matches_direct() {
        let cs = indexed_ramp();
        // 3x3 pixels at 2 bits per component: count exceeds the 4 possible
        // values, so fill_rgb takes the color-map path.
        let comps: [u8; 9] = [0, 1, 2, 3, 3, 2, 1, 0, 2];

        for alpha01 in [0, 1] {
            let mut via_fill = vec![0xaa; 9 * (3 + alpha01)];
            cs.fill_rgb(&mut via_fill, 3, 3, 3, 3, 3, 2, &comps, alpha01);

            let mut direct = vec![0xaa; 9 * (3 + alpha01)];
            cs.get_rgb_buffer(&comps, &mut direct, 9, 2, alpha01);

            assert_eq!(via_fill, direct, "alpha01 {alpha01}");
        }
    }

    #[test]
    fn fill_rgb_passthrough_spreads_alpha() {
        let comps: [u8; 6] = [1, 2, 3, 4, 5, 6];

        let mut dest = [0xaa; 8];
        ColorSpace::DeviceRgb.fill_rgb(&mut dest, 2, 1, 2, 1, 1, 8, &comps, 1);
        assert_eq!(dest, [1, 2, 3, 0xaa, 4, 5, 6, 0xaa]);
    }

    #[test]
    fn fill_rgb_resizes() {
        let comps: [u8; 3] = [9, 8, 7];

        let mut dest = [0; 12];
        ColorSpace::DeviceRgb.fill_rgb(&mut dest, 1, 1, 2, 2, 1, 8, &comps, 0);
        assert_eq!(dest, [9, 8, 7, 9, 8, 7, 9, 8, 7, 9, 8, 7]);
    }

    #[test]
    fn fill_rgb_partial_height() {
        // Only one of two scanlines is present; the second output row
        // stays untouched.
        let comps: [u8; 2] = [0, 255];

        let mut dest = [0xaa; 12];
        ColorSpace::DeviceGray.fill_rgb(&mut dest, 2, 2, 2, 2, 1, 8, &comps, 0);
        assert_eq!(dest, [0, 0, 0, 255, 255, 255, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa]);
    }
}
