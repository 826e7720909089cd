//! The CIE-based gray and RGB color spaces.
//!
//! CalRGB follows the reference pipeline: per-channel gamma, the descriptor
//! matrix into XYZ, Bradford adaptation of the source white point to the
//! flat one, black-point compensation, Bradford adaptation to D65, the
//! sRGB matrix, and finally the sRGB transfer function.

use crate::error::{FormatError, Result};
use crate::util::{Sample, rgb_byte};
use log::{info, warn};
use std::sync::Arc;
use tinct_syntax::Dict;
use tinct_syntax::object::dict::keys::*;

const BRADFORD: [f32; 9] = [
    0.8951, 0.2664, -0.1614, -0.7502, 1.7135, 0.0367, 0.0389, -0.0685, 1.0296,
];

const BRADFORD_INVERSE: [f32; 9] = [
    0.9869929, -0.1470543, 0.1599627, 0.4323053, 0.5183603, 0.0492912, -0.0085287, 0.0400428,
    0.9684867,
];

const SRGB_D65_XYZ_TO_RGB: [f32; 9] = [
    3.2404542, -1.5371385, -0.4985314, -0.969_266, 1.8760108, 0.0415560, 0.0556434, -0.2040259,
    1.0572252,
];

const FLAT_WHITEPOINT: [f32; 3] = [1.0, 1.0, 1.0];
const D65_WHITEPOINT: [f32; 3] = [0.95047, 1.0, 1.08883];

/// Validate a WhitePoint entry. The Y component anchors the luminance math,
/// so there is no sensible fallback for a bad value.
fn check_white_point(white_point: [f32; 3]) -> Result<[f32; 3]> {
    let [xw, yw, zw] = white_point;

    if xw < 0.0 || zw < 0.0 || yw != 1.0 {
        return Err(FormatError::InvalidWhitePoint.into());
    }

    Ok(white_point)
}

fn matrix_product(a: &[f32; 9], b: [f32; 3]) -> [f32; 3] {
    [
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2],
        a[3] * b[0] + a[4] * b[1] + a[5] * b[2],
        a[6] * b[0] + a[7] * b[1] + a[8] * b[2],
    ]
}

fn srgb_transfer(color: f32) -> f32 {
    if color <= 0.0031308 {
        (12.92 * color).clamp(0.0, 1.0)
    } else if color >= 0.99554525 {
        // Shortcut: the power below would land on 1 anyway.
        1.0
    } else {
        ((1.0 + 0.055) * color.powf(1.0 / 2.4) - 0.055).clamp(0.0, 1.0)
    }
}

fn decode_l_constant() -> f32 {
    ((8.0f32 + 16.0) / 116.0).powi(3) / 8.0
}

fn decode_l(l: f32) -> f32 {
    if l < 0.0 {
        -decode_l(-l)
    } else if l > 8.0 {
        ((l + 16.0) / 116.0).powi(3)
    } else {
        l * decode_l_constant()
    }
}

/// Adapt XYZ so the source white point maps onto the flat (1, 1, 1) one.
fn normalize_to_flat(source_white_point: [f32; 3], xyz: [f32; 3]) -> [f32; 3] {
    // The constructors guarantee YW == 1, so checking X and Z suffices.
    if source_white_point[0] == 1.0 && source_white_point[2] == 1.0 {
        return xyz;
    }

    let lms = matrix_product(&BRADFORD, xyz);
    let lms_flat = [
        lms[0] / source_white_point[0],
        lms[1] / source_white_point[1],
        lms[2] / source_white_point[2],
    ];

    matrix_product(&BRADFORD_INVERSE, lms_flat)
}

/// Adapt XYZ from the source white point onto the D65 one.
fn normalize_to_d65(source_white_point: [f32; 3], xyz: [f32; 3]) -> [f32; 3] {
    let lms = matrix_product(&BRADFORD, xyz);
    let lms_d65 = [
        lms[0] * D65_WHITEPOINT[0] / source_white_point[0],
        lms[1] * D65_WHITEPOINT[1] / source_white_point[1],
        lms[2] * D65_WHITEPOINT[2] / source_white_point[2],
    ];

    matrix_product(&BRADFORD_INVERSE, lms_d65)
}

/// Scale each axis toward the destination black point. Only the default
/// destination black (0, 0, 0) is ever used here.
fn compensate_black_point(source_black_point: [f32; 3], xyz_flat: [f32; 3]) -> [f32; 3] {
    if source_black_point == [0.0, 0.0, 0.0] {
        return xyz_flat;
    }

    let zero_decode_l = decode_l(0.0);

    let mut out = [0.0; 3];
    for i in 0..3 {
        let src = decode_l(source_black_point[i]);
        let scale = (1.0 - zero_decode_l) / (1.0 - src);
        let offset = 1.0 - scale;
        out[i] = xyz_flat[i] * scale + offset;
    }

    out
}

#[derive(Debug)]
struct CalGrayRepr {
    white_point: [f32; 3],
    _black_point: [f32; 3],
    gamma: f32,
}

/// A CalGray color space.
#[derive(Debug, Clone)]
pub struct CalGray(Arc<CalGrayRepr>);

impl CalGray {
    pub(crate) fn new(dict: &Dict) -> Result<Self> {
        let white_point = dict
            .get::<[f32; 3]>(WHITE_POINT)
            .ok_or(FormatError::MissingWhitePoint)?;
        let mut black_point = dict.get::<[f32; 3]>(BLACK_POINT).unwrap_or([0.0; 3]);
        let mut gamma = dict.get::<f32>(GAMMA).unwrap_or(1.0);

        let white_point = check_white_point(white_point)?;

        if black_point.iter().any(|c| *c < 0.0) {
            info!("invalid BlackPoint for CalGray, falling back to default");
            black_point = [0.0; 3];
        }

        if black_point != [0.0, 0.0, 0.0] {
            warn!("CalGray BlackPoint {black_point:?} is ignored, only default values are supported");
        }

        if gamma < 1.0 {
            info!("invalid Gamma {gamma} for CalGray, falling back to default");
            gamma = 1.0;
        }

        Ok(Self(Arc::new(CalGrayRepr {
            white_point,
            _black_point: black_point,
            gamma,
        })))
    }

    fn to_rgb(&self, src: f32, scale: f32, dest: &mut [u8]) {
        let a = src * scale;
        let ag = a.powf(self.0.gamma);
        let l = self.0.white_point[1] * ag;

        // CIE 116-based luminance to gray, without black-point handling.
        let val = rgb_byte((295.8 * l.powf(1.0 / 3.0) - 40.8).max(0.0));

        dest[0] = val;
        dest[1] = val;
        dest[2] = val;
    }

    pub(crate) fn get_rgb_item(&self, src: &[f32], dest: &mut [u8]) {
        self.to_rgb(src[0], 1.0, dest);
    }

    pub(crate) fn get_rgb_buffer<S: Sample>(
        &self,
        src: &[S],
        dest: &mut [u8],
        count: usize,
        bits: u8,
        alpha01: usize,
    ) {
        let scale = 1.0 / ((1u32 << bits) - 1) as f32;

        let mut q = 0;
        for s in src.iter().take(count) {
            self.to_rgb(s.widen() as f32, scale, &mut dest[q..]);
            q += 3 + alpha01;
        }
    }
}

#[derive(Debug)]
struct CalRgbRepr {
    white_point: [f32; 3],
    black_point: [f32; 3],
    gamma: [f32; 3],
    matrix: [f32; 9],
}

/// A CalRGB color space.
#[derive(Debug, Clone)]
pub struct CalRgb(Arc<CalRgbRepr>);

impl CalRgb {
    pub(crate) fn new(dict: &Dict) -> Result<Self> {
        let white_point = dict
            .get::<[f32; 3]>(WHITE_POINT)
            .ok_or(FormatError::MissingWhitePoint)?;
        let mut black_point = dict.get::<[f32; 3]>(BLACK_POINT).unwrap_or([0.0; 3]);
        let mut gamma = dict.get::<[f32; 3]>(GAMMA).unwrap_or([1.0; 3]);
        let matrix = dict
            .get::<[f32; 9]>(MATRIX)
            .unwrap_or([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

        let white_point = check_white_point(white_point)?;

        if black_point.iter().any(|c| *c < 0.0) {
            info!("invalid BlackPoint for CalRGB, falling back to default");
            black_point = [0.0; 3];
        }

        if gamma.iter().any(|g| *g < 0.0) {
            info!("invalid Gamma {gamma:?} for CalRGB, falling back to default");
            gamma = [1.0; 3];
        }

        Ok(Self(Arc::new(CalRgbRepr {
            white_point,
            black_point,
            gamma,
            matrix,
        })))
    }

    fn to_rgb(&self, src: &[f32], scale: f32, dest: &mut [u8]) {
        let a = (src[0] * scale).clamp(0.0, 1.0);
        let b = (src[1] * scale).clamp(0.0, 1.0);
        let c = (src[2] * scale).clamp(0.0, 1.0);

        let [gr, gg, gb] = self.0.gamma;
        let agr = if a == 1.0 { 1.0 } else { a.powf(gr) };
        let bgg = if b == 1.0 { 1.0 } else { b.powf(gg) };
        let cgb = if c == 1.0 { 1.0 } else { c.powf(gb) };

        // The matrix is stored column-major, as it appears in the
        // descriptor.
        let m = &self.0.matrix;
        let xyz = [
            m[0] * agr + m[3] * bgg + m[6] * cgb,
            m[1] * agr + m[4] * bgg + m[7] * cgb,
            m[2] * agr + m[5] * bgg + m[8] * cgb,
        ];

        let xyz_flat = normalize_to_flat(self.0.white_point, xyz);
        let xyz_black = compensate_black_point(self.0.black_point, xyz_flat);
        let xyz_d65 = normalize_to_d65(FLAT_WHITEPOINT, xyz_black);
        let srgb = matrix_product(&SRGB_D65_XYZ_TO_RGB, xyz_d65);

        dest[0] = rgb_byte(255.0 * srgb_transfer(srgb[0]));
        dest[1] = rgb_byte(255.0 * srgb_transfer(srgb[1]));
        dest[2] = rgb_byte(255.0 * srgb_transfer(srgb[2]));
    }

    pub(crate) fn get_rgb_item(&self, src: &[f32], dest: &mut [u8]) {
        self.to_rgb(src, 1.0, dest);
    }

    pub(crate) fn get_rgb_buffer<S: Sample>(
        &self,
        src: &[S],
        dest: &mut [u8],
        count: usize,
        bits: u8,
        alpha01: usize,
    ) {
        let scale = 1.0 / ((1u32 << bits) - 1) as f32;

        let mut j = 0;
        let mut q = 0;
        for _ in 0..count {
            let rgb = [
                src[j].widen() as f32,
                src[j + 1].widen() as f32,
                src[j + 2].widen() as f32,
            ];
            self.to_rgb(&rgb, scale, &mut dest[q..]);
            j += 3;
            q += 3 + alpha01;
        }
    }
}
