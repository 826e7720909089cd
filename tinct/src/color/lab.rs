//! The CIE L*a*b* color space.

use crate::error::{FormatError, Result};
use crate::util::{Sample, rgb_byte};
use log::info;
use std::sync::Arc;
use tinct_syntax::Dict;
use tinct_syntax::object::dict::keys::*;

const DEFAULT_RANGE: [f32; 4] = [-100.0, 100.0, -100.0, 100.0];

#[derive(Debug)]
struct LabRepr {
    white_point: [f32; 3],
    _black_point: [f32; 3],
    range: [f32; 4],
}

/// A Lab color space.
#[derive(Debug, Clone)]
pub struct Lab(Arc<LabRepr>);

fn fn_g(x: f32) -> f32 {
    if x >= 6.0 / 29.0 {
        x.powi(3)
    } else {
        (108.0 / 841.0) * (x - 4.0 / 29.0)
    }
}

fn decode_value(value: f32, max_val: f32, low: f32, high: f32) -> f32 {
    low + value * (high - low) / max_val
}

impl Lab {
    pub(crate) fn new(dict: &Dict) -> Result<Self> {
        let white_point = dict
            .get::<[f32; 3]>(WHITE_POINT)
            .ok_or(FormatError::MissingWhitePoint)?;
        let mut black_point = dict.get::<[f32; 3]>(BLACK_POINT).unwrap_or([0.0; 3]);
        let mut range = dict.get::<[f32; 4]>(RANGE).unwrap_or(DEFAULT_RANGE);

        let [xw, yw, zw] = white_point;
        if xw < 0.0 || zw < 0.0 || yw != 1.0 {
            return Err(FormatError::InvalidWhitePoint.into());
        }

        if black_point.iter().any(|c| *c < 0.0) {
            info!("invalid BlackPoint for Lab, falling back to default");
            black_point = [0.0; 3];
        }

        if range[0] > range[1] || range[2] > range[3] {
            info!("invalid Range for Lab, falling back to default");
            range = DEFAULT_RANGE;
        }

        Ok(Self(Arc::new(LabRepr {
            white_point,
            _black_point: black_point,
            range,
        })))
    }

    /// The a/b component ranges of the space, as `[amin, amax, bmin, bmax]`.
    pub fn range(&self) -> [f32; 4] {
        self.0.range
    }

    fn to_rgb(&self, l: f32, a: f32, b: f32, dest: &mut [u8]) {
        let LabRepr {
            white_point, range, ..
        } = &*self.0;

        let a = a.clamp(range[0], range[1]);
        let b = b.clamp(range[2], range[3]);

        let m = (l + 16.0) / 116.0;
        let ls = m + a / 500.0;
        let n = m - b / 200.0;

        let x = white_point[0] * fn_g(ls);
        let y = white_point[1] * fn_g(m);
        let z = white_point[2] * fn_g(n);

        // A Z component below 1 indicates a D50 white point, anything else
        // is treated as D65.
        let (r, g, b) = if white_point[2] < 1.0 {
            (
                x * 3.1339 + y * -1.617 + z * -0.4906,
                x * -0.9785 + y * 1.916 + z * 0.0333,
                x * 0.072 + y * -0.229 + z * 1.4057,
            )
        } else {
            (
                x * 3.2406 + y * -1.5372 + z * -0.4986,
                x * -0.9689 + y * 1.8758 + z * 0.0415,
                x * 0.0557 + y * -0.204 + z * 1.057,
            )
        };

        dest[0] = rgb_byte(r.max(0.0).sqrt() * 255.0);
        dest[1] = rgb_byte(g.max(0.0).sqrt() * 255.0);
        dest[2] = rgb_byte(b.max(0.0).sqrt() * 255.0);
    }

    pub(crate) fn get_rgb_item(&self, src: &[f32], dest: &mut [u8]) {
        self.to_rgb(src[0], src[1], src[2], dest);
    }

    /// Unlike the other spaces, the buffer path owns the decode step: raw
    /// samples are remapped onto `0..100` and the a/b ranges here, which is
    /// why the space reports every decode array as the default one.
    pub(crate) fn get_rgb_buffer<S: Sample>(
        &self,
        src: &[S],
        dest: &mut [u8],
        count: usize,
        bits: u8,
        alpha01: usize,
    ) {
        let max_val = ((1u32 << bits) - 1) as f32;
        let range = self.0.range;

        let mut j = 0;
        let mut q = 0;
        for _ in 0..count {
            let l = decode_value(src[j].widen() as f32, max_val, 0.0, 100.0);
            let a = decode_value(src[j + 1].widen() as f32, max_val, range[0], range[1]);
            let b = decode_value(src[j + 2].widen() as f32, max_val, range[2], range[3]);
            j += 3;

            self.to_rgb(l, a, b, &mut dest[q..]);
            q += 3 + alpha01;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::lab::Lab;
    use crate::error::{Error, FormatError};
    use tinct_syntax::object::dict::keys::*;
    use tinct_syntax::{Array, Dict, Name, Object};

    fn float_array(values: &[f32]) -> Object {
        Object::Array(Array::new(values.iter().map(|v| Object::from(*v))))
    }

    fn lab(white_point: &[f32]) -> Lab {
        let dict = Dict::new([(Name::new(WHITE_POINT), float_array(white_point))]);
        Lab::new(&dict).unwrap()
    }

    #[test]
    fn lab_1() {
        // L = 100, a = b near 0 is close to white.
        let cs = lab(&[0.9505, 1.0, 1.0888]);
        let src: [u8; 3] = [255, 128, 128];

        let mut dest = [0; 3];
        cs.get_rgb_buffer(&src, &mut dest, 1, 8, 0);

        for v in dest {
            assert!(v >= 240, "got {dest:?}");
        }
    }

    #[test]
    fn lab_2() {
        // L = 0 is black in both matrix branches.
        for wp in [[0.9505, 1.0, 1.0888], [0.9642, 1.0, 0.8249]] {
            let cs = lab(&wp);

            let mut dest = [255; 3];
            cs.get_rgb_item(&[0.0, 0.0, 0.0], &mut dest);
            assert_eq!(dest, [0, 0, 0]);
        }
    }

    #[test]
    fn lab_3() {
        // The D50 and D65 branches produce different output for the same
        // chromatic input.
        let d50 = lab(&[0.9642, 1.0, 0.8249]);
        let d65 = lab(&[0.9505, 1.0, 1.0888]);

        let mut a = [0; 3];
        let mut b = [0; 3];
        d50.get_rgb_item(&[50.0, 30.0, -40.0], &mut a);
        d65.get_rgb_item(&[50.0, 30.0, -40.0], &mut b);

        assert_ne!(a, b);
    }

    #[test]
    fn lab_range_clamp() {
        let dict = Dict::new([
            (Name::new(WHITE_POINT), float_array(&[0.9505, 1.0, 1.0888])),
            (Name::new(RANGE), float_array(&[-10.0, 10.0, -10.0, 10.0])),
        ]);
        let cs = Lab::new(&dict).unwrap();

        let mut clamped = [0; 3];
        let mut edge = [0; 3];
        cs.get_rgb_item(&[60.0, 80.0, -90.0], &mut clamped);
        cs.get_rgb_item(&[60.0, 10.0, -10.0], &mut edge);

        assert_eq!(clamped, edge);
    }

    #[test]
    fn lab_invalid_range_reset() {
        let dict = Dict::new([
            (Name::new(WHITE_POINT), float_array(&[0.9505, 1.0, 1.0888])),
            (Name::new(RANGE), float_array(&[10.0, -10.0, -10.0, 10.0])),
        ]);
        let cs = Lab::new(&dict).unwrap();
        assert_eq!(cs.range(), [-100.0, 100.0, -100.0, 100.0]);
    }

    #[test]
    fn lab_missing_white_point() {
        let dict = Dict::new([(Name::new(RANGE), float_array(&[-10.0, 10.0, -10.0, 10.0]))]);
        assert_eq!(
            Lab::new(&dict).unwrap_err(),
            Error::Format(FormatError::MissingWhitePoint)
        );
    }
}
