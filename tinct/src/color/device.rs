//! The device color spaces.
//!
//! DeviceGray and DeviceRGB are plain component scalings. DeviceCMYK uses a
//! fixed degree-2 polynomial fitted against SWOP-coated CMYK; the
//! coefficients are load-bearing and must not be touched, since rendered
//! output is pinned against them.

use crate::util::{Sample, rgb_byte};

pub(crate) fn gray_rgb_item(src: &[f32], dest: &mut [u8]) {
    let c = rgb_byte(255.0 * src[0]);
    dest[0] = c;
    dest[1] = c;
    dest[2] = c;
}

pub(crate) fn gray_rgb_buffer<S: Sample>(
    src: &[S],
    dest: &mut [u8],
    count: usize,
    bits: u8,
    alpha01: usize,
) {
    let scale = 255.0 / ((1u32 << bits) - 1) as f32;

    let mut q = 0;
    for s in src.iter().take(count) {
        let c = rgb_byte(scale * s.widen() as f32);
        dest[q] = c;
        dest[q + 1] = c;
        dest[q + 2] = c;
        q += 3 + alpha01;
    }
}

pub(crate) fn rgb_rgb_item(src: &[f32], dest: &mut [u8]) {
    dest[0] = rgb_byte(255.0 * src[0]);
    dest[1] = rgb_byte(255.0 * src[1]);
    dest[2] = rgb_byte(255.0 * src[2]);
}

pub(crate) fn rgb_rgb_buffer<S: Sample>(
    src: &[S],
    dest: &mut [u8],
    count: usize,
    bits: u8,
    alpha01: usize,
) {
    if bits == 8 && alpha01 == 0 {
        // Passthrough: the input already is the output.
        for (d, s) in dest[..count * 3].iter_mut().zip(src) {
            *d = s.widen() as u8;
        }

        return;
    }

    let scale = 255.0 / ((1u32 << bits) - 1) as f32;

    let mut j = 0;
    let mut q = 0;
    for _ in 0..count {
        dest[q] = rgb_byte(scale * src[j].widen() as f32);
        dest[q + 1] = rgb_byte(scale * src[j + 1].widen() as f32);
        dest[q + 2] = rgb_byte(scale * src[j + 2].widen() as f32);
        j += 3;
        q += 3 + alpha01;
    }
}

fn cmyk_to_rgb(src: &[f32], scale: f32, dest: &mut [u8]) {
    let c = src[0] * scale;
    let m = src[1] * scale;
    let y = src[2] * scale;
    let k = src[3] * scale;

    let r = 255.0
        + c * (-4.387332384609988 * c
            + 54.48615194189176 * m
            + 18.82290502165302 * y
            + 212.25662451639585 * k
            - 285.2331026137004)
        + m * (1.7149763477362134 * m
            - 5.6096736904047315 * y
            - 17.873870861415444 * k
            - 5.497006427196366)
        + y * (-2.5217340131683033 * y - 21.248923337353073 * k + 17.5119270841813)
        + k * (-21.86122147463605 * k - 189.48180835922747);

    let g = 255.0
        + c * (8.841041422036149 * c
            + 60.118027045597366 * m
            + 6.871425592049007 * y
            + 31.159100130055922 * k
            - 79.2970844816548)
        + m * (-15.310361306967817 * m
            + 17.575251261109482 * y
            + 131.35250912493976 * k
            - 190.9453302588951)
        + y * (4.444339102852739 * y + 9.8632861493405 * k - 24.86741582555878)
        + k * (-20.737325471181034 * k - 187.80453709719578);

    let b = 255.0
        + c * (0.8842522430003296 * c
            + 8.078677503112928 * m
            + 30.89978309703729 * y
            - 0.23883238689178934 * k
            - 14.183576799673286)
        + m * (10.49593273432072 * m
            + 63.02378494754052 * y
            + 50.606957656360734 * k
            - 112.23884253719248)
        + y * (0.03296041114873217 * y + 115.60384449646641 * k - 193.58209356861505)
        + k * (-22.33816807309886 * k - 180.12613974708367);

    dest[0] = rgb_byte(r);
    dest[1] = rgb_byte(g);
    dest[2] = rgb_byte(b);
}

pub(crate) fn cmyk_rgb_item(src: &[f32], dest: &mut [u8]) {
    cmyk_to_rgb(src, 1.0, dest);
}

pub(crate) fn cmyk_rgb_buffer<S: Sample>(
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
        let cmyk = [
            src[j].widen() as f32,
            src[j + 1].widen() as f32,
            src[j + 2].widen() as f32,
            src[j + 3].widen() as f32,
        ];
        cmyk_to_rgb(&cmyk, scale, &mut dest[q..]);
        j += 4;
        q += 3 + alpha01;
    }
}
