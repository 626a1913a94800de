//! 8-bit RGB to CIE L*a*b* and back, with the scaling the original OpenCV
//! pipeline used: L stretched to 0..255, a and b offset by 128, D65 white,
//! no gamma step. Keeping these exact constants keeps the enhancement stage
//! bit-reproducible.

/// (6/29)^3, the linear/cubic crossover of the Lab transfer function.
const EPS: f32 = 0.008856;
const KAPPA: f32 = 903.3;

fn pivot(t: f32) -> f32 {
    if t > EPS {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn pivot_inv(t: f32) -> f32 {
    let t3 = t * t * t;
    if t3 > EPS {
        t3
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

pub(crate) fn rgb_to_lab(px: [u8; 3]) -> [u8; 3] {
    let r = px[0] as f32 / 255.0;
    let g = px[1] as f32 / 255.0;
    let b = px[2] as f32 / 255.0;

    let x = (0.412_453 * r + 0.357_580 * g + 0.180_423 * b) / 0.950_456;
    let y = 0.212_671 * r + 0.715_160 * g + 0.072_169 * b;
    let z = (0.019_334 * r + 0.119_193 * g + 0.950_227 * b) / 1.088_754;

    let fy = pivot(y);
    let l = if y > EPS { 116.0 * fy - 16.0 } else { KAPPA * y };
    let a = 500.0 * (pivot(x) - fy) + 128.0;
    let bb = 200.0 * (fy - pivot(z)) + 128.0;

    [
        (l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8,
        a.round().clamp(0.0, 255.0) as u8,
        bb.round().clamp(0.0, 255.0) as u8,
    ]
}

pub(crate) fn lab_to_rgb(px: [u8; 3]) -> [u8; 3] {
    let l = px[0] as f32 * 100.0 / 255.0;
    let a = px[1] as f32 - 128.0;
    let b = px[2] as f32 - 128.0;

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    // KAPPA * EPS == 8.0, the L value at the transfer crossover
    let y = if l > KAPPA * EPS { fy * fy * fy } else { l / KAPPA };
    let x = pivot_inv(fx) * 0.950_456;
    let z = pivot_inv(fz) * 1.088_754;

    let r = 3.240_479 * x - 1.537_150 * y - 0.498_535 * z;
    let g = -0.969_256 * x + 1.875_992 * y + 0.041_556 * z;
    let bb = 0.055_648 * x - 0.204_043 * y + 1.057_311 * z;

    [channel_to_u8(r), channel_to_u8(g), channel_to_u8(bb)]
}

fn channel_to_u8(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}
