//! Softening and sharpening kernels.

use image::RgbaImage;

/// Gaussian blur with `radius` as the standard deviation in pixels.
///
/// A radius of zero or less is the identity.
pub fn gaussian(source: &RgbaImage, radius: f64) -> RgbaImage {
    let sigma = radius as f32;
    if sigma <= 0.0 {
        return source.clone();
    }
    imageproc::filter::gaussian_blur_f32(source, sigma)
}

/// Unsharp mask: sharpen by adding back the difference to a blurred copy.
///
/// `radius` sets the blur scale in pixels, `intensity` the amount of
/// difference added back. Either at zero is the identity.
pub fn unsharp_mask(source: &RgbaImage, radius: f64, intensity: f64) -> RgbaImage {
    let sigma = radius as f32;
    let amount = intensity.max(0.0) as f32;
    if sigma <= 0.0 || amount == 0.0 {
        return source.clone();
    }

    let blurred = imageproc::filter::gaussian_blur_f32(source, sigma);
    let mut out = source.clone();
    for (dst, soft) in out.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let original = dst[c] as f32;
            let sharpened = original + (original - soft[c] as f32) * amount;
            dst[c] = sharpened.clamp(0.0, 255.0) as u8;
        }
    }
    out
}
