//! Geometric distortion kernels.

use image::{Rgba, RgbaImage};

/// Swirl pixels around `center` within `radius`, by up to `angle_deg`
/// degrees at the very center.
///
/// The rotation falls off quadratically toward the edge of the effect circle
/// and is zero outside it, so the boundary stays continuous. Zero radius or
/// angle is the identity.
pub fn twirl(source: &RgbaImage, radius: f64, angle_deg: f64, center: (f64, f64)) -> RgbaImage {
    if radius <= 0.0 || angle_deg == 0.0 {
        return source.clone();
    }
    let (width, height) = source.dimensions();
    let angle = angle_deg.to_radians();
    let mut out = source.clone();
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - center.0;
            let dy = y as f64 - center.1;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance >= radius {
                continue;
            }
            let falloff = 1.0 - distance / radius;
            let theta = angle * falloff * falloff;
            let (sin, cos) = theta.sin_cos();
            let sample_x = center.0 + dx * cos - dy * sin;
            let sample_y = center.1 + dx * sin + dy * cos;
            out.put_pixel(x, y, bilinear(source, sample_x, sample_y));
        }
    }
    out
}

// Bilinear sample with clamp-to-edge addressing.
fn bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (width, height) = image.dimensions();
    let x = x.clamp(0.0, (width - 1) as f64);
    let y = y.clamp(0.0, (height - 1) as f64);
    let base_x = x.floor();
    let base_y = y.floor();
    let tx = (x - base_x) as f32;
    let ty = (y - base_y) as f32;
    let x0 = base_x as u32;
    let y0 = base_y as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let p00 = image.get_pixel(x0, y0);
    let p10 = image.get_pixel(x1, y0);
    let p01 = image.get_pixel(x0, y1);
    let p11 = image.get_pixel(x1, y1);

    let mut result = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f32 * (1.0 - tx) + p10[c] as f32 * tx;
        let bottom = p01[c] as f32 * (1.0 - tx) + p11[c] as f32 * tx;
        result[c] = (top * (1.0 - ty) + bottom * ty).round() as u8;
    }
    Rgba(result)
}
