//! Tonal kernels: sepia and vignette.

use image::RgbaImage;

// Classic sepia weights, rows produce the toned r/g/b from the original rgb.
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Sepia tone, blended with the original by `intensity` in `[0, 1]`.
pub fn sepia(source: &RgbaImage, intensity: f64) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0) as f32;
    let mut out = source.clone();
    for pixel in out.pixels_mut() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;
        for c in 0..3 {
            let toned = (SEPIA[c][0] * r + SEPIA[c][1] * g + SEPIA[c][2] * b).min(255.0);
            pixel[c] = (pixel[c] as f32 * (1.0 - intensity) + toned * intensity) as u8;
        }
    }
    out
}

/// Darken radially toward the corners.
///
/// `radius` is the distance in pixels from the center where the falloff
/// begins; darkening ramps up to `intensity` at the farthest corner. A
/// radius beyond the corner distance leaves the image untouched.
pub fn vignette(source: &RgbaImage, intensity: f64, radius: f64) -> RgbaImage {
    let (width, height) = source.dimensions();
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();
    let start = (radius as f32).clamp(0.0, max_distance);
    let span = (max_distance - start).max(f32::EPSILON);
    let intensity = intensity.clamp(0.0, 1.0) as f32;

    let mut out = source.clone();
    for (y, row) in out.rows_mut().enumerate() {
        for (x, pixel) in row.enumerate() {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let distance = (dx * dx + dy * dy).sqrt();
            let falloff = ((distance - start) / span).clamp(0.0, 1.0);
            let factor = 1.0 - intensity * falloff;
            pixel[0] = (pixel[0] as f32 * factor) as u8;
            pixel[1] = (pixel[1] as f32 * factor) as u8;
            pixel[2] = (pixel[2] as f32 * factor) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([120, 64, 200, 255]));
        assert_eq!(sepia(&source, 0.0), source);
    }

    #[test]
    fn test_sepia_full_intensity_applies_matrix() {
        let source = RgbaImage::from_pixel(2, 2, Rgba([100, 100, 100, 255]));
        let toned = sepia(&source, 1.0);
        let pixel = toned.get_pixel(0, 0);
        // 100 * (0.393 + 0.769 + 0.189) = 135.1
        assert_eq!(pixel[0], 135);
        assert_eq!(pixel[1], 120);
        assert_eq!(pixel[2], 93);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn test_vignette_keeps_center_darkens_corner() {
        let source = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        let shaded = vignette(&source, 1.0, 0.0);
        assert_eq!(shaded.get_pixel(20, 20)[0], 255);
        assert!(shaded.get_pixel(0, 0)[0] < 255);
    }

    #[test]
    fn test_vignette_past_corner_is_gentle() {
        let source = RgbaImage::from_pixel(10, 10, Rgba([200, 200, 200, 255]));
        // Falloff starts beyond every pixel, so nothing darkens.
        let shaded = vignette(&source, 1.0, 10_000.0);
        assert_eq!(shaded, source);
    }
}
