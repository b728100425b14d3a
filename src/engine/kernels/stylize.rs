//! Stylization kernels: edges, gradients, comic rendering, and mosaics.

use image::RgbaImage;

const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

// 5-tap smoothed-derivative pair for the gradient filter bank.
const GRAD_SMOOTH: [i32; 5] = [1, 4, 6, 4, 1];
const GRAD_DERIV: [i32; 5] = [-1, -2, 0, 2, 1];

/// Sobel edge tracing. `intensity` scales the reported edge magnitude.
///
/// Border pixels are left as-is; images narrower than the kernel come back
/// unchanged.
pub fn edges(source: &RgbaImage, intensity: f64) -> RgbaImage {
    let (width, height) = source.dimensions();
    let intensity = intensity.max(0.0) as f32;
    let mut out = source.clone();
    if width < 3 || height < 3 {
        return out;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let (gx, gy) = sobel_at(source, x, y);
            let magnitude = (((gx * gx + gy * gy) as f32).sqrt() * intensity).min(255.0) as u8;
            let pixel = out.get_pixel_mut(x, y);
            pixel[0] = magnitude;
            pixel[1] = magnitude;
            pixel[2] = magnitude;
        }
    }
    out
}

/// Oriented-gradient visualization with a fixed 5x5 filter bank.
///
/// The horizontal response lands in the red channel and the vertical in the
/// green, both biased around 128 so flat regions read as neutral gray. Takes
/// no arguments.
pub fn gabor_gradient(source: &RgbaImage) -> RgbaImage {
    // sum|deriv| * sum|smooth|, so a full-range edge maps to +/-255.
    const NORM: i32 = 6 * 16;

    let (width, height) = source.dimensions();
    let mut out = source.clone();
    if width < 5 || height < 5 {
        return out;
    }
    for y in 2..height - 2 {
        for x in 2..width - 2 {
            let mut gx = 0i32;
            let mut gy = 0i32;
            for ky in -2i32..=2 {
                for kx in -2i32..=2 {
                    let px = (x as i32 + kx) as u32;
                    let py = (y as i32 + ky) as u32;
                    let pixel = source.get_pixel(px, py);
                    let gray = (pixel[0] as i32 + pixel[1] as i32 + pixel[2] as i32) / 3;
                    let h = (kx + 2) as usize;
                    let v = (ky + 2) as usize;
                    gx += gray * GRAD_DERIV[h] * GRAD_SMOOTH[v];
                    gy += gray * GRAD_SMOOTH[h] * GRAD_DERIV[v];
                }
            }
            let pixel = out.get_pixel_mut(x, y);
            pixel[0] = (128 + gx / NORM).clamp(0, 255) as u8;
            pixel[1] = (128 + gy / NORM).clamp(0, 255) as u8;
            pixel[2] = 128;
        }
    }
    out
}

/// Comic rendering: posterized color with inked outlines. Takes no
/// arguments.
pub fn comic(source: &RgbaImage) -> RgbaImage {
    const LEVELS: f32 = 5.0;
    const INK_THRESHOLD: f32 = 200.0;

    let (width, height) = source.dimensions();
    let mut out = source.clone();
    let step = 255.0 / (LEVELS - 1.0);
    for pixel in out.pixels_mut() {
        for c in 0..3 {
            pixel[c] = ((pixel[c] as f32 / step).round() * step).clamp(0.0, 255.0) as u8;
        }
    }
    if width < 3 || height < 3 {
        return out;
    }
    // Outlines come from the original image, before posterizing flattens it.
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let (gx, gy) = sobel_at(source, x, y);
            if ((gx * gx + gy * gy) as f32).sqrt() >= INK_THRESHOLD {
                let pixel = out.get_pixel_mut(x, y);
                pixel[0] = 0;
                pixel[1] = 0;
                pixel[2] = 0;
            }
        }
    }
    out
}

/// Square-block averaging. The grid is anchored at `center` so the blocks
/// stay put as the block size changes.
pub fn pixellate(source: &RgbaImage, scale: f64, center: (f64, f64)) -> RgbaImage {
    let (width, height) = source.dimensions();
    let block = scale.round().max(1.0) as i64;
    if block <= 1 {
        return source.clone();
    }
    let mut out = source.clone();

    let mut by = grid_start(center.1, block);
    while by < height as i64 {
        let mut bx = grid_start(center.0, block);
        while bx < width as i64 {
            let x_start = bx.max(0) as u32;
            let y_start = by.max(0) as u32;
            let x_end = (bx + block).min(width as i64) as u32;
            let y_end = (by + block).min(height as i64) as u32;
            if x_start < x_end && y_start < y_end {
                let mut sums = [0u64; 3];
                let mut count = 0u64;
                for py in y_start..y_end {
                    for px in x_start..x_end {
                        let pixel = source.get_pixel(px, py);
                        sums[0] += pixel[0] as u64;
                        sums[1] += pixel[1] as u64;
                        sums[2] += pixel[2] as u64;
                        count += 1;
                    }
                }
                let avg = [
                    (sums[0] / count) as u8,
                    (sums[1] / count) as u8,
                    (sums[2] / count) as u8,
                ];
                for py in y_start..y_end {
                    for px in x_start..x_end {
                        let pixel = out.get_pixel_mut(px, py);
                        pixel[0] = avg[0];
                        pixel[1] = avg[1];
                        pixel[2] = avg[2];
                    }
                }
            }
            bx += block;
        }
        by += block;
    }
    out
}

/// Faceted mosaic: every pixel takes the color of the nearest jittered cell
/// seed, producing irregular crystal facets roughly `radius` pixels across.
///
/// Seed positions come from an integer hash of the cell coordinates, so the
/// pattern is a pure function of the inputs.
pub fn crystallize(source: &RgbaImage, radius: f64, center: (f64, f64)) -> RgbaImage {
    let (width, height) = source.dimensions();
    let cell = radius.round().max(1.0) as i64;
    if cell <= 1 {
        return source.clone();
    }
    let mut out = source.clone();
    for y in 0..height {
        for x in 0..width {
            let gx = ((x as f64 - center.0) / cell as f64).floor() as i64;
            let gy = ((y as f64 - center.1) / cell as f64).floor() as i64;

            let mut best_distance = f64::MAX;
            let mut best = (x, y);
            for ny in gy - 1..=gy + 1 {
                for nx in gx - 1..=gx + 1 {
                    let (sx, sy) = seed_position(nx, ny, cell, center);
                    let dx = sx - x as f64;
                    let dy = sy - y as f64;
                    let distance = dx * dx + dy * dy;
                    if distance < best_distance {
                        best_distance = distance;
                        best = (
                            (sx.round() as i64).clamp(0, width as i64 - 1) as u32,
                            (sy.round() as i64).clamp(0, height as i64 - 1) as u32,
                        );
                    }
                }
            }
            out.put_pixel(x, y, *source.get_pixel(best.0, best.1));
        }
    }
    out
}

fn sobel_at(image: &RgbaImage, x: u32, y: u32) -> (i32, i32) {
    let mut gx = 0i32;
    let mut gy = 0i32;
    for ky in -1i32..=1 {
        for kx in -1i32..=1 {
            let px = (x as i32 + kx) as u32;
            let py = (y as i32 + ky) as u32;
            let pixel = image.get_pixel(px, py);
            let gray = (pixel[0] as i32 + pixel[1] as i32 + pixel[2] as i32) / 3;
            let ki = ((ky + 1) * 3 + (kx + 1)) as usize;
            gx += gray * SOBEL_X[ki];
            gy += gray * SOBEL_Y[ki];
        }
    }
    (gx, gy)
}

// First grid line at or below zero for a grid anchored at `center`.
fn grid_start(center: f64, block: i64) -> i64 {
    (center.floor() as i64).rem_euclid(block) - block
}

// Deterministic seed point inside cell (nx, ny) of the jittered grid.
fn seed_position(nx: i64, ny: i64, cell: i64, center: (f64, f64)) -> (f64, f64) {
    let hash = cell_hash(nx, ny);
    let jx = (hash & 0xffff) as f64 / 65536.0;
    let jy = ((hash >> 16) & 0xffff) as f64 / 65536.0;
    (
        center.0 + (nx as f64 + jx) * cell as f64,
        center.1 + (ny as f64 + jy) * cell as f64,
    )
}

// SplitMix64-style mix of the packed cell coordinates.
fn cell_hash(x: i64, y: i64) -> u64 {
    let mut hash =
        (x as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ (y as u64).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d0_49bb_1331_11eb);
    hash ^ (hash >> 31)
}
