// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Primitive shape filling on RGB canvases.
//!
//! Coordinates are signed and inclusive on both ends; anything outside
//! the canvas is clipped.

use image::{Rgb, RgbImage};

/// Set a single pixel, ignoring coordinates off the canvas
pub fn put_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}

/// Mix `color` over the existing pixel by `coverage` (0.0 - 1.0)
pub fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || (x as u32) >= canvas.width() || (y as u32) >= canvas.height() {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in pixel.0.iter_mut().zip(color.0) {
        let mixed = *dst as f32 + (src as f32 - *dst as f32) * coverage;
        *dst = mixed.round() as u8;
    }
}

/// Fill the rectangle spanning (x0, y0) to (x1, y1)
pub fn fill_rect(canvas: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let max_x = canvas.width() as i32 - 1;
    let max_y = canvas.height() as i32 - 1;
    for y in y0.max(0)..=y1.min(max_y) {
        for x in x0.max(0)..=x1.min(max_x) {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Stroke a rectangle outline, growing `width` pixels inward
pub fn stroke_rect(
    canvas: &mut RgbImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    width: u32,
    color: Rgb<u8>,
) {
    let w = width as i32;
    if w == 0 {
        return;
    }
    fill_rect(canvas, x0, y0, x1, y0 + w - 1, color);
    fill_rect(canvas, x0, y1 - w + 1, x1, y1, color);
    fill_rect(canvas, x0, y0, x0 + w - 1, y1, color);
    fill_rect(canvas, x1 - w + 1, y0, x1, y1, color);
}

/// Fill a disc centered on (cx, cy)
pub fn fill_circle(canvas: &mut RgbImage, cx: i32, cy: i32, radius: u32, color: Rgb<u8>) {
    let r = radius as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put_pixel(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}
