// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::geometry::Point;

/// RGBA8 frame buffer, row major.
#[derive(Debug)]
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }

    /// Blend `color` over the pixel with coverage `alpha`. Off-canvas writes
    /// are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let blend = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        let out = [
            blend(color.r, self.frame[idx]),
            blend(color.g, self.frame[idx + 1]),
            blend(color.b, self.frame[idx + 2]),
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }

    /// Pixel range covering a square of half-size `extent` around `center`.
    fn bounds(&self, center: Point, extent: f64) -> (i32, i32, i32, i32) {
        let min_x = ((center.x - extent).floor() as i32).max(0);
        let max_x = ((center.x + extent).ceil() as i32).min(self.width as i32 - 1);
        let min_y = ((center.y - extent).floor() as i32).max(0);
        let max_y = ((center.y + extent).ceil() as i32).min(self.height as i32 - 1);
        (min_x, max_x, min_y, max_y)
    }
}

/// Anti-aliased coverage of a pixel at `dist` from a band edge of
/// `half_width` around some centre line.
fn band_coverage(dist: f64, half_width: f64) -> f32 {
    (1.0 - (dist - half_width).clamp(0.0, 1.0)) as f32
}

pub fn fill_disc(canvas: &mut Canvas, center: Point, radius: f64, color: Color) {
    let (min_x, max_x, min_y, max_y) = canvas.bounds(center, radius + 1.0);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dist = (x as f64 - center.x).hypot(y as f64 - center.y);
            let aa = band_coverage(dist, radius);
            if aa > 0.01 {
                canvas.set_pixel(x, y, color, aa);
            }
        }
    }
}

/// Full circle stroked with `stroke_width` centred on `radius`.
pub fn stroke_ring(canvas: &mut Canvas, center: Point, radius: f64, stroke_width: f64, color: Color) {
    stroke_band(canvas, center, radius, stroke_width, color, |_| true);
}

/// Arc stroked with `stroke_width` and round caps. Degrees, clockwise from
/// 3 o'clock.
pub fn stroke_arc(
    canvas: &mut Canvas,
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
    stroke_width: f64,
    color: Color,
) {
    if sweep_angle == 0.0 {
        return;
    }
    let (start, sweep) = if sweep_angle < 0.0 {
        (start_angle + sweep_angle, -sweep_angle)
    } else {
        (start_angle, sweep_angle)
    };
    if sweep >= 360.0 {
        stroke_ring(canvas, center, radius, stroke_width, color);
        return;
    }

    stroke_band(canvas, center, radius, stroke_width, color, |angle| {
        (angle - start).rem_euclid(360.0) <= sweep
    });

    let cap_radius = stroke_width / 2.0;
    for angle in [start, start + sweep] {
        let radians = angle.to_radians();
        let cap = Point::new(
            center.x + radians.cos() * radius,
            center.y + radians.sin() * radius,
        );
        fill_disc(canvas, cap, cap_radius, color);
    }
}

fn stroke_band(
    canvas: &mut Canvas,
    center: Point,
    radius: f64,
    stroke_width: f64,
    color: Color,
    in_arc: impl Fn(f64) -> bool,
) {
    let half = stroke_width / 2.0;
    let (min_x, max_x, min_y, max_y) = canvas.bounds(center, radius + half + 1.0);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            let aa = band_coverage((dx.hypot(dy) - radius).abs(), half);
            if aa > 0.01 && in_arc(dy.atan2(dx).to_degrees()) {
                canvas.set_pixel(x, y, color, aa);
            }
        }
    }
}

/// Leftmost pixel and inked width of laid out glyphs.
fn text_width(glyphs: &[PositionedGlyph]) -> (i32, i32) {
    let (min_x, max_x) = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold((i32::MAX, i32::MIN), |(min_x, max_x), bb| {
            (min_x.min(bb.min.x), max_x.max(bb.max.x))
        });
    if min_x < max_x {
        (min_x, max_x - min_x)
    } else {
        (0, 0)
    }
}

/// Draw `text` centred horizontally on `x` with its baseline on `y`.
pub fn draw_text(
    canvas: &mut Canvas,
    font: &Font,
    x: f64,
    y: f64,
    text: &str,
    font_size: f64,
    color: Color,
) {
    let scale = Scale::uniform(font_size as f32);
    let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
    let (min_x, width_px) = text_width(&glyphs);
    let offset_x = x.round() as i32 - width_px / 2 - min_x;
    let baseline = y.round() as i32;

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                canvas.set_pixel(
                    offset_x + bb.min.x + gx as i32,
                    baseline + bb.min.y + gy as i32,
                    color,
                    v,
                );
            });
        }
    }
}
