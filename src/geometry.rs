/// A point in pixel space, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box the ring's arcs are inscribed in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oval {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Oval {
    pub fn around(center: Point, radius: f64) -> Self {
        Self {
            left: center.x - radius,
            top: center.y - radius,
            right: center.x + radius,
            bottom: center.y + radius,
        }
    }
}

/// Ring placement derived from the view size and stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub radius: f64,
    pub center: Point,
    pub oval: Oval,
}

impl Geometry {
    /// Largest ring that fits `width` x `height` with one stroke width of
    /// margin. Views smaller than two stroke widths get a zero radius.
    pub fn new(width: u32, height: u32, stroke_width: f64) -> Self {
        let radius = (f64::from(width.min(height)) / 2.0 - stroke_width).max(0.0);
        let center = Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
        Self {
            radius,
            center,
            oval: Oval::around(center, radius),
        }
    }
}
