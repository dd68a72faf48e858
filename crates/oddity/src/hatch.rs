//! Hatch line generation.
//!
//! Hatching is pure geometry: a set of parallel segments spanning the whole
//! canvas. The renderer draws them inside a clip path of the region being
//! hatched, so no per-shape clipping happens here.

use oddity_core::{
    draw::HatchDirection,
    geometry::{Point, Segment},
};

/// Returns the hatch segments for `direction`.
///
/// # Examples
///
/// ```
/// # use oddity::hatch::hatch_lines;
/// # use oddity_core::draw::HatchDirection;
/// let lines = hatch_lines(HatchDirection::Horizontal);
/// assert_eq!(lines.len(), 51);
/// ```
pub fn hatch_lines(direction: HatchDirection) -> Vec<Segment> {
    let spacing = direction.spacing();
    match direction {
        HatchDirection::Slash => offsets(-100.0, 200.0, spacing)
            .map(|k| Segment::new(Point::new(0.0, -k), Point::new(100.0, 100.0 - k)))
            .collect(),
        HatchDirection::Backslash => offsets(0.0, 200.0, spacing)
            .map(|k| Segment::new(Point::new(0.0, k), Point::new(100.0, k - 100.0)))
            .collect(),
        HatchDirection::Horizontal => offsets(0.0, 100.0, spacing)
            .map(|k| Segment::new(Point::new(0.0, k), Point::new(100.0, k)))
            .collect(),
        HatchDirection::Vertical => offsets(0.0, 100.0, spacing)
            .map(|k| Segment::new(Point::new(k, 0.0), Point::new(k, 100.0)))
            .collect(),
    }
}

/// `start, start + step, ...` up to and including `end`
fn offsets(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let steps = ((end - start) / step + 1e-9).floor() as usize;
    (0..=steps).map(move |i| start + i as f64 * step)
}
