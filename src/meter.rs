//! CPU meter frames: a scrolling hue gradient lit up to the current usage.
//!
//! Column `x` takes hue `(base - x / (cols - 1)) * 120`. Columns past the
//! usage mark are dimmed rather than turned off so the gradient stays visible.

use razer_device::KeyMatrix;

use crate::color;

/// Gradient offset of the first frame
pub const START_BASE: f64 = 2.5;

/// Gradient shift per frame
const BASE_STEP: f64 = 0.015;

/// Offset the gradient restarts from once it drops below zero
const BASE_WRAP: f64 = 3.0;

const LIT: f32 = 0.5;
const DIMMED: f32 = 0.02;

/// Next gradient offset
pub fn advance(base: f64) -> f64 {
    let next = base - BASE_STEP;
    if next < 0.0 {
        BASE_WRAP
    } else {
        next
    }
}

/// Hue of column `col` for a gradient offset
pub fn column_hue(base: f64, col: usize, cols: usize) -> f64 {
    let span = cols.saturating_sub(1).max(1) as f64;
    (base - col as f64 / span) * 120.0
}

/// Last lit column for a usage percentage
pub fn lit_through(usage: f64, cols: usize) -> usize {
    let last = cols.saturating_sub(1) as f64;
    (last * (usage.clamp(0.0, 100.0) / 100.0)).floor() as usize
}

/// Render one frame into `keys`
pub fn render(keys: &mut KeyMatrix, base: f64, usage: f64) {
    let cols = keys.cols();
    let lit = lit_through(usage, cols);

    for col in 0..cols {
        let hue = column_hue(base, col, cols) as f32;
        let lightness = if col > lit { DIMMED } else { LIT };
        keys.set_column(col, color::hsl(hue, 1.0, lightness));
    }
}
