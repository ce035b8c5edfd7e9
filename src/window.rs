use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

/// A clinical display window mapping continuous intensities to 8-bit gray.
///
/// Values at or below `center - width/2` map to 0, values at or above
/// `center + width/2` map to 255, and the range in between is linear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtWindow {
    pub center: f64,
    pub width: f64,
}

impl CtWindow {
    pub fn new(center: f64, width: f64) -> Self {
        Self { center, width }
    }

    /// Standard abdominal soft-tissue window.
    pub fn abdomen() -> Self {
        Self::new(40.0, 400.0)
    }

    /// Apply the window to one slice. Output shape equals input shape.
    pub fn apply(&self, slice: ArrayView2<'_, f64>) -> Array2<u8> {
        let lower = self.center - self.width / 2.0;
        let scale = 255.0 / self.width;
        let dim = slice.dim();
        let pixels: Vec<u8> = slice
            .into_par_iter()
            .map(|&v| ((v - lower) * scale).clamp(0.0, 255.0) as u8)
            .collect();
        Array2::from_shape_vec(dim, pixels).expect("windowed buffer has the slice's shape")
    }
}

impl Default for CtWindow {
    fn default() -> Self {
        Self::abdomen()
    }
}
