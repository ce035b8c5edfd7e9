use crate::enums::SliceOrientation;

use nalgebra::{Matrix4, Vector4};
use ndarray::{Array3, ArrayView2, s};

/// A decoded 3-D volume of intensity samples together with its voxel-to-world
/// affine transform. Axis 2 is the slice axis.
pub struct Volume {
    data: Array3<f64>,
    affine: Matrix4<f64>,
}

impl Volume {
    pub fn new(data: Array3<f64>, affine: Matrix4<f64>) -> Self {
        Self { data, affine }
    }

    /// Get the dimensions of the volume (x, y, z)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn num_slices(&self) -> usize {
        self.data.dim().2
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    pub fn into_data(self) -> Array3<f64> {
        self.data
    }

    pub fn affine(&self) -> &Matrix4<f64> {
        &self.affine
    }

    /// Axial cross-section at the given slice index.
    pub fn slice(&self, index: usize) -> ArrayView2<'_, f64> {
        self.data.slice(s![.., .., index])
    }

    /// Physical position of slice `index`: the first three components of
    /// affine · (0, 0, index, 1).
    pub fn slice_position(&self, index: usize) -> [f64; 3] {
        let pos = self.affine * Vector4::new(0.0, 0.0, index as f64, 1.0);
        [pos.x, pos.y, pos.z]
    }

    /// In-plane physical pixel spacing (|a00|, |a11|).
    pub fn pixel_spacing(&self) -> (f64, f64) {
        (self.affine[(0, 0)].abs(), self.affine[(1, 1)].abs())
    }

    /// Physical slice thickness |a22|.
    pub fn slice_thickness(&self) -> f64 {
        self.affine[(2, 2)].abs()
    }

    /// Row and column direction cosines for the requested orientation mode.
    pub fn orientation(&self, mode: SliceOrientation) -> ([f64; 3], [f64; 3]) {
        match mode {
            SliceOrientation::Identity => ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            SliceOrientation::FromAffine => {
                let row = Self::unit_column(&self.affine, 0, [1.0, 0.0, 0.0]);
                let col = Self::unit_column(&self.affine, 1, [0.0, 1.0, 0.0]);
                (row, col)
            }
        }
    }

    fn unit_column(affine: &Matrix4<f64>, col: usize, fallback: [f64; 3]) -> [f64; 3] {
        let c = affine.fixed_slice::<3, 1>(0, col);
        let norm = c.norm();
        if norm > 1e-12 {
            [c[0] / norm, c[1] / norm, c[2] / norm]
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::SliceOrientation;
    use ndarray::Array3;

    fn diag_volume(sx: f64, sy: f64, sz: f64, t: [f64; 3]) -> Volume {
        let mut affine = Matrix4::identity();
        affine[(0, 0)] = sx;
        affine[(1, 1)] = sy;
        affine[(2, 2)] = sz;
        affine[(0, 3)] = t[0];
        affine[(1, 3)] = t[1];
        affine[(2, 3)] = t[2];
        Volume::new(Array3::zeros((4, 5, 6)), affine)
    }

    #[test]
    fn slice_position_follows_affine() {
        let volume = diag_volume(1.0, 2.0, 3.0, [5.0, 6.0, 7.0]);
        assert_eq!(volume.slice_position(0), [5.0, 6.0, 7.0]);
        assert_eq!(volume.slice_position(2), [5.0, 6.0, 13.0]);
    }

    #[test]
    fn spacing_and_thickness_are_absolute() {
        let volume = diag_volume(-1.5, 2.0, -3.0, [0.0; 3]);
        assert_eq!(volume.pixel_spacing(), (1.5, 2.0));
        assert_eq!(volume.slice_thickness(), 3.0);
    }

    #[test]
    fn identity_orientation_ignores_affine() {
        let volume = diag_volume(-1.0, -1.0, 1.0, [0.0; 3]);
        let (row, col) = volume.orientation(SliceOrientation::Identity);
        assert_eq!(row, [1.0, 0.0, 0.0]);
        assert_eq!(col, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn derived_orientation_normalizes_columns() {
        let volume = diag_volume(-2.0, 4.0, 1.0, [0.0; 3]);
        let (row, col) = volume.orientation(SliceOrientation::FromAffine);
        assert_eq!(row, [-1.0, 0.0, 0.0]);
        assert_eq!(col, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn slice_views_share_volume_shape() {
        let volume = diag_volume(1.0, 1.0, 1.0, [0.0; 3]);
        assert_eq!(volume.num_slices(), 6);
        assert_eq!(volume.slice(3).dim(), (4, 5));
    }
}
