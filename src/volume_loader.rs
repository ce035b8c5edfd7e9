use crate::volume::Volume;

use ndarray::Ix3;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("volume file not found: {0}")]
    NotFound(PathBuf),

    #[error("expected a 3D volume, got {0} dimensions")]
    NotA3dVolume(usize),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::NiftiError),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a volume from a NIfTI file (`.nii` or `.nii.gz`)
    ///
    /// # Errors
    ///
    /// Returns error if the file is absent, cannot be decoded, or is not 3-D
    pub fn load(path: impl AsRef<Path>) -> Result<Volume, VolumeLoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(VolumeLoaderError::NotFound(path.to_path_buf()));
        }

        let obj = ReaderOptions::new().read_file(path)?;
        let affine = obj.header().affine::<f64>();
        let img = obj.into_volume().into_ndarray::<f64>()?;

        let ndim = img.ndim();
        let data = img
            .into_dimensionality::<Ix3>()
            .map_err(|_| VolumeLoaderError::NotA3dVolume(ndim))?;

        Ok(Volume::new(data, affine))
    }
}
