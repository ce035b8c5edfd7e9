use crate::config::ConvertConfig;
use crate::enums::MissingInputPolicy;
use crate::naming;
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};

use image::GrayImage;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum RasterExportError {
    #[error("failed to load volume: {0}")]
    Loader(#[from] VolumeLoaderError),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct RasterExporter;

impl RasterExporter {
    /// Render every axial slice of a NIfTI volume as an 8-bit grayscale PNG
    /// under `output_dir`, windowed by the configured display window.
    ///
    /// The destination directory is removed and recreated, so it is
    /// exclusively owned by this call's output. Returns the written paths in
    /// natural slice order together with the slice count.
    ///
    /// With [`MissingInputPolicy::BestEffort`] an absent source yields an
    /// empty result instead of an error.
    pub fn export(
        nifti_path: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        config: &ConvertConfig,
    ) -> Result<(Vec<PathBuf>, usize), RasterExportError> {
        let nifti_path = nifti_path.as_ref();
        let output_dir = output_dir.as_ref();

        if !nifti_path.is_file() {
            match config.missing_input {
                MissingInputPolicy::BestEffort => {
                    error!(path = %nifti_path.display(), "NIfTI file not found");
                    return Ok((Vec::new(), 0));
                }
                MissingInputPolicy::FailFast => {
                    return Err(VolumeLoaderError::NotFound(nifti_path.to_path_buf()).into());
                }
            }
        }

        if output_dir.exists() {
            fs::remove_dir_all(output_dir)?;
        }
        fs::create_dir_all(output_dir)?;

        let volume = VolumeLoader::load(nifti_path)?;
        let num_slices = volume.num_slices();

        let mut files = Vec::with_capacity(num_slices);
        for i in 0..num_slices {
            let gray = config.window.apply(volume.slice(i));
            let (height, width) = gray.dim();
            let img = GrayImage::from_vec(width as u32, height as u32, gray.into_raw_vec())
                .expect("windowed buffer has the slice's shape");

            let path = output_dir.join(naming::raster_slice_name(i));
            img.save(&path)?;
            files.push(path);
        }

        // Slices are emitted in increasing index order already; the explicit
        // sort keeps the ordering guarantee independent of how the list was
        // assembled.
        files.sort_by(|a, b| naming::natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));

        info!(dir = %output_dir.display(), slices = num_slices, "slice rasters saved");
        Ok((files, num_slices))
    }
}
