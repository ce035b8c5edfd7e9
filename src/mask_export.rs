use crate::catalog::OrganCatalog;
use crate::config::ConvertConfig;
use crate::enums::MissingInputPolicy;
use crate::naming;
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};

use image::GrayImage;
use ndarray::{Array3, Axis};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MaskExportError {
    #[error("label volume not found for patient {0}")]
    MissingLabelVolume(String),

    #[error("failed to load label volume: {0}")]
    Loader(#[from] VolumeLoaderError),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct MaskExtractor;

impl MaskExtractor {
    /// Generate binary PNG masks from per-patient label volumes.
    ///
    /// `seg_root` holds one subdirectory per patient, each containing a label
    /// volume named `<patient_id>_trans.nii.gz` (or `.nii`). For every
    /// requested organ resolvable in `catalog`, one mask per axial slice is
    /// written to `<output_root>/<patient_id>/<organ>/`, foreground 255 where
    /// the voxel label equals the organ's catalog index.
    ///
    /// Patients without a label volume and organ names absent from the
    /// catalog are skipped with a warning under
    /// [`MissingInputPolicy::BestEffort`]; the batch continues. Decode
    /// failures always abort. Returns all written paths in generation order.
    pub fn extract(
        seg_root: impl AsRef<Path>,
        target_organs: &[impl AsRef<str>],
        output_root: impl AsRef<Path>,
        catalog: &OrganCatalog,
        config: &ConvertConfig,
    ) -> Result<Vec<PathBuf>, MaskExportError> {
        let output_root = output_root.as_ref();

        let mut patient_dirs: Vec<PathBuf> = fs::read_dir(seg_root.as_ref())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        patient_dirs.sort_by(|a, b| naming::natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));

        let mut written = Vec::new();
        for patient_dir in patient_dirs {
            let patient_id = match patient_dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_owned(),
                None => continue,
            };

            let Some(label_path) = label_volume_path(&patient_dir, &patient_id) else {
                match config.missing_input {
                    MissingInputPolicy::BestEffort => {
                        warn!(patient = %patient_id, "label volume not found, skipping patient");
                        continue;
                    }
                    MissingInputPolicy::FailFast => {
                        return Err(MaskExportError::MissingLabelVolume(patient_id));
                    }
                }
            };

            info!(patient = %patient_id, "processing segmentation");
            let volume = VolumeLoader::load(&label_path)?;
            let label = oriented_labels(volume.affine()[(0, 0)], volume.affine()[(1, 1)], volume.into_data());

            for organ in target_organs {
                let organ = organ.as_ref();
                let Some(organ_index) = catalog.index_of(organ) else {
                    warn!(organ = %organ, "organ not in catalog, skipping");
                    continue;
                };

                let organ_dir = output_root.join(&patient_id).join(organ);
                fs::create_dir_all(&organ_dir)?;

                for (i, slice) in label.axis_iter(Axis(0)).enumerate() {
                    let (height, width) = slice.dim();
                    let pixels: Vec<u8> = slice
                        .iter()
                        .map(|&v| if v == organ_index as f64 { 255 } else { 0 })
                        .collect();
                    let img = GrayImage::from_vec(width as u32, height as u32, pixels)
                        .expect("mask buffer has the slice's shape");

                    let path = organ_dir.join(naming::mask_slice_name(i));
                    img.save(&path)?;
                    written.push(path);
                }
            }
            info!(patient = %patient_id, "finished generating masks");
        }

        info!(count = written.len(), "all PNG masks generated");
        Ok(written)
    }
}

/// Flip axes whose affine diagonal entry is positive, then move the slice
/// axis to the front so iteration yields 2-D label slices.
fn oriented_labels(a00: f64, a11: f64, mut label: Array3<f64>) -> Array3<f64> {
    if a00 > 0.0 {
        label.invert_axis(Axis(0));
    }
    if a11 > 0.0 {
        label.invert_axis(Axis(1));
    }
    label.permuted_axes([2, 0, 1])
}

fn label_volume_path(patient_dir: &Path, patient_id: &str) -> Option<PathBuf> {
    [
        patient_dir.join(format!("{patient_id}_trans.nii.gz")),
        patient_dir.join(format!("{patient_id}_trans.nii")),
    ]
    .into_iter()
    .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn labeled_volume() -> Array3<f64> {
        // Voxel (0, 1, 2) carries label 1, everything else 0.
        let mut data = Array3::zeros((2, 3, 4));
        data[[0, 1, 2]] = 1.0;
        data
    }

    #[test]
    fn negative_diagonal_leaves_axes_untouched() {
        let label = oriented_labels(-1.0, -1.0, labeled_volume());
        assert_eq!(label.dim(), (4, 2, 3));
        assert_eq!(label[[2, 0, 1]], 1.0);
    }

    #[test]
    fn positive_diagonal_flips_both_axes() {
        let label = oriented_labels(1.0, 1.0, labeled_volume());
        // Axis 0 (len 2): 0 -> 1; axis 1 (len 3): 1 -> 1.
        assert_eq!(label[[2, 1, 1]], 1.0);
        assert_eq!(label[[2, 0, 1]], 0.0);
    }

    #[test]
    fn flips_are_independent_per_axis() {
        let label = oriented_labels(1.0, -1.0, labeled_volume());
        assert_eq!(label[[2, 1, 1]], 1.0);

        let label = oriented_labels(-1.0, 1.0, labeled_volume());
        assert_eq!(label[[2, 0, 1]], 1.0);
    }
}
