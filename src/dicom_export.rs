use crate::config::{ConvertConfig, UID_ROOT};
use crate::enums::MissingInputPolicy;
use crate::naming;
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};

use chrono::Local;
use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::object::{FileDicomObject, FileMetaTableBuilder};
use dicom::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dicom_dictionary_std::tags;
use ndarray::ArrayView2;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Secondary Capture Image Storage
const SECONDARY_CAPTURE_SOP_CLASS: &str = "1.2.840.10008.5.1.4.1.1.7";

#[derive(Debug, Error)]
pub enum DicomExportError {
    #[error("cannot derive a patient identifier from {0}")]
    InvalidFileName(PathBuf),

    #[error("failed to load volume: {0}")]
    Loader(#[from] VolumeLoaderError),

    #[error("failed to build DICOM file meta: {0}")]
    Meta(#[from] dicom::object::meta::Error),

    #[error("failed to write DICOM file: {0}")]
    Write(#[from] dicom::object::WriteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct DicomExporter;

impl DicomExporter {
    /// Convert a NIfTI volume into one DICOM secondary-capture file per
    /// axial slice, grouped under `<output_root>/<patient_id>/`.
    ///
    /// All slices share one freshly generated study/series UID pair; each
    /// slice gets its own SOP instance UID. Returns the written paths in
    /// increasing slice order.
    ///
    /// # Errors
    ///
    /// Returns error if the volume cannot be decoded or a file cannot be
    /// written. An absent source file follows the configured
    /// [`MissingInputPolicy`].
    pub fn export(
        nifti_path: impl AsRef<Path>,
        output_root: impl AsRef<Path>,
        config: &ConvertConfig,
    ) -> Result<Vec<PathBuf>, DicomExportError> {
        let nifti_path = nifti_path.as_ref();
        if !nifti_path.is_file() {
            match config.missing_input {
                MissingInputPolicy::BestEffort => {
                    warn!(path = %nifti_path.display(), "NIfTI file not found, nothing to convert");
                    return Ok(Vec::new());
                }
                MissingInputPolicy::FailFast => {
                    return Err(VolumeLoaderError::NotFound(nifti_path.to_path_buf()).into());
                }
            }
        }

        info!(path = %nifti_path.display(), "loading NIfTI for DICOM conversion");
        let volume = VolumeLoader::load(nifti_path)?;
        let patient_id = naming::patient_id(nifti_path)
            .ok_or_else(|| DicomExportError::InvalidFileName(nifti_path.to_path_buf()))?;

        let series_dir = output_root.as_ref().join(patient_id);
        fs::create_dir_all(&series_dir)?;

        let study_uid = generate_uid(UID_ROOT);
        let series_uid = generate_uid(UID_ROOT);
        let now = Local::now();
        let study_date = now.format("%Y%m%d").to_string();
        let study_time = now.format("%H%M%S").to_string();

        let (row_vec, col_vec) = volume.orientation(config.orientation);
        let orientation = fmt_ds([
            row_vec[0], row_vec[1], row_vec[2], col_vec[0], col_vec[1], col_vec[2],
        ]);
        let (sx, sy) = volume.pixel_spacing();
        let pixel_spacing = fmt_ds([sx, sy]);
        let slice_thickness = volume.slice_thickness().to_string();

        let mut files = Vec::with_capacity(volume.num_slices());
        for i in 0..volume.num_slices() {
            let slice = volume.slice(i);
            let (rows, cols) = slice.dim();
            let [px, py, pz] = volume.slice_position(i);

            let sop_instance_uid = generate_uid(UID_ROOT);
            let meta = FileMetaTableBuilder::new()
                .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN.uid())
                .media_storage_sop_class_uid(SECONDARY_CAPTURE_SOP_CLASS)
                .media_storage_sop_instance_uid(&sop_instance_uid)
                .implementation_class_uid(generate_uid(&config.implementation_uid_prefix))
                .build()?;
            let mut obj = FileDicomObject::new_empty_with_dict_and_meta(
                dicom::dictionary_std::StandardDataDictionary,
                meta,
            );

            obj.put(DataElement::new(
                tags::PATIENT_NAME,
                VR::PN,
                PrimitiveValue::from(format!("Patient^{patient_id}")),
            ));
            obj.put(DataElement::new(
                tags::PATIENT_ID,
                VR::LO,
                PrimitiveValue::from(patient_id),
            ));
            obj.put(DataElement::new(
                tags::MODALITY,
                VR::CS,
                PrimitiveValue::from("CT"),
            ));
            obj.put(DataElement::new(
                tags::STUDY_INSTANCE_UID,
                VR::UI,
                PrimitiveValue::from(study_uid.as_str()),
            ));
            obj.put(DataElement::new(
                tags::SERIES_INSTANCE_UID,
                VR::UI,
                PrimitiveValue::from(series_uid.as_str()),
            ));
            obj.put(DataElement::new(
                tags::SOP_INSTANCE_UID,
                VR::UI,
                PrimitiveValue::from(sop_instance_uid.as_str()),
            ));
            obj.put(DataElement::new(
                tags::SOP_CLASS_UID,
                VR::UI,
                PrimitiveValue::from(SECONDARY_CAPTURE_SOP_CLASS),
            ));
            obj.put(DataElement::new(
                tags::STUDY_DATE,
                VR::DA,
                PrimitiveValue::from(study_date.as_str()),
            ));
            obj.put(DataElement::new(
                tags::STUDY_TIME,
                VR::TM,
                PrimitiveValue::from(study_time.as_str()),
            ));
            obj.put(DataElement::new(
                tags::ROWS,
                VR::US,
                PrimitiveValue::from(rows as u16),
            ));
            obj.put(DataElement::new(
                tags::COLUMNS,
                VR::US,
                PrimitiveValue::from(cols as u16),
            ));
            obj.put(DataElement::new(
                tags::INSTANCE_NUMBER,
                VR::IS,
                PrimitiveValue::from((i + 1).to_string()),
            ));
            obj.put(DataElement::new(
                tags::IMAGE_POSITION_PATIENT,
                VR::DS,
                PrimitiveValue::from(fmt_ds([px, py, pz])),
            ));
            obj.put(DataElement::new(
                tags::IMAGE_ORIENTATION_PATIENT,
                VR::DS,
                PrimitiveValue::from(orientation.as_str()),
            ));
            obj.put(DataElement::new(
                tags::PIXEL_SPACING,
                VR::DS,
                PrimitiveValue::from(pixel_spacing.as_str()),
            ));
            obj.put(DataElement::new(
                tags::SLICE_THICKNESS,
                VR::DS,
                PrimitiveValue::from(slice_thickness.as_str()),
            ));
            obj.put(DataElement::new(
                tags::SAMPLES_PER_PIXEL,
                VR::US,
                PrimitiveValue::from(1_u16),
            ));
            obj.put(DataElement::new(
                tags::PHOTOMETRIC_INTERPRETATION,
                VR::CS,
                PrimitiveValue::from("MONOCHROME2"),
            ));
            obj.put(DataElement::new(
                tags::BITS_ALLOCATED,
                VR::US,
                PrimitiveValue::from(16_u16),
            ));
            obj.put(DataElement::new(
                tags::BITS_STORED,
                VR::US,
                PrimitiveValue::from(16_u16),
            ));
            obj.put(DataElement::new(
                tags::HIGH_BIT,
                VR::US,
                PrimitiveValue::from(15_u16),
            ));
            obj.put(DataElement::new(
                tags::PIXEL_REPRESENTATION,
                VR::US,
                PrimitiveValue::from(1_u16),
            ));
            obj.put(DataElement::new(
                tags::PIXEL_DATA,
                VR::OW,
                PrimitiveValue::from(pixel_bytes(&slice)),
            ));

            let path = series_dir.join(naming::dicom_slice_name(i));
            obj.write_to_file(&path)?;
            files.push(path);
        }

        info!(series = %series_dir.display(), "DICOM series saved");
        Ok(files)
    }
}

/// Samples cast to signed 16-bit, explicit little endian.
fn pixel_bytes(slice: &ArrayView2<'_, f64>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(slice.len() * 2);
    for &v in slice.iter() {
        bytes.extend_from_slice(&(v as i16).to_le_bytes());
    }
    bytes
}

fn fmt_ds<const N: usize>(values: [f64; N]) -> String {
    values.map(|v| v.to_string()).join("\\")
}

fn generate_uid(prefix: &str) -> String {
    let mut uid = format!("{prefix}{}", Uuid::new_v4().as_u128());
    uid.truncate(64);
    uid
}
