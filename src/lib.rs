//! # NIfTI-convert library
//!
//! This crate converts NIfTI volumes into the flat, per-slice artifacts that
//! clinical viewers and 2-D training pipelines consume.
//!
//! Three independent pipelines share one input model (a 3-D voxel array plus
//! its 4x4 affine transform) and emit ordered sequences of 2-D artifacts:
//!  - [`DicomExporter`] writes one DICOM secondary-capture file per axial
//!    slice, deriving position, spacing and orientation attributes from the
//!    affine, with a shared study/series identity per converted volume.
//!  - [`RasterExporter`] writes one 8-bit grayscale PNG per axial slice,
//!    mapped through a fixed clinical display window ([`CtWindow`]).
//!  - [`MaskExtractor`] turns integer label volumes into binary PNG masks,
//!    one per (patient, organ class, slice), after orientation correction
//!    driven by the affine diagonal signs.
//!
//! Volumes are assumed to be axis-aligned: off-diagonal affine terms are not
//! interpreted unless [`SliceOrientation::FromAffine`] is selected. Absent
//! input is handled uniformly through [`MissingInputPolicy`]; recoverable
//! per-unit conditions (a patient without a label volume, an unknown organ
//! name) are logged and skipped while decode failures always propagate.
//!
//! # Examples
//!
//! ## Converting a volume to a DICOM series
//!
//! ```no_run
//! # use nifti_convert::{ConvertConfig, DicomExporter};
//! let config = ConvertConfig::default();
//! let files = DicomExporter::export("scans/liver_007.nii.gz", "out/dicom", &config)
//!     .expect("should have converted the volume");
//! println!("wrote {} slices", files.len());
//! ```
//!
//! ## Extracting organ masks
//!
//! ```no_run
//! # use nifti_convert::{ConvertConfig, MaskExtractor, OrganCatalog};
//! let catalog = OrganCatalog::new(["background", "liver", "spleen"]);
//! let config = ConvertConfig::default();
//! let masks = MaskExtractor::extract(
//!     "segmentations",
//!     &["liver"],
//!     "out/masks",
//!     &catalog,
//!     &config,
//! )
//! .expect("should have generated masks");
//! ```

pub mod catalog;
pub mod config;
pub mod dicom_export;
pub mod enums;
pub mod mask_export;
mod naming;
pub mod raster_export;
pub mod volume;
pub mod volume_loader;
pub mod window;

pub use catalog::OrganCatalog;
pub use config::ConvertConfig;
pub use dicom_export::{DicomExportError, DicomExporter};
pub use enums::{MissingInputPolicy, SliceOrientation};
pub use mask_export::{MaskExportError, MaskExtractor};
pub use raster_export::{RasterExportError, RasterExporter};
pub use volume::Volume;
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
pub use window::CtWindow;
