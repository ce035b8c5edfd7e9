use crate::enums::{MissingInputPolicy, SliceOrientation};
use crate::window::CtWindow;

/// UID root for UUID-derived identifiers (study, series, SOP instance).
pub const UID_ROOT: &str = "2.25.";

/// Settings shared by the conversion pipelines.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Prefix for the generated Implementation Class UID in DICOM file meta.
    pub implementation_uid_prefix: String,
    /// Display window used by the rasterizer.
    pub window: CtWindow,
    /// How per-slice orientation attributes are derived.
    pub orientation: SliceOrientation,
    /// Policy for absent required input, shared by all three operations.
    pub missing_input: MissingInputPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            implementation_uid_prefix: UID_ROOT.to_string(),
            window: CtWindow::default(),
            orientation: SliceOrientation::default(),
            missing_input: MissingInputPolicy::default(),
        }
    }
}
