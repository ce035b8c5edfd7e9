#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingInputPolicy {
    /// Absent input is an error for every operation.
    FailFast,
    /// Absent input is reported and the operation yields an empty result,
    /// or skips the affected unit in batch operations.
    #[default]
    BestEffort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SliceOrientation {
    /// Fixed identity orientation: row (1,0,0), column (0,1,0).
    /// Only correct for axis-aligned volumes.
    #[default]
    Identity,
    /// Direction cosines taken from the first two affine columns.
    FromAffine,
}
