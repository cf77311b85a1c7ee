//! Error types for skeleton repair operations.

use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during skeleton repair.
///
/// A repair error is scoped to the arbor being repaired: callers may skip
/// the offending arbor, abort the whole morphology, or hand it over for
/// manual repair. Sibling arbors already processed are never affected.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Extent removal was attempted on a section too small to survive it.
    #[error(
        "section {section_id} is unrepairable: cannot remove samples from a section with {sample_count} sample(s)"
    )]
    UnrepairableSection {
        /// Arena index of the offending section.
        section_id: usize,
        /// Number of samples the section had when repair was attempted.
        sample_count: usize,
    },

    /// A direction vector was required but the leading samples coincide.
    #[error("section {section_id} has no well-defined direction (coincident leading samples)")]
    DegenerateDirection {
        /// Arena index of the offending section.
        section_id: usize,
    },
}
