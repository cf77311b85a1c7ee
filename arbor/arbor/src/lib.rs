//! Skeleton toolkit for branching biological morphologies.
//!
//! This umbrella crate re-exports the `arbor-*` family, providing a
//! unified API for reconstructing, verifying, repairing and measuring the
//! skeletal trees of neuronal arbors and similar branching structures.
//!
//! # Quick Start
//!
//! ```
//! use arbor::prelude::*;
//!
//! // Build a morphology (normally a loader does this).
//! let mut morphology = Morphology::new(Soma::new(Point3::origin(), 4.0));
//! let mut dendrite = Arbor::with_root(
//!     SectionKind::BasalDendrite,
//!     vec![
//!         Sample::from_coords(0, 0.0, 0.0, 4.0, 1.0),
//!         Sample::from_coords(1, 0.0, 0.0, 16.0, 0.9),
//!     ],
//! );
//! dendrite.add_child(
//!     0,
//!     vec![
//!         Sample::from_coords(0, 0.0, 0.0, 16.0, 0.8),
//!         Sample::from_coords(1, 0.0, 0.5, 16.5, 0.8),
//!         Sample::from_coords(2, 0.0, 4.0, 28.0, 0.7),
//!     ],
//! );
//! dendrite.label_primary_children();
//! morphology.basal_dendrites.push(dendrite);
//!
//! // Diagnose, repair, measure.
//! let report = verify_morphology(&morphology, &VerifyOptions::default());
//! let summary = resample_morphology(&mut morphology, &ResampleParams::default());
//! assert!(summary.is_complete());
//!
//! let lengths = invoke_kernel(&morphology, arbor::measure::arbor_length, arbor::measure::total);
//! assert!(lengths.morphology_result.unwrap() > 0.0);
//! # let _ = report;
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Data model: `Sample`, `Section`, `Arbor`, `Soma`,
//!   `Morphology`, bounds, traversal combinators
//! - [`measure`] - Geometric kernels, `AnalysisResult`, reducers
//! - [`repair`] - Resampling engine and its typed failures
//! - [`verify`] - Structural checks and soma-projected intersections
//!
//! # Feature Flags
//!
//! - `serde` - Serialize/deserialize the data model

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Data model: samples, sections, arbors, somata, morphologies.
pub use arbor_types as types;

/// Geometric analysis kernels and aggregation.
pub use arbor_measure as measure;

/// Resampling and topological repair.
pub use arbor_repair as repair;

/// Structural verification and intersection checks.
pub use arbor_verify as verify;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for skeleton processing.
///
/// # Usage
///
/// ```
/// use arbor::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use arbor_types::{
        Aabb, Arbor, Morphology, Point3, Sample, Section, SectionKind, SkeletonBounds,
        SkeletonTopology, Soma, Vector3,
    };

    // Traversal
    pub use arbor_types::{apply_to_arbor, apply_to_morphology, BranchOrderLimits};

    // Analysis
    pub use arbor_measure::{invoke_kernel, morphology_stats, AnalysisResult, MorphologyStats};

    // Repair
    pub use arbor_repair::{resample_arbor, resample_morphology, RepairError, ResampleParams};

    // Verification
    pub use arbor_verify::{verify_morphology, VerificationReport, VerifyOptions};
}

// =============================================================================
// Tests
// =============================================================================
