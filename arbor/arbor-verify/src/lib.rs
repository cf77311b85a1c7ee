//! Read-only structural verification for morphology skeletons.
//!
//! This crate diagnoses trees built by loaders before they are repaired
//! or meshed:
//!
//! - **Structural checks** ([`verify_arbor`], [`verify_morphology`]):
//!   degenerate sample counts, short sections and segments, duplicate
//!   samples, odd child counts, radius inversions
//! - **Soma-projected intersection tests** ([`branches_intersect`] and
//!   its neurite-type variants): branches that overlap where they leave
//!   the soma
//!
//! All checks are diagnostics. Nothing mutates the tree, nothing returns
//! `Err`; the output is a [`VerificationReport`] of [`Issue`]s graded
//! Info / Warning / Error for the caller to act on.
//!
//! # Example
//!
//! ```
//! use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, Soma};
//! use arbor_verify::{verify_morphology, VerifyOptions};
//!
//! let mut morphology = Morphology::new(Soma::new(Point3::origin(), 3.0));
//! morphology.axons.push(Arbor::with_root(
//!     SectionKind::Axon,
//!     vec![Sample::from_coords(0, 0.0, 0.0, 5.0, 1.0)], // single sample
//! ));
//!
//! let report = verify_morphology(&morphology, &VerifyOptions::default());
//! assert_eq!(report.error_count(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod checks;
mod intersect;
mod issues;

pub use checks::{verify_arbor, verify_morphology, VerificationReport, VerifyOptions};
pub use intersect::{
    arbors_intersect, axon_intersects_apical_dendrite, axon_intersects_dendrites,
    basal_dendrite_intersects_basal_dendrite, branches_intersect,
    dendrite_intersects_apical_dendrite, intersecting_profile_point_pairs,
    PROFILE_POINT_RADIUS,
};
pub use issues::{Issue, IssueKind, IssueSeverity};
