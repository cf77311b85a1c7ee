//! Core skeleton types for branching morphologies.
//!
//! This crate provides the foundational data model for reconstructed
//! neuronal (and other branching biological) morphologies:
//!
//! - [`Sample`] - A point-radius pair along a section
//! - [`Section`] - A maximal unbranched run of samples; the tree node
//! - [`Arbor`] - A rooted tree of sections in a flat index arena
//! - [`Soma`] - The cell body: centroid, mean radius, profile points
//! - [`Morphology`] - A soma plus axonal/basal/apical arbor collections
//! - [`Aabb`] - Radius-aware axis-aligned bounding box
//! - Traversal combinators ([`apply_to_arbor`], [`apply_to_morphology`])
//!   fixing the pre-order walk every higher-level operation uses
//!
//! # Layer 0 Crate
//!
//! This crate has no rendering or I/O dependencies. It can be used in CLI
//! tools, servers, WASM, or embedded in larger pipelines. Loaders build
//! the tree, the sibling `arbor-*` crates analyze, repair and verify it,
//! and exporters consume the index numbering it assigns.
//!
//! # Units
//!
//! The library is **unit-agnostic**. All coordinates and radii are `f64`;
//! reconstruction pipelines conventionally use micrometers.
//!
//! # Example
//!
//! ```
//! use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, SkeletonTopology, Soma};
//!
//! let mut morphology = Morphology::new(Soma::new(Point3::origin(), 5.0));
//!
//! let mut axon = Arbor::with_root(
//!     SectionKind::Axon,
//!     vec![
//!         Sample::from_coords(0, 0.0, 0.0, 5.0, 1.2),
//!         Sample::from_coords(1, 0.0, 0.0, 25.0, 1.0),
//!     ],
//! );
//! axon.add_child(0, vec![Sample::from_coords(0, 0.0, 0.0, 25.0, 0.9)]);
//! morphology.axons.push(axon);
//!
//! assert_eq!(morphology.section_count(), 2);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod arbor;
mod bounds;
mod morphology;
mod sample;
mod section;
mod soma;
mod traits;
mod traversal;

// Re-export core types
pub use arbor::Arbor;
pub use bounds::Aabb;
pub use morphology::{parent_sample_index, Morphology, SOMA_MORPHOLOGY_INDEX};
pub use sample::Sample;
pub use section::{Section, SectionKind};
pub use soma::Soma;
pub use traits::{SkeletonBounds, SkeletonTopology};
pub use traversal::{
    apply_to_arbor, apply_to_arbor_mut, apply_to_arbor_with_limit, apply_to_morphology,
    apply_to_morphology_with_limits, BranchOrderLimits,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
