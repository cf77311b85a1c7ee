//! Soma-projected branch intersection tests.
//!
//! Two branches that leave the soma in nearly the same direction overlap
//! once the skeleton is given thickness. The test projects each branch's
//! initial direction onto the soma sphere, rescales its radius by the same
//! similarity ratio, and compares the great-circle arc between the two
//! projections against the sum of the projected radii. Everything here is
//! read-only.

use arbor_types::{Arbor, Point3, Sample, Soma};

/// Radius assigned to soma profile points for the projected-arc test.
pub const PROFILE_POINT_RADIUS: f64 = 0.1;

/// Check whether two branches overlap when projected onto the soma sphere.
///
/// Each argument is the branch's first sample. The branch direction runs
/// from the soma centroid to that sample; its radius is rescaled onto the
/// sphere by `tan(angle) = r/x` similarity (`r' = r·R/x` for a branch
/// starting at distance `x` from a soma of radius `R`). The branches
/// intersect when the arc between the projected points is shorter than the
/// sum of the projected radii.
///
/// The test is symmetric in its two branch arguments. A branch whose first
/// sample sits on the soma centroid has no direction and never intersects.
///
/// # Example
///
/// ```
/// use arbor_types::{Point3, Sample, Soma};
/// use arbor_verify::branches_intersect;
///
/// let soma = Soma::new(Point3::origin(), 1.0);
/// let a = Sample::from_coords(0, 10.0, 0.0, 0.0, 1.0);
/// let near = Sample::from_coords(0, 10.0, 0.5, 0.0, 1.0);
/// let far = Sample::from_coords(0, 0.0, 10.0, 0.0, 1.0);
///
/// assert!(branches_intersect(&a, &near, &soma));
/// assert!(!branches_intersect(&a, &far, &soma));
/// ```
#[must_use]
pub fn branches_intersect(a: &Sample, b: &Sample, soma: &Soma) -> bool {
    projected_arc_intersects(&a.position, a.radius, &b.position, b.radius, soma)
}

/// Projected-arc test on raw point/radius pairs.
fn projected_arc_intersects(
    point_a: &Point3<f64>,
    radius_a: f64,
    point_b: &Point3<f64>,
    radius_b: f64,
    soma: &Soma,
) -> bool {
    let to_a = point_a - soma.centroid;
    let to_b = point_b - soma.centroid;
    let distance_a = to_a.norm();
    let distance_b = to_b.norm();
    // A point on the centroid has no direction to project.
    if distance_a < f64::EPSILON || distance_b < f64::EPSILON {
        return false;
    }

    let angle = (to_a.dot(&to_b) / (distance_a * distance_b))
        .clamp(-1.0, 1.0)
        .acos();
    let arc_length = angle * soma.mean_radius;

    let projected_a = radius_a * soma.mean_radius / distance_a;
    let projected_b = radius_b * soma.mean_radius / distance_b;

    arc_length < projected_a + projected_b
}

/// First sample of an arbor's root section, if any.
fn initial_sample(arbor: &Arbor) -> Option<&Sample> {
    arbor.root().and_then(|root| root.first_sample())
}

/// Check whether two arbors' initial branches intersect near the soma.
#[must_use]
pub fn arbors_intersect(a: &Arbor, b: &Arbor, soma: &Soma) -> bool {
    match (initial_sample(a), initial_sample(b)) {
        (Some(sample_a), Some(sample_b)) => branches_intersect(sample_a, sample_b, soma),
        _ => false,
    }
}

/// Check whether an axon's initial branch intersects any basal dendrite.
#[must_use]
pub fn axon_intersects_dendrites(axon: &Arbor, dendrites: &[Arbor], soma: &Soma) -> bool {
    dendrites
        .iter()
        .any(|dendrite| arbors_intersect(axon, dendrite, soma))
}

/// Check whether an axon's initial branch intersects an apical dendrite.
#[must_use]
pub fn axon_intersects_apical_dendrite(axon: &Arbor, apical: &Arbor, soma: &Soma) -> bool {
    arbors_intersect(axon, apical, soma)
}

/// Check whether a basal dendrite's initial branch intersects an apical
/// dendrite.
#[must_use]
pub fn dendrite_intersects_apical_dendrite(dendrite: &Arbor, apical: &Arbor, soma: &Soma) -> bool {
    arbors_intersect(dendrite, apical, soma)
}

/// Check whether the tested basal dendrite intersects another basal
/// dendrite *and* is the thinner of the pair.
///
/// Unlike [`branches_intersect`], this check is deliberately asymmetric:
/// of two intersecting dendrites, only the thinner one reports the
/// intersection, so each overlapping pair is acted on exactly once (the
/// thinner branch is the one that gets re-routed or ignored downstream).
#[must_use]
pub fn basal_dendrite_intersects_basal_dendrite(
    tested: &Arbor,
    other: &Arbor,
    soma: &Soma,
) -> bool {
    let (Some(sample_tested), Some(sample_other)) = (initial_sample(tested), initial_sample(other))
    else {
        return false;
    };
    branches_intersect(sample_tested, sample_other, soma) && sample_tested.radius < sample_other.radius
}

/// Indices of soma profile-point pairs that overlap on the soma sphere.
///
/// Profile points are given the fixed [`PROFILE_POINT_RADIUS`]; each
/// unordered pair is reported once, smaller index first.
#[must_use]
pub fn intersecting_profile_point_pairs(soma: &Soma) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..soma.profile_points.len() {
        for j in (i + 1)..soma.profile_points.len() {
            if projected_arc_intersects(
                &soma.profile_points[i],
                PROFILE_POINT_RADIUS,
                &soma.profile_points[j],
                PROFILE_POINT_RADIUS,
                soma,
            ) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
