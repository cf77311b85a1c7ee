//! Kernel invocation and morphology-level aggregation.
//!
//! Every analysis pass over a morphology produces the same shape of
//! output: one value per arbor, grouped by neurite type, plus one
//! aggregate for the whole cell. [`invoke_kernel`] is the single entry
//! point reporting layers use; the kernel and the aggregator are plain
//! function values, so each pairing is checked at compile time.

use arbor_types::{Arbor, Morphology};
use rayon::prelude::*;

/// The uniform output shape of a kernel invocation: one entry per arbor
/// plus one morphology-level aggregate.
///
/// # Example
///
/// ```
/// use arbor_measure::{arbor_length, invoke_kernel, total};
/// use arbor_types::{Arbor, Morphology, Point3, Sample, SectionKind, Soma};
///
/// let mut morphology = Morphology::new(Soma::new(Point3::origin(), 2.0));
/// morphology.axons.push(Arbor::with_root(
///     SectionKind::Axon,
///     vec![
///         Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0),
///         Sample::from_coords(1, 0.0, 0.0, 8.0, 1.0),
///     ],
/// ));
///
/// let result = invoke_kernel(&morphology, arbor_length, total);
/// assert_eq!(result.axons_result.len(), 1);
/// assert!((result.morphology_result.unwrap() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult<T> {
    /// Morphology-level aggregate, filled in by the aggregator.
    pub morphology_result: Option<T>,

    /// One entry per axonal arbor.
    pub axons_result: Vec<T>,

    /// One entry per basal dendritic arbor.
    pub basal_dendrites_result: Vec<T>,

    /// One entry per apical dendritic arbor.
    pub apical_dendrites_result: Vec<T>,
}

impl<T> AnalysisResult<T> {
    /// Iterate over all per-arbor entries, in the canonical walk order
    /// (apical, basal, axon).
    pub fn arbor_results(&self) -> impl Iterator<Item = &T> {
        self.apical_dendrites_result
            .iter()
            .chain(self.basal_dendrites_result.iter())
            .chain(self.axons_result.iter())
    }

    /// Total number of per-arbor entries.
    #[must_use]
    pub fn arbor_result_count(&self) -> usize {
        self.apical_dendrites_result.len()
            + self.basal_dendrites_result.len()
            + self.axons_result.len()
    }
}

/// Apply `kernel` to every arbor of a morphology and aggregate.
///
/// The kernel runs once per arbor — fanned out with rayon, since kernels
/// are pure functions of a read-only tree — and the aggregator reduces
/// the per-arbor entries into the `morphology_result` slot.
pub fn invoke_kernel<T, K, A>(morphology: &Morphology, kernel: K, aggregator: A) -> AnalysisResult<T>
where
    T: Send,
    K: Fn(&Arbor) -> T + Sync,
    A: FnOnce(&AnalysisResult<T>) -> T,
{
    let mut result = AnalysisResult {
        morphology_result: None,
        axons_result: morphology.axons.par_iter().map(&kernel).collect(),
        basal_dendrites_result: morphology.basal_dendrites.par_iter().map(&kernel).collect(),
        apical_dendrites_result: morphology
            .apical_dendrites
            .par_iter()
            .map(&kernel)
            .collect(),
    };
    result.morphology_result = Some(aggregator(&result));
    result
}

/// Sum of all per-arbor results.
#[must_use]
pub fn total(result: &AnalysisResult<f64>) -> f64 {
    result.arbor_results().sum()
}

/// Smallest per-arbor result, `0.0` when there are no arbors.
#[must_use]
pub fn minimum(result: &AnalysisResult<f64>) -> f64 {
    reduce_min(result.arbor_results().copied())
}

/// Smallest nonzero per-arbor result.
///
/// Exact-zero entries mean "arbor absent" rather than a true minimum, so
/// they are dropped before reducing. `0.0` when nothing remains.
#[must_use]
pub fn minimum_ignore_zero(result: &AnalysisResult<f64>) -> f64 {
    reduce_min(result.arbor_results().copied().filter(|&v| v != 0.0))
}

/// Largest per-arbor result, `0.0` when there are no arbors.
#[must_use]
pub fn maximum(result: &AnalysisResult<f64>) -> f64 {
    result.arbor_results().copied().fold(0.0, f64::max)
}

/// Mean of the per-arbor results, `0.0` when there are no arbors.
#[must_use]
pub fn average(result: &AnalysisResult<f64>) -> f64 {
    reduce_mean(result.arbor_results().copied())
}

/// Mean of the nonzero per-arbor results.
#[must_use]
pub fn average_ignore_zero(result: &AnalysisResult<f64>) -> f64 {
    reduce_mean(result.arbor_results().copied().filter(|&v| v != 0.0))
}

/// Concatenate per-arbor distributions into one morphology-wide list.
#[must_use]
pub fn concatenate(result: &AnalysisResult<Vec<f64>>) -> Vec<f64> {
    result.arbor_results().flatten().copied().collect()
}

fn reduce_min(values: impl Iterator<Item = f64>) -> f64 {
    let min = values.fold(f64::INFINITY, f64::min);
    if min.is_finite() { min } else { 0.0 }
}

#[allow(clippy::cast_precision_loss)]
// Precision: arbor counts are tiny
fn reduce_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbor::{arbor_length, section_length_distribution};
    use approx::assert_relative_eq;
    use arbor_types::{Point3, Sample, SectionKind, Soma};

    fn straight_arbor(kind: SectionKind, length: f64) -> Arbor {
        Arbor::with_root(
            kind,
            vec![
                Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0),
                Sample::from_coords(1, 0.0, 0.0, length, 1.0),
            ],
        )
    }

    fn test_morphology() -> Morphology {
        let mut morphology = Morphology::new(Soma::new(Point3::origin(), 2.0));
        morphology.axons.push(straight_arbor(SectionKind::Axon, 10.0));
        morphology
            .basal_dendrites
            .push(straight_arbor(SectionKind::BasalDendrite, 4.0));
        morphology
            .basal_dendrites
            .push(straight_arbor(SectionKind::BasalDendrite, 6.0));
        morphology
    }

    #[test]
    fn invoke_produces_one_entry_per_arbor() {
        let morphology = test_morphology();
        let result = invoke_kernel(&morphology, arbor_length, total);

        assert_eq!(result.axons_result.len(), 1);
        assert_eq!(result.basal_dendrites_result.len(), 2);
        assert!(result.apical_dendrites_result.is_empty());
        assert_eq!(result.arbor_result_count(), 3);
        assert_relative_eq!(result.morphology_result.unwrap(), 20.0);
    }

    #[test]
    fn reducers() {
        let result = AnalysisResult {
            morphology_result: None,
            axons_result: vec![10.0],
            basal_dendrites_result: vec![4.0, 6.0],
            apical_dendrites_result: vec![0.0],
        };

        assert_relative_eq!(total(&result), 20.0);
        assert_relative_eq!(minimum(&result), 0.0);
        assert_relative_eq!(minimum_ignore_zero(&result), 4.0);
        assert_relative_eq!(maximum(&result), 10.0);
        assert_relative_eq!(average(&result), 5.0);
        assert_relative_eq!(average_ignore_zero(&result), 20.0 / 3.0);
    }

    #[test]
    fn reducers_on_empty_results() {
        let result: AnalysisResult<f64> = AnalysisResult::default();
        assert_relative_eq!(total(&result), 0.0);
        assert_relative_eq!(minimum(&result), 0.0);
        assert_relative_eq!(minimum_ignore_zero(&result), 0.0);
        assert_relative_eq!(maximum(&result), 0.0);
        assert_relative_eq!(average(&result), 0.0);
        assert_relative_eq!(average_ignore_zero(&result), 0.0);
    }

    #[test]
    fn distribution_kernels_concatenate() {
        let morphology = test_morphology();
        let result = invoke_kernel(&morphology, section_length_distribution, concatenate);

        let all = result.morphology_result.unwrap();
        // Walk order: basal (4, 6), then axon (10).
        assert_eq!(all, vec![4.0, 6.0, 10.0]);
    }
}
