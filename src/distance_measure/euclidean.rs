use crate::distance_measure::DistanceMeasure;
use crate::utils::LibData;

/// Squared euclidean distance, the canonical range term for quick shift.
#[derive(Copy, Clone, Default)]
pub struct Euclidean;

impl<A: LibData> DistanceMeasure<A> for Euclidean {
    const NAME: &'static str = "euclidean";

    fn distance(point_a: &[A], point_b: &[A]) -> A {
        point_a
            .iter()
            .zip(point_b.iter())
            .map(|(a, b)| (*a - *b) * (*a - *b))
            .sum()
    }
}
