use crate::utils::LibData;

pub mod euclidean;
pub mod manhattan;

pub use euclidean::Euclidean;
pub use manhattan::Manhattan;

/// Dissimilarity between two channel vectors. The spatial part of the joint
/// pixel distance is added by the engine, not here.
pub trait DistanceMeasure<A: LibData>
where
    Self: Default + Copy + Clone + Send + Sync,
{
    const NAME: &'static str;

    fn distance(point_a: &[A], point_b: &[A]) -> A;
}
