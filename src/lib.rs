pub mod distance_measure;
pub mod interface;
#[cfg(feature = "python")]
mod python_binding;
mod quickshift_base;
#[cfg(test)]
mod test_utils;
mod utils;

pub use distance_measure::DistanceMeasure;
pub use interface::{quickshift, Parameters, QuickShiftResult};
pub use quickshift_base::{flatmap, QuickShift};
pub use utils::LibData;
