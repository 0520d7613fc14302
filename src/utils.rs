use ndarray::ScalarOperand;
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};
use std::iter::Sum;

pub trait LibData:
    'static
    + Copy
    + Clone
    + Send
    + Sync
    + Default
    + Debug
    + Float
    + FromPrimitive
    + Sum
    + ScalarOperand
    + Display
{
    const NAN: Self;
    const INFINITY: Self;
}

impl LibData for f32 {
    const NAN: Self = Self::NAN;
    const INFINITY: Self = Self::INFINITY;
}

impl LibData for f64 {
    const NAN: Self = Self::NAN;
    const INFINITY: Self = Self::INFINITY;
}
