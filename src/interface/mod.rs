pub use crate::interface::parameters::{Opt, Parameters};
use crate::distance_measure::Euclidean;
use crate::quickshift_base::QuickShift;
use anyhow::{bail, Result};
use log::info;
use ndarray::{Array2, ArrayViewD, Axis, Ix3};

mod parameters;
#[cfg(test)]
mod tests;

/// Parent map (linear indices as real values), gap map and density map, each
/// sized to the first two input dimensions.
pub type QuickShiftResult = (Array2<f64>, Array2<f64>, Array2<f64>);

/// Runs quick shift over a 2-D or 3-D double-precision image.
///
/// A 2-D image is treated as single-channel. Channels only affect how pixel
/// similarity is measured; the three output maps always match the image's
/// row/column extent.
pub fn quickshift(image: ArrayViewD<'_, f64>, parameters: &Parameters) -> Result<QuickShiftResult> {
    if image.ndim() > 3 {
        bail!("image must have at most 3 dimensions.");
    }
    if image.ndim() < 2 {
        bail!("image must have at least 2 dimensions.");
    }
    if !(parameters.sigma > 0.0) || parameters.sigma.is_infinite() {
        bail!("sigma must be a positive finite value.");
    }

    let image = if image.ndim() == 2 {
        image.insert_axis(Axis(2))
    } else {
        image
    };
    let image = image.into_dimensionality::<Ix3>()?;
    let (rows, cols, channels) = image.dim();
    if rows == 0 || cols == 0 {
        bail!("image must not be empty.");
    }

    let tau = parameters.effective_tau();

    if parameters.verbose > 0 {
        info!("quickshift: [rows,cols,channels]: [{},{},{}]", rows, cols, channels);
        info!("quickshift: type: {}", parameters.mode());
        info!("quickshift: sigma:   {}", parameters.sigma);
        info!("quickshift: tau:     {}", tau);
    }

    let mut quickshift = QuickShift::new(Euclidean, image);
    quickshift.set_sigma(parameters.sigma);
    quickshift.set_tau(tau);
    quickshift.set_medoid(parameters.medoid);
    quickshift.process()?;

    let parents = quickshift
        .parents()
        .expect("processed")
        .mapv(|parent| parent as f64);
    let dists = quickshift.dists().expect("processed").clone();
    let density = quickshift.density().expect("processed").clone();
    Ok((parents, dists, density))
}
