use crate::interface::{quickshift, Parameters};
use crate::quickshift_base;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

type LibDataType = f64;

#[pyfunction]
fn quickshift_algorithm<'py>(
    py: Python<'py>,
    image: PyReadonlyArrayDyn<'py, LibDataType>,
    sigma: LibDataType,
    tau: Option<LibDataType>,
    options: Option<Vec<String>>,
) -> PyResult<(
    &'py PyArray2<LibDataType>,
    &'py PyArray2<LibDataType>,
    &'py PyArray2<LibDataType>,
)> {
    let mut parameters = Parameters {
        sigma,
        tau,
        ..Parameters::default()
    };
    parameters
        .apply_flags(&options.unwrap_or_default())
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let (parents, dists, density) = quickshift(image.as_array(), &parameters)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok((
        parents.into_pyarray(py),
        dists.into_pyarray(py),
        density.into_pyarray(py),
    ))
}

#[pyfunction]
fn flatmap<'py>(
    py: Python<'py>,
    parents: PyReadonlyArray2<'py, LibDataType>,
) -> PyResult<(&'py PyArray2<i64>, usize)> {
    let parents = parents.as_array().mapv(|parent| parent as usize);
    let (roots, n_modes) = quickshift_base::flatmap(&parents);
    Ok((roots.mapv(|root| root as i64).into_pyarray(py), n_modes))
}

#[pymodule]
fn quickshift_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    let _ = env_logger::try_init();

    m.add_function(wrap_pyfunction!(quickshift_algorithm, m)?)?;
    m.add_function(wrap_pyfunction!(flatmap, m)?)?;

    Ok(())
}
