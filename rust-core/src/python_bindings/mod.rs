//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::FdsError;

mod spec_dev_bindings;

impl From<FdsError> for PyErr {
    fn from(err: FdsError) -> Self {
        PyErr::new::<PyValueError, _>(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn fatigue_spectra(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spec_dev_bindings::PySpecificationDevelopment>()?;
    Ok(())
}
