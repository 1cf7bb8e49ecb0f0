//! Python bindings for specification development

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::error::FdsError;
use crate::excitation::{PsdLoad, SineLoad, SweepLoad, TimeHistoryLoad};
use crate::fatigue::FatigueLaw;
use crate::sdof::{Damping, FrequencyAxis};
use crate::spec_dev::SpecificationDevelopment;

/// ERS/FDS calculator exposed to Python
#[pyclass(name = "SpecificationDevelopment")]
pub struct PySpecificationDevelopment {
    inner: SpecificationDevelopment,
}

/// `(start, stop, step)` tuple or an explicit sequence of frequencies
fn extract_axis(freq_data: &PyAny) -> PyResult<FrequencyAxis> {
    if let Ok((start, stop, step)) = freq_data.extract::<(f64, f64, f64)>() {
        return Ok(FrequencyAxis::from_range(start, stop, step)?);
    }
    let values: Vec<f64> = freq_data.extract().map_err(|_| {
        FdsError::invalid("`freq_data` must be a (start, stop, step) tuple or a sequence")
    })?;
    Ok(FrequencyAxis::from_values(values)?)
}

fn fatigue_law(b: Option<f64>, c: Option<f64>, k: Option<f64>) -> PyResult<Option<FatigueLaw>> {
    match (b, c, k) {
        (Some(b), Some(c), Some(k)) => Ok(Some(FatigueLaw::new(b, c, k)?)),
        (None, None, None) => Ok(None),
        _ => Err(FdsError::missing("`b`, `C` and `K` must be given together").into()),
    }
}

#[pymethods]
impl PySpecificationDevelopment {
    /// Create a new calculator
    ///
    /// Args:
    ///     freq_data: (start, stop, step) tuple or array of natural frequencies [Hz]
    ///     damp: Damping ratio (takes priority over Q)
    ///     Q: Quality factor
    ///     b, C, K: Basquin fatigue parameters
    #[new]
    #[pyo3(signature = (freq_data, damp=None, Q=None, b=None, C=None, K=None))]
    #[allow(non_snake_case)]
    fn new(
        freq_data: &PyAny,
        damp: Option<f64>,
        Q: Option<f64>,
        b: Option<f64>,
        C: Option<f64>,
        K: Option<f64>,
    ) -> PyResult<Self> {
        let mut inner =
            SpecificationDevelopment::new(extract_axis(freq_data)?, Damping::resolve(damp, Q)?);
        if let Some(law) = fatigue_law(b, C, K)? {
            inner.set_fatigue_law(law);
        }
        Ok(Self { inner })
    }

    /// Set a sine excitation
    ///
    /// Args:
    ///     sine_freq: Sine frequency [Hz]
    ///     amp: Signal amplitude
    ///     t_total: Total time [s], required for FDS
    ///     exc_type: 'acc', 'vel' or 'disp'
    ///     unit: 'g' or 'ms2'
    #[pyo3(signature = (sine_freq, amp, t_total=None, exc_type="acc", unit="ms2"))]
    fn set_sine_load(
        &mut self,
        sine_freq: f64,
        amp: f64,
        t_total: Option<f64>,
        exc_type: &str,
        unit: &str,
    ) -> PyResult<()> {
        let mut load = SineLoad::new(sine_freq, amp)?
            .with_kind(exc_type.parse()?)?
            .with_unit(unit.parse()?)?;
        if let Some(t_total) = t_total {
            load = load.with_duration(t_total)?;
        }
        self.inner.set_sine_load(load);
        Ok(())
    }

    /// Set a sine sweep excitation
    ///
    /// Args:
    ///     const_amp: Amplitude of each constant-amplitude segment
    ///     const_f_range: Segment breakpoints [Hz], one more than amplitudes
    ///     exc_type: 'acc', 'vel' or 'disp'
    ///     dt: Time step of the damage integral [s]
    ///     sweep_type: 'lin' or 'log', required for FDS
    ///     sweep_rate: Hz/min (lin) or oct/min (log), required for FDS
    ///     unit: 'g' or 'ms2'
    #[pyo3(signature = (const_amp, const_f_range, exc_type="acc", dt=1.0, sweep_type=None, sweep_rate=None, unit="ms2"))]
    #[allow(clippy::too_many_arguments)]
    fn set_sine_sweep_load(
        &mut self,
        const_amp: Vec<f64>,
        const_f_range: Vec<f64>,
        exc_type: &str,
        dt: f64,
        sweep_type: Option<&str>,
        sweep_rate: Option<f64>,
        unit: &str,
    ) -> PyResult<()> {
        let mut load = SweepLoad::new(const_amp, const_f_range)?
            .with_dt(dt)?
            .with_kind(exc_type.parse()?)?
            .with_unit(unit.parse()?)?;
        match (sweep_type, sweep_rate) {
            (Some(sweep_type), Some(sweep_rate)) => {
                load = load.with_sweep(sweep_type.parse()?, sweep_rate)?;
            }
            (None, None) => {}
            _ => {
                return Err(
                    FdsError::missing("`sweep_type` and `sweep_rate` must be given together")
                        .into(),
                )
            }
        }
        self.inner.set_sine_sweep_load(load);
        Ok(())
    }

    /// Set a random excitation
    ///
    /// Args:
    ///     signal_data: (psd, freq) arrays, or (time_data, dt)
    ///     T: Exposure time [s], required for PSD input
    ///     unit: 'g' or 'ms2'
    ///     method: 'convolution' or 'psd_averaging' (time history only)
    ///     bins: Number of Welch blocks for 'psd_averaging'
    #[pyo3(signature = (signal_data, T=None, unit="ms2", method="convolution", bins=None))]
    #[allow(non_snake_case)]
    fn set_random_load(
        &mut self,
        signal_data: &PyAny,
        T: Option<f64>,
        unit: &str,
        method: &str,
        bins: Option<usize>,
    ) -> PyResult<()> {
        let unit = unit.parse()?;

        if let Ok((time_data, dt)) = signal_data.extract::<(Vec<f64>, f64)>() {
            let mut load = TimeHistoryLoad::new(time_data, dt)?
                .with_method(method.parse()?)
                .with_unit(unit);
            if let Some(bins) = bins {
                load = load.with_bins(bins);
            }
            self.inner.set_random_time_load(load);
            return Ok(());
        }

        let (psd, freq): (Vec<f64>, Vec<f64>) = signal_data.extract().map_err(|_| {
            FdsError::invalid("`signal_data` must be a (psd, freq) or (time_data, dt) tuple")
        })?;
        let duration =
            T.ok_or_else(|| FdsError::missing("`T` is required for a PSD excitation"))?;
        self.inner
            .set_random_psd_load(PsdLoad::new(psd, freq, duration)?.with_unit(unit));
        Ok(())
    }

    /// Compute the extreme response spectrum
    ///
    /// Returns:
    ///     ERS as numpy array, one value per natural frequency
    fn get_ers<'py>(&mut self, py: Python<'py>) -> PyResult<&'py PyArray1<f64>> {
        let ers = self.inner.get_ers()?;
        Ok(PyArray1::from_slice(py, ers.values()))
    }

    /// Compute the fatigue damage spectrum
    ///
    /// Args:
    ///     b, C, K: Basquin parameters; the constructor's are used when omitted
    ///
    /// Returns:
    ///     FDS as numpy array, one value per natural frequency
    #[pyo3(signature = (b=None, C=None, K=None))]
    #[allow(non_snake_case)]
    fn get_fds<'py>(
        &mut self,
        py: Python<'py>,
        b: Option<f64>,
        C: Option<f64>,
        K: Option<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let fds = match fatigue_law(b, C, K)? {
            Some(law) => self.inner.get_fds_with(law)?,
            None => self.inner.get_fds()?,
        };
        Ok(PyArray1::from_slice(py, fds.values()))
    }

    /// Most recent ERS, or None
    #[getter]
    fn ers<'py>(&self, py: Python<'py>) -> Option<&'py PyArray1<f64>> {
        self.inner.ers().map(|ers| PyArray1::from_slice(py, ers.values()))
    }

    /// Most recent FDS, or None
    #[getter]
    fn fds<'py>(&self, py: Python<'py>) -> Option<&'py PyArray1<f64>> {
        self.inner.fds().map(|fds| PyArray1::from_slice(py, fds.values()))
    }

    /// Natural frequencies [Hz]
    #[getter]
    fn f0_range<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.inner.axis().values())
    }

    #[getter(Q)]
    fn q(&self) -> f64 {
        self.inner.damping().q()
    }

    #[getter]
    fn damp(&self) -> f64 {
        self.inner.damping().ratio()
    }

    fn __repr__(&self) -> String {
        format!(
            "SpecificationDevelopment(n_f0={}, Q={}, signal_type={})",
            self.inner.axis().len(),
            self.inner.damping().q(),
            self.inner.excitation().map_or("None", |e| e.name())
        )
    }
}
