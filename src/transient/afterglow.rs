//! GRB afterglow light-curve container.
//!
//! Holds one event's observed light curve in a single representation
//! (`DataMode`) together with event metadata, and implements the operations
//! the fitting workflow needs before a sampler ever sees the data:
//!
//! - truncation of prompt-contaminated early points
//! - analytic flux-to-luminosity conversion (k-corrected, rest-frame time)

use log::warn;

use crate::cosmology::Cosmology;
use crate::domain::{BurstClass, DataMode, EventMeta, LightCurvePoint, TruncateMethod};
use crate::error::AppError;

/// Redshift assumed when an event has no measurement.
pub const DEFAULT_REDSHIFT: f64 = 0.75;

/// Positive time error [s] above which an early point counts as prompt.
const PROMPT_TIME_ERR_S: f64 = 0.0025;

/// Points after this time [s] are never prompt-truncated.
const PROMPT_WINDOW_S: f64 = 2.0;

/// An observed GRB afterglow light curve.
#[derive(Debug, Clone)]
pub struct Afterglow {
    name: String,
    burst_class: BurstClass,
    data_mode: DataMode,
    points: Vec<LightCurvePoint>,
    meta: EventMeta,
}

impl Afterglow {
    /// Build a container; the name is normalized to carry the `GRB` prefix.
    pub fn new(
        name: impl Into<String>,
        burst_class: BurstClass,
        data_mode: DataMode,
        points: Vec<LightCurvePoint>,
        meta: EventMeta,
    ) -> Result<Self, AppError> {
        if points.is_empty() {
            return Err(AppError::data("Afterglow has no light-curve points."));
        }
        for (i, p) in points.iter().enumerate() {
            if !(p.time.is_finite() && p.y.is_finite()) {
                return Err(AppError::data(format!(
                    "Afterglow point {i} has non-finite time or value."
                )));
            }
        }

        let name = name.into();
        let name = if name.starts_with("GRB") {
            name
        } else {
            format!("GRB{name}")
        };

        Ok(Self {
            name,
            burst_class,
            data_mode,
            points,
            meta,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Event name without the `GRB` prefix.
    pub fn stripped_name(&self) -> &str {
        self.name.trim_start_matches("GRB")
    }

    pub fn burst_class(&self) -> BurstClass {
        self.burst_class
    }

    pub fn data_mode(&self) -> DataMode {
        self.data_mode
    }

    pub fn meta(&self) -> &EventMeta {
        &self.meta
    }

    pub fn points(&self) -> &[LightCurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Times as a plain vector (seconds; rest-frame in luminosity mode).
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Values as a plain vector, in the units implied by `data_mode`.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Remove prompt-contaminated or pre-peak points.
    ///
    /// Points are only ever removed, never reordered. Returns the number of
    /// points dropped.
    pub fn truncate(&mut self, method: TruncateMethod) -> usize {
        let before = self.points.len();
        match method {
            TruncateMethod::PromptTimeError => {
                // A finely binned (small time error... large relative error)
                // early point belongs to the prompt emission: drop points with
                // sizable positive time error inside the first two seconds.
                self.points.retain(|p| {
                    !(p.time_err.plus > PROMPT_TIME_ERR_S && p.time < PROMPT_WINDOW_S)
                });
            }
            TruncateMethod::LeftOfMax => {
                // First maximum wins on ties.
                let mut max_index = 0;
                for (i, p) in self.points.iter().enumerate() {
                    if p.y > self.points[max_index].y {
                        max_index = i;
                    }
                }
                self.points.drain(..max_index);
            }
            TruncateMethod::Default => {
                // Keep the tail of points with large time errors plus the two
                // points preceding it.
                let tail = self
                    .points
                    .iter()
                    .filter(|p| p.time_err.plus > 0.1)
                    .count();
                let keep = tail + 2;
                if self.points.len() > keep {
                    let to_del = self.points.len() - keep;
                    self.points.drain(..to_del);
                }
            }
        }
        before - self.points.len()
    }

    /// Convert an integrated-flux light curve to isotropic-equivalent
    /// luminosity (units of 1e50 erg/s) with rest-frame times.
    ///
    /// The k-correction is analytic, `(1+z)^(Γ-2)` with Γ the prompt photon
    /// index. Missing metadata falls back with a warning: redshift to
    /// `DEFAULT_REDSHIFT`, photon index to Γ = 2 (which makes the correction
    /// exactly 1).
    pub fn analytical_flux_to_luminosity(
        &mut self,
        cosmology: &dyn Cosmology,
    ) -> Result<(), AppError> {
        match self.data_mode {
            DataMode::Luminosity => {
                warn!("{}: data is already in luminosity mode, nothing to do", self.name);
                return Ok(());
            }
            DataMode::Flux => {}
            other => {
                return Err(AppError::data(format!(
                    "{}: flux-to-luminosity conversion needs flux data, got {other:?}.",
                    self.name
                )));
            }
        }

        let redshift = match self.meta.redshift {
            Some(z) if z.is_finite() => z,
            _ => {
                warn!(
                    "{}: no measured redshift, assuming z = {DEFAULT_REDSHIFT}",
                    self.name
                );
                DEFAULT_REDSHIFT
            }
        };
        let photon_index = match self.meta.photon_index {
            Some(g) if g.is_finite() && g != 0.0 => g,
            _ => {
                warn!(
                    "{}: no photon index, assuming Γ = 2 (no k-correction)",
                    self.name
                );
                2.0
            }
        };

        let dl = cosmology.luminosity_distance_cm(redshift)?;
        let k_corr = (1.0 + redshift).powf(photon_index - 2.0);
        let iso_factor = dl * dl * 4.0 * std::f64::consts::PI * k_corr * 1.0e-50;
        let time_factor = 1.0 / (1.0 + redshift);

        for p in &mut self.points {
            p.y *= iso_factor;
            p.y_err = p.y_err.scale(iso_factor);
            p.time *= time_factor;
            p.time_err = p.time_err.scale(time_factor);
        }
        self.data_mode = DataMode::Luminosity;
        Ok(())
    }
}

/// A short GRB afterglow.
pub fn sgrb(
    name: impl Into<String>,
    data_mode: DataMode,
    points: Vec<LightCurvePoint>,
    meta: EventMeta,
) -> Result<Afterglow, AppError> {
    Afterglow::new(name, BurstClass::Sgrb, data_mode, points, meta)
}

/// A long GRB afterglow.
pub fn lgrb(
    name: impl Into<String>,
    data_mode: DataMode,
    points: Vec<LightCurvePoint>,
    meta: EventMeta,
) -> Result<Afterglow, AppError> {
    Afterglow::new(name, BurstClass::Lgrb, data_mode, points, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::FixedDistance;
    use crate::domain::AsymmetricError;

    fn point(time: f64, time_err: f64, y: f64) -> LightCurvePoint {
        LightCurvePoint {
            time,
            time_err: AsymmetricError::new(time_err, time_err),
            y,
            y_err: AsymmetricError::new(0.1 * y, 0.1 * y),
        }
    }

    fn flux_afterglow(points: Vec<LightCurvePoint>, meta: EventMeta) -> Afterglow {
        Afterglow::new("140903A", BurstClass::Sgrb, DataMode::Flux, points, meta).unwrap()
    }

    #[test]
    fn name_gets_grb_prefix() {
        let ag = flux_afterglow(vec![point(1.0, 0.0, 1.0)], EventMeta::default());
        assert_eq!(ag.name(), "GRB140903A");
        assert_eq!(ag.stripped_name(), "140903A");

        let ag2 = Afterglow::new(
            "GRB060614",
            BurstClass::Lgrb,
            DataMode::Flux,
            vec![point(1.0, 0.0, 1.0)],
            EventMeta::default(),
        )
        .unwrap();
        assert_eq!(ag2.name(), "GRB060614");
    }

    #[test]
    fn prompt_time_error_truncation() {
        // Two prompt points (large time error, early) and two afterglow points.
        let mut ag = flux_afterglow(
            vec![
                point(0.5, 0.01, 5.0),
                point(1.5, 0.01, 4.0),
                point(1.8, 0.001, 3.0), // early but finely binned: kept
                point(100.0, 5.0, 1.0), // late: kept regardless of error
            ],
            EventMeta::default(),
        );
        let dropped = ag.truncate(TruncateMethod::PromptTimeError);
        assert_eq!(dropped, 2);
        let times = ag.times();
        assert_eq!(times, vec![1.8, 100.0]);
    }

    #[test]
    fn left_of_max_truncation() {
        let mut ag = flux_afterglow(
            vec![
                point(1.0, 0.0, 1.0),
                point(2.0, 0.0, 9.0),
                point(3.0, 0.0, 4.0),
            ],
            EventMeta::default(),
        );
        ag.truncate(TruncateMethod::LeftOfMax);
        assert_eq!(ag.times(), vec![2.0, 3.0]);
    }

    #[test]
    fn left_of_max_keeps_first_of_tied_peaks() {
        let mut ag = flux_afterglow(
            vec![
                point(1.0, 0.0, 1.0),
                point(2.0, 0.0, 9.0),
                point(3.0, 0.0, 9.0),
                point(4.0, 0.0, 4.0),
            ],
            EventMeta::default(),
        );
        let dropped = ag.truncate(TruncateMethod::LeftOfMax);
        assert_eq!(dropped, 1);
        assert_eq!(ag.times(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn default_truncation_keeps_tail_plus_two() {
        let mut ag = flux_afterglow(
            vec![
                point(0.1, 0.01, 9.0),
                point(0.2, 0.01, 8.0),
                point(0.3, 0.01, 7.0),
                point(0.4, 0.01, 6.0),
                point(10.0, 1.0, 2.0),
                point(20.0, 2.0, 1.0),
            ],
            EventMeta::default(),
        );
        // Two large-error tail points + two predecessors = keep 4.
        let dropped = ag.truncate(TruncateMethod::Default);
        assert_eq!(dropped, 2);
        assert_eq!(ag.len(), 4);
        assert_eq!(ag.times()[0], 0.3);
    }

    #[test]
    fn flux_to_luminosity_applies_k_correction() {
        let meta = EventMeta {
            redshift: Some(1.0),
            photon_index: Some(2.0),
            t90: None,
        };
        let mut ag = flux_afterglow(vec![point(100.0, 1.0, 1.0e-12)], meta);
        let cosmo = FixedDistance::from_cm(1.0e28).unwrap();
        ag.analytical_flux_to_luminosity(&cosmo).unwrap();

        assert_eq!(ag.data_mode(), DataMode::Luminosity);
        // Γ = 2 → k = 1; L50 = F · 4π dl² · 1e-50.
        let expected = 1.0e-12 * 4.0 * std::f64::consts::PI * 1.0e56 * 1.0e-50;
        let p = &ag.points()[0];
        assert!((p.y - expected).abs() / expected < 1e-12);
        // Rest-frame time contracts by 1+z.
        assert!((p.time - 50.0).abs() < 1e-12);
    }

    #[test]
    fn conversion_requires_flux_mode() {
        let mut ag = Afterglow::new(
            "X",
            BurstClass::Sgrb,
            DataMode::FluxDensity,
            vec![point(1.0, 0.0, 1.0)],
            EventMeta::default(),
        )
        .unwrap();
        let cosmo = FixedDistance::from_cm(1.0e28).unwrap();
        assert!(ag.analytical_flux_to_luminosity(&cosmo).is_err());
    }

    #[test]
    fn conversion_is_noop_in_luminosity_mode() {
        let mut ag = Afterglow::new(
            "X",
            BurstClass::Sgrb,
            DataMode::Luminosity,
            vec![point(1.0, 0.0, 1.0)],
            EventMeta::default(),
        )
        .unwrap();
        let cosmo = FixedDistance::from_cm(1.0e28).unwrap();
        ag.analytical_flux_to_luminosity(&cosmo).unwrap();
        assert_eq!(ag.points()[0].y, 1.0);
    }
}
