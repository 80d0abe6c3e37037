//! Pulse-shape models for prompt-emission count series.
//!
//! These are plain rate models (counts per second above background) meant to
//! be fit to `PromptTimeSeries` data by an external sampler. Only the two
//! workhorse shapes are provided: a Gaussian pulse and the classic
//! fast-rise-exponential-decay (FRED) profile.

/// Gaussian pulse: `A exp(-(t - t_peak)^2 / (2 sigma^2))`.
pub fn gaussian_pulse(time: &[f64], amplitude: f64, t_peak: f64, sigma: f64) -> Vec<f64> {
    time.iter()
        .map(|&t| {
            let z = (t - t_peak) / sigma;
            amplitude * (-0.5 * z * z).exp()
        })
        .collect()
}

/// FRED pulse (Norris-style): `A exp(-tau_rise/(t - t_start) - (t - t_start)/tau_decay)`
/// for `t > t_start`, zero before.
pub fn fred_pulse(
    time: &[f64],
    amplitude: f64,
    tau_rise: f64,
    tau_decay: f64,
    t_start: f64,
) -> Vec<f64> {
    time.iter()
        .map(|&t| {
            let dt = t - t_start;
            if dt <= 0.0 {
                0.0
            } else {
                amplitude * (-tau_rise / dt - dt / tau_decay).exp()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_peaks_at_center() {
        let t: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
        let y = gaussian_pulse(&t, 10.0, 5.0, 0.5);
        let peak = y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!((t[peak] - 5.0).abs() < 0.11);
        assert!((y[peak] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn fred_is_zero_before_start_and_asymmetric() {
        let t: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
        let y = fred_pulse(&t, 10.0, 0.2, 2.0, 1.0);
        assert!(t.iter().zip(&y).filter(|(t, _)| **t <= 1.0).all(|(_, v)| *v == 0.0));

        let peak = y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        // Rise is faster than decay: the half-max crossing sits closer to the
        // peak on the left than on the right.
        let half = y[peak] / 2.0;
        let left = y[..peak].iter().position(|v| *v >= half).unwrap();
        let right = peak + y[peak..].iter().position(|v| *v <= half).unwrap();
        assert!(peak - left < right - peak);
    }
}
