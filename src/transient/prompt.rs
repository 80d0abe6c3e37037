//! Binned prompt-emission count series.

use crate::error::AppError;

/// Binned detector counts for one burst's prompt emission.
///
/// Count errors are Poissonian, `sqrt(counts)`. Rates divide counts by the
/// bin size, which must be uniform and positive.
#[derive(Debug, Clone)]
pub struct PromptTimeSeries {
    name: String,
    time: Vec<f64>,
    bin_size: f64,
    counts: Vec<f64>,
}

impl PromptTimeSeries {
    pub fn new(
        name: impl Into<String>,
        time: Vec<f64>,
        bin_size: f64,
        counts: Vec<f64>,
    ) -> Result<Self, AppError> {
        if time.is_empty() {
            return Err(AppError::data("Prompt series has no bins."));
        }
        if time.len() != counts.len() {
            return Err(AppError::data(format!(
                "Prompt series has {} times but {} count bins.",
                time.len(),
                counts.len()
            )));
        }
        if !(bin_size.is_finite() && bin_size > 0.0) {
            return Err(AppError::data(format!(
                "Bin size must be finite and positive, got {bin_size}."
            )));
        }
        if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(AppError::data("Prompt counts must be finite and non-negative."));
        }

        let name = name.into();
        let name = if name.starts_with("GRB") {
            name
        } else {
            format!("GRB{name}")
        };

        Ok(Self {
            name,
            time,
            bin_size,
            counts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Poisson count errors, `sqrt(counts)`.
    pub fn count_errors(&self) -> Vec<f64> {
        self.counts.iter().map(|c| c.sqrt()).collect()
    }

    /// Count rates [counts/s].
    pub fn rates(&self) -> Vec<f64> {
        self.counts.iter().map(|c| c / self.bin_size).collect()
    }

    /// Rate errors [counts/s], `sqrt(counts) / bin_size`.
    pub fn rate_errors(&self) -> Vec<f64> {
        self.counts
            .iter()
            .map(|c| c.sqrt() / self.bin_size)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_and_errors() {
        let series = PromptTimeSeries::new(
            "910505",
            vec![0.0, 0.064, 0.128],
            0.064,
            vec![100.0, 400.0, 25.0],
        )
        .unwrap();
        assert_eq!(series.name(), "GRB910505");
        assert_eq!(series.rates()[1], 400.0 / 0.064);
        assert_eq!(series.count_errors()[1], 20.0);
        assert_eq!(series.rate_errors()[2], 5.0 / 0.064);
    }

    #[test]
    fn rejects_mismatched_and_negative_input() {
        assert!(PromptTimeSeries::new("X", vec![0.0, 1.0], 1.0, vec![1.0]).is_err());
        assert!(PromptTimeSeries::new("X", vec![0.0], 0.0, vec![1.0]).is_err());
        assert!(PromptTimeSeries::new("X", vec![0.0], 1.0, vec![-1.0]).is_err());
        assert!(PromptTimeSeries::new("X", vec![], 1.0, vec![]).is_err());
    }
}
