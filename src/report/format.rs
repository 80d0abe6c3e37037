//! Formatted terminal summaries.
//!
//! We keep formatting code in one place so:
//! - the containers and model code stay clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{OutputFormat, TdeRunConfig};
use crate::io::ingest::IngestedLightCurve;
use crate::transient::Afterglow;

/// Format the summary of an ingested (and possibly processed) light curve.
pub fn format_light_curve_summary(
    afterglow: &Afterglow,
    ingest: &IngestedLightCurve,
    truncated: Option<usize>,
) -> String {
    let mut out = String::new();

    out.push_str("=== transient - light curve ===\n");
    out.push_str(&format!(
        "Event: {} ({})\n",
        afterglow.name(),
        afterglow.burst_class().display_name()
    ));
    out.push_str(&format!(
        "Mode: {:?} ({})\n",
        afterglow.data_mode(),
        afterglow.data_mode().y_unit_label()
    ));

    let meta = afterglow.meta();
    out.push_str(&format!(
        "Meta: z={} | Γ={} | T90={}\n",
        fmt_opt(meta.redshift),
        fmt_opt(meta.photon_index),
        fmt_opt(meta.t90),
    ));

    out.push_str(&format!(
        "Rows: read={} used={} rejected={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    if let Some(dropped) = truncated {
        out.push_str(&format!("Truncated: {dropped} points dropped\n"));
    }

    let times = afterglow.times();
    let values = afterglow.values();
    let (t_min, t_max) = min_max(&times);
    let (y_min, y_max) = min_max(&values);
    out.push_str(&format!(
        "Points: n={} | t=[{:.3}, {:.3}] s | y=[{:.3e}, {:.3e}] {}\n",
        afterglow.len(),
        t_min,
        t_max,
        y_min,
        y_max,
        afterglow.data_mode().y_unit_label()
    ));

    out
}

/// Format the summary of an evaluated TDE model curve.
pub fn format_model_summary(config: &TdeRunConfig, time_days: &[f64], y: &[f64]) -> String {
    let mut out = String::new();

    out.push_str("=== transient - TDE model ===\n");
    out.push_str(&format!("Model: {}\n", config.kind.display_name()));
    out.push_str(&format!(
        "Setup: z={} | dl={} Mpc | nu={:.3e} Hz\n",
        config.redshift, config.dl_mpc, config.frequency
    ));
    out.push_str(&format!(
        "Grid: n={} | t=[{:.2}, {:.2}] days (observer frame)\n",
        time_days.len(),
        config.time_start,
        config.time_end
    ));

    let (y_min, y_max) = min_max(y);
    match config.output_format {
        OutputFormat::FluxDensity => {
            out.push_str(&format!("Flux density: [{y_min:.4e}, {y_max:.4e}] mJy\n"));
        }
        OutputFormat::Magnitude => {
            out.push_str(&format!("Magnitude: [{y_min:.3}, {y_max:.3}] AB\n"));
        }
    }

    if let Some((t_peak, y_peak)) = peak(time_days, y, config.output_format) {
        out.push_str(&format!(
            "Peak: {y_peak:.4e} {} at {t_peak:.2} days\n",
            config.output_format.unit_label()
        ));
    }

    out
}

/// Peak of the curve: maximum flux density, or minimum (brightest) magnitude.
fn peak(time_days: &[f64], y: &[f64], format: OutputFormat) -> Option<(f64, f64)> {
    let idx = match format {
        OutputFormat::FluxDensity => y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)?,
        OutputFormat::Magnitude => y
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)?,
    };
    Some((*time_days.get(idx)?, y[idx]))
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.4}"),
        None => "-".to_string(),
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AsymmetricError, BurstClass, DataMode, EventMeta, LightCurvePoint, MetzgerTdeParams,
        TdeAnalyticalParams, TdeModelKind,
    };

    #[test]
    fn light_curve_summary_mentions_event_and_mode() {
        let points = vec![LightCurvePoint {
            time: 100.0,
            time_err: AsymmetricError::default(),
            y: 1.0e-12,
            y_err: AsymmetricError::default(),
        }];
        let ag = Afterglow::new(
            "070809",
            BurstClass::Sgrb,
            DataMode::Flux,
            points.clone(),
            EventMeta::default(),
        )
        .unwrap();
        let ingest = IngestedLightCurve {
            points,
            row_errors: vec![],
            rows_read: 1,
            rows_used: 1,
        };

        let text = format_light_curve_summary(&ag, &ingest, Some(3));
        assert!(text.contains("GRB070809"));
        assert!(text.contains("SGRB"));
        assert!(text.contains("erg/cm^2/s"));
        assert!(text.contains("3 points dropped"));
    }

    #[test]
    fn model_summary_mentions_model_and_units() {
        let config = TdeRunConfig {
            kind: TdeModelKind::Metzger,
            metzger: MetzgerTdeParams::new(1.0, 1.0, 0.05, 0.1, 1.0),
            analytical: TdeAnalyticalParams::new(1.0e52, 1.0),
            redshift: 0.05,
            dl_mpc: 230.0,
            frequency: 6.3e14,
            output_format: OutputFormat::FluxDensity,
            time_start: 80.0,
            time_end: 400.0,
            time_steps: 50,
            export_csv: None,
            export_json: None,
        };
        let text = format_model_summary(&config, &[80.0, 400.0], &[0.3, 0.1]);
        assert!(text.contains("metzger_tde"));
        assert!(text.contains("mJy"));
    }
}
