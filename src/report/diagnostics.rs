//! Birth-rate distribution diagnostics
//!
//! Computes the data behind the planned distribution plots: histogram bins,
//! a five-number box summary on the log scale, normal Q-Q points, and a
//! Box-Cox transformation profile against a linear model of birth rate on
//! the seven candidate predictors. All outputs are plain data; rendering
//! happens elsewhere.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::models::AnalyticRecord;

/// Lambda grid endpoints and step for the Box-Cox profile
const LAMBDA_GRID: (f64, f64, f64) = (-2.0, 2.0, 0.1);

/// One histogram bin over `[lower, upper)`; the last bin is closed above
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge
    pub upper: f64,
    /// Number of values in the bin
    pub count: usize,
}

/// Five-number summary backing a box/violin rendering
#[derive(Debug, Clone, Serialize)]
pub struct FiveNumber {
    /// Minimum
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Maximum
    pub max: f64,
}

/// One point of the normal quantile-quantile plot
#[derive(Debug, Clone, Serialize)]
pub struct QqPoint {
    /// Theoretical standard-normal quantile
    pub theoretical: f64,
    /// Observed sample quantile
    pub sample: f64,
}

/// Profile log-likelihood of the Box-Cox transformation parameter
#[derive(Debug, Clone, Serialize)]
pub struct BoxCoxProfile {
    /// Evaluated lambda values
    pub lambdas: Vec<f64>,
    /// Profile log-likelihood at each lambda
    pub log_likelihood: Vec<f64>,
    /// Lambda maximizing the profile
    pub best_lambda: f64,
}

/// All birth-rate distribution diagnostics for one run
#[derive(Debug, Clone, Serialize)]
pub struct DistributionDiagnostics {
    /// Histogram of the raw birth rates
    pub histogram: Vec<HistogramBin>,
    /// Box summary of the natural-log birth rates
    pub log_box_summary: FiveNumber,
    /// Normal Q-Q points of the raw birth rates
    pub qq: Vec<QqPoint>,
    /// Box-Cox profile against the candidate linear model
    pub box_cox: BoxCoxProfile,
}

impl DistributionDiagnostics {
    /// Build the diagnostics from the finished analytic table
    ///
    /// Fails if the table is too small to fit the candidate model or holds
    /// a non-positive birth rate (the log scale and the Box-Cox transform
    /// both require strictly positive outcomes).
    pub fn build(records: &[AnalyticRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(PipelineError::DataQuality(
                "cannot compute distribution diagnostics for an empty table".to_string(),
            ));
        }

        let rates: Vec<f64> = records.iter().map(|r| r.birth_rate).collect();
        if let Some(bad) = rates.iter().find(|v| **v <= 0.0 || v.is_nan()) {
            return Err(PipelineError::DataQuality(format!(
                "birth rate {bad} is not strictly positive; log-scale diagnostics undefined"
            )));
        }

        let logs: Vec<f64> = rates.iter().map(|v| v.ln()).collect();
        let (y, x) = design_matrix(records);

        Ok(Self {
            histogram: histogram(&rates, sturges_bins(rates.len())),
            log_box_summary: five_number(&logs),
            qq: normal_qq(&rates),
            box_cox: box_cox_profile(&y, &x)?,
        })
    }
}

/// Sturges' bin count
fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        (n as f64).log2().ceil() as usize + 1
    }
}

/// Equal-width histogram over the observed range
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in values {
        let index = if width == 0.0 {
            0
        } else {
            (((value - min) / width) as usize).min(bins - 1)
        };
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Linear-interpolation quantile of a sorted sample
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    if lo + 1 < n {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    } else {
        sorted[lo]
    }
}

/// Five-number summary of a non-empty sample
#[must_use]
pub fn five_number(values: &[f64]) -> FiveNumber {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    FiveNumber {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}

/// Normal Q-Q points: sample order statistics against standard-normal
/// quantiles at plotting positions (i - 0.5) / n
#[must_use]
pub fn normal_qq(values: &[f64]) -> Vec<QqPoint> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, sample)| QqPoint {
            theoretical: normal_quantile((i as f64 + 0.5) / n as f64),
            sample,
        })
        .collect()
}

/// Inverse standard-normal CDF, Acklam's rational approximation
///
/// Accurate to about 1e-9 over (0, 1), which is far below plotting
/// resolution.
#[must_use]
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    assert!(p > 0.0 && p < 1.0, "quantile probability must be in (0, 1)");

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -((((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0))
    }
}

/// Outcome vector and design matrix (intercept plus the seven candidate
/// predictors) for the birth-rate linear model
fn design_matrix(records: &[AnalyticRecord]) -> (DVector<f64>, DMatrix<f64>) {
    let n = records.len();
    let y = DVector::from_fn(n, |i, _| records[i].birth_rate);
    let x = DMatrix::from_fn(n, 8, |i, j| {
        let r = &records[i];
        match j {
            0 => 1.0,
            1 => r.mother_age,
            2 => r.birth_weight,
            3 => r.bmi,
            4 => r.birth_interval,
            5 => r.pct_single_parent,
            6 => r.prenatal_visits,
            _ => r.urbanicity.ordinal_score(),
        }
    });
    (y, x)
}

/// Residual sum of squares of the least-squares fit of `y` on `x`
fn ols_rss(y: &DVector<f64>, x: &DMatrix<f64>) -> Result<f64> {
    let svd = x.clone().svd(true, true);
    let beta = svd.solve(y, 1e-12).map_err(|msg| {
        PipelineError::DataQuality(format!("least-squares solve failed: {msg}"))
    })?;
    let residuals = y - x * beta;
    Ok(residuals.norm_squared())
}

/// Profile log-likelihood of the Box-Cox parameter over a fixed grid
///
/// For each lambda the outcome is transformed, the candidate model is fit
/// by least squares, and the profile log-likelihood
/// `-(n/2) ln(RSS/n) + (lambda - 1) sum(ln y)` is recorded.
pub fn box_cox_profile(y: &DVector<f64>, x: &DMatrix<f64>) -> Result<BoxCoxProfile> {
    let n = y.len();
    if n <= x.ncols() {
        return Err(PipelineError::DataQuality(format!(
            "{n} rows cannot support a {}-parameter model",
            x.ncols()
        )));
    }

    let sum_ln_y: f64 = y.iter().map(|v| v.ln()).sum();
    let (start, end, step) = LAMBDA_GRID;

    let mut lambdas = Vec::new();
    let mut log_likelihood = Vec::new();
    let mut lambda = start;
    while lambda <= end + step / 2.0 {
        let transformed = DVector::from_fn(n, |i, _| box_cox_transform(y[i], lambda));
        let rss = ols_rss(&transformed, x)?;
        let llf = -(n as f64 / 2.0) * (rss / n as f64).ln() + (lambda - 1.0) * sum_ln_y;
        lambdas.push(lambda);
        log_likelihood.push(llf);
        lambda += step;
    }

    let best = log_likelihood
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| lambdas[i])
        .unwrap_or(1.0);

    Ok(BoxCoxProfile {
        lambdas,
        log_likelihood,
        best_lambda: best,
    })
}

/// The Box-Cox transform; the log transform at lambda near zero
fn box_cox_transform(y: f64, lambda: f64) -> f64 {
    if lambda.abs() < 1e-8 {
        y.ln()
    } else {
        (y.powf(lambda) - 1.0) / lambda
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_cover_all_values() {
        let values = [1.0, 2.0, 2.5, 3.0, 9.9, 10.0];
        let bins = histogram(&values, 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // The maximum lands in the last (closed) bin.
        assert!(bins[2].count >= 1);
    }

    #[test]
    fn five_number_summary_of_a_known_sample() {
        let summary = five_number(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((summary.min - 1.0).abs() < 1e-12);
        assert!((summary.q1 - 2.0).abs() < 1e-12);
        assert!((summary.median - 3.0).abs() < 1e-12);
        assert!((summary.q3 - 4.0).abs() < 1e-12);
        assert!((summary.max - 5.0).abs() < 1e-12);
    }

    #[test]
    fn normal_quantile_is_symmetric_and_monotone() {
        assert!(normal_quantile(0.5).abs() < 1e-9);
        assert!((normal_quantile(0.975) - 1.959_964).abs() < 1e-4);
        assert!((normal_quantile(0.025) + normal_quantile(0.975)).abs() < 1e-9);
        assert!(normal_quantile(0.01) < normal_quantile(0.02));
        assert!(normal_quantile(0.98) < normal_quantile(0.99));
    }

    #[test]
    fn qq_points_are_sorted_in_both_coordinates() {
        let points = normal_qq(&[3.0, 1.0, 2.0, 5.0, 4.0]);
        assert_eq!(points.len(), 5);
        for pair in points.windows(2) {
            assert!(pair[0].theoretical < pair[1].theoretical);
            assert!(pair[0].sample <= pair[1].sample);
        }
    }

    #[test]
    fn box_cox_profile_prefers_identity_for_linear_data() {
        // y is an exact linear function of x plus a deterministic ripple,
        // so the identity transform should sit at or near the peak.
        let n = 60;
        let y = DVector::from_fn(n, |i, _| {
            let xi = i as f64 / n as f64;
            20.0 + 10.0 * xi + 0.05 * (i as f64).sin()
        });
        let x = DMatrix::from_fn(n, 2, |i, j| {
            if j == 0 { 1.0 } else { i as f64 / n as f64 }
        });

        let profile = box_cox_profile(&y, &x).unwrap();
        assert_eq!(profile.lambdas.len(), profile.log_likelihood.len());
        assert!(profile.log_likelihood.iter().all(|v| v.is_finite()));
        assert!(
            (profile.best_lambda - 1.0).abs() <= 1.0,
            "best lambda {} should be near the identity",
            profile.best_lambda
        );
    }

    #[test]
    fn box_cox_transform_degenerates_to_log_at_zero() {
        assert!((box_cox_transform(5.0, 0.0) - 5.0_f64.ln()).abs() < 1e-12);
        assert!((box_cox_transform(5.0, 1.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn too_few_rows_for_the_model_is_an_error() {
        let y = DVector::from_vec(vec![1.0, 2.0]);
        let x = DMatrix::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        assert!(box_cox_profile(&y, &x).is_err());
    }
}
