//! Descriptive statistics over slices of finite values.
//!
//! Statistics that are undefined for the given input (empty slice, zero
//! variance, too few samples) are reported as NaN.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). NaN for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Ascending copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `p` in `[0, 1]` of an ascending slice.
///
/// Linear interpolation between the order statistics around position
/// `(n - 1) * p`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Median of unsorted values.
pub fn median(values: &[f64]) -> f64 {
    quantile_sorted(&sorted(values), 0.5)
}

/// Most frequent value; ties go to the smallest value. `None` when empty.
pub fn mode(values: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &v in values {
        *counts.entry(normalized_bits(v)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(bits, count)| (f64::from_bits(bits), count))
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.total_cmp(va)))
        .map(|(v, _)| v)
}

/// Shannon entropy (natural log) of the empirical distribution of distinct values.
pub fn entropy(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &v in values {
        *counts.entry(normalized_bits(v)).or_insert(0) += 1;
    }
    let n = values.len() as f64;
    counts
        .values()
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.ln()
        })
        .sum()
}

// -0.0 and 0.0 count as the same value.
fn normalized_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Population central moments `(m2, m3, m4)`.
fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let m = mean(values);
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &v in values {
        let d = v - m;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}

/// Skewness `m3 / m2^1.5`.
pub fn skewness(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let (m2, m3, _) = central_moments(values);
    if m2 == 0.0 {
        return f64::NAN;
    }
    m3 / m2.powf(1.5)
}

/// Excess kurtosis `m4 / m2^2 - 3`.
pub fn kurtosis(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let (m2, _, m4) = central_moments(values);
    if m2 == 0.0 {
        return f64::NAN;
    }
    m4 / (m2 * m2) - 3.0
}

/// Coefficient of variation: sample standard deviation over mean.
pub fn variation(values: &[f64]) -> f64 {
    std_dev(values) / mean(values)
}

/// Standard error of the mean: sample standard deviation over `sqrt(n)`.
pub fn sem(values: &[f64]) -> f64 {
    std_dev(values) / (values.len() as f64).sqrt()
}

/// Central-tendency summary: median, mean and the quartiles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantileStats {
    pub median: f64,
    pub mean: f64,
    pub q25: f64,
    pub q75: f64,
}

impl QuantileStats {
    /// Summarize `values`. Every field is NaN for an empty slice.
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::undefined();
        }
        let s = sorted(values);
        Self {
            median: quantile_sorted(&s, 0.5),
            mean: mean(values),
            q25: quantile_sorted(&s, 0.25),
            q75: quantile_sorted(&s, 0.75),
        }
    }

    /// All fields NaN.
    pub fn undefined() -> Self {
        Self {
            median: f64::NAN,
            mean: f64::NAN,
            q25: f64::NAN,
            q75: f64::NAN,
        }
    }

    /// Values in row order: median, mean, q25, q75.
    pub fn to_array(&self) -> [f64; 4] {
        [self.median, self.mean, self.q25, self.q75]
    }

    /// Whether every field is NaN.
    pub fn is_undefined(&self) -> bool {
        self.to_array().iter().all(|v| v.is_nan())
    }
}
