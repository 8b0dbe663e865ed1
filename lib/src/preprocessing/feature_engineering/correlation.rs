//! Autocorrelation and partial autocorrelation over a bounded lag window.

/// Largest autocorrelation lag available for `n` samples: `min(max_lag, n - 1)`.
pub fn autocor_window(n: usize, max_lag: usize) -> usize {
    max_lag.min(n.saturating_sub(1))
}

/// Largest partial autocorrelation lag for `n` samples: `min(max_lag, n / 2 - 1)`.
pub fn pacf_window(n: usize, max_lag: usize) -> usize {
    max_lag.min((n / 2).saturating_sub(1))
}

/// Autocorrelation coefficients for lags `1..=max_lag`.
///
/// `acf(k) = sum((x[t] - m) * (x[t + k] - m)) / sum((x[t] - m)^2)`.
/// The lag count is clipped to `n - 1`. A constant series yields NaN
/// coefficients.
pub fn autocorrelation(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    let lags = autocor_window(n, max_lag);
    if lags == 0 {
        return Vec::new();
    }

    let m = values.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = values.iter().map(|v| v - m).collect();
    let denom: f64 = centered.iter().map(|d| d * d).sum();

    (1..=lags)
        .map(|k| {
            let num: f64 = centered
                .iter()
                .zip(centered.iter().skip(k))
                .map(|(a, b)| a * b)
                .sum();
            if denom == 0.0 {
                f64::NAN
            } else {
                num / denom
            }
        })
        .collect()
}

/// Partial autocorrelation coefficients for lags `1..=max_lag`.
///
/// Computed from the autocorrelations with the Durbin-Levinson recursion.
/// The lag count is clipped to `n / 2 - 1`.
pub fn partial_autocorrelation(values: &[f64], max_lag: usize) -> Vec<f64> {
    let lags = pacf_window(values.len(), max_lag);
    if lags == 0 {
        return Vec::new();
    }
    let acf = autocorrelation(values, lags);
    durbin_levinson(&acf)
}

/// PACF from autocorrelations `r[0] = acf(1), r[1] = acf(2), ...`.
fn durbin_levinson(acf: &[f64]) -> Vec<f64> {
    let lags = acf.len();
    let r = |k: usize| if k == 0 { 1.0 } else { acf[k - 1] };

    let mut pacf = Vec::with_capacity(lags);
    let mut phi: Vec<f64> = Vec::with_capacity(lags);

    for k in 1..=lags {
        let phi_kk = if k == 1 {
            r(1)
        } else {
            let num = r(k) - (1..k).map(|j| phi[j - 1] * r(k - j)).sum::<f64>();
            let den = 1.0 - (1..k).map(|j| phi[j - 1] * r(j)).sum::<f64>();
            if den == 0.0 {
                f64::NAN
            } else {
                num / den
            }
        };

        let mut next: Vec<f64> = (1..k).map(|j| phi[j - 1] - phi_kk * phi[k - j - 1]).collect();
        next.push(phi_kk);
        phi = next;
        pacf.push(phi_kk);
    }

    pacf
}

/// Euclidean norm of the coefficients. NaN when there are none.
pub fn energy(coefficients: &[f64]) -> f64 {
    if coefficients.is_empty() {
        return f64::NAN;
    }
    coefficients.iter().map(|c| c * c).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_windows() {
        assert_eq!(autocor_window(100, 24), 24);
        assert_eq!(autocor_window(10, 24), 9);
        assert_eq!(autocor_window(0, 24), 0);
        assert_eq!(pacf_window(100, 24), 24);
        assert_eq!(pacf_window(10, 24), 4);
        assert_eq!(pacf_window(3, 24), 0);
    }

    #[test]
    fn test_autocorrelation_lag_one() {
        // centered: [-1.5, -0.5, 0.5, 1.5], denom 5
        // lag 1: 0.75 - 0.25 + 0.75 = 1.25
        let acf = autocorrelation(&[1.0, 2.0, 3.0, 4.0], 1);
        assert_eq!(acf.len(), 1);
        assert!((acf[0] - 0.25).abs() < EPS);
    }

    #[test]
    fn test_autocorrelation_alternating() {
        let values = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let acf = autocorrelation(&values, 2);
        // lag 1: -5/6, lag 2: 4/6
        assert!((acf[0] + 5.0 / 6.0).abs() < EPS);
        assert!((acf[1] - 4.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn test_autocorrelation_constant_is_nan() {
        let acf = autocorrelation(&[3.0, 3.0, 3.0], 2);
        assert_eq!(acf.len(), 2);
        assert!(acf.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_pacf_first_lag_equals_acf() {
        let values = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.0, 8.0, 7.0, 9.0];
        let acf = autocorrelation(&values, 4);
        let pacf = partial_autocorrelation(&values, 4);
        assert_eq!(pacf.len(), 4);
        assert!((pacf[0] - acf[0]).abs() < EPS);
    }

    #[test]
    fn test_pacf_second_lag_closed_form() {
        let values = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.0, 8.0, 7.0, 9.0];
        let acf = autocorrelation(&values, 2);
        let pacf = partial_autocorrelation(&values, 2);
        let expected = (acf[1] - acf[0] * acf[0]) / (1.0 - acf[0] * acf[0]);
        assert!((pacf[1] - expected).abs() < EPS);
    }

    #[test]
    fn test_energy() {
        assert!((energy(&[3.0, 4.0]) - 5.0).abs() < EPS);
        assert!(energy(&[]).is_nan());
    }
}
