//! Column scalers
//!
//! Statistics are captured once at fit time and reused for every later
//! transform. Callers pass only the values that are present on a row.

use dinewise_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Min-max scaling of one column into `[0, 1]`.
///
/// Values outside the fitted range are clamped rather than extrapolated,
/// and a constant column maps every value to 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    data_min: f64,
    data_max: f64,
}

impl MinMaxScaler {
    /// Fit over the finite values of a column; `None` if there are none
    pub fn fit<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut data_min = f64::INFINITY;
        let mut data_max = f64::NEG_INFINITY;
        let mut seen = false;

        for value in values.into_iter().filter(|v| v.is_finite()) {
            data_min = data_min.min(value);
            data_max = data_max.max(value);
            seen = true;
        }

        seen.then_some(Self { data_min, data_max })
    }

    #[inline]
    pub fn transform(&self, value: f64) -> f32 {
        let range = self.data_max - self.data_min;
        if range.abs() <= 1e-12 || !value.is_finite() {
            return 0.0;
        }
        ((value - self.data_min) / range).clamp(0.0, 1.0) as f32
    }
}

/// Zero-mean, unit-variance standardization of `D` columns.
///
/// Uses the population standard deviation; a zero-variance column is only
/// centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler<const D: usize> {
    mean: [f64; D],
    std: [f64; D],
}

impl<const D: usize> StandardScaler<D> {
    pub fn fit(rows: &[[f64; D]]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::DataIntegrity(
                "cannot standardize zero rows".to_string(),
            ));
        }
        let n = rows.len() as f64;

        let mut mean = [0.0; D];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut std = [0.0; D];
        for row in rows {
            for ((s, v), m) in std.iter_mut().zip(row).zip(&mean) {
                let diff = v - m;
                *s += diff * diff;
            }
        }
        for s in &mut std {
            *s = (*s / n).sqrt();
        }

        Ok(Self { mean, std })
    }

    pub fn mean(&self) -> &[f64; D] {
        &self.mean
    }

    pub fn std(&self) -> &[f64; D] {
        &self.std
    }

    pub fn transform(&self, row: &[f64; D]) -> [f64; D] {
        let mut out = [0.0; D];
        for k in 0..D {
            let centered = row[k] - self.mean[k];
            out[k] = if self.std[k] > 1e-10 {
                centered / self.std[k]
            } else {
                centered
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_scaling() {
        let scaler = MinMaxScaler::fit([2.0, 4.0, 10.0]).unwrap();
        assert_eq!(scaler.transform(2.0), 0.0);
        assert_eq!(scaler.transform(10.0), 1.0);
        assert!((scaler.transform(6.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_min_max_clamps_out_of_range() {
        let scaler = MinMaxScaler::fit([0.0, 10.0]).unwrap();
        assert_eq!(scaler.transform(-5.0), 0.0);
        assert_eq!(scaler.transform(25.0), 1.0);
    }

    #[test]
    fn test_min_max_constant_and_empty() {
        let constant = MinMaxScaler::fit([3.0, 3.0]).unwrap();
        assert_eq!(constant.transform(3.0), 0.0);
        assert!(MinMaxScaler::fit(Vec::<f64>::new()).is_none());
        assert!(MinMaxScaler::fit([f64::NAN]).is_none());
    }

    #[test]
    fn test_standard_scaler() {
        let rows = [[1.0, 5.0], [3.0, 5.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        assert_eq!(scaler.mean(), &[2.0, 5.0]);
        assert_eq!(scaler.std(), &[1.0, 0.0]);
        assert_eq!(scaler.transform(&[3.0, 6.0]), [1.0, 1.0]);
    }

    #[test]
    fn test_standard_scaler_rejects_empty() {
        assert!(StandardScaler::<2>::fit(&[]).is_err());
    }
}
