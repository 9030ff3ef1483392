// ABOUTME: Ordinary least-squares polynomial regression for degree 1 and 2 models
// ABOUTME: Solves standardized normal equations and reports R-squared goodness of fit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! Least-squares polynomial regression of VCO2 on VO2.
//!
//! The predictor is standardized before the normal equations are built, which
//! keeps the Gram matrix well conditioned for VO2 expressed in either L/min or
//! ml/min. Coefficients are mapped back to the original scale afterwards.

use gasex_core::constants::{fitting, tolerances};
use gasex_core::{AnalysisStage, ThresholdError};
use serde::Serialize;
use thiserror::Error;

/// Why a regression could not be determined
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitFailure {
    /// Fewer points than coefficients
    #[error("need at least {needed} points for a degree {degree} fit, got {got}")]
    TooFewPoints {
        /// Requested degree
        degree: usize,
        /// Points required
        needed: usize,
        /// Points supplied
        got: usize,
    },

    /// Predictor values are (near-)constant
    #[error("VO2 values are constant (spread {spread:e})")]
    ConstantPredictor {
        /// Standard deviation of the predictor
        spread: f64,
    },

    /// Normal equations are singular
    #[error("design matrix is singular for a degree {degree} fit")]
    Singular {
        /// Requested degree
        degree: usize,
    },

    /// Predictor and response lengths differ
    #[error("VO2 and VCO2 lengths differ ({x} vs {y})")]
    LengthMismatch {
        /// Predictor length
        x: usize,
        /// Response length
        y: usize,
    },

    /// Degree outside the supported range
    #[error("unsupported polynomial degree {0}")]
    UnsupportedDegree(usize),
}

impl FitFailure {
    /// Attribute this failure to a pipeline stage
    #[must_use]
    pub fn at_stage(self, stage: AnalysisStage) -> ThresholdError {
        ThresholdError::degenerate(stage, self.to_string())
    }
}

/// Polynomial with coefficients stored in ascending power order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from ascending-power coefficients (`c0 + c1 x + c2 x^2 ...`)
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Ascending-power coefficients
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient of `x^power`, zero when absent
    #[must_use]
    pub fn coefficient(&self, power: usize) -> f64 {
        self.coefficients.get(power).copied().unwrap_or(0.0)
    }

    /// Evaluate at `x` (Horner)
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc.mul_add(x, c))
    }
}

/// Fitted least-squares model of VCO2 on VO2
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionModel {
    polynomial: Polynomial,
    r_squared: f64,
    points: usize,
}

impl RegressionModel {
    /// Wrap an existing polynomial (used when models come from elsewhere)
    #[must_use]
    pub fn from_polynomial(polynomial: Polynomial, r_squared: f64, points: usize) -> Self {
        Self {
            polynomial,
            r_squared,
            points,
        }
    }

    /// Underlying polynomial
    #[must_use]
    pub const fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Predicted VCO2 at `vo2`
    #[must_use]
    pub fn evaluate(&self, vo2: f64) -> f64 {
        self.polynomial.evaluate(vo2)
    }

    /// Linear coefficient (`b` of a quadratic, `m` of a line)
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.polynomial.coefficient(1)
    }

    /// Constant term
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.polynomial.coefficient(0)
    }

    /// Quadratic coefficient (`a`), zero for a line
    #[must_use]
    pub fn curvature(&self) -> f64 {
        self.polynomial.coefficient(2)
    }

    /// Coefficient of determination (0-1)
    #[must_use]
    pub const fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Number of points the model was fit on
    #[must_use]
    pub const fn points(&self) -> usize {
        self.points
    }
}

/// Ordinary least-squares polynomial fitter
#[derive(Debug, Clone, Copy)]
pub struct PolynomialRegression {
    singularity_tolerance: f64,
}

impl Default for PolynomialRegression {
    fn default() -> Self {
        Self::new(tolerances::SINGULARITY)
    }
}

impl PolynomialRegression {
    /// Create a fitter that treats normal-equation pivots below
    /// `singularity_tolerance * n` as singular
    #[must_use]
    pub const fn new(singularity_tolerance: f64) -> Self {
        Self {
            singularity_tolerance,
        }
    }

    /// Fit a line
    ///
    /// # Errors
    ///
    /// See [`PolynomialRegression::fit`].
    pub fn fit_linear(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel, FitFailure> {
        self.fit(x, y, 1)
    }

    /// Fit a quadratic
    ///
    /// # Errors
    ///
    /// See [`PolynomialRegression::fit`].
    pub fn fit_quadratic(&self, x: &[f64], y: &[f64]) -> Result<RegressionModel, FitFailure> {
        self.fit(x, y, 2)
    }

    /// Fit a polynomial of `degree` minimizing the sum of squared residuals
    ///
    /// # Errors
    ///
    /// Returns a `FitFailure` if the inputs differ in length, there are fewer
    /// than `degree + 1` points, the predictor is constant, or the normal
    /// equations are singular.
    pub fn fit(&self, x: &[f64], y: &[f64], degree: usize) -> Result<RegressionModel, FitFailure> {
        if degree == 0 || degree > fitting::MAX_DEGREE {
            return Err(FitFailure::UnsupportedDegree(degree));
        }
        if x.len() != y.len() {
            return Err(FitFailure::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let needed = degree + 1;
        if x.len() < needed {
            return Err(FitFailure::TooFewPoints {
                degree,
                needed,
                got: x.len(),
            });
        }

        let n = x.len() as f64;
        let mean = x.iter().sum::<f64>() / n;
        let spread = (x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        let magnitude = x.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if spread == 0.0 || spread <= tolerances::CONSTANT_SPREAD * magnitude {
            return Err(FitFailure::ConstantPredictor { spread });
        }

        let size = degree + 1;
        let mut gram = vec![vec![0.0; size]; size];
        let mut rhs = vec![0.0; size];
        for (&xi, &yi) in x.iter().zip(y) {
            let u = (xi - mean) / spread;
            let powers: Vec<f64> = (0..=2 * degree).map(|p| u.powi(p as i32)).collect();
            for (row, gram_row) in gram.iter_mut().enumerate() {
                for (col, cell) in gram_row.iter_mut().enumerate() {
                    *cell += powers[row + col];
                }
                rhs[row] += yi * powers[row];
            }
        }

        let standardized = solve_linear_system(gram, rhs, self.singularity_tolerance * n)
            .ok_or(FitFailure::Singular { degree })?;
        let polynomial = Polynomial::new(unstandardize(&standardized, mean, spread));
        if polynomial.coefficients().iter().any(|c| !c.is_finite()) {
            return Err(FitFailure::Singular { degree });
        }

        let r_squared = r_squared(&polynomial, x, y);
        Ok(RegressionModel::from_polynomial(polynomial, r_squared, x.len()))
    }
}

/// Gaussian elimination with partial pivoting; `None` when a pivot falls below `pivot_floor`
fn solve_linear_system(
    mut matrix: Vec<Vec<f64>>,
    mut rhs: Vec<f64>,
    pivot_floor: f64,
) -> Option<Vec<f64>> {
    let size = rhs.len();
    for col in 0..size {
        let pivot_row = (col..size).max_by(|&a, &b| {
            matrix[a][col].abs().total_cmp(&matrix[b][col].abs())
        })?;
        if matrix[pivot_row][col].abs() < pivot_floor {
            return None;
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        let pivot = matrix[col].clone();
        let pivot_rhs = rhs[col];
        for row in (col + 1)..size {
            let factor = matrix[row][col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for (cell, &p) in matrix[row].iter_mut().zip(&pivot).skip(col) {
                *cell -= factor * p;
            }
            rhs[row] -= factor * pivot_rhs;
        }
    }

    let mut solution = vec![0.0; size];
    for row in (0..size).rev() {
        let tail: f64 = ((row + 1)..size)
            .map(|k| matrix[row][k] * solution[k])
            .sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }
    Some(solution)
}

/// Map coefficients of `p(u)`, `u = (x - mean) / spread`, back to powers of `x`
fn unstandardize(standardized: &[f64], mean: f64, spread: f64) -> Vec<f64> {
    let mut coefficients = vec![0.0; standardized.len()];
    for (j, &alpha) in standardized.iter().enumerate() {
        let scale = alpha / spread.powi(j as i32);
        for (k, coefficient) in coefficients.iter_mut().enumerate().take(j + 1) {
            *coefficient += scale * binomial(j, k) * (-mean).powi((j - k) as i32);
        }
    }
    coefficients
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

fn r_squared(polynomial: &Polynomial, x: &[f64], y: &[f64]) -> f64 {
    let mean_y = y.iter().sum::<f64>() / y.len() as f64;
    let ss_tot: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (yi - polynomial.evaluate(xi)).powi(2))
        .sum();

    if ss_tot <= f64::EPSILON {
        return 1.0;
    }
    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_fit_recovers_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0f64.mul_add(*v, 1.0)).collect();
        let model = PolynomialRegression::default().fit_linear(&x, &y).unwrap();

        assert!((model.slope() - 2.0).abs() < 1e-10);
        assert!((model.intercept() - 1.0).abs() < 1e-10);
        assert!((model.r_squared() - 1.0).abs() < 1e-10);
        assert_eq!(model.points(), 5);
    }

    #[test]
    fn test_quadratic_fit_recovers_exact_parabola() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y: Vec<f64> = x.iter().map(|v| 0.5 * v * v - 3.0 * v + 4.0).collect();
        let model = PolynomialRegression::default().fit_quadratic(&x, &y).unwrap();

        assert!((model.curvature() - 0.5).abs() < 1e-9);
        assert!((model.slope() + 3.0).abs() < 1e-9);
        assert!((model.intercept() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_fit_handles_large_offsets() {
        // VO2 in ml/min
        let x: Vec<f64> = (0..20).map(|i| 800.0 + 50.0 * f64::from(i)).collect();
        let y: Vec<f64> = x.iter().map(|v| 0.0002 * v * v + 0.5 * v + 30.0).collect();
        let model = PolynomialRegression::default().fit_quadratic(&x, &y).unwrap();

        assert!((model.curvature() - 0.0002).abs() < 1e-9);
        assert!((model.slope() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_too_few_points() {
        let err = PolynomialRegression::default()
            .fit_quadratic(&[1.0, 2.0], &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, FitFailure::TooFewPoints { needed: 3, got: 2, .. }));
    }

    #[test]
    fn test_constant_predictor() {
        let err = PolynomialRegression::default()
            .fit_linear(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(err, FitFailure::ConstantPredictor { .. }));
    }

    #[test]
    fn test_two_distinct_values_cannot_fit_quadratic() {
        let err = PolynomialRegression::default()
            .fit_quadratic(&[1.0, 1.0, 2.0, 2.0], &[1.0, 1.5, 2.0, 2.5])
            .unwrap_err();
        assert_eq!(err, FitFailure::Singular { degree: 2 });
    }

    #[test]
    fn test_polynomial_evaluate() {
        let p = Polynomial::new(vec![1.0, -2.0, 3.0]);
        assert!((p.coefficient(2) - 3.0).abs() < f64::EPSILON);
        assert!((p.evaluate(2.0) - 9.0).abs() < f64::EPSILON);
    }
}
