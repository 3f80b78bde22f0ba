//! Small numeric helpers: means and Pearson correlation

use serde::Serialize;

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Pearson correlation coefficient.
///
/// `None` when it is undefined: mismatched lengths, fewer than two points,
/// or a constant series.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let mx = mean(x)?;
    let my = mean(y)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 1e-12 || syy <= 1e-12 {
        return None;
    }

    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Square matrix of pairwise correlations, row/column order = `columns`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `None` where the coefficient is undefined
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// `series[i]` holds the observations of `columns[i]`
    pub fn compute(columns: Vec<String>, series: &[Vec<f64>]) -> Self {
        let values = series
            .iter()
            .map(|x| series.iter().map(|y| pearson(x, y)).collect())
            .collect();
        Self { columns, values }
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.columns.iter().position(|c| c == row)?;
        let c = self.columns.iter().position(|c| c == col)?;
        self.values[r][c]
    }
}
