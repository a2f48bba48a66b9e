use crate::error::{PredictError, Result};
use log::info;
use ndarray::{Array1, Array2, Axis};

/// Runtime feature input at the normalization boundary. Callers hand over
/// either a single pocket's descriptor vector or a pockets x features
/// matrix; both are canonicalized to a matrix before any arithmetic.
pub enum FeatureInput {
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl FeatureInput {
    fn into_matrix(self) -> Array2<f64> {
        match self {
            FeatureInput::Vector(v) => v.insert_axis(Axis(0)),
            FeatureInput::Matrix(m) => m,
        }
    }
}

impl From<Array1<f64>> for FeatureInput {
    fn from(v: Array1<f64>) -> Self {
        FeatureInput::Vector(v)
    }
}

impl From<Array2<f64>> for FeatureInput {
    fn from(m: Array2<f64>) -> Self {
        FeatureInput::Matrix(m)
    }
}

/// Column-wise z-scoring against a fitted reference distribution. The
/// statistics are computed once and stay fixed for the predictor lifetime.
pub struct FeatureNormalizer {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl FeatureNormalizer {
    /// Fit per-column population mean and standard deviation. A column with
    /// zero variance keeps scale 1 so constant features transform to zero
    /// instead of dividing by zero.
    pub fn fit(reference: &Array2<f64>) -> Result<Self> {
        let mean = reference.mean_axis(Axis(0)).ok_or_else(|| {
            PredictError::Invalid("cannot fit a normalizer on an empty reference matrix".into())
        })?;
        let scale = reference
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });
        info!(
            "fitted normalizer on {} reference rows x {} features",
            reference.nrows(),
            reference.ncols()
        );
        Ok(Self { mean, scale })
    }

    /// Apply `(value - mean) / scale` per column.
    pub fn transform(&self, input: impl Into<FeatureInput>) -> Result<Array2<f64>> {
        let matrix = input.into().into_matrix();
        if matrix.ncols() != self.mean.len() {
            return Err(PredictError::Dimension {
                expected: self.mean.len(),
                actual: matrix.ncols(),
            });
        }
        Ok((matrix - &self.mean) / &self.scale)
    }
}
