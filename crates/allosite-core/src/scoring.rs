use crate::error::{PredictError, Result};
use log::info;
use ndarray::{Array1, Array2};

/// Raw per-pocket scores: dot product of each feature row with the
/// consolidated weight vector.
pub fn score_pockets(features: &Array2<f64>, weights: &Array1<f64>) -> Result<Array1<f64>> {
    if features.ncols() != weights.len() {
        return Err(PredictError::Dimension {
            expected: weights.len(),
            actual: features.ncols(),
        });
    }
    info!("scoring {} pockets", features.nrows());
    Ok(features.dot(weights))
}

/// Probability distribution over pockets. The maximum score is subtracted
/// before exponentiation so large or strongly negative scores cannot
/// overflow.
pub fn softmax(scores: &Array1<f64>) -> Array1<f64> {
    let max = scores.fold(f64::NEG_INFINITY, |acc, &s| acc.max(s));
    let shifted = scores.mapv(|s| (s - max).exp());
    let total = shifted.sum();
    shifted / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn scores_are_row_dot_products() {
        let features = array![[1.0, 2.0, 3.0], [0.0, -1.0, 1.0]];
        let weights = array![2.0, 0.5, 1.0];

        let scores = score_pockets(&features, &weights).unwrap();
        assert_relative_eq!(scores[0], 6.0, epsilon = 1e-12);
        assert_relative_eq!(scores[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn row_length_mismatch_is_a_dimension_error() {
        let features = array![[1.0, 2.0]];
        let weights = array![1.0, 2.0, 3.0];

        let err = score_pockets(&features, &weights).unwrap_err();
        assert!(matches!(err, PredictError::Dimension { expected: 3, actual: 2 }));
    }

    #[test]
    fn softmax_sums_to_one() {
        let probabilities = softmax(&array![2.0, -1.0, 0.5, 4.0]);
        assert_relative_eq!(probabilities.sum(), 1.0, epsilon = 1e-6);
        assert!(probabilities.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn softmax_is_shift_invariant() {
        let scores = array![1.0, 2.0, 3.0];
        let shifted = scores.mapv(|s| s + 1000.0);

        let a = softmax(&scores);
        let b = softmax(&shifted);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn softmax_survives_large_magnitudes() {
        let probabilities = softmax(&array![1e4, 1e4 - 2.0]);
        assert!(probabilities.iter().all(|p| p.is_finite()));
        assert_relative_eq!(probabilities.sum(), 1.0, epsilon = 1e-6);
    }
}
