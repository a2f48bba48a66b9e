use crate::error::{PredictError, Result};
use ndarray::Array1;

/// The winning pocket. Pockets are numbered from 1, matching the fpocket
/// output convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedPocket {
    pub index: usize,
    pub confidence: f64,
}

/// Index of the maximum probability, ties broken toward the lowest index.
pub fn select_top(probabilities: &Array1<f64>) -> Result<SelectedPocket> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &probability) in probabilities.iter().enumerate() {
        if best.map_or(true, |(_, current)| probability > current) {
            best = Some((index, probability));
        }
    }
    let (index, confidence) = best.ok_or_else(|| {
        PredictError::Invalid("cannot select a pocket from an empty distribution".into())
    })?;
    Ok(SelectedPocket {
        index: index + 1,
        confidence,
    })
}
