use crate::descriptors::POCKET_FEATURE_COUNT;
use crate::error::{PredictError, Result};
use log::info;
use ndarray::{Array1, Array2, Axis};
use serde_pickle::{DeOptions, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Immutable model artifacts: the consolidated scoring weights, the label
/// set carried alongside them, and the reference feature matrix the
/// normalizer is fitted on. Loaded once per predictor lifetime.
pub struct ModelStore {
    weights: Array1<f64>,
    labels: Value,
    reference: Array2<f64>,
}

/// A pickled weight artifact is either a single weight vector or a stack of
/// independently trained sample rows.
enum WeightEnsemble {
    Flat(Array1<f64>),
    Stacked(Array2<f64>),
}

impl ModelStore {
    pub fn load(weights_path: &Path, labels_path: &Path, reference_path: &Path) -> Result<Self> {
        let raw_weights = read_pickle(weights_path, "model weights")?;
        let labels = read_pickle(labels_path, "labels")?;
        let raw_reference = read_pickle(reference_path, "reference features")?;

        let ensemble = decode_ensemble(&raw_weights, "model weights")?;
        match &ensemble {
            WeightEnsemble::Stacked(m) => {
                info!("weight ensemble of {} samples x {} features", m.nrows(), m.ncols())
            }
            WeightEnsemble::Flat(v) => info!("weight vector of length {}", v.len()),
        }

        let weights = consolidate(ensemble)?;
        info!("consolidated weight vector of length {}", weights.len());
        if weights.len() != POCKET_FEATURE_COUNT {
            return Err(PredictError::Dimension {
                expected: POCKET_FEATURE_COUNT,
                actual: weights.len(),
            });
        }

        let reference = match decode_ensemble(&raw_reference, "reference features")? {
            WeightEnsemble::Stacked(m) => m,
            WeightEnsemble::Flat(_) => {
                return Err(PredictError::Invalid(
                    "reference features artifact must be a matrix of training rows".into(),
                ))
            }
        };
        info!(
            "reference feature matrix of {} samples x {} features",
            reference.nrows(),
            reference.ncols()
        );
        if reference.ncols() != POCKET_FEATURE_COUNT {
            return Err(PredictError::Dimension {
                expected: POCKET_FEATURE_COUNT,
                actual: reference.ncols(),
            });
        }

        if let Some(items) = sequence(&labels) {
            info!("loaded {} labels", items.len());
        }

        Ok(Self {
            weights,
            labels,
            reference,
        })
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn reference(&self) -> &Array2<f64> {
        &self.reference
    }

    /// The label set is carried for provenance only; the scoring path never
    /// consumes it.
    pub fn labels(&self) -> &Value {
        &self.labels
    }
}

/// Column-wise mean of a stacked ensemble; a flat vector passes through.
fn consolidate(ensemble: WeightEnsemble) -> Result<Array1<f64>> {
    match ensemble {
        WeightEnsemble::Flat(v) => Ok(v),
        WeightEnsemble::Stacked(m) => m.mean_axis(Axis(0)).ok_or_else(|| {
            PredictError::Invalid("cannot average an empty weight ensemble".into())
        }),
    }
}

fn read_pickle(path: &Path, artifact: &'static str) -> Result<Value> {
    if !path.exists() {
        return Err(PredictError::NotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    let value = serde_pickle::value_from_reader(reader, DeOptions::new()).map_err(|e| {
        PredictError::Corrupt {
            artifact,
            reason: e.to_string(),
        }
    })?;
    info!("loaded {} from {}", artifact, path.display());
    Ok(value)
}

fn sequence(value: &Value) -> Option<&[Value]> {
    match value {
        Value::List(items) | Value::Tuple(items) => Some(items),
        _ => None,
    }
}

fn scalar(value: &Value) -> Option<f64> {
    match value {
        Value::F64(v) => Some(*v),
        Value::I64(v) => Some(*v as f64),
        _ => None,
    }
}

fn decode_ensemble(value: &Value, artifact: &'static str) -> Result<WeightEnsemble> {
    let items = sequence(value).ok_or_else(|| {
        PredictError::Invalid(format!("{artifact} artifact is not a pickled sequence"))
    })?;
    match items.first() {
        None => Err(PredictError::Invalid(format!("{artifact} artifact is empty"))),
        Some(first) if sequence(first).is_some() => {
            decode_matrix(items, artifact).map(WeightEnsemble::Stacked)
        }
        Some(_) => decode_row(items, artifact)
            .map(Array1::from_vec)
            .map(WeightEnsemble::Flat),
    }
}

fn decode_matrix(items: &[Value], artifact: &'static str) -> Result<Array2<f64>> {
    let mut cells = Vec::new();
    let mut width = None;
    for row in items {
        let row = sequence(row).ok_or_else(|| {
            PredictError::Invalid(format!("{artifact} artifact mixes rows and scalars"))
        })?;
        let parsed = decode_row(row, artifact)?;
        match width {
            None => width = Some(parsed.len()),
            Some(w) if w != parsed.len() => {
                return Err(PredictError::Invalid(format!(
                    "{artifact} artifact has ragged rows ({w} vs {})",
                    parsed.len()
                )))
            }
            Some(_) => {}
        }
        cells.extend(parsed);
    }
    let width =
        width.ok_or_else(|| PredictError::Invalid(format!("{artifact} artifact has no rows")))?;
    Array2::from_shape_vec((items.len(), width), cells)
        .map_err(|e| PredictError::Invalid(format!("{artifact}: {e}")))
}

fn decode_row(items: &[Value], artifact: &'static str) -> Result<Vec<f64>> {
    items
        .iter()
        .map(|v| {
            scalar(v).ok_or_else(|| {
                PredictError::Invalid(format!("{artifact} artifact holds a non-numeric entry"))
            })
        })
        .collect()
}
