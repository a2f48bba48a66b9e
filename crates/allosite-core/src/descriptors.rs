use crate::error::{PredictError, Result};
use log::info;
use ndarray::Array2;

/// Number of numeric descriptor fields fpocket reports per pocket.
pub const POCKET_FEATURE_COUNT: usize = 19;

/// Lines per pocket block in the `_info.txt` file: one header, nineteen
/// `name<TAB>unit<TAB>value` fields, one separator.
const BLOCK_LINES: usize = 21;

/// Parse the descriptor file emitted by fpocket into a pockets x 19 matrix.
/// The file is a sequence of fixed-size blocks, one per pocket; anything
/// that breaks the block layout is fatal rather than skipped.
pub fn extract_pocket_features(contents: &str) -> Result<Array2<f64>> {
    let lines: Vec<&str> = contents.lines().collect();
    if lines.is_empty() {
        return Err(PredictError::Format(
            "descriptor file contains no pocket blocks".into(),
        ));
    }
    if lines.len() % BLOCK_LINES != 0 {
        return Err(PredictError::Format(format!(
            "descriptor file has {} lines, expected a multiple of {}",
            lines.len(),
            BLOCK_LINES
        )));
    }

    let n_pockets = lines.len() / BLOCK_LINES;
    let mut values = Vec::with_capacity(n_pockets * POCKET_FEATURE_COUNT);
    for (block_index, block) in lines.chunks(BLOCK_LINES).enumerate() {
        for line in &block[1..=POCKET_FEATURE_COUNT] {
            values.push(parse_field(line, block_index + 1)?);
        }
    }

    info!("extracted descriptors for {} pockets", n_pockets);
    Array2::from_shape_vec((n_pockets, POCKET_FEATURE_COUNT), values)
        .map_err(|e| PredictError::Format(e.to_string()))
}

fn parse_field(line: &str, pocket: usize) -> Result<f64> {
    let field = line.split('\t').nth(2).ok_or_else(|| {
        PredictError::Format(format!(
            "pocket {pocket}: descriptor line {line:?} has no value field"
        ))
    })?;
    field.trim().parse().map_err(|_| {
        PredictError::Format(format!(
            "pocket {pocket}: cannot parse descriptor value {:?}",
            field.trim()
        ))
    })
}
