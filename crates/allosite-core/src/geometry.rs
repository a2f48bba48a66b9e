use crate::error::{PredictError, Result};
use log::info;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

// Fixed-width coordinate columns of PDB/PQR atomic records (0-indexed).
const X_RANGE: Range<usize> = 30..38;
const Y_RANGE: Range<usize> = 38..46;
const Z_RANGE: Range<usize> = 46..54;

/// Extract (x, y, z) from every "ATOM" record of a pocket vertex file.
/// Non-ATOM lines (headers, TER, END) are skipped.
pub fn parse_vertex_coordinates(contents: &str) -> Result<Vec<[f64; 3]>> {
    let mut coords = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if !line.starts_with("ATOM") {
            continue;
        }
        coords.push([
            coordinate_field(line, X_RANGE, index + 1)?,
            coordinate_field(line, Y_RANGE, index + 1)?,
            coordinate_field(line, Z_RANGE, index + 1)?,
        ]);
    }
    Ok(coords)
}

fn coordinate_field(line: &str, range: Range<usize>, line_number: usize) -> Result<f64> {
    let field = line.get(range).ok_or_else(|| {
        PredictError::Format(format!(
            "coordinate line {line_number} is too short for fixed-width fields"
        ))
    })?;
    field.trim().parse().map_err(|_| {
        PredictError::Format(format!(
            "coordinate line {line_number}: cannot parse {:?} as a coordinate",
            field.trim()
        ))
    })
}

/// Arithmetic mean position of a set of coordinates.
pub fn centroid(coords: &[[f64; 3]]) -> Result<[f64; 3]> {
    if coords.is_empty() {
        return Err(PredictError::EmptyGeometry);
    }
    let n = coords.len() as f64;
    let sums = coords.iter().fold([0.0f64; 3], |acc, c| {
        [acc[0] + c[0], acc[1] + c[1], acc[2] + c[2]]
    });
    Ok([sums[0] / n, sums[1] / n, sums[2] / n])
}

/// Persist the winning pocket: its coordinate text verbatim as the
/// `allosteric_predictsite` artifact (keeping the vertex file's extension)
/// and its centroid as `"x y z"` to three decimals alongside it.
pub fn write_site_artifacts(
    out_dir: &Path,
    vertex_file: &Path,
    contents: &str,
    center: [f64; 3],
) -> Result<(PathBuf, PathBuf)> {
    let site_name = match vertex_file.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("allosteric_predictsite.{ext}"),
        None => "allosteric_predictsite".to_string(),
    };
    let site_path = out_dir.join(site_name);
    fs::write(&site_path, contents)?;

    let center_path = out_dir.join("allosteric_predictsite.center");
    fs::write(
        &center_path,
        format!("{:.3} {:.3} {:.3}\n", center[0], center[1], center[2]),
    )?;

    info!(
        "wrote predicted site to {} and centroid to {}",
        site_path.display(),
        center_path.display()
    );
    Ok((site_path, center_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use allosite_test_data::TestFile;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    #[test]
    fn centroid_of_three_points() {
        let coords = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 3.0, 0.0]];
        assert_eq!(centroid(&coords).unwrap(), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_coordinates_are_empty_geometry() {
        let err = centroid(&[]).unwrap_err();
        assert!(matches!(err, PredictError::EmptyGeometry));
    }

    #[test]
    fn parses_only_atom_records_at_fixed_offsets() {
        let (path, _temp) = TestFile::vertices_01().create_temp().unwrap();
        let contents = fs::read_to_string(path).unwrap();

        let coords = parse_vertex_coordinates(&contents).unwrap();
        assert_eq!(coords.len(), 3);
        assert_relative_eq!(coords[0][0], 24.0, epsilon = 1e-12);
        assert_relative_eq!(coords[0][2], -9.0, epsilon = 1e-12);

        let center = centroid(&coords).unwrap();
        assert_relative_eq!(center[0], 25.0, epsilon = 1e-12);
        assert_relative_eq!(center[1], 9.0, epsilon = 1e-12);
        assert_relative_eq!(center[2], -10.0, epsilon = 1e-12);
    }

    #[test]
    fn short_atom_line_is_a_format_error() {
        let err = parse_vertex_coordinates("ATOM      1    O STP     1      24.000\n").unwrap_err();
        assert!(matches!(err, PredictError::Format(_)));
    }

    #[test]
    fn unparsable_coordinate_is_a_format_error() {
        let line =
            "ATOM      1    O STP     1      xx.xxx   8.000  -9.000\n";
        let err = parse_vertex_coordinates(line).unwrap_err();
        assert!(matches!(err, PredictError::Format(_)));
    }

    #[test]
    fn artifacts_are_written_next_to_the_detection_output() {
        let dir = TempDir::new().unwrap();
        let vertex_file = dir.path().join("pocket1_vert.pqr");
        let contents = "ATOM      1    O STP     1       1.000   2.000   3.000\n";

        let (site, center) =
            write_site_artifacts(dir.path(), &vertex_file, contents, [1.0, 2.0, 3.0]).unwrap();
        assert_eq!(site.file_name().unwrap(), "allosteric_predictsite.pqr");
        assert_eq!(fs::read_to_string(&site).unwrap(), contents);
        assert_eq!(fs::read_to_string(&center).unwrap(), "1.000 2.000 3.000\n");
    }
}
