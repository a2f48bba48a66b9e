use crate::error::{PredictError, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Layout of an fpocket output directory for one structure file:
/// `<base>_out/` holding `<base>_info.txt` and a `pockets/` subdirectory
/// with one vertex coordinate file per pocket.
#[derive(Debug, Clone)]
pub struct PocketDetection {
    output_dir: PathBuf,
    descriptor_file: PathBuf,
    pockets_dir: PathBuf,
}

impl PocketDetection {
    /// Invoke fpocket on a structure file and return the output layout.
    /// The tool runs as a blocking child process with a discrete argument
    /// vector; no timeout is imposed, so a hung tool blocks the caller.
    pub fn run(structure: &Path) -> Result<Self> {
        if !structure.exists() {
            return Err(PredictError::NotFound(structure.to_path_buf()));
        }
        info!("running fpocket on {}", structure.display());
        let status = Command::new("fpocket").arg("-f").arg(structure).status()?;
        if !status.success() {
            return Err(PredictError::ExternalTool { status });
        }
        info!("fpocket completed successfully");
        Self::locate(structure)
    }

    /// Derive the `<base>_out` layout for a structure without invoking the
    /// tool.
    pub fn locate(structure: &Path) -> Result<Self> {
        let base = structure
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                PredictError::Invalid(format!(
                    "structure path {} has no usable base name",
                    structure.display()
                ))
            })?;
        let output_dir = structure.with_file_name(format!("{base}_out"));
        Ok(Self {
            descriptor_file: output_dir.join(format!("{base}_info.txt")),
            pockets_dir: output_dir.join("pockets"),
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Contents of the per-pocket descriptor file.
    pub fn read_descriptors(&self) -> Result<String> {
        if !self.descriptor_file.exists() {
            return Err(PredictError::NotFound(self.descriptor_file.clone()));
        }
        Ok(fs::read_to_string(&self.descriptor_file)?)
    }

    /// Vertex coordinate file for a 1-based pocket index. fpocket names
    /// these `pocket<N>_vert` with an extension that varies by version, so
    /// the lookup matches on the stem only.
    pub fn vertex_file(&self, pocket: usize) -> Result<PathBuf> {
        let stem = format!("pocket{pocket}_vert");
        let entries = fs::read_dir(&self.pockets_dir)
            .map_err(|_| PredictError::NotFound(self.pockets_dir.clone()))?;
        for entry in entries {
            let path = entry?.path();
            if path.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str()) {
                return Ok(path);
            }
        }
        Err(PredictError::NotFound(self.pockets_dir.join(stem)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout_is_derived_from_the_structure_base_name() {
        let detection = PocketDetection::locate(Path::new("/data/structures/4ake.pdb")).unwrap();
        assert_eq!(detection.output_dir(), Path::new("/data/structures/4ake_out"));
        assert_eq!(
            detection.descriptor_file,
            Path::new("/data/structures/4ake_out/4ake_info.txt")
        );
        assert_eq!(
            detection.pockets_dir,
            Path::new("/data/structures/4ake_out/pockets")
        );
    }

    #[test]
    fn missing_structure_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = PocketDetection::run(&dir.path().join("absent.pdb")).unwrap_err();
        assert!(matches!(err, PredictError::NotFound(_)));
    }

    #[test]
    fn vertex_file_matches_on_stem_regardless_of_extension() {
        let dir = TempDir::new().unwrap();
        let structure = dir.path().join("prot.pdb");
        let detection = PocketDetection::locate(&structure).unwrap();
        fs::create_dir_all(&detection.pockets_dir).unwrap();
        fs::write(detection.pockets_dir.join("pocket1_vert.pqr"), "ATOM\n").unwrap();
        fs::write(detection.pockets_dir.join("pocket12_vert.pqr"), "ATOM\n").unwrap();

        let found = detection.vertex_file(1).unwrap();
        assert_eq!(found.file_name().unwrap(), "pocket1_vert.pqr");

        let err = detection.vertex_file(3).unwrap_err();
        assert!(matches!(err, PredictError::NotFound(_)));
    }
}
