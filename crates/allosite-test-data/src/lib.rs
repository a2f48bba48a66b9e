//! allosite-test-data
//!
//! A module to provide test files embedded in the crate for use in testing.
//! The fixtures mirror the fpocket output layout: a per-pocket descriptor
//! file and pocket vertex coordinate files.
//!
//! The test files are represented as `TestFile` objects which package the
//! raw data and create temporary files for programs to operate on.
use std::fs;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use allosite_test_data::TestFile;
/// let (info_file, _temp) = TestFile::descriptors_01().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// fpocket `_info.txt` descriptor file with two pocket blocks.
    pub fn descriptors_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/pockets/protein_info.txt"),
            suffix: "txt",
        }
    }
    /// Vertex coordinate file for the first pocket of `descriptors_01`.
    pub fn vertices_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/pockets/pocket1_vert.pqr"),
            suffix: "pqr",
        }
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}
