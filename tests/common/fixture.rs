use std::{env, fs, path::{Path, PathBuf}, ops::Deref, fmt::{self, Formatter, Display}};
use tempfile::TempDir;

pub const TEST_DATA_DIR: &str = "./tests/test-data";

/// A test file or directory, living within its own temporary directory.
/// - `path`  : location of the fixture within the temporary directory.
/// - `source`: location of the original file within `TEST_DATA_DIR`, if any.
pub struct Fixture {
    path: PathBuf,
    source: PathBuf,
    _tempdir: TempDir,
}

impl Fixture {
    /// Reserve a path within a fresh temporary directory. Nothing gets written.
    pub fn blank(fixture_filename: &str) -> Self {
        let root_dir = env::var("CARGO_MANIFEST_DIR").expect("$CARGO_MANIFEST_DIR");
        let source = Path::new(&root_dir).join(TEST_DATA_DIR).join(fixture_filename);

        let tempdir = tempfile::tempdir().expect("Failed to generate temp directory");
        let file_name = Path::new(fixture_filename).file_name().expect("Invalid filename");
        let path = tempdir.path().join(file_name);
        Fixture { path, source, _tempdir: tempdir }
    }

    /// Copy a file of `TEST_DATA_DIR` within a fresh temporary directory.
    pub fn copy(fixture_filename: &str) -> Self {
        let fixture = Fixture::blank(fixture_filename);
        fs::copy(&fixture.source, &fixture.path)
            .unwrap_or_else(|e| panic!("Failed to copy fixture {}: {e}", fixture.source.display()));
        fixture
    }

    /// Write arbitrary `contents` within a fresh temporary directory.
    pub fn write(fixture_filename: &str, contents: &str) -> Self {
        let fixture = Fixture::blank(fixture_filename);
        fs::write(&fixture.path, contents).expect("Failed to write fixture");
        fixture
    }
}

impl Deref for Fixture {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.path.deref()
    }
}

impl Display for Fixture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.to_str().expect("Invalid path (non UTF8 characters ?)"))
    }
}
