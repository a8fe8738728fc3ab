use std::{fs, path::{Path, PathBuf}};

use located_error::prelude::*;
use log::trace;

mod error;
pub use error::ParseError;

/// Attempt to create the parent directories of a path (if needed) and return an error if it failed.
///
/// # Errors
/// - `CreateParentDirectory` if the user does not have the proper UNIX permissions.
pub fn create_parent_directory(path: &Path) -> Result<()> {
    use ParseError::CreateParentDirectory;
    let parent_dir = path.parent().unwrap_or(path);
    let loc_msg = || format!("While attempting to create output directory '{}'", path.display());
    fs::create_dir_all(parent_dir).map_err(CreateParentDirectory).with_loc(loc_msg)
}

/// Check if a given file already exists ; raise an error if such is the case, and the user did not explicitly
/// allow file overwriting.
///
/// # Errors
/// - `OverwriteDisallowed` if `path` already exists and `overwrite` is false.
pub fn can_write_file(overwrite: bool, path: &Path) -> Result<bool> {
    let loc_msg = "While ensuring that file permissions were appropriate";
    if !overwrite && path.exists() {
        return Err(ParseError::OverwriteDisallowed{path: path.to_path_buf()}).loc(loc_msg)
    }
    Ok(true)
}

/// Format the path of an output file: `{output_dir}/{prefix}[-{suffix}].{ext}`. The parent directory is
/// created if needed, and the file is checked against overwriting.
///
/// # Errors
/// - `InvalidFilename` if `prefix` or `suffix` are empty or hold path separators.
/// - See [`create_parent_directory`] and [`can_write_file`].
pub fn get_output_file(output_dir: &Path, prefix: &str, suffix: Option<&str>, ext: &str, overwrite: bool) -> Result<PathBuf> {
    use ParseError::InvalidFilename;
    let loc_msg = "While attempting to format the name of an output file";
    let is_invalid = |s: &str| s.is_empty() || s.contains(std::path::MAIN_SEPARATOR);
    if is_invalid(prefix) || suffix.is_some_and(is_invalid) {
        return Err(InvalidFilename).loc(loc_msg)
    }

    let filename = match suffix {
        Some(suffix) => format!("{prefix}-{suffix}.{ext}"),
        None         => format!("{prefix}.{ext}"),
    };
    let file = output_dir.join(filename);
    create_parent_directory(&file).loc(loc_msg)?;
    can_write_file(overwrite, &file).loc(loc_msg)?;
    trace!("Output file: {}", file.display());
    Ok(file)
}
