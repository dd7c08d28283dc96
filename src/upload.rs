//! Client-side preparation of uploads: checking what the user picked and
//! loading it off disk. Anything rejected here never reaches the network.

use std::path::{Path, PathBuf};

use crate::error::ApiError;

pub const NO_FILE_SELECTED: &str = "Please select a JSON file";
pub const NOT_JSON: &str = "Please select a file in JSON format";
pub const NO_FOLDER_SELECTED: &str = "Please select a folder";
pub const FOLDER_WITHOUT_JSON: &str = "The selected folder contains no JSON files";

/// A file chosen by the user, read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// Bare file name as sent in the multipart part
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn read(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            name: file_name(path),
            bytes,
        })
    }
}

/// Read every path, stopping at the first unreadable file
pub async fn read_all(paths: &[PathBuf]) -> Result<Vec<SelectedFile>, ApiError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(SelectedFile::read(path).await?);
    }
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Case-sensitive `.json` suffix check
pub fn is_json_name(name: &str) -> bool {
    name.ends_with(".json")
}

fn is_json_path(path: &Path) -> bool {
    is_json_name(&file_name(path))
}

/// Gate for the single-file form. `input` is the path typed or dropped.
pub fn validate_single(input: &str) -> Result<PathBuf, ApiError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ApiError::Validation(NO_FILE_SELECTED.to_string()));
    }
    let path = PathBuf::from(input);
    if !is_json_path(&path) {
        return Err(ApiError::Validation(NOT_JSON.to_string()));
    }
    Ok(path)
}

/// Keep only `.json` entries of a selection; fail if none remain
pub fn filter_json_paths(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>, ApiError> {
    if paths.is_empty() {
        return Err(ApiError::Validation(NO_FOLDER_SELECTED.to_string()));
    }
    let json: Vec<PathBuf> = paths.into_iter().filter(|p| is_json_path(p)).collect();
    if json.is_empty() {
        return Err(ApiError::Validation(FOLDER_WITHOUT_JSON.to_string()));
    }
    Ok(json)
}

/// Gate for the folder form: expand the folder and keep its JSON files
pub fn select_folder(input: &str) -> Result<Vec<PathBuf>, ApiError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ApiError::Validation(NO_FOLDER_SELECTED.to_string()));
    }
    filter_json_paths(list_folder(Path::new(input))?)
}

/// Every regular file under `root`, recursively, in path order.
///
/// Symlinked directories are not entered, so a link back up the tree
/// cannot repeat files. Symlinked files are kept.
pub fn list_folder(root: &Path) -> Result<Vec<PathBuf>, ApiError> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|source| ApiError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        for entry in entries.flatten() {
            let Ok(kind) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            if kind.is_dir() {
                pending.push(path);
            } else if kind.is_file() || (kind.is_symlink() && path.is_file()) {
                found.push(path);
            } else if kind.is_symlink() {
                log::debug!("Not following linked folder {}", path.display());
            }
        }
    }

    found.sort();
    Ok(found)
}
