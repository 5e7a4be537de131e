use std::path::{Path, PathBuf};

use crate::{file_type::FileType, fs::FileSystem};

#[derive(Debug, thiserror::Error)]
#[error("failed to write stub \"{}\": {source}", path.display())]
pub struct StubError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

pub fn stub_contents(file_type: FileType, attribution: &str) -> String {
    format!("{}{attribution}\n", file_type.comment_prefix())
}

/// Creates or truncates `path` with the stub for `file_type`
pub fn write_stub<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    file_type: FileType,
    attribution: &str,
) -> Result<(), StubError> {
    let contents = stub_contents(file_type, attribution);
    fs.write_file(path, contents.as_bytes())
        .map_err(|source| StubError {
            path: path.to_path_buf(),
            source,
        })
}
