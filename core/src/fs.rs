use std::path::Path;

/// The filesystem operations a run performs
pub trait FileSystem {
    /// Creates one directory, its parent must already exist
    fn create_dir(&self, path: &Path) -> std::io::Result<()>;

    /// Creates or truncates `path` and writes `contents` to it
    fn write_file(&self, path: &Path, contents: &[u8]) -> std::io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    #[expect(clippy::create_dir)]
    fn create_dir(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }
}
