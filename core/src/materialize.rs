use std::{
    collections::HashSet,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{fs::FileSystem, path::segments};

#[derive(Debug, thiserror::Error)]
#[error("failed to create directory \"{}\": {source}", path.display())]
pub struct MaterializeError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Creates directory chains one segment at a time
///
/// Remembers every prefix it has created or found already existing, so a
/// prefix shared by many lines is only created once per run.
pub struct DirectoryMaterializer<'a, F: ?Sized> {
    fs: &'a F,
    root: &'a Path,
    known: HashSet<PathBuf>,
}

impl<'a, F: FileSystem + ?Sized> DirectoryMaterializer<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path) -> Self {
        Self {
            fs,
            root,
            known: HashSet::new(),
        }
    }

    /// Creates every missing directory in `directory`, returning how many were new
    ///
    /// Stops at the first prefix that can't be created for any reason other
    /// than already existing.
    pub fn materialize(&mut self, directory: &str) -> Result<usize, MaterializeError> {
        let mut path = self.root.to_path_buf();
        let mut created = 0;
        for segment in segments(directory) {
            path.push(segment);
            if self.known.contains(&path) {
                continue;
            }
            match self.fs.create_dir(&path) {
                Ok(()) => {
                    log::debug!("created directory {}", path.display());
                    created += 1;
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
                Err(source) => return Err(MaterializeError { path, source }),
            }
            self.known.insert(path.clone());
        }
        Ok(created)
    }
}
