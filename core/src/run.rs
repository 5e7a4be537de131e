use std::path::Path;

use crate::{
    config::{Config, DirectoryFailurePolicy},
    encoding::{self, Encoding},
    error::Error,
    file_type::FileType,
    fs::FileSystem,
    lines::{LineError, stream::LineStream},
    materialize::{DirectoryMaterializer, MaterializeError},
    path::{NormalizedPath, PathError},
    stub::{self, StubError},
};

/// Reported to the caller as the run advances
#[derive(Debug)]
pub enum Progress<'a> {
    /// The input was opened and read, it has not been decoded yet
    Opened { encoding: Encoding },
    /// A line could not be turned into a path
    LineRejected { err: &'a LineError },
    /// Directories for `path` failed but the stub is still attempted
    DirectoryFailed { path: &'a str, err: &'a MaterializeError },
    Done { path: &'a str },
    Failed { path: &'a str, err: &'a EntryError },
}

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error(transparent)]
    Directory(MaterializeError),
    #[error(transparent)]
    Stub(StubError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Stub files written
    pub written: usize,
    /// Directories that did not exist before the run
    pub directories: usize,
    /// Lines reported as failed
    pub failed: usize,
    /// Comment and parent traversal lines
    pub skipped: usize,
}

/// Reads the listing at `input` and generates its tree
///
/// Only failing to read or decode the input is an error. Everything that
/// goes wrong for a single line is reported through `progress`.
pub fn generate<F, P>(
    fs: &F,
    config: &Config,
    input: &Path,
    mut progress: P,
) -> Result<Summary, Error>
where
    F: FileSystem + ?Sized,
    P: FnMut(Progress<'_>),
{
    let raw = encoding::read_input(input)?;
    log::info!(
        "opened {} as {:?}, {} bytes",
        input.display(),
        raw.encoding,
        raw.bytes.len()
    );
    progress(Progress::Opened {
        encoding: raw.encoding,
    });
    let text = raw.decode()?;
    Ok(generate_from_bytes(fs, config, &text, progress))
}

/// Generates the tree for already decoded text
pub fn generate_from_bytes<F, P>(fs: &F, config: &Config, text: &[u8], progress: P) -> Summary
where
    F: FileSystem + ?Sized,
    P: FnMut(Progress<'_>),
{
    let mut pass = Pass {
        config,
        fs,
        materializer: DirectoryMaterializer::new(fs, &config.root),
        progress,
        summary: Summary::default(),
    };
    for line in LineStream::new(text, config.max_line_len, config.non_ascii) {
        match line {
            Ok(line) => pass.line(line.number, line.as_str()),
            Err(err) => {
                log::warn!("{err}");
                pass.summary.failed += 1;
                (pass.progress)(Progress::LineRejected { err: &err });
            }
        }
    }
    log::info!("finished: {:?}", pass.summary);
    pass.summary
}

struct Pass<'a, F: ?Sized, P> {
    config: &'a Config,
    fs: &'a F,
    materializer: DirectoryMaterializer<'a, F>,
    progress: P,
    summary: Summary,
}

impl<F, P> Pass<'_, F, P>
where
    F: FileSystem + ?Sized,
    P: FnMut(Progress<'_>),
{
    fn line(&mut self, number: usize, line: &str) {
        match NormalizedPath::new(line) {
            Ok(path) => self.entry(path),
            Err(PathError::Empty) => {}
            Err(err) => {
                log::debug!("skipping line {number}: {err}");
                self.summary.skipped += 1;
            }
        }
    }

    fn entry(&mut self, path: NormalizedPath<'_>) {
        if let Some(directory) = path.directory() {
            match self.materializer.materialize(directory) {
                Ok(created) => self.summary.directories += created,
                Err(err) => {
                    log::warn!("{err}");
                    match self.config.on_directory_failure {
                        DirectoryFailurePolicy::SkipFile => {
                            self.fail(path, &EntryError::Directory(err));
                            return;
                        }
                        DirectoryFailurePolicy::AttemptFile => {
                            (self.progress)(Progress::DirectoryFailed {
                                path: path.as_str(),
                                err: &err,
                            });
                        }
                    }
                }
            }
        }
        if path.is_directory_only() {
            (self.progress)(Progress::Done {
                path: path.as_str(),
            });
            return;
        }
        let target = path.resolve(&self.config.root);
        let file_type = FileType::classify(path.as_str());
        match stub::write_stub(self.fs, &target, file_type, &self.config.attribution) {
            Ok(()) => {
                self.summary.written += 1;
                (self.progress)(Progress::Done {
                    path: path.as_str(),
                });
            }
            Err(err) => {
                log::warn!("{err}");
                self.fail(path, &EntryError::Stub(err));
            }
        }
    }

    fn fail(&mut self, path: NormalizedPath<'_>, err: &EntryError) {
        self.summary.failed += 1;
        (self.progress)(Progress::Failed {
            path: path.as_str(),
            err,
        });
    }
}
