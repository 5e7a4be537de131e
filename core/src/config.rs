use std::path::PathBuf;

/// Written into every stub after the comment prefix
pub const ATTRIBUTION: &str = "Generated by gentree (https://github.com/hogsy/gentree)";

/// Longest accepted path line, `PATH_MAX` on Linux less its terminating NUL
pub const DEFAULT_MAX_LINE_LEN: usize = 4095;

/// What to do with bytes that have the high bit set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NonAsciiPolicy {
    /// Keep valid UTF-8 sequences and drop any other byte
    #[default]
    Passthrough,
    /// Drop any byte >= 0x80 before it reaches the line
    Strip,
}

/// What to do with a line whose directories could not be created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectoryFailurePolicy {
    /// Report the line as failed and never open the stub
    #[default]
    SkipFile,
    /// Report the directory and still try to write the stub
    AttemptFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Normalized paths are materialized relative to this directory
    pub root: PathBuf,
    pub max_line_len: usize,
    pub non_ascii: NonAsciiPolicy,
    pub on_directory_failure: DirectoryFailurePolicy,
    pub attribution: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            non_ascii: NonAsciiPolicy::default(),
            on_directory_failure: DirectoryFailurePolicy::default(),
            attribution: String::from(ATTRIBUTION),
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}
