use std::borrow::Cow;

pub mod stream;

/// One line of the path listing with its terminator removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLine<'a> {
    /// 1-based line number in the decoded text
    pub number: usize,
    pub text: Cow<'a, str>,
}

impl PathLine<'_> {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Characters of an over-long line kept for reporting
pub const REPORTED_PREFIX_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("line {line} is {len} bytes long, the limit is {max}")]
    TooLong {
        line: usize,
        len: usize,
        max: usize,
        /// The first [`REPORTED_PREFIX_CHARS`] characters of the line
        start: String,
    },
}

impl LineError {
    pub fn line(&self) -> usize {
        match self {
            Self::TooLong { line, .. } => *line,
        }
    }

    /// Something to show in place of the path that was never accepted
    pub fn display_path(&self) -> String {
        match self {
            Self::TooLong { start, .. } => format!("{start}..."),
        }
    }
}

const fn is_terminator(b: u8) -> bool {
    matches!(b, b'\r' | b'\n' | b'\0')
}
