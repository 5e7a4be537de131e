use std::path::PathBuf;

use crate::encoding::DecodeError;

/// Errors that end the whole run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open \"{}\": {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("decode error: {0}")]
    Decode(DecodeError),
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}
