pub mod config;
pub mod encoding;
pub mod error;
pub mod file_type;
pub mod fs;
pub mod lines;
pub mod materialize;
pub mod path;
pub mod run;
pub mod stub;

pub use error::Error;
pub use run::{Progress, Summary, generate, generate_from_bytes};
