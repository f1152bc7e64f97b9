//! Pipelines.
//!
//! One pipeline per source format, plus the tagged-to-HTML conversion.
//! The module provides a light [pipeline::Pipeline] trait that enables
//! easy and flexible pipeline creation.
use std::path::PathBuf;

use crate::error::Error;

pub mod convert;
pub mod embedded;
pub mod partition;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod stream;
pub mod table;
pub mod tagged;

pub use convert::ConvertPipeline;
pub use embedded::EmbeddedPipeline;
pub use pipeline::Pipeline;
pub use stream::StreamPipeline;
pub use table::TablePipeline;
pub use tagged::TaggedPipeline;

/// Recursively list files matching `pattern` under every source dir.
pub(crate) fn list_files(dirs: &[PathBuf], pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for dir in dirs {
        let glob_pattern = dir.join("**").join(pattern);
        let glob_pattern = glob_pattern
            .to_str()
            .ok_or_else(|| Error::Custom(format!("non-UTF-8 path: {:?}", glob_pattern)))?;
        for entry in glob::glob(glob_pattern)? {
            files.push(entry?);
        }
    }
    files.sort();
    Ok(files)
}
