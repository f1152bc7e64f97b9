//! Embedded-JSON document pipeline.
//!
//! Same partitioned shape as the tagged pipeline, but this export is
//! scraped rather than machine-generated, so per-record failures (a
//! missing embedded object, malformed JSON) are logged and skipped
//! instead of aborting the partition.
use std::path::PathBuf;

use log::{error, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::io::ChunkWriter;
use crate::pipelines::list_files;
use crate::pipelines::partition::partition;
use crate::pipelines::pipeline::Pipeline;
use crate::sources::embedded;

pub struct EmbeddedPipeline {
    src: Vec<PathBuf>,
    dst: PathBuf,
    split: usize,
    jobs: usize,
}

impl EmbeddedPipeline {
    pub fn new(src: Vec<PathBuf>, dst: PathBuf, split: usize, jobs: usize) -> Self {
        Self {
            src,
            dst,
            split,
            jobs,
        }
    }

    fn process_partition(&self, index: usize, files: &[PathBuf]) -> Result<(), Error> {
        let mut writer = ChunkWriter::new(&self.dst, Some(index), self.split);
        for file in files {
            match embedded::extract(file) {
                Ok(article) => writer.write(&article)?,
                Err(e) => error!("skipping {:?}: {:?}", file, e),
            }
        }
        writer.close()
    }
}

impl Pipeline<()> for EmbeddedPipeline {
    fn run(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dst)?;
        let files = list_files(&self.src, "*.html")?;
        info!("{} input files", files.len());

        let jobs = if self.jobs == 0 {
            rayon::current_num_threads()
        } else {
            self.jobs
        };

        let errors: Vec<Error> = partition(files, jobs)
            .into_par_iter()
            .enumerate()
            .filter_map(|(index, files)| self.process_partition(index, &files).err())
            .collect();

        for error in &errors {
            error!("partition failed: {:?}", error);
        }
        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
