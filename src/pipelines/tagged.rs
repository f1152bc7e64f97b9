//! Section-tagged export pipeline.
//!
//! Files are partitioned up front and each partition is processed by an
//! independent worker owning its own chunk writer. A record that fails
//! to parse aborts its partition: this format is machine-generated and
//! a parse failure means the dump itself is suspect.
use std::path::PathBuf;

use log::{error, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::io::ChunkWriter;
use crate::pipelines::list_files;
use crate::pipelines::partition::partition;
use crate::pipelines::pipeline::Pipeline;
use crate::sources::tagged;

pub struct TaggedPipeline {
    src: Vec<PathBuf>,
    dst: PathBuf,
    split: usize,
    jobs: usize,
}

impl TaggedPipeline {
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
            let article = tagged::extract(file)?;
            writer.write(&article)?;
        }
        writer.close()
    }
}

impl Pipeline<()> for TaggedPipeline {
    fn run(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dst)?;
        let files = list_files(&self.src, "*.xml")?;
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
