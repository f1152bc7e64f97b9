//! Streamed JSON export pipeline.
//!
//! Iterates export files sequentially, streaming each one's article
//! array straight into a single chunk writer; the record counter (and
//! with it chunk rotation) spans the whole run.
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::io::ChunkWriter;
use crate::pipelines::list_files;
use crate::pipelines::pipeline::Pipeline;
use crate::sources::stream::read_stream;

pub struct StreamPipeline {
    src: Vec<PathBuf>,
    dst: PathBuf,
    split: usize,
}

impl StreamPipeline {
    pub fn new(src: Vec<PathBuf>, dst: PathBuf, split: usize) -> Self {
        Self { src, dst, split }
    }
}

impl Pipeline<()> for StreamPipeline {
    fn run(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dst)?;

        let mut writer = ChunkWriter::new(&self.dst, None, self.split);
        for file in list_files(&self.src, "*.json")? {
            info!("processing {:?}", file);
            read_stream(BufReader::new(File::open(&file)?), |article| {
                writer.write(&article)
            })?;
        }
        writer.close()
    }
}
