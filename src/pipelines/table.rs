//! Tabular export pipeline.
//!
//! The export is a single CSV file, so this pipeline is sequential and
//! chunk names carry no partition prefix. Any row error aborts the run.
use std::fs::File;
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::io::ChunkWriter;
use crate::pipelines::pipeline::Pipeline;
use crate::sources::table::TableReader;

pub struct TablePipeline {
    src: PathBuf,
    dst: PathBuf,
    split: usize,
}

impl TablePipeline {
    pub fn new(src: PathBuf, dst: PathBuf, split: usize) -> Self {
        Self { src, dst, split }
    }
}

impl Pipeline<()> for TablePipeline {
    fn run(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dst)?;
        info!("processing {:?}", self.src);

        let mut writer = ChunkWriter::new(&self.dst, None, self.split);
        for article in TableReader::new(File::open(&self.src)?) {
            writer.write(&article?)?;
        }
        writer.close()
    }
}
