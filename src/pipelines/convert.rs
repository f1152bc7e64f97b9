//! Tagged-to-HTML conversion pipeline.
//!
//! Rewrites raw section-tagged export files into self-contained HTML
//! documents: the body markup verbatim under the headline and creation
//! date, followed by the escaped metadata sections as an appendix. The
//! output is the HTML-export variant that the tagged pipeline (and human
//! reviewers) consume.
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Error;
use crate::pipelines::list_files;
use crate::pipelines::pipeline::Pipeline;
use crate::sources::tagged::read_record;

pub struct ConvertPipeline {
    src: Vec<PathBuf>,
    dst: PathBuf,
}

impl ConvertPipeline {
    pub fn new(src: Vec<PathBuf>, dst: PathBuf) -> Self {
        Self { src, dst }
    }

    fn convert_file(&self, path: &Path) -> Result<(), Error> {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| Error::Custom(format!("invalid file name: {:?}", path)))?;

        let record = read_record(BufReader::new(File::open(path)?))?;
        let mut out = BufWriter::new(File::create(self.dst.join(format!("{}.html", stem)))?);

        writeln!(out, "<html><head><meta charset=\"UTF-8\"></head>")?;
        writeln!(out, "<h1>{}</h1>", record.headline.as_deref().unwrap_or(""))?;
        writeln!(out, "<p>{}</p>", record.created.as_deref().unwrap_or(""))?;
        out.write_all(record.body.as_bytes())?;
        writeln!(out, "<hr />")?;
        writeln!(out, "<h2>Content metadata</h2>")?;
        for line in &record.content_meta {
            writeln!(out, "{}<br />", html_escape::encode_text(line))?;
        }
        writeln!(out, "<hr />")?;
        writeln!(out, "<h2>Item metadata</h2>")?;
        for line in &record.item_meta {
            writeln!(out, "{}<br />", html_escape::encode_text(line))?;
        }
        writeln!(out, "</html>")?;
        out.flush()?;
        Ok(())
    }
}

impl Pipeline<()> for ConvertPipeline {
    fn run(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dst)?;
        for file in list_files(&self.src, "*.xml")? {
            info!("converting {:?}", file);
            self.convert_file(&file)?;
        }
        Ok(())
    }
}
