//! Rotating chunk-file writer.
//!
//! Serializes article fields into bounded-size text files. Every `split`
//! articles the current file is closed and the next one opened, named by
//! the index of its first record (and by partition index under parallel
//! execution, so concurrent workers never collide). Each present field
//! becomes a marker line `###C: <id>_<field>` followed by the normalized
//! text and one blank line; this marker format is the contract consumed
//! by the downstream tagger and must stay stable.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::Error;
use crate::sources::article::{Article, Body};

pub struct ChunkWriter {
    dst: PathBuf,
    /// Partition index under partitioned execution, absent for
    /// single-partition runs.
    prefix: Option<usize>,
    split: usize,
    written: usize,
    current: Option<BufWriter<File>>,
}

impl ChunkWriter {
    /// Create a writer; nothing is opened until the first write.
    pub fn new(dst: &Path, prefix: Option<usize>, split: usize) -> Self {
        Self {
            dst: dst.to_path_buf(),
            prefix,
            split: split.max(1),
            written: 0,
            current: None,
        }
    }

    /// Append one article, rotating the chunk file first if needed.
    pub fn write(&mut self, article: &Article) -> Result<(), Error> {
        if self.written % self.split == 0 {
            self.rotate()?;
        }
        let out = self
            .current
            .as_mut()
            .ok_or_else(|| Error::Custom("no open chunk file".to_string()))?;

        if let Some(title) = article.title.as_deref().filter(|t| !t.is_empty()) {
            write_field(out, &article.id, "title", title)?;
        }
        if let Some(ingress) = article.ingress.as_deref().filter(|i| !i.is_empty()) {
            write_field(out, &article.id, "ingress", ingress)?;
        }
        match &article.body {
            Body::Blob(text) => {
                if !text.is_empty() {
                    write_field(out, &article.id, "body", text)?;
                }
            }
            Body::Fragments(fragments) => {
                for (index, text) in fragments {
                    if !text.is_empty() {
                        write_field(out, &article.id, &format!("body_{}", index), text)?;
                    }
                }
            }
        }

        self.written += 1;
        Ok(())
    }

    fn rotate(&mut self) -> Result<(), Error> {
        self.close()?;
        let filename = match self.prefix {
            Some(prefix) => format!("chunk-{}-{}.txt", prefix, self.written),
            None => format!("chunk-{}.txt", self.written),
        };
        let path = self.dst.join(filename);
        info!("creating {:?}", path);
        self.current = Some(BufWriter::new(File::create(path)?));
        Ok(())
    }

    /// Flush and close the open chunk, if any.
    pub fn close(&mut self) -> Result<(), Error> {
        if let Some(mut file) = self.current.take() {
            file.flush()?;
        }
        Ok(())
    }
}

impl Drop for ChunkWriter {
    // closing on every exit path keeps the trailing chunk intact even
    // when the surrounding batch fails
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!("error closing chunk file: {:?}", e);
        }
    }
}

fn write_field(out: &mut impl Write, id: &str, field: &str, text: &str) -> Result<(), Error> {
    writeln!(out, "###C: {}_{}", id, field)?;
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n\n")?;
    Ok(())
}
