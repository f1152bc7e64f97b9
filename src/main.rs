//! # Newsnorm
//!
//! Newsnorm ingests news-article archives exported from heterogeneous
//! CMS formats and produces one normalized, chunked plain-text
//! representation suitable for downstream NLP tagging.
//!
//! ## Getting started
//!
//! ```sh
//! newsnorm 0.1.0
//! news archive normalization tool.
//!
//! USAGE:
//!     newsnorm <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     convert     Rewrite a raw section-tagged export as HTML
//!     embedded    Normalize an embedded-JSON document export
//!     help        Prints this message or the help of the given subcommand(s)
//!     stream      Normalize a streamed JSON export
//!     table       Normalize a row-oriented tabular export
//!     tagged      Normalize a section-tagged export
//! ```
use log::debug;
use structopt::StructOpt;

use newsnorm::error::Error;
use newsnorm::pipelines::{
    ConvertPipeline, EmbeddedPipeline, Pipeline, StreamPipeline, TablePipeline, TaggedPipeline,
};

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Newsnorm::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Newsnorm::Tagged(t) => {
            TaggedPipeline::new(t.src, t.dst, t.split, t.jobs).run()?;
        }
        cli::Newsnorm::Table(t) => {
            TablePipeline::new(t.src, t.dst, t.split).run()?;
        }
        cli::Newsnorm::Stream(s) => {
            StreamPipeline::new(s.src, s.dst, s.split).run()?;
        }
        cli::Newsnorm::Embedded(e) => {
            EmbeddedPipeline::new(e.src, e.dst, e.split, e.jobs).run()?;
        }
        cli::Newsnorm::Convert(c) => {
            ConvertPipeline::new(c.src, c.dst).run()?;
        }
    };
    Ok(())
}
