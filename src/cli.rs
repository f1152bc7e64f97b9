//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "newsnorm", about = "news archive normalization tool.")]
/// Holds every command that is callable by the `newsnorm` command.
pub enum Newsnorm {
    #[structopt(about = "Normalize a section-tagged export")]
    Tagged(Tagged),
    #[structopt(about = "Normalize a row-oriented tabular export")]
    Table(Table),
    #[structopt(about = "Normalize a streamed JSON export")]
    Stream(Stream),
    #[structopt(about = "Normalize an embedded-JSON document export")]
    Embedded(Embedded),
    #[structopt(about = "Rewrite a raw section-tagged export as HTML")]
    Convert(Convert),
}

#[derive(Debug, StructOpt)]
/// Tagged command and parameters.
pub struct Tagged {
    #[structopt(parse(from_os_str), help = "input directories", required = true)]
    pub src: Vec<PathBuf>,
    #[structopt(parse(from_os_str), short = "o", long = "output", help = "output directory")]
    pub dst: PathBuf,
    #[structopt(
        short = "s",
        long = "split",
        help = "number of articles to put in each chunk",
        default_value = "5000"
    )]
    pub split: usize,
    #[structopt(
        short = "j",
        long = "jobs",
        help = "number of parallel workers (0 = all cores)",
        default_value = "0"
    )]
    pub jobs: usize,
}

#[derive(Debug, StructOpt)]
/// Table command and parameters.
pub struct Table {
    #[structopt(parse(from_os_str), help = "input csv file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), short = "o", long = "output", help = "output directory")]
    pub dst: PathBuf,
    #[structopt(
        short = "s",
        long = "split",
        help = "number of articles to put in each chunk",
        default_value = "5000"
    )]
    pub split: usize,
}

#[derive(Debug, StructOpt)]
/// Stream command and parameters.
pub struct Stream {
    #[structopt(parse(from_os_str), help = "input directories", required = true)]
    pub src: Vec<PathBuf>,
    #[structopt(parse(from_os_str), short = "o", long = "output", help = "output directory")]
    pub dst: PathBuf,
    #[structopt(
        short = "s",
        long = "split",
        help = "number of articles to put in each chunk",
        default_value = "5000"
    )]
    pub split: usize,
}

#[derive(Debug, StructOpt)]
/// Embedded command and parameters.
pub struct Embedded {
    #[structopt(parse(from_os_str), help = "input directories", required = true)]
    pub src: Vec<PathBuf>,
    #[structopt(parse(from_os_str), short = "o", long = "output", help = "output directory")]
    pub dst: PathBuf,
    #[structopt(
        short = "s",
        long = "split",
        help = "number of articles to put in each chunk",
        default_value = "5000"
    )]
    pub split: usize,
    #[structopt(
        short = "j",
        long = "jobs",
        help = "number of parallel workers (0 = all cores)",
        default_value = "0"
    )]
    pub jobs: usize,
}

#[derive(Debug, StructOpt)]
/// Convert command and parameters.
pub struct Convert {
    #[structopt(parse(from_os_str), help = "input directories", required = true)]
    pub src: Vec<PathBuf>,
    #[structopt(parse(from_os_str), short = "o", long = "output", help = "output directory")]
    pub dst: PathBuf,
}
