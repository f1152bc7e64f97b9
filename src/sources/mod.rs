/*! Source-format extractors

One extractor per archive export format. Each one consumes a raw record
(a section-tagged line stream, a tabular row, a streamed JSON element or
an embedded-JSON document) and produces a normalized [Article].
!*/
pub mod article;
pub mod embedded;
pub mod stream;
pub mod table;
pub mod tagged;

pub use article::{Article, Body};
