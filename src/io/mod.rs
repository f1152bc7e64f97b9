/*! IO utilities

Chunked output writing for normalized articles.
!*/
pub mod chunk;

pub use chunk::ChunkWriter;
