pub mod cleaning;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod sources;
