//! Extracted article record.

/// One extracted article, already normalized.
///
/// Constructed transiently by a format extractor and immediately
/// consumed by the chunk writer; never persisted or mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Opaque identifier, unique within a source directory.
    pub id: String,
    pub title: Option<String>,
    /// Lead paragraph; not present in every format.
    pub ingress: Option<String>,
    pub body: Body,
}

/// Article body: a single blob, or ordered `(index, text)` fragments
/// when the source body is naturally block-structured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Blob(String),
    Fragments(Vec<(usize, String)>),
}

pub(crate) fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
