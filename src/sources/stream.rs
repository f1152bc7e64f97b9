//! Streamed JSON export extractor.
//!
//! The export is one large top-level object whose `data` field holds an
//! array with one element per article. Files can be big, so the array is
//! never materialized: a [serde::de::DeserializeSeed] walks the document
//! and hands each element to a sink as soon as it is deserialized. Body
//! content blocks keep their original array index and are normalized
//! independently, giving a fragment-based body.
use std::fmt;
use std::io::Read;

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use crate::cleaning::normalize;
use crate::error::Error;
use crate::sources::article::{non_empty, Article, Body};

#[derive(Debug, Deserialize)]
struct StreamEntry {
    id: String,
    headline: Option<Headline>,
    lead: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct Headline {
    full: Option<String>,
}

/// One content block; only blocks carrying text contribute to the body.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl StreamEntry {
    fn into_article(self) -> Article {
        let title = self
            .headline
            .and_then(|h| h.full)
            .map(|t| normalize(&t))
            .and_then(non_empty);
        let ingress = self.lead.map(|l| normalize(&l)).and_then(non_empty);
        let fragments = self
            .content
            .into_iter()
            .enumerate()
            .filter_map(|(index, block)| block.text.map(|t| (index, normalize(&t))))
            .collect();

        Article {
            id: self.id,
            title,
            ingress,
            body: Body::Fragments(fragments),
        }
    }
}

/// Read a streamed export, feeding every article to `sink`.
///
/// A sink failure aborts the read and is returned as-is; malformed
/// documents surface as serde errors.
pub fn read_stream<R, F>(reader: R, mut sink: F) -> Result<(), Error>
where
    R: Read,
    F: FnMut(Article) -> Result<(), Error>,
{
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let mut failure = None;
    let result = ExportSeed {
        sink: &mut sink,
        failure: &mut failure,
    }
    .deserialize(&mut deserializer);

    // a sink error was smuggled through serde as a custom error; give
    // the original back instead
    if let Some(error) = failure {
        return Err(error);
    }
    result?;
    Ok(())
}

struct ExportSeed<'a, F> {
    sink: &'a mut F,
    failure: &'a mut Option<Error>,
}

impl<'de, 'a, F> DeserializeSeed<'de> for ExportSeed<'a, F>
where
    F: FnMut(Article) -> Result<(), Error>,
{
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de, 'a, F> Visitor<'de> for ExportSeed<'a, F>
where
    F: FnMut(Article) -> Result<(), Error>,
{
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a top-level export object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let ExportSeed { sink, failure } = self;
        while let Some(key) = map.next_key::<String>()? {
            if key == "data" {
                map.next_value_seed(EntrySeed {
                    sink: &mut *sink,
                    failure: &mut *failure,
                })?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(())
    }
}

struct EntrySeed<'a, F> {
    sink: &'a mut F,
    failure: &'a mut Option<Error>,
}

impl<'de, 'a, F> DeserializeSeed<'de> for EntrySeed<'a, F>
where
    F: FnMut(Article) -> Result<(), Error>,
{
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'a, F> Visitor<'de> for EntrySeed<'a, F>
where
    F: FnMut(Article) -> Result<(), Error>,
{
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of articles")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        while let Some(entry) = seq.next_element::<StreamEntry>()? {
            if let Err(error) = (self.sink)(entry.into_article()) {
                *self.failure = Some(error);
                return Err(de::Error::custom("sink failed"));
            }
        }
        Ok(())
    }
}
