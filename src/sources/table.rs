//! Tabular export extractor.
//!
//! Row-oriented CSV asset export. The first row is a header, rows are
//! filtered to the `article` resource kind; the ingress hides inside a
//! JSON-encoded data column while title and body are direct columns.
//! Malformed rows abort the run: the export is a single file, a broken
//! row means a broken dump.
use std::io::Read;

use serde::Deserialize;

use crate::cleaning::normalize;
use crate::error::Error;
use crate::sources::article::{non_empty, Article, Body};

// id,resourcetype,startdate,modifieddate,title,data,custom,timestamp,nodeid,body,splitbody
const COL_ID: usize = 0;
const COL_KIND: usize = 1;
const COL_TITLE: usize = 4;
const COL_DATA: usize = 5;
const COL_BODY: usize = 9;

const KIND_ARTICLE: &str = "article";

/// The JSON-encoded data column; only the ingress matters here.
#[derive(Debug, Deserialize)]
struct AssetData {
    ingress: String,
}

/// Iterator over the article rows of a tabular export.
pub struct TableReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
}

impl<R: Read> TableReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            // header row is skipped by the csv reader
            records: csv::Reader::from_reader(reader).into_records(),
        }
    }

    fn to_article(record: &csv::StringRecord) -> Result<Article, Error> {
        let column = |index: usize| {
            record
                .get(index)
                .ok_or_else(|| Error::Custom(format!("row is missing column {}", index)))
        };

        let id = column(COL_ID)?.to_string();
        let title = non_empty(normalize(column(COL_TITLE)?));
        let data: AssetData = serde_json::from_str(column(COL_DATA)?)?;
        let ingress = non_empty(normalize(&data.ingress));
        let body = normalize(column(COL_BODY)?);

        Ok(Article {
            id,
            title,
            ingress,
            body: Body::Blob(body),
        })
    }
}

impl<R: Read> Iterator for TableReader<R> {
    type Item = Result<Article, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };
            if record.get(COL_KIND) != Some(KIND_ARTICLE) {
                continue;
            }
            return Some(Self::to_article(&record));
        }
    }
}
