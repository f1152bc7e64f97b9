//! Embedded-JSON document extractor.
//!
//! The export wraps one article object inside a large HTML page. The
//! object is located by its fixed delimiter pattern (the opening
//! `article_id` field and the closing structural marker), and only that
//! substring is parsed as JSON. The body is a typed block tree that goes
//! through [crate::cleaning::flatten] before normalization.
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::cleaning::{flatten, normalize};
use crate::error::Error;
use crate::sources::article::{non_empty, Article, Body};

lazy_static! {
    static ref ARTICLE_JSON: Regex =
        Regex::new(r#"(\{"article_id":.*\}),"lastUpdated":\d+\}\},"authorInfo":"#).unwrap();
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: String,
    #[serde(default)]
    lead: String,
    #[serde(default)]
    body: Vec<Value>,
}

/// Extract one article from an embedded-JSON document.
///
/// A missing marker or malformed object is one error for this record;
/// the surrounding batch logs it and continues.
pub fn extract(path: &Path) -> Result<Article, Error> {
    info!("processing {:?}", path);
    let id = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::Custom(format!("invalid file name: {:?}", path)))?
        .to_string();

    let document = fs::read_to_string(path)?;
    let captures = ARTICLE_JSON
        .captures(&document)
        .ok_or_else(|| Error::Custom(format!("no embedded article object in {:?}", path)))?;
    let raw: RawArticle = serde_json::from_str(&captures[1])?;

    let mut body_src = String::new();
    for block in &raw.body {
        body_src.push_str(&flatten(block));
    }

    let title = non_empty(normalize(&raw.title));
    // present-but-empty lead means no ingress for this format
    let ingress = if raw.lead.is_empty() {
        None
    } else {
        non_empty(normalize(&raw.lead))
    };

    Ok(Article {
        id,
        title,
        ingress,
        body: Body::Blob(normalize(&body_src)),
    })
}
