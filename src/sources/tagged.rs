//! Section-tagged export extractor.
//!
//! The export is a line-oriented pseudo-XML stream that is not regular
//! enough for a real XML parser: it carries three recognizable sections
//! (`<itemMeta>`, `<contentMeta>`, `<html>`) whose markers always sit
//! alone on a line, while the `<headline>` field inside the content
//! metadata may close on the same line or span several lines. Everything
//! else is ignored. The reader is an explicit state machine over a line
//! iterator; a missing section is tolerated (title absent, body empty).
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::cleaning::normalize;
use crate::error::Error;
use crate::sources::article::{non_empty, Article, Body};

/// Raw sections of one tagged record, before normalization.
///
/// The metadata line buffers are only needed by the HTML conversion
/// pipeline; the normalization pipeline uses `headline` and `body`.
#[derive(Debug, Default)]
pub struct TaggedRecord {
    pub headline: Option<String>,
    pub created: Option<String>,
    pub item_meta: Vec<String>,
    pub content_meta: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InItemMeta,
    InContentMeta,
    InHeadline,
    InBody,
}

/// Scan one tagged record from a line stream.
pub fn read_record<R: BufRead>(reader: R) -> Result<TaggedRecord, Error> {
    let mut record = TaggedRecord::default();
    let mut state = State::Outside;
    // multi-line headline accumulator; the closing tag is matched over
    // the whole buffer once it appears
    let mut headline = String::new();

    for line in reader.lines() {
        let line = line?;
        state = match state {
            State::Outside => match line.as_str() {
                "<itemMeta>" => State::InItemMeta,
                "<contentMeta>" => State::InContentMeta,
                "<html>" => State::InBody,
                _ => State::Outside,
            },
            State::InItemMeta => {
                if line == "</itemMeta>" {
                    State::Outside
                } else {
                    record.item_meta.push(line);
                    State::InItemMeta
                }
            }
            State::InContentMeta => {
                if line == "</contentMeta>" {
                    State::Outside
                } else if line.starts_with("<headline>") {
                    record.content_meta.push(line.clone());
                    match between(&line, "<headline>", "</headline>") {
                        Some(text) => {
                            record.headline = Some(text.to_string());
                            State::InContentMeta
                        }
                        None => {
                            headline.push_str(&line);
                            headline.push('\n');
                            State::InHeadline
                        }
                    }
                } else {
                    if let Some(created) = between(&line, "<contentCreated>", "</contentCreated>")
                    {
                        record.created = Some(created.to_string());
                    }
                    record.content_meta.push(line);
                    State::InContentMeta
                }
            }
            State::InHeadline => {
                record.content_meta.push(line.clone());
                headline.push_str(&line);
                if line.contains("</headline>") {
                    record.headline =
                        between(&headline, "<headline>", "</headline>").map(str::to_string);
                    State::InContentMeta
                } else {
                    headline.push('\n');
                    State::InHeadline
                }
            }
            State::InBody => {
                if line == "</html>" {
                    State::Outside
                } else {
                    record.body.push_str(&line);
                    record.body.push('\n');
                    State::InBody
                }
            }
        };
    }

    Ok(record)
}

/// Text bracketed by `open` and the last occurrence of `close`.
fn between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&text[start..end])
}

/// Extract one article from a tagged export file.
///
/// Parse failures propagate; the owning partition aborts rather than
/// silently dropping records of this format.
pub fn extract(path: &Path) -> Result<Article, Error> {
    info!("processing {:?}", path);
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::Custom(format!("invalid file name: {:?}", path)))?
        .to_string();

    let record = read_record(BufReader::new(File::open(path)?))?;
    let title = record
        .headline
        .map(|h| normalize(&h))
        .and_then(non_empty);

    Ok(Article {
        id,
        title,
        ingress: None,
        body: Body::Blob(normalize(&record.body)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_and_body() {
        let input = "\
<contentMeta>
<headline>Hello</headline>
</contentMeta>
<html>
<p>World</p>
</html>
";
        let record = read_record(input.as_bytes()).unwrap();
        assert_eq!(record.headline.as_deref(), Some("Hello"));
        assert_eq!(record.body, "<p>World</p>\n");
        assert_eq!(normalize(record.headline.as_deref().unwrap()), "Hello");
        assert_eq!(normalize(&record.body), "World");
    }

    #[test]
    fn multi_line_headline() {
        let input = "\
<contentMeta>
<headline>first part
second part</headline>
</contentMeta>
";
        let record = read_record(input.as_bytes()).unwrap();
        assert_eq!(record.headline.as_deref(), Some("first part\nsecond part"));
    }

    #[test]
    fn missing_sections_tolerated() {
        let record = read_record("irrelevant line\n".as_bytes()).unwrap();
        assert_eq!(record.headline, None);
        assert_eq!(record.body, "");
    }

    #[test]
    fn metadata_lines_kept_for_conversion() {
        let input = "\
<itemMeta>
<itemClass>text</itemClass>
</itemMeta>
<contentMeta>
<contentCreated>2019-05-02</contentCreated>
</contentMeta>
";
        let record = read_record(input.as_bytes()).unwrap();
        assert_eq!(record.item_meta, vec!["<itemClass>text</itemClass>"]);
        assert_eq!(record.created.as_deref(), Some("2019-05-02"));
        assert_eq!(
            record.content_meta,
            vec!["<contentCreated>2019-05-02</contentCreated>"]
        );
    }

    #[test]
    fn lines_outside_sections_ignored() {
        let input = "\
noise
<html>
body line
</html>
trailing noise
";
        let record = read_record(input.as_bytes()).unwrap();
        assert_eq!(record.body, "body line\n");
    }
}
