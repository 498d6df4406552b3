//! Split a card document into its YAML front matter and Markdown body.

use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::error::card::malformed_metadata;

/// Delimiter line opening and closing the metadata block.
pub const DELIMITER: &str = "---";

/// A document split at its metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// YAML text between the delimiters, `None` when the document has no block.
    pub metadata: Option<&'a str>,
    /// Everything after the closing delimiter line, or the full text without a block.
    pub body: &'a str,
}

/// Iterate lines as `(start, end_of_content, end_including_newline)` byte offsets.
fn line_spans(content: &str) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
    let mut start = 0;
    std::iter::from_fn(move || {
        if start >= content.len() {
            return None;
        }
        let rest = &content[start..];
        let (content_end, next) = match rest.find('\n') {
            Some(i) => (start + i, start + i + 1),
            None => (content.len(), content.len()),
        };
        let span = (start, content_end, next);
        start = next;
        Some(span)
    })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split `content` at the first `---` delimited block.
///
/// Leading blank lines are skipped; the first non-blank line must be the opening
/// delimiter. Only the first block is recognized, later `---` lines belong to the body.
pub fn split(content: &str) -> SplitDocument<'_> {
    let no_block = SplitDocument {
        metadata: None,
        body: content,
    };

    let mut lines = line_spans(content);
    let open = lines.find(|&(s, e, _)| !content[s..e].trim().is_empty());
    let Some((s, e, meta_start)) = open else {
        return no_block;
    };
    if !is_delimiter(&content[s..e]) {
        return no_block;
    }

    for (s, e, next) in lines {
        if is_delimiter(&content[s..e]) {
            let metadata = content[meta_start..s].trim_end_matches(['\n', '\r']);
            return SplitDocument {
                metadata: Some(metadata),
                body: &content[next..],
            };
        }
    }

    no_block
}

/// Parse metadata text into a mapping.
///
/// An empty block yields an empty mapping. Anything that is not a mapping fails.
pub fn parse_metadata(metadata: &str) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(metadata)?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(malformed_metadata("repo card metadata block should be a dict")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_no_frontmatter() {
        let content = "just body\nno delimiters";
        let doc = split(content);
        assert!(doc.metadata.is_none());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn split_frontmatter_and_body() {
        let content = "---\ndescription: hello\n---\n\nbody here\n";
        let doc = split(content);
        assert_eq!(doc.metadata, Some("description: hello"));
        assert_eq!(doc.body, "\nbody here\n");
    }

    #[test]
    fn split_only_first_block() {
        let content = "---\na: 1\n---\n# Title\n---\nb: 2\n---\ntail";
        let doc = split(content);
        assert_eq!(doc.metadata, Some("a: 1"));
        assert_eq!(doc.body, "# Title\n---\nb: 2\n---\ntail");
    }

    #[test]
    fn split_skips_leading_blank_lines() {
        let doc = split("\n\n---\na: 1\n---\nbody");
        assert_eq!(doc.metadata, Some("a: 1"));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn split_crlf_delimiters() {
        let doc = split("---\r\na: 1\r\n---\r\nbody\r\n");
        assert_eq!(doc.metadata, Some("a: 1"));
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn split_unclosed_block_is_body() {
        let content = "---\na: 1\nno closing";
        let doc = split(content);
        assert!(doc.metadata.is_none());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn split_delimiter_must_open_document() {
        let content = "# Title\n---\na: 1\n---\n";
        assert!(split(content).metadata.is_none());
    }

    #[test]
    fn split_closing_delimiter_at_eof() {
        let doc = split("---\na: 1\n---");
        assert_eq!(doc.metadata, Some("a: 1"));
        assert_eq!(doc.body, "");
    }

    #[test]
    fn parse_empty_block_is_empty_mapping() {
        let doc = split("---\n---\nbody");
        assert_eq!(doc.metadata, Some(""));
        assert!(parse_metadata("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_list() {
        let err = parse_metadata("- a\n- b").unwrap_err();
        assert!(
            err.to_string()
                .contains("repo card metadata block should be a dict")
        );
    }

    #[test]
    fn parse_rejects_scalar() {
        assert!(parse_metadata("just a string").is_err());
    }

    #[test]
    fn parse_rejects_invalid_yaml() {
        assert!(parse_metadata("a: [unclosed").is_err());
    }
}
