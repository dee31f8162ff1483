//! Streaming walk over `word/document.xml`
//!
//! Records every direct `<w:p>` child of `<w:body>` in document order,
//! together with the byte range needed to append content to it later.
//! Paragraphs in tables, headers or text boxes are not body paragraphs.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocxError;

/// Where new runs are spliced into a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Byte offset of the paragraph's closing tag
    Close(usize),
    /// Byte range of a self-closing `<w:p/>` element
    SelfClosing { start: usize, end: usize },
}

/// One body paragraph as found in the XML
#[derive(Debug, Clone)]
pub(crate) struct RawParagraph {
    pub text: String,
    /// Namespace prefix of the paragraph element (usually "w")
    pub prefix: String,
    pub anchor: Anchor,
}

/// Paragraph currently being read
struct OpenParagraph {
    depth: usize,
    nested: usize,
    prefix: String,
    text: String,
}

pub(crate) fn parse_body_paragraphs(xml: &str) -> Result<Vec<RawParagraph>, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut open: Option<OpenParagraph> = None;
    let mut paragraphs = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let local = e.local_name().as_ref().to_vec();
                if local == b"p" {
                    match open.as_mut() {
                        Some(para) => para.nested += 1,
                        None if parent_is(&stack, b"body") => {
                            open = Some(OpenParagraph {
                                depth: stack.len(),
                                nested: 0,
                                prefix: prefix_of(&e),
                                text: String::new(),
                            });
                        }
                        None => {}
                    }
                }
                stack.push(local);
            }
            Event::Empty(e) => {
                let local = e.local_name();
                let local = local.as_ref();
                if local == b"p" && open.is_none() && parent_is(&stack, b"body") {
                    let end = reader.buffer_position() as usize;
                    let start = xml[..end]
                        .rfind('<')
                        .ok_or_else(|| DocxError::Xml("unterminated paragraph element".into()))?;
                    paragraphs.push(RawParagraph {
                        text: String::new(),
                        prefix: prefix_of(&e),
                        anchor: Anchor::SelfClosing { start, end },
                    });
                } else if let Some(para) = open.as_mut() {
                    // w:tab also appears inside w:tabs in paragraph properties
                    if para.nested == 0 && parent_is(&stack, b"r") {
                        match local {
                            b"tab" => para.text.push('\t'),
                            b"br" | b"cr" => para.text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(e) => {
                if let Some(para) = open.as_mut() {
                    if para.nested == 0 && parent_is(&stack, b"t") {
                        let text = e.unescape().map_err(|err| DocxError::Xml(err.to_string()))?;
                        para.text.push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if let Some(para) = open.as_mut() {
                    if para.nested == 0 && parent_is(&stack, b"t") {
                        para.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
            }
            Event::End(e) => {
                stack.pop();
                if e.local_name().as_ref() != b"p" {
                    continue;
                }
                let closes_body_paragraph = match open.as_mut() {
                    Some(para) if para.nested > 0 => {
                        para.nested -= 1;
                        false
                    }
                    Some(para) => stack.len() == para.depth,
                    None => false,
                };
                if closes_body_paragraph {
                    if let Some(para) = open.take() {
                        let end = reader.buffer_position() as usize;
                        let close = xml[..end]
                            .rfind("</")
                            .ok_or_else(|| DocxError::Xml("unterminated paragraph".into()))?;
                        paragraphs.push(RawParagraph {
                            text: para.text,
                            prefix: para.prefix,
                            anchor: Anchor::Close(close),
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], local: &[u8]) -> bool {
    stack.last().map(|name| name.as_slice() == local).unwrap_or(false)
}

fn prefix_of(e: &BytesStart<'_>) -> String {
    e.name()
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    fn texts(xml: &str) -> Vec<String> {
        parse_body_paragraphs(xml)
            .unwrap()
            .into_iter()
            .map(|p| p.text)
            .collect()
    }

    #[test]
    fn test_reads_run_text_in_order() {
        let xml = wrap(
            r#"<w:p><w:r><w:t>Articles of </w:t></w:r><w:r><w:t>Association</w:t></w:r></w:p><w:p><w:r><w:t>Second</w:t></w:r></w:p>"#,
        );
        assert_eq!(texts(&xml), vec!["Articles of Association", "Second"]);
    }

    #[test]
    fn test_keeps_blank_paragraphs_addressable() {
        let xml = wrap(r#"<w:p/><w:p><w:r><w:t>Text</w:t></w:r></w:p><w:p></w:p>"#);
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs.len(), 3);
        assert!(matches!(paragraphs[0].anchor, Anchor::SelfClosing { .. }));
        assert!(matches!(paragraphs[2].anchor, Anchor::Close(_)));
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = wrap(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Name</w:t><w:tab/><w:t>Value</w:t><w:br/><w:t>Next</w:t></w:r></w:p>"#,
        );
        assert_eq!(texts(&xml), vec!["Name\tValue\nNext"]);
    }

    #[test]
    fn test_unescapes_entities() {
        let xml = wrap(r#"<w:p><w:r><w:t>Smith &amp; Co &lt;Ltd&gt;</w:t></w:r></w:p>"#);
        assert_eq!(texts(&xml), vec!["Smith & Co <Ltd>"]);
    }

    #[test]
    fn test_ignores_table_paragraphs() {
        let xml = wrap(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );
        assert_eq!(texts(&xml), vec!["Before", "After"]);
    }

    #[test]
    fn test_text_box_content_not_attributed() {
        let xml = wrap(
            r#"<w:p><w:r><w:t>Outer</w:t><w:drawing><w:txbxContent><w:p><w:r><w:t>Inner</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#,
        );
        assert_eq!(texts(&xml), vec!["Outer"]);
    }

    #[test]
    fn test_close_anchor_points_at_end_tag() {
        let xml = wrap(r#"<w:p><w:r><w:t>Hi</w:t></w:r></w:p>"#);
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        match paragraphs[0].anchor {
            Anchor::Close(offset) => assert!(xml[offset..].starts_with("</w:p>")),
            other => panic!("unexpected anchor {:?}", other),
        }
        assert_eq!(paragraphs[0].prefix, "w");
    }

    #[test]
    fn test_rejects_mismatched_tags() {
        let xml = wrap(r#"<w:p><w:r><w:t>Hi</w:r></w:p>"#);
        assert!(matches!(parse_body_paragraphs(&xml), Err(DocxError::Xml(_))));
    }
}
