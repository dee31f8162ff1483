//! Fixture packages for tests
//!
//! Builds a minimal but valid word-processing package in memory. Empty
//! strings become self-closing `<w:p/>` elements, like Word writes them.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::document::DOCUMENT_PART;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// `word/document.xml` with one body paragraph per entry
pub fn document_xml(paragraphs: &[&str]) -> String {
    let mut body = String::new();
    for text in paragraphs {
        if text.is_empty() {
            body.push_str("<w:p/>");
        } else {
            body.push_str(&format!(
                r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                escape(*text)
            ));
        }
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    )
}

/// Package bytes containing the given paragraphs
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    build_package(&document_xml(paragraphs))
}

/// Package bytes around an arbitrary main document part
pub fn build_package(document_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        (DOCUMENT_PART, document_xml),
    ];
    for (name, content) in parts {
        writer.start_file(name, options).expect("start zip entry");
        writer
            .write_all(content.as_bytes())
            .expect("write zip entry");
    }

    writer.finish().expect("finish zip").into_inner()
}
