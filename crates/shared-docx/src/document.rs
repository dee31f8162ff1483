//! In-memory DOCX document with paragraph-level write access

use std::io::{Cursor, Read, Write};

use quick_xml::escape::escape;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::DocxError;
use crate::parser::{parse_body_paragraphs, Anchor, RawParagraph};

/// Main document part inside the package
pub const DOCUMENT_PART: &str = "word/document.xml";

/// MIME type for reviewed copies offered for download
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A non-blank paragraph and its position among all body paragraphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
struct BodyParagraph {
    raw: RawParagraph,
    notes: Vec<String>,
}

/// A loaded `.docx` package
///
/// The uploaded bytes are kept untouched; notes appended with
/// [`DocxDocument::append_note`] are spliced into a fresh copy of the
/// main document part when [`DocxDocument::to_bytes`] is called.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    source: Vec<u8>,
    xml: String,
    paragraphs: Vec<BodyParagraph>,
}

impl DocxDocument {
    /// Parse a package from raw upload bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocxError::InvalidArchive(e.to_string()))?;

        let mut xml = String::new();
        {
            let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
                ZipError::FileNotFound => DocxError::MissingPart(DOCUMENT_PART),
                other => DocxError::InvalidArchive(other.to_string()),
            })?;
            part.read_to_string(&mut xml).map_err(|e| {
                if e.kind() == std::io::ErrorKind::InvalidData {
                    DocxError::Encoding(e.to_string())
                } else {
                    DocxError::InvalidArchive(e.to_string())
                }
            })?;
        }

        let paragraphs = parse_body_paragraphs(&xml)?
            .into_iter()
            .map(|raw| BodyParagraph {
                raw,
                notes: Vec::new(),
            })
            .collect();

        Ok(Self {
            source: bytes.to_vec(),
            xml,
            paragraphs,
        })
    }

    /// Number of body paragraphs, blank ones included
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Current text of the paragraph at `index` (original position)
    pub fn paragraph_text(&self, index: usize) -> Option<&str> {
        self.paragraphs.get(index).map(|p| p.raw.text.as_str())
    }

    /// Non-blank paragraphs in document order, keyed by original position
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        self.paragraphs
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.raw.text.trim().is_empty())
            .map(|(index, p)| Paragraph {
                index,
                text: p.raw.text.clone(),
            })
            .collect()
    }

    /// Append a highlighted run, preceded by a line break, to a paragraph
    pub fn append_note(&mut self, index: usize, note: &str) -> Result<(), DocxError> {
        let count = self.paragraphs.len();
        let paragraph = self
            .paragraphs
            .get_mut(index)
            .ok_or(DocxError::ParagraphOutOfRange { index, count })?;

        paragraph.raw.text.push('\n');
        paragraph.raw.text.push_str(note);
        paragraph.notes.push(note.to_string());
        Ok(())
    }

    /// The main document part with all appended notes applied
    pub fn document_xml(&self) -> String {
        let mut edits: Vec<(usize, usize, String)> = self
            .paragraphs
            .iter()
            .filter(|p| !p.notes.is_empty())
            .map(|p| {
                let runs: String = p
                    .notes
                    .iter()
                    .map(|note| note_run(&p.raw.prefix, note))
                    .collect();
                match p.raw.anchor {
                    Anchor::Close(offset) => (offset, offset, runs),
                    Anchor::SelfClosing { start, end } => {
                        let element = &self.xml[start..end];
                        let opening = element
                            .trim_end_matches('>')
                            .trim_end_matches('/')
                            .trim_end();
                        let name = qualified(&p.raw.prefix, "p");
                        (start, end, format!("{}>{}</{}>", opening, runs, name))
                    }
                }
            })
            .collect();
        edits.sort_by_key(|(start, _, _)| *start);

        let mut out = String::with_capacity(self.xml.len() + edits.len() * 128);
        let mut cursor = 0;
        for (start, end, replacement) in edits {
            out.push_str(&self.xml[cursor..start]);
            out.push_str(&replacement);
            cursor = end;
        }
        out.push_str(&self.xml[cursor..]);
        out
    }

    /// Serialize to a new package; parts other than the main document are copied as-is
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut archive = ZipArchive::new(Cursor::new(self.source.as_slice()))
            .map_err(|e| DocxError::InvalidArchive(e.to_string()))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let xml = self.document_xml();

        for i in 0..archive.len() {
            let file = archive
                .by_index(i)
                .map_err(|e| DocxError::InvalidArchive(e.to_string()))?;

            if file.name() == DOCUMENT_PART {
                let options =
                    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
                writer
                    .start_file(DOCUMENT_PART, options)
                    .map_err(|e| DocxError::Write(e.to_string()))?;
                writer
                    .write_all(xml.as_bytes())
                    .map_err(|e| DocxError::Write(e.to_string()))?;
            } else {
                writer
                    .raw_copy_file(file)
                    .map_err(|e| DocxError::Write(e.to_string()))?;
            }
        }

        let cursor = writer
            .finish()
            .map_err(|e| DocxError::Write(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

fn qualified(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

/// `<w:r>` holding a yellow-highlighted line break and the note text
fn note_run(prefix: &str, note: &str) -> String {
    let r = qualified(prefix, "r");
    let rpr = qualified(prefix, "rPr");
    let highlight = qualified(prefix, "highlight");
    let val = qualified(prefix, "val");
    let br = qualified(prefix, "br");
    let t = qualified(prefix, "t");
    format!(
        r#"<{r}><{rpr}><{highlight} {val}="yellow"/></{rpr}><{br}/><{t} xml:space="preserve">{text}</{t}></{r}>"#,
        r = r,
        rpr = rpr,
        highlight = highlight,
        val = val,
        br = br,
        t = t,
        text = escape(note),
    )
}
