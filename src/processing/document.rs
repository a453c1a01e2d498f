//! Plain text out of CV files, chosen by file extension.

use crate::utils::error::{Result, UploaderError};
use regex::Regex;
use std::io::{Cursor, Read};

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    /// Legacy Word files are read as text like anything else.
    Doc,
    PlainText,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else if lower.ends_with(".doc") {
            DocumentKind::Doc
        } else {
            DocumentKind::PlainText
        }
    }
}

pub fn extract_text(content: &[u8], file_name: &str) -> Result<String> {
    match DocumentKind::from_file_name(file_name) {
        DocumentKind::Pdf => pdf_text(content),
        DocumentKind::Docx => docx_text(content),
        DocumentKind::Doc | DocumentKind::PlainText => {
            Ok(String::from_utf8_lossy(content).into_owned())
        }
    }
}

fn pdf_text(content: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(content).map_err(|e| UploaderError::DocumentError {
        message: format!("PDF text extraction failed: {}", e),
    })
}

fn docx_text(content: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY)?.read_to_string(&mut xml)?;
    Ok(paragraph_text(&xml))
}

/// One line per `<w:p>`, joined from its `<w:t>` runs.
fn paragraph_text(xml: &str) -> String {
    // Lazy attributes so a self-closing `<w:p .../>` stops at its own `/>`.
    let paragraph = Regex::new(r"(?s)<w:p(?:\s[^>]*?)?(?:/>|>(.*?)</w:p>)")
        .expect("paragraph pattern is valid");
    let run = Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:(tab|br)\s*/>")
        .expect("run pattern is valid");

    paragraph
        .captures_iter(xml)
        .map(|para| {
            let inner = para.get(1).map_or("", |m| m.as_str());
            run.captures_iter(inner)
                .map(|caps| match (caps.get(1), caps.get(2)) {
                    (Some(text), _) => unescape_xml(text.as_str()),
                    (None, Some(tag)) if tag.as_str() == "tab" => "\t".to_string(),
                    _ => "\n".to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_xml(text: &str) -> String {
    // `&amp;` last so `&amp;lt;` stays `&lt;`
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    fn docx(document_xml: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())
            .unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file::<_, ()>(DOCX_BODY, FileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn kind_follows_extension_case_insensitively() {
        assert_eq!(DocumentKind::from_file_name("cv.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name("cv.docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_file_name("cv.doc"), DocumentKind::Doc);
        assert_eq!(DocumentKind::from_file_name("cv.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_file_name("README"), DocumentKind::PlainText);
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let bytes = docx(
            r#"<w:document><w:body>
<w:p><w:r><w:t>JANE ROE</w:t></w:r></w:p>
<w:p w:rsidR="0012"/>
<w:p><w:pPr><w:jc w:val="left"/></w:pPr><w:r><w:t>R&amp;D</w:t></w:r><w:r><w:tab/><w:t xml:space="preserve"> Rust &lt;3</w:t></w:r></w:p>
</w:body></w:document>"#,
        );

        let text = extract_text(&bytes, "jane.docx").unwrap();
        assert_eq!(text, "JANE ROE\n\nR&D\t Rust <3");
    }

    #[test]
    fn text_files_are_decoded_lossily() {
        let text = extract_text(b"Jane\xff Roe", "jane.txt").unwrap();
        assert_eq!(text, "Jane\u{fffd} Roe");
    }

    #[test]
    fn broken_docx_is_an_error() {
        let err = extract_text(b"PK\x03\x04 not really a zip", "cv.docx").unwrap_err();
        assert!(matches!(err, UploaderError::ZipError(_)));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file::<_, ()>("other.xml", FileOptions::default())
            .unwrap();
        let without_body = zip.finish().unwrap().into_inner();
        assert!(matches!(
            extract_text(&without_body, "cv.docx"),
            Err(UploaderError::ZipError(_))
        ));
    }
}
