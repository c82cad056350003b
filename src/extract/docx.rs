//! DOCX text extraction.
//!
//! A .docx file is a zip archive; the document body lives in
//! `word/document.xml`. Text runs (`w:t`) are concatenated, and each
//! paragraph (`w:p`) is followed by a newline, in document order.

use crate::error::{PratError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Extract paragraph text from a .docx file.
pub fn extract(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| PratError::Extraction(format!("Not a valid docx archive: {}", e)))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| PratError::Extraction(format!("docx has no word/document.xml: {}", e)))?
        .read_to_string(&mut document_xml)
        .map_err(|e| PratError::Extraction(format!("Failed to read document.xml: {}", e)))?;

    extract_from_xml(&document_xml)
}

/// Pull paragraph text out of a WordprocessingML document body.
fn extract_from_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => {
                in_text_run = true;
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                let run = e
                    .unescape()
                    .map_err(|err| PratError::Extraction(format!("Bad XML text: {}", err)))?;
                text.push_str(&run);
            }
            // Tabs, line breaks, and empty paragraphs are self-closing.
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push(' '),
                b"br" | b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(PratError::Extraction(format!(
                    "Malformed document.xml: {}",
                    e
                )))
            }
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
    <w:p/>
  </w:body>
</w:document>"#;

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let text = extract_from_xml(DOCUMENT_XML).unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.\n\n");
    }

    #[test]
    fn test_non_text_elements_ignored() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Hello</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = extract_from_xml(xml).unwrap();
        assert_eq!(text.trim(), "Hello");
    }

    #[test]
    fn test_extract_file_reads_docx_archive() {
        use crate::extract::{extract_file, SourceKind};
        use std::io::{Cursor, Write};
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(DOCUMENT_XML.as_bytes()).unwrap();
        let archive = writer.finish().unwrap().into_inner();

        let mut file = tempfile::Builder::new()
            .suffix(".docx")
            .tempfile()
            .unwrap();
        file.write_all(&archive).unwrap();
        file.flush().unwrap();

        let text = extract_file(file.path(), SourceKind::Docx).unwrap();
        assert!(!text.trim().is_empty());
        assert_eq!(text, "First paragraph.\nSecond paragraph.\n\n");
    }

    #[test]
    fn test_not_a_zip_is_an_extraction_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(file, "plain text, not a zip").unwrap();

        let err = extract(file.path()).unwrap_err();
        assert!(matches!(err, PratError::Extraction(_)));
    }
}
