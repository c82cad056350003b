//! PDF text extraction.

use crate::error::{PratError, Result};
use std::path::Path;

/// Extract the text of every page, concatenated in page order.
pub fn extract(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path)
        .map_err(|e| PratError::Extraction(format!("Failed to read PDF {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use crate::extract::{extract_file, SourceKind};
    use std::io::Write;

    /// Builds a single-page PDF with one line of Helvetica text and a
    /// byte-accurate xref table.
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
        ];

        let mut pdf = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref_offset = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_extract_file_reads_pdf_text() {
        let mut file = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .unwrap();
        file.write_all(&minimal_pdf("Hello from the page")).unwrap();
        file.flush().unwrap();

        let text = extract_file(file.path(), SourceKind::Pdf).unwrap();
        assert!(!text.trim().is_empty());
        assert!(text.contains("Hello from the page"));
    }

    #[test]
    fn test_extract_garbage_pdf_is_an_extraction_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a pdf at all").unwrap();
        file.flush().unwrap();

        let err = extract_file(file.path(), SourceKind::Pdf).unwrap_err();
        assert!(matches!(err, crate::error::PratError::Extraction(_)));
    }
}
