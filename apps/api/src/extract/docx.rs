//! DOCX text extraction: read `word/document.xml` out of the ZIP container
//! and collect paragraph text in document order.

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Extracts paragraph text from a DOCX byte buffer, one line per paragraph
/// in document order. Empty paragraphs keep their line so the document's
/// shape survives.
pub fn extract_text(data: &[u8]) -> Result<String> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).context("not a valid DOCX container")?;

    let mut document_file = archive
        .by_name("word/document.xml")
        .context("DOCX container has no word/document.xml")?;
    let mut xml = String::new();
    document_file
        .read_to_string(&mut xml)
        .context("word/document.xml is not valid UTF-8")?;

    // Text is taken untrimmed: Word marks significant leading/trailing
    // spaces inside <w:t> runs, and trimming them would glue words together.
    let mut reader = Reader::from_str(&xml);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut paragraphs = Vec::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:p" => {
                in_paragraph = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
                in_paragraph = false;
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(String::new());
            }
            Ok(Event::Text(e)) => {
                if in_paragraph {
                    current.push_str(e.xml_content()?.as_ref());
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("malformed word/document.xml"),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_fixtures::docx_bytes;

    #[test]
    fn test_single_paragraph() {
        let text = extract_text(&docx_bytes(&["Experienced in Python"])).unwrap();
        assert_eq!(text, "Experienced in Python");
    }

    #[test]
    fn test_empty_paragraphs_keep_their_lines() {
        let text = extract_text(&docx_bytes(&["First", "", "Third"])).unwrap();
        assert_eq!(text, "First\n\nThird");
    }

    #[test]
    fn test_text_split_across_runs_is_concatenated() {
        let body = "<w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t>World</w:t></w:r></w:p>";
        let xml = format!(
            r#"<?xml version="1.0"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let bytes = zip_with_document(&xml);
        assert_eq!(extract_text(&bytes).unwrap(), "Hello World");
    }

    #[test]
    fn test_xml_escapes_are_resolved() {
        let body = "<w:p><w:r><w:t>C&amp;C tooling</w:t></w:r></w:p>";
        let xml = format!(
            r#"<?xml version="1.0"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let bytes = zip_with_document(&xml);
        assert_eq!(extract_text(&bytes).unwrap(), "C&C tooling");
    }

    #[test]
    fn test_missing_document_xml_fails() {
        let mut cursor = Cursor::new(Vec::new());
        {
            use std::io::Write;
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("unrelated.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"hi").unwrap();
            writer.finish().unwrap();
        }
        assert!(extract_text(&cursor.into_inner()).is_err());
    }

    fn zip_with_document(xml: &str) -> Vec<u8> {
        use std::io::Write;
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }
}
