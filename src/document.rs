use crate::error::DocumentError;
use std::fs;
use std::path::Path;

/// Documents longer than this are cut before summarization.
pub const MAX_DOCUMENT_CHARS: usize = 20_000;

const UNSUPPORTED_EXTENSIONS: &[&str] = &["pdf"];

/// Read an already-extracted plain text document.
pub fn load_document(path: &Path) -> Result<String, DocumentError> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = ext.to_ascii_lowercase();
        if UNSUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(DocumentError::UnsupportedFormat(ext));
        }
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    let text = truncate_chars(&content, MAX_DOCUMENT_CHARS);
    if text.len() < content.len() {
        log::warn!(
            "Document {} truncated to {} characters",
            path.display(),
            MAX_DOCUMENT_CHARS
        );
    }
    Ok(text.to_string())
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_plain_text() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "Rust has ownership.").unwrap();

        assert_eq!(load_document(&path).unwrap(), "Rust has ownership.");
    }

    #[test]
    fn test_rejects_pdf() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lecture.PDF");
        fs::write(&path, "%PDF-1.7").unwrap();

        assert!(matches!(
            load_document(&path),
            Err(DocumentError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
    }

    #[test]
    fn test_rejects_blank_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  \n\t\n").unwrap();

        assert!(matches!(
            load_document(file.path()),
            Err(DocumentError::Empty)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.txt");

        assert!(matches!(load_document(&path), Err(DocumentError::Io(_))));
    }

    #[test]
    fn test_truncates_long_documents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("long.md");
        fs::write(&path, "é".repeat(MAX_DOCUMENT_CHARS + 10)).unwrap();

        let text = load_document(&path).unwrap();
        assert_eq!(text.chars().count(), MAX_DOCUMENT_CHARS);
    }

    #[test]
    fn test_truncate_chars_short_input() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
    }
}
