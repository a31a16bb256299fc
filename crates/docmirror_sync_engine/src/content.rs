//! Reading a local document into a title and body.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Title and body extracted from a local file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentContent {
    /// Title taken from the first line.
    pub title: String,
    /// Every line of the file, each terminated by one `\n`.
    pub body: String,
}

/// Reads a document line by line.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// failing the read. The file handle is released when this returns, on
/// success or error.
pub fn read_document(path: &Path) -> io::Result<DocumentContent> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut content = DocumentContent::default();
    let mut buf = Vec::new();
    let mut first = true;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        if first {
            content.title = title_from_line(&line);
            first = false;
        }
        content.body.push_str(&line);
        content.body.push('\n');
    }

    Ok(content)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Strips leading heading markers and every whitespace character.
pub fn title_from_line(line: &str) -> String {
    line.trim_start()
        .trim_start_matches('#')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn heading_markers_and_spaces_are_stripped() {
        assert_eq!(title_from_line("# Hello World"), "HelloWorld");
        assert_eq!(title_from_line("### Deep  Title\t"), "DeepTitle");
        assert_eq!(title_from_line("Plain line"), "Plainline");
        assert_eq!(title_from_line(""), "");
    }

    #[test]
    fn body_keeps_every_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "# Hello World\r\n\r\nSome text").unwrap();

        let content = read_document(&path).unwrap();
        assert_eq!(content.title, "HelloWorld");
        assert_eq!(content.body, "# Hello World\n\nSome text\n");
    }

    #[test]
    fn empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.md");
        fs::write(&path, "").unwrap();

        assert_eq!(read_document(&path).unwrap(), DocumentContent::default());
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.md");
        fs::write(&path, b"# Caf\xe9 Menu\ncaf\xe9\n").unwrap();

        let content = read_document(&path).unwrap();
        assert_eq!(content.title, "Caf\u{FFFD}Menu");
        assert_eq!(content.body, "# Caf\u{FFFD} Menu\ncaf\u{FFFD}\n");
    }

    #[test]
    fn directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_document(dir.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_document(&dir.path().join("nope.md")).is_err());
    }
}
