//! Reading chat exports from disk.
//!
//! WhatsApp can export a chat either as a plain `.txt` file or as a `.zip`
//! containing that text file (plus media). [`read_lines`] accepts both and
//! hands back the text split into lines.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{ChatstatError, Result};

const ARCHIVE_EXTENSION: &str = "zip";
const TEXT_EXTENSION: &str = ".txt";

/// Returns `true` if `path` has a `.zip` extension (case-insensitive).
pub fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

/// Reads `path` and returns its text content as lines.
///
/// A `.zip` path is opened as an archive and the first member whose name ends
/// in `.txt` is read. Any other path is read directly.
///
/// # Errors
///
/// - [`ChatstatError::FileAccess`] if the file cannot be opened or read
/// - [`ChatstatError::Archive`] if the zip is malformed
/// - [`ChatstatError::NoTextEntry`] if the zip has no `.txt` member
/// - [`ChatstatError::Decode`] if the text is not valid UTF-8
///
/// # Example
///
/// ```rust,no_run
/// use chatstat::archive::read_lines;
///
/// let lines = read_lines("WhatsApp Chat with Alice.zip".as_ref())?;
/// println!("{} lines", lines.len());
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| ChatstatError::file_access(path, e))?;

    let (text_bytes, context) = if is_archive(path) {
        let (name, data) = first_text_entry(path, bytes)?;
        debug!(archive = %path.display(), entry = %name, "reading chat from archive");
        (data, format!("{} (entry {})", path.display(), name))
    } else {
        (bytes, path.display().to_string())
    };

    let text = String::from_utf8(text_bytes).map_err(|e| ChatstatError::decode(context, e))?;
    Ok(split_lines(&text))
}

/// Splits text into owned lines.
///
/// Handles both `\n` and `\r\n` endings and drops a leading byte-order mark.
///
/// ```
/// use chatstat::archive::split_lines;
///
/// let lines = split_lines("\u{feff}first\r\nsecond\n");
/// assert_eq!(lines, vec!["first", "second"]);
/// ```
pub fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines().map(str::to_owned).collect()
}

/// Finds the first `.txt` member of the archive and returns its name and bytes.
fn first_text_entry(path: &Path, bytes: Vec<u8>) -> Result<(String, Vec<u8>)> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ChatstatError::archive(path, e))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ChatstatError::archive(path, e))?;

        if !entry.is_file() || !entry.name().ends_with(TEXT_EXTENSION) {
            continue;
        }

        let name = entry.name().to_owned();
        let mut data = Vec::new();
        // A bad checksum or deflate stream surfaces as an I/O error here.
        entry
            .read_to_end(&mut data)
            .map_err(|e| ChatstatError::archive(path, ZipError::Io(e)))?;
        return Ok((name, data));
    }

    Err(ChatstatError::NoTextEntry {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options: FileOptions<'_, ()> = FileOptions::default();
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_is_archive() {
        assert!(is_archive(Path::new("chat.zip")));
        assert!(is_archive(Path::new("Chat.ZIP")));
        assert!(!is_archive(Path::new("chat.txt")));
        assert!(!is_archive(Path::new("zip")));
    }

    #[test]
    fn test_split_lines_crlf_and_bom() {
        let lines = split_lines("\u{feff}a\r\nb\nc");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_read_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        fs::write(&path, "line one\nline two\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_read_zip_picks_first_txt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.zip");
        write_zip(
            &path,
            &[
                ("IMG-0001.jpg", b"\xff\xd8\xff"),
                ("chat.txt", b"from chat"),
                ("other.txt", b"from other"),
            ],
        );

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["from chat"]);
    }

    #[test]
    fn test_zip_without_txt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.zip");
        write_zip(&path, &[("photo.jpg", b"not text")]);

        let err = read_lines(&path).unwrap_err();
        assert!(err.is_no_text_entry());
    }

    #[test]
    fn test_malformed_zip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.zip");
        fs::write(&path, b"this is not a zip archive").unwrap();

        let err = read_lines(&path).unwrap_err();
        assert!(err.is_archive());
    }

    #[test]
    fn test_corrupted_member_is_archive_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.zip");
        let payload = b"01/01/2024, 09:00 - Alice: hi";

        let file = fs::File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("chat.txt", options).unwrap();
        zip.write_all(payload).unwrap();
        zip.finish().unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let offset = bytes
            .windows(payload.len())
            .position(|w| w == payload)
            .unwrap();
        bytes[offset + payload.len() - 1] ^= 0x20;
        fs::write(&path, bytes).unwrap();

        let err = read_lines(&path).unwrap_err();
        assert!(err.is_archive());
        assert!(!err.is_file_access());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_lines(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.is_file_access());
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [0x48, 0x69, 0xe9, 0xff]).unwrap();

        let err = read_lines(&path).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_invalid_utf8_inside_zip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.zip");
        write_zip(&path, &[("chat.txt", &[0xff, 0xfe, 0x00])]);

        let err = read_lines(&path).unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("chat.txt"));
    }
}
