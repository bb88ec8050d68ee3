use std::fs;
use std::path::Path;

/// Content of a file read into memory
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Path the file was read from
    pub path: String,
    /// File content as valid UTF-8 string
    pub content: String,
    /// Byte length of the content
    pub len: usize,
    /// BLAKE3 hash of the content (hex-encoded)
    pub checksum: String,
}

/// Error types for file operations
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid UTF-8 in file: {0}")]
    InvalidUtf8(String),
}

impl FileError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Hex-encoded BLAKE3 hash of some text
pub fn compute_checksum(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Read a file from disk with UTF-8 validation
///
/// # Arguments
/// * `path` - Path to the file to read
///
/// # Returns
/// * `Ok(FileContent)` - File content with metadata
/// * `Err(FileError)` - File not found, I/O error, or invalid UTF-8
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FileContent, FileError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(FileError::NotFound(path_ref.display().to_string()));
    }

    let bytes = fs::read(path_ref).map_err(|e| FileError::io(path_ref, e))?;

    let content = String::from_utf8(bytes)
        .map_err(|_| FileError::InvalidUtf8(path_ref.display().to_string()))?;

    let len = content.len();
    let checksum = compute_checksum(&content);

    Ok(FileContent {
        path: path_ref.display().to_string(),
        content,
        len,
        checksum,
    })
}

/// Overwrite a file in place with new content.
///
/// Truncates and rewrites the target directly; there is no temp file swap,
/// so an interrupted write leaves the file partially written.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FileError> {
    let path_ref = path.as_ref();
    fs::write(path_ref, content.as_bytes()).map_err(|e| FileError::io(path_ref, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_read_file_valid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("translations.ts");
        let content = "export const translations = {\n  th: {\n    hello: 'สวัสดี',\n";

        fs::write(&file_path, content.as_bytes()).unwrap();

        let file_content = read_file(&file_path).unwrap();

        assert_eq!(file_content.content, content);
        assert_eq!(file_content.len, content.len());
        assert_eq!(file_content.path, file_path.display().to_string());
        assert_eq!(file_content.checksum, compute_checksum(content));
        assert!(file_content.checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_read_file_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("broken.ts");
        fs::write(&file_path, [0xFF, 0xFE, 0xFD]).unwrap();

        match read_file(&file_path) {
            Err(FileError::InvalidUtf8(p)) => {
                assert_eq!(p, file_path.display().to_string());
            }
            other => panic!("Expected FileError::InvalidUtf8, got {:?}", other),
        }
    }

    #[test]
    fn test_read_file_not_found() {
        let file_path = PathBuf::from("/nonexistent/path/that/does/not/exist.ts");

        match read_file(&file_path) {
            Err(FileError::NotFound(p)) => assert!(p.contains("nonexistent")),
            other => panic!("Expected FileError::NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("out.ts");
        fs::write(&file_path, "old content that is longer\n").unwrap();

        write_file(&file_path, "new\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new\n");
    }

    #[test]
    fn test_write_file_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("missing").join("out.ts");

        let err = write_file(&file_path, "x").unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
