use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Largest accepted input, in bytes.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

/// Reads text for `translate` and `sentences` from a file or stdin.
pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&Path>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            too_large(size, "file")?;
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        String::from_utf8(bytes)
            .with_context(|| format!("File is not valid UTF-8: {}", path.display()))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                too_large(buffer.len(), "input")?;
            }
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn too_large(size: usize, what: &str) -> Result<()> {
    bail!(
        "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
         Consider copying the {what} in smaller parts.",
        size as f64 / 1024.0 / 1024.0
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Hello, World!").unwrap();

        let content = InputReader::read(Some(temp_file.path())).unwrap();
        assert_eq!(content.trim(), "Hello, World!");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = InputReader::read(Some(Path::new("/nonexistent/path/to/file.txt")));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_file_unicode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = "Deep learn-\ning works.\nこんにちは世界！";
        write!(temp_file, "{}", content).unwrap();

        let result = InputReader::read(Some(temp_file.path())).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();

        let content = InputReader::read(Some(temp_file.path())).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");

        // Create a file larger than MAX_INPUT_SIZE (1MB + 1 byte)
        let large_content = "x".repeat(MAX_INPUT_SIZE + 1);
        fs::write(&file_path, &large_content).unwrap();

        let result = InputReader::read(Some(&file_path));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_file_at_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("max_file.txt");

        // Create a file exactly at MAX_INPUT_SIZE
        let content = "x".repeat(MAX_INPUT_SIZE);
        fs::write(&file_path, &content).unwrap();

        let result = InputReader::read(Some(&file_path));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), MAX_INPUT_SIZE);
    }

    #[test]
    fn test_read_file_rejects_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let err = InputReader::read(Some(temp_file.path())).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_read_file_multiline() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = "Line 1\nLine 2\nLine 3";
        write!(temp_file, "{}", content).unwrap();

        let result = InputReader::read(Some(temp_file.path())).unwrap();
        assert_eq!(result, content);
    }
}
