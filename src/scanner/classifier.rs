use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected.
pub const SAMPLE_SIZE: u64 = 512;

/// Guess whether `path` is a text file from its first [`SAMPLE_SIZE`] bytes.
///
/// Unreadable files count as binary. A NUL byte, or any control byte other
/// than `\n`, `\r` and `\t`, marks the sample as binary.
pub fn is_text(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };

    let mut sample = Vec::with_capacity(SAMPLE_SIZE as usize);
    if file.take(SAMPLE_SIZE).read_to_end(&mut sample).is_err() {
        return false;
    }

    is_text_sample(&sample)
}

fn is_text_sample(sample: &[u8]) -> bool {
    sample.iter().all(|&b| b >= 32 || matches!(b, b'\n' | b'\r' | b'\t'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(bytes: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f
    }

    #[test]
    fn test_plain_text() {
        let f = file_with(b"// Copyright 2020 Acme\r\n\tfn main() {}\n");
        assert!(is_text(f.path()));
    }

    #[test]
    fn test_utf8_text() {
        let f = file_with("© 2020 Société Générale\n".as_bytes());
        assert!(is_text(f.path()));
    }

    #[test]
    fn test_empty_file_is_text() {
        let f = file_with(b"");
        assert!(is_text(f.path()));
    }

    #[test]
    fn test_null_byte_is_binary() {
        let f = file_with(b"Copyright\x00 2020");
        assert!(!is_text(f.path()));
    }

    #[test]
    fn test_control_byte_is_binary() {
        let f = file_with(b"\x1b[31mred\x1b[0m");
        assert!(!is_text(f.path()));
    }

    #[test]
    fn test_only_sample_is_inspected() {
        let mut bytes = vec![b'a'; SAMPLE_SIZE as usize];
        bytes.push(0);
        let f = file_with(&bytes);
        assert!(is_text(f.path()));
    }

    #[test]
    fn test_missing_or_directory_is_binary() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_text(&dir.path().join("nope")));
        assert!(!is_text(dir.path()));
    }
}
