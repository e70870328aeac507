//! SHA-1 verification of downloaded sysroot tarballs.
//!
//! The catalog pins each tarball by SHA-1; hashing happens once per install,
//! against the freshly downloaded file, before anything is extracted.

use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read size; keeps memory use independent of the tarball size.
const BUF_SIZE: usize = 1024 * 1024;

/// Compute SHA-1 of a file and return the digest as lowercase hex.
pub fn sha1_path(path: &Path) -> io::Result<String> {
    let mut f = File::open(path)?;
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match f.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Case-insensitive hex comparison; surrounding whitespace is ignored.
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(actual.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sha1_path_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let digest = sha1_path(f.path()).unwrap();
        assert_eq!(digest, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn sha1_path_known_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        let digest = sha1_path(f.path()).unwrap();
        assert_eq!(digest, "f572d396fae9206628714fb2ce00f72e94f2258f");
    }

    #[test]
    fn sha1_path_spans_several_chunks() {
        let data: Vec<u8> = (0..3 * BUF_SIZE + 7).map(|i| (i % 251) as u8).collect();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&data).unwrap();
        f.flush().unwrap();
        let digest = sha1_path(f.path()).unwrap();
        assert_eq!(digest, "0b64c63613488a28f59c3a9dae42ff54f5c501b1");
    }

    #[test]
    fn sha1_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha1_path(&dir.path().join("absent.tgz")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn digests_match_ignores_case() {
        assert!(digests_match(
            "A5A2483123F6BD63F3F029996451426168606697",
            "a5a2483123f6bd63f3f029996451426168606697"
        ));
        assert!(!digests_match(
            "a5a2483123f6bd63f3f029996451426168606697",
            "a5a2483123f6bd63f3f029996451426168606698"
        ));
    }
}
