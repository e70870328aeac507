//! Tarball extraction into a sysroot directory.
//!
//! Sysroot images are gzipped tarballs; a plain tar is accepted too (sniffed
//! by the gzip magic). Structure is preserved as-is, no root stripping.
//! Entries that would land outside `dest_dir` are refused by `tar`.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::GzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Unpacks `archive_path` into `dest_dir`, which must already exist.
pub fn extract_tarball(archive_path: &Path, dest_dir: &Path) -> io::Result<()> {
    let mut file = File::open(archive_path)?;
    let gzipped = is_gzip(&mut file)?;
    let reader = BufReader::new(file);
    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    };

    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive.set_overwrite(true);
    archive.unpack(dest_dir)
}

fn is_gzip(file: &mut File) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let n = file.read(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(n == 2 && magic == GZIP_MAGIC)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    /// Builds an in-memory `.tgz` from `(path, contents)` pairs.
    pub(crate) fn tgz(files: &[(&str, &[u8])]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn extracts_gzip_preserving_structure() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("pkg.tgz");
        std::fs::write(
            &archive,
            tgz(&[
                ("usr/include/stdio.h", b"int printf();\n"),
                ("lib/libc.so.6", b"\x7fELF"),
            ]),
        )
        .unwrap();
        let dest = dir.path().join("root");
        std::fs::create_dir(&dest).unwrap();

        extract_tarball(&archive, &dest).unwrap();

        assert_eq!(
            std::fs::read(dest.join("usr/include/stdio.h")).unwrap(),
            b"int printf();\n"
        );
        assert_eq!(std::fs::read(dest.join("lib/libc.so.6")).unwrap(), b"\x7fELF");
    }

    #[test]
    fn extracts_plain_tar() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("pkg.tar");
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_size(3);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, "etc/motd", &b"hi\n"[..]).unwrap();
        std::fs::write(&archive, builder.into_inner().unwrap()).unwrap();

        extract_tarball(&archive, dir.path()).unwrap();
        assert_eq!(std::fs::read(dir.path().join("etc/motd")).unwrap(), b"hi\n");
    }

    #[test]
    fn corrupt_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("pkg.tgz");
        let mut bytes = GZIP_MAGIC.to_vec();
        bytes.extend_from_slice(b"not really gzip");
        std::fs::write(&archive, bytes).unwrap();
        assert!(extract_tarball(&archive, dir.path()).is_err());
    }

    #[test]
    fn missing_archive_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_tarball(&dir.path().join("nope.tgz"), dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
