//! Stamp file: records the exact URL installed in a sysroot directory.
//!
//! A directory is current iff its stamp is byte-equal to the URL computed now.
//! The stamp is written last, via a temp file and rename, so an interrupted
//! install never leaves a stamp that looks valid.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Stamp file name inside each sysroot directory.
pub const STAMP_FILE: &str = ".stamp";

/// Reads the stamp, or `None` if it is missing or unreadable.
pub fn read_stamp(stamp_path: &Path) -> Option<String> {
    fs::read(stamp_path)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

/// True if the stamp exists and equals `url` exactly.
pub fn is_current(stamp_path: &Path, url: &str) -> bool {
    read_stamp(stamp_path).as_deref() == Some(url)
}

/// Writes `url` (no trailing newline) to the stamp.
pub fn write_stamp(stamp_path: &Path, url: &str) -> io::Result<()> {
    let tmp = tmp_path(stamp_path);
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(url.as_bytes())?;
        f.sync_all()?;
    }
    fs::rename(&tmp, stamp_path)
}

fn tmp_path(stamp_path: &Path) -> PathBuf {
    let mut o = stamp_path.as_os_str().to_owned();
    o.push(".tmp");
    PathBuf::from(o)
}
