//! Tarball transport.
//!
//! The installer only depends on the [`Fetcher`] trait; [`CurlFetcher`] is the
//! libcurl-backed implementation (single GET, redirects followed, non-2xx is
//! an error). Retries are left to whoever invokes the installer.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Error returned by a single fetch (curl failure, HTTP error, or local write failure).
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, timeout, TLS, ...).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Creating or writing the destination file failed.
    Io(io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Io(e) => write!(f, "write: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Io(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}

/// Downloads `url` into the file at `dest`, returning the number of bytes written.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        (**self).fetch(url, dest)
    }
}

/// Transfer limits for [`CurlFetcher`].
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Whole-transfer ceiling; sysroot images are a few hundred MiB.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
        }
    }
}

/// Blocking single-stream GET via libcurl.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut file = File::create(dest).map_err(FetchError::Io)?;
        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.timeout(self.opts.timeout)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            let res = transfer.perform();
            res
        };

        if let Some(e) = write_err {
            return Err(FetchError::Io(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        file.sync_all().map_err(FetchError::Io)?;
        tracing::debug!(url, bytes = written, "fetched {}", dest.display());
        Ok(written)
    }
}
