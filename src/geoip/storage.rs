//! Byte access to an opened database under either cache mode.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// How the database bytes are held once opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Keep the file open and read nodes from it on demand.
    #[default]
    Standard,
    /// Read the whole file into memory at open time.
    MemoryCache,
}

impl From<bool> for CacheMode {
    fn from(use_memory_cache: bool) -> Self {
        if use_memory_cache {
            CacheMode::MemoryCache
        } else {
            CacheMode::Standard
        }
    }
}

/// Immutable backing bytes of a database. Reads take `&self` and never move a
/// shared cursor, so any number of threads may read concurrently.
pub(crate) enum Storage {
    Memory(Vec<u8>),
    File { file: File, len: u64 },
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
            Storage::File { len, .. } => write!(f, "File({} bytes)", len),
        }
    }
}

impl Storage {
    pub(crate) fn open(path: &Path, mode: CacheMode) -> io::Result<Self> {
        match mode {
            CacheMode::MemoryCache => Ok(Storage::Memory(std::fs::read(path)?)),
            CacheMode::Standard => {
                let file = File::open(path)?;
                let len = file.metadata()?.len();
                Ok(Storage::File { file, len })
            }
        }
    }

    pub(crate) fn len(&self) -> u64 {
        match self {
            Storage::Memory(bytes) => bytes.len() as u64,
            Storage::File { len, .. } => *len,
        }
    }

    /// Fills `buf` from `offset`, failing with `UnexpectedEof` past the end.
    pub(crate) fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let end = offset
            .checked_add(buf.len() as u64)
            .filter(|end| *end <= self.len())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("read of {} bytes at offset {} past end", buf.len(), offset),
                )
            })?;
        match self {
            Storage::Memory(bytes) => {
                buf.copy_from_slice(&bytes[offset as usize..end as usize]);
                Ok(())
            }
            Storage::File { file, .. } => read_exact_at(file, buf, offset),
        }
    }

    /// Returns up to the last `n` bytes.
    pub(crate) fn read_tail(&self, n: usize) -> io::Result<Vec<u8>> {
        let take = (n as u64).min(self.len());
        let mut buf = vec![0u8; take as usize];
        self.read_at(self.len() - take, &mut buf)?;
        Ok(buf)
    }
}

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, offset)
}

#[cfg(windows)]
fn read_exact_at(file: &File, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    while !buf.is_empty() {
        match file.seek_read(buf, offset)? {
            0 => return Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
            n => {
                buf = &mut buf[n..];
                offset += n as u64;
            }
        }
    }
    Ok(())
}
