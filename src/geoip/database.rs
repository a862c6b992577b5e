//! Database handle lifecycle.
//!
//! A [`DatabaseHandle`] owns one opened database file together with the layout
//! information read from its trailer. Handles are immutable once opened; the
//! file is released when the last owner drops it.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::{
    DATABASE_INFO_MARKER, DATABASE_INFO_MAX_SIZE, SEGMENT_RECORD_LENGTH, STRUCTURE_INFO_MAX_SIZE,
    STRUCTURE_MARKER,
};
use crate::error_handling::OpenError;
use crate::geoip::edition::{Edition, Segments};
use crate::geoip::encoding::latin1_to_utf8;
use crate::geoip::storage::{CacheMode, Storage};

/// Bytes read from the end of the file to locate the trailer markers.
const TRAILER_WINDOW: usize = DATABASE_INFO_MAX_SIZE + STRUCTURE_INFO_MAX_SIZE + 16;

/// One opened database.
#[derive(Debug)]
pub struct DatabaseHandle {
    path: PathBuf,
    cache_mode: CacheMode,
    edition: Edition,
    segments: u32,
    record_length: usize,
    info: Option<String>,
    storage: Storage,
}

/// Layout read from the structure trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Structure {
    edition: Edition,
    segments: u32,
    record_length: usize,
    /// Offset of the `FF FF FF` marker within the trailer window, if present.
    marker: Option<usize>,
}

impl DatabaseHandle {
    /// Opens a country IPv6 database.
    ///
    /// Any other edition is released before returning
    /// [`OpenError::InvalidEdition`].
    pub fn open(path: impl AsRef<Path>, cache_mode: CacheMode) -> Result<Self, OpenError> {
        let handle = Self::open_any(path, cache_mode)?;
        if handle.edition.is_country_v6() {
            log::info!(
                "Opened {} ({}, {:?}, {} bytes)",
                handle.path.display(),
                handle.edition,
                handle.cache_mode,
                handle.size()
            );
            Ok(handle)
        } else {
            let path = handle.path.clone();
            let edition = handle.edition;
            drop(handle);
            log::warn!(
                "Rejected {}: {} is not {}",
                path.display(),
                edition,
                Edition::REQUIRED
            );
            Err(OpenError::InvalidEdition { path, edition })
        }
    }

    /// Opens a database of any edition without validating it.
    ///
    /// Intended for inspection (`edition()`, `info()`); lookups through such a
    /// handle fail with `WrongEdition` unless it happens to be country IPv6.
    pub fn open_any(path: impl AsRef<Path>, cache_mode: CacheMode) -> Result<Self, OpenError> {
        let path = path.as_ref();
        let storage =
            Storage::open(path, cache_mode).map_err(|e| OpenError::open_failed(path, e))?;
        if storage.len() == 0 {
            return Err(OpenError::open_failed(
                path,
                io::Error::new(io::ErrorKind::InvalidData, "empty database file"),
            ));
        }

        let trailer = storage
            .read_tail(TRAILER_WINDOW)
            .map_err(|e| OpenError::open_failed(path, e))?;
        let structure = parse_structure(&trailer).map_err(|e| OpenError::open_failed(path, e))?;
        let info = parse_info(&trailer, structure.marker);

        log::debug!(
            "{}: edition {}, segments {}, record length {}",
            path.display(),
            structure.edition,
            structure.segments,
            structure.record_length
        );

        Ok(DatabaseHandle {
            path: path.to_path_buf(),
            cache_mode,
            edition: structure.edition,
            segments: structure.segments,
            record_length: structure.record_length,
            info,
            storage,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cache_mode(&self) -> CacheMode {
        self.cache_mode
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Free-form database info string (vendor, build date), if the file has one.
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Size of the database file in bytes.
    pub fn size(&self) -> u64 {
        self.storage.len()
    }

    pub(crate) fn segments(&self) -> u32 {
        self.segments
    }

    /// Reads the left and right records of trie node `node`.
    pub(crate) fn read_node(&self, node: u32) -> io::Result<(u32, u32)> {
        let width = self.record_length;
        let mut buf = [0u8; 8];
        let offset = u64::from(node) * 2 * width as u64;
        self.storage.read_at(offset, &mut buf[..2 * width])?;
        Ok((
            decode_record(&buf[..width]),
            decode_record(&buf[width..2 * width]),
        ))
    }
}

impl Drop for DatabaseHandle {
    fn drop(&mut self) {
        log::debug!("Released database {}", self.path.display());
    }
}

fn decode_record(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .fold(0u32, |acc, b| (acc << 8) | u32::from(*b))
}

/// Scans backwards for the structure marker and decodes the layout after it.
/// Files without a marker are plain country (IPv4) databases.
fn parse_structure(trailer: &[u8]) -> io::Result<Structure> {
    for i in 0..STRUCTURE_INFO_MAX_SIZE {
        let Some(pos) = trailer.len().checked_sub(STRUCTURE_MARKER.len() + i) else {
            break;
        };
        if trailer[pos..pos + STRUCTURE_MARKER.len()] != STRUCTURE_MARKER {
            continue;
        }
        let edition_at = pos + STRUCTURE_MARKER.len();
        let Some(&raw) = trailer.get(edition_at) else {
            continue;
        };
        let edition = Edition::from_byte(raw);
        let segments = match edition.segments() {
            Segments::Fixed(begin) => begin,
            Segments::Stored => {
                let start = edition_at + 1;
                let bytes = trailer
                    .get(start..start + SEGMENT_RECORD_LENGTH)
                    .ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("truncated segment value for {}", edition),
                        )
                    })?;
                decode_record(bytes)
            }
        };
        return Ok(Structure {
            edition,
            segments,
            record_length: edition.record_length(),
            marker: Some(pos),
        });
    }

    let edition = Edition::Country;
    Ok(Structure {
        edition,
        segments: match edition.segments() {
            Segments::Fixed(begin) => begin,
            Segments::Stored => 0,
        },
        record_length: edition.record_length(),
        marker: None,
    })
}

/// Scans backwards for the info marker; the text runs up to the structure
/// marker or the first NUL.
fn parse_info(trailer: &[u8], structure_marker: Option<usize>) -> Option<String> {
    for i in 0..DATABASE_INFO_MAX_SIZE {
        let pos = trailer.len().checked_sub(DATABASE_INFO_MARKER.len() + i)?;
        if trailer[pos..pos + DATABASE_INFO_MARKER.len()] != DATABASE_INFO_MARKER {
            continue;
        }
        let start = pos + DATABASE_INFO_MARKER.len();
        let end = structure_marker
            .filter(|marker| *marker >= start)
            .unwrap_or(trailer.len());
        let text = &trailer[start..end];
        let text = text.split(|b| *b == 0).next().unwrap_or_default();
        let info = latin1_to_utf8(text).trim().to_string();
        return (!info.is_empty()).then_some(info);
    }
    None
}
