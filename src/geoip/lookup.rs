//! Address-to-record resolution over the database trie.

use std::fmt;
use std::io;
use std::num::NonZeroU8;

use crate::config::IPV6_BITS;
use crate::geoip::address::AddressKey;
use crate::geoip::database::DatabaseHandle;

/// Index into the country table. Id 0 never denotes a country, so it is
/// unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(NonZeroU8);

impl RecordId {
    /// Returns `None` for the reserved id 0.
    pub fn new(id: u8) -> Option<Self> {
        NonZeroU8::new(id).map(RecordId)
    }

    pub fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves `key` against `handle`.
///
/// Returns `None` for the null key, for a leaf of id 0, and when the trie
/// cannot be walked (logged as a warning).
pub fn resolve(handle: &DatabaseHandle, key: AddressKey) -> Option<RecordId> {
    if key.is_null() {
        return None;
    }
    match seek_record(handle, key) {
        Ok(Some(record)) => {
            let id = record - handle.segments();
            u8::try_from(id).ok().and_then(RecordId::new)
        }
        Ok(None) => {
            log::warn!(
                "Error traversing database {} for {}: no leaf after {} bits",
                handle.path().display(),
                key,
                IPV6_BITS
            );
            None
        }
        Err(e) => {
            log::warn!(
                "Error traversing database {} for {}: {}",
                handle.path().display(),
                key,
                e
            );
            None
        }
    }
}

/// Walks the trie from the root, most significant bit first, until a record
/// at or above the leaf offset is reached.
fn seek_record(handle: &DatabaseHandle, key: AddressKey) -> io::Result<Option<u32>> {
    let segments = handle.segments();
    let mut node = 0u32;
    for depth in (0..IPV6_BITS).rev() {
        let (left, right) = handle.read_node(node)?;
        let record = if key.bit(depth) { right } else { left };
        if record >= segments {
            return Ok(Some(record));
        }
        node = record;
    }
    Ok(None)
}
