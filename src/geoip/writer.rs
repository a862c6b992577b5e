//! Builds databases in the legacy binary layout.
//!
//! Used to produce fixtures and small custom databases. Networks are inserted
//! into an in-memory binary trie which is then serialized node by node,
//! followed by the info string and the structure trailer.

use std::io;
use std::net::Ipv6Addr;
use std::path::Path;

use crate::config::{DATABASE_INFO_MARKER, IPV6_BITS, SEGMENT_RECORD_LENGTH, STRUCTURE_MARKER};
use crate::geoip::edition::{Edition, Segments};
use crate::geoip::lookup::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    Node(u32),
    Leaf(u8),
}

/// Incremental builder for a country database.
///
/// Later inserts override earlier overlapping ones along their own prefix.
#[derive(Debug, Clone)]
pub struct DatabaseWriter {
    nodes: Vec<[Child; 2]>,
    edition: Edition,
    info: String,
}

impl Default for DatabaseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseWriter {
    /// An empty country IPv6 database: every address misses.
    pub fn new() -> Self {
        DatabaseWriter {
            nodes: vec![[Child::Leaf(0); 2]],
            edition: Edition::CountryV6,
            info: String::new(),
        }
    }

    /// Overrides the edition tag written to the trailer.
    pub fn edition(mut self, edition: Edition) -> Self {
        self.edition = edition;
        self
    }

    /// Sets the info string. Characters outside Latin-1 are written as `?`.
    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Maps `network/prefix_len` to `country`.
    pub fn insert(
        &mut self,
        network: Ipv6Addr,
        prefix_len: u8,
        country: RecordId,
    ) -> io::Result<&mut Self> {
        self.insert_leaf(network, prefix_len, country.get())
    }

    /// Maps `network/prefix_len` back to "no record".
    pub fn remove(&mut self, network: Ipv6Addr, prefix_len: u8) -> io::Result<&mut Self> {
        self.insert_leaf(network, prefix_len, 0)
    }

    fn insert_leaf(&mut self, network: Ipv6Addr, prefix_len: u8, leaf: u8) -> io::Result<&mut Self> {
        let bits = usize::from(prefix_len);
        if bits == 0 || bits > IPV6_BITS {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("prefix length {} outside 1..=128", prefix_len),
            ));
        }

        let key = u128::from(network);
        let mut node = 0usize;
        for i in 0..bits {
            let side = ((key >> (IPV6_BITS - 1 - i)) & 1) as usize;
            if i == bits - 1 {
                self.nodes[node][side] = Child::Leaf(leaf);
                break;
            }
            node = match self.nodes[node][side] {
                Child::Node(next) => next as usize,
                Child::Leaf(inherited) => {
                    let next = self.nodes.len();
                    self.nodes.push([Child::Leaf(inherited); 2]);
                    self.nodes[node][side] = Child::Node(next as u32);
                    next
                }
            };
        }
        Ok(self)
    }

    /// Number of trie nodes built so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Serializes the database.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let width = self.edition.record_length();
        let node_count = u32::try_from(self.nodes.len()).map_err(|_| too_large())?;
        let (leaf_base, stored_segments) = match self.edition.segments() {
            Segments::Fixed(begin) if node_count >= begin => return Err(too_large()),
            Segments::Fixed(begin) => (begin, None),
            Segments::Stored => (node_count, Some(node_count)),
        };

        let mut out = Vec::with_capacity(self.nodes.len() * 2 * width + self.info.len() + 16);
        for pair in &self.nodes {
            for child in pair {
                let value = match *child {
                    Child::Node(next) => next,
                    Child::Leaf(id) => leaf_base + u32::from(id),
                };
                out.extend_from_slice(&value.to_le_bytes()[..width]);
            }
        }

        out.extend_from_slice(&DATABASE_INFO_MARKER);
        out.extend(
            self.info
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')),
        );

        out.extend_from_slice(&STRUCTURE_MARKER);
        out.push(self.edition.as_byte());
        if let Some(segments) = stored_segments {
            out.extend_from_slice(&segments.to_le_bytes()[..SEGMENT_RECORD_LENGTH]);
        }
        Ok(out)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.to_bytes()?)
    }
}

fn too_large() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "trie has more nodes than the edition's record space",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COUNTRY_BEGIN;

    fn id(n: u8) -> RecordId {
        RecordId::new(n).unwrap()
    }

    #[test]
    fn test_empty_database_layout() {
        let bytes = DatabaseWriter::new().to_bytes().unwrap();
        let leaf = COUNTRY_BEGIN.to_le_bytes();
        assert_eq!(&bytes[..3], &leaf[..3]);
        assert_eq!(&bytes[3..6], &leaf[..3]);
        assert_eq!(&bytes[6..9], &DATABASE_INFO_MARKER);
        assert_eq!(&bytes[9..], &[0xFF, 0xFF, 0xFF, 12]);
    }

    #[test]
    fn test_insert_creates_one_node_per_bit() {
        let mut writer = DatabaseWriter::new();
        writer.insert("2001:db8::".parse().unwrap(), 32, id(1)).unwrap();
        assert_eq!(writer.node_count(), 32);
        // Sharing a prefix reuses the existing path.
        writer.insert("2001:db9::".parse().unwrap(), 32, id(2)).unwrap();
        assert!(writer.node_count() < 64);
    }

    #[test]
    fn test_rejects_bad_prefix_lengths() {
        let mut writer = DatabaseWriter::new();
        assert!(writer.insert(Ipv6Addr::UNSPECIFIED, 0, id(1)).is_err());
        assert!(writer.insert(Ipv6Addr::UNSPECIFIED, 129, id(1)).is_err());
    }

    #[test]
    fn test_non_latin1_info_is_replaced() {
        let bytes = DatabaseWriter::new().info("a€b").to_bytes().unwrap();
        let tail = &bytes[bytes.len() - 7..];
        assert_eq!(&tail[..3], b"a?b");
    }

    #[test]
    fn test_stored_segment_editions_write_segment_value() {
        let bytes = DatabaseWriter::new()
            .edition(Edition::CityRev1)
            .to_bytes()
            .unwrap();
        // One node, so the stored segment value is 1.
        assert_eq!(&bytes[bytes.len() - 4..], &[2, 1, 0, 0]);
    }
}
