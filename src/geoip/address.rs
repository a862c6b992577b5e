//! Textual IPv6 address parsing.
//!
//! Parsing is purely syntactic. Hostnames are never resolved, and anything that
//! is not an IPv6 literal collapses to [`AddressKey::NULL`], which the lookup
//! engine treats as a miss.

use std::fmt;
use std::net::Ipv6Addr;

/// A parsed IPv6 address in its 128-bit numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressKey(u128);

impl AddressKey {
    /// "No address". Produced for malformed input and for `::`.
    pub const NULL: AddressKey = AddressKey(0);

    /// Parses a host string in IPv6 notation.
    ///
    /// Accepts surrounding whitespace, a bracketed literal (`[2001:db8::1]`) and
    /// a trailing zone index (`fe80::1%eth0`). Everything else that fails to
    /// parse yields [`AddressKey::NULL`].
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let unbracketed = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(trimmed);
        let literal = unbracketed
            .split_once('%')
            .map(|(addr, _zone)| addr)
            .unwrap_or(unbracketed);

        match literal.parse::<Ipv6Addr>() {
            Ok(addr) => AddressKey::from(addr),
            Err(_) => {
                log::debug!("Not an IPv6 literal: {:?}", text);
                AddressKey::NULL
            }
        }
    }

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    /// Bit at `depth`, where depth 127 is the most significant bit.
    pub(crate) fn bit(self, depth: usize) -> bool {
        (self.0 >> depth) & 1 == 1
    }

    pub fn as_u128(self) -> u128 {
        self.0
    }
}

impl From<Ipv6Addr> for AddressKey {
    fn from(addr: Ipv6Addr) -> Self {
        AddressKey(u128::from(addr))
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Ipv6Addr::from(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_literal() {
        let key = AddressKey::parse("2001:4860:4860::8888");
        assert_eq!(key.as_u128(), 0x2001_4860_4860_0000_0000_0000_0000_8888);
        assert!(!key.is_null());
    }

    #[test]
    fn test_parse_accepts_brackets_zone_and_whitespace() {
        let expected = AddressKey::parse("fe80::1");
        assert_eq!(AddressKey::parse("  fe80::1\n"), expected);
        assert_eq!(AddressKey::parse("[fe80::1]"), expected);
        assert_eq!(AddressKey::parse("fe80::1%eth0"), expected);
    }

    #[test]
    fn test_malformed_input_is_null() {
        for text in ["", "not-an-address", "example.com", "1.2.3.4", "2001:::1", "::g"] {
            assert!(AddressKey::parse(text).is_null(), "{:?} should be null", text);
        }
    }

    #[test]
    fn test_unspecified_address_is_null() {
        assert!(AddressKey::parse("::").is_null());
    }

    #[test]
    fn test_bit_order_is_msb_first() {
        let key = AddressKey::parse("8000::1");
        assert!(key.bit(127));
        assert!(!key.bit(126));
        assert!(key.bit(0));
        assert!(!key.bit(1));
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(
            AddressKey::parse("2001:0db8:0000::0001").to_string(),
            "2001:db8::1"
        );
    }
}
