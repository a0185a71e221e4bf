//! Syntactic IP address checks.
//!
//! These are "looks like an address" heuristics, not parsers: out-of-range
//! IPv4 octets such as `999` pass, and IPv6 compression rules and group counts
//! are not enforced. Use [`std::net::IpAddr`] when real parsing is needed.

use std::sync::LazyLock;

use regex::Regex;

/// Four dot-separated groups of one to three ASCII digits.
static IPV4_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPv4 pattern compiles")
});

/// One to seven colon-terminated groups of up to four hex digits, then a final
/// group of up to four hex digits.
static IPV6_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{0,4}:){1,7}[0-9a-fA-F]{0,4}$").expect("IPv6 pattern compiles")
});

/// Result of checking a candidate string against both address shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpShape {
    pub ipv4: bool,
    pub ipv6: bool,
}

impl IpShape {
    pub fn of(candidate: &str) -> Self {
        Self {
            ipv4: looks_like_ipv4(candidate),
            ipv6: looks_like_ipv6(candidate),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ipv4 || self.ipv6
    }
}

pub fn looks_like_ipv4(candidate: &str) -> bool {
    IPV4_SHAPE.is_match(candidate)
}

pub fn looks_like_ipv6(candidate: &str) -> bool {
    IPV6_SHAPE.is_match(candidate)
}

/// True when `candidate` has the shape of either an IPv4 or an IPv6 address.
pub fn looks_like_ip_address(candidate: &str) -> bool {
    IpShape::of(candidate).is_valid()
}
