//! IPv4 address and subnet mask value.
//!
//! [`AddressValue`] pairs an address with a contiguous subnet mask. The
//! network, broadcast and host mask are always derived from the mask, never
//! stored, so host bits left in the address never leak into them.

use crate::error::{Error, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a prefix length to a subnet mask as u32.
///
/// Returns `None` if `len` is longer than [`MAX_LENGTH`].
///
/// # Examples
/// ```
/// use acrs::models::prefix_len_to_mask;
/// assert_eq!(prefix_len_to_mask(24), Some(0xFFFFFF00));
/// assert_eq!(prefix_len_to_mask(0), Some(0));
/// ```
pub fn prefix_len_to_mask(len: u8) -> Option<u32> {
    if len > MAX_LENGTH {
        return None;
    }
    if len == 0 {
        return Some(0);
    }
    Some(u32::MAX << (MAX_LENGTH - len))
}

/// Count the leading one bits of `mask`, octet by octet.
///
/// Counting in an octet stops at its first zero bit and resumes with the next
/// octet. Contiguity is not checked here, see [`is_valid_mask`].
pub fn mask_to_prefix_len(mask: u32) -> u8 {
    mask.to_be_bytes()
        .iter()
        .map(|octet| octet.leading_ones() as u8)
        .sum()
}

/// A mask is valid when no one bit follows a zero bit.
pub fn is_valid_mask(mask: u32) -> bool {
    mask.leading_ones() + mask.trailing_zeros() == u32::BITS
}

pub fn is_valid_prefix_len(len: i64) -> bool {
    (0..=MAX_LENGTH as i64).contains(&len)
}

/// How an address is handed to [`AddressValue::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrSpec<'a> {
    /// Dotted decimal, e.g. `"192.168.0.1"`.
    Dotted(&'a str),
    /// Host order integer, e.g. `0xC0A80001`.
    HostOrder(u32),
}

impl<'a> From<&'a str> for AddrSpec<'a> {
    fn from(s: &'a str) -> Self {
        AddrSpec::Dotted(s)
    }
}

impl From<u32> for AddrSpec<'_> {
    fn from(bits: u32) -> Self {
        AddrSpec::HostOrder(bits)
    }
}

impl From<Ipv4Addr> for AddrSpec<'_> {
    fn from(addr: Ipv4Addr) -> Self {
        AddrSpec::HostOrder(u32::from(addr))
    }
}

/// How a mask is handed to [`AddressValue::new`].
///
/// An integer is read as a prefix length when it lies in `0..=32` and only
/// otherwise as a raw subnet mask, so `24` is always a /24 and never the
/// (invalid) mask `0.0.0.24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSpec<'a> {
    /// Dotted decimal subnet mask, e.g. `"255.255.255.0"`.
    Dotted(&'a str),
    /// Prefix length, or failing that a host order subnet mask.
    Int(i64),
}

impl<'a> From<&'a str> for MaskSpec<'a> {
    fn from(s: &'a str) -> Self {
        MaskSpec::Dotted(s)
    }
}

impl From<u8> for MaskSpec<'_> {
    fn from(v: u8) -> Self {
        MaskSpec::Int(v.into())
    }
}

impl From<i32> for MaskSpec<'_> {
    fn from(v: i32) -> Self {
        MaskSpec::Int(v.into())
    }
}

impl From<u32> for MaskSpec<'_> {
    fn from(v: u32) -> Self {
        MaskSpec::Int(v.into())
    }
}

impl From<i64> for MaskSpec<'_> {
    fn from(v: i64) -> Self {
        MaskSpec::Int(v)
    }
}

fn parse_addr(spec: AddrSpec) -> Result<Ipv4Addr> {
    match spec {
        AddrSpec::Dotted(s) => {
            Ipv4Addr::from_str(s.trim()).map_err(|_| Error::InvalidAddress(s.to_string()))
        }
        AddrSpec::HostOrder(bits) => Ok(Ipv4Addr::from(bits)),
    }
}

fn parse_mask(spec: MaskSpec) -> Result<u8> {
    match spec {
        MaskSpec::Dotted(s) => {
            let mask = Ipv4Addr::from_str(s.trim())
                .map_err(|_| Error::InvalidMask(s.to_string()))?;
            let bits = u32::from(mask);
            if !is_valid_mask(bits) {
                return Err(Error::InvalidMask(s.to_string()));
            }
            Ok(mask_to_prefix_len(bits))
        }
        MaskSpec::Int(v) if is_valid_prefix_len(v) => Ok(v as u8),
        MaskSpec::Int(v) => {
            let bits = u32::try_from(v).map_err(|_| Error::InvalidMask(v.to_string()))?;
            if !is_valid_mask(bits) {
                return Err(Error::InvalidMask(Ipv4Addr::from(bits).to_string()));
            }
            Ok(mask_to_prefix_len(bits))
        }
    }
}

/// IPv4 address with a contiguous subnet mask.
///
/// Construction never fails; a value built from bad input is simply not
/// valid and all of its getters return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressValue {
    address: Option<Ipv4Addr>,
    prefix_len: Option<u8>,
}

impl AddressValue {
    /// Build a value from an address and a mask or prefix length.
    ///
    /// ```
    /// use acrs::models::AddressValue;
    /// let a = AddressValue::new("192.168.0.1", 24);
    /// let b = AddressValue::new("192.168.0.1", "255.255.255.0");
    /// let c = AddressValue::new(0xC0A80001u32, 0xFFFFFF00u32);
    /// assert_eq!(a, b);
    /// assert_eq!(b, c);
    /// ```
    pub fn new<'a>(addr: impl Into<AddrSpec<'a>>, mask: impl Into<MaskSpec<'a>>) -> Self {
        AddressValue {
            address: parse_addr(addr.into()).ok(),
            prefix_len: parse_mask(mask.into()).ok(),
        }
    }

    /// Like [`AddressValue::new`] but reports the first problem found.
    pub fn try_new<'a>(
        addr: impl Into<AddrSpec<'a>>,
        mask: impl Into<MaskSpec<'a>>,
    ) -> Result<Self> {
        Ok(AddressValue {
            address: Some(parse_addr(addr.into())?),
            prefix_len: Some(parse_mask(mask.into())?),
        })
    }

    /// A host address (/32).
    pub fn host<'a>(addr: impl Into<AddrSpec<'a>>) -> Self {
        AddressValue::new(addr, MAX_LENGTH)
    }

    pub fn is_valid(&self) -> bool {
        self.address.is_some() && self.prefix_len.is_some()
    }

    fn bits(&self) -> Option<(u32, u32)> {
        let addr = u32::from(self.address?);
        let mask = prefix_len_to_mask(self.prefix_len?)?;
        Some((addr, mask))
    }

    /// The address as given, host bits included.
    pub fn address(&self) -> Option<Ipv4Addr> {
        self.bits().map(|(addr, _)| Ipv4Addr::from(addr))
    }

    pub fn mask(&self) -> Option<Ipv4Addr> {
        self.bits().map(|(_, mask)| Ipv4Addr::from(mask))
    }

    pub fn hostmask(&self) -> Option<Ipv4Addr> {
        self.bits().map(|(_, mask)| Ipv4Addr::from(!mask))
    }

    pub fn network(&self) -> Option<Ipv4Addr> {
        self.bits().map(|(addr, mask)| Ipv4Addr::from(addr & mask))
    }

    pub fn broadcast(&self) -> Option<Ipv4Addr> {
        self.bits()
            .map(|(addr, mask)| Ipv4Addr::from((addr & mask) | !mask))
    }

    pub fn prefix_len(&self) -> Option<u8> {
        if self.is_valid() {
            self.prefix_len
        } else {
            None
        }
    }

    /// Replace the mask with one of `len` bits. On error nothing changes.
    pub fn set_prefix_len(&mut self, len: u32) -> Result<()> {
        if !is_valid_prefix_len(len.into()) {
            return Err(Error::InvalidPrefixLength(len));
        }
        self.prefix_len = Some(len as u8);
        Ok(())
    }

    /// Replace the mask. On error nothing changes.
    pub fn set_mask<'a>(&mut self, mask: impl Into<MaskSpec<'a>>) -> Result<()> {
        self.prefix_len = Some(parse_mask(mask.into())?);
        Ok(())
    }

    /// Replace the address. On error nothing changes.
    pub fn set_address<'a>(&mut self, addr: impl Into<AddrSpec<'a>>) -> Result<()> {
        self.address = Some(parse_addr(addr.into())?);
        Ok(())
    }

    /// Shorten the prefix by one bit, doubling the covered range.
    pub fn decrement_prefix_len(&mut self) -> Result<()> {
        match self.prefix_len() {
            Some(len) if len > 0 => self.set_prefix_len(u32::from(len) - 1),
            Some(_) => Err(Error::InvalidPrefixLength(0)),
            None => Err(Error::InvalidMask("address not valid".to_string())),
        }
    }

    /// Human readable field dump, including the parts that are not valid.
    pub fn describe(&self) -> String {
        let address = self
            .address
            .map_or_else(|| "not valid".to_string(), |a| a.to_string());
        let prefix_len = self
            .prefix_len
            .map_or_else(|| "not valid".to_string(), |len| len.to_string());
        format!("address {address}, prefix length {prefix_len}")
    }

    /// True if `other`'s network lies inside this value's range.
    pub fn covers(&self, other: &AddressValue) -> bool {
        match (self.bits(), other.network()) {
            (Some((addr, mask)), Some(net)) => u32::from(net) & mask == addr & mask,
            _ => false,
        }
    }
}

impl std::fmt::Display for AddressValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.network(), self.prefix_len()) {
            (Some(net), Some(len)) => write!(f, "{}/{}", net, len),
            _ => write!(f, "Address not valid."),
        }
    }
}

impl FromStr for AddressValue {
    type Err = Error;

    /// Parse `addr/plen` or `addr/dotted-mask`. A bare address is a /32.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [addr] => AddressValue::try_new(*addr, MAX_LENGTH),
            [addr, mask] if mask.contains('.') => AddressValue::try_new(*addr, *mask),
            [addr, mask] => {
                let len: i64 = mask
                    .parse()
                    .map_err(|_| Error::MalformedToken(s.to_string()))?;
                AddressValue::try_new(*addr, len)
            }
            _ => Err(Error::MalformedToken(s.to_string())),
        }
    }
}

impl Serialize for AddressValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        match (self.network(), self.prefix_len()) {
            (Some(net), Some(len)) => serializer.serialize_str(&format!("{}/{}", net, len)),
            _ => Err(serde::ser::Error::custom("address not valid")),
        }
    }
}

impl<'de> Deserialize<'de> for AddressValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<AddressValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AddressValue::from_str(&s).map_err(de::Error::custom)
    }
}
