//! IPv4 route: an [`AddressValue`] plus a metric.

use super::address::{AddrSpec, AddressValue, MaskSpec, MAX_LENGTH};
use crate::error::{Error, Result};
use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Highest metric a route may carry.
pub const MAX_METRIC: u32 = 65535;

pub fn is_valid_metric(metric: u32) -> bool {
    metric <= MAX_METRIC
}

/// A route towards a network, with a cost. Lower metrics are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    addr: AddressValue,
    metric: Option<u16>,
}

impl Route {
    /// Route with metric 0.
    pub fn new<'a>(addr: impl Into<AddrSpec<'a>>, mask: impl Into<MaskSpec<'a>>) -> Self {
        Route::with_metric(addr, mask, 0)
    }

    pub fn with_metric<'a>(
        addr: impl Into<AddrSpec<'a>>,
        mask: impl Into<MaskSpec<'a>>,
        metric: u32,
    ) -> Self {
        Route::from_address(AddressValue::new(addr, mask), metric)
    }

    pub fn from_address(addr: AddressValue, metric: u32) -> Self {
        Route {
            addr,
            metric: u16::try_from(metric).ok(),
        }
    }

    /// Like [`Route::with_metric`] but reports the first problem found.
    pub fn try_new<'a>(
        addr: impl Into<AddrSpec<'a>>,
        mask: impl Into<MaskSpec<'a>>,
        metric: u32,
    ) -> Result<Self> {
        let addr = AddressValue::try_new(addr, mask)?;
        if !is_valid_metric(metric) {
            return Err(Error::InvalidMetric(metric));
        }
        Ok(Route::from_address(addr, metric))
    }

    /// Host route (/32) with metric 0.
    pub fn host<'a>(addr: impl Into<AddrSpec<'a>>) -> Self {
        Route::new(addr, MAX_LENGTH)
    }

    pub fn is_valid(&self) -> bool {
        self.addr.is_valid() && self.metric.is_some()
    }

    pub fn metric(&self) -> Option<u16> {
        if self.is_valid() {
            self.metric
        } else {
            None
        }
    }

    /// Replace the metric. On error nothing changes.
    pub fn set_metric(&mut self, metric: u32) -> Result<()> {
        let metric = u16::try_from(metric).map_err(|_| Error::InvalidMetric(metric))?;
        self.metric = Some(metric);
        Ok(())
    }

    /// The embedded address and mask, regardless of metric validity.
    pub fn address_value(&self) -> &AddressValue {
        &self.addr
    }

    pub fn address(&self) -> Option<Ipv4Addr> {
        self.valid().and_then(|r| r.addr.address())
    }

    pub fn mask(&self) -> Option<Ipv4Addr> {
        self.valid().and_then(|r| r.addr.mask())
    }

    pub fn hostmask(&self) -> Option<Ipv4Addr> {
        self.valid().and_then(|r| r.addr.hostmask())
    }

    pub fn network(&self) -> Option<Ipv4Addr> {
        self.valid().and_then(|r| r.addr.network())
    }

    pub fn broadcast(&self) -> Option<Ipv4Addr> {
        self.valid().and_then(|r| r.addr.broadcast())
    }

    pub fn prefix_len(&self) -> Option<u8> {
        self.valid().and_then(|r| r.addr.prefix_len())
    }

    pub fn set_prefix_len(&mut self, len: u32) -> Result<()> {
        self.addr.set_prefix_len(len)
    }

    pub fn decrement_prefix_len(&mut self) -> Result<()> {
        self.addr.decrement_prefix_len()
    }

    /// Human readable field dump, including the parts that are not valid.
    pub fn describe(&self) -> String {
        match self.metric {
            Some(metric) => format!("{}, metric {}", self.addr.describe(), metric),
            None => format!("{}, metric out of range", self.addr.describe()),
        }
    }

    /// True if `other`'s network lies inside this route's range.
    pub fn covers(&self, other: &Route) -> bool {
        self.is_valid() && other.is_valid() && self.addr.covers(&other.addr)
    }

    fn valid(&self) -> Option<&Route> {
        self.is_valid().then_some(self)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.metric() {
            Some(metric) => write!(f, "{} in {}", self.addr, metric),
            None => write!(f, "Route not valid."),
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    /// Parse the command line form `addr/plen[m<metric>]`.
    fn from_str(s: &str) -> Result<Self> {
        crate::input::parse_route_token(s)
    }
}

impl Serialize for Route {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let metric = self
            .metric()
            .ok_or_else(|| <S::Error as serde::ser::Error>::custom("route not valid"))?;
        let mut state = serializer.serialize_struct("Route", 2)?;
        state.serialize_field("cidr", &self.addr)?;
        state.serialize_field("metric", &metric)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Route, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            cidr: AddressValue,
            #[serde(default)]
            metric: u32,
        }

        let repr = Repr::deserialize(deserializer)?;
        if !is_valid_metric(repr.metric) {
            return Err(de::Error::custom(Error::InvalidMetric(repr.metric)));
        }
        Ok(Route::from_address(repr.cidr, repr.metric))
    }
}
