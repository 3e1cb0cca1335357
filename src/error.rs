//! Error type shared by the library and the `acrs` binary.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("invalid subnet mask: {0}")]
    InvalidMask(String),

    #[error("prefix length {0} is outside 0..=32")]
    InvalidPrefixLength(u32),

    #[error("metric {0} is outside 0..=65535")]
    InvalidMetric(u32),

    #[error("route at index {index} is not valid: {route}")]
    InvalidRoute { index: usize, route: String },

    #[error("use CIDR notation (e.g. 1.1.1.0/24 or 1.1.1.0/24m5): {0}")]
    MalformedToken(String),

    #[error("one or more valid routes required")]
    NoRoutes,

    #[error("{count} routes given, limit is {limit}")]
    TooManyRoutes { count: usize, limit: usize },

    #[error("missing form field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
