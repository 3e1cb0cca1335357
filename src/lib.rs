//! Automatic classless route summarization (ACRS) for IPv4.
//!
//! Takes a list of routes (network, prefix length, metric) and returns the
//! smallest equivalent list: adjacent routes of equal size and metric are
//! merged into shorter prefixes, and routes covered by a broader route with
//! an equal or better metric are dropped.
//!
//! ```
//! use acrs::{parse_route_list, summarize};
//!
//! let routes = parse_route_list(&["10.0.0.0/24 10.0.1.0/24 10.0.1.128/25m4"]).unwrap();
//! let summary = summarize(&routes).unwrap();
//! assert!(summary.changed);
//! assert_eq!(summary.routes.len(), 1);
//! assert_eq!(summary.routes[0].to_string(), "10.0.0.0/23 in 0");
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Error, Result};
pub use input::{parse_route_list, parse_route_token};
pub use models::{AddressValue, Route};
pub use processing::{summarize, Summary};
