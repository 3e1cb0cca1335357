//! Value types for route summarization.
//!
//! - [`AddressValue`] - IPv4 address with a contiguous subnet mask
//! - [`Route`] - an [`AddressValue`] with a metric

mod address;
mod route;

// Re-export public types
pub use address::{
    is_valid_mask, is_valid_prefix_len, mask_to_prefix_len, prefix_len_to_mask, AddrSpec,
    AddressValue, MaskSpec, MAX_LENGTH,
};
pub use route::{is_valid_metric, Route, MAX_METRIC};
