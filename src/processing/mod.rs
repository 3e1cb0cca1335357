//! Route summarization logic.
//!
//! - [`aggregate`] - merging of adjacent equal-cost routes
//! - [`overlap`] - removal of routes covered by a broader route
//! - [`summarize`] - validation plus both passes

mod aggregate;
mod overlap;
mod summarize;

// Re-export public functions
pub use aggregate::{aggregate, aggregation_key, aggregation_order, mergeable};
pub use overlap::{overlap_key, overlap_order, redundant, remove_overlap};
pub use summarize::{summarize, validate, Summary};
