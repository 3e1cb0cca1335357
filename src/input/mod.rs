//! Parsing of user supplied route lists.
//!
//! - [`token`] - `addr/plen[m<metric>]` tokens from the command line
//! - [`form`] - CGI form bodies

mod form;
mod token;

pub use form::{form_field, SUMMARY_FIELD};
pub use token::{parse_route_list, parse_route_token};
