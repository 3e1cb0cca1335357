//! Rendering of summarized route lists.
//!
//! - [`terminal`] - one line per route for the command line
//! - [`json`] - JSON document of a [`crate::Summary`]
//! - [`web`] - CGI result page

mod json;
mod terminal;
mod web;

pub use json::summary_json;
pub use terminal::{format_route, route_lines};
pub use web::{cgi_error_page, cgi_page, html_escape};
