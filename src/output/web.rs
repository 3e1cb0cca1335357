//! CGI result page.
//!
//! Every failure ends up as a message on the page; nothing is swallowed.

use crate::error::{Error, Result};
use crate::input::{form_field, parse_route_list, SUMMARY_FIELD};
use crate::output::format_route;
use crate::processing::summarize;
use itertools::Itertools;

const HEADER: &str = "Content-type: text/html\n\n\
<h1>Results:</h1>\n\
(Use your browser's back button to return to the previous page.)\n\
</br></br>";

/// Escape text for inclusion in HTML.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn result_lines(body: &str, max_routes: usize) -> Result<Vec<String>> {
    let input = form_field(body, SUMMARY_FIELD)?;
    let count = input.split_whitespace().count();
    if count > max_routes {
        return Err(Error::TooManyRoutes {
            count,
            limit: max_routes,
        });
    }

    let routes = parse_route_list(&[input])?;
    let summary = summarize(&routes)?;
    log::info!(
        "web: {} route(s) in, {} out, changed={}",
        routes.len(),
        summary.routes.len(),
        summary.changed
    );
    Ok(summary
        .routes
        .iter()
        .map(|rt| format!("{} </br>", format_route(rt, true)))
        .collect())
}

fn error_message(err: &Error) -> String {
    match err {
        Error::MissingField(_) => "Error: One or more prefixes required.".to_string(),
        Error::NoRoutes => "One or more valid routes required.".to_string(),
        Error::TooManyRoutes { limit, .. } => format!(
            "The web version is limited to {} prefixes so the web server doesn't get \
             too bogged down. Consider using the command line version.",
            limit
        ),
        Error::MalformedToken(token) => format!(
            "Error, use CIDR notation (e.g. 1.1.1.0/24): {}",
            html_escape(token)
        ),
        Error::InvalidRoute { route, .. } => {
            format!("Error, invalid route: {}", html_escape(route))
        }
        other => format!(
            "<h2>Something broke, but it wasn't your fault. Please report the \
             following error.</h2>\n{}",
            html_escape(&other.to_string())
        ),
    }
}

fn page(lines: Vec<String>) -> String {
    std::iter::once(HEADER.to_string()).chain(lines).join("\n") + "\n"
}

/// Full CGI response (header and HTML) for a url encoded form body.
pub fn cgi_page(body: &str, max_routes: usize) -> String {
    match result_lines(body, max_routes) {
        Ok(lines) => page(lines),
        Err(e) => cgi_error_page(&e),
    }
}

/// Full CGI response reporting `err`, e.g. when the request body could not
/// be read.
pub fn cgi_error_page(err: &Error) -> String {
    log::warn!("web: {err}");
    page(vec![error_message(err)])
}
