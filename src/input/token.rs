//! Route tokens as typed on the command line or in the web form.
//!
//! A token is an address and an integer prefix separated by exactly one
//! slash, optionally followed by `m` and a metric: `192.168.1.0/24m1`.

use crate::error::{Error, Result};
use crate::models::Route;
use regex::Regex;
use std::sync::OnceLock;

/// Regex for the part after the slash: prefix, then optional `m<metric>`.
static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_prefix_regex() -> &'static Regex {
    PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"^(?P<plen>[0-9]+)(?:m(?P<metric>[0-9]+))?$").expect("Invalid Regex")
    })
}

/// Parse one token into a valid [`Route`].
///
/// # Returns
/// * `Err(Error::MalformedToken)` - wrong shape or non-numeric parts
/// * `Err(Error::InvalidRoute)` - well formed, but the route is not valid
pub fn parse_route_token(token: &str) -> Result<Route> {
    let token = token.trim();
    let parts: Vec<&str> = token.split('/').collect();
    if parts.len() != 2 {
        return Err(Error::MalformedToken(token.to_string()));
    }

    let caps = get_prefix_regex()
        .captures(parts[1])
        .ok_or_else(|| Error::MalformedToken(token.to_string()))?;
    // Digits only, so a failed parse means the number is too large.
    let plen: i64 = caps["plen"]
        .parse()
        .map_err(|_| Error::MalformedToken(token.to_string()))?;
    let metric: u32 = match caps.name("metric") {
        Some(m) => m.as_str().parse().unwrap_or(u32::MAX),
        None => 0,
    };

    let route = Route::with_metric(parts[0], plen, metric);
    if !route.is_valid() {
        log::warn!("invalid route: {token}");
        return Err(Error::InvalidRoute {
            index: 0,
            route: token.to_string(),
        });
    }
    Ok(route)
}

/// Parse every whitespace separated token in `tokens`.
///
/// Stops at the first bad token; an [`Error::InvalidRoute`] carries that
/// token's position.
pub fn parse_route_list<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Route>> {
    let routes = tokens
        .iter()
        .flat_map(|t| t.as_ref().split_whitespace())
        .enumerate()
        .map(|(i, token)| {
            parse_route_token(token).map_err(|e| match e {
                Error::InvalidRoute { route, .. } => Error::InvalidRoute { index: i, route },
                other => other,
            })
        })
        .collect::<Result<Vec<Route>>>()?;

    if routes.is_empty() {
        return Err(Error::NoRoutes);
    }
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let rt = parse_route_token("192.168.1.0/24").unwrap();
        assert_eq!(rt, Route::new("192.168.1.0", 24));
        assert_eq!(rt.metric(), Some(0));
    }

    #[test]
    fn test_parse_with_metric() {
        let rt = parse_route_token("192.168.1.0/24m7").unwrap();
        assert_eq!(rt, Route::with_metric("192.168.1.0", 24, 7));
        let rt: Route = " 10.0.0.0/8m0 ".parse().unwrap();
        assert_eq!(rt.to_string(), "10.0.0.0/8 in 0");
    }

    #[test]
    fn test_parse_malformed() {
        for token in [
            "192.168.1.0",
            "192.168.1.0/24/1",
            "192.168.1.0/",
            "192.168.1.0/x",
            "192.168.1.0/-1",
            "192.168.1.0/m1",
            "192.168.1.0/24m",
            "192.168.1.0/24m1m2",
            "192.168.1.0/99999999999999999999",
        ] {
            assert!(
                matches!(parse_route_token(token), Err(Error::MalformedToken(_))),
                "{token} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_invalid_route() {
        for token in [
            "192.168.1.300/24",
            "192.168.1.0/33",
            "192.168.1.0/24m65536",
            "192.168.1.0/24m99999999999",
        ] {
            assert!(
                matches!(parse_route_token(token), Err(Error::InvalidRoute { .. })),
                "{token} should be an invalid route"
            );
        }
    }

    #[test]
    fn test_parse_raw_mask_integer() {
        // Not a prefix length, so read as the mask 255.255.255.0.
        let rt = parse_route_token("10.0.0.0/4294967040").unwrap();
        assert_eq!(rt.prefix_len(), Some(24));
    }

    #[test]
    fn test_parse_route_list() {
        let routes = parse_route_list(&["10.0.0.0/24 10.0.1.0/24", "10.0.2.0/24m3"]).unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[2].metric(), Some(3));

        match parse_route_list(&["10.0.0.0/24", "10.0.1.0/40"]) {
            Err(Error::InvalidRoute { index, route }) => {
                assert_eq!(index, 1);
                assert_eq!(route, "10.0.1.0/40");
            }
            other => panic!("expected InvalidRoute, got {:?}", other),
        }
        assert!(matches!(
            parse_route_list::<&str>(&[]),
            Err(Error::NoRoutes)
        ));
        assert!(matches!(parse_route_list(&["  "]), Err(Error::NoRoutes)));
    }
}
