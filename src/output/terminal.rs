//! Terminal output of route lists.

use crate::models::Route;

/// Format a route as `network/plen in metric`, or `network/plen` when
/// `show_metric` is false.
pub fn format_route(route: &Route, show_metric: bool) -> String {
    if show_metric {
        route.to_string()
    } else {
        route.address_value().to_string()
    }
}

/// One line per route, in list order.
pub fn route_lines(routes: &[Route], show_metric: bool) -> Vec<String> {
    routes
        .iter()
        .map(|route| format_route(route, show_metric))
        .collect()
}
