//! Removal of routes already covered by a broader, equal-or-cheaper route.

use crate::models::Route;
use std::cmp::Ordering;

/// Sort key for overlap removal: network, then prefix length (shortest
/// first), then metric. Invalid routes have no key and sort first.
pub fn overlap_key(route: &Route) -> Option<(u32, u8, u16)> {
    Some((
        u32::from(route.network()?),
        route.prefix_len()?,
        route.metric()?,
    ))
}

/// Total order used by overlap removal, `None` first.
pub fn overlap_order(a: Option<&Route>, b: Option<&Route>) -> Ordering {
    a.and_then(overlap_key).cmp(&b.and_then(overlap_key))
}

/// True when `high` adds nothing to `low`: it lies inside `low` and costs
/// the same or more.
pub fn redundant(low: &Route, high: &Route) -> bool {
    low.covers(high) && high.metric() >= low.metric()
}

/// Drop every route made redundant by an earlier kept route.
///
/// A covered route that is strictly cheaper than its cover is kept and
/// becomes the reference for the routes after it.
pub fn remove_overlap(mut routes: Vec<Route>) -> (Vec<Route>, bool) {
    routes.sort_by(|a, b| overlap_order(Some(a), Some(b)));

    let mut kept: Vec<Route> = Vec::with_capacity(routes.len());
    let mut removed = 0;

    for high in routes {
        if let Some(low) = kept.last() {
            if redundant(low, &high) {
                log::info!("Removing '{}', which falls within '{}'", high, low);
                removed += 1;
                continue;
            }
        }
        kept.push(high);
    }

    log::debug!("overlap removal: {removed} route(s) dropped, {} kept", kept.len());
    (kept, removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(routes: &[Route]) -> Vec<String> {
        routes.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_overlap_order() {
        let mut routes = vec![
            Route::with_metric("10.1.0.0", 16, 0),
            Route::with_metric("10.0.0.0", 8, 3),
            Route::with_metric("10.0.0.0", 8, 1),
            Route::with_metric("10.0.0.0", 16, 0),
        ];
        routes.sort_by(|a, b| overlap_order(Some(a), Some(b)));
        assert_eq!(
            strings(&routes),
            vec![
                "10.0.0.0/8 in 1",
                "10.0.0.0/8 in 3",
                "10.0.0.0/16 in 0",
                "10.1.0.0/16 in 0",
            ]
        );
        assert_eq!(overlap_order(None, Some(&routes[0])), Ordering::Less);
    }

    #[test]
    fn test_equal_metric_pruned() {
        let (routes, changed) = remove_overlap(vec![
            Route::new("10.1.0.0", 16),
            Route::new("10.0.0.0", 8),
        ]);
        assert!(changed);
        assert_eq!(strings(&routes), vec!["10.0.0.0/8 in 0"]);
    }

    #[test]
    fn test_cheaper_specific_survives() {
        let (routes, changed) = remove_overlap(vec![
            Route::with_metric("10.0.0.0", 8, 5),
            Route::with_metric("10.1.0.0", 16, 1),
        ]);
        assert!(!changed);
        assert_eq!(strings(&routes), vec!["10.0.0.0/8 in 5", "10.1.0.0/16 in 1"]);
    }

    #[test]
    fn test_cheaper_specific_becomes_reference() {
        // 10.1.2.0/24 in 3 is tested against 10.1.0.0/16 in 1, not the /8.
        let (routes, changed) = remove_overlap(vec![
            Route::with_metric("10.0.0.0", 8, 5),
            Route::with_metric("10.1.0.0", 16, 1),
            Route::with_metric("10.1.2.0", 24, 3),
        ]);
        assert!(changed);
        assert_eq!(strings(&routes), vec!["10.0.0.0/8 in 5", "10.1.0.0/16 in 1"]);
    }

    #[test]
    fn test_cheaper_specific_shadows_broader_cover() {
        // Once 10.0.0.0/28 in 1 is kept it is the only reference, so
        // 10.0.0.32/27 in 5 is not compared with the equal-cost /24 and stays.
        let (routes, changed) = remove_overlap(vec![
            Route::with_metric("10.0.0.0", 24, 5),
            Route::with_metric("10.0.0.32", 27, 5),
            Route::with_metric("10.0.0.0", 28, 1),
        ]);
        assert!(!changed);
        assert_eq!(
            strings(&routes),
            vec!["10.0.0.0/24 in 5", "10.0.0.0/28 in 1", "10.0.0.32/27 in 5"]
        );
    }

    #[test]
    fn test_duplicates_and_worse_metrics() {
        let (routes, changed) = remove_overlap(vec![
            Route::with_metric("192.168.0.0", 24, 2),
            Route::with_metric("192.168.0.0", 24, 0),
            Route::with_metric("192.168.0.0", 24, 0),
        ]);
        assert!(changed);
        assert_eq!(strings(&routes), vec!["192.168.0.0/24 in 0"]);
    }

    #[test]
    fn test_disjoint_untouched() {
        let (routes, changed) = remove_overlap(vec![
            Route::new("192.168.2.0", 24),
            Route::new("192.168.0.0", 24),
        ]);
        assert!(!changed);
        assert_eq!(
            strings(&routes),
            vec!["192.168.0.0/24 in 0", "192.168.2.0/24 in 0"]
        );
    }

    #[test]
    fn test_default_route_covers_all() {
        let (routes, changed) = remove_overlap(vec![
            Route::new("172.16.0.0", 12),
            Route::new("0.0.0.0", 0),
            Route::host("8.8.8.8"),
        ]);
        assert!(changed);
        assert_eq!(strings(&routes), vec!["0.0.0.0/0 in 0"]);
    }

    #[test]
    fn test_empty() {
        let (routes, changed) = remove_overlap(vec![]);
        assert!(routes.is_empty());
        assert!(!changed);
    }
}
