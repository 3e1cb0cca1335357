//! Merging of adjacent, equal-size, equal-cost routes.
//!
//! Each pass walks the list in aggregation order and builds a fresh output
//! list; the last route pushed is the merge candidate for the next one. Passes
//! repeat until one of them merges nothing.

use crate::models::{prefix_len_to_mask, Route};
use std::cmp::{Ordering, Reverse};

/// Sort key for the merge pass: metric, then prefix length (longest first),
/// then network. Invalid routes have no key and sort first.
pub fn aggregation_key(route: &Route) -> Option<(u16, Reverse<u8>, u32)> {
    Some((
        route.metric()?,
        Reverse(route.prefix_len()?),
        u32::from(route.network()?),
    ))
}

/// Total order used by the merge pass, `None` first.
pub fn aggregation_order(a: Option<&Route>, b: Option<&Route>) -> Ordering {
    a.and_then(aggregation_key).cmp(&b.and_then(aggregation_key))
}

/// True when `low` and `high` together form exactly one route of
/// one bit shorter prefix, with `low` as its lower half.
pub fn mergeable(low: &Route, high: &Route) -> bool {
    let (Some(low_len), Some(high_len)) = (low.prefix_len(), high.prefix_len()) else {
        return false;
    };
    if low_len != high_len || low_len == 0 {
        return false;
    }
    if low.metric() != high.metric() {
        return false;
    }
    let (Some(low_bc), Some(low_net), Some(high_net)) =
        (low.broadcast(), low.network(), high.network())
    else {
        return false;
    };
    // No wrap past 255.255.255.255.
    match u32::from(low_bc).checked_add(1) {
        Some(next) if next == u32::from(high_net) => {}
        _ => return false,
    }
    let Some(wider) = prefix_len_to_mask(low_len - 1) else {
        return false;
    };
    u32::from(low_net) & wider == u32::from(low_net)
}

/// One merge pass over `routes`, which must already be sorted.
///
/// Returns the new list and the number of merges made.
fn merge_pass(routes: Vec<Route>) -> (Vec<Route>, usize) {
    let mut merged: Vec<Route> = Vec::with_capacity(routes.len());
    let mut merges = 0;

    for high in routes {
        if let Some(low) = merged.last_mut() {
            if mergeable(low, &high) {
                let before = low.to_string();
                if low.decrement_prefix_len().is_ok() {
                    log::info!("Summarized '{}' and '{}' into '{}'", before, high, low);
                    merges += 1;
                    continue;
                }
            }
        }
        merged.push(high);
    }

    (merged, merges)
}

/// Merge routes until no further merge is possible.
///
/// Returns the merged list, sorted in aggregation order, and whether any
/// merge happened.
pub fn aggregate(mut routes: Vec<Route>) -> (Vec<Route>, bool) {
    let mut summarized = false;
    let mut pass = 0;

    loop {
        pass += 1;
        routes.sort_by(|a, b| aggregation_order(Some(a), Some(b)));
        let (next, merges) = merge_pass(routes);
        log::debug!("merge pass {pass}: {merges} merge(s), {} route(s) left", next.len());
        routes = next;
        if merges == 0 {
            break;
        }
        summarized = true;
    }

    (routes, summarized)
}
