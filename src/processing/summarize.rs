//! Route list summarization entry point.

use super::aggregate::aggregate;
use super::overlap::remove_overlap;
use crate::error::{Error, Result};
use crate::models::Route;
use serde::Serialize;

/// Outcome of [`summarize`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Remaining routes, in overlap order (network, prefix length, metric).
    pub routes: Vec<Route>,
    /// True if any route was merged or removed.
    pub changed: bool,
}

/// Check that every route is valid, returning the index of the first that
/// is not.
pub fn validate(routes: &[Route]) -> Result<()> {
    match routes.iter().position(|rt| !rt.is_valid()) {
        Some(index) => Err(Error::InvalidRoute {
            index,
            route: routes[index].describe(),
        }),
        None => Ok(()),
    }
}

/// Reduce `routes` to the smallest equivalent list.
///
/// Adjacent routes of equal size and metric are merged until nothing more
/// merges, then routes covered by an equal-or-cheaper broader route are
/// dropped. The input is never modified; an invalid route fails the whole
/// call.
///
/// # Examples
/// ```
/// use acrs::models::Route;
/// use acrs::summarize;
///
/// let summary = summarize(&[
///     Route::new("192.168.0.0", 24),
///     Route::new("192.168.1.0", 24),
/// ])
/// .unwrap();
/// assert!(summary.changed);
/// assert_eq!(summary.routes, vec![Route::new("192.168.0.0", 23)]);
/// ```
pub fn summarize(routes: &[Route]) -> Result<Summary> {
    validate(routes)?;

    log::info!("Main summarization:");
    let (routes, merged) = aggregate(routes.to_vec());
    if !merged {
        log::info!("No routes affected by main summarization.");
    }

    log::info!("Overlap removal:");
    let (routes, pruned) = remove_overlap(routes);
    if !pruned {
        log::info!("No overlapping routes.");
    }

    let changed = merged || pruned;
    if changed {
        log::info!("Finished. List was summarized.");
    } else {
        log::info!("Finished. No summarization performed.");
    }

    Ok(Summary { routes, changed })
}
