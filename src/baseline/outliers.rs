//! Shared outlier-rejection primitive.
//!
//! Repeatedly drops the single item that deviates most from the
//! area-weighted average of a metric, until every survivor sits within
//! tolerance. Used by the primary/secondary splitter on operating hours and
//! again on internal load density.

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Returns the subset of `items` whose metric lies within `tolerance` of the
/// area-weighted average, recursively eliminating the worst offender one
/// item per pass.
///
/// Pure: the input is consumed and a new filtered collection is returned, so
/// applying the function to its own output is a no-op. Ties on the largest
/// deviation select the earliest item in input order as the offender, which
/// makes results reproducible for stable (name-sorted) inputs.
///
/// `label` names the metric in log output. Items carrying `None` metrics
/// must be filtered out by the caller beforehand; this routine assumes every
/// item is measurable.
pub fn reject_outliers<T>(
    items: Vec<T>,
    metric_fn: impl Fn(&T) -> f64 + Copy,
    area_fn: impl Fn(&T) -> f64 + Copy,
    name_fn: impl Fn(&T) -> &str + Copy,
    tolerance: f64,
    label: &str,
) -> Result<Vec<T>> {
    if items.is_empty() {
        return Ok(items);
    }

    let total_area: f64 = items.iter().map(area_fn).sum();
    if total_area <= 0.0 {
        return Err(Error::degenerate(format!(
            "outlier rejection on '{label}' received items with zero total area"
        )));
    }

    let weighted_total: f64 = items.iter().map(|i| metric_fn(i) * area_fn(i)).sum();
    let avg = weighted_total / total_area;

    debug!(
        label,
        tolerance,
        avg,
        values = ?items.iter().map(metric_fn).collect::<Vec<_>>(),
        areas = ?items.iter().map(area_fn).collect::<Vec<_>>(),
        "outlier pass"
    );

    // Find the single worst offender; strict `>` keeps the first occurrence
    // on ties.
    let mut worst_idx = 0;
    let mut worst_delta = 0.0;
    for (i, item) in items.iter().enumerate() {
        let delta = (metric_fn(item) - avg).abs();
        if delta > worst_delta {
            worst_delta = delta;
            worst_idx = i;
        }
    }

    if worst_delta > tolerance && items.len() > 1 {
        let mut items = items;
        let dropped = items.remove(worst_idx);
        info!(
            "For {}, the {} of {:.1} is more than {} outside the area-weighted \
             average of {:.1}; it will be placed on its own secondary system",
            name_fn(&dropped),
            label,
            metric_fn(&dropped),
            tolerance,
            avg
        );
        return reject_outliers(items, metric_fn, area_fn, name_fn, tolerance, label);
    }

    Ok(items)
}
