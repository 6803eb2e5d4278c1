//! Region merging with interval-union semantics.

use super::Region;

/// Merge any number of region lists into a single normalized list.
///
/// Standard interval merge: all regions are sorted by start, then swept
/// left to right; a region whose start lies at or before the open
/// interval's end is absorbed, anything else closes the interval. The
/// result is sorted, non-overlapping and covers the union of the inputs.
/// Touching regions become one.
#[must_use]
pub fn merge_regions(lists: &[&[Region]]) -> Vec<Region> {
    let all: Vec<Region> = lists.iter().flat_map(|l| l.iter().copied()).collect();
    sweep(all)
}

/// Interval-union sweep over an arbitrary region collection.
pub(crate) fn sweep(mut regions: Vec<Region>) -> Vec<Region> {
    regions.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut merged: Vec<Region> = Vec::with_capacity(regions.len());
    for region in regions {
        match merged.last_mut() {
            Some(open) if region.start <= open.end => {
                open.end = open.end.max(region.end);
            }
            _ => merged.push(region),
        }
    }
    merged
}
