//! Opposite stop pairing along a road.
//!
//! Stops on opposite sides of a road share their first four code digits and
//! end in `1` and `9` (e.g. `01011` and `01019`). Listing a road's stops
//! groups each such pair together.

use std::collections::BTreeMap;

use crate::domain::BusStop;

/// Final digits that mark one side of an opposite pair.
const PAIR_SUFFIXES: [&str; 2] = ["1", "9"];

/// The grouping key for a stop: its first four characters when the fifth
/// marks a pair, otherwise the whole code.
fn pair_key(code: &str) -> &str {
    match (code.get(..4), code.get(4..)) {
        (Some(prefix), Some(rest)) if PAIR_SUFFIXES.contains(&rest) => prefix,
        _ => code,
    }
}

/// Stops on `road`, with opposite pairs adjacent.
///
/// Within a group stops run in descending code order. Groups are ordered by
/// their highest code, ascending.
pub fn stops_on_road<'a>(
    stops: impl IntoIterator<Item = &'a BusStop>,
    road: &str,
) -> Vec<&'a BusStop> {
    let mut groups: BTreeMap<&str, Vec<&BusStop>> = BTreeMap::new();
    for stop in stops.into_iter().filter(|s| s.road_name == road) {
        groups.entry(pair_key(stop.code.as_str())).or_default().push(stop);
    }

    let mut groups: Vec<Vec<&BusStop>> = groups.into_values().collect();
    for group in &mut groups {
        group.sort_by(|a, b| b.code.cmp(&a.code));
    }
    // Each group is non-empty and its first entry is its highest code
    groups.sort_by(|a, b| a[0].code.cmp(&b[0].code));

    groups.into_iter().flatten().collect()
}
