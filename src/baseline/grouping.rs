//! Occupancy/fuel system grouping.
//!
//! Partitions the conditioned-zone population into system groups by dominant
//! occupancy type, then dominant fuel type, preserving non-dominant buckets
//! big enough to trigger the exception-area rule. Heated-only zones are
//! split into their own groups after dominance is determined, and a
//! purchased-energy source anywhere in the building overrides every group's
//! fuel.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::ruleset::RuleSet;
use crate::error::{Error, Result};
use crate::name::SortByName;
use crate::zone::{FuelType, OccupancyType, Zone};

/// A set of zones assigned to share one baseline system family.
#[derive(Debug, Clone)]
pub struct SystemGroup {
    pub occupancy: OccupancyType,
    pub fuel: FuelType,
    /// Multiplier-weighted floor area in ft^2.
    pub area_ft2: f64,
    /// Number of distinct building levels spanned by the member zones.
    pub num_stories: usize,
    pub zones: Vec<Zone>,
}

/// Summary of a group without its zones, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub occupancy: OccupancyType,
    pub fuel: FuelType,
    pub area_ft2: f64,
    pub num_stories: usize,
    pub zone_names: Vec<String>,
}

impl SystemGroup {
    fn from_zones(occupancy: OccupancyType, fuel: FuelType, mut zones: Vec<Zone>) -> Self {
        zones.sort_by_name();
        let area_ft2 = zones.iter().map(Zone::total_floor_area_ft2).sum();
        let num_stories = num_stories_spanned(&zones);
        Self {
            occupancy,
            fuel,
            area_ft2,
            num_stories,
            zones,
        }
    }
}

/// Number of distinct building levels spanned by a set of zones, floored by
/// the widest single zone's own span (atriums count every level they cross).
fn num_stories_spanned(zones: &[Zone]) -> usize {
    let distinct: std::collections::BTreeSet<&str> =
        zones.iter().map(|z| z.story.as_str()).collect();
    let widest = zones
        .iter()
        .map(|z| z.num_stories_spanned)
        .max()
        .unwrap_or(0);
    distinct.len().max(widest)
}

/// Working bucket: zones sharing one key, with their summed area.
struct Bucket<K> {
    key: K,
    area_ft2: f64,
    zones: Vec<Zone>,
}

/// Buckets zones by a key and orders the buckets by (area desc, key asc) so
/// dominance is deterministic.
fn bucket_by<K: Ord + Copy>(zones: Vec<Zone>, key_fn: impl Fn(&Zone) -> K) -> Vec<Bucket<K>> {
    let mut map: BTreeMap<K, Vec<Zone>> = BTreeMap::new();
    for zone in zones {
        map.entry(key_fn(&zone)).or_default().push(zone);
    }
    let mut buckets: Vec<Bucket<K>> = map
        .into_iter()
        .map(|(key, zones)| Bucket {
            key,
            area_ft2: zones.iter().map(Zone::total_floor_area_ft2).sum(),
            zones,
        })
        .collect();
    // BTreeMap iteration already sorts by key ascending; a stable sort by
    // descending area therefore breaks area ties by key order.
    buckets.sort_by(|a, b| b.area_ft2.total_cmp(&a.area_ft2));
    buckets
}

/// Partitions the conditioned-zone population into system groups.
///
/// The union of the returned groups' zones is exactly the conditioned
/// subset of the input; no zone appears in two groups.
pub fn group_zones(zones: Vec<Zone>, rules: &RuleSet) -> Result<Vec<SystemGroup>> {
    // Zones that are neither heated nor cooled take no part in
    // classification.
    let (mut conditioned, excluded): (Vec<Zone>, Vec<Zone>) =
        zones.into_iter().partition(Zone::is_conditioned);
    for zone in &excluded {
        debug!("Zone {} is unconditioned and will not be grouped", zone.name);
    }
    if conditioned.is_empty() {
        return Err(Error::NoConditionedZones);
    }
    conditioned.sort_by_name();

    // Building-wide purchased-energy presence, determined before any
    // folding so every zone participates.
    let purchased_heating = conditioned
        .iter()
        .any(|z| z.fuel.includes_purchased_heating());
    let purchased_cooling = conditioned
        .iter()
        .any(|z| z.fuel.includes_purchased_cooling());
    let district_fuel = match (purchased_heating, purchased_cooling) {
        (true, true) => Some(FuelType::PurchasedHeatAndCooling),
        (true, false) => Some(FuelType::PurchasedHeat),
        (false, true) => Some(FuelType::PurchasedCooling),
        (false, false) => None,
    };
    if let Some(fuel) = district_fuel {
        info!(
            "The proposed model includes purchased energy ({fuel}); all baseline \
             system selection will be based on this information"
        );
    }

    // Stage 1: dominant occupancy type by area, with the exception-area
    // rule preserving large non-dominant buckets.
    let mut occ_buckets = bucket_by(conditioned, |z| z.occupancy);
    let dominant = occ_buckets.remove(0);
    let dom_occ = dominant.key;
    let mut dom_occ_zones = dominant.zones;

    let mut occ_groups: Vec<(OccupancyType, Vec<Zone>)> = Vec::new();
    for bucket in occ_buckets {
        if bucket.area_ft2 > rules.exception_area_ft2 {
            info!(
                "The portion of the building with an occupancy type of {} is bigger \
                 than the minimum exception area of {} ft2; it will be assigned a \
                 separate system type",
                bucket.key, rules.exception_area_ft2
            );
            occ_groups.push((bucket.key, bucket.zones));
        } else {
            dom_occ_zones.extend(bucket.zones);
        }
    }
    occ_groups.push((dom_occ, dom_occ_zones));

    // Stage 2: within each occupancy group, dominant fuel type by area,
    // again with the exception-area rule. Zones folded in from other
    // occupancy types never influence the dominant-fuel determination.
    let mut groups: Vec<SystemGroup> = Vec::new();
    for (occ, zns) in occ_groups {
        let (own_occ_zones, folded_zones): (Vec<Zone>, Vec<Zone>) =
            zns.into_iter().partition(|z| z.occupancy == occ);

        let mut fuel_buckets = bucket_by(own_occ_zones, |z| z.fuel);

        // The dominant fuel may never be unconditioned; fall back to the
        // next-largest bucket.
        let dominant_idx = fuel_buckets
            .iter()
            .position(|b| b.key != FuelType::Unconditioned)
            .ok_or(Error::NoConditionedZones)?;
        let dominant = fuel_buckets.remove(dominant_idx);
        let dom_fuel = dominant.key;
        let mut dom_fuel_zones = dominant.zones;
        dom_fuel_zones.extend(folded_zones);

        for bucket in fuel_buckets {
            if bucket.area_ft2 > rules.exception_area_ft2 {
                info!(
                    "The portion of the building with an occupancy type of {} and \
                     fuel type of {} is bigger than the minimum exception area of \
                     {} ft2; it will be assigned a separate system type",
                    occ, bucket.key, rules.exception_area_ft2
                );
                groups.push(SystemGroup::from_zones(occ, bucket.key, bucket.zones));
            } else {
                dom_fuel_zones.extend(bucket.zones);
            }
        }
        groups.push(SystemGroup::from_zones(occ, dom_fuel, dom_fuel_zones));
    }

    // A preserved unconditioned fuel bucket cannot be served by any system.
    groups.retain(|g| {
        if g.fuel == FuelType::Unconditioned {
            warn!(
                "Dropping a {} group of {} zones whose fuel could not be determined",
                g.occupancy,
                g.zones.len()
            );
            false
        } else {
            true
        }
    });

    // Heated-only zones move into their own groups. This happens after the
    // dominant occupancy and fuel are determined so that heated-only area
    // participates in those sums.
    let mut final_groups: Vec<SystemGroup> = Vec::new();
    for group in groups {
        let SystemGroup {
            occupancy, fuel, zones, ..
        } = group;
        let (heated_only, heated_cooled): (Vec<Zone>, Vec<Zone>) =
            zones.into_iter().partition(|z| z.heated && !z.cooled);

        if !heated_cooled.is_empty() {
            final_groups.push(SystemGroup::from_zones(occupancy, fuel, heated_cooled));
        }
        if !heated_only.is_empty() {
            final_groups.push(SystemGroup::from_zones(
                OccupancyType::HeatedOnly,
                fuel,
                heated_only,
            ));
        }
    }

    // Purchased energy anywhere in the building overrides every group's
    // fuel for system selection.
    if let Some(fuel) = district_fuel {
        for group in &mut final_groups {
            group.fuel = fuel;
        }
    }

    for group in &final_groups {
        info!(
            "Final system type group: occ = {}, fuel = {}, area = {:.0} ft2, \
             num stories = {}, zones = {}",
            group.occupancy,
            group.fuel,
            group.area_ft2,
            group.num_stories,
            group
                .zones
                .iter()
                .map(|z| z.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(final_groups)
}
