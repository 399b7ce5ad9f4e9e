//! Primary/secondary zone differentiation for multi-zone systems.
//!
//! A shared multi-zone system cannot economically serve zones whose
//! operating schedule or load intensity diverges sharply from the group
//! norm on the same building level. Two successive outlier-rejection passes
//! carve such zones off to their own single-zone systems: first on weekly
//! full-load operating hours (lighting schedule as the proxy, so transition
//! spaces are not accidentally removed), then on internal load density.

use std::collections::BTreeMap;
use std::collections::HashSet;

use tracing::{info, warn};

use super::archetype::SystemType;
use super::outliers::reject_outliers;
use super::ruleset::RuleSet;
use super::ventilation::DamperSolveResult;
use crate::error::Result;
use crate::units::w_per_m2_to_btu_per_hr_ft2;
use crate::zone::Zone;

/// The primary/secondary split of one system group on one building level.
#[derive(Debug, Clone)]
pub struct LevelPartition {
    pub story: String,
    /// Zones served by the group's shared system.
    pub primary: Vec<Zone>,
    /// Outlier zones, each served by its own single-zone system.
    pub secondary: Vec<Zone>,
    /// The single-zone system assigned to the secondary zones; filled in by
    /// the orchestrator.
    pub secondary_system: Option<SystemType>,
    /// Ventilation solve for the primary set; filled in by the orchestrator
    /// for multi-zone VAV groups.
    pub damper_solve: Option<DamperSolveResult>,
}

/// Lightweight item fed through the outlier rejector.
struct Metric {
    name: String,
    area_ft2: f64,
    value: f64,
}

/// Groups a zone list by building level, ordered by level label.
///
/// Zones spanning several levels are carried by their assigned (lowest)
/// level, so each zone lands in exactly one per-level list.
pub fn group_zones_by_story(zones: Vec<Zone>) -> Vec<(String, Vec<Zone>)> {
    let mut by_story: BTreeMap<String, Vec<Zone>> = BTreeMap::new();
    for zone in zones {
        by_story.entry(zone.story.clone()).or_default().push(zone);
    }
    by_story.into_iter().collect()
}

/// Splits one level's zones into primary and secondary sets.
///
/// Pass 1 rejects zones whose weekly full-load operating hours stray more
/// than the tolerance (default 40 h/wk) from the area-weighted average.
/// Pass 2, on the survivors, rejects zones whose internal load density
/// strays more than the tolerance (default 10 Btu/hr*ft^2). Zones with no
/// design internal load cannot be shown to match the group norm: they are
/// excluded from the averaging with a warning and classified secondary.
pub fn split_primary_secondary(
    story: &str,
    zones: Vec<Zone>,
    rules: &RuleSet,
) -> Result<LevelPartition> {
    info!(
        "Determining which zones on {story} are served by the primary vs. \
         secondary system"
    );

    // Pass 1: weekly full-load operating hours.
    let hours_items: Vec<Metric> = zones
        .iter()
        .map(|z| Metric {
            name: z.name.clone(),
            area_ft2: z.total_floor_area_ft2(),
            value: z.weekly_operating_hours(),
        })
        .collect();
    let same_hours = reject_outliers(
        hours_items,
        |m| m.value,
        |m| m.area_ft2,
        |m| m.name.as_str(),
        rules.operating_hours_tolerance_hrs,
        "weekly operating hrs",
    )?;
    let same_hours_names: HashSet<String> = same_hours.into_iter().map(|m| m.name).collect();

    // Pass 2: internal load density on the pass-1 survivors.
    let mut load_items: Vec<Metric> = Vec::new();
    for zone in zones.iter().filter(|z| same_hours_names.contains(&z.name)) {
        match zone.design_internal_load_w {
            Some(load_w) => {
                let density_w_per_m2 = load_w / zone.floor_area_m2;
                load_items.push(Metric {
                    name: zone.name.clone(),
                    area_ft2: zone.total_floor_area_ft2(),
                    value: w_per_m2_to_btu_per_hr_ft2(density_w_per_m2),
                });
            }
            None => {
                warn!(
                    "Zone {} has no design internal load from the sizing pass; \
                     it is excluded from the load-density average and served by \
                     a secondary system",
                    zone.name
                );
            }
        }
    }
    let same_load = reject_outliers(
        load_items,
        |m| m.value,
        |m| m.area_ft2,
        |m| m.name.as_str(),
        rules.load_density_tolerance_btu_per_hr_ft2,
        "internal load",
    )?;
    let primary_names: HashSet<String> = same_load.into_iter().map(|m| m.name).collect();

    let (primary, secondary): (Vec<Zone>, Vec<Zone>) = zones
        .into_iter()
        .partition(|z| primary_names.contains(&z.name));

    if !primary.is_empty() {
        info!(
            "Primary system zones on {story}: {}",
            primary.iter().map(|z| z.name.as_str()).collect::<Vec<_>>().join(", ")
        );
    }
    if !secondary.is_empty() {
        info!(
            "Secondary system zones on {story}: {}",
            secondary.iter().map(|z| z.name.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(LevelPartition {
        story: story.to_string(),
        primary,
        secondary,
        secondary_system: None,
        damper_solve: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Schedule;
    use crate::units::ft2_to_m2;

    /// A 1,000 ft^2 zone with an office lighting schedule (~50 h/wk) and a
    /// 10 W/m^2 internal load (~3.2 Btu/hr*ft^2).
    fn typical_zone(name: &str) -> Zone {
        let mut z = Zone::new(name, "level_1", ft2_to_m2(1_000.0));
        z.lighting_schedules = vec![Schedule::office_lighting()];
        z.design_internal_load_w = Some(10.0 * z.floor_area_m2);
        z
    }

    fn rules() -> RuleSet {
        RuleSet::new()
    }

    fn names(zones: &[Zone]) -> Vec<&str> {
        zones.iter().map(|z| z.name.as_str()).collect()
    }

    #[test]
    fn test_homogeneous_zones_all_primary() {
        let zones = vec![typical_zone("a"), typical_zone("b"), typical_zone("c")];
        let p = split_primary_secondary("level_1", zones, &rules()).unwrap();
        assert_eq!(names(&p.primary), vec!["a", "b", "c"]);
        assert!(p.secondary.is_empty());
    }

    #[test]
    fn test_divergent_operating_hours_rejected() {
        // A 24/7 zone (168 h/wk) against ~50 h/wk offices.
        let mut server_room = typical_zone("server_room");
        server_room.lighting_schedules = vec![Schedule::continuous_lighting()];

        let zones = vec![typical_zone("a"), typical_zone("b"), server_room];
        let p = split_primary_secondary("level_1", zones, &rules()).unwrap();
        assert_eq!(names(&p.primary), vec!["a", "b"]);
        assert_eq!(names(&p.secondary), vec!["server_room"]);
    }

    #[test]
    fn test_divergent_load_density_rejected() {
        // Same hours, but a 60 W/m^2 (~19 Btu/hr*ft^2) lab against
        // 10 W/m^2 offices.
        let mut lab = typical_zone("lab");
        lab.design_internal_load_w = Some(60.0 * lab.floor_area_m2);

        let zones = vec![typical_zone("a"), typical_zone("b"), lab];
        let p = split_primary_secondary("level_1", zones, &rules()).unwrap();
        assert_eq!(names(&p.primary), vec!["a", "b"]);
        assert_eq!(names(&p.secondary), vec!["lab"]);
    }

    #[test]
    fn test_missing_load_data_lands_secondary() {
        let mut r#unsized = typical_zone("unsized");
        r#unsized.design_internal_load_w = None;

        let zones = vec![typical_zone("a"), typical_zone("b"), r#unsized];
        let p = split_primary_secondary("level_1", zones, &rules()).unwrap();
        assert_eq!(names(&p.primary), vec!["a", "b"]);
        assert_eq!(
            names(&p.secondary),
            vec!["unsized"],
            "A zone the sizing pass missed cannot join the shared system"
        );
    }

    #[test]
    fn test_zone_without_lighting_schedule_counts_zero_hours() {
        // Four dark zones and one office zone: the office zone's ~50 h/wk
        // deviates by ~40.2 h from the area-weighted average of ~10 h.
        let mut darks: Vec<Zone> = (1..=4)
            .map(|i| {
                let mut z = typical_zone(&format!("dark{i}"));
                z.lighting_schedules = vec![];
                z
            })
            .collect();
        darks.push(typical_zone("office"));

        let p = split_primary_secondary("level_1", darks, &rules()).unwrap();
        assert_eq!(names(&p.primary), vec!["dark1", "dark2", "dark3", "dark4"]);
        assert_eq!(names(&p.secondary), vec!["office"]);
    }

    #[test]
    fn test_partition_is_disjoint_and_total() {
        let mut lab = typical_zone("lab");
        lab.design_internal_load_w = Some(80.0 * lab.floor_area_m2);
        let zones = vec![typical_zone("a"), lab, typical_zone("b")];

        let p = split_primary_secondary("level_1", zones, &rules()).unwrap();
        let mut all: Vec<&str> = names(&p.primary);
        all.extend(names(&p.secondary));
        all.sort();
        assert_eq!(all, vec!["a", "b", "lab"]);
    }

    #[test]
    fn test_group_zones_by_story() {
        let mut a = typical_zone("a");
        a.story = "level_2".to_string();
        let b = typical_zone("b");
        let mut c = typical_zone("c");
        c.story = "level_2".to_string();

        let stories = group_zones_by_story(vec![a, b, c]);
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].0, "level_1");
        assert_eq!(names(&stories[0].1), vec!["b"]);
        assert_eq!(stories[1].0, "level_2");
        assert_eq!(names(&stories[1].1), vec!["a", "c"]);
    }
}
