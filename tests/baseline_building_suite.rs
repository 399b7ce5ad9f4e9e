//! Whole-building baseline assignment scenarios.
//!
//! Each scenario hand-builds a zone population the way the external
//! geometry/sizing stage would, runs the full assignment, and checks the
//! resulting system groups, partitions, and ventilation sizing.

use baseline_hvac::baseline::archetype::SystemArchetype;
use baseline_hvac::baseline::{GroupZones, ProgramVariant};
use baseline_hvac::units::ft2_to_m2;
use baseline_hvac::{
    assign_baseline_systems, Error, FuelType, HvacFuel, OccupancyType, RuleSet, Schedule, Zone,
};

/// An office-profile zone with complete sizing data.
fn office_zone(name: &str, story: &str, area_ft2: f64) -> Zone {
    let mut zone = Zone::new(name, story, ft2_to_m2(area_ft2));
    zone.fuel = FuelType::Fossil;
    zone.lighting_schedules = vec![Schedule::office_lighting()];
    zone.design_internal_load_w = Some(12.0 * zone.floor_area_m2);
    zone.design_supply_airflow_m3_per_s = Some(zone.floor_area_m2 * 0.005);
    zone.cooling_design_airflow_m3_per_s = Some(zone.floor_area_m2 * 0.005);
    zone.breathing_zone_outdoor_air_m3_per_s = zone.floor_area_m2 * 0.0005;
    zone.min_damper_fraction = 0.3;
    zone
}

#[test]
fn small_gas_office_lands_on_packaged_single_zone_units() {
    // Two-story, 40,000 ft2, fossil heat: single-zone band, PSZ-AC.
    let zones = vec![
        office_zone("z1", "level_1", 10_000.0),
        office_zone("z2", "level_1", 10_000.0),
        office_zone("z3", "level_2", 10_000.0),
        office_zone("z4", "level_2", 10_000.0),
    ];
    let assignment = assign_baseline_systems(zones, &RuleSet::new()).unwrap();

    assert_eq!(assignment.groups.len(), 1);
    let group = &assignment.groups[0];
    assert_eq!(group.system.archetype, SystemArchetype::PackagedSingleZoneAc);
    assert_eq!(group.system.main_heating_fuel, Some(HvacFuel::NaturalGas));
    assert_eq!(group.system.cooling_fuel, Some(HvacFuel::Electricity));
    assert!(
        matches!(group.zones, GroupZones::SingleZone { .. }),
        "Single-zone systems bypass partitioning and the ventilation solve"
    );
}

#[test]
fn midrise_electric_office_lands_on_pfp_vav_with_solve() {
    // Four stories, 48,000 ft2, electric heat: packaged VAV band with
    // fan-powered boxes, one partition and one ventilation solve per level.
    let mut zones = Vec::new();
    for story in ["level_1", "level_2", "level_3", "level_4"] {
        for suffix in ["a", "b", "c"] {
            let mut zone = office_zone(&format!("{story}_{suffix}"), story, 4_000.0);
            zone.fuel = FuelType::Electric;
            zones.push(zone);
        }
    }
    let assignment = assign_baseline_systems(zones, &RuleSet::new()).unwrap();

    assert_eq!(assignment.groups.len(), 1);
    let group = &assignment.groups[0];
    assert_eq!(group.system.archetype, SystemArchetype::PackagedVavWithPfpBoxes);
    assert_eq!(group.system.zone_heating_fuel, Some(HvacFuel::Electricity));

    let GroupZones::MultiZoneVav { partitions } = &group.zones else {
        panic!("Expected per-level VAV partitions");
    };
    assert_eq!(partitions.len(), 4);
    for partition in partitions {
        assert_eq!(partition.primary.len(), 3, "Homogeneous level, all primary");
        assert!(partition.secondary.is_empty());
        let solve = partition.damper_solve.as_ref().expect("ventilation solve");
        assert!(
            solve.system_ventilation_effectiveness >= 0.6 - 1e-12,
            "Every level meets the effectiveness floor, got {}",
            solve.system_ventilation_effectiveness
        );
        for zone in &partition.primary {
            assert!(zone.min_damper_fraction >= 0.3 && zone.min_damper_fraction <= 1.0);
        }
    }
}

#[test]
fn highrise_tower_lands_on_central_vav_reheat() {
    // Eight stories of 20,000 ft2: central VAV band.
    let mut zones = Vec::new();
    for i in 1..=8 {
        zones.push(office_zone(&format!("floor_{i:02}"), &format!("level_{i:02}"), 20_000.0));
    }
    let assignment = assign_baseline_systems(zones, &RuleSet::new()).unwrap();

    let group = &assignment.groups[0];
    assert_eq!(group.num_stories, 8);
    assert_eq!(group.system.archetype, SystemArchetype::VavWithReheat);
    assert_eq!(group.system.zone_heating_fuel, Some(HvacFuel::NaturalGas));
}

#[test]
fn mixed_use_splits_residential_and_heated_only_groups() {
    // A 100,000 ft2 office block with a 25,000 ft2 residential wing (over
    // the exception area) and an uncooled warehouse.
    let mut zones = vec![
        office_zone("off_1", "level_1", 50_000.0),
        office_zone("off_2", "level_2", 50_000.0),
    ];
    let mut apt = office_zone("apartments", "level_1", 25_000.0);
    apt.occupancy = OccupancyType::Residential;
    zones.push(apt);
    let mut warehouse = office_zone("warehouse", "level_1", 10_000.0);
    warehouse.cooled = false;
    zones.push(warehouse);

    let assignment = assign_baseline_systems(zones, &RuleSet::new()).unwrap();
    assert_eq!(assignment.groups.len(), 3);

    let residential = assignment
        .groups
        .iter()
        .find(|g| g.occupancy == OccupancyType::Residential)
        .expect("residential group");
    assert_eq!(
        residential.system.archetype,
        SystemArchetype::PackagedTerminalAirConditioner
    );

    let heated_only = assignment
        .groups
        .iter()
        .find(|g| g.occupancy == OccupancyType::HeatedOnly)
        .expect("heated-only group");
    assert_eq!(heated_only.fuel, FuelType::Fossil, "Shares the parent fuel");

    let office = assignment
        .groups
        .iter()
        .find(|g| {
            g.occupancy == OccupancyType::NonResidential
                && g.all_zones().any(|z| z.name.starts_with("off_"))
        })
        .expect("office group");
    assert_eq!(office.system.archetype, SystemArchetype::PackagedVavWithReheat);

    // Disjoint cover of the whole population.
    let mut names: Vec<&str> = assignment.all_zones().map(|z| z.name.as_str()).collect();
    names.sort();
    let total = names.len();
    names.dedup();
    assert_eq!(total, names.len(), "No zone appears twice");
    assert_eq!(names, vec!["apartments", "off_1", "off_2", "warehouse"]);
}

#[test]
fn district_heat_anywhere_rewrites_every_group_fuel() {
    let mut zones = vec![
        office_zone("off_1", "level_1", 60_000.0),
        office_zone("off_2", "level_2", 60_000.0),
    ];
    let mut lobby = office_zone("lobby", "level_1", 2_000.0);
    lobby.fuel = FuelType::PurchasedHeat;
    zones.push(lobby);

    let assignment = assign_baseline_systems(zones, &RuleSet::new()).unwrap();
    for group in &assignment.groups {
        assert_eq!(group.fuel, FuelType::PurchasedHeat);
        assert_eq!(
            group.system.main_heating_fuel,
            Some(HvacFuel::DistrictHeating),
            "District heat flows into the fuel triple"
        );
    }
}

#[test]
fn divergent_zones_are_carved_off_with_paired_single_zone_systems() {
    // Level 1 of a packaged-VAV office holds a 24/7 data room; it must be
    // served by its own PSZ-AC while the rest share the VAV system.
    let mut zones = vec![
        office_zone("off_a", "level_1", 30_000.0),
        office_zone("off_b", "level_1", 30_000.0),
        office_zone("off_c", "level_2", 30_000.0),
    ];
    let mut data_room = office_zone("data_room", "level_1", 5_000.0);
    data_room.lighting_schedules = vec![Schedule::continuous_lighting()];
    zones.push(data_room);

    let assignment = assign_baseline_systems(zones, &RuleSet::new()).unwrap();
    let group = &assignment.groups[0];
    assert_eq!(group.system.archetype, SystemArchetype::PackagedVavWithReheat);

    let GroupZones::MultiZoneVav { partitions } = &group.zones else {
        panic!("Expected per-level VAV partitions");
    };
    let level_1 = partitions.iter().find(|p| p.story == "level_1").unwrap();
    let secondary_names: Vec<&str> =
        level_1.secondary.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(secondary_names, vec!["data_room"]);
    assert_eq!(
        level_1.secondary_system.unwrap().archetype,
        SystemArchetype::PackagedSingleZoneAc
    );

    // The solve only covers the primary zones.
    let solve = level_1.damper_solve.as_ref().unwrap();
    assert!(solve.zones.iter().all(|z| z.zone_name != "data_room"));
}

#[test]
fn exception_area_threshold_is_strictly_greater() {
    let build = |wing_ft2: f64| {
        let mut zones = vec![office_zone("off", "level_1", 50_000.0)];
        let mut apt = office_zone("apt", "level_1", wing_ft2);
        apt.occupancy = OccupancyType::Residential;
        zones.push(apt);
        zones
    };
    let rules = RuleSet::new();

    let below = assign_baseline_systems(build(19_999.0), &rules).unwrap();
    assert_eq!(below.groups.len(), 1, "Below the threshold, folded in");

    let above = assign_baseline_systems(build(20_001.0), &rules).unwrap();
    assert_eq!(above.groups.len(), 2, "Above the threshold, stands alone");
}

#[test]
fn utility_program_variant_preserves_smaller_wings() {
    let build = || {
        let mut zones = vec![office_zone("off", "level_1", 30_000.0)];
        let mut apt = office_zone("apt", "level_1", 6_000.0);
        apt.occupancy = OccupancyType::Residential;
        zones.push(apt);
        zones
    };

    let standard = assign_baseline_systems(build(), &RuleSet::new()).unwrap();
    assert_eq!(standard.groups.len(), 1);

    let variant = RuleSet::for_variant(ProgramVariant::UtilityEfficiencyProgram);
    let reduced = assign_baseline_systems(build(), &variant).unwrap();
    assert_eq!(reduced.groups.len(), 2);
}

#[test]
fn unconditioned_building_aborts() {
    let mut zone = office_zone("plenum", "level_1", 10_000.0);
    zone.heated = false;
    zone.cooled = false;
    let err = assign_baseline_systems(vec![zone], &RuleSet::new()).unwrap_err();
    assert!(matches!(err, Error::NoConditionedZones));
}

#[test]
fn assignment_is_stable_across_input_order() {
    // The same building presented in two different zone orders yields the
    // same groups, partitions, and damper fractions.
    let build = || {
        let mut zones = vec![
            office_zone("off_a", "level_1", 30_000.0),
            office_zone("off_b", "level_1", 30_000.0),
            office_zone("off_c", "level_2", 30_000.0),
        ];
        let mut data_room = office_zone("data_room", "level_1", 5_000.0);
        data_room.lighting_schedules = vec![Schedule::continuous_lighting()];
        zones.push(data_room);
        zones
    };
    let rules = RuleSet::new();

    let forward = assign_baseline_systems(build(), &rules).unwrap();
    let mut reversed_zones = build();
    reversed_zones.reverse();
    let reversed = assign_baseline_systems(reversed_zones, &rules).unwrap();

    let fwd = serde_json::to_string(&forward.summary()).unwrap();
    let rev = serde_json::to_string(&reversed.summary()).unwrap();
    assert_eq!(fwd, rev, "Input order must not change the assignment");
}
