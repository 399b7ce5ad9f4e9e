use anyhow::Result;
use baseline_hvac::baseline::GroupZones;
use baseline_hvac::{assign_baseline_systems, RuleSet, Schedule, Zone};

fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A small two-story office building with a 24/7 server room.
    let mut zones = Vec::new();
    for story in ["level_1", "level_2"] {
        for quadrant in ["nw", "ne", "sw", "se"] {
            let mut zone = Zone::new(&format!("{story}_{quadrant}"), story, 1200.0);
            zone.lighting_schedules = vec![Schedule::office_lighting()];
            zone.design_internal_load_w = Some(12.0 * zone.floor_area_m2);
            zone.design_supply_airflow_m3_per_s = Some(1.2);
            zone.cooling_design_airflow_m3_per_s = Some(1.2);
            zone.breathing_zone_outdoor_air_m3_per_s = 0.15;
            zones.push(zone);
        }
    }
    let mut server_room = Zone::new("level_1_server", "level_1", 300.0);
    server_room.lighting_schedules = vec![Schedule::continuous_lighting()];
    server_room.design_internal_load_w = Some(400.0 * server_room.floor_area_m2);
    server_room.design_supply_airflow_m3_per_s = Some(0.8);
    server_room.cooling_design_airflow_m3_per_s = Some(0.8);
    server_room.breathing_zone_outdoor_air_m3_per_s = 0.02;
    zones.push(server_room);

    let assignment = assign_baseline_systems(zones, &RuleSet::new())?;

    for group in &assignment.groups {
        println!(
            "{:?} ({} / {}): {:.0} ft2 over {} stories",
            group.system.archetype, group.occupancy, group.fuel, group.area_ft2, group.num_stories
        );
        match &group.zones {
            GroupZones::SingleZone { zones } => {
                for zone in zones {
                    println!("  {}", zone.name);
                }
            }
            GroupZones::MultiZoneVav { partitions } => {
                for p in partitions {
                    println!("  {}:", p.story);
                    for zone in &p.primary {
                        println!(
                            "    primary   {} (min damper {:.2})",
                            zone.name, zone.min_damper_fraction
                        );
                    }
                    for zone in &p.secondary {
                        println!("    secondary {}", zone.name);
                    }
                    if let Some(solve) = &p.damper_solve {
                        println!(
                            "    system OA {:.3} m^3/s at Ev = {:.2}",
                            solve.system_outdoor_air_m3_per_s,
                            solve.system_ventilation_effectiveness
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
