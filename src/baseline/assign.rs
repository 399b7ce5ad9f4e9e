//! Whole-building baseline system assignment.
//!
//! Runs the full pipeline: group the conditioned zones by occupancy and
//! fuel, select each group's baseline system from the decision table, split
//! multi-zone VAV groups into primary and secondary zones per building
//! level, and size the multizone ventilation for each primary set.

use serde::Serialize;
use tracing::{info, warn};

use super::archetype::{secondary_system_type, select_system_type, system_band, SystemType};
use super::grouping::{group_zones, GroupSummary, SystemGroup};
use super::partition::{group_zones_by_story, split_primary_secondary, LevelPartition};
use super::ruleset::RuleSet;
use super::ventilation::{solve_dampers, DamperSolveResult};
use crate::error::Result;
use crate::zone::{FuelType, OccupancyType, Zone};

/// How a group's zones are served by its baseline system.
#[derive(Debug, Clone)]
pub enum GroupZones {
    /// One single-zone unit per zone (packaged terminals, single-zone
    /// packaged units, furnaces, fan coils).
    SingleZone { zones: Vec<Zone> },
    /// One shared VAV air handler per building level, with outlier zones
    /// carved off to their own single-zone systems.
    MultiZoneVav { partitions: Vec<LevelPartition> },
}

/// One system group with its resolved baseline system.
#[derive(Debug, Clone)]
pub struct AssignedGroup {
    pub occupancy: OccupancyType,
    pub fuel: FuelType,
    pub area_ft2: f64,
    pub num_stories: usize,
    pub system: SystemType,
    pub zones: GroupZones,
}

impl AssignedGroup {
    /// All zones of the group, regardless of layout.
    pub fn all_zones(&self) -> Box<dyn Iterator<Item = &Zone> + '_> {
        match &self.zones {
            GroupZones::SingleZone { zones } => Box::new(zones.iter()),
            GroupZones::MultiZoneVav { partitions } => Box::new(
                partitions
                    .iter()
                    .flat_map(|p| p.primary.iter().chain(p.secondary.iter())),
            ),
        }
    }
}

/// The complete baseline assignment for one building model.
#[derive(Debug, Clone)]
pub struct BaselineAssignment {
    pub groups: Vec<AssignedGroup>,
}

impl BaselineAssignment {
    /// All zones across all groups.
    pub fn all_zones(&self) -> impl Iterator<Item = &Zone> {
        self.groups.iter().flat_map(|g| g.all_zones())
    }

    /// Serializable report for downstream equipment-construction stages.
    pub fn summary(&self) -> AssignmentSummary {
        AssignmentSummary {
            groups: self
                .groups
                .iter()
                .map(|g| AssignedGroupSummary {
                    group: GroupSummary {
                        occupancy: g.occupancy,
                        fuel: g.fuel,
                        area_ft2: g.area_ft2,
                        num_stories: g.num_stories,
                        zone_names: g.all_zones().map(|z| z.name.clone()).collect(),
                    },
                    system: g.system,
                    levels: match &g.zones {
                        GroupZones::SingleZone { .. } => Vec::new(),
                        GroupZones::MultiZoneVav { partitions } => partitions
                            .iter()
                            .map(|p| LevelSummary {
                                story: p.story.clone(),
                                primary_zone_names: p
                                    .primary
                                    .iter()
                                    .map(|z| z.name.clone())
                                    .collect(),
                                secondary_zone_names: p
                                    .secondary
                                    .iter()
                                    .map(|z| z.name.clone())
                                    .collect(),
                                secondary_system: p.secondary_system,
                                damper_solve: p.damper_solve.clone(),
                            })
                            .collect(),
                    },
                })
                .collect(),
        }
    }
}

/// Serializable mirror of [`BaselineAssignment`].
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    pub groups: Vec<AssignedGroupSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignedGroupSummary {
    pub group: GroupSummary,
    pub system: SystemType,
    pub levels: Vec<LevelSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelSummary {
    pub story: String,
    pub primary_zone_names: Vec<String>,
    pub secondary_zone_names: Vec<String>,
    pub secondary_system: Option<SystemType>,
    pub damper_solve: Option<DamperSolveResult>,
}

/// Assigns a baseline system to every conditioned zone of the building.
pub fn assign_baseline_systems(
    zones: Vec<Zone>,
    rules: &RuleSet,
) -> Result<BaselineAssignment> {
    let groups = group_zones(zones, rules)?;

    let mut assigned = Vec::with_capacity(groups.len());
    for group in groups {
        let band = system_band(group.occupancy, group.area_ft2, group.num_stories, rules);
        let system = select_system_type(band, group.fuel)?;

        let SystemGroup {
            occupancy,
            fuel,
            area_ft2,
            num_stories,
            zones,
        } = group;

        let zones = if system.archetype.is_multizone_vav() {
            let mut partitions = Vec::new();
            for (story, story_zones) in group_zones_by_story(zones) {
                let mut partition = split_primary_secondary(&story, story_zones, rules)?;

                if !partition.secondary.is_empty() {
                    partition.secondary_system = Some(secondary_system_type(fuel)?);
                }

                if !partition.primary.is_empty() {
                    let v_ps = system_design_airflow(&partition.primary);
                    if v_ps > 0.0 {
                        partition.damper_solve =
                            Some(solve_dampers(&mut partition.primary, v_ps, rules)?);
                    } else {
                        warn!(
                            "The primary zones on {} carry no design supply airflow; \
                             skipping the ventilation solve for this level",
                            partition.story
                        );
                    }
                }
                partitions.push(partition);
            }
            GroupZones::MultiZoneVav { partitions }
        } else {
            GroupZones::SingleZone { zones }
        };

        info!(
            "Assigned {:?} to the {} / {} group ({:.0} ft2, {} stories)",
            system.archetype, occupancy, fuel, area_ft2, num_stories
        );
        assigned.push(AssignedGroup {
            occupancy,
            fuel,
            area_ft2,
            num_stories,
            system,
            zones,
        });
    }

    Ok(BaselineAssignment { groups: assigned })
}

/// System design supply airflow: the multiplier-weighted sum of the primary
/// zones' design supply airflows. Zones the sizing pass missed contribute
/// nothing, with a warning.
fn system_design_airflow(zones: &[Zone]) -> f64 {
    let mut total = 0.0;
    for zone in zones {
        match zone.design_supply_airflow_m3_per_s {
            Some(flow) => total += flow * zone.multiplier as f64,
            None => warn!(
                "Zone {} has no design supply airflow from the sizing pass; it \
                 contributes nothing to the system design airflow",
                zone.name
            ),
        }
    }
    total
}
