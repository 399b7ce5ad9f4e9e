//! Baseline HVAC system assignment.
//!
//! The pipeline groups conditioned zones by dominant occupancy and fuel
//! type, maps each group to a baseline system archetype through a fixed
//! decision table, differentiates primary from secondary zones per building
//! level, and sizes multizone VAV ventilation by raising minimum damper
//! fractions to a ventilation-effectiveness floor.

pub mod archetype;
pub mod assign;
pub mod grouping;
pub mod outliers;
pub mod partition;
pub mod ruleset;
pub mod ventilation;

pub use archetype::{
    secondary_system_type, select_system_type, system_band, SystemArchetype, SystemBand,
    SystemType,
};
pub use assign::{assign_baseline_systems, AssignedGroup, BaselineAssignment, GroupZones};
pub use grouping::{group_zones, SystemGroup};
pub use outliers::reject_outliers;
pub use partition::{group_zones_by_story, split_primary_secondary, LevelPartition};
pub use ruleset::{ProgramVariant, RuleSet};
pub use ventilation::{solve_dampers, DamperSolveResult, ZoneVentilation};
