//! Thermal zone data consumed by baseline system assignment.
//!
//! Zones are constructed by the external geometry/sizing stage before this
//! crate runs. Everything here is read-only input except
//! [`Zone::min_damper_fraction`], which the ventilation solver rewrites.

use serde::Serialize;

use crate::name::HasName;
use crate::schedule::Schedule;
use crate::units::m2_to_ft2;

/// Occupancy classification used for system grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OccupancyType {
    Residential,
    NonResidential,
    /// Zones that are heated but have no cooling; split into their own
    /// groups after dominant occupancy and fuel are determined.
    HeatedOnly,
}

impl OccupancyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OccupancyType::Residential => "residential",
            OccupancyType::NonResidential => "nonresidential",
            OccupancyType::HeatedOnly => "heatedonly",
        }
    }
}

impl std::fmt::Display for OccupancyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heating/cooling fuel classification used for system grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FuelType {
    Electric,
    Fossil,
    FossilAndElectric,
    PurchasedHeat,
    PurchasedCooling,
    PurchasedHeatAndCooling,
    /// No heating or cooling source; never allowed to dominate a group.
    Unconditioned,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Electric => "electric",
            FuelType::Fossil => "fossil",
            FuelType::FossilAndElectric => "fossilandelectric",
            FuelType::PurchasedHeat => "purchasedheat",
            FuelType::PurchasedCooling => "purchasedcooling",
            FuelType::PurchasedHeatAndCooling => "purchasedheatandcooling",
            FuelType::Unconditioned => "unconditioned",
        }
    }

    /// True for fuels sourced from a district/purchased energy supply.
    pub fn is_purchased(&self) -> bool {
        matches!(
            self,
            FuelType::PurchasedHeat
                | FuelType::PurchasedCooling
                | FuelType::PurchasedHeatAndCooling
        )
    }

    /// True if the fuel includes purchased heating.
    pub fn includes_purchased_heating(&self) -> bool {
        matches!(
            self,
            FuelType::PurchasedHeat | FuelType::PurchasedHeatAndCooling
        )
    }

    /// True if the fuel includes purchased cooling.
    pub fn includes_purchased_cooling(&self) -> bool {
        matches!(
            self,
            FuelType::PurchasedCooling | FuelType::PurchasedHeatAndCooling
        )
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// End-use fuel carried by a selected baseline system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HvacFuel {
    Electricity,
    NaturalGas,
    DistrictHeating,
    DistrictCooling,
}

impl std::fmt::Display for HvacFuel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HvacFuel::Electricity => "Electricity",
            HvacFuel::NaturalGas => "NaturalGas",
            HvacFuel::DistrictHeating => "DistrictHeating",
            HvacFuel::DistrictCooling => "DistrictCooling",
        };
        f.write_str(s)
    }
}

/// A conditioned thermal zone with the profile data the classifier and
/// ventilation solver need.
#[derive(Debug, Clone)]
pub struct Zone {
    pub name: String,
    /// Building level this zone sits on (zones spanning several levels are
    /// assigned to their lowest).
    pub story: String,
    pub floor_area_m2: f64,
    /// Number of identical zones this object represents (>= 1).
    pub multiplier: u32,
    pub occupancy: OccupancyType,
    pub fuel: FuelType,
    pub heated: bool,
    pub cooled: bool,
    /// Number of consecutive building levels this zone spans (atriums,
    /// stairwells). 1 for ordinary zones.
    pub num_stories_spanned: usize,
    /// Lighting schedules, used as the operating-hours proxy. The first
    /// schedule with positive annual full-load hours wins.
    pub lighting_schedules: Vec<Schedule>,
    /// Design internal load in W, from the external sizing pass.
    pub design_internal_load_w: Option<f64>,
    /// Design supply airflow in m^3/s, from the external sizing pass.
    pub design_supply_airflow_m3_per_s: Option<f64>,
    /// Heating design airflow in m^3/s.
    pub heating_design_airflow_m3_per_s: Option<f64>,
    /// Cooling design airflow in m^3/s.
    pub cooling_design_airflow_m3_per_s: Option<f64>,
    /// Breathing-zone outdoor airflow Vbz in m^3/s.
    pub breathing_zone_outdoor_air_m3_per_s: f64,
    /// Zone air distribution effectiveness Ez.
    pub air_distribution_effectiveness: f64,
    /// Terminal minimum damper fraction in [0, 1]. The only field this
    /// crate mutates.
    pub min_damper_fraction: f64,
    /// Terminal fixed minimum airflow in m^3/s (0 when not set).
    pub fixed_min_airflow_m3_per_s: f64,
}

impl Zone {
    /// Creates a heated and cooled nonresidential zone with no sizing data.
    pub fn new(name: &str, story: &str, floor_area_m2: f64) -> Self {
        Self {
            name: name.to_string(),
            story: story.to_string(),
            floor_area_m2,
            multiplier: 1,
            occupancy: OccupancyType::NonResidential,
            fuel: FuelType::Electric,
            heated: true,
            cooled: true,
            num_stories_spanned: 1,
            lighting_schedules: Vec::new(),
            design_internal_load_w: None,
            design_supply_airflow_m3_per_s: None,
            heating_design_airflow_m3_per_s: None,
            cooling_design_airflow_m3_per_s: None,
            breathing_zone_outdoor_air_m3_per_s: 0.0,
            air_distribution_effectiveness: 1.0,
            min_damper_fraction: 0.3,
            fixed_min_airflow_m3_per_s: 0.0,
        }
    }

    /// True when the zone participates in baseline classification.
    pub fn is_conditioned(&self) -> bool {
        self.heated || self.cooled
    }

    /// Multiplier-weighted floor area in m^2.
    pub fn total_floor_area_m2(&self) -> f64 {
        self.floor_area_m2 * self.multiplier as f64
    }

    /// Multiplier-weighted floor area in ft^2.
    pub fn total_floor_area_ft2(&self) -> f64 {
        m2_to_ft2(self.total_floor_area_m2())
    }

    /// Weekly full-load operating hours, proxied by the first lighting
    /// schedule with positive annual equivalent full-load hours. Zones with
    /// no lit schedule report 0.
    pub fn weekly_operating_hours(&self) -> f64 {
        for schedule in &self.lighting_schedules {
            let annual = schedule.annual_equivalent_full_load_hours();
            if annual > 0.0 {
                return annual / 52.0;
            }
        }
        0.0
    }

    /// Largest of the heating and cooling design airflows in m^3/s, or
    /// `None` when the sizing pass populated neither.
    pub fn peak_design_airflow_m3_per_s(&self) -> Option<f64> {
        match (
            self.heating_design_airflow_m3_per_s,
            self.cooling_design_airflow_m3_per_s,
        ) {
            (Some(h), Some(c)) => Some(h.max(c)),
            (Some(h), None) => Some(h),
            (None, Some(c)) => Some(c),
            (None, None) => None,
        }
    }
}

impl HasName for Zone {
    fn name(&self) -> &str {
        &self.name
    }
}
