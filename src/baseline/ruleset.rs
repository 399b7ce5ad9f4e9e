//! Classification rules for one code-year/program variant.
//!
//! Passed explicitly into the grouper, selector, splitter, and solver so
//! several building variants can be classified side by side without shared
//! state.

/// Named program variants that modify the default rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramVariant {
    /// Plain code baseline.
    Standard,
    /// Utility efficiency-program variant with a reduced exception area
    /// for non-dominant occupancy/fuel groups.
    UtilityEfficiencyProgram,
}

/// Rule constants for baseline system assignment.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Non-dominant occupancy/fuel buckets above this area become their own
    /// system group. Applied at both the occupancy and fuel level.
    pub exception_area_ft2: f64,
    /// Area below which low-rise nonresidential buildings stay in the
    /// single-zone band.
    pub small_building_limit_ft2: f64,
    /// Area above which buildings land in the central VAV band regardless
    /// of story count.
    pub large_building_limit_ft2: f64,
    /// Pass-1 splitter tolerance on weekly full-load operating hours.
    pub operating_hours_tolerance_hrs: f64,
    /// Pass-2 splitter tolerance on internal load density in Btu/hr*ft^2.
    pub load_density_tolerance_btu_per_hr_ft2: f64,
    /// Minimum allowed zone ventilation effectiveness Evz.
    pub ventilation_effectiveness_floor: f64,
    /// Decimal places kept when writing adjusted damper fractions. Purely
    /// an output-stability clamp, not a regulatory constant.
    pub damper_rounding_decimals: u32,
}

impl RuleSet {
    pub fn new() -> Self {
        Self {
            exception_area_ft2: 20_000.0,
            small_building_limit_ft2: 75_000.0,
            large_building_limit_ft2: 150_000.0,
            operating_hours_tolerance_hrs: 40.0,
            load_density_tolerance_btu_per_hr_ft2: 10.0,
            ventilation_effectiveness_floor: 0.6,
            damper_rounding_decimals: 11,
        }
    }

    /// Rules for a named program variant.
    pub fn for_variant(variant: ProgramVariant) -> Self {
        let mut rules = Self::new();
        if variant == ProgramVariant::UtilityEfficiencyProgram {
            rules.exception_area_ft2 = 5_000.0;
        }
        rules
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
