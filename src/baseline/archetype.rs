//! Baseline system archetype selection.
//!
//! Two-stage lookup: a system *band* from the group's occupancy, floor area,
//! and story count, then the archetype and its fuel triple from a fixed
//! band x fuel table.

use serde::Serialize;
use tracing::info;

use super::ruleset::RuleSet;
use crate::error::{Error, Result};
use crate::zone::{FuelType, HvacFuel, OccupancyType};

/// Equipment-class band resolved from occupancy, area, and story count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SystemBand {
    /// Residential buildings: packaged terminal units per zone.
    PackagedTerminal,
    /// Low-rise, small nonresidential: packaged single-zone units per zone.
    SingleZone,
    /// Mid-rise or mid-size nonresidential: packaged VAV air handlers.
    PackagedVav,
    /// High-rise or large nonresidential: central-plant VAV air handlers.
    CentralVav,
    /// Heating-only equipment. Never produced by [`system_band`]; reachable
    /// only through the dedicated heating-only call path for
    /// unconditioned-adjacent zones.
    HeatingOnly,
}

impl SystemBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemBand::PackagedTerminal => "PackagedTerminal",
            SystemBand::SingleZone => "SingleZone",
            SystemBand::PackagedVav => "PackagedVav",
            SystemBand::CentralVav => "CentralVav",
            SystemBand::HeatingOnly => "HeatingOnly",
        }
    }

    /// All bands with rows in the decision table.
    pub fn all() -> [SystemBand; 5] {
        [
            SystemBand::PackagedTerminal,
            SystemBand::SingleZone,
            SystemBand::PackagedVav,
            SystemBand::CentralVav,
            SystemBand::HeatingOnly,
        ]
    }
}

impl std::fmt::Display for SystemBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The catalog of baseline system archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SystemArchetype {
    PackagedTerminalAirConditioner,
    PackagedTerminalHeatPump,
    /// Substituted for packaged terminals when energy is purchased from a
    /// district source.
    FourPipeFanCoil,
    PackagedSingleZoneAc,
    PackagedSingleZoneHeatPump,
    PackagedVavWithReheat,
    PackagedVavWithPfpBoxes,
    VavWithReheat,
    VavWithPfpBoxes,
    GasFurnace,
    ElectricFurnace,
}

impl SystemArchetype {
    /// True for archetypes where one air handler serves many zones through
    /// variable-air-volume terminals, requiring the multizone ventilation
    /// procedure.
    pub fn is_multizone_vav(&self) -> bool {
        matches!(
            self,
            SystemArchetype::PackagedVavWithReheat
                | SystemArchetype::PackagedVavWithPfpBoxes
                | SystemArchetype::VavWithReheat
                | SystemArchetype::VavWithPfpBoxes
        )
    }
}

/// A selected archetype with its fuel triple. `None` fuels mean the
/// archetype has no equipment for that role (a furnace has no cooling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemType {
    pub archetype: SystemArchetype,
    pub main_heating_fuel: Option<HvacFuel>,
    pub zone_heating_fuel: Option<HvacFuel>,
    pub cooling_fuel: Option<HvacFuel>,
}

impl SystemType {
    const fn new(
        archetype: SystemArchetype,
        main: Option<HvacFuel>,
        zone: Option<HvacFuel>,
        cool: Option<HvacFuel>,
    ) -> Self {
        Self {
            archetype,
            main_heating_fuel: main,
            zone_heating_fuel: zone,
            cooling_fuel: cool,
        }
    }
}

/// Resolves the system band for a group.
///
/// Residential groups always take packaged terminals. Nonresidential and
/// heated-only groups are banded by story count and floor area; the branch
/// order matters for five-story buildings, which stay in the packaged VAV
/// band unless they exceed the large-building area limit.
pub fn system_band(
    occupancy: OccupancyType,
    area_ft2: f64,
    num_stories: usize,
    rules: &RuleSet,
) -> SystemBand {
    match occupancy {
        OccupancyType::Residential => SystemBand::PackagedTerminal,
        OccupancyType::NonResidential | OccupancyType::HeatedOnly => {
            if num_stories <= 3 && area_ft2 < rules.small_building_limit_ft2 {
                SystemBand::SingleZone
            } else if ((num_stories == 4 || num_stories == 5)
                && area_ft2 < rules.small_building_limit_ft2)
                || (num_stories <= 5
                    && area_ft2 >= rules.small_building_limit_ft2
                    && area_ft2 <= rules.large_building_limit_ft2)
            {
                SystemBand::PackagedVav
            } else {
                SystemBand::CentralVav
            }
        }
    }
}

/// Looks up the archetype and fuel triple for a band and fuel.
///
/// The table is total over the six real fuel categories; a gap (including
/// `Unconditioned`, which is never a valid system fuel) is a hard error.
pub fn select_system_type(band: SystemBand, fuel: FuelType) -> Result<SystemType> {
    use FuelType::*;
    use HvacFuel::*;
    use SystemArchetype::*;
    use SystemBand::*;

    let system = match (band, fuel) {
        (PackagedTerminal, Fossil) | (PackagedTerminal, FossilAndElectric) => SystemType::new(
            PackagedTerminalAirConditioner,
            Some(NaturalGas),
            None,
            Some(Electricity),
        ),
        (PackagedTerminal, Electric) => SystemType::new(
            PackagedTerminalHeatPump,
            Some(Electricity),
            None,
            Some(Electricity),
        ),
        (PackagedTerminal, PurchasedHeat) => SystemType::new(
            PackagedTerminalAirConditioner,
            Some(DistrictHeating),
            None,
            Some(Electricity),
        ),
        (PackagedTerminal, PurchasedCooling) => SystemType::new(
            FourPipeFanCoil,
            Some(NaturalGas),
            None,
            Some(DistrictCooling),
        ),
        (PackagedTerminal, PurchasedHeatAndCooling) => SystemType::new(
            FourPipeFanCoil,
            Some(DistrictHeating),
            None,
            Some(DistrictCooling),
        ),

        (SingleZone, Fossil) | (SingleZone, FossilAndElectric) => SystemType::new(
            PackagedSingleZoneAc,
            Some(NaturalGas),
            None,
            Some(Electricity),
        ),
        (SingleZone, Electric) => SystemType::new(
            PackagedSingleZoneHeatPump,
            Some(Electricity),
            None,
            Some(Electricity),
        ),
        (SingleZone, PurchasedHeat) => SystemType::new(
            PackagedSingleZoneAc,
            Some(DistrictHeating),
            None,
            Some(Electricity),
        ),
        (SingleZone, PurchasedCooling) => SystemType::new(
            PackagedSingleZoneAc,
            Some(NaturalGas),
            None,
            Some(DistrictCooling),
        ),
        (SingleZone, PurchasedHeatAndCooling) => SystemType::new(
            PackagedSingleZoneAc,
            Some(DistrictHeating),
            None,
            Some(DistrictCooling),
        ),

        (PackagedVav, Fossil) => SystemType::new(
            PackagedVavWithReheat,
            Some(NaturalGas),
            Some(NaturalGas),
            Some(Electricity),
        ),
        (PackagedVav, FossilAndElectric) => SystemType::new(
            PackagedVavWithReheat,
            Some(NaturalGas),
            Some(Electricity),
            Some(Electricity),
        ),
        (PackagedVav, Electric) => SystemType::new(
            PackagedVavWithPfpBoxes,
            Some(Electricity),
            Some(Electricity),
            Some(Electricity),
        ),
        (PackagedVav, PurchasedHeat) => SystemType::new(
            PackagedVavWithReheat,
            Some(DistrictHeating),
            Some(DistrictHeating),
            Some(Electricity),
        ),
        (PackagedVav, PurchasedCooling) => SystemType::new(
            PackagedVavWithPfpBoxes,
            Some(Electricity),
            Some(Electricity),
            Some(DistrictCooling),
        ),
        (PackagedVav, PurchasedHeatAndCooling) => SystemType::new(
            PackagedVavWithReheat,
            Some(DistrictHeating),
            Some(DistrictHeating),
            Some(DistrictCooling),
        ),

        (CentralVav, Fossil) => SystemType::new(
            VavWithReheat,
            Some(NaturalGas),
            Some(NaturalGas),
            Some(Electricity),
        ),
        (CentralVav, FossilAndElectric) => SystemType::new(
            VavWithReheat,
            Some(NaturalGas),
            Some(Electricity),
            Some(Electricity),
        ),
        (CentralVav, Electric) => SystemType::new(
            VavWithPfpBoxes,
            Some(Electricity),
            Some(Electricity),
            Some(Electricity),
        ),
        (CentralVav, PurchasedHeat) => SystemType::new(
            VavWithReheat,
            Some(DistrictHeating),
            Some(DistrictHeating),
            Some(Electricity),
        ),
        (CentralVav, PurchasedCooling) => SystemType::new(
            VavWithPfpBoxes,
            Some(Electricity),
            Some(Electricity),
            Some(DistrictCooling),
        ),
        (CentralVav, PurchasedHeatAndCooling) => SystemType::new(
            VavWithReheat,
            Some(DistrictHeating),
            Some(DistrictHeating),
            Some(DistrictCooling),
        ),

        (HeatingOnly, Fossil) | (HeatingOnly, FossilAndElectric) => {
            SystemType::new(GasFurnace, Some(NaturalGas), None, None)
        }
        (HeatingOnly, Electric) | (HeatingOnly, PurchasedCooling) => {
            SystemType::new(ElectricFurnace, Some(Electricity), None, None)
        }
        (HeatingOnly, PurchasedHeat) | (HeatingOnly, PurchasedHeatAndCooling) => {
            SystemType::new(GasFurnace, Some(DistrictHeating), None, None)
        }

        (_, Unconditioned) => {
            return Err(Error::UnknownSystemCombination {
                band: band.as_str().to_string(),
                fuel: fuel.as_str().to_string(),
            });
        }
    };

    info!(
        "System type is {:?} for {} / {}",
        system.archetype, band, fuel
    );
    Ok(system)
}

/// The single-zone system used for the secondary zones carved off a
/// multi-zone VAV group: the single-zone table row for the group's fuel
/// (reheat systems pair with the packaged single-zone AC, fan-powered-box
/// systems with the packaged single-zone heat pump).
pub fn secondary_system_type(fuel: FuelType) -> Result<SystemType> {
    select_system_type(SystemBand::SingleZone, fuel)
}
