pub mod baseline;
pub mod error;
mod name;
pub mod schedule;
pub mod units;
pub mod zone;

// Prelude
pub use baseline::{assign_baseline_systems, BaselineAssignment, RuleSet, SystemType};
pub use error::{Error, Result};
pub use name::{HasName, SortByName};
pub use schedule::Schedule;
pub use zone::{FuelType, HvacFuel, OccupancyType, Zone};
