//! Fatal errors raised during baseline system assignment.
//!
//! Missing per-zone sizing data is deliberately not represented here: such
//! zones are excluded from the affected computation with a logged warning
//! and processing continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A grouping or outlier pass received an item set with zero total area,
    /// or a solver received an empty/unsized system.
    #[error("degenerate input: {context}")]
    DegenerateInput { context: String },

    /// No zone in the building is heated or cooled; nothing to classify.
    #[error("the building has no conditioned zones")]
    NoConditionedZones,

    /// The band x fuel decision table has no entry for this combination.
    /// This is a data-table gap and must never be silently defaulted.
    #[error("no baseline system defined for band {band} with fuel {fuel}")]
    UnknownSystemCombination { band: String, fuel: String },
}

impl Error {
    pub(crate) fn degenerate(context: impl Into<String>) -> Self {
        Error::DegenerateInput {
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
