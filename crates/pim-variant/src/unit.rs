//! Unit tokens and their kilogram equivalents.
//!
//! Volumes are converted at the density of water (1 L = 1 kg); the catalog
//! only needs an approximate shipping weight.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// A unit token the weight calculation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    Kilogram,
    Gram,
    Litre,
    Millilitre,
    Centilitre,
}

impl MassUnit {
    /// Resolves a unit token case-insensitively. Unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "KG" => Some(MassUnit::Kilogram),
            "G" => Some(MassUnit::Gram),
            "L" => Some(MassUnit::Litre),
            "ML" => Some(MassUnit::Millilitre),
            "CL" => Some(MassUnit::Centilitre),
            _ => None,
        }
    }

    /// Kilograms per one of this unit.
    #[must_use]
    pub fn kg_factor(self) -> Decimal {
        match self {
            MassUnit::Kilogram | MassUnit::Litre => Decimal::ONE,
            MassUnit::Gram | MassUnit::Millilitre => Decimal::new(1, 3),
            MassUnit::Centilitre => Decimal::new(1, 2),
        }
    }
}

/// Weight of one unit of `size` `unit`, in kilograms.
///
/// Returns `None` when the unit is not recognized or the size does not parse.
#[must_use]
pub fn per_unit_kg(size: &str, unit: &str) -> Option<Decimal> {
    let unit = MassUnit::from_token(unit)?;
    let size = match size.strip_prefix('.') {
        Some(fraction) => Decimal::from_str(&format!("0.{fraction}")),
        None => Decimal::from_str(size),
    }
    .ok()?;
    size.checked_mul(unit.kg_factor())
}

/// Total pack weight rounded half-up to whole kilograms.
#[must_use]
pub fn total_weight_kg(per_unit_kg: Decimal, multiplier: u32) -> Option<u64> {
    per_unit_kg
        .checked_mul(Decimal::from(multiplier))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}
