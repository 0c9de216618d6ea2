use agency_shared::{checked_sum, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::accommodation::House;
use crate::pricing::volume_discount_bps;
use crate::product::{CatalogError, Nights, NightlyPriced};

/// Smallest number of houses a complex can be built from.
pub const MIN_COMPLEX_UNITS: usize = 2;

/// Multi-unit accommodation built from houses.
///
/// Renting every unit earns a volume discount of 10% per unit, capped at 50%.
/// Renting a single unit always prices the first house. Renting some but not all
/// units prices the first `units` houses without discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ComplexRecord")]
pub struct Complex {
    pub id: Uuid,
    address: String,
    houses: Vec<House>,
}

#[derive(Deserialize)]
struct ComplexRecord {
    id: Uuid,
    address: String,
    houses: Vec<House>,
}

impl TryFrom<ComplexRecord> for Complex {
    type Error = CatalogError;

    fn try_from(record: ComplexRecord) -> Result<Self, Self::Error> {
        let mut complex = Complex::new(record.address, record.houses)?;
        complex.id = record.id;
        Ok(complex)
    }
}

/// Discount that would apply when renting a given number of units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountInfo {
    pub applies: bool,
    pub percentage: f64,
    pub description: String,
}

impl Complex {
    pub fn new(address: impl Into<String>, houses: Vec<House>) -> Result<Self, CatalogError> {
        if houses.len() < MIN_COMPLEX_UNITS {
            return Err(CatalogError::Validation(format!(
                "a complex needs at least {} houses, got {}",
                MIN_COMPLEX_UNITS,
                houses.len()
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            address: address.into(),
            houses,
        })
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn total_units(&self) -> u32 {
        u32::try_from(self.houses.len()).unwrap_or(u32::MAX)
    }

    /// Price of renting `units_to_rent` units for `nights`.
    pub fn rental_price(&self, nights: Nights, units_to_rent: u32) -> Result<Money, CatalogError> {
        let total_units = self.total_units();
        if units_to_rent < 1 || units_to_rent > total_units {
            return Err(CatalogError::OutOfRange {
                requested: units_to_rent,
                max: total_units,
            });
        }

        if units_to_rent == 1 {
            return Ok(self.houses[0].price_for_nights(nights));
        }

        let base = checked_sum(
            self.houses
                .iter()
                .take(units_to_rent as usize)
                .map(|house| house.price_for_nights(nights)),
        )
        .ok_or(CatalogError::Overflow)?;

        if units_to_rent == total_units {
            return Ok(base.discounted_by_bps(volume_discount_bps(units_to_rent)));
        }

        Ok(base)
    }

    pub fn discount_info(&self, units_to_rent: u32) -> DiscountInfo {
        if units_to_rent != self.total_units() {
            return DiscountInfo {
                applies: false,
                percentage: 0.0,
                description: "No discount".to_string(),
            };
        }

        let bps = volume_discount_bps(units_to_rent);
        DiscountInfo {
            applies: true,
            percentage: f64::from(bps) / 100.0,
            description: format!("{}% discount", bps / 100),
        }
    }
}

impl NightlyPriced for Complex {
    fn address(&self) -> &str {
        &self.address
    }

    /// Single-unit price: the first house.
    fn price_for_nights(&self, nights: Nights) -> Money {
        self.houses[0].price_for_nights(nights)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Complex with {} units at {}", self.houses.len(), self.address)
    }
}
