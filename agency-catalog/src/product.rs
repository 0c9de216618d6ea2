use agency_shared::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use uuid::Uuid;

use crate::accommodation::{Accommodation, Hotel, House};
use crate::complex::Complex;
use crate::package::Package;

/// Catalog-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Must rent between 1 and {max} units, requested {requested}")]
    OutOfRange {
        requested: u32,
        max: u32,
    },

    #[error("Missing required pricing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Price exceeds the representable range")]
    Overflow,
}

/// A positive number of nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nights(NonZeroU32);

impl Nights {
    pub const ONE: Nights = Nights(NonZeroU32::MIN);

    pub fn new(nights: u32) -> Result<Self, CatalogError> {
        NonZeroU32::new(nights)
            .map(Nights)
            .ok_or_else(|| CatalogError::Validation("nights must be at least 1".to_string()))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Nights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Products with a price that takes no parameters.
pub trait FlatPriced {
    fn price(&self) -> Money;
}

/// Accommodations: products priced per night at an address.
pub trait NightlyPriced {
    fn address(&self) -> &str;

    fn price_for_nights(&self, nights: Nights) -> Money;
}

/// Parameters for generic pricing through [`Product::quote`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingParams {
    pub nights: Option<Nights>,
    pub units_to_rent: Option<u32>,
}

impl PricingParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_nights(nights: Nights) -> Self {
        Self {
            nights: Some(nights),
            units_to_rent: None,
        }
    }

    pub fn with_units(mut self, units_to_rent: u32) -> Self {
        self.units_to_rent = Some(units_to_rent);
        self
    }
}

/// Anything the agency sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Product {
    Flight(Flight),
    Accommodation(Accommodation),
    Package(Package),
}

impl Product {
    pub fn id(&self) -> Uuid {
        match self {
            Product::Flight(flight) => flight.id,
            Product::Accommodation(accommodation) => accommodation.id(),
            Product::Package(package) => package.id,
        }
    }

    /// Whether pricing this product requires a night count.
    pub fn needs_nights(&self) -> bool {
        matches!(self, Product::Accommodation(_))
    }

    /// Price this product with the given parameters.
    ///
    /// Accommodations fail with [`CatalogError::MissingParameter`] without nights,
    /// complexes additionally honour `units_to_rent` (default 1). Flights ignore the
    /// parameters and packages pass them on to their members. Totals that do not fit
    /// in [`Money`] fail with [`CatalogError::Overflow`].
    pub fn quote(&self, params: &PricingParams) -> Result<Money, CatalogError> {
        let price = match self {
            Product::Flight(flight) => flight.price(),
            Product::Accommodation(accommodation) => {
                let nights = params.nights.ok_or(CatalogError::MissingParameter("nights"))?;
                match accommodation {
                    Accommodation::Complex(complex) => {
                        complex.rental_price(nights, params.units_to_rent.unwrap_or(1))?
                    }
                    other => other.price_for_nights(nights),
                }
            }
            Product::Package(package) => package.checked_price(params)?,
        };

        tracing::debug!("Quoted {} at {}", self, price);
        Ok(price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Flight(flight) => fmt::Display::fmt(flight, f),
            Product::Accommodation(accommodation) => fmt::Display::fmt(accommodation, f),
            Product::Package(package) => fmt::Display::fmt(package, f),
        }
    }
}

impl From<Flight> for Product {
    fn from(flight: Flight) -> Self {
        Product::Flight(flight)
    }
}

impl From<Accommodation> for Product {
    fn from(accommodation: Accommodation) -> Self {
        Product::Accommodation(accommodation)
    }
}

impl From<Hotel> for Product {
    fn from(hotel: Hotel) -> Self {
        Product::Accommodation(Accommodation::Hotel(hotel))
    }
}

impl From<House> for Product {
    fn from(house: House) -> Self {
        Product::Accommodation(Accommodation::House(house))
    }
}

impl From<Complex> for Product {
    fn from(complex: Complex) -> Self {
        Product::Accommodation(Accommodation::Complex(complex))
    }
}

impl From<Package> for Product {
    fn from(package: Package) -> Self {
        Product::Package(package)
    }
}

/// Flat-priced flight, one way or round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub airline: String,
    pub price: Money,
}

impl Flight {
    pub fn new(
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
        airline: impl Into<String>,
        price: Money,
    ) -> Result<Self, CatalogError> {
        if price < Money::ZERO {
            return Err(CatalogError::Validation(format!(
                "flight price cannot be negative: {}",
                price
            )));
        }

        if let Some(return_date) = return_date {
            if return_date < departure_date {
                return Err(CatalogError::Validation(format!(
                    "return date {} is before departure date {}",
                    return_date, departure_date
                )));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            departure_date,
            return_date,
            airline: airline.into(),
            price,
        })
    }

    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }
}

impl FlatPriced for Flight {
    fn price(&self) -> Money {
        self.price
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.return_date {
            Some(return_date) => write!(
                f,
                "Flight {} ({} - {}) - round trip",
                self.airline, self.departure_date, return_date
            ),
            None => write!(f, "Flight {} ({}) - one way", self.airline, self.departure_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn nights(n: u32) -> Nights {
        Nights::new(n).unwrap()
    }

    #[test]
    fn test_flight_round_trip() {
        let flight = Flight::new(date(2025, 1, 15), Some(date(2025, 1, 20)), "Aerolineas Argentinas", Money(120_000)).unwrap();

        assert!(flight.is_round_trip());
        assert_eq!(flight.price(), Money(120_000));
        assert_eq!(
            flight.to_string(),
            "Flight Aerolineas Argentinas (2025-01-15 - 2025-01-20) - round trip"
        );
    }

    #[test]
    fn test_flight_one_way() {
        let flight = Flight::new(date(2025, 2, 10), None, "LATAM", Money(80_000)).unwrap();

        assert!(!flight.is_round_trip());
        assert_eq!(flight.to_string(), "Flight LATAM (2025-02-10) - one way");
    }

    #[test]
    fn test_flight_rejects_return_before_departure() {
        let result = Flight::new(date(2025, 2, 10), Some(date(2025, 2, 1)), "LATAM", Money(80_000));
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_nights_must_be_positive() {
        assert!(Nights::new(0).is_err());
        assert_eq!(Nights::new(3).unwrap().get(), 3);
        assert_eq!(Nights::ONE.get(), 1);
    }

    #[test]
    fn test_quote_dispatches_by_variant() {
        let flight: Product = Flight::new(date(2025, 2, 10), None, "LATAM", Money(100_000)).unwrap().into();
        let hotel: Product = Hotel::new("Av. Corrientes 1234", "Plaza", 4).unwrap().into();

        assert_eq!(flight.quote(&PricingParams::none()).unwrap(), Money(100_000));
        assert_eq!(flight.quote(&PricingParams::for_nights(nights(3))).unwrap(), Money(100_000));
        assert_eq!(hotel.quote(&PricingParams::for_nights(nights(3))).unwrap(), Money(120_000));
        assert!(!flight.needs_nights());
        assert!(hotel.needs_nights());
    }

    #[test]
    fn test_quote_accommodation_without_nights_fails() {
        let house: Product = House::new("Av. Santa Fe 890", 1).unwrap().into();

        assert_eq!(
            house.quote(&PricingParams::none()),
            Err(CatalogError::MissingParameter("nights"))
        );
    }

    #[test]
    fn test_quote_complex_uses_units() {
        let complex: Product = Complex::new(
            "Las Palmas",
            vec![House::new("Unit 1", 2).unwrap(), House::new("Unit 2", 3).unwrap()],
        )
        .unwrap()
        .into();

        let params = PricingParams::for_nights(nights(5)).with_units(2);
        assert_eq!(complex.quote(&params).unwrap(), Money(240_000));

        let single = PricingParams::for_nights(nights(5));
        assert_eq!(complex.quote(&single).unwrap(), Money(150_000));

        let too_many = PricingParams::for_nights(nights(5)).with_units(3);
        assert_eq!(
            complex.quote(&too_many),
            Err(CatalogError::OutOfRange { requested: 3, max: 2 })
        );
    }

    #[test]
    fn test_product_serializes_with_type_tag() {
        let flight: Product = Flight::new(date(2025, 2, 10), None, "LATAM", Money(80_000)).unwrap().into();
        let value = serde_json::to_value(&flight).unwrap();

        assert_eq!(value["type"], "FLIGHT");
        assert_eq!(value["details"]["airline"], "LATAM");
        assert_eq!(value["details"]["price"], 80_000);

        let decoded: Product = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, flight);
    }
}
