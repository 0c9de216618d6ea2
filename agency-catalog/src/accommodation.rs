use agency_shared::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use uuid::Uuid;

use crate::complex::Complex;
use crate::pricing::{HouseTier, MAX_HOTEL_STARS, MIN_HOTEL_STARS, RATE_PER_STAR};
use crate::product::{CatalogError, Nights, NightlyPriced};

/// Anything priced per night
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "details", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Accommodation {
    Hotel(Hotel),
    House(House),
    Complex(Complex),
}

impl Accommodation {
    pub fn id(&self) -> Uuid {
        match self {
            Accommodation::Hotel(hotel) => hotel.id,
            Accommodation::House(house) => house.id,
            Accommodation::Complex(complex) => complex.id,
        }
    }
}

impl NightlyPriced for Accommodation {
    fn address(&self) -> &str {
        match self {
            Accommodation::Hotel(hotel) => hotel.address(),
            Accommodation::House(house) => house.address(),
            Accommodation::Complex(complex) => complex.address(),
        }
    }

    fn price_for_nights(&self, nights: Nights) -> Money {
        match self {
            Accommodation::Hotel(hotel) => hotel.price_for_nights(nights),
            Accommodation::House(house) => house.price_for_nights(nights),
            Accommodation::Complex(complex) => complex.price_for_nights(nights),
        }
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accommodation::Hotel(hotel) => fmt::Display::fmt(hotel, f),
            Accommodation::House(house) => fmt::Display::fmt(house, f),
            Accommodation::Complex(complex) => fmt::Display::fmt(complex, f),
        }
    }
}

impl From<Hotel> for Accommodation {
    fn from(hotel: Hotel) -> Self {
        Accommodation::Hotel(hotel)
    }
}

impl From<House> for Accommodation {
    fn from(house: House) -> Self {
        Accommodation::House(house)
    }
}

impl From<Complex> for Accommodation {
    fn from(complex: Complex) -> Self {
        Accommodation::Complex(complex)
    }
}

/// Hotel priced by star rating: `stars * RATE_PER_STAR * nights`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub address: String,
    pub name: String,
    pub stars: u8,
}

impl Hotel {
    pub fn new(address: impl Into<String>, name: impl Into<String>, stars: u8) -> Result<Self, CatalogError> {
        if !(MIN_HOTEL_STARS..=MAX_HOTEL_STARS).contains(&stars) {
            return Err(CatalogError::Validation(format!(
                "hotel stars must be between {} and {}, got {}",
                MIN_HOTEL_STARS, MAX_HOTEL_STARS, stars
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            address: address.into(),
            name: name.into(),
            stars,
        })
    }
}

impl NightlyPriced for Hotel {
    fn address(&self) -> &str {
        &self.address
    }

    fn price_for_nights(&self, nights: Nights) -> Money {
        RATE_PER_STAR.times(u32::from(self.stars)).times(nights.get())
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hotel {} ({}★) at {}", self.name, self.stars, self.address)
    }
}

/// House or apartment priced by its room-count tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub id: Uuid,
    pub address: String,
    rooms: NonZeroU32,
}

impl House {
    pub fn new(address: impl Into<String>, rooms: u32) -> Result<Self, CatalogError> {
        let rooms = NonZeroU32::new(rooms)
            .ok_or_else(|| CatalogError::Validation("a house needs at least one room".to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            address: address.into(),
            rooms,
        })
    }

    pub fn rooms(&self) -> u32 {
        self.rooms.get()
    }

    pub fn tier(&self) -> HouseTier {
        HouseTier::for_rooms(self.rooms)
    }

    pub fn nightly_rate(&self) -> Money {
        self.tier().nightly_rate()
    }
}

impl NightlyPriced for House {
    fn address(&self) -> &str {
        &self.address
    }

    fn price_for_nights(&self, nights: Nights) -> Money {
        self.nightly_rate().times(nights.get())
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rooms() == 1 {
            write!(f, "Studio at {}", self.address)
        } else {
            write!(f, "House with {} rooms at {}", self.rooms, self.address)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn nights(n: u32) -> Nights {
        Nights::new(n).unwrap()
    }

    #[test]
    fn test_hotel_price_4_stars() {
        let hotel = Hotel::new("Av. Corrientes 1234", "Hotel Plaza", 4).unwrap();

        assert_eq!(hotel.price_for_nights(nights(3)), Money(120_000));
        assert_eq!(hotel.price_for_nights(nights(1)), Money(40_000));
        assert_eq!(hotel.to_string(), "Hotel Hotel Plaza (4★) at Av. Corrientes 1234");
    }

    #[rstest]
    #[case(1, 1, 10_000)]
    #[case(5, 7, 350_000)]
    #[case(3, 10, 300_000)]
    fn test_hotel_price_is_linear(#[case] stars: u8, #[case] n: u32, #[case] expected: i64) {
        let hotel = Hotel::new("5th Avenue", "Luxury", stars).unwrap();
        assert_eq!(hotel.price_for_nights(nights(n)), Money(expected));
    }

    #[test]
    fn test_hotel_rejects_stars_out_of_range() {
        assert!(Hotel::new("Nowhere", "Zero", 0).is_err());
        assert!(Hotel::new("Nowhere", "Six", 6).is_err());
    }

    #[rstest]
    #[case(1, 30_000)]
    #[case(3, 60_000)]
    #[case(5, 100_000)]
    fn test_house_price_for_two_nights(#[case] rooms: u32, #[case] expected: i64) {
        let house = House::new("Calle Rivadavia 456", rooms).unwrap();
        assert_eq!(house.price_for_nights(nights(2)), Money(expected));
    }

    #[test]
    fn test_house_display_and_validation() {
        assert_eq!(House::new("Av. Santa Fe 890", 1).unwrap().to_string(), "Studio at Av. Santa Fe 890");
        assert_eq!(
            House::new("Calle Rivadavia 456", 3).unwrap().to_string(),
            "House with 3 rooms at Calle Rivadavia 456"
        );
        assert!(House::new("Empty lot", 0).is_err());
    }

    #[test]
    fn test_house_deserialize_rejects_zero_rooms() {
        let house = House::new("Calle Rivadavia 456", 3).unwrap();
        let mut value = serde_json::to_value(&house).unwrap();

        let decoded: House = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(decoded.rooms(), 3);
        assert_eq!(decoded.tier(), HouseTier::Standard);

        value["rooms"] = serde_json::json!(0);
        assert!(serde_json::from_value::<House>(value).is_err());
    }

    #[test]
    fn test_accommodation_delegates() {
        let accommodation: Accommodation = House::new("Av. Libertador 789", 5).unwrap().into();

        assert_eq!(accommodation.address(), "Av. Libertador 789");
        assert_eq!(accommodation.price_for_nights(nights(1)), Money(50_000));
    }
}
