use agency_shared::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::product::{CatalogError, FlatPriced, Nights, NightlyPriced, PricingParams, Product};

/// Bundle of flights, accommodations and other packages.
///
/// The price is never cached: every call sums the current members in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    products: Vec<Product>,
}

impl Package {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.filter(|d| !d.is_empty()),
            products: Vec::new(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn add_product(&mut self, product: impl Into<Product>) {
        let product = product.into();
        tracing::debug!("Adding {} to package '{}'", product, self.name);
        self.products.push(product);
    }

    /// Remove the first member equal to `product`. Returns whether one was found.
    pub fn remove_product(&mut self, product: &Product) -> bool {
        match self.products.iter().position(|p| p == product) {
            Some(index) => {
                self.products.remove(index);
                tracing::debug!("Removed {} from package '{}'", product, self.name);
                true
            }
            None => false,
        }
    }

    /// Sum of member prices. Accommodations are priced at `params.nights`
    /// (one night when unset, a complex renting one unit); nested packages
    /// receive the same parameters. Saturates at [`Money::MAX`].
    pub fn calculate_price(&self, params: &PricingParams) -> Money {
        self.checked_price(params).unwrap_or(Money::MAX)
    }

    /// Same as [`Package::calculate_price`], failing instead of saturating.
    pub fn checked_price(&self, params: &PricingParams) -> Result<Money, CatalogError> {
        let nights = params.nights.unwrap_or(Nights::ONE);

        let mut total = Money::ZERO;
        for product in &self.products {
            let price = match product {
                Product::Flight(flight) => flight.price(),
                Product::Accommodation(accommodation) => accommodation.price_for_nights(nights),
                Product::Package(package) => package.checked_price(params)?,
            };
            total = total.checked_add(price).ok_or(CatalogError::Overflow)?;
        }

        Ok(total)
    }
}

impl FlatPriced for Package {
    fn price(&self) -> Money {
        self.calculate_price(&PricingParams::none())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(
                f,
                "Package '{}': {} - {} product(s)",
                self.name,
                description,
                self.products.len()
            ),
            None => write!(f, "Package '{}' - {} product(s)", self.name, self.products.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accommodation::{Hotel, House};
    use crate::complex::Complex;
    use crate::product::Flight;
    use chrono::NaiveDate;

    fn flight(price: i64) -> Flight {
        Flight::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), None, "LATAM", Money(price)).unwrap()
    }

    fn nights(n: u32) -> PricingParams {
        PricingParams::for_nights(Nights::new(n).unwrap())
    }

    #[test]
    fn test_package_creation() {
        let package = Package::new("Buenos Aires", Some("All inclusive".to_string()));

        assert!(package.is_empty());
        assert_eq!(package.to_string(), "Package 'Buenos Aires': All inclusive - 0 product(s)");
        assert_eq!(Package::new("Plain", None).to_string(), "Package 'Plain' - 0 product(s)");
        assert_eq!(Package::new("Blank", Some(String::new())).description, None);
    }

    #[test]
    fn test_package_price_flight_and_hotel() {
        let mut package = Package::new("Buenos Aires", None);
        package.add_product(flight(100_000));
        package.add_product(Hotel::new("Av. Corrientes 1234", "Plaza", 4).unwrap());

        assert_eq!(package.len(), 2);
        assert_eq!(package.calculate_price(&nights(5)), Money(300_000));
        // Defaults to a single night
        assert_eq!(package.price(), Money(140_000));
    }

    #[test]
    fn test_nested_package_receives_same_params() {
        let mut inner = Package::new("Stay", None);
        inner.add_product(House::new("Av. Santa Fe 890", 1).unwrap());

        let mut outer = Package::new("Trip", None);
        outer.add_product(flight(50_000));
        outer.add_product(inner);

        assert_eq!(outer.calculate_price(&nights(2)), Money(80_000));
    }

    #[test]
    fn test_complex_member_prices_one_unit() {
        let complex = Complex::new(
            "Las Palmas",
            vec![House::new("Unit 1", 1).unwrap(), House::new("Unit 2", 5).unwrap()],
        )
        .unwrap();

        let mut package = Package::new("Quiet", None);
        package.add_product(complex);

        assert_eq!(package.calculate_price(&nights(3).with_units(2)), Money(45_000));
    }

    #[test]
    fn test_price_reflects_current_members() {
        let ticket: Product = flight(70_000).into();
        let mut package = Package::new("Changing", None);
        package.add_product(ticket.clone());
        assert_eq!(package.price(), Money(70_000));

        package.add_product(flight(30_000));
        assert_eq!(package.price(), Money(100_000));

        assert!(package.remove_product(&ticket));
        assert_eq!(package.price(), Money(30_000));
    }

    #[test]
    fn test_remove_product_first_match_only() {
        let ticket: Product = flight(70_000).into();
        let mut package = Package::new("Twice", None);
        package.add_product(ticket.clone());
        package.add_product(ticket.clone());

        assert!(package.remove_product(&ticket));
        assert_eq!(package.len(), 1);
        assert!(package.remove_product(&ticket));
        assert!(!package.remove_product(&ticket));
        assert!(package.is_empty());
    }

    #[test]
    fn test_overflowing_total_fails_checked_and_saturates_otherwise() {
        let mut package = Package::new("Priceless", None);
        package.add_product(flight(i64::MAX));
        package.add_product(flight(1));

        assert_eq!(package.checked_price(&nights(1)), Err(CatalogError::Overflow));
        assert_eq!(package.calculate_price(&nights(1)), Money::MAX);
        assert_eq!(
            Product::from(package).quote(&PricingParams::none()),
            Err(CatalogError::Overflow)
        );
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let mut package = Package::new("Solo", None);
        package.add_product(flight(70_000));

        let stranger: Product = flight(70_000).into();
        assert!(!package.remove_product(&stranger));
        assert_eq!(package.len(), 1);
    }
}
