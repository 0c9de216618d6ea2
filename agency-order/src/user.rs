use agency_catalog::{Accommodation, Nights, NightlyPriced, PricingParams, Product};
use agency_shared::{checked_sum, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::{AffordableProduct, PurchaseError, PurchaseOutcome, PurchaseRecord};

/// Agency customer with a budget and purchase history.
///
/// The budget only moves through [`User::purchase`] and never rises above the
/// initial budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    initial_budget: Money,
    budget: Money,
    purchase_history: Vec<PurchaseRecord>,
}

#[derive(Deserialize)]
struct UserRecord {
    id: Uuid,
    name: String,
    initial_budget: Money,
    budget: Money,
    purchase_history: Vec<PurchaseRecord>,
}

impl TryFrom<UserRecord> for User {
    type Error = PurchaseError;

    /// Decoded users must have spent exactly what their history records.
    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        if record.budget > record.initial_budget {
            return Err(PurchaseError::InvalidRecord(format!(
                "budget {} exceeds initial budget {}",
                record.budget, record.initial_budget
            )));
        }

        let recorded = checked_sum(record.purchase_history.iter().map(|entry| entry.price))
            .ok_or_else(|| PurchaseError::InvalidRecord("purchase history total overflows".to_string()))?;
        let spent = record.initial_budget - record.budget;
        if recorded != spent {
            return Err(PurchaseError::InvalidRecord(format!(
                "history totals {} but {} was spent",
                recorded, spent
            )));
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            initial_budget: record.initial_budget,
            budget: record.budget,
            purchase_history: record.purchase_history,
        })
    }
}

impl User {
    pub fn new(name: impl Into<String>, budget: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            initial_budget: budget,
            budget,
            purchase_history: Vec::new(),
        }
    }

    pub fn budget(&self) -> Money {
        self.budget
    }

    pub fn initial_budget(&self) -> Money {
        self.initial_budget
    }

    pub fn purchase_history(&self) -> &[PurchaseRecord] {
        &self.purchase_history
    }

    /// Attempt to buy `product`.
    ///
    /// Pricing errors (missing nights, units out of range) propagate and leave
    /// the user untouched. Running short of budget is a normal outcome.
    pub fn purchase(
        &mut self,
        product: &Product,
        params: PricingParams,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let price = product.quote(&params)?;

        if price > self.budget {
            let shortfall = price - self.budget;
            tracing::warn!(
                "{} cannot afford {}: price {}, available {}, short {}",
                self.name, product, price, self.budget, shortfall
            );
            return Ok(PurchaseOutcome::InsufficientFunds {
                price,
                available: self.budget,
                shortfall,
            });
        }

        self.budget -= price;
        self.purchase_history
            .push(PurchaseRecord::new(product.clone(), price, params));
        tracing::info!(
            "{} purchased {} for {}, remaining budget {}",
            self.name, product, price, self.budget
        );

        Ok(PurchaseOutcome::Completed {
            price,
            remaining_budget: self.budget,
        })
    }

    pub fn total_spent(&self) -> Money {
        self.initial_budget - self.budget
    }

    pub fn purchase_count(&self) -> usize {
        self.purchase_history.len()
    }

    /// Whether a purchase with these parameters would go through. Any pricing error means no.
    pub fn can_afford(&self, product: &Product, params: &PricingParams) -> bool {
        match product.quote(params) {
            Ok(price) => price <= self.budget,
            Err(_) => false,
        }
    }

    /// Most nights of `accommodation` the remaining budget covers.
    /// Complexes are priced renting a single unit.
    pub fn max_affordable_nights(&self, accommodation: &Accommodation) -> u32 {
        let one_night = accommodation.price_for_nights(Nights::ONE);
        self.budget.whole_multiples_of(one_night)
    }

    pub fn affordable_products<'a>(&self, products: &'a [Product]) -> Vec<AffordableProduct<'a>> {
        products
            .iter()
            .filter_map(|product| match product {
                Product::Accommodation(accommodation) => {
                    let max_nights = self.max_affordable_nights(accommodation);
                    let nights = Nights::new(max_nights).ok()?;
                    Some(AffordableProduct {
                        product,
                        max_nights: Some(max_nights),
                        price: accommodation.price_for_nights(nights),
                    })
                }
                Product::Flight(_) | Product::Package(_) => {
                    let price = product.quote(&PricingParams::none()).ok()?;
                    (price <= self.budget).then_some(AffordableProduct {
                        product,
                        max_nights: None,
                        price,
                    })
                }
            })
            .collect()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User: {} - Budget: {} - Purchases: {}",
            self.name,
            self.budget,
            self.purchase_history.len()
        )
    }
}
