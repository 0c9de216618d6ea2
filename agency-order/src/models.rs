use agency_catalog::{PricingParams, Product};
use agency_shared::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed purchase. History entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: Uuid,
    /// Snapshot of the product as it was priced
    pub product: Product,
    pub price: Money,
    pub params: PricingParams,
    pub purchased_at: DateTime<Utc>,
}

impl PurchaseRecord {
    pub fn new(product: Product, price: Money, params: PricingParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            price,
            params,
            purchased_at: Utc::now(),
        }
    }
}

/// Result of a purchase attempt that priced successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOutcome {
    Completed {
        price: Money,
        remaining_budget: Money,
    },
    InsufficientFunds {
        price: Money,
        available: Money,
        shortfall: Money,
    },
}

impl PurchaseOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, PurchaseOutcome::Completed { .. })
    }

    pub fn price(&self) -> Money {
        match self {
            PurchaseOutcome::Completed { price, .. } => *price,
            PurchaseOutcome::InsufficientFunds { price, .. } => *price,
        }
    }
}

/// A product a user can currently pay for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffordableProduct<'a> {
    pub product: &'a Product,
    /// Most nights affordable, for accommodations
    pub max_nights: Option<u32>,
    pub price: Money,
}

/// Errors raised while attempting a purchase
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error("Pricing failed: {0}")]
    Catalog(#[from] agency_catalog::CatalogError),

    #[error("Invalid user record: {0}")]
    InvalidRecord(String),
}
