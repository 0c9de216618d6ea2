pub mod product;
pub mod pricing;
pub mod accommodation;
pub mod complex;
pub mod package;

pub use product::{CatalogError, FlatPriced, Flight, Nights, NightlyPriced, PricingParams, Product};
pub use pricing::HouseTier;
pub use accommodation::{Accommodation, Hotel, House};
pub use complex::{Complex, DiscountInfo};
pub use package::Package;
