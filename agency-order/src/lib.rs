pub mod models;
pub mod user;
pub mod summary;

pub use models::{AffordableProduct, PurchaseError, PurchaseOutcome, PurchaseRecord};
pub use user::User;
pub use summary::{rank_by_purchases, AgencySummary};
