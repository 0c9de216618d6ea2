pub mod money;

pub use money::{checked_sum, Money};
