use agency_shared::Money;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::user::User;

/// Agency-wide totals across a set of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencySummary {
    pub total_users: usize,
    pub total_purchases: usize,
    pub total_spent: Money,
}

impl AgencySummary {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            total_users: users.len(),
            total_purchases: users.iter().map(User::purchase_count).sum(),
            total_spent: users.iter().map(User::total_spent).sum(),
        }
    }
}

/// Users ordered by purchase count, most first. Ties keep their input order.
pub fn rank_by_purchases(users: &[User]) -> Vec<&User> {
    let mut ranked: Vec<&User> = users.iter().collect();
    ranked.sort_by_key(|user| Reverse(user.purchase_count()));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_catalog::{Flight, PricingParams, Product};
    use chrono::NaiveDate;

    fn flight(price: i64) -> Product {
        Flight::new(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(), None, "LATAM", Money(price))
            .unwrap()
            .into()
    }

    fn user_with_purchases(name: &str, count: usize) -> User {
        let mut user = User::new(name, Money(1_000_000));
        for _ in 0..count {
            user.purchase(&flight(10_000), PricingParams::none()).unwrap();
        }
        user
    }

    #[test]
    fn test_ranking_by_purchases() {
        let users = vec![
            user_with_purchases("One", 1),
            user_with_purchases("None", 0),
            user_with_purchases("Three", 3),
        ];

        let names: Vec<&str> = rank_by_purchases(&users).iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Three", "One", "None"]);
    }

    #[test]
    fn test_ranking_ties_keep_input_order() {
        let users = vec![
            user_with_purchases("First", 1),
            user_with_purchases("Top", 2),
            user_with_purchases("Second", 1),
            user_with_purchases("Third", 1),
        ];

        let names: Vec<&str> = rank_by_purchases(&users).iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn test_summary_totals() {
        let users = vec![
            user_with_purchases("Three", 3),
            user_with_purchases("One", 1),
            User::new("Idle", Money(50_000)),
        ];

        let summary = AgencySummary::from_users(&users);
        assert_eq!(summary.total_users, 3);
        assert_eq!(summary.total_purchases, 4);
        assert_eq!(summary.total_spent, Money(40_000));
        assert_eq!(AgencySummary::from_users(&[]).total_spent, Money::ZERO);
    }
}
