use agency_shared::Money;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Nightly rate contributed by each hotel star.
pub const RATE_PER_STAR: Money = Money(10_000);

pub const STUDIO_NIGHTLY_RATE: Money = Money(15_000);
pub const STANDARD_NIGHTLY_RATE: Money = Money(30_000);
pub const LARGE_NIGHTLY_RATE: Money = Money(50_000);

/// Complex discount earned per rented unit, in basis points (10%).
pub const DISCOUNT_PER_UNIT_BPS: u32 = 1_000;

/// Cap on the accumulated complex discount, in basis points (50%).
pub const MAX_DISCOUNT_BPS: u32 = 5_000;

pub const MIN_HOTEL_STARS: u8 = 1;
pub const MAX_HOTEL_STARS: u8 = 5;

/// Per-night pricing tier of a house, chosen by room count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HouseTier {
    /// Single room
    Studio,
    /// Two to four rooms
    Standard,
    /// More than four rooms
    Large,
}

impl HouseTier {
    pub fn for_rooms(rooms: NonZeroU32) -> Self {
        match rooms.get() {
            1 => HouseTier::Studio,
            2..=4 => HouseTier::Standard,
            _ => HouseTier::Large,
        }
    }

    pub fn nightly_rate(self) -> Money {
        match self {
            HouseTier::Studio => STUDIO_NIGHTLY_RATE,
            HouseTier::Standard => STANDARD_NIGHTLY_RATE,
            HouseTier::Large => LARGE_NIGHTLY_RATE,
        }
    }
}

/// Volume discount for renting `units` units of a complex at once, capped at [`MAX_DISCOUNT_BPS`].
pub fn volume_discount_bps(units: u32) -> u32 {
    units.saturating_mul(DISCOUNT_PER_UNIT_BPS).min(MAX_DISCOUNT_BPS)
}
