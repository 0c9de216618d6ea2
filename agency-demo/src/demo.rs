use agency_catalog::{
    Complex, FlatPriced, Flight, Hotel, House, Nights, NightlyPriced, Package, PricingParams, Product,
};
use agency_order::{rank_by_purchases, AgencySummary, User};
use agency_shared::Money;
use anyhow::Context;
use chrono::NaiveDate;
use std::io::Write;

use crate::report::{DemoReport, RankingEntry, Reporter};

fn date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").with_context(|| format!("invalid date {}", value))
}

fn nights(n: u32) -> anyhow::Result<Nights> {
    Ok(Nights::new(n)?)
}

/// Buy `product` for `user` and print the outcome.
fn buy<W: Write>(
    reporter: &mut Reporter<W>,
    user: &mut User,
    product: &Product,
    params: PricingParams,
) -> anyhow::Result<()> {
    let outcome = user
        .purchase(product, params)
        .with_context(|| format!("{} could not price {}", user.name, product))?;
    reporter.purchase(product, &outcome)?;
    Ok(())
}

/// Walk through the catalog and purchasing flow, printing to `reporter`.
pub fn run<W: Write>(reporter: &mut Reporter<W>) -> anyhow::Result<DemoReport> {
    reporter.section("TRAVEL AGENCY - DEMO")?;
    reporter.section("1. CATALOG")?;

    let round_trip: Product = Flight::new(
        date("2025-01-15")?,
        Some(date("2025-01-20")?),
        "Aerolineas Argentinas",
        Money(120_000),
    )?
    .into();
    let one_way: Product = Flight::new(date("2025-02-10")?, None, "LATAM", Money(80_000))?.into();
    for flight in [&round_trip, &one_way] {
        let price = flight.quote(&PricingParams::none())?;
        reporter.product(flight, "Price", price)?;
    }

    let plaza = Hotel::new("Av. Corrientes 1234", "Hotel Plaza", 4)?;
    let grand = Hotel::new("Calle Florida 567", "Grand Hotel", 5)?;
    reporter.line("")?;
    for hotel in [&plaza, &grand] {
        let price = hotel.price_for_nights(nights(3)?);
        reporter.product(&Product::from(hotel.clone()), "Price for 3 nights", price)?;
    }

    let studio = House::new("Av. Santa Fe 890", 1)?;
    let mid_house = House::new("Calle Rivadavia 456", 3)?;
    let large_house = House::new("Av. Libertador 789", 5)?;
    reporter.line("")?;
    for house in [&studio, &mid_house, &large_house] {
        let price = house.price_for_nights(nights(2)?);
        reporter.product(&Product::from(house.clone()), "Price for 2 nights", price)?;
    }

    let complex = Complex::new(
        "Las Palmas Gated Community",
        vec![
            House::new("Unit 1", 2)?,
            House::new("Unit 2", 3)?,
            House::new("Unit 3", 2)?,
        ],
    )?;
    reporter.line(format!("\n✓ {}", complex))?;
    reporter.line(format!(
        "  Rent 1 house for 5 nights: {}",
        complex.rental_price(nights(5)?, 1)?
    ))?;
    reporter.line(format!(
        "  Rent {} houses for 5 nights: {}",
        complex.total_units(),
        complex.rental_price(nights(5)?, complex.total_units())?
    ))?;
    let discount = complex.discount_info(complex.total_units());
    reporter.line(format!("  Discount applied: {}", discount.description))?;

    let mut package = Package::new("Buenos Aires Holiday", Some("All inclusive".to_string()));
    package.add_product(round_trip.clone());
    package.add_product(plaza.clone());
    reporter.line(format!("\n✓ {}", package))?;
    reporter.line(format!(
        "  Total price (5 nights): {}",
        package.calculate_price(&PricingParams::for_nights(nights(5)?))
    ))?;
    reporter.line(format!("  Flat price (1 night): {}", package.price()))?;

    reporter.section("2. USERS AND PURCHASES")?;

    let plaza: Product = plaza.into();
    let grand: Product = grand.into();
    let studio: Product = studio.into();
    let mid_house: Product = mid_house.into();
    let large_house: Product = large_house.into();
    let complex: Product = complex.into();

    let mut juan = User::new("Juan Perez", Money(500_000));
    let mut maria = User::new("Maria Lopez", Money(150_000));
    let mut carlos = User::new("Carlos Gomez", Money(80_000));

    reporter.line(format!("✓ User created: {}", juan.name))?;
    reporter.line(format!("  Initial budget: {}\n", juan.initial_budget()))?;

    reporter.line(format!("--- Purchases by {} ---", juan.name))?;
    buy(reporter, &mut juan, &round_trip, PricingParams::none())?;
    buy(reporter, &mut juan, &plaza, PricingParams::for_nights(nights(5)?))?;
    buy(reporter, &mut juan, &mid_house, PricingParams::for_nights(nights(3)?))?;
    reporter.user_summary(&juan)?;

    reporter.line(format!("\n--- Purchases by {} ---", maria.name))?;
    reporter.line(format!("Initial budget: {}", maria.initial_budget()))?;
    buy(reporter, &mut maria, &one_way, PricingParams::none())?;
    buy(reporter, &mut maria, &studio, PricingParams::for_nights(nights(3)?))?;
    reporter.user_summary(&maria)?;

    reporter.line(format!("\n--- Purchases by {} ---", carlos.name))?;
    reporter.line(format!("Initial budget: {}", carlos.initial_budget()))?;
    buy(reporter, &mut carlos, &grand, PricingParams::for_nights(nights(3)?))?;

    reporter.section("3. PURCHASE WITHOUT FUNDS")?;

    let mut ana = User::new("Ana Silva", Money(50_000));
    reporter.line(format!("User: {}", ana.name))?;
    reporter.line(format!("Budget: {}\n", ana.budget()))?;
    reporter.line("Trying to book a 5-star hotel for 7 nights...")?;
    let luxury: Product = Hotel::new("5th Avenue", "Luxury Hotel", 5)?.into();
    let week = PricingParams::for_nights(nights(7)?);
    reporter.line(format!("Hotel price: {}", luxury.quote(&week)?))?;
    buy(reporter, &mut ana, &luxury, week)?;

    reporter.section("4. USER RANKING BY PURCHASES")?;

    let users = vec![juan, maria, carlos, ana];
    let ranking: Vec<RankingEntry> = rank_by_purchases(&users)
        .into_iter()
        .enumerate()
        .map(|(i, user)| RankingEntry {
            position: i + 1,
            name: user.name.clone(),
            purchases: user.purchase_count(),
        })
        .collect();
    reporter.ranking(&ranking)?;

    reporter.section("5. AFFORDABLE PRODUCTS")?;

    let catalog = vec![
        round_trip,
        one_way,
        plaza,
        grand,
        studio,
        mid_house,
        large_house,
        complex,
    ];
    let carlos = &users[2];
    let affordable = carlos.affordable_products(&catalog);
    reporter.affordable(carlos, &affordable)?;

    reporter.section("6. FINAL SUMMARY")?;

    let report = DemoReport {
        ranking,
        summary: AgencySummary::from_users(&users),
    };
    reporter.final_report(&report)?;

    reporter.rule()?;
    reporter.line("✓ Demo finished")?;
    reporter.rule()?;

    tracing::info!(
        "Demo finished: {} purchases, {} spent",
        report.summary.total_purchases,
        report.summary.total_spent
    );
    Ok(report)
}
