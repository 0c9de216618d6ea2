use agency_catalog::Product;
use agency_order::{AffordableProduct, AgencySummary, PurchaseOutcome, User};
use agency_shared::Money;
use serde::Serialize;
use std::io::{self, Write};

use crate::app_config::{ReportConfig, ReportFormat};

/// One row of the purchase ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub position: usize,
    pub name: String,
    pub purchases: usize,
}

/// What the walkthrough ends with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    pub ranking: Vec<RankingEntry>,
    pub summary: AgencySummary,
}

/// Console printer for the walkthrough.
pub struct Reporter<W: Write> {
    out: W,
    config: ReportConfig,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, config: ReportConfig) -> Self {
        Self { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn section(&mut self, title: &str) -> io::Result<()> {
        let rule = "=".repeat(self.config.separator_width);
        writeln!(self.out, "\n{}", rule)?;
        writeln!(self.out, "  {}", title)?;
        writeln!(self.out, "{}", rule)
    }

    pub fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(self.config.separator_width))
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", text.as_ref())
    }

    pub fn product(&mut self, product: &Product, price_label: &str, price: Money) -> io::Result<()> {
        writeln!(self.out, "✓ {}", product)?;
        writeln!(self.out, "  {}: {}", price_label, price)
    }

    pub fn purchase(&mut self, product: &Product, outcome: &PurchaseOutcome) -> io::Result<()> {
        match outcome {
            PurchaseOutcome::Completed { price, remaining_budget } => {
                writeln!(self.out, "✓ Purchase completed: {}", product)?;
                writeln!(self.out, "  Price: {}", price)?;
                writeln!(self.out, "  Remaining budget: {}", remaining_budget)
            }
            PurchaseOutcome::InsufficientFunds { price, available, shortfall } => {
                writeln!(self.out, "✗ Insufficient funds for: {}", product)?;
                writeln!(self.out, "  Price: {}", price)?;
                writeln!(self.out, "  Available budget: {}", available)?;
                writeln!(self.out, "  Short by: {}", shortfall)
            }
        }
    }

    pub fn user_summary(&mut self, user: &User) -> io::Result<()> {
        writeln!(self.out, "\nSummary for {}:", user.name)?;
        writeln!(self.out, "  Products purchased: {}", user.purchase_count())?;
        writeln!(self.out, "  Remaining budget: {}", user.budget())
    }

    pub fn ranking(&mut self, ranking: &[RankingEntry]) -> io::Result<()> {
        writeln!(self.out, "Ranking (most to fewest products):\n")?;
        for entry in ranking {
            writeln!(
                self.out,
                "  {}. {:<20} - {} product(s) purchased",
                entry.position, entry.name, entry.purchases
            )?;
        }
        Ok(())
    }

    pub fn affordable(&mut self, user: &User, affordable: &[AffordableProduct<'_>]) -> io::Result<()> {
        writeln!(self.out, "User: {}", user.name)?;
        writeln!(self.out, "Available budget: {}\n", user.budget())?;
        writeln!(self.out, "Products within budget:")?;

        if affordable.is_empty() {
            writeln!(self.out, "  ⚠ Nothing fits the current budget")?;
        }
        for item in affordable {
            match item.max_nights {
                Some(nights) => writeln!(
                    self.out,
                    "  ✓ {} (up to {} nights) - {}",
                    item.product, nights, item.price
                )?,
                None => writeln!(self.out, "  ✓ {} - {}", item.product, item.price)?,
            }
        }

        writeln!(self.out, "\nTotal products available: {}", affordable.len())
    }

    pub fn final_report(&mut self, report: &DemoReport) -> io::Result<()> {
        match self.config.format {
            ReportFormat::Text => {
                writeln!(self.out, "Total users: {}", report.summary.total_users)?;
                writeln!(self.out, "Total purchases: {}", report.summary.total_purchases)?;
                writeln!(self.out, "Total budget spent: {}", report.summary.total_spent)
            }
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, report).map_err(io::Error::from)?;
                writeln!(self.out)
            }
        }
    }
}
