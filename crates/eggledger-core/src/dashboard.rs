//! Cost-per-egg summary.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::{self, Store};

/// Eggs and feed spending over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    /// Window length in days.
    pub days: i64,
    pub eggs: u64,
    pub cost: Decimal,
    /// Zero when no eggs were logged in the window.
    pub cost_per_egg: Decimal,
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_eggs: u64,
    pub total_cost: Decimal,
    pub week: WindowSummary,
    pub month: WindowSummary,
    pub chickens: u32,
    /// Zero when the chicken count is zero.
    pub cost_per_chicken: Decimal,
}

impl DashboardSummary {
    /// Compute the dashboard as of `today`.
    ///
    /// Costs are the sum of known purchase subtotals; unknown subtotals
    /// are left out rather than counted as zero.
    pub fn compute(store: &Store, today: NaiveDate) -> store::Result<Self> {
        let total_eggs = store.egg_total(None)?;
        let total_cost = store.purchase_cost(None)?;
        let chickens = store.chicken_count();

        Ok(Self {
            total_eggs,
            total_cost,
            week: window(store, today, 7)?,
            month: window(store, today, 30)?,
            chickens,
            cost_per_chicken: ratio(total_cost, u64::from(chickens)),
        })
    }
}

fn window(store: &Store, today: NaiveDate, days: i64) -> store::Result<WindowSummary> {
    let since = today - Duration::days(days);
    let eggs = store.egg_total(Some(since))?;
    let cost = store.purchase_cost(Some(since))?;

    Ok(WindowSummary {
        days,
        eggs,
        cost,
        cost_per_egg: ratio(cost, eggs),
    })
}

fn ratio(amount: Decimal, count: u64) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        (amount / Decimal::from(count)).round_dp(4)
    }
}
