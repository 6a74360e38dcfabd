#![deny(warnings)]

//! Financial engine: monthly P&L, break-even point, and sensitivity sweep.
//!
//! Every entry point is a pure function over an immutable
//! [`OperatingParameters`] snapshot. Computations are deterministic and
//! infallible: degenerate inputs (zero sales, non-positive contribution
//! margin, zero business days) produce guarded zero defaults, never errors.
//! Input rejection happens earlier, at the parse boundary in `store-core`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use store_core::OperatingParameters;

/// Monthly financial outcome derived from one parameter snapshot.
///
/// A plain value record with no identity of its own; rendering and
/// persistence are the caller's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    pub sales: Decimal,
    pub direct_cost: Decimal,
    pub fixed_cost: Decimal,
    pub variable_cost_total: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    /// 0 when sales is 0.
    pub gross_margin_pct: Decimal,
    /// 0 when sales is 0.
    pub net_margin_pct: Decimal,
    /// Per-order revenue left after direct and variable costs.
    pub contribution_margin: Decimal,
    /// 0 when the contribution margin is not positive.
    pub breakeven_monthly_orders: Decimal,
    /// 0 when the contribution margin is not positive or there are no
    /// business days.
    pub breakeven_daily_orders: Decimal,
}

/// One grid point of the price/volume sensitivity sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCell {
    /// Signed price perturbation as a fraction, e.g. -0.20.
    pub price_delta: Decimal,
    /// Signed order-volume perturbation as a fraction.
    pub order_delta: Decimal,
    pub unit_price: Decimal,
    pub daily_orders: u64,
    pub sales: Decimal,
    pub net_profit: Decimal,
    pub net_margin_pct: Decimal,
}

/// Distinct sorted axis values of a sweep, for heat-map layout.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepAxes {
    pub prices: Vec<Decimal>,
    pub orders: Vec<u64>,
}

/// The five perturbation levels applied to both sweep axes, ascending.
pub fn delta_levels() -> [Decimal; 5] {
    [
        Decimal::new(-20, 2),
        Decimal::new(-10, 2),
        Decimal::ZERO,
        Decimal::new(10, 2),
        Decimal::new(20, 2),
    ]
}

/// Monthly fixed cost: rent plus staffing plus utilities.
pub fn fixed_cost(params: &OperatingParameters) -> Decimal {
    params.monthly_rent + params.monthly_staff_cost + params.monthly_utility_cost
}

/// Per-order revenue remaining after variable and ratio-based direct costs.
///
/// Fixed costs are amortized against this figure; a non-positive value
/// means break-even is unreachable.
pub fn contribution_margin(params: &OperatingParameters) -> Decimal {
    params.unit_price * (Decimal::ONE - params.direct_cost_ratio) - params.variable_cost_per_order
}

/// Compute the monthly P&L and break-even point for one snapshot.
pub fn compute_financials(params: &OperatingParameters) -> FinancialResult {
    let volume = Decimal::from(params.daily_orders) * Decimal::from(params.business_days);
    let sales = params.unit_price * volume;
    let direct_cost = sales * params.direct_cost_ratio;
    let fixed_cost = fixed_cost(params);
    let variable_cost_total = params.variable_cost_per_order * volume;
    let gross_profit = sales - direct_cost;
    let net_profit = gross_profit - fixed_cost - variable_cost_total;

    let contribution_margin = contribution_margin(params);
    let (breakeven_monthly_orders, breakeven_daily_orders) =
        if contribution_margin > Decimal::ZERO {
            let monthly = fixed_cost / contribution_margin;
            let daily = if params.business_days > 0 {
                monthly / Decimal::from(params.business_days)
            } else {
                Decimal::ZERO
            };
            (monthly, daily)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

    FinancialResult {
        sales,
        direct_cost,
        fixed_cost,
        variable_cost_total,
        gross_profit,
        net_profit,
        gross_margin_pct: margin_pct(gross_profit, sales),
        net_margin_pct: margin_pct(net_profit, sales),
        contribution_margin,
        breakeven_monthly_orders,
        breakeven_daily_orders,
    }
}

/// Evaluate the 25-point price/volume grid around a base snapshot.
///
/// The outer loop walks price deltas ascending, the inner loop order
/// deltas, so cell order is stable across calls. Perturbed order counts
/// are truncated toward zero (fractional orders are dropped, not rounded)
/// and saturate at `u64::MAX`. The base fixed cost is held constant over
/// the whole grid.
pub fn sweep_sensitivity(params: &OperatingParameters) -> Vec<SensitivityCell> {
    let fixed_cost = fixed_cost(params);
    let days = Decimal::from(params.business_days);
    let base_orders = Decimal::from(params.daily_orders);

    let mut cells = Vec::with_capacity(25);
    for price_delta in delta_levels() {
        let unit_price = params.unit_price * (Decimal::ONE + price_delta);
        for order_delta in delta_levels() {
            let daily_orders = (base_orders * (Decimal::ONE + order_delta))
                .floor()
                .to_u64()
                .unwrap_or(u64::MAX);
            let volume = Decimal::from(daily_orders) * days;
            let sales = unit_price * volume;
            let direct_cost = sales * params.direct_cost_ratio;
            let variable_cost_total = params.variable_cost_per_order * volume;
            let net_profit = sales - direct_cost - fixed_cost - variable_cost_total;
            cells.push(SensitivityCell {
                price_delta,
                order_delta,
                unit_price,
                daily_orders,
                sales,
                net_profit,
                net_margin_pct: margin_pct(net_profit, sales),
            });
        }
    }
    cells
}

/// Derive the distinct sorted axis values from a sweep's cells.
///
/// Duplicates collapse by exact equality; the perturbed prices are exact
/// decimal products of the same base value, so equality is stable across
/// calls.
pub fn sweep_axes(cells: &[SensitivityCell]) -> SweepAxes {
    let mut prices: Vec<Decimal> = cells.iter().map(|c| c.unit_price).collect();
    prices.sort();
    prices.dedup();
    let mut orders: Vec<u64> = cells.iter().map(|c| c.daily_orders).collect();
    orders.sort_unstable();
    orders.dedup();
    SweepAxes { prices, orders }
}

fn margin_pct(profit: Decimal, sales: Decimal) -> Decimal {
    if sales > Decimal::ZERO {
        profit / sales * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
