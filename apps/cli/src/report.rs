//! Plain-text rendering of engine output.
//!
//! All presentation lives on this side of the boundary; the engine only
//! hands over numeric records.

use rust_decimal::Decimal;
use store_core::OperatingParameters;
use store_econ::{FinancialResult, SensitivityCell};

const RULE: &str = "============================================================";

/// Render the monthly operating report for one calculation.
pub fn render_report(params: &OperatingParameters, result: &FinancialResult) -> String {
    let total_cost = result.direct_cost + result.fixed_cost + result.variable_cost_total;
    let mut lines = vec![
        RULE.to_string(),
        format!("{:^60}", "Monthly Operating Report"),
        RULE.to_string(),
        format!("City tier: {}", params.city),
        format!(
            "Volume: {} per order x {} orders/day x {} days",
            money(params.unit_price),
            params.daily_orders,
            params.business_days
        ),
        String::new(),
        "Revenue".to_string(),
        row("Monthly sales:", money(result.sales)),
        String::new(),
        "Costs".to_string(),
        format!(
            "{}  ({}% of sales)",
            row("Direct cost:", money(result.direct_cost)),
            pct1(params.direct_cost_ratio * Decimal::ONE_HUNDRED)
        ),
        row("Fixed cost:", money(result.fixed_cost)),
        row("  rent:", money(params.monthly_rent)),
        row("  staff:", money(params.monthly_staff_cost)),
        row("  utilities:", money(params.monthly_utility_cost)),
        format!(
            "{}  ({} per order)",
            row("Variable cost:", money(result.variable_cost_total)),
            money(params.variable_cost_per_order)
        ),
        row("Total cost:", money(total_cost)),
        String::new(),
        "Profit".to_string(),
        row("Gross profit:", money(result.gross_profit)),
        row("Net profit:", money(result.net_profit)),
        row("Gross margin:", format!("{} %", pct2(result.gross_margin_pct))),
        row("Net margin:", format!("{} %", pct2(result.net_margin_pct))),
        String::new(),
        "Break-even".to_string(),
        row("Monthly orders:", whole(result.breakeven_monthly_orders)),
        row(
            "Daily orders:",
            format!("{} per day", whole(result.breakeven_daily_orders)),
        ),
        String::new(),
    ];
    if result.net_profit < Decimal::ZERO {
        lines.push("Warning: these parameters operate at a loss.".to_string());
        lines.push(format!(
            "Raise average daily orders above {} or rework the cost structure.",
            whole(result.breakeven_daily_orders)
        ));
    } else {
        lines.push("Profitable at these parameters.".to_string());
    }
    lines.push(RULE.to_string());
    lines.join("\n") + "\n"
}

/// Render the 25-row price/volume sensitivity table.
pub fn render_sweep(params: &OperatingParameters, cells: &[SensitivityCell]) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!("{:^60}", "Price and Volume Sensitivity"),
        RULE.to_string(),
        format!(
            "Base: {} per order, {} orders/day, {} days",
            money(params.unit_price),
            params.daily_orders,
            params.business_days
        ),
        String::new(),
        format!(
            "{:<10}{:<10}{:>14}{:>16}{:>10}",
            "Price", "Orders", "Sales", "Net profit", "Margin"
        ),
        "-".repeat(60),
    ];
    for cell in cells {
        lines.push(format!(
            "{:<10}{:<10}{:>14}{:>16}{:>10}",
            delta_label(cell.price_delta),
            delta_label(cell.order_delta),
            whole(cell.sales),
            whole(cell.net_profit),
            format!("{}%", pct1(cell.net_margin_pct)),
        ));
    }
    lines.push(String::new());
    lines.push("Net profit by price (rows) and daily orders (columns)".to_string());
    lines.extend(render_grid(cells));
    lines.push(RULE.to_string());
    lines.join("\n") + "\n"
}

/// Net-profit matrix over the distinct sweep axes, ascending both ways.
fn render_grid(cells: &[SensitivityCell]) -> Vec<String> {
    let axes = store_econ::sweep_axes(cells);
    let mut lines = Vec::new();
    let mut header = format!("{:>10}", "");
    for orders in &axes.orders {
        header.push_str(&format!("{:>12}", orders));
    }
    lines.push(header);
    for price in &axes.prices {
        let mut row_line = format!("{:>10}", money(*price));
        for orders in &axes.orders {
            let text = cells
                .iter()
                .find(|c| c.unit_price == *price && c.daily_orders == *orders)
                .map(|c| whole(c.net_profit))
                .unwrap_or_default();
            row_line.push_str(&format!("{:>12}", text));
        }
        lines.push(row_line);
    }
    lines
}

fn row(label: &str, value: String) -> String {
    format!("  {:<18}{:>16}", label, value)
}

/// Fixed two-decimal money with thousands grouping.
fn money(amount: Decimal) -> String {
    group_digits(&format!("{:.2}", amount.round_dp(2)))
}

/// Nearest whole number with thousands grouping.
fn whole(amount: Decimal) -> String {
    group_digits(&amount.round().to_string())
}

fn pct1(value: Decimal) -> String {
    format!("{:.1}", value.round_dp(1))
}

fn pct2(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Signed percent label for a perturbation level, e.g. "-20%" or "+0%".
fn delta_label(delta: Decimal) -> String {
    let pct = (delta * Decimal::ONE_HUNDRED).normalize();
    if pct >= Decimal::ZERO {
        format!("+{pct}%")
    } else {
        format!("{pct}%")
    }
}

fn group_digits(formatted: &str) -> String {
    let (sign, rest) = formatted
        .strip_prefix('-')
        .map_or(("", formatted), |r| ("-", r));
    let (int_part, frac) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::new();
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_shows_the_worked_example_figures() {
        let params = OperatingParameters::default();
        let result = store_econ::compute_financials(&params);
        let text = render_report(&params, &result);
        assert!(text.contains("75,000.00"));
        assert!(text.contains("-7,500.00"));
        assert!(text.contains("-10.00"));
        assert!(text.contains("Warning"));
    }

    #[test]
    fn profitable_parameters_get_the_all_clear() {
        let mut params = OperatingParameters::default();
        params.daily_orders = 150;
        let result = store_econ::compute_financials(&params);
        let text = render_report(&params, &result);
        assert!(!text.contains("Warning"));
        assert!(text.contains("Profitable"));
    }

    #[test]
    fn sweep_table_has_a_row_per_cell() {
        let params = OperatingParameters::default();
        let cells = store_econ::sweep_sensitivity(&params);
        let text = render_sweep(&params, &cells);
        let rows = text
            .lines()
            .filter(|l| l.starts_with('+') || l.starts_with('-'))
            .count();
        // the dashed header divider is not a data row
        assert_eq!(rows - 1, 25);
    }

    #[test]
    fn sweep_grid_covers_every_axis_value() {
        let params = OperatingParameters::default();
        let cells = store_econ::sweep_sensitivity(&params);
        let text = render_sweep(&params, &cells);
        assert!(text.contains("Net profit by price"));
        // top price row, highest order column: 30 * 120 * 30 days
        let row = text
            .lines()
            .find(|l| l.trim_start().starts_with("30.00"))
            .unwrap();
        assert!(row.contains("10,500"));
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(Decimal::new(-750_000, 2)), "-7,500.00");
        assert_eq!(money(Decimal::new(123_456_750, 2)), "1,234,567.50");
        assert_eq!(money(Decimal::new(3, 0)), "3.00");
    }

    #[test]
    fn delta_labels_are_signed_percentages() {
        assert_eq!(delta_label(Decimal::new(-20, 2)), "-20%");
        assert_eq!(delta_label(Decimal::ZERO), "+0%");
        assert_eq!(delta_label(Decimal::new(10, 2)), "+10%");
    }
}
