use analytics::{DistanceLevel, RiskReport};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use configuration::Preset;
use core_types::{SimulationParameters, SimulationResult, SweepResult};

/// Fixed-point text for a number; non-finite values render as `-`.
pub fn fmt_num(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "-".to_string()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(titles));
    table
}

fn level_color(level: DistanceLevel) -> Color {
    match level {
        DistanceLevel::Safe => Color::Green,
        DistanceLevel::Warning => Color::Yellow,
        DistanceLevel::Danger => Color::Red,
        DistanceLevel::Unknown => Color::Grey,
    }
}

pub fn parameters_table(params: &SimulationParameters) -> Table {
    let mut table = new_table(&["Parameter", "Value"]);
    table.add_row(vec!["Initial capital".to_string(), fmt_num(params.initial_capital, 2)]);
    table.add_row(vec!["Leverage".to_string(), format!("{}x", params.leverage)]);
    table.add_row(vec!["Entry price".to_string(), fmt_num(params.entry_price, 4)]);
    table.add_row(vec!["Step growth".to_string(), format!("{}%", fmt_num(params.step_growth * 100.0, 2))]);
    table.add_row(vec!["Steps".to_string(), params.step_count.to_string()]);
    table.add_row(vec!["Taker fee".to_string(), format!("{}%", fmt_num(params.taker_fee_rate * 100.0, 4))]);
    table.add_row(vec![
        "Funding / step".to_string(),
        format!("{}%", fmt_num(params.funding_rate_per_step * 100.0, 4)),
    ]);
    table.add_row(vec![
        "Maintenance margin".to_string(),
        format!("{}%", fmt_num(params.maintenance_margin_rate * 100.0, 2)),
    ]);
    table.add_row(vec!["Close at end".to_string(), params.close_at_end.to_string()]);
    table
}

pub fn kpi_table(report: &RiskReport) -> Table {
    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("Final equity"), Cell::new(fmt_num(report.final_equity, 2))]);

    let roi_color = if report.roi_pct >= 0.0 { Color::Green } else { Color::Red };
    table.add_row(vec![
        Cell::new("ROI"),
        Cell::new(format!("{}%", fmt_num(report.roi_pct, 2))).fg(roi_color),
    ]);
    table.add_row(vec![
        Cell::new("Total fees"),
        Cell::new(format!("{} ({}% of capital)", fmt_num(report.total_fees, 2), fmt_num(report.fee_drag_pct, 2))),
    ]);
    table.add_row(vec![
        Cell::new("Min liquidation distance"),
        Cell::new(format!("{}%", fmt_num(report.min_distance_pct, 2))).fg(level_color(report.distance_level)),
    ]);
    table.add_row(vec![
        Cell::new("Liquidation price at min"),
        Cell::new(fmt_num(report.min_liquidation_price, 4)),
    ]);
    table.add_row(vec![
        Cell::new("Max drawdown"),
        Cell::new(format!("{}%", fmt_num(report.max_drawdown_pct, 2))),
    ]);
    table
}

/// One row per step; rows at or below the danger distance are red.
pub fn step_table(result: &SimulationResult, report: &RiskReport) -> Table {
    let mut table = new_table(&[
        "Step",
        "Price",
        "Liq. price",
        "Dist. to liq. %",
        "Entry",
        "Notional",
        "Qty",
        "PnL",
        "Fees",
        "Funding",
        "Equity",
    ]);

    for r in &result.rows {
        let cells = [
            r.step.to_string(),
            fmt_num(r.price, 4),
            fmt_num(r.liquidation_price, 4),
            fmt_num(r.liquidation_distance_pct, 2),
            fmt_num(r.entry_price, 4),
            fmt_num(r.notional, 2),
            fmt_num(r.quantity, 6),
            fmt_num(r.pnl, 2),
            fmt_num(r.trading_fees(), 4),
            fmt_num(r.funding_fee, 4),
            fmt_num(r.equity_end, 2),
        ];
        let at_risk = report.is_step_at_risk(r.step);
        table.add_row(cells.into_iter().map(|c| {
            let cell = Cell::new(c);
            if at_risk { cell.fg(Color::Red) } else { cell }
        }));
    }
    table
}

/// Sweep points in candidate order, the best ROI in bold.
pub fn sweep_table(result: &SweepResult) -> Table {
    let mut table = new_table(&[result.field.label(), "ROI %", "Final equity", "Min dist. %"]);
    let best = result.best_by_roi();

    for p in &result.points {
        let is_best = best.is_some_and(|b| std::ptr::eq(b, p));
        let cells = [
            fmt_num(p.value, 2),
            fmt_num(p.roi_pct, 2),
            fmt_num(p.final_equity, 2),
            fmt_num(p.min_distance_pct, 2),
        ];
        table.add_row(cells.into_iter().map(|c| {
            let cell = Cell::new(c);
            if is_best { cell.add_attribute(Attribute::Bold).fg(Color::Green) } else { cell }
        }));
    }
    table
}

pub fn presets_table(presets: &[Preset]) -> Table {
    let mut table = new_table(&["Id", "Name", "Capital", "Leverage", "Step %", "Steps", "Description"]);
    for p in presets {
        table.add_row(vec![
            p.id.to_string(),
            p.name.to_string(),
            fmt_num(p.params.initial_capital, 0),
            format!("{}x", p.params.leverage),
            fmt_num(p.params.step_growth * 100.0, 0),
            p.params.step_count.to_string(),
            p.description.to_string(),
        ]);
    }
    table
}
