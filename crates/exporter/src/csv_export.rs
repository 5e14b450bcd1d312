use crate::error::ExportError;
use core_types::{SimulationResult, SweepResult};
use std::io::Write;

/// Column order of the step table export.
pub const STEP_HEADER: [&str; 11] = [
    "step",
    "price",
    "liq_price",
    "dist_to_liq_pct",
    "entry_price",
    "nominal_open",
    "qty",
    "pnl",
    "fee_close_open_end",
    "funding",
    "equity_end",
];

pub const SWEEP_HEADER: [&str; 4] = ["value", "roi_pct", "final_equity", "min_dist_pct"];

/// Full-precision number text; non-finite values use their JavaScript spelling
/// so existing spreadsheet consumers keep parsing them.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

/// Writes one row per step. `fee_close_open_end` combines the close,
/// re-open and end-close fees of the step.
pub fn write_csv<W: Write>(result: &SimulationResult, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(STEP_HEADER)?;

    for r in &result.rows {
        wtr.write_record([
            r.step.to_string(),
            format_number(r.price),
            format_number(r.liquidation_price),
            format_number(r.liquidation_distance_pct),
            format_number(r.entry_price),
            format_number(r.notional),
            format_number(r.quantity),
            format_number(r.pnl),
            format_number(r.trading_fees()),
            format_number(r.funding_fee),
            format_number(r.equity_end),
        ])?;
    }

    wtr.flush()?;
    tracing::debug!(rows = result.rows.len(), "Step table written as CSV");
    Ok(())
}

pub fn to_csv_string(result: &SimulationResult) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(result, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes one row per sweep candidate, in candidate order.
pub fn write_sweep_csv<W: Write>(result: &SweepResult, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SWEEP_HEADER)?;

    for p in &result.points {
        wtr.write_record([
            format_number(p.value),
            format_number(p.roi_pct),
            format_number(p.final_equity),
            format_number(p.min_distance_pct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{SimulationParameters, SweepField, SweepPoint};
    use simulator::simulate;

    #[test]
    fn header_and_one_line_per_step() {
        let params = SimulationParameters {
            step_count: 4,
            ..SimulationParameters::default()
        };
        let csv = to_csv_string(&simulate(&params)).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "step,price,liq_price,dist_to_liq_pct,entry_price,nominal_open,qty,pnl,fee_close_open_end,funding,equity_end"
        );
        assert!(lines[1].starts_with("1,"));
        assert!(lines[4].starts_with("4,"));
    }

    #[test]
    fn fee_column_sums_close_reopen_and_end_fees() {
        let params = SimulationParameters {
            step_count: 1,
            taker_fee_rate: 0.001,
            close_at_end: true,
            ..SimulationParameters::default()
        };
        let result = simulate(&params);
        let csv = to_csv_string(&result).unwrap();
        let row = &result.rows[0];

        let fields: Vec<_> = csv.lines().nth(1).unwrap().split(',').collect();
        let fee: f64 = fields[8].parse().unwrap();
        assert_eq!(fee, row.close_fee + row.reopen_fee + row.end_close_fee);
        assert!(row.end_close_fee > 0.0);
    }

    #[test]
    fn non_finite_values_use_javascript_spelling() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(196.911), "196.911");
        assert_eq!(format_number(200.0), "200");
    }

    #[test]
    fn sweep_rows_follow_candidate_order() {
        let result = SweepResult {
            field: SweepField::Leverage,
            points: vec![
                SweepPoint { value: 5.0, roi_pct: 10.0, final_equity: 110.0, min_distance_pct: 12.5 },
                SweepPoint { value: 1.0, roi_pct: 2.0, final_equity: 102.0, min_distance_pct: f64::INFINITY },
            ],
        };
        let mut buf = Vec::new();
        write_sweep_csv(&result, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "value,roi_pct,final_equity,min_dist_pct\n5,10,110,12.5\n1,2,102,Infinity\n"
        );
    }
}
