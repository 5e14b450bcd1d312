use crate::error::ExportError;
use core_types::{SimulationParameters, SimulationResult, StepRecord};
use serde::Serialize;
use std::io::Write;

/// Input parameters under the key names of the web form's saved state.
/// `stepPct` carries the growth as a fraction, not a percentage.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDoc {
    pub initial_capital: f64,
    pub leverage: f64,
    pub entry_price: f64,
    pub step_pct: f64,
    pub steps: usize,
    pub taker_fee: f64,
    pub funding_per_step: f64,
    pub mmr: f64,
    pub close_at_end: bool,
}

impl From<&SimulationParameters> for InputDoc {
    fn from(p: &SimulationParameters) -> Self {
        Self {
            initial_capital: p.initial_capital,
            leverage: p.leverage,
            entry_price: p.entry_price,
            step_pct: p.step_growth,
            steps: p.step_count,
            taker_fee: p.taker_fee_rate,
            funding_per_step: p.funding_rate_per_step,
            mmr: p.maintenance_margin_rate,
            close_at_end: p.close_at_end,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDoc {
    pub step: usize,
    pub price: f64,
    pub liq_price: f64,
    pub dist_pct: f64,
    pub entry_at_step: f64,
    pub nominal_open: f64,
    pub qty: f64,
    pub pnl: f64,
    pub fee_close: f64,
    pub fee_open_next: f64,
    pub funding: f64,
    pub end_close_fee: f64,
    pub equity_end: f64,
}

impl From<&StepRecord> for RowDoc {
    fn from(r: &StepRecord) -> Self {
        Self {
            step: r.step,
            price: r.price,
            liq_price: r.liquidation_price,
            dist_pct: r.liquidation_distance_pct,
            entry_at_step: r.entry_price,
            nominal_open: r.notional,
            qty: r.quantity,
            pnl: r.pnl,
            fee_close: r.close_fee,
            fee_open_next: r.reopen_fee,
            funding: r.funding_fee,
            end_close_fee: r.end_close_fee,
            equity_end: r.equity_end,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDoc<'a> {
    pub prices: &'a [f64],
    pub equity_series: &'a [f64],
    pub rows: Vec<RowDoc>,
    pub final_equity: f64,
    pub roi: f64,
    pub total_fees: f64,
    pub min_dist_pct: f64,
    pub min_liq_price: f64,
}

impl<'a> From<&'a SimulationResult> for OutputDoc<'a> {
    fn from(out: &'a SimulationResult) -> Self {
        Self {
            prices: &out.prices,
            equity_series: &out.equity_series,
            rows: out.rows.iter().map(RowDoc::from).collect(),
            final_equity: out.final_equity,
            roi: out.roi,
            total_fees: out.total_fees,
            min_dist_pct: out.min_distance_pct,
            min_liq_price: out.min_liquidation_price,
        }
    }
}

/// The JSON document: the inputs next to the full result.
#[derive(Debug, Serialize)]
pub struct ProjectionExport<'a> {
    pub input: InputDoc,
    pub output: OutputDoc<'a>,
}

/// Writes pretty-printed JSON. Non-finite numbers become `null`.
pub fn write_json<W: Write>(
    params: &SimulationParameters,
    result: &SimulationResult,
    writer: W,
) -> Result<(), ExportError> {
    let doc = ProjectionExport {
        input: InputDoc::from(params),
        output: OutputDoc::from(result),
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

pub fn to_json_string(
    params: &SimulationParameters,
    result: &SimulationResult,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_json(params, result, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use simulator::simulate;

    fn keys(v: &Value) -> Vec<&str> {
        let mut keys: Vec<_> = v.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn document_holds_input_and_output() {
        let params = SimulationParameters {
            step_count: 3,
            ..SimulationParameters::default()
        };
        let result = simulate(&params);
        let doc: Value = serde_json::from_str(&to_json_string(&params, &result).unwrap()).unwrap();

        assert_eq!(doc["input"]["leverage"], 10.0);
        assert_eq!(doc["input"]["closeAtEnd"], true);
        assert_eq!(doc["input"]["stepPct"], 0.1);
        assert_eq!(doc["output"]["rows"].as_array().unwrap().len(), 3);
        assert_eq!(doc["output"]["prices"].as_array().unwrap().len(), 4);
        assert_eq!(doc["output"]["finalEquity"], result.final_equity);
        assert_eq!(doc["output"]["rows"][0]["entryAtStep"], 100.0);
    }

    #[test]
    fn keys_match_the_web_export_format() {
        let params = SimulationParameters::default();
        let doc: Value =
            serde_json::from_str(&to_json_string(&params, &simulate(&params)).unwrap()).unwrap();

        assert_eq!(keys(&doc), vec!["input", "output"]);
        assert_eq!(
            keys(&doc["input"]),
            vec![
                "closeAtEnd",
                "entryPrice",
                "fundingPerStep",
                "initialCapital",
                "leverage",
                "mmr",
                "stepPct",
                "steps",
                "takerFee",
            ]
        );
        assert_eq!(
            keys(&doc["output"]),
            vec![
                "equitySeries",
                "finalEquity",
                "minDistPct",
                "minLiqPrice",
                "prices",
                "roi",
                "rows",
                "totalFees",
            ]
        );
        assert_eq!(
            keys(&doc["output"]["rows"][0]),
            vec![
                "distPct",
                "endCloseFee",
                "entryAtStep",
                "equityEnd",
                "feeClose",
                "feeOpenNext",
                "funding",
                "liqPrice",
                "nominalOpen",
                "pnl",
                "price",
                "qty",
                "step",
            ]
        );
    }

    #[test]
    fn unbounded_minimum_serializes_as_null() {
        let params = SimulationParameters {
            entry_price: f64::INFINITY,
            step_count: 1,
            ..SimulationParameters::default()
        };
        let result = simulate(&params);
        let doc: Value = serde_json::from_str(&to_json_string(&params, &result).unwrap()).unwrap();

        assert!(doc["output"]["minDistPct"].is_null());
        assert!(doc["input"]["entryPrice"].is_null());
    }
}
