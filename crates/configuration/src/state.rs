//! Flat key-value encoding of `SimulationParameters`, used for shareable links.
//!
//! Keys follow the web form: step growth travels as a percentage under
//! `stepPct`, booleans as `1`/`0`. Decoding falls back to a base value for
//! every key that is missing or does not parse.

use core_types::SimulationParameters;
use std::collections::BTreeMap;

const INITIAL_CAPITAL: &str = "initialCapital";
const INITIAL_CAPITAL_ALIAS: &str = "E0";
const LEVERAGE: &str = "leverage";
const ENTRY_PRICE: &str = "entryPrice";
const STEP_PCT: &str = "stepPct";
const STEPS: &str = "steps";
const TAKER_FEE: &str = "takerFee";
const FUNDING: &str = "fundingPerStep";
const MMR: &str = "mmr";
const CLOSE_AT_END: &str = "closeAtEnd";

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Ordered list of `(key, value)` pairs for `params`.
fn pairs(params: &SimulationParameters) -> Vec<(&'static str, String)> {
    vec![
        (INITIAL_CAPITAL, params.initial_capital.to_string()),
        (LEVERAGE, params.leverage.to_string()),
        (ENTRY_PRICE, params.entry_price.to_string()),
        (STEP_PCT, (params.step_growth * 100.0).to_string()),
        (STEPS, params.step_count.to_string()),
        (TAKER_FEE, params.taker_fee_rate.to_string()),
        (FUNDING, params.funding_rate_per_step.to_string()),
        (MMR, params.maintenance_margin_rate.to_string()),
        (CLOSE_AT_END, flag(params.close_at_end)),
    ]
}

/// Encodes `params` as a query string (without the leading `?`).
pub fn encode_state(params: &SimulationParameters) -> String {
    pairs(params)
        .into_iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn state_map(params: &SimulationParameters) -> BTreeMap<String, String> {
    pairs(params)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn number(map: &BTreeMap<String, String>, key: &str) -> Option<f64> {
    map.get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

fn whole(map: &BTreeMap<String, String>, key: &str) -> Option<usize> {
    map.get(key).and_then(|v| {
        let v = v.trim();
        v.parse::<usize>().ok().or_else(|| {
            // Accept "10.0" the way a number field would.
            v.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as usize)
        })
    })
}

fn boolean(map: &BTreeMap<String, String>, key: &str) -> Option<bool> {
    match map.get(key)?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Rebuilds parameters from a flat map, taking each missing or malformed
/// key from `base`.
pub fn params_from_map(
    map: &BTreeMap<String, String>,
    base: &SimulationParameters,
) -> SimulationParameters {
    SimulationParameters {
        initial_capital: number(map, INITIAL_CAPITAL)
            .or_else(|| number(map, INITIAL_CAPITAL_ALIAS))
            .unwrap_or(base.initial_capital),
        leverage: number(map, LEVERAGE).unwrap_or(base.leverage),
        entry_price: number(map, ENTRY_PRICE).unwrap_or(base.entry_price),
        step_growth: number(map, STEP_PCT)
            .map(|pct| pct / 100.0)
            .unwrap_or(base.step_growth),
        step_count: whole(map, STEPS).unwrap_or(base.step_count),
        taker_fee_rate: number(map, TAKER_FEE).unwrap_or(base.taker_fee_rate),
        funding_rate_per_step: number(map, FUNDING).unwrap_or(base.funding_rate_per_step),
        maintenance_margin_rate: number(map, MMR).unwrap_or(base.maintenance_margin_rate),
        close_at_end: boolean(map, CLOSE_AT_END).unwrap_or(base.close_at_end),
    }
}

/// Splits a query string, a `?query`, or a full URL into its key-value pairs.
/// Later duplicates win.
pub fn parse_query(input: &str) -> BTreeMap<String, String> {
    let query = match input.split_once('?') {
        Some((_, q)) => q,
        None => input,
    };
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((k, v)) => (form_decode(k).trim().to_string(), form_decode(v)),
            None => (form_decode(part).trim().to_string(), String::new()),
        })
        .collect()
}

/// Form-style decoding: `+` is a space, `%xx` escapes are resolved.
/// Text that does not decode to UTF-8 is kept as written.
fn form_decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Decodes a share string onto `base`.
pub fn decode_state_onto(input: &str, base: &SimulationParameters) -> SimulationParameters {
    params_from_map(&parse_query(input), base)
}

/// Decodes a share string, defaulting any missing or malformed key.
pub fn decode_state(input: &str) -> SimulationParameters {
    decode_state_onto(input, &SimulationParameters::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_in_form_order_with_percent_step() {
        let params = SimulationParameters::default();
        assert_eq!(
            encode_state(&params),
            "initialCapital=100&leverage=10&entryPrice=100&stepPct=10&steps=10\
             &takerFee=0.0006&fundingPerStep=0&mmr=0.004&closeAtEnd=1"
        );
    }

    #[test]
    fn round_trips_through_a_url() {
        let params = SimulationParameters {
            initial_capital: 2500.0,
            leverage: 7.5,
            entry_price: 64000.0,
            step_growth: 0.05,
            step_count: 12,
            taker_fee_rate: 0.0004,
            funding_rate_per_step: 0.0001,
            maintenance_margin_rate: 0.005,
            close_at_end: false,
        };
        let url = format!("https://example.test/sim?{}#chart", encode_state(&params));
        let decoded = decode_state(&url);

        assert!((decoded.step_growth - params.step_growth).abs() < 1e-12);
        assert_eq!(
            SimulationParameters {
                step_growth: params.step_growth,
                ..decoded
            },
            params
        );
    }

    #[test]
    fn missing_and_malformed_keys_fall_back_independently() {
        let decoded = decode_state("?leverage=abc&steps=2.5&E0=42&closeAtEnd=maybe&mmr=0.01");
        let defaults = SimulationParameters::default();

        assert_eq!(decoded.initial_capital, 42.0);
        assert_eq!(decoded.leverage, defaults.leverage);
        assert_eq!(decoded.step_count, defaults.step_count);
        assert_eq!(decoded.close_at_end, defaults.close_at_end);
        assert_eq!(decoded.maintenance_margin_rate, 0.01);
    }

    #[test]
    fn explicit_zero_flag_disables_close_at_end() {
        assert!(!decode_state("closeAtEnd=0").close_at_end);
        assert!(decode_state("closeAtEnd=true").close_at_end);
    }

    #[test]
    fn percent_escapes_and_plus_signs_are_decoded() {
        let decoded = decode_state("initialCapital=1%2E5&leverage=+5+&entry%50rice=2%2e5e1&closeAtEnd=0");
        assert_eq!(decoded.initial_capital, 1.5);
        assert_eq!(decoded.leverage, 5.0);
        assert_eq!(decoded.entry_price, 25.0);
        assert!(!decoded.close_at_end);
    }

    #[test]
    fn undecodable_escapes_fall_back_to_base() {
        let decoded = decode_state("leverage=%FF&steps=3");
        assert_eq!(decoded.leverage, SimulationParameters::default().leverage);
        assert_eq!(decoded.step_count, 3);
    }

    #[test]
    fn encoded_values_survive_a_round_trip() {
        let params = SimulationParameters {
            taker_fee_rate: 1e-7,
            funding_rate_per_step: -0.0001,
            ..SimulationParameters::default()
        };
        let decoded = decode_state(&encode_state(&params));
        assert_eq!(decoded.taker_fee_rate, 1e-7);
        assert_eq!(decoded.funding_rate_per_step, -0.0001);
    }

    #[test]
    fn canonical_key_wins_over_alias() {
        let decoded = decode_state("E0=1&initialCapital=2");
        assert_eq!(decoded.initial_capital, 2.0);
    }

    #[test]
    fn decoding_onto_a_base_keeps_unlisted_fields() {
        let base = SimulationParameters {
            leverage: 3.0,
            ..SimulationParameters::default()
        };
        let decoded = decode_state_onto("steps=4", &base);
        assert_eq!(decoded.leverage, 3.0);
        assert_eq!(decoded.step_count, 4);
    }

    #[test]
    fn state_map_has_every_key() {
        let map = state_map(&SimulationParameters::default());
        assert_eq!(map.len(), 9);
        assert_eq!(map.get("closeAtEnd").map(String::as_str), Some("1"));
    }
}
