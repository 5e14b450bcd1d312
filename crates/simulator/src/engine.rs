use core_types::{SimulationParameters, SimulationResult, StepRecord};

/// Builds the geometric price path `P_k = P_0 * (1 + s)^k` for `k = 0..=K`.
///
/// Every point is raised from the same base rather than multiplied forward,
/// so long paths do not accumulate rounding drift.
pub fn price_path(entry_price: f64, step_growth: f64, step_count: usize) -> Vec<f64> {
    let base = 1.0 + step_growth;
    (0..=step_count)
        .map(|k| {
            if k == 0 {
                entry_price
            } else {
                entry_price * base.powf(k as f64)
            }
        })
        .collect()
}

/// Long-only liquidation estimate for a position opened at `entry_price`.
pub fn liquidation_price(entry_price: f64, leverage: f64, maintenance_margin_rate: f64) -> f64 {
    entry_price * (1.0 - 1.0 / leverage + maintenance_margin_rate)
}

/// Percentage gap between `price` and `liquidation_price`, floored at zero.
/// A non-positive price reports zero distance; NaN passes through.
pub fn liquidation_distance_pct(price: f64, liquidation_price: f64) -> f64 {
    if price > 0.0 {
        let distance = (price - liquidation_price) / price * 100.0;
        // `f64::max` would swallow NaN.
        if distance < 0.0 { 0.0 } else { distance }
    } else {
        0.0
    }
}

/// Runs the rolling projection for one parameter set.
///
/// Every step closes the position opened at the previous price, pays the
/// close fee and funding, then re-opens on the whole remaining equity at full
/// leverage. The run never stops early: a step whose liquidation distance hits
/// zero is reported but equity keeps compounding as if no liquidation happened.
/// Non-finite intermediate values propagate into the result unchanged.
pub fn simulate(params: &SimulationParameters) -> SimulationResult {
    let SimulationParameters {
        initial_capital,
        leverage,
        entry_price,
        step_growth,
        step_count,
        taker_fee_rate,
        funding_rate_per_step,
        maintenance_margin_rate,
        close_at_end,
    } = *params;

    let prices = price_path(entry_price, step_growth, step_count);

    let mut rows = Vec::with_capacity(step_count);
    let mut equity_series = Vec::with_capacity(step_count + 1);
    equity_series.push(initial_capital);

    let mut equity = initial_capital;
    let mut total_fees = 0.0;
    let mut min_distance_pct = f64::INFINITY;
    let mut min_liquidation_price = f64::INFINITY;

    for k in 1..=step_count {
        let open_price = prices[k - 1];
        let close_price = prices[k];

        let notional = leverage * equity;
        let quantity = notional / open_price;
        let pnl = quantity * (close_price - open_price);

        let close_fee = taker_fee_rate * (close_price * quantity);
        let funding_fee = funding_rate_per_step * notional;
        let equity_after_close = equity + pnl - close_fee - funding_fee;

        let reopen_fee = taker_fee_rate * (leverage * equity_after_close);
        let mut equity_end = equity_after_close - reopen_fee;

        total_fees += close_fee + reopen_fee + funding_fee;

        // Approximated as a fee on the re-leveraged notional, not the unwound position.
        let mut end_close_fee = 0.0;
        if k == step_count && close_at_end {
            end_close_fee = taker_fee_rate * (leverage * equity_end);
            equity_end -= end_close_fee;
            total_fees += end_close_fee;
        }

        let liq_price = liquidation_price(open_price, leverage, maintenance_margin_rate);
        let distance_pct = liquidation_distance_pct(close_price, liq_price);
        if distance_pct.is_finite() && distance_pct < min_distance_pct {
            min_distance_pct = distance_pct;
            min_liquidation_price = liq_price;
        }

        rows.push(StepRecord {
            step: k,
            price: close_price,
            entry_price: open_price,
            notional,
            quantity,
            pnl,
            close_fee,
            reopen_fee,
            funding_fee,
            end_close_fee,
            liquidation_price: liq_price,
            liquidation_distance_pct: distance_pct,
            equity_end,
        });

        equity = equity_end;
        equity_series.push(equity_end);
    }

    let final_equity = equity;
    let roi = (final_equity - initial_capital) / initial_capital;

    tracing::debug!(
        steps = step_count,
        leverage,
        step_growth,
        final_equity,
        roi,
        total_fees,
        min_distance_pct,
        "Simulation complete"
    );

    SimulationResult {
        prices,
        rows,
        equity_series,
        final_equity,
        roi,
        total_fees,
        min_distance_pct,
        min_liquidation_price,
    }
}
