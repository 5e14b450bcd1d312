use core_types::SimulationParameters;
use proptest::prelude::*;
use simulator::simulate;

fn params_strategy() -> impl Strategy<Value = SimulationParameters> {
    (
        1.0f64..1_000_000.0,
        1.0f64..20.0,
        0.01f64..100_000.0,
        0.001f64..0.2,
        1usize..60,
        0.0f64..0.01,
        0.0f64..0.001,
        0.0f64..0.05,
        any::<bool>(),
    )
        .prop_map(
            |(
                initial_capital,
                leverage,
                entry_price,
                step_growth,
                step_count,
                taker_fee_rate,
                funding_rate_per_step,
                maintenance_margin_rate,
                close_at_end,
            )| SimulationParameters {
                initial_capital,
                leverage,
                entry_price,
                step_growth,
                step_count,
                taker_fee_rate,
                funding_rate_per_step,
                maintenance_margin_rate,
                close_at_end,
            },
        )
}

proptest! {
    #[test]
    fn repeated_runs_are_bit_identical(params in params_strategy()) {
        let a = simulate(&params);
        let b = simulate(&params);
        prop_assert_eq!(format!("{a:?}"), format!("{b:?}"));
    }

    #[test]
    fn series_lengths_follow_step_count(params in params_strategy()) {
        let out = simulate(&params);
        prop_assert_eq!(out.rows.len(), params.step_count);
        prop_assert_eq!(out.prices.len(), params.step_count + 1);
        prop_assert_eq!(out.equity_series.len(), params.step_count + 1);
        prop_assert_eq!(out.equity_series[0], params.initial_capital);
        prop_assert_eq!(out.prices[0], params.entry_price);
    }

    #[test]
    fn each_step_chains_from_the_previous(params in params_strategy()) {
        let out = simulate(&params);
        for (i, row) in out.rows.iter().enumerate() {
            let k = i + 1;
            prop_assert_eq!(row.step, k);
            prop_assert_eq!(row.entry_price, out.prices[k - 1]);
            prop_assert_eq!(row.price, out.prices[k]);
            prop_assert_eq!(out.equity_series[k], row.equity_end);
        }
        prop_assert_eq!(out.final_equity, *out.equity_series.last().unwrap());
    }

    #[test]
    fn fee_free_runs_report_zero_fees(mut params in params_strategy()) {
        params.taker_fee_rate = 0.0;
        params.funding_rate_per_step = 0.0;
        let out = simulate(&params);
        prop_assert_eq!(out.total_fees, 0.0);
    }

    #[test]
    fn total_fees_equal_the_sum_of_row_fees(params in params_strategy()) {
        let out = simulate(&params);
        let summed: f64 = out.rows.iter().map(|r| r.total_fees()).sum();
        prop_assert!((summed - out.total_fees).abs() <= 1e-9 * out.total_fees.abs().max(1.0));
    }

    #[test]
    fn minimum_distance_pairs_with_its_own_liquidation_price(params in params_strategy()) {
        let out = simulate(&params);
        let min = out
            .rows
            .iter()
            .map(|r| r.liquidation_distance_pct)
            .fold(f64::INFINITY, f64::min);
        prop_assert_eq!(out.min_distance_pct, min);

        let first_min = out
            .rows
            .iter()
            .find(|r| r.liquidation_distance_pct == min)
            .unwrap();
        prop_assert_eq!(out.min_liquidation_price, first_min.liquidation_price);
    }

    #[test]
    fn unit_leverage_keeps_a_wide_liquidation_buffer(mut params in params_strategy(), mmr in 0.0f64..0.5) {
        params.leverage = 1.0;
        params.maintenance_margin_rate = mmr;
        let out = simulate(&params);
        for row in &out.rows {
            prop_assert!(row.liquidation_distance_pct > 50.0);
        }
    }
}
