use proptest::prelude::*;

use slotsim_core::prelude::*;
use slotsim_simulator::{simulate, BoundCheck, Simulator};

fn arb_strategy() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![
        Just(StrategyKind::Sleep),
        Just(StrategyKind::Notify),
        Just(StrategyKind::Poll),
    ]
}

prop_compose! {
    fn arb_params()(
        capacity in 1u32..=8,
        wp in 0.25f64..5.0,
        wc in 0.25f64..5.0,
        yp in 0.5f64..20.0,
        yc in 0.5f64..20.0,
        costs in prop::array::uniform4(0.0f64..8.0),
        kp in 1u32..=3,
        kc in 1u32..=3,
        cons_offset in prop_oneof![Just(0.0), 0.0f64..10.0],
    ) -> SimulationParameters {
        let [np, nc, sp, sc] = costs;
        SimulationParameters {
            capacity, wp, wc, yp, yc, ye: 2.5, np, nc, sp, sc, kp, kc, cons_offset,
        }
    }
}

prop_compose! {
    /// Sleep/wake with a consumer faster than the producer and short enough
    /// consumer idle-waits: `Wc < Wp` and `Yc < (L-1) Wp - Wc`.
    fn arb_fast_consumer()(
        capacity in 2u32..=8,
        wp in 0.5f64..5.0,
        wc_ratio in 0.05f64..0.95,
        yc_ratio in 0.05f64..0.95,
        yp in 0.5f64..20.0,
    ) -> SimulationParameters {
        let wc = wp * wc_ratio;
        let margin = f64::from(capacity - 1) * wp - wc;
        SimulationParameters {
            capacity, wp, wc, yp, yc: margin * yc_ratio, ..Default::default()
        }
    }
}

prop_compose! {
    fn arb_poll()(
        capacity in 2u32..=8,
        wp in 0.25f64..5.0,
        wc in 0.25f64..5.0,
    ) -> SimulationParameters {
        SimulationParameters { capacity, wp, wc, ..Default::default() }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn queue_state_stays_consistent(params in arb_params(), kind in arb_strategy()) {
        let capacity = params.capacity;
        let mut sim = Simulator::new(params, kind).unwrap();
        let mut last = SimTime::ZERO;

        while sim.next_fire_time().is_some_and(|t| t.as_f64() <= 300.0) {
            sim.step();
            let ctx = sim.context();
            prop_assert!(ctx.now() >= last, "virtual time went backwards");
            last = ctx.now();
            prop_assert!(ctx.state.queue_length() <= capacity);
            prop_assert_eq!(
                u64::from(ctx.state.queue_length()),
                ctx.state.producer_index() - ctx.state.consumer_index()
            );
        }
    }

    #[test]
    fn runs_are_deterministic(params in arb_params(), kind in arb_strategy()) {
        let a = simulate(params.clone(), kind, RunBudget::VirtualTime(200.0)).unwrap();
        let b = simulate(params, kind, RunBudget::VirtualTime(200.0)).unwrap();
        prop_assert_eq!(a.digest(), b.digest());
        prop_assert_eq!(a.statistics, b.statistics);
    }

    #[test]
    fn poll_respects_latency_bound(params in arb_poll()) {
        let report = simulate(params, StrategyKind::Poll, RunBudget::VirtualTime(300.0)).unwrap();
        prop_assert_eq!(report.bound_check, BoundCheck::Within);
    }

    #[test]
    fn fast_consumer_sleep_respects_latency_bound(params in arb_fast_consumer()) {
        let report = simulate(params, StrategyKind::Sleep, RunBudget::VirtualTime(300.0)).unwrap();
        prop_assert_eq!(report.bound_check, BoundCheck::Within);
    }
}
