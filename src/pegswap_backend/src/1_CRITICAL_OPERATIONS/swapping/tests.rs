//! Scenario tests for swap accounting
//!
//! Exercises the pure planning step together with the liquidity ledger —
//! the exact bookkeeping the orchestrator performs around the two transfer
//! legs — without any inter-canister traffic.

#[cfg(test)]
mod swap_accounting_tests {
    use candid::Principal;

    use crate::infrastructure::errors::{LiquidityError, PegSwapError, SwapError};
    use crate::_1_CRITICAL_OPERATIONS::swapping::plan_swap;
    use crate::_2_CRITICAL_DATA::ledger::LiquidityLedger;

    const E6: u8 = 6;
    const E18: u8 = 18;

    fn token_a() -> Principal {
        Principal::from_text("aaaaa-aa").unwrap()
    }

    fn token_b() -> Principal {
        Principal::from_text("2vxsx-fae").unwrap()
    }

    /// Apply the ledger side of one successful swap: debit forward, credit
    /// the raw input on the reverse key
    fn settle(
        ledger: &mut LiquidityLedger,
        source: Principal,
        target: Principal,
        amount_in: u128,
        amount_out: u128,
    ) {
        ledger.debit(source, target, amount_out).unwrap();
        ledger.credit(target, source, amount_in).unwrap();
    }

    #[test]
    fn test_swap_up_scales_exactly() {
        // seed 100.0 of the e18 token swappable from the e6 token
        let mut ledger = LiquidityLedger::new();
        ledger
            .credit(token_a(), token_b(), 100_000_000_000_000_000_000)
            .unwrap();

        // swap 1.0 of the e6 token
        let plan = plan_swap(1_000_000, E6, E18).unwrap();
        assert_eq!(plan.amount_out, 1_000_000_000_000_000_000);

        settle(&mut ledger, token_a(), token_b(), plan.amount_in, plan.amount_out);

        assert_eq!(
            ledger.swappable(token_a(), token_b()),
            99_000_000_000_000_000_000
        );
        assert_eq!(ledger.swappable(token_b(), token_a()), 1_000_000);
    }

    #[test]
    fn test_swap_down_truncates_without_failing() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_b(), token_a(), 100_000_000).unwrap();

        // 9.999999999999999999 of the e18 token yields exactly 9.999999 e6
        let plan = plan_swap(9_999_999_999_999_999_999, E18, E6).unwrap();
        assert_eq!(plan.amount_out, 9_999_999);

        settle(&mut ledger, token_b(), token_a(), plan.amount_in, plan.amount_out);

        assert_eq!(ledger.swappable(token_b(), token_a()), 100_000_000 - 9_999_999);
        assert_eq!(
            ledger.swappable(token_a(), token_b()),
            9_999_999_999_999_999_999
        );
    }

    #[test]
    fn test_round_trip_restores_original_holding() {
        // both directions seeded; swap 100.0 e6 up, then the proceeds back
        let mut ledger = LiquidityLedger::new();
        ledger
            .credit(token_a(), token_b(), 100_000_000_000_000_000_000)
            .unwrap();
        ledger.credit(token_b(), token_a(), 100_000_000).unwrap();

        let up = plan_swap(100_000_000, E6, E18).unwrap();
        settle(&mut ledger, token_a(), token_b(), up.amount_in, up.amount_out);

        let down = plan_swap(up.amount_out, E18, E6).unwrap();
        settle(&mut ledger, token_b(), token_a(), down.amount_in, down.amount_out);

        // exact power-of-ten ratio: the caller ends where they started
        assert_eq!(down.amount_out, 100_000_000);
    }

    #[test]
    fn test_conservation_per_swap() {
        let mut ledger = LiquidityLedger::new();
        ledger
            .credit(token_a(), token_b(), 50_000_000_000_000_000_000)
            .unwrap();

        let before_forward = ledger.swappable(token_a(), token_b());
        let before_reverse = ledger.swappable(token_b(), token_a());

        let amount_in = 123_456u128;
        let plan = plan_swap(amount_in, E6, E18).unwrap();
        settle(&mut ledger, token_a(), token_b(), plan.amount_in, plan.amount_out);

        assert_eq!(
            ledger.swappable(token_a(), token_b()),
            before_forward - plan.amount_out
        );
        assert_eq!(
            ledger.swappable(token_b(), token_a()),
            before_reverse + amount_in
        );
    }

    #[test]
    fn test_swap_never_increases_forward_capacity() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_b(), token_a(), 10_000_000).unwrap();

        let before = ledger.swappable(token_b(), token_a());
        let plan = plan_swap(5_000_000_000_000_000_000, E18, E6).unwrap();
        settle(&mut ledger, token_b(), token_a(), plan.amount_in, plan.amount_out);

        assert!(ledger.swappable(token_b(), token_a()) < before);
    }

    #[test]
    fn test_zero_output_rejected_before_any_effect() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_b(), token_a(), 10_000_000).unwrap();

        // below one target minor unit: 1e-18 cannot be expressed at e6
        let result = plan_swap(1, E18, E6);
        assert!(matches!(
            result,
            Err(PegSwapError::Swap(SwapError::AmountTooSmall { .. }))
        ));

        // planning failed, so nothing was staged against the ledger
        assert_eq!(ledger.swappable(token_b(), token_a()), 10_000_000);
        assert_eq!(ledger.swappable(token_a(), token_b()), 0);
    }

    #[test]
    fn test_capacity_bound_is_exact() {
        let mut ledger = LiquidityLedger::new();
        ledger
            .credit(token_a(), token_b(), 1_000_000_000_000_000_000)
            .unwrap();

        // exactly at capacity succeeds
        let plan = plan_swap(1_000_000, E6, E18).unwrap();
        assert!(ledger
            .debit(token_a(), token_b(), plan.amount_out)
            .is_ok());
        ledger.credit(token_a(), token_b(), plan.amount_out).unwrap();

        // one source minor unit more converts above capacity and is rejected
        // with the ledger untouched
        let plan = plan_swap(1_000_001, E6, E18).unwrap();
        let result = ledger.debit(token_a(), token_b(), plan.amount_out);
        assert!(matches!(
            result,
            Err(PegSwapError::Liquidity(
                LiquidityError::InsufficientLiquidity { .. }
            ))
        ));
        assert_eq!(
            ledger.swappable(token_a(), token_b()),
            1_000_000_000_000_000_000
        );
    }

    #[test]
    fn test_reverse_credit_is_raw_source_units() {
        let mut ledger = LiquidityLedger::new();
        ledger
            .credit(token_b(), token_a(), 100_000_000)
            .unwrap();

        // swapping down posts the raw e18 amount on the reverse key, not the
        // truncated e6 output
        let plan = plan_swap(1_500_000_000_000_000_000, E18, E6).unwrap();
        settle(&mut ledger, token_b(), token_a(), plan.amount_in, plan.amount_out);

        assert_eq!(
            ledger.swappable(token_a(), token_b()),
            1_500_000_000_000_000_000
        );

        // consuming that reverse capacity re-normalizes it
        let back = plan_swap(1_000_000, E6, E18).unwrap();
        assert!(ledger.debit(token_a(), token_b(), back.amount_out).is_ok());
    }
}
