//! Directional liquidity ledger
//!
//! Maps an ordered (source, target) token pair to the capacity still
//! swappable in that direction, denominated in the TARGET token's minor
//! units. (A,B) and (B,A) are independent entries: seeding one direction
//! says nothing about the other. Entries are created lazily on first credit
//! and never deleted, only driven toward zero.

use candid::{CandidType, Deserialize, Nat, Principal};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::infrastructure::errors::{
    CalculationError, LiquidityError, PegSwapError, Result,
};
use crate::infrastructure::math::{nat_to_u128, u128_to_nat};

/// Ordered (source, target) token combination
#[derive(CandidType, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectedPair {
    pub source: Principal,
    pub target: Principal,
}

impl DirectedPair {
    pub fn new(source: Principal, target: Principal) -> Self {
        DirectedPair { source, target }
    }

    /// The opposite direction; an independent ledger entry
    pub fn reversed(&self) -> Self {
        DirectedPair {
            source: self.target,
            target: self.source,
        }
    }
}

/// One exported ledger row, amounts widened to Nat for the candid boundary
#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct LedgerEntry {
    pub source: Principal,
    pub target: Principal,
    pub available: Nat,
}

/// In-memory ledger; mutated only through the methods below
#[derive(Default)]
pub struct LiquidityLedger {
    entries: HashMap<DirectedPair, u128>,
}

impl LiquidityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity still swappable from source into target; 0 if unseen
    pub fn swappable(&self, source: Principal, target: Principal) -> u128 {
        self.entries
            .get(&DirectedPair::new(source, target))
            .copied()
            .unwrap_or(0)
    }

    /// Raise the directional capacity; overflow fails closed
    pub fn credit(&mut self, source: Principal, target: Principal, amount: u128) -> Result<()> {
        let pair = DirectedPair::new(source, target);
        let available = self.entries.entry(pair).or_insert(0);

        *available = available.checked_add(amount).ok_or_else(|| {
            PegSwapError::Calculation(CalculationError::Overflow {
                operation: format!(
                    "credit({}, {}, {})",
                    source.to_text(),
                    target.to_text(),
                    amount
                ),
            })
        })?;

        Ok(())
    }

    /// Lower the directional capacity; never creates an entry
    pub fn debit(&mut self, source: Principal, target: Principal, amount: u128) -> Result<()> {
        let pair = DirectedPair::new(source, target);
        let available = self.entries.get_mut(&pair);

        match available {
            Some(available) if *available >= amount => {
                *available -= amount;
                Ok(())
            }
            Some(available) => Err(insufficient(source, target, amount, *available)),
            None if amount == 0 => Ok(()),
            None => Err(insufficient(source, target, amount, 0)),
        }
    }

    /// Would a credit of this amount stay within the accounting range?
    pub fn can_credit(&self, source: Principal, target: Principal, amount: u128) -> bool {
        self.swappable(source, target).checked_add(amount).is_some()
    }

    pub fn pair_count(&self) -> usize {
        self.entries.len()
    }

    pub fn export_entries(&self) -> Vec<LedgerEntry> {
        self.entries
            .iter()
            .map(|(pair, available)| LedgerEntry {
                source: pair.source,
                target: pair.target,
                available: u128_to_nat(*available),
            })
            .collect()
    }

    /// Rebuild from exported rows; rows beyond the accounting range are
    /// reported, not silently dropped
    pub fn import_entries(entries: Vec<LedgerEntry>) -> Result<Self> {
        let mut ledger = LiquidityLedger::new();
        for entry in entries {
            let available = nat_to_u128(&entry.available)?;
            ledger
                .entries
                .insert(DirectedPair::new(entry.source, entry.target), available);
        }
        Ok(ledger)
    }
}

fn insufficient(
    source: Principal,
    target: Principal,
    requested: u128,
    available: u128,
) -> PegSwapError {
    PegSwapError::Liquidity(LiquidityError::InsufficientLiquidity {
        source: source.to_text(),
        target: target.to_text(),
        requested: requested.to_string(),
        available: available.to_string(),
    })
}

thread_local! {
    static LIQUIDITY_LEDGER: RefCell<LiquidityLedger> = RefCell::new(LiquidityLedger::new());
}

pub fn with_ledger<R>(f: impl FnOnce(&LiquidityLedger) -> R) -> R {
    LIQUIDITY_LEDGER.with(|ledger| f(&ledger.borrow()))
}

pub fn with_ledger_mut<R>(f: impl FnOnce(&mut LiquidityLedger) -> R) -> R {
    LIQUIDITY_LEDGER.with(|ledger| f(&mut ledger.borrow_mut()))
}

/// Replace the whole ledger (upgrade restore)
pub fn replace_ledger(ledger: LiquidityLedger) {
    LIQUIDITY_LEDGER.with(|cell| *cell.borrow_mut() = ledger);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_a() -> Principal {
        Principal::from_text("aaaaa-aa").unwrap()
    }

    fn token_b() -> Principal {
        Principal::from_text("2vxsx-fae").unwrap()
    }

    #[test]
    fn test_unseen_pair_is_zero() {
        let ledger = LiquidityLedger::new();
        assert_eq!(ledger.swappable(token_a(), token_b()), 0);
    }

    #[test]
    fn test_directions_are_independent() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_a(), token_b(), 100).unwrap();

        assert_eq!(ledger.swappable(token_a(), token_b()), 100);
        assert_eq!(ledger.swappable(token_b(), token_a()), 0);
    }

    #[test]
    fn test_credit_accumulates() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_a(), token_b(), 100).unwrap();
        ledger.credit(token_a(), token_b(), 50).unwrap();

        assert_eq!(ledger.swappable(token_a(), token_b()), 150);
    }

    #[test]
    fn test_debit_subtracts() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_a(), token_b(), 100).unwrap();
        ledger.debit(token_a(), token_b(), 40).unwrap();

        assert_eq!(ledger.swappable(token_a(), token_b()), 60);
    }

    #[test]
    fn test_debit_to_zero_keeps_entry() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_a(), token_b(), 100).unwrap();
        ledger.debit(token_a(), token_b(), 100).unwrap();

        assert_eq!(ledger.swappable(token_a(), token_b()), 0);
        assert_eq!(ledger.pair_count(), 1);
    }

    #[test]
    fn test_debit_over_capacity_rejected_and_unchanged() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_a(), token_b(), 100).unwrap();

        let result = ledger.debit(token_a(), token_b(), 101);
        assert!(matches!(
            result,
            Err(PegSwapError::Liquidity(
                LiquidityError::InsufficientLiquidity { .. }
            ))
        ));
        assert_eq!(ledger.swappable(token_a(), token_b()), 100);
    }

    #[test]
    fn test_debit_unseen_pair_rejected_without_creating_entry() {
        let mut ledger = LiquidityLedger::new();

        let result = ledger.debit(token_a(), token_b(), 1);
        assert!(result.is_err());
        assert_eq!(ledger.pair_count(), 0);
    }

    #[test]
    fn test_credit_overflow_fails_closed() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_a(), token_b(), u128::MAX).unwrap();

        assert!(!ledger.can_credit(token_a(), token_b(), 1));
        let result = ledger.credit(token_a(), token_b(), 1);
        assert!(matches!(
            result,
            Err(PegSwapError::Calculation(CalculationError::Overflow { .. }))
        ));
        assert_eq!(ledger.swappable(token_a(), token_b()), u128::MAX);
    }

    #[test]
    fn test_reversed_pair_flips_key_order() {
        let pair = DirectedPair::new(token_a(), token_b());
        let reversed = pair.reversed();
        assert_eq!(reversed.source, token_b());
        assert_eq!(reversed.target, token_a());
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut ledger = LiquidityLedger::new();
        ledger.credit(token_a(), token_b(), 123).unwrap();
        ledger.credit(token_b(), token_a(), u128::MAX).unwrap();

        let restored = LiquidityLedger::import_entries(ledger.export_entries()).unwrap();
        assert_eq!(restored.swappable(token_a(), token_b()), 123);
        assert_eq!(restored.swappable(token_b(), token_a()), u128::MAX);
        assert_eq!(restored.pair_count(), 2);
    }
}
