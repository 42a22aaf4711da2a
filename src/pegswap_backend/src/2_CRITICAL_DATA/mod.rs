//! Critical Data - the liquidity ledger
//! Source of truth for directional swap capacity

pub mod ledger;

pub use ledger::{
    replace_ledger, with_ledger, with_ledger_mut, DirectedPair, LedgerEntry, LiquidityLedger,
};
