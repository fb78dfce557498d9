//! Core business logic - framework-agnostic ledger and wager rules.
//!
//! Nothing in here knows about Discord. Command handlers call into these
//! modules and render the results.

/// Account storage, daily claims, and balance settlement
pub mod ledger;
/// Per-account mutual exclusion for balance updates
pub mod locks;
/// Bet parsing and dice roll resolution
pub mod wager;
