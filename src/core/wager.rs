//! Wager rules for `/roll`.
//!
//! A bet is parsed against the current balance, then the bot and the user each
//! roll one die. The higher roll wins the stake, a tie returns it. Randomness
//! comes from a [`DiceSource`] supplied by the caller, so resolution is
//! deterministic under test and never shares RNG state between concurrent rolls.

use crate::errors::{Error, Result};
use rand::Rng;
use std::cmp::Ordering;

/// Keyword that bets the whole balance.
pub const ALL_IN: &str = "all";

/// Inclusive range of die faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRange {
    /// Lowest face
    pub min: u8,
    /// Highest face
    pub max: u8,
}

impl DiceRange {
    /// Creates a range, swapping the bounds if they are given in reverse.
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Returns true if `face` can be rolled.
    #[must_use]
    pub const fn contains(self, face: u8) -> bool {
        self.min <= face && face <= self.max
    }
}

impl Default for DiceRange {
    fn default() -> Self {
        Self::new(1, 6)
    }
}

/// Source of die rolls.
pub trait DiceSource {
    /// Rolls one die uniformly within `range`.
    fn roll(&mut self, range: DiceRange) -> u8;
}

impl<R: Rng + ?Sized> DiceSource for R {
    fn roll(&mut self, range: DiceRange) -> u8 {
        self.gen_range(range.min..=range.max)
    }
}

/// How a roll ended for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollResult {
    /// User rolled higher than the bot
    Win,
    /// User rolled lower than the bot
    Loss,
    /// Both rolled the same, stake returned
    Push,
}

/// Both rolls and the resulting change to the user's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    /// The bot's die
    pub bot_roll: u8,
    /// The user's die
    pub user_roll: u8,
    /// Win, loss, or push
    pub result: RollResult,
    /// Net change to the balance: `+bet`, `-bet`, or 0
    pub delta: i64,
}

/// Interprets the amount a user typed for `/roll`.
///
/// Accepts a positive whole number or `all` (any case), which stakes the
/// entire balance.
///
/// # Errors
/// * [`Error::InvalidBet`] - not a positive integer, or `all` with an empty balance
/// * [`Error::InsufficientFunds`] - the amount exceeds `balance`
pub fn parse_bet(input: &str, balance: i64) -> Result<i64> {
    let trimmed = input.trim();

    if trimmed.eq_ignore_ascii_case(ALL_IN) {
        if balance <= 0 {
            return Err(Error::InvalidBet {
                input: input.to_string(),
                reason: "there is nothing to bet",
            });
        }
        return Ok(balance);
    }

    let amount: i64 = trimmed.parse().map_err(|_| Error::InvalidBet {
        input: input.to_string(),
        reason: "enter a whole number or 'all'",
    })?;

    if amount <= 0 {
        return Err(Error::InvalidBet {
            input: input.to_string(),
            reason: "bet must be greater than zero",
        });
    }

    if amount > balance {
        return Err(Error::InsufficientFunds {
            current: balance,
            required: amount,
        });
    }

    Ok(amount)
}

/// Rolls the bot's die, then the user's, and settles `bet_amount`.
pub fn resolve_roll<D>(bet_amount: i64, range: DiceRange, dice: &mut D) -> RollOutcome
where
    D: DiceSource + ?Sized,
{
    let bot_roll = dice.roll(range);
    let user_roll = dice.roll(range);

    let (result, delta) = match user_roll.cmp(&bot_roll) {
        Ordering::Greater => (RollResult::Win, bet_amount),
        Ordering::Less => (RollResult::Loss, -bet_amount),
        Ordering::Equal => (RollResult::Push, 0),
    };

    RollOutcome {
        bot_roll,
        user_roll,
        result,
        delta,
    }
}
