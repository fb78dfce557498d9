//! Ledger business logic - account storage, daily claims, and settlement.
//!
//! The pure rules ([`can_claim_daily`], [`claim_daily`], [`settle`]) decide
//! what a new account state looks like. [`Ledger`] wraps them with storage:
//! every mutation takes the account's lock, loads the row inside a database
//! transaction, applies a rule, writes the result, and commits before the lock
//! is released.

use crate::{
    core::{
        locks::AccountLocks,
        wager::{self, DiceRange, DiceSource, RollOutcome},
    },
    entities::{Account, AccountColumn, AccountModel, account},
    errors::{Error, Result},
};
use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::{ActiveValue::Unchanged, Set, TransactionTrait, prelude::*, sea_query::OnConflict};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Returns true if the daily reward can be claimed at `now`.
///
/// An account that never claimed can always claim. Otherwise at least
/// `cooldown` must have passed since the last claim.
#[must_use]
pub fn can_claim_daily(account: &AccountModel, now: DateTime<Utc>, cooldown: TimeDelta) -> bool {
    account
        .last_daily_claim
        .is_none_or(|last| now - last >= cooldown)
}

/// Earliest moment of the next daily claim, None if the account never claimed.
///
/// Saturates at the latest representable time when the cooldown reaches past it.
#[must_use]
pub fn next_daily_claim(account: &AccountModel, cooldown: TimeDelta) -> Option<DateTime<Utc>> {
    account
        .last_daily_claim
        .map(|last| last.checked_add_signed(cooldown).unwrap_or(DateTime::<Utc>::MAX_UTC))
}

/// Grants the daily reward to `account`.
///
/// # Errors
/// * [`Error::CooldownActive`] - the last claim is younger than `cooldown`
/// * [`Error::BalanceOverflow`] - the reward does not fit in the balance
pub fn claim_daily(
    mut account: AccountModel,
    reward: i64,
    now: DateTime<Utc>,
    cooldown: TimeDelta,
) -> Result<AccountModel> {
    if !can_claim_daily(&account, now, cooldown) {
        return Err(Error::CooldownActive {
            available_at: next_daily_claim(&account, cooldown).unwrap_or(now),
        });
    }

    account.balance = account
        .balance
        .checked_add(reward)
        .ok_or(Error::BalanceOverflow)?;
    account.total_earned = account
        .total_earned
        .checked_add(reward)
        .ok_or(Error::BalanceOverflow)?;
    account.last_daily_claim = Some(now);
    Ok(account)
}

/// Adds `delta` to the balance of `account`.
///
/// # Errors
/// * [`Error::InsufficientFunds`] - the balance would drop below zero
/// * [`Error::BalanceOverflow`] - the result does not fit in the balance
pub fn settle(mut account: AccountModel, delta: i64) -> Result<AccountModel> {
    let new_balance = account
        .balance
        .checked_add(delta)
        .ok_or(Error::BalanceOverflow)?;

    if new_balance < 0 {
        return Err(Error::InsufficientFunds {
            current: account.balance,
            required: delta.saturating_neg(),
        });
    }

    account.balance = new_balance;
    Ok(account)
}

/// Result of a settled `/roll`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollReceipt {
    /// Amount that was staked
    pub bet: i64,
    /// Both rolls and the balance change
    pub outcome: RollOutcome,
    /// Account after settlement
    pub account: AccountModel,
}

/// Account store shared by all command handlers.
///
/// Cloning is cheap; clones share the connection pool and the lock registry.
#[derive(Debug, Clone)]
pub struct Ledger {
    db: DatabaseConnection,
    locks: Arc<AccountLocks>,
}

impl Ledger {
    /// Creates a ledger on top of an initialised database.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            locks: Arc::new(AccountLocks::new()),
        }
    }

    /// Underlying database connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Looks up an account without creating it.
    pub async fn find(&self, user_id: &str) -> Result<Option<AccountModel>> {
        Account::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Returns the user's account, creating an empty one on first contact.
    #[instrument(skip(self))]
    pub async fn get_or_create(&self, user_id: &str) -> Result<AccountModel> {
        find_or_insert(&self.db, user_id).await
    }

    /// Claims the daily reward for `user_id` at `now`.
    #[instrument(skip(self))]
    pub async fn apply_daily(
        &self,
        user_id: &str,
        reward: i64,
        cooldown: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<AccountModel> {
        let _guard = self.locks.lock(user_id).await;
        let txn = self.db.begin().await?;

        let account = find_or_insert(&txn, user_id).await?;
        let updated = claim_daily(account, reward, now, cooldown)?;
        let saved = save(&txn, updated).await?;

        txn.commit().await?;
        info!(balance = saved.balance, "Daily reward of {} claimed", reward);
        Ok(saved)
    }

    /// Adds `delta` (negative to withdraw) to the balance of `user_id`.
    #[instrument(skip(self))]
    pub async fn apply_delta(&self, user_id: &str, delta: i64) -> Result<AccountModel> {
        let _guard = self.locks.lock(user_id).await;
        let txn = self.db.begin().await?;

        let account = find_or_insert(&txn, user_id).await?;
        let updated = settle(account, delta)?;
        let saved = save(&txn, updated).await?;

        txn.commit().await?;
        debug!(balance = saved.balance, "Applied delta {}", delta);
        Ok(saved)
    }

    /// Parses a bet, rolls the dice, and settles the result for `user_id`.
    ///
    /// The balance is read and written under a single account lock, so two
    /// overlapping rolls can never stake the same funds.
    #[instrument(skip(self, dice))]
    pub async fn roll<D>(
        &self,
        user_id: &str,
        input: &str,
        range: DiceRange,
        dice: &mut D,
    ) -> Result<RollReceipt>
    where
        D: DiceSource + ?Sized,
    {
        let _guard = self.locks.lock(user_id).await;
        let txn = self.db.begin().await?;

        let account = find_or_insert(&txn, user_id).await?;
        let bet = wager::parse_bet(input, account.balance)?;
        let outcome = wager::resolve_roll(bet, range, dice);
        let updated = settle(account, outcome.delta)?;
        let saved = save(&txn, updated).await?;

        txn.commit().await?;
        info!(
            bet,
            bot_roll = outcome.bot_roll,
            user_roll = outcome.user_roll,
            balance = saved.balance,
            "Roll settled as {:?}",
            outcome.result
        );
        Ok(RollReceipt {
            bet,
            outcome,
            account: saved,
        })
    }
}

/// Loads an account, inserting a zero-balance row if there is none.
///
/// The insert ignores conflicts so two racing first contacts end up reading
/// the same row.
async fn find_or_insert<C>(db: &C, user_id: &str) -> Result<AccountModel>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Account::find_by_id(user_id).one(db).await? {
        return Ok(existing);
    }

    let fresh = account::ActiveModel {
        user_id: Set(user_id.to_string()),
        balance: Set(0),
        last_daily_claim: Set(None),
        total_earned: Set(0),
    };

    Account::insert(fresh)
        .on_conflict(
            OnConflict::column(AccountColumn::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    debug!("Created account for {}", user_id);

    Account::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            user_id: user_id.to_string(),
        })
}

/// Writes every mutable column of `account`.
async fn save<C>(db: &C, account: AccountModel) -> Result<AccountModel>
where
    C: ConnectionTrait,
{
    let active = account::ActiveModel {
        user_id: Unchanged(account.user_id),
        balance: Set(account.balance),
        last_daily_claim: Set(account.last_daily_claim),
        total_earned: Set(account.total_earned),
    };
    active.update(db).await.map_err(Into::into)
}
