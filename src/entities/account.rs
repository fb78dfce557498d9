//! Account entity - One row per Discord user holding their currency balance.
//!
//! Rows are created on a user's first interaction with a zero balance and are
//! never deleted. The daily claim timestamp is absent until the first claim.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Discord user ID, also the primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Current balance, never negative
    pub balance: i64,
    /// When the daily reward was last claimed, None before the first claim
    pub last_daily_claim: Option<DateTimeUtc>,
    /// Lifetime sum of daily rewards
    pub total_earned: i64,
}

/// Accounts are independent and have no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
