//! Cash accounts and atomic balance mutation.
//!
//! Every balance change runs inside the per-account exclusive guard of
//! the backing map, so concurrent debits and credits serialize per
//! account and the overdraft check sees the balance it mutates.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleetpay_shared::config::OverdraftPolicy;

use crate::error::EngineError;

/// A named cash account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashAccount {
    /// Unique identifier.
    pub id: Uuid,
    /// Human-readable account name, unique across the ledger.
    pub name: String,
    /// Current balance.
    pub balance: Decimal,
}

/// The ledger of cash accounts.
#[derive(Debug, Default)]
pub struct CashAccountLedger {
    accounts: DashMap<Uuid, CashAccount>,
    names: DashMap<String, Uuid>,
}

impl CashAccountLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account with an opening balance.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::DuplicateAccountName` if the name is taken.
    pub fn create(&self, name: &str, opening_balance: Decimal) -> Result<CashAccount, EngineError> {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(_) => Err(EngineError::DuplicateAccountName(name.to_string())),
            Entry::Vacant(slot) => {
                let account = CashAccount {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    balance: opening_balance,
                };
                self.accounts.insert(account.id, account.clone());
                slot.insert(account.id);
                Ok(account)
            }
        }
    }

    /// Returns a snapshot of the account, if it exists.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<CashAccount> {
        self.accounts.get(&id).map(|a| a.value().clone())
    }

    /// Looks an account up by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CashAccount> {
        let id = *self.names.get(name)?;
        self.get(id)
    }

    /// Returns snapshots of all accounts, ordered by name.
    #[must_use]
    pub fn list(&self) -> Vec<CashAccount> {
        let mut accounts: Vec<CashAccount> =
            self.accounts.iter().map(|a| a.value().clone()).collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        accounts
    }

    /// Debits the account, returning the new balance.
    ///
    /// Under [`OverdraftPolicy::Reject`] the debit is refused if it
    /// would drive the balance below zero; under
    /// [`OverdraftPolicy::Allow`] the balance goes negative.
    ///
    /// # Errors
    ///
    /// * `EngineError::AccountNotFound` if the account does not exist
    /// * `EngineError::Overdraft` if the policy refuses the debit
    pub fn debit(
        &self,
        id: Uuid,
        amount: Decimal,
        policy: OverdraftPolicy,
    ) -> Result<Decimal, EngineError> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(EngineError::AccountNotFound(id))?;
        let next = account.balance - amount;
        if policy == OverdraftPolicy::Reject && next < Decimal::ZERO {
            return Err(EngineError::Overdraft {
                account_id: id,
                balance: account.balance,
                requested: amount,
            });
        }
        account.balance = next;
        Ok(next)
    }

    /// Credits the account, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::AccountNotFound` if the account does not
    /// exist.
    pub fn credit(&self, id: Uuid, amount: Decimal) -> Result<Decimal, EngineError> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(EngineError::AccountNotFound(id))?;
        account.balance += amount;
        Ok(account.balance)
    }

    /// Credits the named account, creating it with a zero opening
    /// balance on first use. Returns a snapshot after the credit.
    pub fn credit_by_name(&self, name: &str, amount: Decimal) -> CashAccount {
        let id = *self
            .names
            .entry(name.to_string())
            .or_insert_with(Uuid::new_v4);
        let mut account = self.accounts.entry(id).or_insert_with(|| CashAccount {
            id,
            name: name.to_string(),
            balance: Decimal::ZERO,
        });
        account.balance += amount;
        account.value().clone()
    }
}
