//! Per-run upgrade levels and currency

use crate::market::ShopError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Acquired level per upgrade id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeLedger {
    levels: HashMap<String, u32>,
}

impl UpgradeLedger {
    /// Empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Level owned for `id` (0 if never bought)
    pub fn level(&self, id: &str) -> u32 {
        self.levels.get(id).copied().unwrap_or(0)
    }

    /// Add one level; returns the new level
    pub fn increment(&mut self, id: &str) -> u32 {
        let level = self.levels.entry(id.to_string()).or_insert(0);
        *level += 1;
        *level
    }

    /// Forget everything (new run)
    pub fn reset(&mut self) {
        self.levels.clear();
    }

    /// Owned upgrades
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.levels.iter().map(|(id, level)| (id.as_str(), *level))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// In-run currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balance: u32,
}

impl Wallet {
    /// Wallet holding `balance`
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// Add currency; returns the new balance
    pub fn add(&mut self, amount: u32) -> u32 {
        self.balance = self.balance.saturating_add(amount);
        log::debug!("Gained {} currency. Total: {}", amount, self.balance);
        self.balance
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Spend `cost` or leave the balance untouched
    pub fn try_spend(&mut self, cost: u32) -> Result<u32, ShopError> {
        if !self.can_afford(cost) {
            return Err(ShopError::InsufficientFunds {
                cost,
                balance: self.balance,
            });
        }
        self.balance -= cost;
        log::debug!("Spent {} currency. Remaining: {}", cost, self.balance);
        Ok(self.balance)
    }

    /// Empty the wallet (new run)
    pub fn reset(&mut self) {
        self.balance = 0;
    }
}
