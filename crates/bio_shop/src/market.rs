//! Offer generation and purchases

use crate::ledger::{UpgradeLedger, Wallet};
use crate::upgrade::{UpgradeDefinition, UpgradeKind};
use bio_stats::PlayerStats;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Rejected shop action. Nothing is charged or levelled on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("upgrade {0} is already at max level")]
    MaxLevel(String),
    #[error("not enough currency: need {cost}, have {balance}")]
    InsufficientFunds { cost: u32, balance: u32 },
    #[error("no offer at slot {0}")]
    NoOfferAtSlot(usize),
    #[error("offer at slot {0} already purchased")]
    AlreadyPurchased(usize),
    #[error("no eligible upgrades to offer")]
    NoEligibleUpgrades,
    #[error("shop is not open")]
    NotOpen,
}

/// Completed purchase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    /// Upgrade bought
    pub id: String,
    /// Level after the purchase
    pub level: u32,
    /// Amount charged
    pub cost: u32,
    /// Wallet balance after the purchase
    pub balance: u32,
}

/// Indices into `pool` of upgrades not yet at max level
pub(crate) fn eligible(pool: &[UpgradeDefinition], ledger: &UpgradeLedger) -> Vec<usize> {
    pool.iter()
        .enumerate()
        .filter(|(_, def)| ledger.level(def.id()) < def.max_level())
        .map(|(i, _)| i)
        .collect()
}

/// Up to `n` distinct indices drawn from the eligible upgrades
pub(crate) fn draw_offers(pool: &[UpgradeDefinition], ledger: &UpgradeLedger, n: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut candidates = eligible(pool, ledger);
    let count = n.min(candidates.len());
    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let pick = rng.gen_range(0..candidates.len());
        chosen.push(candidates.remove(pick));
    }
    log::debug!("Generated {} offers from {} upgrades", chosen.len(), pool.len());
    chosen
}

/// Draw up to `n` upgrades without replacement, skipping maxed ones.
/// Returns fewer when fewer are eligible.
pub fn generate_offers<'a>(
    pool: &'a [UpgradeDefinition],
    ledger: &UpgradeLedger,
    n: usize,
    rng: &mut impl Rng,
) -> Vec<&'a UpgradeDefinition> {
    draw_offers(pool, ledger, n, rng)
        .into_iter()
        .map(|i| &pool[i])
        .collect()
}

/// Buy the next level of `def`.
///
/// Charges `def.cost(level)`, raises the ledger level by one and applies
/// the stat delta for stat boosts.
pub fn purchase(
    def: &UpgradeDefinition,
    ledger: &mut UpgradeLedger,
    wallet: &mut Wallet,
    player: &mut PlayerStats,
) -> Result<Receipt, ShopError> {
    let current = ledger.level(def.id());
    if current >= def.max_level() {
        log::debug!("Purchase of {} rejected: max level", def.id());
        return Err(ShopError::MaxLevel(def.id().to_string()));
    }
    let cost = def.cost(current);
    log::info!("Attempting to purchase {} (Level {}) for {} currency.", def.display_name(), current + 1, cost);
    let balance = wallet.try_spend(cost)?;
    let level = ledger.increment(def.id());

    match (def.kind(), def.target()) {
        (UpgradeKind::StatBoost, Some(stat)) => {
            let value = player.apply_delta(stat, def.value_per_level(), def.is_percentage());
            log::info!("Applied {}: {} is now {}", def.id(), stat, value);
        }
        (kind, _) => log::debug!("{:?} {} levelled to {}", kind, def.id(), level),
    }

    Ok(Receipt {
        id: def.id().to_string(),
        level,
        cost,
        balance,
    })
}
