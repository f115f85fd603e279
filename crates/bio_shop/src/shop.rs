//! The between-wave shop session

use crate::ledger::{UpgradeLedger, Wallet};
use crate::market::{draw_offers, eligible, purchase, Receipt, ShopError};
use crate::upgrade::{UpgradeDefinition, UpgradeKind};
use bio_stats::PlayerStats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shop tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Offers per roll
    pub number_of_choices: usize,
    /// Reroll price each time the shop opens
    pub base_reroll_cost: u32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            number_of_choices: 3,
            base_reroll_cost: 10,
        }
    }
}

/// One offer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer {
    /// Index into the shop's pool
    pub upgrade: usize,
    /// Bought during this roll
    pub purchased: bool,
}

/// Read-only offer data for the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferView {
    /// Slot index to pass to `purchase`
    pub slot: usize,
    /// Upgrade identifier
    pub id: String,
    pub display_name: String,
    pub description: String,
    /// Stat or weapon upgrade
    pub kind: UpgradeKind,
    /// Level the purchase would reach
    pub next_level: u32,
    /// Price of the next level
    pub cost: u32,
    /// Already bought this roll
    pub purchased: bool,
    /// Whether buying is possible right now
    pub available: bool,
}

/// Read-only shop data for the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView {
    /// Whether the shop is open
    pub open: bool,
    /// Wallet balance
    pub balance: u32,
    /// Price of the next reroll
    pub reroll_cost: u32,
    /// Open and affordable
    pub can_reroll: bool,
    /// Current offers, in slot order
    pub offers: Vec<OfferView>,
}

/// Shop state: open flag, current offers and reroll price
#[derive(Debug)]
pub struct UpgradeShop {
    pool: Vec<UpgradeDefinition>,
    config: ShopConfig,
    offers: Vec<Offer>,
    reroll_cost: u32,
    open: bool,
}

impl UpgradeShop {
    /// Create a closed shop over a validated pool
    pub fn new(pool: Vec<UpgradeDefinition>, config: ShopConfig) -> Self {
        if pool.is_empty() {
            log::warn!("Upgrade pool is empty; the shop will offer nothing");
        }
        Self {
            reroll_cost: config.base_reroll_cost,
            pool,
            config,
            offers: Vec::new(),
            open: false,
        }
    }

    /// Whether the shop is open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Price of the next reroll
    pub fn reroll_cost(&self) -> u32 {
        self.reroll_cost
    }

    /// Every upgrade the shop can offer
    pub fn pool(&self) -> &[UpgradeDefinition] {
        &self.pool
    }

    /// Shop tunables
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Current offer slots
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Definition offered at `slot`
    pub fn offer_definition(&self, slot: usize) -> Option<&UpgradeDefinition> {
        self.offers.get(slot).map(|o| &self.pool[o.upgrade])
    }

    fn roll(&mut self, ledger: &UpgradeLedger, rng: &mut impl Rng) {
        self.offers = draw_offers(&self.pool, ledger, self.config.number_of_choices, rng)
            .into_iter()
            .map(|upgrade| Offer {
                upgrade,
                purchased: false,
            })
            .collect();
        if self.offers.is_empty() {
            log::warn!("No eligible upgrades to offer");
        }
    }

    /// Open the shop: reset the reroll price and roll fresh offers
    pub fn open(&mut self, ledger: &UpgradeLedger, rng: &mut impl Rng) {
        self.reroll_cost = self.config.base_reroll_cost;
        self.roll(ledger, rng);
        self.open = true;
        log::info!("Ingame Shop Opened.");
    }

    /// Buy the offer at `slot`. A slot can be bought once per roll.
    pub fn purchase(
        &mut self,
        slot: usize,
        ledger: &mut UpgradeLedger,
        wallet: &mut Wallet,
        player: &mut PlayerStats,
    ) -> Result<Receipt, ShopError> {
        if !self.open {
            return Err(ShopError::NotOpen);
        }
        let offer = self.offers.get(slot).copied().ok_or(ShopError::NoOfferAtSlot(slot))?;
        if offer.purchased {
            return Err(ShopError::AlreadyPurchased(slot));
        }
        let receipt = purchase(&self.pool[offer.upgrade], ledger, wallet, player)?;
        self.offers[slot].purchased = true;
        log::info!("Purchase successful: {}", receipt.id);
        Ok(receipt)
    }

    /// Pay the reroll price, double it and roll fresh offers. Returns the
    /// amount paid.
    ///
    /// With every upgrade maxed this fails with
    /// [`ShopError::NoEligibleUpgrades`] and charges nothing. Purchases
    /// against the resulting empty offer list report
    /// [`ShopError::NoOfferAtSlot`] instead.
    pub fn reroll(&mut self, ledger: &UpgradeLedger, wallet: &mut Wallet, rng: &mut impl Rng) -> Result<u32, ShopError> {
        if !self.open {
            return Err(ShopError::NotOpen);
        }
        if eligible(&self.pool, ledger).is_empty() {
            return Err(ShopError::NoEligibleUpgrades);
        }
        let paid = self.reroll_cost;
        wallet.try_spend(paid)?;
        self.reroll_cost = self.reroll_cost.saturating_mul(2);
        self.roll(ledger, rng);
        log::info!("Reroll successful. Next reroll cost: {}", self.reroll_cost);
        Ok(paid)
    }

    /// Close the shop. Closing twice is rejected.
    pub fn close(&mut self) -> Result<(), ShopError> {
        if !self.open {
            log::warn!("Shop close requested while closed. Ignoring.");
            return Err(ShopError::NotOpen);
        }
        self.open = false;
        self.offers.clear();
        log::info!("Ingame Shop Closed.");
        Ok(())
    }

    /// Snapshot for the UI
    pub fn view(&self, ledger: &UpgradeLedger, wallet: &Wallet) -> ShopView {
        let offers = self
            .offers
            .iter()
            .enumerate()
            .map(|(slot, offer)| {
                let def = &self.pool[offer.upgrade];
                let level = ledger.level(def.id());
                let cost = def.cost(level);
                OfferView {
                    slot,
                    id: def.id().to_string(),
                    display_name: def.display_name().to_string(),
                    description: def.describe(level + 1),
                    kind: def.kind(),
                    next_level: level + 1,
                    cost,
                    purchased: offer.purchased,
                    available: self.open
                        && !offer.purchased
                        && level < def.max_level()
                        && wallet.can_afford(cost),
                }
            })
            .collect();
        ShopView {
            open: self.open,
            balance: wallet.balance(),
            reroll_cost: self.reroll_cost,
            can_reroll: self.open && wallet.can_afford(self.reroll_cost),
            offers,
        }
    }
}
