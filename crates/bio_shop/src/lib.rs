//! BioTerror Shop - Upgrades and Economy
//!
//! # Features
//!
//! - Upgrade definitions validated at load time (stat names resolve to `StatId`)
//! - Level-scaled cost curve and per-run upgrade ledger
//! - All-or-nothing purchases against a wallet
//! - Random offers without replacement, rerolls with doubling cost
//!
//! # Example
//!
//! ```ignore
//! use bio_shop::prelude::*;
//!
//! let pool = validate_pool(raw_upgrades)?;
//! let mut shop = UpgradeShop::new(pool, ShopConfig::default());
//! shop.open(&ledger, &mut rng);
//! shop.purchase(0, &mut ledger, &mut wallet, &mut player)?;
//! shop.reroll(&ledger, &mut wallet, &mut rng)?;
//! shop.close()?;
//! ```

pub mod ledger;
pub mod market;
pub mod shop;
pub mod upgrade;

pub mod prelude {
    pub use crate::ledger::{UpgradeLedger, Wallet};
    pub use crate::market::{generate_offers, purchase, Receipt, ShopError};
    pub use crate::shop::{Offer, OfferView, ShopConfig, ShopView, UpgradeShop};
    pub use crate::upgrade::{validate_pool, UpgradeData, UpgradeDefinition, UpgradeError, UpgradeKind};
}

pub use prelude::*;
