//! Persisted player profile
//!
//! Permanent progression that survives sessions: banked currency, stat
//! upgrade levels, and owned/selected companions and auras. The profile is
//! plain serializable data; reading and writing the backing store is the
//! host's job, via the JSON helpers here.

use log::info;
use serde::{Deserialize, Serialize};

use crate::sim::companion::{AuraKind, CompanionKind};

/// Permanent stat upgrade tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeStat {
    Health,
    Attack,
    Defense,
    Lifesteal,
}

impl UpgradeStat {
    fn base_cost(&self) -> u64 {
        match self {
            UpgradeStat::Health => 100,
            UpgradeStat::Attack => 150,
            UpgradeStat::Defense => 200,
            UpgradeStat::Lifesteal => 150,
        }
    }
}

/// The persisted profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub currency: u64,
    pub health_level: u32,
    pub attack_level: u32,
    pub defense_level: u32,
    pub lifesteal_level: u32,
    pub owned_companions: Vec<CompanionKind>,
    pub owned_auras: Vec<AuraKind>,
    pub selected_companion: Option<CompanionKind>,
    pub selected_aura: Option<AuraKind>,
    /// Auto-equip strictly-better drops instead of prompting
    pub auto_equip: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            currency: 0,
            health_level: 0,
            attack_level: 0,
            defense_level: 0,
            lifesteal_level: 0,
            owned_companions: Vec::new(),
            owned_auras: Vec::new(),
            selected_companion: None,
            selected_aura: None,
            auto_equip: true,
        }
    }
}

impl Profile {
    /// Bank currency earned by a finished session.
    pub fn add_currency(&mut self, amount: u64) {
        self.currency += amount;
        info!("profile banked {amount}, balance {}", self.currency);
    }

    /// Spend banked currency. Overdrafts are rejected with the balance
    /// unchanged.
    pub fn spend(&mut self, amount: u64) -> bool {
        if amount > self.currency {
            return false;
        }
        self.currency -= amount;
        true
    }

    pub fn upgrade_level(&self, stat: UpgradeStat) -> u32 {
        match stat {
            UpgradeStat::Health => self.health_level,
            UpgradeStat::Attack => self.attack_level,
            UpgradeStat::Defense => self.defense_level,
            UpgradeStat::Lifesteal => self.lifesteal_level,
        }
    }

    /// Cost of the next level of a stat track: base cost times (level + 1).
    pub fn upgrade_cost(&self, stat: UpgradeStat) -> u64 {
        stat.base_cost() * (self.upgrade_level(stat) as u64 + 1)
    }

    /// Buy one level of a stat track.
    pub fn buy_upgrade(&mut self, stat: UpgradeStat) -> bool {
        if !self.spend(self.upgrade_cost(stat)) {
            return false;
        }
        let level = match stat {
            UpgradeStat::Health => &mut self.health_level,
            UpgradeStat::Attack => &mut self.attack_level,
            UpgradeStat::Defense => &mut self.defense_level,
            UpgradeStat::Lifesteal => &mut self.lifesteal_level,
        };
        *level += 1;
        true
    }

    pub fn owns_companion(&self, kind: CompanionKind) -> bool {
        self.owned_companions.contains(&kind)
    }

    pub fn owns_aura(&self, kind: AuraKind) -> bool {
        self.owned_auras.contains(&kind)
    }

    /// Buy a companion. Duplicates are rejected before any spend.
    pub fn buy_companion(&mut self, kind: CompanionKind) -> bool {
        if self.owns_companion(kind) {
            return false;
        }
        if !self.spend(kind.price()) {
            return false;
        }
        self.owned_companions.push(kind);
        info!("companion purchased: {}", kind.as_str());
        true
    }

    pub fn buy_aura(&mut self, kind: AuraKind) -> bool {
        if self.owns_aura(kind) {
            return false;
        }
        if !self.spend(kind.params().cost) {
            return false;
        }
        self.owned_auras.push(kind);
        info!("aura purchased: {}", kind.as_str());
        true
    }

    /// Select the companion for the next session; `None` deselects.
    /// Selection of an unowned companion is rejected.
    pub fn select_companion(&mut self, kind: Option<CompanionKind>) -> bool {
        if let Some(kind) = kind {
            if !self.owns_companion(kind) {
                return false;
            }
        }
        self.selected_companion = kind;
        true
    }

    pub fn select_aura(&mut self, kind: Option<AuraKind>) -> bool {
        if let Some(kind) = kind {
            if !self.owns_aura(kind) {
                return false;
            }
        }
        self.selected_aura = kind;
        true
    }

    // ---- persistence seam ----

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
