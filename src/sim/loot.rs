//! Loot and progression
//!
//! Kill rewards: experience and currency scale linearly with hostile level
//! (boss tier pays 5x base), plus a gated equipment roll: drop-chance gate,
//! tier-specific weighted quality draw, uniform slot choice, fixed stat step
//! per quality.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::weighted::WeightedTable;

/// Ordered equipment rarity. Ordering drives the strictly-better equip gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quality {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Common => "common",
            Quality::Uncommon => "uncommon",
            Quality::Rare => "rare",
            Quality::Epic => "epic",
            Quality::Legendary => "legendary",
        }
    }

    /// Orbiting weapon copies granted by a weapon of this quality
    pub fn weapon_copies(&self) -> u32 {
        match self {
            Quality::Common => 1,
            Quality::Uncommon => 2,
            Quality::Rare => 3,
            Quality::Epic => 4,
            Quality::Legendary => 5,
        }
    }

    fn step(&self) -> usize {
        *self as usize
    }
}

/// Equipment slots on the Character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Chest,
    Ring,
    Boots,
}

pub const ALL_SLOTS: [EquipSlot; 4] = [
    EquipSlot::Weapon,
    EquipSlot::Chest,
    EquipSlot::Ring,
    EquipSlot::Boots,
];

/// A generated equipment item. Immutable once rolled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub slot: EquipSlot,
    pub quality: Quality,
}

impl EquipmentItem {
    pub fn new(slot: EquipSlot, quality: Quality) -> Self {
        Self { slot, quality }
    }

    /// Slot-specific stat bonus, a fixed step function of quality.
    pub fn stat_bonus(&self) -> f32 {
        let q = self.quality.step();
        match self.slot {
            EquipSlot::Weapon => [10.0, 20.0, 30.0, 40.0, 50.0][q],
            EquipSlot::Chest => [5.0, 10.0, 15.0, 20.0, 25.0][q],
            // Ring bonus is a lifesteal percentage
            EquipSlot::Ring => [2.0, 5.0, 8.0, 12.0, 15.0][q],
            EquipSlot::Boots => [10.0, 20.0, 30.0, 40.0, 50.0][q],
        }
    }

    /// Ring lifesteal expressed as a fraction of raw damage
    pub fn lifesteal_fraction(&self) -> f32 {
        debug_assert_eq!(self.slot, EquipSlot::Ring);
        self.stat_bonus() / 100.0
    }
}

/// Reward tier of the defeated hostile, selecting the drop gate and quality table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardTier {
    Normal,
    Elite,
    SuperElite,
}

impl RewardTier {
    fn drop_chance(&self) -> f32 {
        match self {
            RewardTier::Normal => 0.3,
            RewardTier::Elite => 0.7,
            RewardTier::SuperElite => 1.0,
        }
    }

    fn quality_table(&self) -> WeightedTable<Quality> {
        let entries: &[(Quality, f32)] = match self {
            RewardTier::Normal => &[
                (Quality::Common, 0.6),
                (Quality::Uncommon, 0.25),
                (Quality::Rare, 0.1),
                (Quality::Epic, 0.05),
            ],
            RewardTier::Elite => &[
                (Quality::Uncommon, 0.6),
                (Quality::Rare, 0.3),
                (Quality::Epic, 0.1),
            ],
            // Super-elites always drop high tier
            RewardTier::SuperElite => &[(Quality::Epic, 0.99), (Quality::Legendary, 0.01)],
        };
        match WeightedTable::new(entries.iter().copied()) {
            Some(table) => table,
            None => unreachable!("quality tables always have positive weight"),
        }
    }

    fn is_boss(&self) -> bool {
        !matches!(self, RewardTier::Normal)
    }
}

/// The rewards produced by one kill.
#[derive(Debug, Clone)]
pub struct LootDrop {
    pub experience: u64,
    pub currency: u64,
    pub equipment: Option<EquipmentItem>,
}

/// Roll the full kill reward for a hostile of the given level and tier.
pub fn roll_loot<R: Rng>(rng: &mut R, level: u32, tier: RewardTier) -> LootDrop {
    let (base_exp, base_currency) = if tier.is_boss() { (50, 100) } else { (10, 20) };
    let level = level.max(1) as u64;

    let equipment = if rng.random::<f32>() < tier.drop_chance() {
        let quality = tier.quality_table().sample(rng);
        let slot = ALL_SLOTS[rng.random_range(0..ALL_SLOTS.len())];
        Some(EquipmentItem::new(slot, quality))
    } else {
        None
    };

    LootDrop {
        experience: base_exp * level,
        currency: base_currency * level,
        equipment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_quality_ordering() {
        assert!(Quality::Legendary > Quality::Epic);
        assert!(Quality::Uncommon > Quality::Common);
        assert!(Quality::Rare < Quality::Epic);
    }

    #[test]
    fn test_normal_quality_draw_boundary() {
        // {common .6, uncommon .25, rare .1, epic .05} with draw 0.61 → uncommon
        let table = RewardTier::Normal.quality_table();
        assert_eq!(table.select(0.61), Quality::Uncommon);
        assert_eq!(table.select(0.59), Quality::Common);
        assert_eq!(table.select(0.86), Quality::Rare);
        assert_eq!(table.select(0.96), Quality::Epic);
    }

    #[test]
    fn test_rewards_scale_with_level() {
        let mut rng = Pcg32::seed_from_u64(7);
        let drop = roll_loot(&mut rng, 3, RewardTier::Normal);
        assert_eq!(drop.experience, 30);
        assert_eq!(drop.currency, 60);

        let drop = roll_loot(&mut rng, 3, RewardTier::Elite);
        assert_eq!(drop.experience, 150);
        assert_eq!(drop.currency, 300);
    }

    #[test]
    fn test_super_elite_always_drops_high_tier() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            let drop = roll_loot(&mut rng, 1, RewardTier::SuperElite);
            let item = drop.equipment.expect("super-elite drop is guaranteed");
            assert!(item.quality >= Quality::Epic);
        }
    }

    #[test]
    fn test_zero_level_clamped() {
        let mut rng = Pcg32::seed_from_u64(1);
        let drop = roll_loot(&mut rng, 0, RewardTier::Normal);
        assert_eq!(drop.experience, 10);
    }

    #[test]
    fn test_stat_steps() {
        assert_eq!(EquipmentItem::new(EquipSlot::Weapon, Quality::Common).stat_bonus(), 10.0);
        assert_eq!(EquipmentItem::new(EquipSlot::Weapon, Quality::Legendary).stat_bonus(), 50.0);
        assert_eq!(EquipmentItem::new(EquipSlot::Chest, Quality::Rare).stat_bonus(), 15.0);
        let ring = EquipmentItem::new(EquipSlot::Ring, Quality::Epic);
        assert!((ring.lifesteal_fraction() - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_weapon_copies() {
        assert_eq!(Quality::Common.weapon_copies(), 1);
        assert_eq!(Quality::Legendary.weapon_copies(), 5);
    }
}
