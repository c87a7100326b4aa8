//! The player-controlled Character
//!
//! Owns the ability kit, status effects, equipment, and in-session
//! progression. Effective stats are recomputed from the profile-applied base
//! whenever equipment or the Empower buff changes, so modifiers never stack
//! by accident.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::direction_or_zero;

use super::loot::{EquipSlot, EquipmentItem, Quality};
use super::projectile::{Bolt, Faction};
use super::status::{StatusKind, StatusSet};

/// Parameter validation for ability and companion definitions.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("cost must be non-negative, got {0}")]
    NegativeCost(i64),
    #[error("damage must be non-negative, got {0}")]
    NegativeDamage(f32),
    #[error("range must be non-negative, got {0}")]
    NegativeRange(f32),
}

/// Static parameters of one ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityParams {
    pub cost: u64,
    pub cooldown: f32,
    pub damage: f32,
    pub range: f32,
}

impl AbilityParams {
    pub fn new(cost: i64, cooldown: f32, damage: f32, range: f32) -> Result<Self, ParamError> {
        if cost < 0 {
            return Err(ParamError::NegativeCost(cost));
        }
        if damage < 0.0 {
            return Err(ParamError::NegativeDamage(damage));
        }
        if range < 0.0 {
            return Err(ParamError::NegativeRange(range));
        }
        Ok(Self { cost: cost as u64, cooldown, damage, range })
    }
}

/// Purchasable active abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    /// 8 radial bolts
    Burst,
    /// Forward freezing wave
    Wave,
    /// Timed self-buff
    Empower,
}

pub const ALL_ABILITIES: [Ability; 3] = [Ability::Burst, Ability::Wave, Ability::Empower];

impl Ability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Burst => "burst",
            Ability::Wave => "wave",
            Ability::Empower => "empower",
        }
    }

    pub fn params(&self) -> AbilityParams {
        // Validated parameters; the definitions here are all in range
        let params = match self {
            Ability::Burst => AbilityParams::new(100, 5.0, 50.0, 0.0),
            Ability::Wave => AbilityParams::new(150, 8.0, 30.0, 400.0),
            Ability::Empower => AbilityParams::new(200, 15.0, 0.0, 0.0),
        };
        match params {
            Ok(s) => s,
            Err(_) => unreachable!("built-in ability parameters are valid"),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

pub const BURST_BOLT_COUNT: u32 = 8;
pub const BURST_BOLT_SPEED: f32 = 400.0;
pub const BURST_BOLT_RADIUS: f32 = 15.0;
pub const WAVE_HALF_WIDTH: f32 = 30.0;
pub const WAVE_FREEZE: f32 = 2.0;
pub const EMPOWER_DURATION: f32 = 10.0;

/// Result of a successful cast, committed by the orchestrator.
#[derive(Debug)]
pub enum AbilityCast {
    Burst { bolts: Vec<Bolt> },
    /// Band sweep resolved against all hostiles in range this tick
    Wave { origin: Vec2, dir: Vec2, damage: f32, range: f32, half_width: f32, freeze: f32 },
    Empower,
}

/// Outcome of offering a dropped or purchased item to the Character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    /// Strictly better and equipped in place
    Equipped,
    /// Strictly better but parked for a replacement prompt
    Prompt,
    /// Not an upgrade; discarded
    Rejected,
}

fn slot_index(slot: EquipSlot) -> usize {
    match slot {
        EquipSlot::Weapon => 0,
        EquipSlot::Chest => 1,
        EquipSlot::Ring => 2,
        EquipSlot::Boots => 3,
    }
}

/// The player entity and its in-session progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
    /// Fraction of raw dealt damage returned as healing
    pub lifesteal: f32,
    pub statuses: StatusSet,
    /// Session level and experience
    pub level: u32,
    pub experience: u64,
    pub next_level_exp: u64,
    /// Currency earned this session (spendable in the shop, banked at end)
    pub currency: u64,
    /// Orbiting weapon phase
    pub weapon_angle: f32,
    pub auto_equip: bool,
    pub pending_equipment: Option<EquipmentItem>,
    equipment: [Option<EquipmentItem>; 4],
    learned: [bool; 3],
    cooldowns: [f32; 3],
    // Profile-applied base stats, before equipment and buffs
    base_max_health: f32,
    base_attack: f32,
    base_defense: f32,
    base_speed: f32,
    base_lifesteal: f32,
    // Accumulated level-up bonuses
    level_health_bonus: f32,
    level_attack_bonus: f32,
    empower_applied: bool,
}

impl Character {
    /// A fresh Character at the arena center with profile upgrades applied.
    /// Upgrade steps: +20 health, +5 attack, +2 defense, +0.05 lifesteal per level.
    pub fn new(health_lvl: u32, attack_lvl: u32, defense_lvl: u32, lifesteal_lvl: u32) -> Self {
        let base_max_health = CHARACTER_BASE_HEALTH + 20.0 * health_lvl as f32;
        let base_attack = CHARACTER_BASE_ATTACK + 5.0 * attack_lvl as f32;
        let base_defense = 2.0 * defense_lvl as f32;
        let base_speed = CHARACTER_BASE_SPEED;
        let base_lifesteal = 0.05 * lifesteal_lvl as f32;

        let mut c = Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            radius: CHARACTER_RADIUS,
            health: 0.0,
            max_health: 0.0,
            attack: 0.0,
            defense: 0.0,
            speed: 0.0,
            lifesteal: 0.0,
            statuses: StatusSet::default(),
            level: 1,
            experience: 0,
            next_level_exp: 100,
            currency: 0,
            weapon_angle: 0.0,
            auto_equip: true,
            pending_equipment: None,
            equipment: [None; 4],
            learned: [false; 3],
            cooldowns: [0.0; 3],
            base_max_health,
            base_attack,
            base_defense,
            base_speed,
            base_lifesteal,
            level_health_bonus: 0.0,
            level_attack_bonus: 0.0,
            empower_applied: false,
        };
        c.recompute_stats();
        c.health = c.max_health;
        c
    }

    /// Recompute effective stats from base + level bonuses + equipment,
    /// then the Empower multiplier. Health is clamped by the caller when the
    /// max can shrink.
    fn recompute_stats(&mut self) {
        let mut max_health = self.base_max_health + self.level_health_bonus;
        let mut attack = self.base_attack + self.level_attack_bonus;
        let mut defense = self.base_defense;
        let mut speed = self.base_speed;
        let mut lifesteal = self.base_lifesteal;

        if let Some(item) = self.equipment[slot_index(EquipSlot::Weapon)] {
            attack += item.stat_bonus();
        }
        if let Some(item) = self.equipment[slot_index(EquipSlot::Chest)] {
            defense += item.stat_bonus();
        }
        if let Some(item) = self.equipment[slot_index(EquipSlot::Ring)] {
            lifesteal += item.lifesteal_fraction();
        }
        if let Some(item) = self.equipment[slot_index(EquipSlot::Boots)] {
            speed += item.stat_bonus();
        }

        if self.statuses.is_active(StatusKind::Empowered) {
            attack *= 2.0;
            max_health *= 1.5;
            speed *= 1.5;
        }

        self.max_health = max_health;
        self.attack = attack;
        self.defense = defense;
        self.speed = speed;
        self.lifesteal = lifesteal;
    }

    /// Per-tick upkeep: status decay, cooldowns, movement toward the aim
    /// point, weapon orbit.
    pub fn update(&mut self, dt: f32, aim: Vec2) {
        self.statuses.tick(dt);
        if self.empower_applied && !self.statuses.is_active(StatusKind::Empowered) {
            // Buff expired: stats revert, health clamps to the smaller max
            self.empower_applied = false;
            self.recompute_stats();
            self.health = self.health.min(self.max_health);
        }

        for cd in &mut self.cooldowns {
            *cd = (*cd - dt).max(0.0);
        }

        let offset = aim - self.pos;
        if offset.length() > AIM_DEADZONE {
            let step = self.speed * self.statuses.character_speed_factor() * dt;
            // Don't overshoot the aim point
            let step = step.min(offset.length());
            self.pos += direction_or_zero(offset) * step;
            self.pos.x = self.pos.x.clamp(self.radius, ARENA_WIDTH - self.radius);
            self.pos.y = self.pos.y.clamp(self.radius, ARENA_HEIGHT - self.radius);
        }

        self.weapon_angle = (self.weapon_angle + WEAPON_ANGULAR_SPEED * dt)
            % std::f32::consts::TAU;
    }

    pub fn is_downed(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply raw damage through defense. Returns the health actually removed.
    pub fn take_damage(&mut self, raw: f32) -> f32 {
        let actual = super::combat::resolve_damage(raw, self.defense).min(self.health);
        self.health -= actual;
        actual
    }

    /// Heal, clamped at max health.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Lifesteal return for a hit that dealt `raw` pre-defense damage.
    pub fn apply_lifesteal(&mut self, raw: f32) {
        let heal = super::combat::lifesteal_heal(raw, self.lifesteal);
        if heal > 0.0 {
            self.heal(heal);
        }
    }

    /// Grant experience, cascading level-ups. Each level multiplies the
    /// threshold by 1.5 and grants +20 max health (with full refill) and
    /// +5 attack. Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u64) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        while self.experience >= self.next_level_exp {
            self.experience -= self.next_level_exp;
            self.next_level_exp = (self.next_level_exp as f64 * 1.5) as u64;
            self.level += 1;
            self.level_health_bonus += 20.0;
            self.level_attack_bonus += 5.0;
            self.recompute_stats();
            self.health = self.max_health;
            gained += 1;
        }
        gained
    }

    // ---- abilities ----

    pub fn knows(&self, ability: Ability) -> bool {
        self.learned[ability.index()]
    }

    pub fn learn(&mut self, ability: Ability) {
        self.learned[ability.index()] = true;
    }

    pub fn cooldown_remaining(&self, ability: Ability) -> f32 {
        self.cooldowns[ability.index()]
    }

    /// Attempt a cast. Returns `None` when the ability is unknown, cooling
    /// down, or (for Empower) already active.
    pub fn try_cast(&mut self, ability: Ability, aim: Vec2) -> Option<AbilityCast> {
        if !self.knows(ability) || self.cooldowns[ability.index()] > 0.0 {
            return None;
        }
        let params = ability.params();
        let cast = match ability {
            Ability::Burst => {
                let damage = params.damage + self.attack;
                let bolts = (0..BURST_BOLT_COUNT)
                    .map(|i| {
                        let theta =
                            std::f32::consts::TAU / BURST_BOLT_COUNT as f32 * i as f32;
                        Bolt {
                            id: 0,
                            pos: self.pos,
                            vel: crate::unit_from_angle(theta) * BURST_BOLT_SPEED,
                            radius: BURST_BOLT_RADIUS,
                            damage,
                            faction: Faction::Friendly,
                            freeze: None,
                            lifesteal: true,
                        }
                    })
                    .collect();
                AbilityCast::Burst { bolts }
            }
            Ability::Wave => {
                let dir = direction_or_zero(aim - self.pos);
                if dir == Vec2::ZERO {
                    return None;
                }
                AbilityCast::Wave {
                    origin: self.pos,
                    dir,
                    damage: params.damage,
                    range: params.range,
                    half_width: WAVE_HALF_WIDTH,
                    freeze: WAVE_FREEZE,
                }
            }
            Ability::Empower => {
                if self.statuses.is_active(StatusKind::Empowered) {
                    return None;
                }
                // x1.5 max health comes with a proportional health boost
                self.statuses.apply(StatusKind::Empowered, EMPOWER_DURATION);
                self.empower_applied = true;
                self.recompute_stats();
                self.health = (self.health * 1.5).min(self.max_health);
                AbilityCast::Empower
            }
        };
        self.cooldowns[ability.index()] = params.cooldown;
        Some(cast)
    }

    // ---- equipment ----

    pub fn equipped(&self, slot: EquipSlot) -> Option<EquipmentItem> {
        self.equipment[slot_index(slot)]
    }

    /// Orbiting weapon copies from the equipped weapon quality (1 bare).
    pub fn weapon_copies(&self) -> u32 {
        self.equipped(EquipSlot::Weapon)
            .map(|w| w.quality.weapon_copies())
            .unwrap_or(1)
    }

    /// Whether the item would pass the strictly-better gate for its slot.
    pub fn is_upgrade(&self, item: &EquipmentItem) -> bool {
        match self.equipped(item.slot) {
            Some(current) => item.quality > current.quality,
            None => true,
        }
    }

    /// Offer an item. Equal or lower quality than the current slot item is
    /// discarded; upgrades equip directly or go through the prompt.
    pub fn offer_equipment(&mut self, item: EquipmentItem) -> EquipOutcome {
        if !self.is_upgrade(&item) {
            return EquipOutcome::Rejected;
        }
        if self.auto_equip {
            self.equip(item);
            EquipOutcome::Equipped
        } else {
            self.pending_equipment = Some(item);
            EquipOutcome::Prompt
        }
    }

    /// Resolve a pending replacement prompt. Returns whether an item was
    /// equipped.
    pub fn resolve_equipment_prompt(&mut self, accept: bool) -> bool {
        let Some(item) = self.pending_equipment.take() else {
            return false;
        };
        // Re-check: a better drop may have auto-resolved the slot meanwhile
        if accept && self.is_upgrade(&item) {
            self.equip(item);
            true
        } else {
            false
        }
    }

    /// Equip a deliberately purchased item, skipping the prompt path.
    /// Still gated: a non-upgrade purchase is rejected.
    pub fn equip_purchased(&mut self, item: EquipmentItem) -> bool {
        if !self.is_upgrade(&item) {
            return false;
        }
        self.equip(item);
        true
    }

    fn equip(&mut self, item: EquipmentItem) {
        self.equipment[slot_index(item.slot)] = Some(item);
        self.recompute_stats();
        self.health = self.health.min(self.max_health);
    }

    /// Quality of the currently equipped item per slot (UI query).
    pub fn equipment_summary(&self) -> [(EquipSlot, Option<Quality>); 4] {
        [
            (EquipSlot::Weapon, self.equipped(EquipSlot::Weapon).map(|i| i.quality)),
            (EquipSlot::Chest, self.equipped(EquipSlot::Chest).map(|i| i.quality)),
            (EquipSlot::Ring, self.equipped(EquipSlot::Ring).map(|i| i.quality)),
            (EquipSlot::Boots, self.equipped(EquipSlot::Boots).map(|i| i.quality)),
        ]
    }

    // ---- currency ----

    pub fn add_currency(&mut self, amount: u64) {
        self.currency += amount;
    }

    /// Spend session currency. Rejected overdrafts leave the balance unchanged.
    pub fn spend(&mut self, amount: u64) -> bool {
        if amount > self.currency {
            return false;
        }
        self.currency -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_validation() {
        assert_eq!(
            AbilityParams::new(-1, 1.0, 0.0, 0.0),
            Err(ParamError::NegativeCost(-1))
        );
        assert_eq!(
            AbilityParams::new(0, 1.0, -5.0, 0.0),
            Err(ParamError::NegativeDamage(-5.0))
        );
        assert_eq!(
            AbilityParams::new(0, 1.0, 0.0, -1.0),
            Err(ParamError::NegativeRange(-1.0))
        );
        assert!(AbilityParams::new(100, 5.0, 50.0, 0.0).is_ok());
    }

    #[test]
    fn test_profile_upgrades_applied() {
        let c = Character::new(2, 1, 3, 2);
        assert_eq!(c.max_health, 140.0);
        assert_eq!(c.attack, 15.0);
        assert_eq!(c.defense, 6.0);
        assert!((c.lifesteal - 0.1).abs() < 1e-6);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_damage_and_heal_clamps() {
        let mut c = Character::new(0, 0, 0, 0);
        c.take_damage(10_000.0);
        assert_eq!(c.health, 0.0);
        assert!(c.is_downed());

        let mut c = Character::new(0, 0, 0, 0);
        c.take_damage(30.0);
        c.heal(10_000.0);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_level_up_cascade() {
        let mut c = Character::new(0, 0, 0, 0);
        c.take_damage(50.0);
        // 100 then 150 threshold; 260 exp crosses both
        let gained = c.gain_experience(260);
        assert_eq!(gained, 2);
        assert_eq!(c.level, 3);
        assert_eq!(c.experience, 10);
        assert_eq!(c.next_level_exp, 225);
        assert_eq!(c.max_health, 140.0);
        assert_eq!(c.health, c.max_health, "level-up refills health");
        assert_eq!(c.attack, 20.0);
    }

    #[test]
    fn test_cast_requires_learning_and_cooldown() {
        let mut c = Character::new(0, 0, 0, 0);
        let aim = c.pos + Vec2::new(100.0, 0.0);
        assert!(c.try_cast(Ability::Burst, aim).is_none());

        c.learn(Ability::Burst);
        let cast = c.try_cast(Ability::Burst, aim);
        let Some(AbilityCast::Burst { bolts }) = cast else {
            panic!("expected burst cast");
        };
        assert_eq!(bolts.len(), 8);
        assert!((bolts[0].damage - 60.0).abs() < 1e-4, "50 + attack 10");

        // Cooling down
        assert!(c.try_cast(Ability::Burst, aim).is_none());
        c.update(5.1, c.pos);
        assert!(c.try_cast(Ability::Burst, aim).is_some());
    }

    #[test]
    fn test_empower_rejects_reactivation_and_reverts() {
        let mut c = Character::new(0, 0, 0, 0);
        c.learn(Ability::Empower);
        c.take_damage(40.0); // health 60 of 100

        assert!(c.try_cast(Ability::Empower, c.pos).is_some());
        assert_eq!(c.attack, 20.0);
        assert_eq!(c.max_health, 150.0);
        assert_eq!(c.speed, 300.0);
        assert_eq!(c.health, 90.0, "proportional refill");

        // Active buff blocks a second activation even off cooldown
        c.update(EMPOWER_DURATION / 2.0, c.pos);
        assert!(c.try_cast(Ability::Empower, c.pos).is_none());

        // Expiry reverts stats and clamps health
        c.update(EMPOWER_DURATION, c.pos);
        assert_eq!(c.attack, 10.0);
        assert_eq!(c.max_health, 100.0);
        assert_eq!(c.speed, 200.0);
        assert!(c.health <= c.max_health);
    }

    #[test]
    fn test_wave_needs_aim_direction() {
        let mut c = Character::new(0, 0, 0, 0);
        c.learn(Ability::Wave);
        assert!(c.try_cast(Ability::Wave, c.pos).is_none(), "degenerate aim rejected");
        let cast = c.try_cast(Ability::Wave, c.pos + Vec2::new(0.0, 50.0));
        assert!(matches!(cast, Some(AbilityCast::Wave { .. })));
    }

    #[test]
    fn test_equip_gate_strictly_better() {
        let mut c = Character::new(0, 0, 0, 0);
        let common = EquipmentItem::new(EquipSlot::Weapon, Quality::Common);
        let rare = EquipmentItem::new(EquipSlot::Weapon, Quality::Rare);

        assert_eq!(c.offer_equipment(common), EquipOutcome::Equipped);
        assert_eq!(c.attack, 20.0);
        assert_eq!(c.offer_equipment(common), EquipOutcome::Rejected, "equal quality");
        assert_eq!(c.offer_equipment(rare), EquipOutcome::Equipped);
        assert_eq!(c.attack, 40.0);
        assert_eq!(c.offer_equipment(common), EquipOutcome::Rejected, "downgrade");
        assert_eq!(c.weapon_copies(), 3);
    }

    #[test]
    fn test_equipment_prompt_flow() {
        let mut c = Character::new(0, 0, 0, 0);
        c.auto_equip = false;
        let item = EquipmentItem::new(EquipSlot::Boots, Quality::Epic);
        assert_eq!(c.offer_equipment(item), EquipOutcome::Prompt);
        assert!(c.equipped(EquipSlot::Boots).is_none());

        assert!(c.resolve_equipment_prompt(true));
        assert_eq!(c.equipped(EquipSlot::Boots), Some(item));
        assert_eq!(c.speed, 240.0);

        // Nothing pending
        assert!(!c.resolve_equipment_prompt(true));
    }

    #[test]
    fn test_movement_deadzone_and_bounds() {
        let mut c = Character::new(0, 0, 0, 0);
        let start = c.pos;
        c.update(1.0 / 60.0, start + Vec2::new(2.0, 0.0));
        assert_eq!(c.pos, start, "inside deadzone");

        c.update(1.0 / 60.0, start + Vec2::new(100.0, 0.0));
        assert!(c.pos.x > start.x);

        // Clamped at the arena edge
        for _ in 0..1200 {
            c.update(1.0 / 60.0, Vec2::new(10_000.0, 400.0));
        }
        assert_eq!(c.pos.x, ARENA_WIDTH - c.radius);
    }

    #[test]
    fn test_frozen_stops_movement() {
        let mut c = Character::new(0, 0, 0, 0);
        c.statuses.apply(StatusKind::Frozen, 1.0);
        let start = c.pos;
        c.update(1.0 / 60.0, start + Vec2::new(100.0, 0.0));
        assert_eq!(c.pos, start);
    }

    #[test]
    fn test_spend_rejects_overdraft() {
        let mut c = Character::new(0, 0, 0, 0);
        c.add_currency(100);
        assert!(!c.spend(150));
        assert_eq!(c.currency, 100);
        assert!(c.spend(100));
        assert_eq!(c.currency, 0);
    }
}
