//! Companions and auras
//!
//! At most one companion and one aura are active per session, chosen from the
//! profile's owned sets. The companion orbits the Character and fights on its
//! own timers; auras passively affect every hostile in range on a per-target
//! cadence. Both only compute effects here; the orchestrator commits them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::unit_from_angle;

use super::monster::Hostile;
use super::player::ParamError;
use super::projectile::{Bolt, Faction};
use super::status::StatusKind;

pub const COMPANION_ORBIT_RADIUS: f32 = 75.0;
pub const COMPANION_ORBIT_SPEED: f32 = 6.0;
pub const COMPANION_RADIUS: f32 = 10.0;
/// Contact hits land at most every half second
pub const COMPANION_CONTACT_INTERVAL: f32 = 0.5;
pub const COMPANION_SPECIAL_INTERVAL: f32 = 4.0;

const FROST_BOLT_SPEED: f32 = 300.0;
const FROST_BOLT_RADIUS: f32 = 15.0;
const FROST_FREEZE: f32 = 2.0;
const EMBER_BOLT_SPEED: f32 = 400.0;
const EMBER_BOLT_COUNT: u32 = 8;

/// Purchasable companion types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanionKind {
    /// Pure melee, no special attack
    Warhound,
    /// Freezing bolt at the nearest hostile
    Frostboar,
    /// Radial volley of fire bolts
    Emberdrake,
}

pub const ALL_COMPANIONS: [CompanionKind; 3] = [
    CompanionKind::Warhound,
    CompanionKind::Frostboar,
    CompanionKind::Emberdrake,
];

impl CompanionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanionKind::Warhound => "warhound",
            CompanionKind::Frostboar => "frostboar",
            CompanionKind::Emberdrake => "emberdrake",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ALL_COMPANIONS.iter().copied().find(|k| k.as_str() == id)
    }

    /// Shop price in profile currency.
    pub fn price(&self) -> u64 {
        match self {
            CompanionKind::Warhound => 300,
            CompanionKind::Frostboar => 500,
            CompanionKind::Emberdrake => 800,
        }
    }
}

/// Purchasable aura types with their effect ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuraKind {
    /// Raw damage: 5% of the Character's current health per cadence tick
    Scorch,
    /// Applies Slowed
    Chill,
    /// Applies Weakened
    Sap,
}

pub const ALL_AURAS: [AuraKind; 3] = [AuraKind::Scorch, AuraKind::Chill, AuraKind::Sap];

/// Minimum seconds between aura applications to the same hostile
pub const AURA_CADENCE: f32 = 1.0;
/// Duration of the statuses the debuff auras re-apply
pub const AURA_STATUS_DURATION: f32 = 1.0;

/// Validated aura parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuraParams {
    pub cost: u64,
    pub range: f32,
}

impl AuraParams {
    pub fn new(cost: i64, range: f32) -> Result<Self, ParamError> {
        if cost < 0 {
            return Err(ParamError::NegativeCost(cost));
        }
        if range < 0.0 {
            return Err(ParamError::NegativeRange(range));
        }
        Ok(Self { cost: cost as u64, range })
    }
}

impl AuraKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuraKind::Scorch => "scorch",
            AuraKind::Chill => "chill",
            AuraKind::Sap => "sap",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ALL_AURAS.iter().copied().find(|k| k.as_str() == id)
    }

    pub fn params(&self) -> AuraParams {
        let params = match self {
            AuraKind::Scorch => AuraParams::new(400, 150.0),
            AuraKind::Chill => AuraParams::new(350, 180.0),
            AuraKind::Sap => AuraParams::new(450, 200.0),
        };
        match params {
            Ok(p) => p,
            Err(_) => unreachable!("built-in aura parameters are valid"),
        }
    }

    pub fn range(&self) -> f32 {
        self.params().range
    }
}

/// What an aura does to one hostile on a cadence tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuraEffect {
    Damage(f32),
    Status(StatusKind, f32),
}

/// Aura hits for this tick: hostiles in range whose per-target cadence has
/// elapsed. The orchestrator applies the effects and resets each target's
/// cadence timer.
pub fn aura_hits(kind: AuraKind, center: Vec2, current_health: f32, hostiles: &[Hostile]) -> Vec<(u32, AuraEffect)> {
    let range = kind.range();
    let effect = match kind {
        AuraKind::Scorch => AuraEffect::Damage(current_health * 0.05),
        AuraKind::Chill => AuraEffect::Status(StatusKind::Slowed, AURA_STATUS_DURATION),
        AuraKind::Sap => AuraEffect::Status(StatusKind::Weakened, AURA_STATUS_DURATION),
    };
    hostiles
        .iter()
        .filter(|h| !h.is_dead())
        .filter(|h| h.aura_cooldown >= AURA_CADENCE)
        .filter(|h| h.pos.distance(center) <= range + h.radius)
        .map(|h| (h.id, effect))
        .collect()
}

/// Effects from one companion tick, committed by the orchestrator.
#[derive(Debug, Default)]
pub struct CompanionEvents {
    /// Melee contact: (hostile id, raw damage)
    pub contact: Option<(u32, f32)>,
    pub bolts: Vec<Bolt>,
}

/// The active companion. Orbits the Character, hits on contact, and fires its
/// special attack on a fixed interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Companion {
    pub kind: CompanionKind,
    pub pos: Vec2,
    angle: f32,
    contact_timer: f32,
    special_timer: f32,
}

impl Companion {
    pub fn new(kind: CompanionKind, character_pos: Vec2) -> Self {
        Self {
            kind,
            pos: character_pos + Vec2::X * COMPANION_ORBIT_RADIUS,
            angle: 0.0,
            contact_timer: 0.0,
            special_timer: 0.0,
        }
    }

    /// Companion raw damage derives from the Character's current attack.
    pub fn damage(attack: f32) -> f32 {
        attack * 0.5
    }

    pub fn update(
        &mut self,
        dt: f32,
        character_pos: Vec2,
        attack: f32,
        hostiles: &[Hostile],
    ) -> CompanionEvents {
        let mut events = CompanionEvents::default();

        self.angle = (self.angle + COMPANION_ORBIT_SPEED * dt) % std::f32::consts::TAU;
        self.pos = character_pos + unit_from_angle(self.angle) * COMPANION_ORBIT_RADIUS;

        let damage = Self::damage(attack);

        self.contact_timer += dt;
        if self.contact_timer >= COMPANION_CONTACT_INTERVAL {
            let touched = hostiles
                .iter()
                .filter(|h| !h.is_dead())
                .find(|h| h.pos.distance(self.pos) <= h.radius + COMPANION_RADIUS);
            if let Some(h) = touched {
                events.contact = Some((h.id, damage));
                self.contact_timer = 0.0;
            }
        }

        self.special_timer += dt;
        if self.special_timer >= COMPANION_SPECIAL_INTERVAL {
            if self.fire_special(damage, hostiles, &mut events) {
                self.special_timer = 0.0;
            }
        }

        events
    }

    /// Returns whether the special actually fired (Frostboar holds its shot
    /// until a target exists).
    fn fire_special(&self, damage: f32, hostiles: &[Hostile], events: &mut CompanionEvents) -> bool {
        match self.kind {
            CompanionKind::Warhound => true,
            CompanionKind::Frostboar => {
                let nearest = hostiles
                    .iter()
                    .filter(|h| !h.is_dead())
                    .min_by(|a, b| {
                        a.pos
                            .distance_squared(self.pos)
                            .total_cmp(&b.pos.distance_squared(self.pos))
                    });
                let Some(target) = nearest else {
                    return false;
                };
                events.bolts.push(Bolt {
                    id: 0,
                    pos: self.pos,
                    vel: crate::direction_or_zero(target.pos - self.pos) * FROST_BOLT_SPEED,
                    radius: FROST_BOLT_RADIUS,
                    damage,
                    faction: Faction::Friendly,
                    freeze: Some(FROST_FREEZE),
                    lifesteal: false,
                });
                true
            }
            CompanionKind::Emberdrake => {
                for i in 0..EMBER_BOLT_COUNT {
                    let theta = std::f32::consts::TAU / EMBER_BOLT_COUNT as f32 * i as f32;
                    events.bolts.push(Bolt {
                        id: 0,
                        pos: self.pos,
                        vel: unit_from_angle(theta) * EMBER_BOLT_SPEED,
                        radius: 10.0,
                        damage: damage * 2.0,
                        faction: Faction::Friendly,
                        freeze: None,
                        lifesteal: false,
                    });
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::monster::{EliteRank, HostileKind};

    fn hostile_at(id: u32, pos: Vec2) -> Hostile {
        let mut h = Hostile::spawn(id, HostileKind::Normal, 1, EliteRank::None, 0.0, pos);
        h.aura_cooldown = f32::MAX;
        h
    }

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in ALL_COMPANIONS {
            assert_eq!(CompanionKind::from_id(kind.as_str()), Some(kind));
        }
        for kind in ALL_AURAS {
            assert_eq!(AuraKind::from_id(kind.as_str()), Some(kind));
        }
        assert_eq!(CompanionKind::from_id("direwolf"), None);
    }

    #[test]
    fn test_aura_params_validation() {
        assert_eq!(AuraParams::new(-5, 100.0), Err(ParamError::NegativeCost(-5)));
        assert_eq!(AuraParams::new(100, -1.0), Err(ParamError::NegativeRange(-1.0)));
    }

    #[test]
    fn test_companion_orbits_character() {
        let mut c = Companion::new(CompanionKind::Warhound, Vec2::new(600.0, 400.0));
        c.update(0.1, Vec2::new(600.0, 400.0), 10.0, &[]);
        assert!((c.pos.distance(Vec2::new(600.0, 400.0)) - COMPANION_ORBIT_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_contact_hit_cadence() {
        let center = Vec2::new(600.0, 400.0);
        let mut c = Companion::new(CompanionKind::Warhound, center);
        // Ring of hostiles so the companion always overlaps one
        let hostiles: Vec<Hostile> = (0..12)
            .map(|i| {
                let theta = std::f32::consts::TAU / 12.0 * i as f32;
                hostile_at(i, center + unit_from_angle(theta) * COMPANION_ORBIT_RADIUS)
            })
            .collect();

        let dt = 1.0 / 60.0;
        let mut hits = 0;
        for _ in 0..120 {
            if c.update(dt, center, 10.0, &hostiles).contact.is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 4, "two seconds at one hit per 0.5s");
    }

    #[test]
    fn test_frostboar_holds_fire_without_targets() {
        let center = Vec2::new(600.0, 400.0);
        let mut c = Companion::new(CompanionKind::Frostboar, center);
        let ev = c.update(COMPANION_SPECIAL_INTERVAL + 0.1, center, 10.0, &[]);
        assert!(ev.bolts.is_empty());

        // Target appears: the held shot fires immediately
        let hostiles = vec![hostile_at(1, center + Vec2::new(200.0, 0.0))];
        let ev = c.update(1.0 / 60.0, center, 10.0, &hostiles);
        assert_eq!(ev.bolts.len(), 1);
        assert_eq!(ev.bolts[0].freeze, Some(FROST_FREEZE));
        assert!((ev.bolts[0].damage - 5.0).abs() < 1e-4, "half of attack 10");
    }

    #[test]
    fn test_emberdrake_radial_volley() {
        let center = Vec2::new(600.0, 400.0);
        let mut c = Companion::new(CompanionKind::Emberdrake, center);
        let ev = c.update(COMPANION_SPECIAL_INTERVAL + 0.1, center, 10.0, &[]);
        assert_eq!(ev.bolts.len(), 8);
        assert!((ev.bolts[0].damage - 10.0).abs() < 1e-4, "companion damage x2");
    }

    #[test]
    fn test_aura_range_and_cadence_gate() {
        let center = Vec2::new(600.0, 400.0);
        let near = hostile_at(1, center + Vec2::new(100.0, 0.0));
        let far = hostile_at(2, center + Vec2::new(500.0, 0.0));
        let mut cooling = hostile_at(3, center + Vec2::new(-100.0, 0.0));
        cooling.aura_cooldown = 0.2; // hit recently

        let hostiles = vec![near, far, cooling];
        let hits = aura_hits(AuraKind::Scorch, center, 80.0, &hostiles);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 1);
        assert_eq!(hits[0].1, AuraEffect::Damage(4.0), "5% of current health");
    }

    #[test]
    fn test_debuff_auras_apply_statuses() {
        let center = Vec2::new(600.0, 400.0);
        let hostiles = vec![hostile_at(1, center + Vec2::new(100.0, 0.0))];
        let chill = aura_hits(AuraKind::Chill, center, 100.0, &hostiles);
        assert_eq!(chill[0].1, AuraEffect::Status(StatusKind::Slowed, 1.0));
        let sap = aura_hits(AuraKind::Sap, center, 100.0, &hostiles);
        assert_eq!(sap[0].1, AuraEffect::Status(StatusKind::Weakened, 1.0));
    }
}
