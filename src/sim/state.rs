//! Complete session state
//!
//! `SimState` is the explicit context threaded through every component
//! operation; there is no ambient global state. It owns the entity
//! collections (mutated only by the tick orchestrator), the seeded RNG, and
//! the out-of-tick session API used by the shop and pause/revive flows.

use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::Profile;

use super::companion::{AuraKind, Companion};
use super::loot::{EquipSlot, EquipmentItem, Quality};
use super::monster::{EliteRank, Hostile, HostileKind, ALL_KINDS, ELITE_KINDS};
use super::player::{Ability, Character};
use super::projectile::{Beam, Bolt, Faction};
use super::snapshot::{
    BeamView, BoltView, CharacterView, CompanionView, HostileView, RenderSnapshot, VisualEffect,
};
use super::status::StatusKind;
use super::weighted::WeightedTable;

/// High-level session phase. Anything but `Running` freezes the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    /// Shop open or pause toggle; timers hold, no catch-up on resume
    Paused,
    /// Character at zero health, awaiting revive or session end
    Downed,
    Ended,
}

/// Complete session state (deterministic, serializable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    /// Simulated seconds while Running; pauses excluded
    pub session_seconds: f32,
    pub difficulty: f32,
    difficulty_timer: f32,
    spawn_accumulator: f32,
    elite_timer: f32,
    /// Resolved elite-rank kills this session
    pub elite_kills: u32,
    /// Armed by every third elite kill; consumed by the next elite spawn
    next_elite_super: bool,
    pub character: Character,
    pub companion: Option<Companion>,
    pub aura: Option<AuraKind>,
    pub hostiles: Vec<Hostile>,
    pub bolts: Vec<Bolt>,
    pub beams: Vec<Beam>,
    /// Fixed-step remainder carried between `advance` calls
    pub(super) step_accumulator: f32,
    next_id: u32,
}

impl SimState {
    /// Start a session from the persisted profile.
    pub fn new(seed: u64, profile: &Profile) -> Self {
        let mut character = Character::new(
            profile.health_level,
            profile.attack_level,
            profile.defense_level,
            profile.lifesteal_level,
        );
        character.auto_equip = profile.auto_equip;
        let companion = profile
            .selected_companion
            .map(|kind| Companion::new(kind, character.pos));

        info!(
            "session start: seed={seed} companion={:?} aura={:?}",
            profile.selected_companion, profile.selected_aura
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Running,
            session_seconds: 0.0,
            difficulty: 1.0,
            difficulty_timer: 0.0,
            spawn_accumulator: 0.0,
            elite_timer: 0.0,
            elite_kills: 0,
            next_elite_super: false,
            character,
            companion,
            aura: profile.selected_aura,
            hostiles: Vec::new(),
            bolts: Vec::new(),
            beams: Vec::new(),
            step_accumulator: 0.0,
            next_id: 1,
        }
    }

    pub(super) fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ---- clock / spawning (driven by the orchestrator) ----

    /// Advance the session clock and the difficulty ramp.
    pub(super) fn advance_clock(&mut self, dt: f32) {
        self.session_seconds += dt;
        self.difficulty_timer += dt;
        while self.difficulty_timer >= DIFFICULTY_INTERVAL {
            self.difficulty_timer -= DIFFICULTY_INTERVAL;
            self.difficulty += DIFFICULTY_STEP;
            info!("difficulty up: {}", self.difficulty);
        }
    }

    /// Hostile level scales with session time and difficulty.
    pub(super) fn hostile_level(&self) -> u32 {
        ((self.session_seconds / 60.0 * self.difficulty) as u32).max(1)
    }

    /// Difficulty-adjusted spawn weights. Normal's share shrinks toward its
    /// 0.3 floor while the special kinds climb toward their caps; the table
    /// renormalizes the clamped weights.
    fn spawn_table(&self) -> WeightedTable<HostileKind> {
        let d = self.difficulty;
        let entries = ALL_KINDS.map(|kind| {
            let weight = match kind {
                HostileKind::Normal => (0.4 / d).max(0.3),
                HostileKind::Tank => (0.2 * d).min(0.3),
                HostileKind::Explosive | HostileKind::Laser => (0.15 * d).min(0.2),
                HostileKind::Slow => (0.1 * d).min(0.15),
            };
            (kind, weight)
        });
        match WeightedTable::new(entries) {
            Some(table) => table,
            None => unreachable!("spawn weights always include a positive entry"),
        }
    }

    /// Count spawn-accumulator expiries and spawn that many regular hostiles.
    pub(super) fn run_spawn_accumulator(&mut self, dt: f32) -> Vec<u32> {
        self.spawn_accumulator += dt;
        let interval = SPAWN_BASE_INTERVAL / self.difficulty;
        let mut spawned = Vec::new();
        while self.spawn_accumulator >= interval {
            self.spawn_accumulator -= interval;
            let table = self.spawn_table();
            let kind = table.sample(&mut self.rng);
            spawned.push(self.spawn_hostile(kind, EliteRank::None));
        }
        spawned
    }

    /// Fixed-interval elite spawn; consumes the armed super-elite upgrade.
    pub(super) fn run_elite_timer(&mut self, dt: f32) -> Option<(u32, EliteRank)> {
        self.elite_timer += dt;
        if self.elite_timer < ELITE_SPAWN_INTERVAL {
            return None;
        }
        self.elite_timer -= ELITE_SPAWN_INTERVAL;
        let rank = if self.next_elite_super {
            self.next_elite_super = false;
            EliteRank::SuperElite
        } else {
            EliteRank::Elite
        };
        let kind = ELITE_KINDS[self.rng.random_range(0..ELITE_KINDS.len())];
        let id = self.spawn_hostile(kind, rank);
        Some((id, rank))
    }

    fn spawn_hostile(&mut self, kind: HostileKind, rank: EliteRank) -> u32 {
        let id = self.next_id();
        let pos = Hostile::edge_spawn_position(&mut self.rng);
        // Elites ramp with the difficulty floor, not the time-scaled level
        let level = match rank {
            EliteRank::None => self.hostile_level(),
            _ => (self.difficulty as u32).max(1),
        };
        let hostile = Hostile::spawn(id, kind, level, rank, self.difficulty, pos);
        info!(
            "spawn: id={id} kind={} rank={:?} level={level} hp={:.0}",
            kind.as_str(),
            rank,
            hostile.max_health
        );
        self.hostiles.push(hostile);
        id
    }

    /// Credit an elite-rank kill; every third arms the next elite spawn as a
    /// super-elite.
    pub(super) fn credit_elite_kill(&mut self) {
        self.elite_kills += 1;
        if self.elite_kills % SUPER_ELITE_CYCLE == 0 {
            self.next_elite_super = true;
            info!("super-elite armed after {} elite kills", self.elite_kills);
        }
    }

    // ---- session API (out-of-tick commands from the UI/shop) ----

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            other => other,
        };
    }

    /// Purchase an ability with session currency. Rejects funds shortfalls
    /// and re-purchases.
    pub fn buy_ability(&mut self, ability: Ability) -> bool {
        if self.character.knows(ability) {
            return false;
        }
        if !self.character.spend(ability.params().cost) {
            return false;
        }
        self.character.learn(ability);
        info!("ability learned: {}", ability.as_str());
        true
    }

    /// Shop price for a constructed equipment item.
    pub fn equipment_price(quality: Quality) -> u64 {
        100 * (quality as u64 + 1)
    }

    /// Purchase and equip a constructed item. Goes through the same
    /// strictly-better gate as drops; non-upgrades are rejected unspent.
    pub fn buy_equipment(&mut self, slot: EquipSlot, quality: Quality) -> bool {
        let item = EquipmentItem::new(slot, quality);
        if !self.character.is_upgrade(&item) {
            return false;
        }
        if !self.character.spend(Self::equipment_price(quality)) {
            return false;
        }
        let equipped = self.character.equip_purchased(item);
        debug_assert!(equipped);
        equipped
    }

    /// Accept or decline a pending equipment-replacement prompt.
    pub fn resolve_equipment_prompt(&mut self, accept: bool) -> bool {
        self.character.resolve_equipment_prompt(accept)
    }

    /// Revive after being downed: full health and a cleared arena as a grace
    /// window. Valid only in the `Downed` phase.
    pub fn revive(&mut self) -> bool {
        if self.phase != SessionPhase::Downed {
            return false;
        }
        self.character.heal(f32::MAX);
        self.hostiles.clear();
        self.beams.clear();
        self.bolts.retain(|b| b.faction == Faction::Friendly);
        self.phase = SessionPhase::Running;
        info!("revived at session t={:.1}s", self.session_seconds);
        true
    }

    /// End the session, returning the currency earned for the profile
    /// collaborator to bank and persist. `None` if already ended.
    pub fn end_session(&mut self) -> Option<u64> {
        if self.phase == SessionPhase::Ended {
            return None;
        }
        self.phase = SessionPhase::Ended;
        let earned = self.character.currency;
        info!("session end: t={:.1}s currency={earned}", self.session_seconds);
        Some(earned)
    }

    // ---- snapshot ----

    /// Build the per-tick world view for the presentation layer.
    pub(super) fn snapshot(&self, effects: Vec<VisualEffect>) -> RenderSnapshot {
        let c = &self.character;
        let statuses = [
            StatusKind::Frozen,
            StatusKind::Slowed,
            StatusKind::Empowered,
            StatusKind::Weakened,
        ]
        .into_iter()
        .filter(|&k| c.statuses.is_active(k))
        .collect();

        let character = CharacterView {
            pos: c.pos,
            radius: c.radius,
            health: c.health,
            max_health: c.max_health,
            level: c.level,
            experience: c.experience,
            next_level_exp: c.next_level_exp,
            currency: c.currency,
            statuses,
            weapon_points: super::combat::weapon_sample_points(
                c.pos,
                c.weapon_angle,
                c.weapon_copies(),
                WEAPON_ORBIT_RADIUS,
            ),
            cooldowns: super::player::ALL_ABILITIES
                .into_iter()
                .filter(|&a| c.knows(a))
                .map(|a| (a, c.cooldown_remaining(a)))
                .collect(),
            equipment: c
                .equipment_summary()
                .into_iter()
                .filter_map(|(slot, q)| q.map(|q| (slot, q)))
                .collect(),
        };

        RenderSnapshot {
            phase: self.phase,
            session_seconds: self.session_seconds,
            difficulty: self.difficulty,
            character,
            hostiles: self
                .hostiles
                .iter()
                .map(|h| HostileView {
                    id: h.id,
                    kind: h.kind,
                    rank: h.rank,
                    pos: h.pos,
                    radius: h.radius,
                    health_fraction: (h.health / h.max_health).clamp(0.0, 1.0),
                    charging: h.is_charging(),
                    detonation_progress: h.detonation_progress(),
                })
                .collect(),
            bolts: self
                .bolts
                .iter()
                .map(|b| BoltView {
                    id: b.id,
                    pos: b.pos,
                    radius: b.radius,
                    faction: b.faction,
                    frost: b.freeze.is_some(),
                })
                .collect(),
            beams: self
                .beams
                .iter()
                .map(|b| BeamView {
                    id: b.id,
                    origin: b.origin,
                    dir: b.dir,
                    length: b.length,
                    half_width: b.half_width,
                    remaining: b.remaining,
                })
                .collect(),
            companion: self.companion.as_ref().map(|c| CompanionView {
                kind: c.kind,
                pos: c.pos,
            }),
            aura: self.aura.map(|a| (a, a.range())),
            effects,
        }
    }
}
