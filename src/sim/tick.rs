//! Fixed timestep simulation tick
//!
//! `advance` converts wall-clock delta time into fixed substeps and runs the
//! per-tick order: clock, Character, companion, spawns, hostiles, projectiles,
//! auras, reap, snapshot. Entity collections are mutated only here; the entity
//! modules compute effects and this orchestrator commits them.

use glam::Vec2;
use log::debug;

use crate::consts::*;

use super::combat;
use super::companion::{aura_hits, AuraEffect};
use super::monster::{EliteRank, HostileEvents, WEAPON_HIT_INTERVAL};
use super::player::{Ability, AbilityCast, EquipOutcome};
use super::projectile::Faction;
use super::snapshot::{RenderSnapshot, UiEvent, VisualEffect};
use super::state::{SessionPhase, SimState};
use super::status::StatusKind;

/// Input commands for a single `advance` call, sampled once before the
/// Character update and inert afterwards.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim position in arena coordinates; drives movement and wave direction
    pub aim: Vec2,
    /// Ability triggers raised since the last call
    pub casts: Vec<Ability>,
    /// Pause toggle edge
    pub toggle_pause: bool,
}

/// Snapshot plus the discrete events raised while advancing.
#[derive(Debug)]
pub struct TickOutput {
    pub snapshot: RenderSnapshot,
    pub events: Vec<UiEvent>,
}

/// Advance the session by `dt` seconds of real time. The delta is clamped and
/// folded into fixed 60 Hz substeps; a zero delta changes nothing. Paused,
/// downed, and ended sessions return an unchanged-world snapshot with no
/// catch-up applied on resume.
pub fn advance(state: &mut SimState, input: &TickInput, dt: f32) -> TickOutput {
    let mut events = Vec::new();
    let mut effects = Vec::new();

    if input.toggle_pause {
        state.toggle_pause();
    }

    if state.phase == SessionPhase::Running && dt > 0.0 {
        state.step_accumulator += dt.min(MAX_TICK_DT);
        let mut first = true;
        while state.step_accumulator >= SIM_DT && state.phase == SessionPhase::Running {
            state.step_accumulator -= SIM_DT;
            // Discrete triggers fire on the first substep only
            let casts: &[Ability] = if first { &input.casts } else { &[] };
            first = false;
            step(state, input.aim, casts, SIM_DT, &mut events, &mut effects);
        }
    }

    TickOutput {
        snapshot: state.snapshot(effects),
        events,
    }
}

/// One fixed simulation step.
fn step(
    state: &mut SimState,
    aim: Vec2,
    casts: &[Ability],
    dt: f32,
    events: &mut Vec<UiEvent>,
    effects: &mut Vec<VisualEffect>,
) {
    // 1. Clock and difficulty ramp
    state.advance_clock(dt);

    // 2. Character: movement, cooldowns, status decay, then casts
    state.character.update(dt, aim);
    for &ability in casts {
        apply_cast(state, ability, aim, events, effects);
    }

    // 3. Companion
    if let Some(mut companion) = state.companion.take() {
        let ev = companion.update(dt, state.character.pos, state.character.attack, &state.hostiles);
        if let Some((id, raw)) = ev.contact {
            let origin = state.character.pos;
            if let Some(h) = state.hostiles.iter_mut().find(|h| h.id == id && !h.is_dead()) {
                h.take_damage(raw);
                h.apply_knockback(origin);
            }
        }
        for mut bolt in ev.bolts {
            bolt.id = state.next_id();
            state.bolts.push(bolt);
        }
        state.companion = Some(companion);
    }

    // 4. Regular spawns off the accumulator
    state.run_spawn_accumulator(dt);

    // 5. Elite spawn on its fixed timer
    if let Some((_, rank)) = state.run_elite_timer(dt) {
        events.push(UiEvent::EliteSpawned { rank });
    }

    // 6. Hostile state machines, then weapon-arc and contact resolution
    update_hostiles(state, dt, effects);
    resolve_weapon_hits(state);

    // 7. Projectiles and hazards
    update_bolts(state, dt);
    update_beams(state, dt);

    // 8. Aura effects, per-target cadence
    apply_aura(state);

    // 9. Reap resolved kills, rolling loot and progression
    reap_hostiles(state, events, effects);

    // 10. Phase check; the snapshot is emitted by the caller
    if state.character.is_downed() && state.phase == SessionPhase::Running {
        state.phase = SessionPhase::Downed;
        events.push(UiEvent::CharacterDowned);
    }
}

fn apply_cast(
    state: &mut SimState,
    ability: Ability,
    aim: Vec2,
    events: &mut Vec<UiEvent>,
    effects: &mut Vec<VisualEffect>,
) {
    let Some(cast) = state.character.try_cast(ability, aim) else {
        return;
    };
    events.push(UiEvent::AbilityCast { ability });
    match cast {
        AbilityCast::Burst { bolts } => {
            for mut bolt in bolts {
                bolt.id = state.next_id();
                state.bolts.push(bolt);
            }
        }
        AbilityCast::Wave { origin, dir, damage, range, half_width, freeze } => {
            // Instant sweep: damage everything in the envelope, freeze survivors
            for h in &mut state.hostiles {
                if h.is_dead() {
                    continue;
                }
                if combat::point_in_band(h.pos, origin, dir, range, half_width + h.radius) {
                    h.take_damage(damage);
                    h.apply_knockback(origin);
                    state.character.apply_lifesteal(damage);
                    if !h.is_dead() {
                        h.apply_status(StatusKind::Frozen, freeze);
                    }
                }
            }
            effects.push(VisualEffect::WaveSweep { origin, dir, range, half_width });
        }
        AbilityCast::Empower => {}
    }
}

fn update_hostiles(state: &mut SimState, dt: f32, effects: &mut Vec<VisualEffect>) {
    let character_pos = state.character.pos;
    let character_radius = state.character.radius;

    let mut merged = HostileEvents::default();
    for i in 0..state.hostiles.len() {
        if state.hostiles[i].is_dead() {
            let mut ev = HostileEvents::default();
            state.hostiles[i].update_terminal(dt, &mut ev);
            if let Some(burst) = ev.detonation {
                apply_detonation(state, burst, effects);
            }
            continue;
        }
        let ev = state.hostiles[i].update(dt, character_pos, character_radius);
        merged.contact_damage += ev.contact_damage;
        if let Some(d) = ev.slow_character {
            merged.slow_character = Some(merged.slow_character.unwrap_or(0.0).max(d));
        }
        for mut bolt in ev.bolts {
            bolt.id = state.next_id();
            state.bolts.push(bolt);
        }
        for mut beam in ev.beams {
            beam.id = state.next_id();
            state.beams.push(beam);
        }
    }

    // Contact damage: resolve the per-second rate through defense, scale by dt
    if merged.contact_damage > 0.0 {
        let per_second = combat::resolve_damage(merged.contact_damage, state.character.defense);
        state.character.health = (state.character.health - per_second * dt).max(0.0);
    }
    if let Some(duration) = merged.slow_character {
        state.character.statuses.apply(StatusKind::Slowed, duration);
    }
}

fn apply_detonation(state: &mut SimState, burst: (Vec2, f32, f32), effects: &mut Vec<VisualEffect>) {
    let (center, raw, radius) = burst;
    effects.push(VisualEffect::Detonation { center, radius });
    if combat::point_in_circle(state.character.pos, center, radius + state.character.radius) {
        let dealt = state.character.take_damage(raw);
        debug!("detonation hit character for {dealt:.1}");
    }
}

/// Orbiting weapon copies vs hostiles, throttled per target.
fn resolve_weapon_hits(state: &mut SimState) {
    let c = &state.character;
    let points = combat::weapon_sample_points(
        c.pos,
        c.weapon_angle,
        c.weapon_copies(),
        WEAPON_ORBIT_RADIUS,
    );
    let attack = c.attack;
    let origin = c.pos;

    let mut raw_dealt = 0.0;
    for h in &mut state.hostiles {
        if h.is_dead() || h.weapon_hit_timer < WEAPON_HIT_INTERVAL {
            continue;
        }
        let hit = points
            .iter()
            .any(|&p| combat::point_in_circle(p, h.pos, h.radius + WEAPON_HIT_TOLERANCE));
        if hit {
            h.take_damage(attack);
            h.apply_knockback(origin);
            h.weapon_hit_timer = 0.0;
            raw_dealt += attack;
        }
    }
    if raw_dealt > 0.0 {
        state.character.apply_lifesteal(raw_dealt);
    }
}

fn update_bolts(state: &mut SimState, dt: f32) {
    let c_pos = state.character.pos;
    let mut removed: Vec<u32> = Vec::new();

    for i in 0..state.bolts.len() {
        state.bolts[i].advance(dt);
        let bolt = state.bolts[i].clone();
        if bolt.expired() {
            removed.push(bolt.id);
            continue;
        }
        match bolt.faction {
            Faction::Friendly => {
                let hit = state
                    .hostiles
                    .iter_mut()
                    .filter(|h| !h.is_dead())
                    .find(|h| combat::point_in_circle(bolt.pos, h.pos, h.radius + bolt.radius));
                if let Some(h) = hit {
                    h.take_damage(bolt.damage);
                    h.apply_knockback(c_pos);
                    if bolt.lifesteal {
                        state.character.apply_lifesteal(bolt.damage);
                    }
                    if !h.is_dead() {
                        if let Some(freeze) = bolt.freeze {
                            h.apply_status(StatusKind::Frozen, freeze);
                        }
                    }
                    removed.push(bolt.id);
                }
            }
            Faction::Hostile => {
                let c = &mut state.character;
                if combat::point_in_circle(bolt.pos, c.pos, c.radius + bolt.radius) {
                    c.take_damage(bolt.damage);
                    removed.push(bolt.id);
                }
            }
        }
    }

    if !removed.is_empty() {
        state.bolts.retain(|b| !removed.contains(&b.id));
    }
}

fn update_beams(state: &mut SimState, dt: f32) {
    let c_pos = state.character.pos;
    let c_radius = state.character.radius;
    let mut tick_damage = 0.0;

    for beam in &mut state.beams {
        beam.advance(dt);
        if beam.expired() {
            continue;
        }
        if combat::point_near_segment(
            c_pos,
            beam.origin,
            beam.dir,
            beam.length,
            beam.half_width + c_radius,
        ) {
            tick_damage += beam.tick_damage();
        }
    }
    if tick_damage > 0.0 {
        state.character.take_damage(tick_damage);
    }
    state.beams.retain(|b| !b.expired());
}

fn apply_aura(state: &mut SimState) {
    let Some(kind) = state.aura else {
        return;
    };
    let origin = state.character.pos;
    let hits = aura_hits(kind, origin, state.character.health, &state.hostiles);
    for (id, effect) in hits {
        let Some(h) = state.hostiles.iter_mut().find(|h| h.id == id) else {
            continue;
        };
        match effect {
            AuraEffect::Damage(raw) => {
                h.take_damage(raw);
                h.apply_knockback(origin);
            }
            AuraEffect::Status(status, duration) => h.apply_status(status, duration),
        }
        h.aura_cooldown = 0.0;
    }
}

/// Remove resolved kills (mark-then-compact) and roll their rewards.
fn reap_hostiles(state: &mut SimState, events: &mut Vec<UiEvent>, effects: &mut Vec<VisualEffect>) {
    let reaped: Vec<(u32, EliteRank, Vec2)> = state
        .hostiles
        .iter()
        .filter(|h| h.reapable())
        .inspect(|h| debug_assert!(h.is_dead(), "reaping a hostile above zero health"))
        .map(|h| (h.level, h.rank, h.pos))
        .collect();

    for (level, rank, pos) in reaped {
        effects.push(VisualEffect::HostileSlain { pos, rank });
        if rank != EliteRank::None {
            state.credit_elite_kill();
        }

        let loot = super::loot::roll_loot(&mut state.rng, level, rank.reward_tier());
        state.character.add_currency(loot.currency);
        let levels = state.character.gain_experience(loot.experience);
        if levels > 0 {
            events.push(UiEvent::LevelUp { level: state.character.level });
            effects.push(VisualEffect::LevelUpFlash { pos: state.character.pos });
        }
        if let Some(item) = loot.equipment {
            match state.character.offer_equipment(item) {
                EquipOutcome::Equipped => events.push(UiEvent::Equipped { item }),
                EquipOutcome::Prompt => events.push(UiEvent::EquipmentPrompt { item }),
                EquipOutcome::Rejected => {}
            }
        }
    }

    state.hostiles.retain(|h| !h.reapable());
}
