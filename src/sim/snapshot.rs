//! Per-tick output for the presentation layer
//!
//! The simulation never draws; each `advance` emits a `RenderSnapshot` (full
//! world view) plus the `UiEvent`s raised during the tick. Both are plain
//! serializable data so the render/UI collaborators stay external.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::companion::AuraKind;
use super::loot::{EquipSlot, EquipmentItem, Quality};
use super::monster::{EliteRank, HostileKind};
use super::player::Ability;
use super::projectile::Faction;
use super::state::SessionPhase;
use super::status::StatusKind;

/// Character as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub experience: u64,
    pub next_level_exp: u64,
    pub currency: u64,
    /// Active statuses for icon display
    pub statuses: Vec<StatusKind>,
    /// World positions of each orbiting weapon copy
    pub weapon_points: Vec<Vec2>,
    /// (ability, seconds remaining); unknown abilities omitted
    pub cooldowns: Vec<(Ability, f32)>,
    pub equipment: Vec<(EquipSlot, Quality)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub id: u32,
    pub kind: HostileKind,
    pub rank: EliteRank,
    pub pos: Vec2,
    pub radius: f32,
    pub health_fraction: f32,
    /// Beam warning cue
    pub charging: bool,
    /// 0..1 progress of an explosive death countdown
    pub detonation_progress: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoltView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub faction: Faction,
    pub frost: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub id: u32,
    pub origin: Vec2,
    pub dir: Vec2,
    pub length: f32,
    pub half_width: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionView {
    pub kind: super::companion::CompanionKind,
    pub pos: Vec2,
}

/// One-shot visual cues raised during the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VisualEffect {
    WaveSweep { origin: Vec2, dir: Vec2, range: f32, half_width: f32 },
    Detonation { center: Vec2, radius: f32 },
    HostileSlain { pos: Vec2, rank: EliteRank },
    LevelUpFlash { pos: Vec2 },
}

/// Full world view emitted once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: SessionPhase,
    pub session_seconds: f32,
    pub difficulty: f32,
    pub character: CharacterView,
    pub hostiles: Vec<HostileView>,
    pub bolts: Vec<BoltView>,
    pub beams: Vec<BeamView>,
    pub companion: Option<CompanionView>,
    /// Active aura and its range, centered on the Character
    pub aura: Option<(AuraKind, f32)>,
    pub effects: Vec<VisualEffect>,
}

/// Discrete events for the UI layer (toasts, prompts, menu transitions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    LevelUp { level: u32 },
    Equipped { item: EquipmentItem },
    EquipmentPrompt { item: EquipmentItem },
    AbilityCast { ability: Ability },
    EliteSpawned { rank: EliteRank },
    CharacterDowned,
}
