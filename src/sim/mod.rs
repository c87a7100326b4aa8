//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Collections mutated only by the tick orchestrator
//! - No rendering or platform dependencies

pub mod combat;
pub mod companion;
pub mod loot;
pub mod monster;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod status;
pub mod tick;
pub mod weighted;

pub use combat::{lifesteal_heal, point_in_band, point_in_circle, point_near_segment, resolve_damage};
pub use companion::{AuraKind, Companion, CompanionKind, ALL_AURAS, ALL_COMPANIONS};
pub use loot::{EquipSlot, EquipmentItem, LootDrop, Quality, RewardTier};
pub use monster::{AttackPattern, EliteRank, Hostile, HostileKind};
pub use player::{Ability, AbilityParams, Character, EquipOutcome, ParamError};
pub use projectile::{Beam, Bolt, Faction};
pub use snapshot::{RenderSnapshot, UiEvent, VisualEffect};
pub use state::{SessionPhase, SimState};
pub use status::{StatusKind, StatusSet};
pub use tick::{advance, TickInput, TickOutput};
pub use weighted::WeightedTable;
