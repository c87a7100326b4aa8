//! Arena Survivors entry point
//!
//! Headless demo: runs a seeded session at the fixed timestep with a scripted
//! input stream, logging UI events as they happen. Rendering and real input
//! live in external collaborators; this binary exercises the core end to end.

use glam::Vec2;
use log::info;

use arena_survivors::consts::*;
use arena_survivors::sim::{advance, Ability, SessionPhase, SimState, TickInput, UiEvent};
use arena_survivors::Profile;

/// Scripted aim: circle the arena center so the Character keeps moving.
fn scripted_aim(t: f32) -> Vec2 {
    let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
    center + Vec2::new((t * 0.4).cos(), (t * 0.4).sin()) * 250.0
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xA12E);
    let duration: f32 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(120.0);

    let mut profile = Profile::default();
    let mut state = SimState::new(seed, &profile);
    info!("demo session: seed={seed} duration={duration}s");

    let mut t = 0.0;
    let mut revives_left = 1;
    while t < duration && state.phase != SessionPhase::Ended {
        let mut input = TickInput {
            aim: scripted_aim(t),
            ..Default::default()
        };
        // Fire whatever is learned and off cooldown
        for ability in [Ability::Burst, Ability::Wave, Ability::Empower] {
            if state.character.knows(ability)
                && state.character.cooldown_remaining(ability) == 0.0
            {
                input.casts.push(ability);
            }
        }

        let out = advance(&mut state, &input, SIM_DT);
        for event in &out.events {
            match event {
                UiEvent::LevelUp { level } => info!("level up -> {level}"),
                UiEvent::Equipped { item } => {
                    info!("equipped {:?} ({})", item.slot, item.quality.as_str())
                }
                UiEvent::EquipmentPrompt { item } => {
                    info!("prompt for {:?} ({})", item.slot, item.quality.as_str())
                }
                UiEvent::AbilityCast { ability } => info!("cast {}", ability.as_str()),
                UiEvent::EliteSpawned { rank } => info!("elite spawned: {rank:?}"),
                UiEvent::CharacterDowned => info!("downed at t={t:.1}s"),
            }
        }

        // Spend session currency on the kit as it becomes affordable
        for ability in [Ability::Burst, Ability::Wave, Ability::Empower] {
            if state.buy_ability(ability) {
                info!("bought {}", ability.as_str());
            }
        }

        // One free revive, then call it a run
        if state.phase == SessionPhase::Downed {
            if revives_left == 0 {
                break;
            }
            revives_left -= 1;
            state.revive();
        }

        t += SIM_DT;
    }

    if let Some(earned) = state.end_session() {
        profile.add_currency(earned);
    }
    info!(
        "finished: t={:.1}s level={} currency banked={}",
        state.session_seconds, state.character.level, profile.currency
    );
    println!(
        "survived {:.1}s, reached level {}, banked {} currency",
        state.session_seconds, state.character.level, profile.currency
    );
}
