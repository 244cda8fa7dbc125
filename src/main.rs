//! Horde Survivor headless runner
//!
//! Plays one session with a simple autopilot and logs the outcome.
//!
//! Usage: `horde-survivor [tuning.json] [seed]`

use horde_survivor::Tuning;
use horde_survivor::consts::SIM_DT;
use horde_survivor::sim::combat::nearest_enemy;
use horde_survivor::sim::{Action, GameEvent, GamePhase, GameState, Session, TickInput};

/// Simulated seconds before the runner gives up
const MAX_RUN_SECS: f32 = 300.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::error!("{e}; using default tuning");
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);

    log::info!("Horde Survivor (headless) starting...");
    let mut session = Session::new(seed, tuning);

    let max_steps = (MAX_RUN_SECS / SIM_DT) as u32;
    for _ in 0..max_steps {
        let input = autopilot(&session.state);
        session.step(&input, SIM_DT);

        for event in session.state.drain_events() {
            if let GameEvent::UpgradePresented { options } = event {
                log::info!("Offered: {:?}", options);
            }
        }
        if session.state.phase() == GamePhase::Dead {
            break;
        }
    }

    let hud = session.hud();
    log::info!(
        "Run over (seed {}): level {}, {} kills, survived {:.1}s",
        session.seed(),
        hud.level,
        hud.kills,
        hud.survival_secs
    );
    log::info!(
        "Health {}/{} (#{:06x}), {:.0}% of the way to level {}",
        hud.hp,
        hud.max_hp,
        hud.health.color.rgb(),
        hud.xp_fraction() * 100.0,
        hud.level + 1
    );
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize HUD: {e}"),
    }
}

/// Kite away from the nearest enemy; take the first upgrade offered
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::new();

    if state.selection.is_active() {
        return input.press(Action::Confirm);
    }

    let Some(threat) = nearest_enemy(&state.registry, state.player.pos) else {
        return input;
    };

    // Head for the side of the world opposite the threat, drifting to the
    // centre when cornered
    let center = glam::Vec2::new(state.tuning.world_width, state.tuning.world_height) / 2.0;
    let away = (state.player.pos - threat.pos).normalize_or_zero();
    let to_center = (center - state.player.pos).normalize_or_zero();
    let dir = away + to_center * 0.5;

    if dir.x < -0.2 {
        input = input.hold(Action::MoveLeft);
    } else if dir.x > 0.2 {
        input = input.hold(Action::MoveRight);
    }
    if dir.y < -0.2 {
        input = input.hold(Action::MoveUp);
    } else if dir.y > 0.2 {
        input = input.hold(Action::MoveDown);
    }
    input
}
