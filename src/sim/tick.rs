//! Per-tick update
//!
//! Order matters: upgrade selection first, then the death check, then player
//! movement, pursuit, integration and overlap resolution. The first two each
//! consume the whole tick.

use glam::Vec2;
use rand::Rng;

use super::clock::{Scheduler, TimerHandle, TimerTask};
use super::input::{Action, Input};
use super::physics::{Bounds, Overlap, Physics};
use super::state::GameState;
use super::{combat, progression, spawn, upgrade};
use crate::secs_to_ms;

/// Advance the game state by one timestep of `dt` seconds
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &dyn Input,
    dt: f32,
    physics: &mut dyn Physics,
    scheduler: &mut dyn Scheduler,
    rng: &mut R,
) {
    if state.selection.is_active() {
        upgrade::handle_input(state, input, physics, scheduler, rng);
        return;
    }

    if state.is_player_dead {
        state.player.vel = Vec2::ZERO;
        return;
    }

    state.time_ticks += 1;
    state.survival_ms += secs_to_ms(dt);

    steer_player(state, input);
    combat::update_pursuit(state);

    let bounds = Bounds::new(state.tuning.world_width, state.tuning.world_height);
    physics.step(&mut state.player, &mut state.registry, &bounds, dt);
    combat::cull_projectiles(state);

    let now = state.survival_ms;
    for overlap in physics.overlaps(&state.player, &state.registry) {
        match overlap {
            Overlap::ProjectileEnemy { projectile, enemy } => {
                combat::resolve_projectile_hit(state, projectile, enemy);
            }
            Overlap::PlayerEnemy { enemy } => {
                combat::resolve_player_hit(state, enemy, now, scheduler);
            }
            Overlap::PlayerOrb { orb } => {
                progression::collect_orb(state, orb);
            }
        }

        if state.is_player_dead {
            break;
        }
        // Nothing else happens once an episode opens; the remaining overlaps
        // are reported again after the simulation resumes.
        if upgrade::begin_pending(state, physics, scheduler, rng) {
            break;
        }
    }
}

/// Set player velocity from held movement actions.
/// Left beats right and up beats down; axes are not normalised.
pub fn steer_player(state: &mut GameState, input: &dyn Input) {
    let speed = state.stats.move_speed;
    let mut vel = Vec2::ZERO;

    if input.held(Action::MoveLeft) {
        vel.x = -speed;
    } else if input.held(Action::MoveRight) {
        vel.x = speed;
    }

    if input.held(Action::MoveUp) {
        vel.y = -speed;
    } else if input.held(Action::MoveDown) {
        vel.y = speed;
    }

    state.player.vel = vel;
}

/// Execute a task handed back by the clock.
/// Tasks from timers the state no longer owns are dropped.
pub fn run_timer_task<R: Rng + ?Sized>(
    state: &mut GameState,
    handle: TimerHandle,
    task: TimerTask,
    rng: &mut R,
) {
    match task {
        TimerTask::SpawnEnemy if state.spawn_timer == Some(handle) => {
            spawn::spawn_enemy(state, rng);
        }
        TimerTask::AutoFire if state.fire_timer == Some(handle) => {
            combat::fire_at_nearest(state);
        }
        _ => log::trace!("Dropping stale {:?} from {:?}", task, handle),
    }
}
