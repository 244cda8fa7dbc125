//! Enemy spawn pacing
//!
//! A repeating timer drops one enemy per interval on a random world edge.

use glam::Vec2;
use rand::Rng;

use super::clock::{Scheduler, TimerTask};
use super::physics::Bounds;
use super::registry::EntityId;
use super::state::{GameEvent, GameState};

/// World edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];
}

/// Uniform point on a uniformly chosen edge
pub fn edge_spawn_point<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = match edge {
        Edge::Left => Vec2::new(0.0, rng.random_range(0.0..=bounds.height)),
        Edge::Right => Vec2::new(bounds.width, rng.random_range(0.0..=bounds.height)),
        Edge::Top => Vec2::new(rng.random_range(0.0..=bounds.width), 0.0),
        Edge::Bottom => Vec2::new(rng.random_range(0.0..=bounds.width), bounds.height),
    };
    (edge, pos)
}

/// Schedule the repeating spawn timer
pub fn start_spawning(state: &mut GameState, scheduler: &mut dyn Scheduler) {
    if let Some(old) = state.spawn_timer.take() {
        scheduler.cancel(old);
    }
    let handle = scheduler.schedule(state.tuning.spawn_interval_ms, true, TimerTask::SpawnEnemy);
    state.spawn_timer = Some(handle);
}

/// Cancel spawning for the rest of the session
pub fn stop_spawning(state: &mut GameState, scheduler: &mut dyn Scheduler) {
    if let Some(handle) = state.spawn_timer.take() {
        scheduler.cancel(handle);
        log::debug!("Spawning stopped");
    }
}

/// Spawn one enemy with the current template stats
pub fn spawn_enemy<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<EntityId> {
    if state.is_player_dead || state.selection.is_active() {
        return None;
    }

    let bounds = Bounds::new(state.tuning.world_width, state.tuning.world_height);
    let (edge, pos) = edge_spawn_point(rng, &bounds);
    let id = state
        .registry
        .spawn_enemy(pos, &state.enemy_template, state.tuning.enemy.radius);

    log::debug!("Enemy {:?} spawned on {:?} edge at {:?}", id, edge, pos);
    state.push_event(GameEvent::EnemySpawned { id, pos });
    Some(id)
}
