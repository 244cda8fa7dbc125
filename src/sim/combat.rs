//! Targeting and combat
//!
//! Enemy pursuit, auto-fire at the nearest enemy, projectile culling and hit
//! resolution, contact damage with cooldown, and player death.
//!
//! Every resolver looks entities up by id and silently ignores ids that are
//! already gone, so duplicate or stale overlap events are harmless.

use glam::Vec2;

use super::clock::{Scheduler, TimerTask};
use super::physics::Bounds;
use super::registry::{Enemy, EntityId, Registry};
use super::spawn;
use super::state::{GameEvent, GameState};

/// Point every live enemy at the player at the template speed
pub fn update_pursuit(state: &mut GameState) {
    let target = state.player.pos;
    let speed = state.enemy_template.move_speed;
    for enemy in state.registry.enemies.iter_mut().filter(|e| !e.is_dead) {
        enemy.vel = pursuit_velocity(enemy.pos, target, speed);
    }
}

/// Unit vector toward `target` times `speed`; zero when the points coincide
pub fn pursuit_velocity(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let delta = target - from;
    let length = delta.length();
    if length > 0.0 {
        delta / length * speed
    } else {
        Vec2::ZERO
    }
}

/// Nearest live enemy; on equal distance the first in spawn order wins
pub fn nearest_enemy(registry: &Registry, from: Vec2) -> Option<&Enemy> {
    let mut best: Option<(&Enemy, f32)> = None;
    for enemy in registry.live_enemies() {
        let dist = enemy.pos.distance_squared(from);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((enemy, dist)),
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// (Re)schedule the auto-fire timer at the current fire rate.
/// Any in-flight countdown is dropped; the new interval starts now.
pub fn schedule_auto_fire(state: &mut GameState, scheduler: &mut dyn Scheduler) {
    if let Some(old) = state.fire_timer.take() {
        scheduler.cancel(old);
    }
    let handle = scheduler.schedule(state.stats.fire_rate_ms, true, TimerTask::AutoFire);
    state.fire_timer = Some(handle);
    log::debug!("Auto-fire every {} ms", state.stats.fire_rate_ms);
}

/// Fire one projectile at the nearest live enemy. No enemies, no shot.
pub fn fire_at_nearest(state: &mut GameState) -> Option<EntityId> {
    if state.is_player_dead || state.selection.is_active() {
        return None;
    }

    let origin = state.player.pos;
    let (target, target_pos) = {
        let enemy = nearest_enemy(&state.registry, origin)?;
        (enemy.id, enemy.pos)
    };

    let dir = (target_pos - origin).try_normalize().unwrap_or(Vec2::X);
    let vel = dir * state.tuning.projectile.speed;
    let id = state.registry.spawn_projectile(
        origin,
        vel,
        state.tuning.projectile.radius,
        state.stats.damage,
    );

    log::debug!("Projectile {:?} fired at {:?}", id, target);
    state.push_event(GameEvent::ProjectileFired { id, target });
    Some(id)
}

/// Destroy projectiles that left the world. Returns how many were removed.
pub fn cull_projectiles(state: &mut GameState) -> usize {
    let bounds = Bounds::new(state.tuning.world_width, state.tuning.world_height);
    let projectiles = &mut state.registry.projectiles;
    let before = projectiles.len();
    projectiles.retain(|p| bounds.contains(p.pos));
    before - projectiles.len()
}

/// Resolve a projectile touching an enemy.
/// Returns true if damage was applied.
pub fn resolve_projectile_hit(
    state: &mut GameState,
    projectile: EntityId,
    enemy: EntityId,
) -> bool {
    let alive = state.registry.enemy(enemy).is_some_and(|e| !e.is_dead);
    if !alive {
        return false;
    }
    // One projectile hits at most one enemy
    let Some(shot) = state.registry.remove_projectile(projectile) else {
        return false;
    };

    let killed = match state.registry.enemy_mut(enemy) {
        Some(target) => {
            target.take_damage(shot.damage);
            target.hp <= 0
        }
        None => false,
    };

    if killed {
        kill_enemy(state, enemy);
    }
    true
}

/// Mark an enemy dead, remove it and drop an orb where it stood
fn kill_enemy(state: &mut GameState, id: EntityId) {
    let Some(enemy) = state.registry.enemy_mut(id) else {
        return;
    };
    if enemy.is_dead {
        return;
    }
    enemy.is_dead = true;

    let Some(enemy) = state.registry.remove_enemy(id) else {
        return;
    };
    let orb = state
        .registry
        .spawn_orb(enemy.pos, state.tuning.orb_radius, enemy.xp_value);
    state.kills += 1;

    log::debug!("Enemy {:?} killed, dropped orb {:?}", id, orb);
    state.push_event(GameEvent::EnemyKilled { id, pos: enemy.pos });
    state.push_event(GameEvent::OrbDropped {
        id: orb,
        value: enemy.xp_value,
    });
}

/// Resolve the player touching an enemy at gameplay time `now` (ms).
/// Frozen time does not count toward the cooldown. Returns true if damage
/// was taken.
pub fn resolve_player_hit(
    state: &mut GameState,
    enemy: EntityId,
    now: f64,
    scheduler: &mut dyn Scheduler,
) -> bool {
    if state.is_player_dead {
        return false;
    }
    if !state.registry.enemy(enemy).is_some_and(|e| !e.is_dead) {
        return false;
    }
    if let Some(last) = state.last_damage_time
        && now - last < state.tuning.damage_cooldown_ms
    {
        return false;
    }

    state.last_damage_time = Some(now);
    let hp = state.stats.hp.saturating_sub(state.tuning.contact_damage);
    state.stats.set_hp(hp);
    log::debug!("Player hit, hp {}", state.stats.hp);
    state.push_event(GameEvent::PlayerHit { hp: state.stats.hp });

    if state.stats.hp <= 0 {
        kill_player(state, scheduler);
    }
    true
}

/// Terminal: freeze the horde and stop all timers for good
fn kill_player(state: &mut GameState, scheduler: &mut dyn Scheduler) {
    if state.is_player_dead {
        return;
    }
    state.is_player_dead = true;
    state.player.vel = Vec2::ZERO;
    for enemy in &mut state.registry.enemies {
        enemy.vel = Vec2::ZERO;
    }

    spawn::stop_spawning(state, scheduler);
    if let Some(handle) = state.fire_timer.take() {
        scheduler.cancel(handle);
    }

    log::info!(
        "Player died at level {} after {:.1}s with {} kills",
        state.stats.level,
        state.survival_ms / 1000.0,
        state.kills
    );
    state.push_event(GameEvent::PlayerDied);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::sim::clock::Clock;

    fn state_with_enemy_at(pos: Vec2) -> (GameState, EntityId) {
        let mut state = GameState::new(Tuning::default());
        let template = state.enemy_template.clone();
        let id = state.registry.spawn_enemy(pos, &template, 12.0);
        (state, id)
    }

    fn resting_shot(state: &mut GameState, pos: Vec2, damage: i32) -> EntityId {
        state
            .registry
            .spawn_projectile(pos, Vec2::ZERO, 4.0, damage)
    }

    #[test]
    fn test_pursuit_velocity() {
        let vel = pursuit_velocity(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), 80.0);
        assert!((vel - Vec2::new(48.0, 64.0)).length() < 1e-4);
        assert_eq!(pursuit_velocity(Vec2::ONE, Vec2::ONE, 80.0), Vec2::ZERO);
    }

    #[test]
    fn test_update_pursuit_uses_template_speed() {
        let (mut state, id) = state_with_enemy_at(Vec2::new(0.0, 300.0));
        state.enemy_template.move_speed = 50.0;
        update_pursuit(&mut state);
        let vel = state.registry.enemy(id).unwrap().vel;
        assert!((vel - Vec2::new(50.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_nearest_enemy_tie_goes_to_first() {
        let mut state = GameState::new(Tuning::default());
        let template = state.enemy_template.clone();
        let reg = &mut state.registry;
        let far = reg.spawn_enemy(Vec2::new(0.0, 300.0), &template, 12.0);
        let first = reg.spawn_enemy(Vec2::new(300.0, 300.0), &template, 12.0);
        let second = reg.spawn_enemy(Vec2::new(500.0, 300.0), &template, 12.0);

        let nearest = nearest_enemy(&state.registry, state.player.pos).unwrap();
        assert_eq!(nearest.id, first);
        assert_ne!(nearest.id, second);
        assert_ne!(nearest.id, far);
    }

    #[test]
    fn test_fire_without_enemies_is_noop() {
        let mut state = GameState::new(Tuning::default());
        assert!(fire_at_nearest(&mut state).is_none());
        assert!(state.registry.projectiles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_fire_captures_damage_and_direction() {
        let (mut state, _) = state_with_enemy_at(Vec2::new(400.0, 100.0));
        state.stats.damage = 17;
        let id = fire_at_nearest(&mut state).unwrap();
        state.stats.damage = 99;

        let shot = state.registry.projectile(id).unwrap();
        assert_eq!(shot.damage, 17);
        assert!((shot.vel - Vec2::new(0.0, -400.0)).length() < 1e-3);
    }

    #[test]
    fn test_cull_projectiles_outside_world() {
        let mut state = GameState::new(Tuning::default());
        for pos in [(-1.0, 10.0), (10.0, 10.0), (10.0, 601.0)] {
            resting_shot(&mut state, Vec2::from(pos), 10);
        }
        assert_eq!(cull_projectiles(&mut state), 2);
        assert_eq!(state.registry.projectiles.len(), 1);
    }

    #[test]
    fn test_projectile_hit_is_idempotent() {
        let (mut state, enemy) = state_with_enemy_at(Vec2::new(100.0, 100.0));
        let shot = resting_shot(&mut state, Vec2::new(100.0, 100.0), 5);

        assert!(resolve_projectile_hit(&mut state, shot, enemy));
        assert!(!resolve_projectile_hit(&mut state, shot, enemy));
        assert_eq!(state.registry.enemy(enemy).unwrap().hp, 15);
    }

    #[test]
    fn test_lethal_hit_drops_orb() {
        let (mut state, enemy) = state_with_enemy_at(Vec2::new(100.0, 120.0));
        let shot = resting_shot(&mut state, Vec2::new(100.0, 120.0), 50);

        assert!(resolve_projectile_hit(&mut state, shot, enemy));
        assert!(state.registry.enemy(enemy).is_none());
        assert_eq!(state.registry.orbs.len(), 1);
        let orb = &state.registry.orbs[0];
        assert_eq!(orb.pos, Vec2::new(100.0, 120.0));
        assert_eq!(orb.value, 10);
        assert_eq!(state.kills, 1);

        // A second projectile on the same dead enemy is left alone
        let other = resting_shot(&mut state, Vec2::new(100.0, 120.0), 50);
        assert!(!resolve_projectile_hit(&mut state, other, enemy));
        assert!(state.registry.projectile(other).is_some());
        assert_eq!(state.registry.orbs.len(), 1);
    }

    #[test]
    fn test_contact_damage_cooldown() {
        let (mut state, enemy) = state_with_enemy_at(Vec2::new(400.0, 300.0));
        let mut clock = Clock::new();

        assert!(resolve_player_hit(&mut state, enemy, 0.0, &mut clock));
        assert!(!resolve_player_hit(&mut state, enemy, 150.0, &mut clock));
        assert!(!resolve_player_hit(&mut state, enemy, 299.9, &mut clock));
        assert!(resolve_player_hit(&mut state, enemy, 300.0, &mut clock));
        assert_eq!(state.stats.hp, 80);
    }

    #[test]
    fn test_death_is_terminal() {
        let (mut state, enemy) = state_with_enemy_at(Vec2::new(400.0, 300.0));
        let mut clock = Clock::new();
        spawn::start_spawning(&mut state, &mut clock);
        schedule_auto_fire(&mut state, &mut clock);
        state.registry.enemy_mut(enemy).unwrap().vel = Vec2::new(10.0, 0.0);
        state.stats.hp = 10;

        assert!(resolve_player_hit(&mut state, enemy, 0.0, &mut clock));
        assert!(state.is_player_dead);
        assert_eq!(state.stats.hp, 0);
        assert_eq!(state.registry.enemies[0].vel, Vec2::ZERO);
        assert!(state.spawn_timer.is_none());
        assert!(clock.is_empty());
        assert!(state.events.contains(&GameEvent::PlayerDied));

        assert!(!resolve_player_hit(&mut state, enemy, 10_000.0, &mut clock));
        assert_eq!(state.stats.hp, 0);
    }
}
