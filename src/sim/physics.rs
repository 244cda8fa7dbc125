//! Spatial collaborator
//!
//! The gameplay systems only set velocities and react to [`Overlap`] events.
//! Integration, world-bound clamping and overlap detection belong to a
//! [`Physics`] implementation; [`ArcadePhysics`] is the built-in one, using
//! circle bodies and an axis-aligned world rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::{EntityId, Registry};
use super::state::Player;

/// Axis-aligned world rectangle anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Point lies inside the rectangle (edges included)
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Keep a circle of `radius` fully inside the rectangle
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        let r_x = radius.min(self.width / 2.0);
        let r_y = radius.min(self.height / 2.0);
        Vec2::new(
            pos.x.clamp(r_x, self.width - r_x),
            pos.y.clamp(r_y, self.height - r_y),
        )
    }
}

/// Overlap notification between two tracked bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    ProjectileEnemy {
        projectile: EntityId,
        enemy: EntityId,
    },
    PlayerEnemy { enemy: EntityId },
    PlayerOrb { orb: EntityId },
}

/// Physics contract consumed by the simulation
pub trait Physics {
    /// Freeze or unfreeze integration and overlap reporting
    fn set_paused(&mut self, paused: bool);
    fn is_paused(&self) -> bool;
    /// Move every body by its velocity over `dt` seconds
    fn step(&mut self, player: &mut Player, registry: &mut Registry, bounds: &Bounds, dt: f32);
    /// Report current overlaps, projectile hits first
    fn overlaps(&self, player: &Player, registry: &Registry) -> Vec<Overlap>;
}

/// Circle-vs-circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Built-in arcade physics: explicit Euler, clamped player and enemies,
/// unclamped projectiles (they are culled by the combat system instead)
#[derive(Debug, Clone, Default)]
pub struct ArcadePhysics {
    paused: bool,
}

impl ArcadePhysics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Physics for ArcadePhysics {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn step(&mut self, player: &mut Player, registry: &mut Registry, bounds: &Bounds, dt: f32) {
        if self.paused {
            return;
        }

        player.pos = bounds.clamp(player.pos + player.vel * dt, player.radius);

        for enemy in &mut registry.enemies {
            enemy.pos = bounds.clamp(enemy.pos + enemy.vel * dt, enemy.radius);
        }

        for projectile in &mut registry.projectiles {
            projectile.pos += projectile.vel * dt;
        }
    }

    fn overlaps(&self, player: &Player, registry: &Registry) -> Vec<Overlap> {
        if self.paused {
            return Vec::new();
        }

        let mut events = Vec::new();

        for projectile in &registry.projectiles {
            for enemy in registry.live_enemies() {
                if circles_overlap(projectile.pos, projectile.radius, enemy.pos, enemy.radius) {
                    events.push(Overlap::ProjectileEnemy {
                        projectile: projectile.id,
                        enemy: enemy.id,
                    });
                }
            }
        }

        for enemy in registry.live_enemies() {
            if circles_overlap(player.pos, player.radius, enemy.pos, enemy.radius) {
                events.push(Overlap::PlayerEnemy { enemy: enemy.id });
            }
        }

        for orb in &registry.orbs {
            if circles_overlap(player.pos, player.radius, orb.pos, orb.radius) {
                events.push(Overlap::PlayerOrb { orb: orb.id });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyTemplate;

    fn player_at(pos: Vec2) -> Player {
        Player {
            pos,
            vel: Vec2::ZERO,
            radius: 20.0,
        }
    }

    fn template() -> EnemyTemplate {
        EnemyTemplate {
            move_speed: 80.0,
            max_hp: 20,
            xp_value: 10,
        }
    }

    #[test]
    fn test_bounds_clamp_keeps_body_inside() {
        let bounds = Bounds::new(800.0, 600.0);
        assert_eq!(
            bounds.clamp(Vec2::new(-50.0, 700.0), 12.0),
            Vec2::new(12.0, 588.0)
        );
        assert_eq!(
            bounds.clamp(Vec2::new(400.0, 300.0), 12.0),
            Vec2::new(400.0, 300.0)
        );
    }

    #[test]
    fn test_step_integrates_and_clamps() {
        let mut physics = ArcadePhysics::new();
        let bounds = Bounds::new(800.0, 600.0);
        let mut player = player_at(Vec2::new(790.0, 300.0));
        player.vel = Vec2::new(200.0, 0.0);
        let mut reg = Registry::new();
        reg.spawn_projectile(Vec2::new(795.0, 300.0), Vec2::new(600.0, 0.0), 4.0, 10);

        physics.step(&mut player, &mut reg, &bounds, 0.1);
        assert_eq!(player.pos.x, 780.0);
        // Projectiles are free to leave the world
        assert!((reg.projectiles[0].pos.x - 855.0).abs() < 1e-3);
    }

    #[test]
    fn test_paused_physics_is_frozen() {
        let mut physics = ArcadePhysics::new();
        physics.set_paused(true);
        let bounds = Bounds::new(800.0, 600.0);
        let mut player = player_at(Vec2::new(400.0, 300.0));
        let mut reg = Registry::new();
        let id = reg.spawn_enemy(Vec2::new(400.0, 300.0), &template(), 12.0);
        reg.enemy_mut(id).unwrap().vel = Vec2::new(80.0, 0.0);

        physics.step(&mut player, &mut reg, &bounds, 1.0);
        assert_eq!(reg.enemies[0].pos, Vec2::new(400.0, 300.0));
        assert!(physics.overlaps(&player, &reg).is_empty());
    }

    #[test]
    fn test_overlap_ordering_and_dead_enemies() {
        let physics = ArcadePhysics::new();
        let player = player_at(Vec2::new(100.0, 100.0));
        let mut reg = Registry::new();
        let near = reg.spawn_enemy(Vec2::new(110.0, 100.0), &template(), 12.0);
        let dead = reg.spawn_enemy(Vec2::new(100.0, 110.0), &template(), 12.0);
        reg.enemy_mut(dead).unwrap().is_dead = true;
        let proj = reg.spawn_projectile(Vec2::new(112.0, 100.0), Vec2::X, 4.0, 10);
        let orb = reg.spawn_orb(Vec2::new(90.0, 100.0), 6.0, 10);

        let events = physics.overlaps(&player, &reg);
        assert_eq!(
            events,
            vec![
                Overlap::ProjectileEnemy {
                    projectile: proj,
                    enemy: near,
                },
                Overlap::PlayerEnemy { enemy: near },
                Overlap::PlayerOrb { orb },
            ]
        );
    }
}
