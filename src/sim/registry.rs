//! Entity registry
//!
//! Owns every live enemy, projectile and XP orb. Entities are plain records
//! keyed by a stable [`EntityId`]; presentation layers map ids to their own
//! handles. Collections keep spawn order, so iteration is deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EnemyTemplate;

/// Stable identifier shared by all entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    /// XP dropped on death
    pub xp_value: u32,
    pub is_dead: bool,
}

impl Enemy {
    /// Apply damage, keeping hp inside `[0, max_hp]`
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp.saturating_sub(amount)).clamp(0, self.max_hp);
    }
}

/// An auto-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Player damage at the moment this was fired
    pub damage: i32,
}

/// Experience dropped by a dead enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpOrb {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub value: u32,
}

/// Owning collection of all live entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub orbs: Vec<XpOrb>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            projectiles: Vec::new(),
            orbs: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an enemy with stats copied from the template
    pub fn spawn_enemy(&mut self, pos: Vec2, template: &EnemyTemplate, radius: f32) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            hp: template.max_hp,
            max_hp: template.max_hp,
            xp_value: template.xp_value,
            is_dead: false,
        });
        id
    }

    pub fn spawn_projectile(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        damage: i32,
    ) -> EntityId {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            vel,
            radius,
            damage,
        });
        id
    }

    pub fn spawn_orb(&mut self, pos: Vec2, radius: f32, value: u32) -> EntityId {
        let id = self.next_entity_id();
        self.orbs.push(XpOrb {
            id,
            pos,
            radius,
            value,
        });
        id
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Live enemies in spawn order
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.is_dead)
    }

    pub fn live_enemy_count(&self) -> usize {
        self.live_enemies().count()
    }

    /// Remove an enemy, preserving the order of the rest
    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    pub fn remove_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        let idx = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(idx))
    }

    pub fn remove_orb(&mut self, id: EntityId) -> Option<XpOrb> {
        let idx = self.orbs.iter().position(|o| o.id == id)?;
        Some(self.orbs.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> EnemyTemplate {
        EnemyTemplate {
            move_speed: 80.0,
            max_hp: 20,
            xp_value: 10,
        }
    }

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut reg = Registry::new();
        let e = reg.spawn_enemy(Vec2::ZERO, &template(), 12.0);
        let p = reg.spawn_projectile(Vec2::ZERO, Vec2::X, 4.0, 10);
        let o = reg.spawn_orb(Vec2::ZERO, 6.0, 10);
        assert_ne!(e, p);
        assert_ne!(p, o);
        assert_ne!(e, o);
    }

    #[test]
    fn test_enemy_copies_template() {
        let mut reg = Registry::new();
        let id = reg.spawn_enemy(Vec2::new(5.0, 0.0), &template(), 12.0);
        let enemy = reg.enemy(id).unwrap();
        assert_eq!(enemy.hp, 20);
        assert_eq!(enemy.max_hp, 20);
        assert_eq!(enemy.xp_value, 10);
        assert!(!enemy.is_dead);
    }

    #[test]
    fn test_remove_keeps_order_and_is_idempotent() {
        let mut reg = Registry::new();
        let a = reg.spawn_enemy(Vec2::ZERO, &template(), 12.0);
        let b = reg.spawn_enemy(Vec2::ZERO, &template(), 12.0);
        let c = reg.spawn_enemy(Vec2::ZERO, &template(), 12.0);

        assert!(reg.remove_enemy(b).is_some());
        assert!(reg.remove_enemy(b).is_none());
        let ids: Vec<_> = reg.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut reg = Registry::new();
        let id = reg.spawn_enemy(Vec2::ZERO, &template(), 12.0);
        let enemy = reg.enemy_mut(id).unwrap();
        enemy.take_damage(500);
        assert_eq!(enemy.hp, 0);
        enemy.take_damage(-500);
        assert_eq!(enemy.hp, enemy.max_hp);
    }
}
