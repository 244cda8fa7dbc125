//! Game state and core simulation types
//!
//! Everything the gameplay systems read and mutate lives in [`GameState`].
//! It is created at session start and dropped at session end.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::TimerHandle;
use super::registry::{EntityId, Registry};
use super::upgrade::{UpgradeKey, UpgradeSelection};
use crate::config::Tuning;

/// Coarse phase derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen while the player picks an upgrade
    ChoosingUpgrade,
    /// Player died; terminal
    Dead,
}

/// Player stats, mutated by combat, progression and upgrades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub move_speed: f32,
    pub max_hp: i32,
    /// Always inside `[0, max_hp]`; write through [`PlayerStats::set_hp`]
    pub hp: i32,
    pub damage: i32,
    /// Milliseconds between shots
    pub fire_rate_ms: f64,
    /// At least 1
    pub xp_multiplier: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_level: u32,
}

impl PlayerStats {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let p = &tuning.player;
        Self {
            move_speed: p.move_speed,
            max_hp: p.max_hp,
            hp: p.max_hp,
            damage: p.damage,
            fire_rate_ms: p.fire_rate_ms,
            xp_multiplier: 1,
            level: 1,
            xp: 0,
            xp_to_level: p.xp_to_level.max(1),
        }
    }

    /// Set hp, clamped to `[0, max_hp]`
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp.max(0));
    }

    /// Health as a fraction of max, clamped to `[0, 1]`
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Baseline stats copied onto each spawned enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub move_speed: f32,
    pub max_hp: i32,
    pub xp_value: u32,
}

impl EnemyTemplate {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            move_speed: tuning.enemy.move_speed,
            max_hp: tuning.enemy.max_hp,
            xp_value: tuning.enemy.xp_value,
        }
    }
}

/// The player's body in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Things that happened during a tick, for presentation and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: EntityId, pos: Vec2 },
    ProjectileFired { id: EntityId, target: EntityId },
    EnemyKilled { id: EntityId, pos: Vec2 },
    OrbDropped { id: EntityId, value: u32 },
    OrbCollected { id: EntityId, xp: u32 },
    /// Player took contact damage; presentation flashes the player
    PlayerHit { hp: i32 },
    PlayerDied,
    LevelUp { level: u32 },
    UpgradePresented { options: Vec<UpgradeKey> },
    UpgradeApplied { key: UpgradeKey },
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub player: Player,
    pub stats: PlayerStats,
    pub enemy_template: EnemyTemplate,
    pub registry: Registry,
    pub selection: UpgradeSelection,
    /// Level-ups still waiting for an upgrade episode
    pub pending_upgrades: u32,
    pub is_player_dead: bool,
    /// Gameplay time (`survival_ms`) of the last contact damage
    pub last_damage_time: Option<f64>,
    #[serde(skip)]
    pub spawn_timer: Option<TimerHandle>,
    #[serde(skip)]
    pub fire_timer: Option<TimerHandle>,
    /// Gameplay ticks simulated (frozen ticks excluded)
    pub time_ticks: u64,
    /// Gameplay time survived, in milliseconds
    pub survival_ms: f64,
    pub kills: u32,
    /// Events since the last [`GameState::drain_events`]
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state with the player centred in the world
    pub fn new(tuning: Tuning) -> Self {
        let center = Vec2::new(tuning.world_width / 2.0, tuning.world_height / 2.0);
        Self {
            player: Player {
                pos: center,
                vel: Vec2::ZERO,
                radius: tuning.player.radius,
            },
            stats: PlayerStats::from_tuning(&tuning),
            enemy_template: EnemyTemplate::from_tuning(&tuning),
            registry: Registry::new(),
            selection: UpgradeSelection::Inactive,
            pending_upgrades: 0,
            is_player_dead: false,
            last_damage_time: None,
            spawn_timer: None,
            fire_timer: None,
            time_ticks: 0,
            survival_ms: 0.0,
            kills: 0,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.selection.is_active() {
            GamePhase::ChoosingUpgrade
        } else if self.is_player_dead {
            GamePhase::Dead
        } else {
            GamePhase::Playing
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
