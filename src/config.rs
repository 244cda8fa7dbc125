//! Gameplay tuning
//!
//! Every balance constant the simulation reads lives here. Defaults reproduce
//! the canonical game; a JSON file can override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading a tuning file
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid tuning JSON
    Parse(serde_json::Error),
    /// A value is outside its allowed range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse tuning file: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Player starting stats and floors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Movement speed in pixels per second
    pub move_speed: f32,
    pub max_hp: i32,
    /// Damage carried by each projectile
    pub damage: i32,
    /// Milliseconds between auto-fire shots
    pub fire_rate_ms: f64,
    /// Fire-rate upgrades never go below this
    pub min_fire_rate_ms: f64,
    /// XP needed for the first level-up
    pub xp_to_level: u32,
    /// Collision radius (the player is a 40x40 square)
    pub radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 200.0,
            max_hp: 100,
            damage: 10,
            fire_rate_ms: 500.0,
            min_fire_rate_ms: 100.0,
            xp_to_level: 50,
            radius: 20.0,
        }
    }
}

/// Baseline enemy stats copied onto each spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub move_speed: f32,
    /// Slow upgrades never go below this
    pub min_move_speed: f32,
    pub max_hp: i32,
    pub xp_value: u32,
    pub radius: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            move_speed: 80.0,
            min_move_speed: 20.0,
            max_hp: 20,
            xp_value: 10,
            radius: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Speed in pixels per second
    pub speed: f32,
    pub radius: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 400.0,
            radius: 4.0,
        }
    }
}

/// Complete gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f32,
    pub world_height: f32,
    /// Milliseconds between enemy spawns
    pub spawn_interval_ms: f64,
    /// Minimum milliseconds between two player damage instants
    pub damage_cooldown_ms: f64,
    /// HP lost per enemy contact
    pub contact_damage: i32,
    /// Threshold growth per level, in percent (130 = x1.3, floored)
    pub xp_growth_percent: u32,
    pub orb_radius: f32,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            spawn_interval_ms: 1000.0,
            damage_cooldown_ms: 300.0,
            contact_damage: 10,
            xp_growth_percent: 130,
            orb_radius: 6.0,
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            projectile: ProjectileTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        positive("world_width", f64::from(self.world_width))?;
        positive("world_height", f64::from(self.world_height))?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("player.fire_rate_ms", self.player.fire_rate_ms)?;
        positive("player.min_fire_rate_ms", self.player.min_fire_rate_ms)?;
        positive("player.max_hp", f64::from(self.player.max_hp))?;
        positive("enemy.max_hp", f64::from(self.enemy.max_hp))?;
        positive("projectile.speed", f64::from(self.projectile.speed))?;

        if self.damage_cooldown_ms < 0.0 {
            return Err(ConfigError::Invalid(
                "damage_cooldown_ms must not be negative".to_string(),
            ));
        }
        if self.player.xp_to_level == 0 {
            return Err(ConfigError::Invalid(
                "player.xp_to_level must be at least 1".to_string(),
            ));
        }
        if self.xp_growth_percent < 100 {
            return Err(ConfigError::Invalid(format!(
                "xp_growth_percent must be at least 100, got {}",
                self.xp_growth_percent
            )));
        }
        if self.player.fire_rate_ms < self.player.min_fire_rate_ms {
            log::warn!(
                "fire_rate_ms {} is below the floor {}; the floor applies after the first upgrade",
                self.player.fire_rate_ms,
                self.player.min_fire_rate_ms
            );
        }
        Ok(())
    }
}
