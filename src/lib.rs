//! Horde Survivor - a survival-combat simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, timers, combat, progression, upgrades)
//! - `config`: Data-driven game balance
//! - `hud`: Presentation readback (health bar, counters, upgrade menu)

pub mod config;
pub mod hud;
pub mod sim;

pub use config::{ConfigError, Tuning};
pub use hud::{HealthBar, HealthColor, Hud};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Health bar width in pixels at full health
    pub const HEALTH_BAR_WIDTH: f32 = 200.0;
    /// Health fraction above which the bar is green
    pub const HEALTH_GREEN_ABOVE: f32 = 0.6;
    /// Health fraction above which the bar is yellow
    pub const HEALTH_YELLOW_ABOVE: f32 = 0.3;

    /// Number of upgrades offered per level-up
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Convert a timestep in seconds to clock milliseconds
#[inline]
pub fn secs_to_ms(dt: f32) -> f64 {
    f64::from(dt) * 1000.0
}
