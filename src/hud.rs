//! HUD readback
//!
//! Pure projection of [`GameState`] into what the overlay draws. Nothing here
//! feeds back into the simulation.

use serde::Serialize;

use crate::consts::{HEALTH_BAR_WIDTH, HEALTH_GREEN_ABOVE, HEALTH_YELLOW_ABOVE};
use crate::sim::state::GameState;

/// Health bar colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthColor {
    Green,
    Yellow,
    Red,
}

impl HealthColor {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > HEALTH_GREEN_ABOVE {
            HealthColor::Green
        } else if fraction > HEALTH_YELLOW_ABOVE {
            HealthColor::Yellow
        } else {
            HealthColor::Red
        }
    }

    /// Fill colour as 0xRRGGBB
    pub fn rgb(self) -> u32 {
        match self {
            HealthColor::Green => 0x00ff00,
            HealthColor::Yellow => 0xffff00,
            HealthColor::Red => 0xff0000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthBar {
    /// hp / max_hp in [0, 1]
    pub fraction: f32,
    /// Filled width in pixels
    pub width: u32,
    pub color: HealthColor,
}

impl HealthBar {
    pub fn from_state(state: &GameState) -> Self {
        let fraction = state.stats.hp_fraction();
        let width = if state.is_player_dead {
            0
        } else {
            (HEALTH_BAR_WIDTH * fraction).floor() as u32
        };
        Self {
            fraction,
            width,
            color: HealthColor::from_fraction(fraction),
        }
    }
}

/// One row of the upgrade menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuLine {
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the overlay needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub health: HealthBar,
    pub hp: i32,
    pub max_hp: i32,
    pub enemies: usize,
    pub level: u32,
    pub xp: u32,
    pub xp_to_level: u32,
    pub kills: u32,
    pub survival_secs: f64,
    /// Present while an upgrade is being chosen
    pub upgrade_menu: Option<Vec<MenuLine>>,
    /// Show the "YOU DIED" banner
    pub dead: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let upgrade_menu = state.selection.options().map(|options| {
            let cursor = state.selection.cursor().unwrap_or(0);
            options
                .iter()
                .enumerate()
                .map(|(i, key)| MenuLine {
                    label: key.label(),
                    selected: i == cursor,
                })
                .collect()
        });

        Self {
            health: HealthBar::from_state(state),
            hp: state.stats.hp,
            max_hp: state.stats.max_hp,
            enemies: state.registry.live_enemy_count(),
            level: state.stats.level,
            xp: state.stats.xp,
            xp_to_level: state.stats.xp_to_level,
            kills: state.kills,
            survival_secs: state.survival_ms / 1000.0,
            upgrade_menu,
            dead: state.is_player_dead,
        }
    }

    /// XP progress toward the next level in [0, 1]
    pub fn xp_fraction(&self) -> f32 {
        if self.xp_to_level == 0 {
            return 0.0;
        }
        (self.xp as f32 / self.xp_to_level as f32).clamp(0.0, 1.0)
    }

    /// Text lines for the upgrade menu, cursor marked with '>'
    pub fn menu_text(&self) -> Vec<String> {
        self.upgrade_menu
            .iter()
            .flatten()
            .map(|line| {
                let marker = if line.selected { '>' } else { ' ' };
                format!("{marker} {}", line.label)
            })
            .collect()
    }
}
